use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use buildtrack_api::config::ServerConfig;
use buildtrack_api::router::build_app_router;
use buildtrack_api::state::AppState;
use buildtrack_cloud::{AwsNotificationDispatcher, CloudWatchAuditSink, S3DocumentStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "buildtrack_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = buildtrack_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    buildtrack_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    buildtrack_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let swept = buildtrack_db::repositories::SessionRepo::delete_expired(&pool)
        .await
        .expect("Failed to sweep expired sessions");
    tracing::info!(swept, "Expired sessions swept");

    // --- Cloud collaborators ---
    // Constructed once at startup and injected into the handlers; their
    // lifecycle is tied to the process, not ambient module state.
    let sdk_config = buildtrack_cloud::load_sdk_config(config.aws.region.clone()).await;
    let audit = Arc::new(CloudWatchAuditSink::new(
        &sdk_config,
        config.aws.log_group.clone(),
    ));
    let documents = Arc::new(S3DocumentStore::new(
        &sdk_config,
        config.aws.s3_bucket.clone(),
    ));
    let notifier = Arc::new(AwsNotificationDispatcher::new(
        &sdk_config,
        config.aws.ses_sender.clone(),
        config.aws.sns_topic_arn.clone(),
    ));
    tracing::info!(
        log_group = %config.aws.log_group,
        bucket = %config.aws.s3_bucket,
        "Cloud collaborators constructed"
    );

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        audit,
        documents,
        notifier,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
