/// Server configuration loaded from environment variables.
///
/// All fields except the AWS resource names have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Session lifetime in hours (default: `24`).
    pub session_expiry_hours: i64,
    /// AWS collaborator configuration.
    pub aws: AwsConfig,
}

/// Names of the external AWS resources the collaborators talk to.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Region override; when `None`, the SDK's default resolution applies.
    pub region: Option<String>,
    /// S3 bucket holding project documents.
    pub s3_bucket: String,
    /// CloudWatch log group receiving the audit trail.
    pub log_group: String,
    /// Verified SES sender address for transactional email.
    pub ses_sender: String,
    /// SNS topic ARN for high-priority broadcast alerts.
    pub sns_topic_arn: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SESSION_EXPIRY_HOURS` | `24`                       |
    /// | `AWS_REGION`           | SDK default resolution     |
    /// | `AWS_S3_BUCKET`        | `buildtrack-documents`     |
    /// | `AWS_LOG_GROUP`        | `buildtrack-activity`      |
    /// | `AWS_SES_SENDER`       | `noreply@buildtrack.local` |
    /// | `AWS_SNS_TOPIC_ARN`    | (empty)                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let session_expiry_hours: i64 = std::env::var("SESSION_EXPIRY_HOURS")
            .unwrap_or_else(|_| "24".into())
            .parse()
            .expect("SESSION_EXPIRY_HOURS must be a valid i64");

        let aws = AwsConfig {
            region: std::env::var("AWS_REGION").ok(),
            s3_bucket: std::env::var("AWS_S3_BUCKET")
                .unwrap_or_else(|_| "buildtrack-documents".into()),
            log_group: std::env::var("AWS_LOG_GROUP")
                .unwrap_or_else(|_| "buildtrack-activity".into()),
            ses_sender: std::env::var("AWS_SES_SENDER")
                .unwrap_or_else(|_| "noreply@buildtrack.local".into()),
            sns_topic_arn: std::env::var("AWS_SNS_TOPIC_ARN").unwrap_or_default(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            session_expiry_hours,
            aws,
        }
    }
}
