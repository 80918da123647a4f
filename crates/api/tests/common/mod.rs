//! Shared helpers for API integration tests: a router wired to recording
//! fake collaborators, plus request/response utilities.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use buildtrack_api::auth::password::hash_password;
use buildtrack_api::config::{AwsConfig, ServerConfig};
use buildtrack_api::router::build_app_router;
use buildtrack_api::state::AppState;
use buildtrack_cloud::{AuditSink, DocumentStore, NotificationDispatcher};
use buildtrack_core::activity::ActivityEvent;
use buildtrack_db::models::user::{CreateUser, User};
use buildtrack_db::repositories::UserRepo;

// ---------------------------------------------------------------------------
// Recording fake collaborators
// ---------------------------------------------------------------------------

/// Audit sink that records every event in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    pub events: Mutex<Vec<ActivityEvent>>,
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record(&self, event: &ActivityEvent) -> bool {
        self.events.lock().unwrap().push(event.clone());
        true
    }
}

impl RecordingAuditSink {
    /// Events with the given activity type, in recording order.
    pub fn events_of_type(&self, activity_type: &str) -> Vec<ActivityEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.activity_type == activity_type)
            .cloned()
            .collect()
    }
}

/// Document store that records puts and can be told to fail them.
#[derive(Default)]
pub struct FakeDocumentStore {
    pub fail_puts: bool,
    pub puts: Mutex<Vec<String>>,
}

impl FakeDocumentStore {
    pub fn failing() -> Self {
        Self {
            fail_puts: true,
            puts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl DocumentStore for FakeDocumentStore {
    async fn put(&self, key: &str, _bytes: Vec<u8>) -> bool {
        if self.fail_puts {
            return false;
        }
        self.puts.lock().unwrap().push(key.to_string());
        true
    }

    async fn url(&self, key: &str, ttl_seconds: u64) -> Option<String> {
        Some(format!("https://documents.test/{key}?ttl={ttl_seconds}"))
    }
}

/// Notification dispatcher that records emails and broadcasts.
#[derive(Default)]
pub struct RecordingDispatcher {
    /// `(to, subject)` pairs.
    pub emails: Mutex<Vec<(String, String)>>,
    pub broadcasts: Mutex<Vec<String>>,
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn email(&self, to: &str, subject: &str, _body: &str) -> bool {
        self.emails
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string()));
        true
    }

    async fn broadcast(&self, message: &str, _subject: Option<&str>) -> bool {
        self.broadcasts.lock().unwrap().push(message.to_string());
        true
    }
}

/// The set of fakes behind a test app, kept so assertions can inspect them.
pub struct TestCollaborators {
    pub audit: Arc<RecordingAuditSink>,
    pub documents: Arc<FakeDocumentStore>,
    pub notifier: Arc<RecordingDispatcher>,
}

impl TestCollaborators {
    pub fn new() -> Self {
        Self {
            audit: Arc::new(RecordingAuditSink::default()),
            documents: Arc::new(FakeDocumentStore::default()),
            notifier: Arc::new(RecordingDispatcher::default()),
        }
    }

    /// Collaborators whose document store rejects every upload.
    pub fn with_failing_documents() -> Self {
        Self {
            documents: Arc::new(FakeDocumentStore::failing()),
            ..Self::new()
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        session_expiry_hours: 24,
        aws: AwsConfig {
            region: None,
            s3_bucket: "test-bucket".to_string(),
            log_group: "test-activity".to_string(),
            ses_sender: "noreply@test.local".to_string(),
            sns_topic_arn: "arn:aws:sns:test:topic".to_string(),
        },
    }
}

/// Build the full application router against recording fakes.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool, collaborators: &TestCollaborators) -> Router {
    let config = test_config();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        audit: collaborators.audit.clone(),
        documents: collaborators.documents.clone(),
        notifier: collaborators.notifier.clone(),
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

/// Create a test user directly in the database and return the user row plus
/// the plaintext password used.
pub async fn create_test_user(pool: &PgPool, username: &str) -> (User, String) {
    let password = "test_password_123!";
    let hashed = hash_password(password).expect("hashing should succeed");
    let input = CreateUser {
        username: username.to_string(),
        email: format!("{username}@test.com"),
        password_hash: hashed,
    };
    let user = UserRepo::create(pool, &input)
        .await
        .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log in via the API and return the `session=<token>` cookie pair.
pub async fn login_user(app: Router, username: &str, password: &str) -> String {
    let body = format!("username={username}&password={password}");
    let response = post_form(app, "/login", &body, None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login must set a session cookie")
        .to_str()
        .unwrap();
    set_cookie
        .split(';')
        .next()
        .expect("cookie must have a value")
        .to_string()
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST an `application/x-www-form-urlencoded` body, with an optional cookie.
pub async fn post_form(app: Router, uri: &str, body: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.oneshot(request.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Assemble a `multipart/form-data` body from text fields and an optional
/// `(field, filename, bytes)` file part.
pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((name, filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// POST a multipart body, with an optional cookie.
pub async fn post_multipart(
    app: Router,
    uri: &str,
    body: Vec<u8>,
    cookie: Option<&str>,
) -> Response {
    let mut request = Request::builder().method("POST").uri(uri).header(
        header::CONTENT_TYPE,
        format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app.oneshot(request.body(Body::from(body)).unwrap())
        .await
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body must be valid JSON")
}
