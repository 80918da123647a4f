use std::sync::Arc;

use buildtrack_cloud::{AuditSink, DocumentStore, NotificationDispatcher};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The collaborators are injected as trait objects so tests can
/// substitute recording fakes.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: buildtrack_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Audit sink receiving structured activity events (best-effort).
    pub audit: Arc<dyn AuditSink>,
    /// Document store for project file attachments.
    pub documents: Arc<dyn DocumentStore>,
    /// Email / broadcast alert delivery.
    pub notifier: Arc<dyn NotificationDispatcher>,
}
