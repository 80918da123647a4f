//! Liveness / readiness handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Always answers 200; `db_healthy` reports whether a trivial database
/// round-trip succeeded.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = buildtrack_db::health_check(&state.pool).await.is_ok();

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
