pub mod auth;
pub mod health;
pub mod projects;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /login              GET form entry point (public), POST authenticate
/// /logout             POST tear down session
///
/// /projects           GET list (auth required)
/// /projects/create    GET form description, POST create (auth required)
/// /projects/{id}      GET detail, POST update/delete via action field
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new().merge(auth::router()).merge(projects::router())
}
