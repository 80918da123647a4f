use axum::routing::get;
use axum::Router;

use crate::handlers::projects;
use crate::state::AppState;

/// Project workflow routes. All require an active session.
///
/// ```text
/// GET  /projects          -> list_projects
/// GET  /projects/create   -> create_project_form
/// POST /projects/create   -> create_project
/// GET  /projects/{id}     -> project_detail
/// POST /projects/{id}     -> project_action (update / delete)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/projects", get(projects::list_projects))
        .route(
            "/projects/create",
            get(projects::create_project_form).post(projects::create_project),
        )
        .route(
            "/projects/{id}",
            get(projects::project_detail).post(projects::project_action),
        )
}
