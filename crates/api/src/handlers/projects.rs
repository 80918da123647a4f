//! Handlers for the project workflow: list, create, detail, update, delete.
//!
//! The database mutation is the only step reflected in the HTTP outcome.
//! Audit appends, document uploads, and notifications are best-effort side
//! effects: their failures are logged inside the cloud crate and never roll
//! back the primary mutation or surface to the caller.

use std::str::FromStr;

use axum::extract::{Multipart, Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use buildtrack_core::activity::{activity_types, ActivityEvent};
use buildtrack_core::document::{document_key, DEFAULT_URL_TTL_SECS};
use buildtrack_core::error::CoreError;
use buildtrack_core::types::DbId;
use buildtrack_db::models::project::{
    CreateProject, Project, ProjectPriority, ProjectStatus, UpdateProject,
};
use buildtrack_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::SessionUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Form payload
// ---------------------------------------------------------------------------

/// Raw multipart form fields for a project create/update submission.
#[derive(Debug, Default, Validate)]
struct ProjectForm {
    #[validate(length(min = 1, max = 200, message = "name must be 1-200 characters"))]
    name: String,
    #[validate(length(min = 1, message = "description is required"))]
    description: String,
    #[validate(length(min = 1, max = 200, message = "location must be 1-200 characters"))]
    location: String,
    start_date: String,
    end_date: String,
    budget: String,
    status: String,
    priority: String,
}

/// Validated and type-converted project attributes.
#[derive(Debug)]
struct ParsedProject {
    name: String,
    description: String,
    location: String,
    start_date: chrono::NaiveDate,
    end_date: chrono::NaiveDate,
    budget: Decimal,
    status: ProjectStatus,
    priority: ProjectPriority,
}

/// A file part submitted alongside the form fields.
struct UploadedDocument {
    filename: String,
    bytes: Vec<u8>,
}

impl ProjectForm {
    /// Validate field presence/shape and convert to typed values.
    ///
    /// Omitted status and priority fall back to their defaults (Planning /
    /// Medium); an unrecognized literal is rejected, the enumerations are
    /// closed. Start/end dates are NOT checked for chronological order.
    fn parse(self) -> AppResult<ParsedProject> {
        self.validate()
            .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;

        let start_date = parse_date("start_date", &self.start_date)?;
        let end_date = parse_date("end_date", &self.end_date)?;

        let budget = Decimal::from_str(self.budget.trim()).map_err(|_| {
            AppError::Core(CoreError::Validation(
                "budget must be a decimal number".into(),
            ))
        })?;

        let status = if self.status.is_empty() {
            ProjectStatus::default()
        } else {
            ProjectStatus::parse(&self.status).ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "unknown status '{}'",
                    self.status
                )))
            })?
        };

        let priority = if self.priority.is_empty() {
            ProjectPriority::default()
        } else {
            ProjectPriority::parse(&self.priority).ok_or_else(|| {
                AppError::Core(CoreError::Validation(format!(
                    "unknown priority '{}'",
                    self.priority
                )))
            })?
        };

        Ok(ParsedProject {
            name: self.name,
            description: self.description,
            location: self.location,
            start_date,
            end_date,
            budget,
            status,
            priority,
        })
    }
}

fn parse_date(field: &str, value: &str) -> AppResult<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "{field} must be a YYYY-MM-DD date"
        )))
    })
}

/// Drain a multipart submission into form fields, an optional file part
/// named `document`, and an optional `action` discriminator.
async fn read_project_form(
    mut multipart: Multipart,
) -> AppResult<(ProjectForm, Option<UploadedDocument>, Option<String>)> {
    let mut form = ProjectForm::default();
    let mut document = None;
    let mut action = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "document" {
            let filename = field.file_name().map(str::to_string);
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Malformed file part: {e}")))?;
            // An empty file input still produces a part; only keep real uploads.
            if let Some(filename) = filename.filter(|f| !f.is_empty()) {
                if !bytes.is_empty() {
                    document = Some(UploadedDocument {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(format!("Malformed field '{name}': {e}")))?;

        match name.as_str() {
            "name" => form.name = value,
            "description" => form.description = value,
            "location" => form.location = value,
            "start_date" => form.start_date = value,
            "end_date" => form.end_date = value,
            "budget" => form.budget = value,
            "status" => form.status = value,
            "priority" => form.priority = value,
            "action" => action = Some(value),
            _ => {}
        }
    }

    Ok((form, document, action))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /projects
///
/// All projects, most recently created first.
pub async fn list_projects(
    State(state): State<AppState>,
    user: SessionUser,
) -> AppResult<Json<DataResponse<Vec<Project>>>> {
    let projects = ProjectRepo::list(&state.pool).await?;

    state
        .audit
        .record(&ActivityEvent::new(
            activity_types::VIEW,
            "PROJECT_LIST",
            user.username.as_str(),
            json!({ "total_projects": projects.len() }),
        ))
        .await;

    Ok(Json(DataResponse { data: projects }))
}

/// GET /projects/create
///
/// Names the expected form fields and the closed enum option sets.
pub async fn create_project_form(_user: SessionUser) -> Json<DataResponse<serde_json::Value>> {
    Json(DataResponse {
        data: json!({
            "fields": [
                "name", "description", "location", "start_date", "end_date",
                "budget", "status", "priority", "document"
            ],
            "status_options": ["Planning", "In Progress", "Completed", "On Hold"],
            "priority_options": ["Low", "Medium", "High", "Critical"],
        }),
    })
}

/// POST /projects/create (multipart)
///
/// Persists the project first so it has an identity, then runs the
/// independent side effects: document upload, audit append, email, and --
/// for High/Critical priority -- a broadcast alert.
pub async fn create_project(
    State(state): State<AppState>,
    user: SessionUser,
    multipart: Multipart,
) -> AppResult<Json<DataResponse<Project>>> {
    let (form, document, _action) = read_project_form(multipart).await?;
    let parsed = form.parse()?;

    let input = CreateProject {
        name: parsed.name,
        description: parsed.description,
        location: parsed.location,
        start_date: parsed.start_date,
        end_date: parsed.end_date,
        budget: parsed.budget,
        status: parsed.status,
        priority: parsed.priority,
        manager_id: user.user_id,
    };
    let mut project = ProjectRepo::create(&state.pool, &input).await?;

    // The project record exists regardless of what happens below.
    if let Some(doc) = document {
        let key = document_key(project.id, &doc.filename);
        if state.documents.put(&key, doc.bytes).await {
            if let Some(updated) =
                ProjectRepo::set_document_key(&state.pool, project.id, &key).await?
            {
                project = updated;
            }
            state
                .audit
                .record(&ActivityEvent::file_upload(
                    &doc.filename,
                    &user.username,
                    &project.name,
                ))
                .await;
        }
    }

    state
        .audit
        .record(&ActivityEvent::new(
            activity_types::CREATE,
            project.name.as_str(),
            user.username.as_str(),
            json!({
                "budget": project.budget.to_string(),
                "status": project.status.as_str(),
                "priority": project.priority.as_str(),
            }),
        ))
        .await;

    let to = if user.email.is_empty() {
        state.config.aws.ses_sender.clone()
    } else {
        user.email.clone()
    };
    state
        .notifier
        .email(
            &to,
            &format!("New Construction Project Created: {}", project.name),
            &format!(
                "A new construction project \"{}\" has been created with budget ${}.",
                project.name, project.budget
            ),
        )
        .await;

    if project.priority.requires_broadcast() {
        state
            .notifier
            .broadcast(
                &format!(
                    "High priority construction project created: {} (Priority: {})",
                    project.name, project.priority
                ),
                Some("High Priority Project Alert"),
            )
            .await;
    }

    Ok(Json(DataResponse { data: project }))
}

/// Project detail payload: the row plus a time-limited document URL when a
/// document is attached.
#[derive(Debug, Serialize)]
pub struct ProjectDetail {
    pub project: Project,
    pub document_url: Option<String>,
}

/// GET /projects/{id}
pub async fn project_detail(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ProjectDetail>>> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    state
        .audit
        .record(&ActivityEvent::new(
            activity_types::VIEW,
            project.name.as_str(),
            user.username.as_str(),
            json!({ "project_id": project.id, "status": project.status.as_str() }),
        ))
        .await;

    let document_url = match &project.document_key {
        Some(key) => state.documents.url(key, DEFAULT_URL_TTL_SECS).await,
        None => None,
    };

    Ok(Json(DataResponse {
        data: ProjectDetail {
            project,
            document_url,
        },
    }))
}

/// POST /projects/{id} (multipart, dispatched on the `action` field)
///
/// `action=update` overwrites every field from the form; `action=delete`
/// removes the record permanently and redirects to the list.
pub async fn project_action(
    State(state): State<AppState>,
    user: SessionUser,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Response> {
    let (form, document, action) = read_project_form(multipart).await?;

    match action.as_deref() {
        Some("update") => update_project(&state, &user, id, form, document).await,
        Some("delete") => delete_project(&state, &user, id).await,
        Some(other) => Err(AppError::BadRequest(format!("Unknown action '{other}'"))),
        None => Err(AppError::BadRequest("Missing action field".into())),
    }
}

async fn update_project(
    state: &AppState,
    user: &SessionUser,
    id: DbId,
    form: ProjectForm,
    document: Option<UploadedDocument>,
) -> AppResult<Response> {
    let parsed = form.parse()?;

    let input = UpdateProject {
        name: parsed.name,
        description: parsed.description,
        location: parsed.location,
        start_date: parsed.start_date,
        end_date: parsed.end_date,
        budget: parsed.budget,
        status: parsed.status,
        priority: parsed.priority,
    };
    let mut project = ProjectRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    // A newly supplied file overwrites the previous document key.
    if let Some(doc) = document {
        let key = document_key(project.id, &doc.filename);
        if state.documents.put(&key, doc.bytes).await {
            if let Some(updated) =
                ProjectRepo::set_document_key(&state.pool, project.id, &key).await?
            {
                project = updated;
            }
            state
                .audit
                .record(&ActivityEvent::file_upload(
                    &doc.filename,
                    &user.username,
                    &project.name,
                ))
                .await;
        }
    }

    state
        .audit
        .record(&ActivityEvent::new(
            activity_types::UPDATE,
            project.name.as_str(),
            user.username.as_str(),
            json!({
                "budget": project.budget.to_string(),
                "status": project.status.as_str(),
            }),
        ))
        .await;

    Ok(Json(DataResponse { data: project }).into_response())
}

async fn delete_project(state: &AppState, user: &SessionUser, id: DbId) -> AppResult<Response> {
    let project = ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))?;

    let project_name = project.name;
    ProjectRepo::delete(&state.pool, id).await?;

    // Recorded with the pre-deletion name; the row is already gone.
    state
        .audit
        .record(&ActivityEvent::new(
            activity_types::DELETE,
            project_name.as_str(),
            user.username.as_str(),
            json!({}),
        ))
        .await;

    Ok(Redirect::to("/projects").into_response())
}
