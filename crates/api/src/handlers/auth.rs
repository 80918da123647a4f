//! Handlers for the authentication surface (login page, login, logout).

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use serde::Deserialize;

use buildtrack_core::activity::{ActivityEvent, ANONYMOUS_USER};
use buildtrack_core::error::CoreError;
use buildtrack_db::models::session::CreateSession;
use buildtrack_db::repositories::{SessionRepo, UserRepo};

use crate::auth::password::verify_password;
use crate::auth::session::{expired_session_cookie, generate_session_token, session_cookie};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::resolve_session;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// GET /login
///
/// Public entry point unauthenticated requests are redirected to. Rendering
/// is left to the client; this just names the expected form fields.
pub async fn login_page() -> Json<DataResponse<serde_json::Value>> {
    Json(DataResponse {
        data: serde_json::json!({ "fields": ["username", "password"] }),
    })
}

/// POST /login
///
/// Authenticate with username + password. On match, establishes a session
/// cookie and redirects to the project list; on mismatch the caller is told
/// only that the combination was invalid, never which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(input): Form<LoginRequest>,
) -> AppResult<Response> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let (token, token_hash) = generate_session_token();
    let expires_at = Utc::now() + chrono::Duration::hours(state.config.session_expiry_hours);
    SessionRepo::create(
        &state.pool,
        &CreateSession {
            user_id: user.id,
            token_hash,
            expires_at,
        },
    )
    .await?;

    // Best-effort: a failed audit append never blocks the login.
    let ip = client_ip(&headers);
    state
        .audit
        .record(&ActivityEvent::login(&user.username, ip.as_deref()))
        .await;

    let cookie = session_cookie(&token, state.config.session_expiry_hours * 3600);
    Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/projects")).into_response())
}

/// POST /logout
///
/// Tears down the session if one is active; the acting identity is recorded
/// as "Anonymous" when none is.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let username = match resolve_session(&state, &headers).await? {
        Some(session_user) => {
            SessionRepo::delete(&state.pool, session_user.session_id).await?;
            session_user.username
        }
        None => ANONYMOUS_USER.to_string(),
    };

    state.audit.record(&ActivityEvent::logout(&username)).await;

    Ok((
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to("/login"),
    )
        .into_response())
}

/// Caller IP as reported by the `X-Forwarded-For` header, if any.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
