//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use buildtrack_core::types::DbId;
use buildtrack_db::repositories::{SessionRepo, UserRepo};

use crate::auth::session::{hash_session_token, session_token_from_headers};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated user resolved from the session cookie.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication; requests without a valid session are answered with a
/// redirect to the login entry point rather than a bare 401.
#[derive(Debug, Clone)]
pub struct SessionUser {
    /// The session row backing this request (used by logout).
    pub session_id: DbId,
    /// The user's internal database id.
    pub user_id: DbId,
    pub username: String,
    pub email: String,
}

/// Resolve the session cookie on a request to its user, if any.
///
/// Returns `Ok(None)` when no cookie is present or the session is expired or
/// unknown; database errors still propagate.
pub async fn resolve_session(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<SessionUser>, AppError> {
    let Some(token) = session_token_from_headers(headers) else {
        return Ok(None);
    };

    let token_hash = hash_session_token(&token);
    let Some(session) = SessionRepo::find_active_by_token_hash(&state.pool, &token_hash).await?
    else {
        return Ok(None);
    };

    // A session whose user has been deleted is dead weight; the FK cascade
    // removes it, so this lookup failing means the row raced a deletion.
    let Some(user) = UserRepo::find_by_id(&state.pool, session.user_id).await? else {
        return Ok(None);
    };

    Ok(Some(SessionUser {
        session_id: session.id,
        user_id: user.id,
        username: user.username,
        email: user.email,
    }))
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_session(state, &parts.headers)
            .await?
            .ok_or(AppError::LoginRequired)
    }
}
