//! Session entity model and DTOs.
//!
//! Sessions store only the SHA-256 hash of the opaque session token; the
//! plaintext lives solely in the client's cookie.

use serde::Deserialize;
use sqlx::FromRow;

use buildtrack_core::types::{DbId, Timestamp};

/// Full session row from the `sessions` table.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
}

/// DTO for inserting a new session.
#[derive(Debug, Deserialize)]
pub struct CreateSession {
    pub user_id: DbId,
    pub token_hash: String,
    pub expires_at: Timestamp,
}
