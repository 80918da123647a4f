//! Document key derivation for project file attachments.

use crate::types::DbId;

/// Default lifetime for retrieval URLs, in seconds.
pub const DEFAULT_URL_TTL_SECS: u64 = 3600;

/// Derive the storage key for a project document.
///
/// Keys take the form `<project-id>_<original-filename>`. Any path
/// components in the submitted filename are stripped so the key stays flat.
pub fn document_key(project_id: DbId, filename: &str) -> String {
    let basename = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);
    format!("{project_id}_{basename}")
}
