//! Activity trail vocabulary: event shape, activity type constants, and
//! day-stamped destination stream naming.
//!
//! Events are serialized to JSON lines and appended to an external audit
//! sink; the wire shape is `{timestamp, activity_type, project_name, user,
//! details}` and must stay stable for downstream log queries.

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Activity type constants
// ---------------------------------------------------------------------------

/// Known activity types for audit trail entries.
pub mod activity_types {
    pub const LOGIN: &str = "LOGIN";
    pub const LOGOUT: &str = "LOGOUT";
    pub const VIEW: &str = "VIEW";
    pub const CREATE: &str = "CREATE";
    pub const UPDATE: &str = "UPDATE";
    pub const DELETE: &str = "DELETE";
    pub const FILE_UPLOAD: &str = "FILE_UPLOAD";
}

/// Subject name used for authentication events, which have no project.
pub const AUTH_SUBJECT: &str = "USER_AUTH";

/// Actor recorded when no authenticated session is present.
pub const ANONYMOUS_USER: &str = "Anonymous";

// ---------------------------------------------------------------------------
// Event type
// ---------------------------------------------------------------------------

/// A single structured activity record destined for the audit sink.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityEvent {
    pub timestamp: Timestamp,
    pub activity_type: String,
    pub project_name: String,
    pub user: String,
    pub details: serde_json::Value,
}

impl ActivityEvent {
    /// Build an event stamped with the current UTC time.
    pub fn new(
        activity_type: &str,
        project_name: impl Into<String>,
        user: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now(),
            activity_type: activity_type.to_string(),
            project_name: project_name.into(),
            user: user.into(),
            details,
        }
    }

    /// A successful login, optionally carrying the caller's IP address.
    pub fn login(username: &str, ip_address: Option<&str>) -> Self {
        let details = match ip_address {
            Some(ip) => serde_json::json!({ "ip_address": ip }),
            None => serde_json::json!({}),
        };
        Self::new(activity_types::LOGIN, AUTH_SUBJECT, username, details)
    }

    /// A logout. `username` is [`ANONYMOUS_USER`] when no session was active.
    pub fn logout(username: &str) -> Self {
        Self::new(
            activity_types::LOGOUT,
            AUTH_SUBJECT,
            username,
            serde_json::json!({}),
        )
    }

    /// A document upload attached to a project.
    pub fn file_upload(filename: &str, user: &str, project_name: &str) -> Self {
        Self::new(
            activity_types::FILE_UPLOAD,
            project_name,
            user,
            serde_json::json!({ "filename": filename, "action": "file_upload" }),
        )
    }
}

// ---------------------------------------------------------------------------
// Destination stream naming
// ---------------------------------------------------------------------------

/// Name of the day-stamped destination stream for a given calendar day.
///
/// One stream per day keeps the audit trail queryable by date without
/// scanning unrelated entries.
pub fn stream_name_for(date: NaiveDate) -> String {
    format!("buildtrack-app-{}", date.format("%Y-%m-%d"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_serializes_expected_fields() {
        let event = ActivityEvent::new(
            activity_types::CREATE,
            "Test Project",
            "alice",
            serde_json::json!({ "budget": "100000.00" }),
        );
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["activity_type"], "CREATE");
        assert_eq!(json["project_name"], "Test Project");
        assert_eq!(json["user"], "alice");
        assert_eq!(json["details"]["budget"], "100000.00");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn login_event_includes_ip_when_present() {
        let event = ActivityEvent::login("alice", Some("10.0.0.1"));
        assert_eq!(event.activity_type, activity_types::LOGIN);
        assert_eq!(event.project_name, AUTH_SUBJECT);
        assert_eq!(event.details["ip_address"], "10.0.0.1");
    }

    #[test]
    fn login_event_omits_ip_when_absent() {
        let event = ActivityEvent::login("alice", None);
        assert!(event.details.get("ip_address").is_none());
    }

    #[test]
    fn logout_event_for_anonymous() {
        let event = ActivityEvent::logout(ANONYMOUS_USER);
        assert_eq!(event.user, "Anonymous");
        assert_eq!(event.activity_type, activity_types::LOGOUT);
    }

    #[test]
    fn file_upload_event_carries_filename() {
        let event = ActivityEvent::file_upload("plans.pdf", "bob", "Bridge");
        assert_eq!(event.details["filename"], "plans.pdf");
        assert_eq!(event.details["action"], "file_upload");
        assert_eq!(event.project_name, "Bridge");
    }

    #[test]
    fn stream_name_is_day_stamped() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(stream_name_for(date), "buildtrack-app-2026-03-07");
    }
}
