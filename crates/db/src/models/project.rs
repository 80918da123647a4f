//! Project entity model, status/priority enumerations, and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use buildtrack_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status / priority enumerations
// ---------------------------------------------------------------------------

/// Project lifecycle status. Free transition between values -- no state
/// machine is enforced, matching the permissive behaviour of the tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status")]
pub enum ProjectStatus {
    #[sqlx(rename = "Planning")]
    Planning,
    #[sqlx(rename = "In Progress")]
    #[serde(rename = "In Progress")]
    InProgress,
    #[sqlx(rename = "Completed")]
    Completed,
    #[sqlx(rename = "On Hold")]
    #[serde(rename = "On Hold")]
    OnHold,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Planning
    }
}

impl ProjectStatus {
    /// The canonical display form, as stored and shown to users.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::OnHold => "On Hold",
        }
    }

    /// Parse the canonical form. Unknown literals are rejected; the set of
    /// statuses is closed.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Planning" => Some(Self::Planning),
            "In Progress" => Some(Self::InProgress),
            "Completed" => Some(Self::Completed),
            "On Hold" => Some(Self::OnHold),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Project priority. High and Critical projects additionally trigger a
/// broadcast alert on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_priority")]
pub enum ProjectPriority {
    #[sqlx(rename = "Low")]
    Low,
    #[sqlx(rename = "Medium")]
    Medium,
    #[sqlx(rename = "High")]
    High,
    #[sqlx(rename = "Critical")]
    Critical,
}

impl Default for ProjectPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl ProjectPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Critical => "Critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Low" => Some(Self::Low),
            "Medium" => Some(Self::Medium),
            "High" => Some(Self::High),
            "Critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Whether a freshly created project at this priority warrants a
    /// broadcast alert in addition to the per-creation email.
    pub fn requires_broadcast(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

impl std::fmt::Display for ProjectPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Project entity
// ---------------------------------------------------------------------------

/// Full project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub budget: Decimal,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub manager_id: DbId,
    pub document_key: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl std::fmt::Display for Project {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for inserting a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub budget: Decimal,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
    pub manager_id: DbId,
}

/// DTO for a full-replacement project update. Every field is overwritten;
/// there are no partial-patch semantics.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: String,
    pub description: String,
    pub location: String,
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    pub budget: Decimal,
    pub status: ProjectStatus,
    pub priority: ProjectPriority,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
