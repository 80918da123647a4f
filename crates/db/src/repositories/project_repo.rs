//! Repository for the `projects` table.

use sqlx::PgPool;

use buildtrack_core::types::DbId;

use crate::models::project::{CreateProject, Project, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, name, description, location, start_date, end_date, budget, \
    status, priority, manager_id, document_key, created_at, updated_at";

/// Provides CRUD operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project, returning the created row.
    ///
    /// `document_key` starts out NULL; it is set separately once the upload
    /// to the document store has succeeded.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects
                 (name, description, location, start_date, end_date,
                  budget, status, priority, manager_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(input.status)
            .bind(input.priority)
            .bind(input.manager_id)
            .fetch_one(pool)
            .await
    }

    /// Find a project by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects, most recently created first.
    ///
    /// `id DESC` breaks ties between rows created in the same microsecond so
    /// the order stays deterministic.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Overwrite every mutable field of a project (full replacement).
    ///
    /// Returns `None` if no row with the given `id` exists. The document key
    /// is left untouched; use [`ProjectRepo::set_document_key`].
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET
                 name = $2,
                 description = $3,
                 location = $4,
                 start_date = $5,
                 end_date = $6,
                 budget = $7,
                 status = $8,
                 priority = $9,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(input.budget)
            .bind(input.status)
            .bind(input.priority)
            .fetch_optional(pool)
            .await
    }

    /// Record the storage key of a successfully uploaded document.
    pub async fn set_document_key(
        pool: &PgPool,
        id: DbId,
        document_key: &str,
    ) -> Result<Option<Project>, sqlx::Error> {
        let query = format!(
            "UPDATE projects SET document_key = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(document_key)
            .fetch_optional(pool)
            .await
    }

    /// Delete a project permanently. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
