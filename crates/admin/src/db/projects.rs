//! Project repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use techmeet_core::{ProjectId, ProjectStatus};

use super::RepositoryError;
use crate::models::project::Project;

#[derive(Debug, sqlx::FromRow)]
struct ProjectRow {
    id: ProjectId,
    title: String,
    description: Option<String>,
    status: String,
    budget_min: Option<i64>,
    budget_max: Option<i64>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    skills: Vec<String>,
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = RepositoryError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<ProjectStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid project status in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status,
            budget_min: row.budget_min,
            budget_max: row.budget_max,
            start_date: row.start_date,
            end_date: row.end_date,
            skills: row.skills,
            category: row.category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PROJECT_COLUMNS: &str = "id, title, description, status, budget_min, budget_max, \
     start_date, end_date, skills, category, created_at, updated_at";

/// Fields written by project create and update.
#[derive(Debug)]
pub struct ProjectInput {
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub skills: Vec<String>,
    pub category: Option<String>,
}

/// Repository for projects.
pub struct ProjectRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProjectRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all projects, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Project>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a project by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: ProjectId) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &ProjectInput) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "INSERT INTO projects (id, title, description, status, budget_min, budget_max,
                                   start_date, end_date, skills, category)
             VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status.as_str())
        .bind(input.budget_min)
        .bind(input.budget_max)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.skills)
        .bind(&input.category)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace a project's editable fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the project doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProjectId,
        input: &ProjectInput,
    ) -> Result<Project, RepositoryError> {
        let row = sqlx::query_as::<_, ProjectRow>(&format!(
            "UPDATE projects
             SET title = $2, description = $3, status = $4, budget_min = $5, budget_max = $6,
                 start_date = $7, end_date = $8, skills = $9, category = $10, updated_at = now()
             WHERE id = $1
             RETURNING {PROJECT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.status.as_str())
        .bind(input.budget_min)
        .bind(input.budget_max)
        .bind(input.start_date)
        .bind(input.end_date)
        .bind(&input.skills)
        .bind(&input.category)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a project.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the project doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProjectId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Set the status of every listed project in one statement.
    ///
    /// Returns the number of rows actually touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn bulk_update_status(
        &self,
        ids: &[ProjectId],
        status: ProjectStatus,
    ) -> Result<u64, RepositoryError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let result = sqlx::query(
            "UPDATE projects SET status = $1, updated_at = now() WHERE id = ANY($2)",
        )
        .bind(status.as_str())
        .bind(&uuids)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete every listed project in one statement.
    ///
    /// Returns the number of rows actually deleted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn bulk_delete(&self, ids: &[ProjectId]) -> Result<u64, RepositoryError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let result = sqlx::query("DELETE FROM projects WHERE id = ANY($1)")
            .bind(&uuids)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
