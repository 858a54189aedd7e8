//! Project application repository.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use techmeet_core::{ApplicationId, ApplicationStatus, ProfileId, ProjectId};

use super::RepositoryError;
use crate::models::application::{Application, ApplicationSummary};

#[derive(Debug, sqlx::FromRow)]
struct ApplicationRow {
    id: ApplicationId,
    project_id: ProjectId,
    profile_id: ProfileId,
    status: String,
    cover_letter: Option<String>,
    expected_budget: Option<i64>,
    available_start_date: Option<NaiveDate>,
    admin_memo: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ApplicationRow> for Application {
    type Error = RepositoryError;

    fn try_from(row: ApplicationRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<ApplicationStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid application status in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            project_id: row.project_id,
            profile_id: row.profile_id,
            status,
            cover_letter: row.cover_letter,
            expected_budget: row.expected_budget,
            available_start_date: row.available_start_date,
            admin_memo: row.admin_memo,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ApplicationSummaryRow {
    #[sqlx(flatten)]
    application: ApplicationRow,
    project_title: String,
    applicant_name: String,
    applicant_email: String,
}

impl TryFrom<ApplicationSummaryRow> for ApplicationSummary {
    type Error = RepositoryError;

    fn try_from(row: ApplicationSummaryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            application: row.application.try_into()?,
            project_title: row.project_title,
            applicant_name: row.applicant_name,
            applicant_email: row.applicant_email,
        })
    }
}

const APPLICATION_COLUMNS: &str = "a.id, a.project_id, a.profile_id, a.status, a.cover_letter, \
     a.expected_budget, a.available_start_date, a.admin_memo, a.created_at, a.updated_at";

/// Fields written by the application review endpoint.
#[derive(Debug)]
pub struct ApplicationUpdate {
    pub status: ApplicationStatus,
    pub admin_memo: Option<String>,
}

/// Repository for project applications.
pub struct ApplicationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ApplicationRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all applications with project and applicant context, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<ApplicationSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, ApplicationSummaryRow>(&format!(
            "SELECT {APPLICATION_COLUMNS},
                    p.title AS project_title,
                    pr.name AS applicant_name,
                    pr.email AS applicant_email
             FROM applications a
             JOIN projects p ON p.id = a.project_id
             JOIN profiles pr ON pr.id = a.profile_id
             ORDER BY a.created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an application by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(
        &self,
        id: ApplicationId,
    ) -> Result<Option<ApplicationSummary>, RepositoryError> {
        let row = sqlx::query_as::<_, ApplicationSummaryRow>(&format!(
            "SELECT {APPLICATION_COLUMNS},
                    p.title AS project_title,
                    pr.name AS applicant_name,
                    pr.email AS applicant_email
             FROM applications a
             JOIN projects p ON p.id = a.project_id
             JOIN profiles pr ON pr.id = a.profile_id
             WHERE a.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Apply a review decision (status and internal memo).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the application doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ApplicationId,
        changes: &ApplicationUpdate,
    ) -> Result<Application, RepositoryError> {
        let row = sqlx::query_as::<_, ApplicationRow>(
            "UPDATE applications
             SET status = $2, admin_memo = $3, updated_at = now()
             WHERE id = $1
             RETURNING id, project_id, profile_id, status, cover_letter,
                       expected_budget, available_start_date, admin_memo,
                       created_at, updated_at",
        )
        .bind(id)
        .bind(changes.status.as_str())
        .bind(&changes.admin_memo)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Set the status of every listed application in one statement.
    ///
    /// Returns the number of rows actually touched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn bulk_update_status(
        &self,
        ids: &[ApplicationId],
        status: ApplicationStatus,
    ) -> Result<u64, RepositoryError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| id.as_uuid()).collect();
        let result = sqlx::query(
            "UPDATE applications SET status = $1, updated_at = now() WHERE id = ANY($2)",
        )
        .bind(status.as_str())
        .bind(&uuids)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
