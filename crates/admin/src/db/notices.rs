//! Notice repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use techmeet_core::{NoticeId, NoticeType};

use super::RepositoryError;
use crate::models::notice::Notice;

#[derive(Debug, sqlx::FromRow)]
struct NoticeRow {
    id: NoticeId,
    title: String,
    content: String,
    is_published: bool,
    notice_type: String,
    start_at: Option<DateTime<Utc>>,
    end_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NoticeRow> for Notice {
    type Error = RepositoryError;

    fn try_from(row: NoticeRow) -> Result<Self, Self::Error> {
        let notice_type = row.notice_type.parse::<NoticeType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid notice type in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            title: row.title,
            content: row.content,
            is_published: row.is_published,
            notice_type,
            start_at: row.start_at,
            end_at: row.end_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const NOTICE_COLUMNS: &str =
    "id, title, content, is_published, notice_type, start_at, end_at, created_at, updated_at";

/// Fields written by notice create and update.
#[derive(Debug)]
pub struct NoticeInput {
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub notice_type: NoticeType,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

/// Repository for notices.
pub struct NoticeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NoticeRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all notices, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Notice>, RepositoryError> {
        let rows = sqlx::query_as::<_, NoticeRow>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a notice by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: NoticeId) -> Result<Option<Notice>, RepositoryError> {
        let row = sqlx::query_as::<_, NoticeRow>(&format!(
            "SELECT {NOTICE_COLUMNS} FROM notices WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a notice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &NoticeInput) -> Result<Notice, RepositoryError> {
        let row = sqlx::query_as::<_, NoticeRow>(&format!(
            "INSERT INTO notices (id, title, content, is_published, notice_type, start_at, end_at)
             VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6)
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.is_published)
        .bind(input.notice_type.as_str())
        .bind(input.start_at)
        .bind(input.end_at)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Replace a notice's fields.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the notice doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: NoticeId,
        input: &NoticeInput,
    ) -> Result<Notice, RepositoryError> {
        let row = sqlx::query_as::<_, NoticeRow>(&format!(
            "UPDATE notices
             SET title = $2, content = $3, is_published = $4, notice_type = $5,
                 start_at = $6, end_at = $7, updated_at = now()
             WHERE id = $1
             RETURNING {NOTICE_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.is_published)
        .bind(input.notice_type.as_str())
        .bind(input.start_at)
        .bind(input.end_at)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Delete a notice.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the notice doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: NoticeId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM notices WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
