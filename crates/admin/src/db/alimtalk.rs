//! Alimtalk dispatch-log repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use techmeet_core::{AlimtalkLogId, ProfileId, SendType, ServiceType};

use super::RepositoryError;
use crate::models::alimtalk::{AlimtalkLog, AlimtalkLogDetail};

#[derive(Debug, sqlx::FromRow)]
struct AlimtalkLogRow {
    id: AlimtalkLogId,
    user_id: Option<ProfileId>,
    template_code: String,
    template_name: Option<String>,
    service_type: String,
    message_id: Option<String>,
    send_type: String,
    scheduled_at: Option<DateTime<Utc>>,
    is_success: bool,
    sent_at: Option<DateTime<Utc>>,
    error_message: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AlimtalkLogRow> for AlimtalkLog {
    type Error = RepositoryError;

    fn try_from(row: AlimtalkLogRow) -> Result<Self, Self::Error> {
        let service_type = row.service_type.parse::<ServiceType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid service type in database: {e}"))
        })?;
        let send_type = row.send_type.parse::<SendType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid send type in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            template_code: row.template_code,
            template_name: row.template_name,
            service_type,
            message_id: row.message_id,
            send_type,
            scheduled_at: row.scheduled_at,
            is_success: row.is_success,
            sent_at: row.sent_at,
            error_message: row.error_message,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AlimtalkLogDetailRow {
    #[sqlx(flatten)]
    log: AlimtalkLogRow,
    recipient_name: Option<String>,
    recipient_phone: Option<String>,
}

impl TryFrom<AlimtalkLogDetailRow> for AlimtalkLogDetail {
    type Error = RepositoryError;

    fn try_from(row: AlimtalkLogDetailRow) -> Result<Self, Self::Error> {
        Ok(Self {
            log: row.log.try_into()?,
            recipient_name: row.recipient_name,
            recipient_phone: row.recipient_phone,
        })
    }
}

/// A new dispatch-log row recording a send.
#[derive(Debug)]
pub struct NewAlimtalkLog {
    pub user_id: Option<ProfileId>,
    pub template_code: String,
    pub template_name: Option<String>,
    pub service_type: ServiceType,
    pub send_type: SendType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// Repository for the notification dispatch log.
pub struct AlimtalkLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AlimtalkLogRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The most recent dispatch rows with recipient info, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AlimtalkLogDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, AlimtalkLogDetailRow>(
            "SELECT al.id, al.user_id, al.template_code, al.template_name, al.service_type,
                    al.message_id, al.send_type, al.scheduled_at, al.is_success, al.sent_at,
                    al.error_message, al.created_at,
                    pr.name AS recipient_name, pr.phone AS recipient_phone
             FROM alimtalk_logs al
             LEFT JOIN profiles pr ON pr.id = al.user_id
             ORDER BY al.created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Record one dispatch. Immediate sends are marked sent right away;
    /// scheduled sends keep `sent_at` empty until delivery.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn record(&self, log: &NewAlimtalkLog) -> Result<AlimtalkLog, RepositoryError> {
        let sent_now = matches!(log.send_type, SendType::Immediate);
        let row = sqlx::query_as::<_, AlimtalkLogRow>(
            "INSERT INTO alimtalk_logs
                 (id, user_id, template_code, template_name, service_type, send_type,
                  scheduled_at, is_success, sent_at)
             VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6, $7,
                     CASE WHEN $7 THEN now() ELSE NULL END)
             RETURNING id, user_id, template_code, template_name, service_type, message_id,
                       send_type, scheduled_at, is_success, sent_at, error_message, created_at",
        )
        .bind(log.user_id)
        .bind(&log.template_code)
        .bind(&log.template_name)
        .bind(log.service_type.as_str())
        .bind(log.send_type.as_str())
        .bind(log.scheduled_at)
        .bind(sent_now)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// Record one dispatch row per recipient.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any insert fails.
    pub async fn record_batch(
        &self,
        recipients: &[ProfileId],
        log: &NewAlimtalkLog,
    ) -> Result<u64, RepositoryError> {
        let sent_now = matches!(log.send_type, SendType::Immediate);
        let uuids: Vec<uuid::Uuid> = recipients.iter().map(|id| id.as_uuid()).collect();
        let result = sqlx::query(
            "INSERT INTO alimtalk_logs
                 (id, user_id, template_code, template_name, service_type, send_type,
                  scheduled_at, is_success, sent_at)
             SELECT gen_random_uuid(), r, $2, $3, $4, $5, $6, $7,
                    CASE WHEN $7 THEN now() ELSE NULL END
             FROM unnest($1::uuid[]) AS r",
        )
        .bind(&uuids)
        .bind(&log.template_code)
        .bind(&log.template_name)
        .bind(log.service_type.as_str())
        .bind(log.send_type.as_str())
        .bind(log.scheduled_at)
        .bind(sent_now)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
