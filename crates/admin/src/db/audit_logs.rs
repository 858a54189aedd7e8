//! Append-only audit trail repository.
//!
//! Rows are only ever inserted; the application never updates or deletes
//! them.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use techmeet_core::{AdminUserId, AuditAction, AuditLogId};

use super::RepositoryError;
use crate::models::audit::{AuditEntry, AuditLog};

#[derive(Debug, sqlx::FromRow)]
struct AuditLogRow {
    id: AuditLogId,
    admin_id: AdminUserId,
    admin_name: String,
    action: String,
    resource: String,
    resource_id: Option<String>,
    details: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = RepositoryError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        let action = row.action.parse::<AuditAction>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid audit action in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            admin_id: row.admin_id,
            admin_name: row.admin_name,
            action,
            resource: row.resource,
            resource_id: row.resource_id,
            details: row.details,
            created_at: row.created_at,
        })
    }
}

/// Repository for the admin audit trail.
pub struct AuditLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AuditLogRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one audit row.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn insert(&self, entry: &AuditEntry) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO admin_audit_logs
                 (id, admin_id, admin_name, action, resource, resource_id, details)
             VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6)",
        )
        .bind(entry.admin_id)
        .bind(&entry.admin_name)
        .bind(entry.action.as_str())
        .bind(&entry.resource)
        .bind(&entry.resource_id)
        .bind(&entry.details)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// The most recent audit rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_recent(&self, limit: i64) -> Result<Vec<AuditLog>, RepositoryError> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            "SELECT id, admin_id, admin_name, action, resource, resource_id, details, created_at
             FROM admin_audit_logs
             ORDER BY created_at DESC
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
