//! Best-effort audit recording.
//!
//! A failed audit write must never fail the admin's operation. The insert
//! is awaited before the response goes out, and any failure is logged and
//! swallowed.

use sqlx::PgPool;

use crate::db::AuditLogRepository;
use crate::models::audit::AuditEntry;

/// Appends entries to the admin audit trail.
pub struct AuditRecorder<'a> {
    pool: &'a PgPool,
}

impl<'a> AuditRecorder<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one entry. Infallible from the caller's perspective.
    pub async fn record(&self, entry: AuditEntry) {
        if let Err(e) = AuditLogRepository::new(self.pool).insert(&entry).await {
            tracing::error!(
                error = %e,
                admin_id = %entry.admin_id,
                action = %entry.action,
                resource = %entry.resource,
                "Failed to write audit log entry"
            );
        }
    }
}
