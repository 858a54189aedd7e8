//! Audit trail viewing. Read-only.

use axum::extract::State;
use axum::response::Response;
use tracing::instrument;

use crate::db::AuditLogRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::response::ok;
use crate::state::AppState;

/// Rows returned by the list endpoint.
const LIST_LIMIT: i64 = 200;

/// `GET /api/audit-logs`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let logs = AuditLogRepository::new(state.pool())
        .list_recent(LIST_LIMIT)
        .await?;
    Ok(ok(logs))
}
