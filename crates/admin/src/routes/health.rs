//! Health check endpoints.

use axum::extract::State;
use axum::response::Response;

use crate::error::AppError;
use crate::response::ok;
use crate::state::AppState;

/// Liveness: the process is up.
pub async fn health() -> Response {
    ok(serde_json::json!({"status": "ok"}))
}

/// Readiness: the database answers.
///
/// # Errors
///
/// Returns `AppError::Database` if the ping fails.
pub async fn ready(State(state): State<AppState>) -> Result<Response, AppError> {
    sqlx::query("SELECT 1")
        .execute(state.pool())
        .await
        .map_err(AppError::Database)?;

    Ok(ok(serde_json::json!({"status": "ready"})))
}
