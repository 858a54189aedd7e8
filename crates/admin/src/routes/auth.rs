//! Login and logout.

use axum::extract::State;
use axum::response::Response;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use validator::Validate;

use techmeet_core::Email;

use crate::error::AppError;
use crate::extract::ValidJson;
use crate::response::ok;
use crate::services::{AuthService, authz::SESSION_PRINCIPAL_KEY};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

/// `POST /api/auth/login`
///
/// On success the session is rotated and holds only the principal ID; every
/// later request re-resolves the admin record from the database.
#[instrument(skip(state, session, body))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidJson(body): ValidJson<LoginRequest>,
) -> Result<Response, AppError> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    let admin = AuthService::new(state.pool())
        .login(&email, &body.password)
        .await?;

    // Rotate the session ID so a pre-login session cannot be replayed.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("failed to rotate session: {e}")))?;
    session
        .insert(SESSION_PRINCIPAL_KEY, admin.auth_user_id)
        .await
        .map_err(|e| AppError::Internal(format!("failed to establish session: {e}")))?;

    tracing::info!(admin_id = %admin.id, "Admin logged in");
    Ok(ok(admin))
}

/// `POST /api/auth/logout`
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response, AppError> {
    session
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("failed to clear session: {e}")))?;

    Ok(ok(serde_json::json!({"logged_out": true})))
}
