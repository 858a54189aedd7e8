//! Authentication extractors for API handlers.
//!
//! Both extractors resolve access through [`AuthzService`], so the admin
//! record is read fresh from the database on every request.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tower_sessions::Session;

use crate::error::AppError;
use crate::models::admin_user::CurrentAdmin;
use crate::services::AuthzService;
use crate::state::AppState;

/// Extractor that requires an authenticated administrator.
///
/// Rejects with 401 when no principal is logged in and 403 when the
/// principal is not a provisioned administrator.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.name)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        let state = AppState::from_ref(state);

        let admin = AuthzService::new(state.pool()).require_admin(&session).await?;
        Ok(Self(admin))
    }
}

/// Extractor that requires a super administrator.
///
/// Rejects like [`RequireAdmin`], plus 403 for ordinary admins.
pub struct RequireSuperAdmin(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireSuperAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = session_from_parts(parts)?;
        let state = AppState::from_ref(state);

        let admin = AuthzService::new(state.pool())
            .require_super_admin(&session)
            .await?;
        Ok(Self(admin))
    }
}

// Session is inserted into extensions by SessionManagerLayer; its absence
// means the layer is missing, which is a wiring bug, not a client error.
fn session_from_parts(parts: &Parts) -> Result<Session, AppError> {
    parts
        .extensions
        .get::<Session>()
        .cloned()
        .ok_or_else(|| AppError::Internal("session layer not installed".to_owned()))
}
