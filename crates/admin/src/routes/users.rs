//! Platform user management.

use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use techmeet_core::{AuditAction, ProfileId};

use crate::db::{ProfileRepository, profiles::ProfileUpdate};
use crate::error::AppError;
use crate::extract::ValidJson;
use crate::middleware::RequireAdmin;
use crate::models::audit::AuditEntry;
use crate::response::ok;
use crate::services::AuditRecorder;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(range(min = 0, max = 60, message = "must be between 0 and 60"))]
    pub career_years: Option<i32>,
    #[validate(url(message = "must be a valid URL"))]
    pub portfolio_url: Option<String>,
    #[validate(url(message = "must be a valid URL"))]
    pub avatar_url: Option<String>,
}

/// `GET /api/users`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let users = ProfileRepository::new(state.pool()).list_all().await?;
    Ok(ok(users))
}

/// `GET /api/users/{id}`
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProfileId>,
) -> Result<Response, AppError> {
    let user = ProfileRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("user not found".to_owned()))?;
    Ok(ok(user))
}

/// `PUT /api/users/{id}`
#[instrument(skip(admin, state))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProfileId>,
    ValidJson(body): ValidJson<UpdateUserRequest>,
) -> Result<Response, AppError> {
    let changes = ProfileUpdate {
        name: body.name,
        phone: body.phone,
        bio: body.bio,
        skills: body.skills,
        career_years: body.career_years,
        portfolio_url: body.portfolio_url,
        avatar_url: body.avatar_url,
    };
    let user = ProfileRepository::new(state.pool()).update(id, &changes).await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Update, "user")
                .resource_id(id)
                .details(serde_json::json!({"name": user.name})),
        )
        .await;

    Ok(ok(user))
}

/// `DELETE /api/users/{id}`
///
/// Soft withdraw: the row is kept, the account is marked withdrawn.
#[instrument(skip(admin, state))]
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProfileId>,
) -> Result<Response, AppError> {
    ProfileRepository::new(state.pool()).withdraw(id).await?;

    AuditRecorder::new(state.pool())
        .record(AuditEntry::new(&admin, AuditAction::Delete, "user").resource_id(id))
        .await;

    Ok(ok(serde_json::json!({"withdrawn": true})))
}
