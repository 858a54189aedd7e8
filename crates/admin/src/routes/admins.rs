//! Administrator account management. Super admin only.

use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use techmeet_core::{AdminRole, AdminUserId, AuditAction, Email};

use crate::db::{AdminUserRepository, AuthUserRepository};
use crate::error::AppError;
use crate::extract::ValidJson;
use crate::middleware::RequireSuperAdmin;
use crate::models::audit::AuditEntry;
use crate::response::{created, ok};
use crate::services::{AuditRecorder, auth::hash_password};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 128, message = "must be between 8 and 128 characters"))]
    pub password: String,
    pub role: AdminRole,
}

/// `GET /api/admins`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireSuperAdmin(_admin): RequireSuperAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let admins = AdminUserRepository::new(state.pool()).list_all().await?;
    Ok(ok(admins))
}

/// `POST /api/admins`
///
/// The login principal and the admin record are created in one transaction,
/// so a half-provisioned admin can never exist.
#[instrument(skip(acting, state, body))]
pub async fn create(
    RequireSuperAdmin(acting): RequireSuperAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CreateAdminRequest>,
) -> Result<Response, AppError> {
    let email = Email::parse(&body.email)
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;
    let password_hash = hash_password(&body.password)?;

    let mut tx = state.pool().begin().await?;
    let auth_user_id = AuthUserRepository::create_in_tx(&mut tx, &email, &password_hash).await?;
    let admin =
        AdminUserRepository::create_in_tx(&mut tx, auth_user_id, &body.name, &email, body.role)
            .await?;
    tx.commit().await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&acting, AuditAction::Create, "admin")
                .resource_id(admin.id)
                .details(serde_json::json!({
                    "name": admin.name,
                    "role": admin.role,
                })),
        )
        .await;

    Ok(created(admin))
}

/// `DELETE /api/admins/{id}`
///
/// Refuses self-deletion and deletion of the last super administrator.
/// Deleting the record also deletes the login principal, so access is
/// revoked immediately.
#[instrument(skip(acting, state))]
pub async fn remove(
    RequireSuperAdmin(acting): RequireSuperAdmin,
    State(state): State<AppState>,
    Path(id): Path<AdminUserId>,
) -> Result<Response, AppError> {
    if id == acting.id {
        return Err(AppError::BadRequest(
            "cannot delete your own admin account".to_owned(),
        ));
    }

    let repo = AdminUserRepository::new(state.pool());
    let target = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("admin not found".to_owned()))?;

    if target.role == AdminRole::SuperAdmin
        && repo.count_by_role(AdminRole::SuperAdmin).await? <= 1
    {
        return Err(AppError::BadRequest(
            "cannot delete the last super administrator".to_owned(),
        ));
    }

    repo.delete(id).await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&acting, AuditAction::Delete, "admin")
                .resource_id(id)
                .details(serde_json::json!({"name": target.name})),
        )
        .await;

    Ok(ok(serde_json::json!({"deleted": true})))
}
