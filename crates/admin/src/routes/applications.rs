//! Application review.

use axum::extract::{Path, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use techmeet_core::{ApplicationId, ApplicationStatus, AuditAction};

use crate::db::{ApplicationRepository, applications::ApplicationUpdate};
use crate::error::AppError;
use crate::extract::ValidJson;
use crate::middleware::RequireAdmin;
use crate::models::audit::AuditEntry;
use crate::response::ok;
use crate::services::AuditRecorder;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ReviewRequest {
    pub status: ApplicationStatus,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub admin_memo: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkStatusRequest {
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub ids: Vec<ApplicationId>,
    pub status: ApplicationStatus,
}

/// `GET /api/applications`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let applications = ApplicationRepository::new(state.pool()).list_all().await?;
    Ok(ok(applications))
}

/// `GET /api/applications/{id}`
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
) -> Result<Response, AppError> {
    let application = ApplicationRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("application not found".to_owned()))?;
    Ok(ok(application))
}

/// `PUT /api/applications/{id}`
#[instrument(skip(admin, state))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ApplicationId>,
    ValidJson(body): ValidJson<ReviewRequest>,
) -> Result<Response, AppError> {
    let changes = ApplicationUpdate {
        status: body.status,
        admin_memo: body.admin_memo,
    };
    let application = ApplicationRepository::new(state.pool())
        .update(id, &changes)
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Update, "application")
                .resource_id(id)
                .details(serde_json::json!({"status": application.status})),
        )
        .await;

    Ok(ok(application))
}

/// `PATCH /api/applications/bulk`
#[instrument(skip(admin, state))]
pub async fn bulk_update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BulkStatusRequest>,
) -> Result<Response, AppError> {
    ApplicationRepository::new(state.pool())
        .bulk_update_status(&body.ids, body.status)
        .await?;

    let ids = body
        .ids
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::BulkUpdate, "application")
                .resource_id(ids)
                .details(serde_json::json!({
                    "status": body.status,
                    "count": body.ids.len(),
                })),
        )
        .await;

    Ok(ok(serde_json::json!({"updated": body.ids.len()})))
}
