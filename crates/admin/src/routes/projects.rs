//! Project management, including bulk actions.

use axum::extract::{Path, State};
use axum::response::Response;
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use techmeet_core::{AuditAction, ProjectId, ProjectStatus};

use crate::db::{ProjectRepository, projects::ProjectInput};
use crate::error::AppError;
use crate::extract::ValidJson;
use crate::middleware::RequireAdmin;
use crate::models::audit::AuditEntry;
use crate::response::{created, ok};
use crate::services::AuditRecorder;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ProjectRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub category: Option<String>,
}

impl From<ProjectRequest> for ProjectInput {
    fn from(body: ProjectRequest) -> Self {
        Self {
            title: body.title,
            description: body.description,
            status: body.status,
            budget_min: body.budget_min,
            budget_max: body.budget_max,
            start_date: body.start_date,
            end_date: body.end_date,
            skills: body.skills,
            category: body.category,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkStatusRequest {
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub ids: Vec<ProjectId>,
    pub status: ProjectStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub ids: Vec<ProjectId>,
}

fn joined_ids(ids: &[ProjectId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// `GET /api/projects`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let projects = ProjectRepository::new(state.pool()).list_all().await?;
    Ok(ok(projects))
}

/// `POST /api/projects`
#[instrument(skip(admin, state))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<ProjectRequest>,
) -> Result<Response, AppError> {
    let project = ProjectRepository::new(state.pool())
        .create(&body.into())
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Create, "project")
                .resource_id(project.id)
                .details(serde_json::json!({"title": project.title})),
        )
        .await;

    Ok(created(project))
}

/// `GET /api/projects/{id}`
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<Response, AppError> {
    let project = ProjectRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("project not found".to_owned()))?;
    Ok(ok(project))
}

/// `PUT /api/projects/{id}`
#[instrument(skip(admin, state))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
    ValidJson(body): ValidJson<ProjectRequest>,
) -> Result<Response, AppError> {
    let project = ProjectRepository::new(state.pool())
        .update(id, &body.into())
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Update, "project")
                .resource_id(id)
                .details(serde_json::json!({
                    "title": project.title,
                    "status": project.status,
                })),
        )
        .await;

    Ok(ok(project))
}

/// `DELETE /api/projects/{id}`
#[instrument(skip(admin, state))]
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<ProjectId>,
) -> Result<Response, AppError> {
    ProjectRepository::new(state.pool()).delete(id).await?;

    AuditRecorder::new(state.pool())
        .record(AuditEntry::new(&admin, AuditAction::Delete, "project").resource_id(id))
        .await;

    Ok(ok(serde_json::json!({"deleted": true})))
}

/// `PATCH /api/projects/bulk`
///
/// One statement updates every listed project; the reported count is the
/// number of requested IDs.
#[instrument(skip(admin, state))]
pub async fn bulk_update_status(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BulkStatusRequest>,
) -> Result<Response, AppError> {
    ProjectRepository::new(state.pool())
        .bulk_update_status(&body.ids, body.status)
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::BulkUpdate, "project")
                .resource_id(joined_ids(&body.ids))
                .details(serde_json::json!({
                    "status": body.status,
                    "count": body.ids.len(),
                })),
        )
        .await;

    Ok(ok(serde_json::json!({"updated": body.ids.len()})))
}

/// `DELETE /api/projects/bulk`
#[instrument(skip(admin, state))]
pub async fn bulk_delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<BulkDeleteRequest>,
) -> Result<Response, AppError> {
    ProjectRepository::new(state.pool())
        .bulk_delete(&body.ids)
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::BulkDelete, "project")
                .resource_id(joined_ids(&body.ids))
                .details(serde_json::json!({"count": body.ids.len()})),
        )
        .await;

    Ok(ok(serde_json::json!({"deleted": body.ids.len()})))
}
