//! Team and membership management.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use techmeet_core::{AuditAction, ProfileId, TeamId, TeamMemberId, TeamRole};

use crate::db::TeamRepository;
use crate::error::AppError;
use crate::extract::ValidJson;
use crate::middleware::RequireAdmin;
use crate::models::audit::AuditEntry;
use crate::models::team::TeamDetail;
use crate::response::{created, ok};
use crate::services::AuditRecorder;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct TeamRequest {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddMemberRequest {
    pub profile_id: ProfileId,
    pub role: TeamRole,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    pub member_id: TeamMemberId,
    pub role: TeamRole,
}

#[derive(Debug, Deserialize)]
pub struct RemoveMemberQuery {
    pub member_id: TeamMemberId,
}

/// `GET /api/teams`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let teams = TeamRepository::new(state.pool()).list_all().await?;
    Ok(ok(teams))
}

/// `POST /api/teams`
#[instrument(skip(admin, state))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<TeamRequest>,
) -> Result<Response, AppError> {
    let team = TeamRepository::new(state.pool())
        .create(&body.name, body.description.as_deref())
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Create, "team")
                .resource_id(team.id)
                .details(serde_json::json!({"name": team.name})),
        )
        .await;

    Ok(created(team))
}

/// `GET /api/teams/{id}` - team plus members.
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<Response, AppError> {
    let repo = TeamRepository::new(state.pool());
    let team = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("team not found".to_owned()))?;
    let members = repo.list_members(id).await?;

    Ok(ok(TeamDetail { team, members }))
}

/// `PUT /api/teams/{id}`
#[instrument(skip(admin, state))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    ValidJson(body): ValidJson<TeamRequest>,
) -> Result<Response, AppError> {
    let team = TeamRepository::new(state.pool())
        .update(id, &body.name, body.description.as_deref())
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Update, "team")
                .resource_id(id)
                .details(serde_json::json!({"name": team.name})),
        )
        .await;

    Ok(ok(team))
}

/// `DELETE /api/teams/{id}`
#[instrument(skip(admin, state))]
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
) -> Result<Response, AppError> {
    TeamRepository::new(state.pool()).delete(id).await?;

    AuditRecorder::new(state.pool())
        .record(AuditEntry::new(&admin, AuditAction::Delete, "team").resource_id(id))
        .await;

    Ok(ok(serde_json::json!({"deleted": true})))
}

/// `POST /api/teams/{id}/members`
///
/// A duplicate membership surfaces as 409 from the unique constraint.
#[instrument(skip(admin, state))]
pub async fn add_member(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    ValidJson(body): ValidJson<AddMemberRequest>,
) -> Result<Response, AppError> {
    let member = TeamRepository::new(state.pool())
        .add_member(id, body.profile_id, body.role)
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Create, "team_member")
                .resource_id(member.id)
                .details(serde_json::json!({
                    "team_id": id,
                    "profile_id": body.profile_id,
                    "role": body.role,
                })),
        )
        .await;

    Ok(created(member))
}

/// `PATCH /api/teams/{id}/members`
#[instrument(skip(admin, state))]
pub async fn update_member_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    ValidJson(body): ValidJson<UpdateMemberRequest>,
) -> Result<Response, AppError> {
    let member = TeamRepository::new(state.pool())
        .update_member_role(id, body.member_id, body.role)
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Update, "team_member")
                .resource_id(body.member_id)
                .details(serde_json::json!({"team_id": id, "role": body.role})),
        )
        .await;

    Ok(ok(member))
}

/// `DELETE /api/teams/{id}/members?member_id=...`
#[instrument(skip(admin, state))]
pub async fn remove_member(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<TeamId>,
    Query(query): Query<RemoveMemberQuery>,
) -> Result<Response, AppError> {
    TeamRepository::new(state.pool())
        .remove_member(id, query.member_id)
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Delete, "team_member")
                .resource_id(query.member_id)
                .details(serde_json::json!({"team_id": id})),
        )
        .await;

    Ok(ok(serde_json::json!({"removed": true})))
}
