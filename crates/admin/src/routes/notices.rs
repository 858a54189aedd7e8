//! Notice management.

use axum::extract::{Path, State};
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use techmeet_core::{AuditAction, NoticeId, NoticeType};

use crate::db::{NoticeRepository, notices::NoticeInput};
use crate::error::AppError;
use crate::extract::ValidJson;
use crate::middleware::RequireAdmin;
use crate::models::audit::AuditEntry;
use crate::response::{created, ok};
use crate::services::AuditRecorder;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct NoticeRequest {
    #[validate(length(min = 1, max = 200, message = "must be between 1 and 200 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub content: String,
    #[serde(default)]
    pub is_published: bool,
    pub notice_type: NoticeType,
    pub start_at: Option<DateTime<Utc>>,
    pub end_at: Option<DateTime<Utc>>,
}

impl From<NoticeRequest> for NoticeInput {
    fn from(body: NoticeRequest) -> Self {
        Self {
            title: body.title,
            content: body.content,
            is_published: body.is_published,
            notice_type: body.notice_type,
            start_at: body.start_at,
            end_at: body.end_at,
        }
    }
}

/// `GET /api/notices`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let notices = NoticeRepository::new(state.pool()).list_all().await?;
    Ok(ok(notices))
}

/// `POST /api/notices`
#[instrument(skip(admin, state))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<NoticeRequest>,
) -> Result<Response, AppError> {
    let notice = NoticeRepository::new(state.pool())
        .create(&body.into())
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Create, "notice")
                .resource_id(notice.id)
                .details(serde_json::json!({"title": notice.title})),
        )
        .await;

    Ok(created(notice))
}

/// `GET /api/notices/{id}`
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<NoticeId>,
) -> Result<Response, AppError> {
    let notice = NoticeRepository::new(state.pool())
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("notice not found".to_owned()))?;
    Ok(ok(notice))
}

/// `PUT /api/notices/{id}`
#[instrument(skip(admin, state))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<NoticeId>,
    ValidJson(body): ValidJson<NoticeRequest>,
) -> Result<Response, AppError> {
    let notice = NoticeRepository::new(state.pool())
        .update(id, &body.into())
        .await?;

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Update, "notice")
                .resource_id(id)
                .details(serde_json::json!({
                    "title": notice.title,
                    "is_published": notice.is_published,
                })),
        )
        .await;

    Ok(ok(notice))
}

/// `DELETE /api/notices/{id}`
#[instrument(skip(admin, state))]
pub async fn remove(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<NoticeId>,
) -> Result<Response, AppError> {
    NoticeRepository::new(state.pool()).delete(id).await?;

    AuditRecorder::new(state.pool())
        .record(AuditEntry::new(&admin, AuditAction::Delete, "notice").resource_id(id))
        .await;

    Ok(ok(serde_json::json!({"deleted": true})))
}
