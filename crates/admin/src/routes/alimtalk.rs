//! Notification dispatch log and send endpoint.

use axum::extract::State;
use axum::response::Response;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::instrument;
use validator::Validate;

use techmeet_core::{AuditAction, ProfileId, SendType, ServiceType};

use crate::db::{AlimtalkLogRepository, ProfileRepository, alimtalk::NewAlimtalkLog};
use crate::error::{AppError, FieldErrors};
use crate::extract::ValidJson;
use crate::middleware::RequireAdmin;
use crate::models::audit::AuditEntry;
use crate::response::ok;
use crate::services::AuditRecorder;
use crate::state::AppState;

/// Rows returned by the list endpoint.
const LIST_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchTarget {
    All,
    Individual,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendRequest {
    #[validate(length(min = 1, max = 50, message = "must be between 1 and 50 characters"))]
    pub template_code: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub template_name: Option<String>,
    pub service_type: ServiceType,
    pub target: DispatchTarget,
    pub user_id: Option<ProfileId>,
    pub send_type: SendType,
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl SendRequest {
    // Cross-field rules validator derive can't express.
    fn check_cross_fields(&self) -> Result<(), AppError> {
        let mut details = FieldErrors::new();
        if self.target == DispatchTarget::Individual && self.user_id.is_none() {
            details.insert(
                "user_id".to_owned(),
                vec!["required when target is individual".to_owned()],
            );
        }
        if self.send_type == SendType::Scheduled && self.scheduled_at.is_none() {
            details.insert(
                "scheduled_at".to_owned(),
                vec!["required when send_type is scheduled".to_owned()],
            );
        }
        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(details))
        }
    }
}

/// `GET /api/alimtalk`
#[instrument(skip(_admin, state))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let logs = AlimtalkLogRepository::new(state.pool())
        .list_recent(LIST_LIMIT)
        .await?;
    Ok(ok(logs))
}

/// `POST /api/alimtalk/send`
///
/// Records dispatch intent: one row for an individual send, one row per
/// active profile for a broadcast.
#[instrument(skip(admin, state))]
pub async fn send(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    ValidJson(body): ValidJson<SendRequest>,
) -> Result<Response, AppError> {
    body.check_cross_fields()?;

    let repo = AlimtalkLogRepository::new(state.pool());
    let log = NewAlimtalkLog {
        user_id: body.user_id,
        template_code: body.template_code.clone(),
        template_name: body.template_name.clone(),
        service_type: body.service_type,
        send_type: body.send_type,
        scheduled_at: body.scheduled_at,
    };

    let recipient_count = match body.target {
        DispatchTarget::Individual => {
            repo.record(&log).await?;
            1
        }
        DispatchTarget::All => {
            let recipients = ProfileRepository::new(state.pool()).list_active_ids().await?;
            repo.record_batch(&recipients, &log).await?;
            recipients.len() as u64
        }
    };

    AuditRecorder::new(state.pool())
        .record(
            AuditEntry::new(&admin, AuditAction::Create, "alimtalk")
                .details(serde_json::json!({
                    "template_code": body.template_code,
                    "recipients": recipient_count,
                })),
        )
        .await;

    Ok(ok(serde_json::json!({"sent": true})))
}
