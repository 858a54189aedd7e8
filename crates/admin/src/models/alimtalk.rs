//! Alimtalk (KakaoTalk notification) dispatch-log domain types.
//!
//! These rows record dispatch intent and outcome; actual delivery happens
//! out-of-band.

use chrono::{DateTime, Utc};
use serde::Serialize;

use techmeet_core::{AlimtalkLogId, ProfileId, SendType, ServiceType};

/// One notification dispatch-log row (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct AlimtalkLog {
    pub id: AlimtalkLogId,
    /// Recipient profile; `None` for broadcast rows whose profile was removed.
    pub user_id: Option<ProfileId>,
    pub template_code: String,
    pub template_name: Option<String>,
    pub service_type: ServiceType,
    /// Provider-side message identifier, when known.
    pub message_id: Option<String>,
    pub send_type: SendType,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub is_success: bool,
    pub sent_at: Option<DateTime<Utc>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Dispatch log joined with recipient info for the admin list view.
#[derive(Debug, Clone, Serialize)]
pub struct AlimtalkLogDetail {
    #[serde(flatten)]
    pub log: AlimtalkLog,
    pub recipient_name: Option<String>,
    pub recipient_phone: Option<String>,
}
