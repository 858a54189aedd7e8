//! Notice (announcement) domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use techmeet_core::{NoticeId, NoticeType};

/// A site announcement (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub id: NoticeId,
    pub title: String,
    pub content: String,
    pub is_published: bool,
    pub notice_type: NoticeType,
    /// Display window start; `None` means immediately visible once published.
    pub start_at: Option<DateTime<Utc>>,
    /// Display window end; `None` means no end.
    pub end_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
