//! Platform user (profile) domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use techmeet_core::{AccountStatus, AuthUserId, Email, ProfileId};

/// A platform user's profile (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: ProfileId,
    pub auth_user_id: Option<AuthUserId>,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub career_years: Option<i32>,
    pub portfolio_url: Option<String>,
    pub avatar_url: Option<String>,
    pub account_status: AccountStatus,
    /// Opt-in for new-project notifications.
    pub notify_new_project: bool,
    /// Opt-in for application status-change notifications.
    pub notify_application_update: bool,
    /// Opt-in for marketing messages.
    pub notify_marketing: bool,
    /// Set when the account is withdrawn; cleared otherwise.
    pub withdrawn_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
