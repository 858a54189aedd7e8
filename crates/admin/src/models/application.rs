//! Project application domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use techmeet_core::{ApplicationId, ApplicationStatus, ProfileId, ProjectId};

/// A freelancer's application to a project (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Application {
    pub id: ApplicationId,
    pub project_id: ProjectId,
    pub profile_id: ProfileId,
    pub status: ApplicationStatus,
    pub cover_letter: Option<String>,
    pub expected_budget: Option<i64>,
    pub available_start_date: Option<NaiveDate>,
    /// Internal note, visible to admins only.
    pub admin_memo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application list row joined with project and applicant context.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationSummary {
    #[serde(flatten)]
    pub application: Application,
    pub project_title: String,
    pub applicant_name: String,
    pub applicant_email: String,
}
