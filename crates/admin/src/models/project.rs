//! Project domain types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use techmeet_core::{ProjectId, ProjectStatus};

/// A client project open for freelancer matching (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
    pub budget_min: Option<i64>,
    pub budget_max: Option<i64>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub skills: Vec<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
