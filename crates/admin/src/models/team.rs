//! Team domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use techmeet_core::{ProfileId, TeamId, TeamMemberId, TeamRole};

/// A freelancer team (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A team membership row.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMember {
    pub id: TeamMemberId,
    pub team_id: TeamId,
    pub profile_id: ProfileId,
    pub role: TeamRole,
    pub joined_at: DateTime<Utc>,
}

/// Membership joined with the member's profile for team detail views.
#[derive(Debug, Clone, Serialize)]
pub struct TeamMemberDetail {
    #[serde(flatten)]
    pub member: TeamMember,
    pub member_name: String,
    pub member_email: String,
}

/// A team plus its members, as returned by the detail endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TeamDetail {
    #[serde(flatten)]
    pub team: Team,
    pub members: Vec<TeamMemberDetail>,
}
