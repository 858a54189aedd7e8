//! Team and membership repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use techmeet_core::{ProfileId, TeamId, TeamMemberId, TeamRole};

use super::RepositoryError;
use crate::models::team::{Team, TeamMember, TeamMemberDetail};

#[derive(Debug, sqlx::FromRow)]
struct TeamRow {
    id: TeamId,
    name: String,
    description: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<TeamRow> for Team {
    fn from(row: TeamRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TeamMemberRow {
    id: TeamMemberId,
    team_id: TeamId,
    profile_id: ProfileId,
    role: String,
    joined_at: DateTime<Utc>,
}

impl TryFrom<TeamMemberRow> for TeamMember {
    type Error = RepositoryError;

    fn try_from(row: TeamMemberRow) -> Result<Self, Self::Error> {
        let role = row.role.parse::<TeamRole>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid team role in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            team_id: row.team_id,
            profile_id: row.profile_id,
            role,
            joined_at: row.joined_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct TeamMemberDetailRow {
    #[sqlx(flatten)]
    member: TeamMemberRow,
    member_name: String,
    member_email: String,
}

impl TryFrom<TeamMemberDetailRow> for TeamMemberDetail {
    type Error = RepositoryError;

    fn try_from(row: TeamMemberDetailRow) -> Result<Self, Self::Error> {
        Ok(Self {
            member: row.member.try_into()?,
            member_name: row.member_name,
            member_email: row.member_email,
        })
    }
}

/// Repository for teams and memberships.
pub struct TeamRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TeamRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all teams, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Team>, RepositoryError> {
        let rows = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, description, created_at FROM teams ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a team by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: TeamId) -> Result<Option<Team>, RepositoryError> {
        let row = sqlx::query_as::<_, TeamRow>(
            "SELECT id, name, description, created_at FROM teams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a team.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, RepositoryError> {
        let row = sqlx::query_as::<_, TeamRow>(
            "INSERT INTO teams (id, name, description)
             VALUES (gen_random_uuid(), $1, $2)
             RETURNING id, name, description, created_at",
        )
        .bind(name)
        .bind(description)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Rename a team or change its description.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the team doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: TeamId,
        name: &str,
        description: Option<&str>,
    ) -> Result<Team, RepositoryError> {
        let row = sqlx::query_as::<_, TeamRow>(
            "UPDATE teams SET name = $2, description = $3
             WHERE id = $1
             RETURNING id, name, description, created_at",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete a team. Memberships cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the team doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: TeamId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM teams WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// List a team's members with their profile info, leaders first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_members(
        &self,
        team_id: TeamId,
    ) -> Result<Vec<TeamMemberDetail>, RepositoryError> {
        let rows = sqlx::query_as::<_, TeamMemberDetailRow>(
            "SELECT pt.id, pt.team_id, pt.profile_id, pt.role, pt.joined_at,
                    pr.name AS member_name, pr.email AS member_email
             FROM profile_teams pt
             JOIN profiles pr ON pr.id = pt.profile_id
             WHERE pt.team_id = $1
             ORDER BY pt.role DESC, pt.joined_at ASC",
        )
        .bind(team_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Add a profile to a team.
    ///
    /// Duplicate membership is detected by the unique constraint on
    /// `(team_id, profile_id)`, not by a prior read, so concurrent adds
    /// cannot race past the check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the profile is already a member.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add_member(
        &self,
        team_id: TeamId,
        profile_id: ProfileId,
        role: TeamRole,
    ) -> Result<TeamMember, RepositoryError> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            "INSERT INTO profile_teams (id, team_id, profile_id, role)
             VALUES (gen_random_uuid(), $1, $2, $3)
             RETURNING id, team_id, profile_id, role, joined_at",
        )
        .bind(team_id)
        .bind(profile_id)
        .bind(role.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            RepositoryError::conflict_on_unique(e, "profile is already a member of this team")
        })?;

        row.try_into()
    }

    /// Change a member's role within a team.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the membership doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_member_role(
        &self,
        team_id: TeamId,
        member_id: TeamMemberId,
        role: TeamRole,
    ) -> Result<TeamMember, RepositoryError> {
        let row = sqlx::query_as::<_, TeamMemberRow>(
            "UPDATE profile_teams SET role = $3
             WHERE id = $2 AND team_id = $1
             RETURNING id, team_id, profile_id, role, joined_at",
        )
        .bind(team_id)
        .bind(member_id)
        .bind(role.as_str())
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Remove a member from a team.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the membership doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn remove_member(
        &self,
        team_id: TeamId,
        member_id: TeamMemberId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM profile_teams WHERE id = $2 AND team_id = $1")
            .bind(team_id)
            .bind(member_id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
