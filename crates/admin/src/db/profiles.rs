//! Platform user (profile) repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use techmeet_core::{AccountStatus, AuthUserId, Email, ProfileId};

use super::RepositoryError;
use crate::models::profile::Profile;

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: ProfileId,
    auth_user_id: Option<AuthUserId>,
    name: String,
    email: String,
    phone: Option<String>,
    bio: Option<String>,
    skills: Vec<String>,
    career_years: Option<i32>,
    portfolio_url: Option<String>,
    avatar_url: Option<String>,
    account_status: String,
    notify_new_project: bool,
    notify_application_update: bool,
    notify_marketing: bool,
    withdrawn_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = RepositoryError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let account_status = row.account_status.parse::<AccountStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid account status in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            auth_user_id: row.auth_user_id,
            name: row.name,
            email,
            phone: row.phone,
            bio: row.bio,
            skills: row.skills,
            career_years: row.career_years,
            portfolio_url: row.portfolio_url,
            avatar_url: row.avatar_url,
            account_status,
            notify_new_project: row.notify_new_project,
            notify_application_update: row.notify_application_update,
            notify_marketing: row.notify_marketing,
            withdrawn_at: row.withdrawn_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const PROFILE_COLUMNS: &str = "id, auth_user_id, name, email, phone, bio, skills, career_years, \
     portfolio_url, avatar_url, account_status, notify_new_project, \
     notify_application_update, notify_marketing, withdrawn_at, created_at, updated_at";

/// Changes applied by the profile update endpoint.
#[derive(Debug)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub skills: Vec<String>,
    pub career_years: Option<i32>,
    pub portfolio_url: Option<String>,
    pub avatar_url: Option<String>,
}

/// Repository for platform user profiles.
pub struct ProfileRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProfileRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all profiles, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<Profile>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a profile by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: ProfileId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Apply admin edits to a profile.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the profile doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProfileId,
        changes: &ProfileUpdate,
    ) -> Result<Profile, RepositoryError> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "UPDATE profiles
             SET name = $2, phone = $3, bio = $4, skills = $5, career_years = $6,
                 portfolio_url = $7, avatar_url = $8, updated_at = now()
             WHERE id = $1
             RETURNING {PROFILE_COLUMNS}"
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.phone)
        .bind(&changes.bio)
        .bind(&changes.skills)
        .bind(changes.career_years)
        .bind(&changes.portfolio_url)
        .bind(&changes.avatar_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Soft-withdraw an account: the row survives for audit and history, but
    /// the account is marked withdrawn.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the profile doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn withdraw(&self, id: ProfileId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET account_status = 'withdrawn', withdrawn_at = now(), updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// IDs of all active (non-withdrawn) profiles, for broadcast dispatches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_active_ids(&self) -> Result<Vec<ProfileId>, RepositoryError> {
        let ids = sqlx::query_scalar::<_, ProfileId>(
            "SELECT id FROM profiles WHERE account_status = 'active' ORDER BY created_at",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(ids)
    }
}
