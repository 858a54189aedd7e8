//! Administrator record repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use techmeet_core::{AdminRole, AdminUserId, AuthUserId, Email};

use super::RepositoryError;
use crate::models::admin_user::AdminUser;

#[derive(Debug, sqlx::FromRow)]
struct AdminUserRow {
    id: AdminUserId,
    auth_user_id: AuthUserId,
    name: String,
    email: String,
    role: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AdminUserRow> for AdminUser {
    type Error = RepositoryError;

    fn try_from(row: AdminUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role = row.role.parse::<AdminRole>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid admin role in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            auth_user_id: row.auth_user_id,
            name: row.name,
            email,
            role,
            created_at: row.created_at,
        })
    }
}

const ADMIN_COLUMNS: &str = "id, auth_user_id, name, email, role, created_at";

/// Repository for administrator records.
pub struct AdminUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AdminUserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all administrators, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn list_all(&self) -> Result<Vec<AdminUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, AdminUserRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_users ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get an administrator record by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_id(&self, id: AdminUserId) -> Result<Option<AdminUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Get the administrator record bound to a login principal, if any.
    ///
    /// This is the per-request capability check: no row means the principal
    /// is not an administrator.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_auth_user_id(
        &self,
        auth_user_id: AuthUserId,
    ) -> Result<Option<AdminUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!(
            "SELECT {ADMIN_COLUMNS} FROM admin_users WHERE auth_user_id = $1"
        ))
        .bind(auth_user_id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create an administrator record inside an existing transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_in_tx(
        tx: &mut sqlx::PgTransaction<'_>,
        auth_user_id: AuthUserId,
        name: &str,
        email: &Email,
        role: AdminRole,
    ) -> Result<AdminUser, RepositoryError> {
        let row = sqlx::query_as::<_, AdminUserRow>(&format!(
            "INSERT INTO admin_users (id, auth_user_id, name, email, role)
             VALUES (gen_random_uuid(), $1, $2, $3, $4)
             RETURNING {ADMIN_COLUMNS}"
        ))
        .bind(auth_user_id)
        .bind(name)
        .bind(email.as_str())
        .bind(role.as_str())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "admin email already exists"))?;

        row.try_into()
    }

    /// Delete an administrator and their login principal.
    ///
    /// Deleting the principal cascades to the admin record, so the former
    /// admin can no longer log in at all.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the admin doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AdminUserId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM auth_users
            WHERE id = (SELECT auth_user_id FROM admin_users WHERE id = $1)
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

    /// Count administrators holding a given role.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count_by_role(&self, role: AdminRole) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM admin_users WHERE role = $1")
            .bind(role.as_str())
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }
}
