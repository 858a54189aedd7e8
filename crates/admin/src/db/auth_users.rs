//! Login principal repository.
//!
//! `auth_users` stores only what login needs: the email and the argon2
//! password hash. Administrator capability lives in `admin_users`.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use techmeet_core::{AuthUserId, Email};

use super::RepositoryError;

/// A login principal with its password hash. Never serialized.
#[derive(Debug)]
pub struct AuthUser {
    pub id: AuthUserId,
    pub email: Email,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct AuthUserRow {
    id: AuthUserId,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AuthUserRow> for AuthUser {
    type Error = RepositoryError;

    fn try_from(row: AuthUserRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            email,
            password_hash: row.password_hash,
            created_at: row.created_at,
        })
    }
}

/// Repository for login principals.
pub struct AuthUserRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthUserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a principal by email for login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<AuthUser>, RepositoryError> {
        let row = sqlx::query_as::<_, AuthUserRow>(
            r"
            SELECT id, email, password_hash, created_at
            FROM auth_users
            WHERE email = $1
            ",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Create a principal inside an existing transaction.
    ///
    /// Used by admin provisioning so the principal and the admin record
    /// commit or roll back together.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_in_tx(
        tx: &mut sqlx::PgTransaction<'_>,
        email: &Email,
        password_hash: &str,
    ) -> Result<AuthUserId, RepositoryError> {
        let id: AuthUserId = sqlx::query_scalar(
            r"
            INSERT INTO auth_users (id, email, password_hash)
            VALUES (gen_random_uuid(), $1, $2)
            RETURNING id
            ",
        )
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| RepositoryError::conflict_on_unique(e, "email already exists"))?;

        Ok(id)
    }
}
