//! Admin account provisioning.
//!
//! Admin accounts are only ever created out-of-band, here or through the
//! super-admin API; there is no self-registration.

use secrecy::SecretString;

use techmeet_admin::db::{self, AdminUserRepository, AuthUserRepository};
use techmeet_admin::services::auth::hash_password;
use techmeet_core::{AdminRole, Email};

#[derive(Debug, thiserror::Error)]
pub enum ProvisionError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] techmeet_core::EmailError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] techmeet_core::InvalidStatus),

    #[error("Password must be at least 8 characters")]
    WeakPassword,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Repository(#[from] techmeet_admin::db::RepositoryError),

    #[error("{0}")]
    Hashing(#[from] techmeet_admin::error::AppError),
}

/// Create an admin account: login principal and admin record, one
/// transaction.
///
/// # Errors
///
/// Returns `ProvisionError` if the input is invalid or the database rejects
/// the insert (for example, a duplicate email).
pub async fn create(
    email: &str,
    name: &str,
    role: &str,
    password: &str,
) -> Result<(), ProvisionError> {
    dotenvy::dotenv().ok();

    let email = Email::parse(email)?;
    let role: AdminRole = role.parse()?;
    if password.len() < 8 {
        return Err(ProvisionError::WeakPassword);
    }

    let database_url = std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map_err(|_| ProvisionError::MissingEnvVar("ADMIN_DATABASE_URL"))?;

    let pool = db::create_pool(&SecretString::from(database_url)).await?;
    let password_hash = hash_password(password)?;

    let mut tx = pool.begin().await?;
    let auth_user_id = AuthUserRepository::create_in_tx(&mut tx, &email, &password_hash).await?;
    let admin =
        AdminUserRepository::create_in_tx(&mut tx, auth_user_id, name, &email, role).await?;
    tx.commit().await?;

    tracing::info!(
        admin_id = %admin.id,
        email = %admin.email,
        role = %admin.role,
        "Admin account created"
    );
    Ok(())
}
