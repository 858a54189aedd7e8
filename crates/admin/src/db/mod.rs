//! Database operations for the admin `PostgreSQL` schema.
//!
//! ## Tables
//!
//! - `auth_users` - Login principals (email + argon2 password hash)
//! - `admin_users` - Administrator records bound to principals
//! - `profiles` - Platform users (freelancers)
//! - `projects` - Client projects
//! - `applications` - Project applications
//! - `notices` - Site announcements
//! - `teams` / `profile_teams` - Teams and memberships
//! - `alimtalk_logs` - Notification dispatch log
//! - `admin_audit_logs` - Append-only admin action trail
//! - `session` - tower-sessions storage
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p techmeet-cli -- migrate
//! ```

pub mod admin_users;
pub mod alimtalk;
pub mod applications;
pub mod audit_logs;
pub mod auth_users;
pub mod notices;
pub mod profiles;
pub mod projects;
pub mod teams;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use alimtalk::AlimtalkLogRepository;
pub use applications::ApplicationRepository;
pub use audit_logs::AuditLogRepository;
pub use auth_users::AuthUserRepository;
pub use notices::NoticeRepository;
pub use profiles::ProfileRepository;
pub use projects::ProjectRepository;
pub use teams::TeamRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email, duplicate membership).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Maps a unique-violation database error to `Conflict`, anything else to
    /// `Database`.
    pub(crate) fn conflict_on_unique(err: sqlx::Error, message: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message.to_owned());
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
