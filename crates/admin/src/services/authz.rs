//! Access resolution: session to principal to administrator.
//!
//! Both the API extractors and the page gate resolve access through this one
//! service, so the two surfaces can never disagree about who is an admin.
//! The admin record is re-read from the database on every request; a demoted
//! or deleted admin loses access on their next request.

use sqlx::PgPool;
use tower_sessions::Session;

use techmeet_core::AuthUserId;

use crate::db::AdminUserRepository;
use crate::error::AppError;
use crate::models::admin_user::CurrentAdmin;

/// Session key holding the logged-in principal's ID.
pub const SESSION_PRINCIPAL_KEY: &str = "auth_user_id";

/// Where a request stands with respect to the admin panel.
#[derive(Debug)]
pub enum AccessState {
    /// No logged-in principal.
    Unauthenticated,
    /// Logged in, but not a provisioned administrator.
    NonAdmin,
    /// A provisioned administrator.
    Admin(CurrentAdmin),
}

/// Resolves admin access for a request.
pub struct AuthzService<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthzService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// The logged-in principal's ID, if any.
    ///
    /// Session-store read failures are treated as "no principal" and logged;
    /// the caller then takes the unauthenticated path.
    pub async fn current_principal(session: &Session) -> Option<AuthUserId> {
        match session.get::<AuthUserId>(SESSION_PRINCIPAL_KEY).await {
            Ok(principal) => principal,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read session, treating as unauthenticated");
                None
            }
        }
    }

    /// Classify the request into one of the three access states.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the admin lookup fails.
    pub async fn access_state(&self, session: &Session) -> Result<AccessState, AppError> {
        let Some(principal) = Self::current_principal(session).await else {
            return Ok(AccessState::Unauthenticated);
        };

        let admin = AdminUserRepository::new(self.pool)
            .get_by_auth_user_id(principal)
            .await?;

        Ok(admin.map_or(AccessState::NonAdmin, |a| AccessState::Admin(a.into())))
    }

    /// Require an administrator, or fail with 401/403.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthenticated` when no principal is logged in,
    /// `AppError::Forbidden` when the principal is not an administrator, and
    /// `AppError::Database` if the lookup fails.
    pub async fn require_admin(&self, session: &Session) -> Result<CurrentAdmin, AppError> {
        match self.access_state(session).await? {
            AccessState::Unauthenticated => Err(AppError::Unauthenticated(
                "Authentication required".to_owned(),
            )),
            AccessState::NonAdmin => Err(AppError::Forbidden(
                "Administrator access required".to_owned(),
            )),
            AccessState::Admin(admin) => Ok(admin),
        }
    }

    /// Require a super administrator, or fail with 401/403.
    ///
    /// Authentication failures propagate unchanged from [`Self::require_admin`];
    /// an ordinary admin gets a distinct 403.
    ///
    /// # Errors
    ///
    /// See [`Self::require_admin`], plus `AppError::Forbidden` for non-super
    /// admins.
    pub async fn require_super_admin(&self, session: &Session) -> Result<CurrentAdmin, AppError> {
        let admin = self.require_admin(session).await?;
        if !admin.is_super_admin() {
            return Err(AppError::Forbidden(
                "Super administrator access required".to_owned(),
            ));
        }
        Ok(admin)
    }
}
