//! Admin account domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use techmeet_core::{AdminUserId, AuthUserId, Email};

// Re-export AdminRole from core for convenience
pub use techmeet_core::AdminRole;

/// An administrator account (domain type).
#[derive(Debug, Clone, Serialize)]
pub struct AdminUser {
    /// Unique admin record ID.
    pub id: AdminUserId,
    /// The login principal this admin record is bound to.
    pub auth_user_id: AuthUserId,
    /// Admin's display name.
    pub name: String,
    /// Admin's email address.
    pub email: Email,
    /// Admin's role/permission level.
    pub role: AdminRole,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
}

/// The authenticated admin acting on the current request.
///
/// Resolved fresh from the database on every request, so role changes and
/// revocations take effect immediately.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentAdmin {
    pub id: AdminUserId,
    pub auth_user_id: AuthUserId,
    pub name: String,
    pub email: Email,
    pub role: AdminRole,
}

impl CurrentAdmin {
    #[must_use]
    pub const fn is_super_admin(&self) -> bool {
        matches!(self.role, AdminRole::SuperAdmin)
    }
}

impl From<AdminUser> for CurrentAdmin {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            auth_user_id: admin.auth_user_id,
            name: admin.name,
            email: admin.email,
            role: admin.role,
        }
    }
}
