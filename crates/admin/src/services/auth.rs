//! Password authentication.

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use techmeet_core::Email;

use crate::db::{AdminUserRepository, AuthUserRepository};
use crate::error::AppError;
use crate::models::admin_user::CurrentAdmin;

/// Hash a password with argon2id and a fresh random salt.
///
/// # Errors
///
/// Returns `AppError::Internal` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::error!("Stored password hash is not parseable");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Login service.
pub struct AuthService<'a> {
    pool: &'a PgPool,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Authenticate an administrator by email and password.
    ///
    /// A correct credential whose principal has no administrator record is
    /// rejected the same way as a bad credential, so the response never
    /// reveals whether the email exists.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Unauthenticated` on any credential or capability
    /// failure, `AppError::Database` if a lookup fails.
    pub async fn login(&self, email: &Email, password: &str) -> Result<CurrentAdmin, AppError> {
        let rejected = || AppError::Unauthenticated("Invalid email or password".to_owned());

        let Some(auth_user) = AuthUserRepository::new(self.pool).get_by_email(email).await? else {
            return Err(rejected());
        };

        if !verify_password(password, &auth_user.password_hash) {
            return Err(rejected());
        }

        let Some(admin) = AdminUserRepository::new(self.pool)
            .get_by_auth_user_id(auth_user.id)
            .await?
        else {
            tracing::warn!(principal = %auth_user.id, "Login by non-admin principal rejected");
            return Err(rejected());
        };

        Ok(admin.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(verify_password("correct horse battery staple", &hash));
        assert!(!verify_password("wrong password", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unparseable_hash_never_verifies() {
        assert!(!verify_password("anything", "not-a-phc-string"));
    }
}
