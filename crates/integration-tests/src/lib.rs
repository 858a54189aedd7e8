//! End-to-end test harness for the TechMeet admin service.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p techmeet-cli -- migrate
//!
//! # Start the admin server
//! cargo run -p techmeet-admin
//!
//! # Run the ignored end-to-end tests
//! cargo test -p techmeet-integration-tests -- --ignored
//! ```
//!
//! Tests talk to a running server over HTTP and seed fixtures straight into
//! the database, so they are `#[ignore]`d by default.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use reqwest::Client;
use sqlx::PgPool;
use uuid::Uuid;

use techmeet_admin::services::auth::hash_password;
use techmeet_core::AdminRole;

/// Base URL for the admin API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

fn database_url() -> String {
    std::env::var("ADMIN_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("ADMIN_DATABASE_URL must be set for integration tests")
}

/// Shared context: an HTTP client with a cookie store plus direct database
/// access for seeding fixtures.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: PgPool,
}

impl TestContext {
    /// Connect to the test database and build a cookie-carrying client.
    pub async fn new() -> Self {
        let pool = PgPool::connect(&database_url())
            .await
            .expect("Failed to connect to test database");
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url(),
            pool,
        }
    }

    /// Seed a login principal without an admin record. Returns its email.
    pub async fn seed_principal(&self, password: &str) -> String {
        let email = format!("principal-{}@test.techmeet.kr", Uuid::new_v4());
        let hash = hash_password(password).expect("hash");
        sqlx::query(
            "INSERT INTO auth_users (id, email, password_hash) VALUES (gen_random_uuid(), $1, $2)",
        )
        .bind(&email)
        .bind(&hash)
        .execute(&self.pool)
        .await
        .expect("Failed to seed principal");
        email
    }

    /// Seed a full admin account. Returns its email.
    pub async fn seed_admin(&self, role: AdminRole, password: &str) -> String {
        let email = format!("admin-{}@test.techmeet.kr", Uuid::new_v4());
        let hash = hash_password(password).expect("hash");
        sqlx::query(
            "WITH principal AS (
                 INSERT INTO auth_users (id, email, password_hash)
                 VALUES (gen_random_uuid(), $1, $2)
                 RETURNING id
             )
             INSERT INTO admin_users (id, auth_user_id, name, email, role)
             SELECT gen_random_uuid(), id, 'Test Admin', $1, $3 FROM principal",
        )
        .bind(&email)
        .bind(&hash)
        .bind(role.as_str())
        .execute(&self.pool)
        .await
        .expect("Failed to seed admin");
        email
    }

    /// Log the client's cookie session in as the given account.
    pub async fn login(&self, email: &str, password: &str) {
        let resp = self
            .client
            .post(format!("{}/api/auth/login", self.base_url))
            .json(&serde_json::json!({"email": email, "password": password}))
            .send()
            .await
            .expect("Login request failed");
        assert!(
            resp.status().is_success(),
            "login failed with {}",
            resp.status()
        );
    }

    /// Remove a seeded account by email (principal cascades to admin record).
    pub async fn cleanup_account(&self, email: &str) {
        let _ = sqlx::query("DELETE FROM auth_users WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await;
    }
}
