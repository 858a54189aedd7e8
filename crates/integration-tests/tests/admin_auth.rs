//! End-to-end tests for login, logout, and the access guard.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The admin server running (cargo run -p techmeet-admin)
//!
//! Run with: cargo test -p techmeet-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use techmeet_core::AdminRole;
use techmeet_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_api_without_session_is_401() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(format!("{}/api/users", ctx.base_url))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_login_with_wrong_password_is_401() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;

    let resp = ctx
        .client
        .post(format!("{}/api/auth/login", ctx.base_url))
        .json(&serde_json::json!({"email": email, "password": "wrong-password"}))
        .send()
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_non_admin_principal_cannot_login() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_principal("valid-password-123").await;

    // Correct credentials, but no admin record: rejected without revealing
    // which check failed, and no session is established.
    let resp = ctx
        .client
        .post(format!("{}/api/auth/login", ctx.base_url))
        .json(&serde_json::json!({"email": email, "password": "valid-password-123"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = ctx
        .client
        .get(format!("{}/api/users", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_login_then_logout_round_trip() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;

    ctx.login(&email, "correct-password-123").await;

    // Authenticated now
    let resp = ctx
        .client
        .get(format!("{}/api/users", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], true);
    assert!(body["data"].is_array());

    // Logout kills the session
    let resp = ctx
        .client
        .post(format!("{}/api/auth/logout", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(format!("{}/api/users", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_deleting_admin_record_revokes_access_mid_session() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;

    ctx.login(&email, "correct-password-123").await;

    // Pull the admin record out from under the live session.
    sqlx::query("DELETE FROM admin_users WHERE email = $1")
        .bind(&email)
        .execute(&ctx.pool)
        .await
        .expect("delete admin record");

    // Capability is re-read per request: the very next call is rejected.
    let resp = ctx
        .client
        .get(format!("{}/api/users", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    ctx.cleanup_account(&email).await;
}
