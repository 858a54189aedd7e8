//! End-to-end tests for super-admin gating on admin account management.
//!
//! Run with: cargo test -p techmeet-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use techmeet_core::AdminRole;
use techmeet_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_ordinary_admin_cannot_manage_admins() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let resp = ctx
        .client
        .get(format!("{}/api/admins", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"]["code"], "FORBIDDEN");

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_super_admin_creates_and_deletes_admin() {
    let ctx = TestContext::new().await;
    let email = ctx
        .seed_admin(AdminRole::SuperAdmin, "correct-password-123")
        .await;
    ctx.login(&email, "correct-password-123").await;

    let new_email = format!("created-{}@test.techmeet.kr", uuid::Uuid::new_v4());
    let resp = ctx
        .client
        .post(format!("{}/api/admins", ctx.base_url))
        .json(&serde_json::json!({
            "name": "Created Admin",
            "email": new_email,
            "password": "a-strong-password",
            "role": "admin",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("json body");
    let created_id = body["data"]["id"].as_str().expect("created id").to_owned();

    // The new admin can actually log in.
    let other = TestContext::new().await;
    other.login(&new_email, "a-strong-password").await;

    let resp = ctx
        .client
        .delete(format!("{}/api/admins/{created_id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    // Deletion removed the principal too: the login is gone.
    let resp = other
        .client
        .post(format!("{}/api/auth/login", other.base_url))
        .json(&serde_json::json!({"email": new_email, "password": "a-strong-password"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_super_admin_cannot_delete_self() {
    let ctx = TestContext::new().await;
    let email = ctx
        .seed_admin(AdminRole::SuperAdmin, "correct-password-123")
        .await;
    ctx.login(&email, "correct-password-123").await;

    // Find our own id in the admin list.
    let resp = ctx
        .client
        .get(format!("{}/api/admins", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    let body: Value = resp.json().await.expect("json body");
    let own_id = body["data"]
        .as_array()
        .expect("admin list")
        .iter()
        .find(|a| a["email"] == email.as_str())
        .and_then(|a| a["id"].as_str())
        .expect("own admin id")
        .to_owned();

    let resp = ctx
        .client
        .delete(format!("{}/api/admins/{own_id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_unauthenticated_admin_management_is_401() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(format!("{}/api/admins", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
