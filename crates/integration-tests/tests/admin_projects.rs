//! End-to-end tests for project CRUD, bulk actions, and auditing.
//!
//! Run with: cargo test -p techmeet-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use techmeet_core::AdminRole;
use techmeet_integration_tests::TestContext;

async fn create_project(ctx: &TestContext, title: &str) -> String {
    let resp = ctx
        .client
        .post(format!("{}/api/projects", ctx.base_url))
        .json(&serde_json::json!({
            "title": title,
            "status": "draft",
            "skills": ["rust"],
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("json body");
    body["data"]["id"].as_str().expect("project id").to_owned()
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_project_crud_round_trip() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let id = create_project(&ctx, "E2E test project").await;

    let resp = ctx
        .client
        .get(format!("{}/api/projects/{id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["data"]["title"], "E2E test project");
    assert_eq!(body["data"]["status"], "draft");

    let resp = ctx
        .client
        .put(format!("{}/api/projects/{id}", ctx.base_url))
        .json(&serde_json::json!({
            "title": "E2E test project",
            "status": "open",
            "skills": ["rust"],
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["data"]["status"], "open");

    let resp = ctx
        .client
        .delete(format!("{}/api/projects/{id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = ctx
        .client
        .get(format!("{}/api/projects/{id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_bulk_status_reports_requested_count() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let a = create_project(&ctx, "Bulk A").await;
    let b = create_project(&ctx, "Bulk B").await;
    let c = create_project(&ctx, "Bulk C").await;

    let resp = ctx
        .client
        .patch(format!("{}/api/projects/bulk", ctx.base_url))
        .json(&serde_json::json!({"ids": [a, b, c], "status": "open"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["data"]["updated"], 3);

    let resp = ctx
        .client
        .delete(format!("{}/api/projects/bulk", ctx.base_url))
        .json(&serde_json::json!({"ids": [a, b, c]}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["data"]["deleted"], 3);

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_empty_bulk_request_is_rejected() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let resp = ctx
        .client
        .patch(format!("{}/api/projects/bulk", ctx.base_url))
        .json(&serde_json::json!({"ids": [], "status": "open"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["ids"].is_array());

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_mutations_are_audited() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let id = create_project(&ctx, "Audited project").await;
    ctx.client
        .patch(format!("{}/api/projects/bulk", ctx.base_url))
        .json(&serde_json::json!({"ids": [id], "status": "cancelled"}))
        .send()
        .await
        .expect("request failed");

    let resp = ctx
        .client
        .get(format!("{}/api/audit-logs", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    let logs = body["data"].as_array().expect("audit logs");

    assert!(logs.iter().any(|l| {
        l["action"] == "create" && l["resource"] == "project" && l["resource_id"] == id.as_str()
    }));
    assert!(logs.iter().any(|l| {
        l["action"] == "bulk_update" && l["resource"] == "project" && l["admin_name"] == "Test Admin"
    }));

    ctx.cleanup_account(&email).await;
}
