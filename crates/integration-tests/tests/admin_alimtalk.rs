//! End-to-end tests for the alimtalk send endpoint's cross-field validation.
//!
//! Run with: cargo test -p techmeet-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use techmeet_core::AdminRole;
use techmeet_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_individual_send_without_user_id_is_validation_error() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let resp = ctx
        .client
        .post(format!("{}/api/alimtalk/send", ctx.base_url))
        .json(&serde_json::json!({
            "template_code": "TM_WELCOME_01",
            "service_type": "individual",
            "target": "individual",
            "send_type": "immediate",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["details"]["user_id"].is_array(),
        "expected a user_id detail entry: {body}"
    );

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_scheduled_send_without_timestamp_is_validation_error() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let resp = ctx
        .client
        .post(format!("{}/api/alimtalk/send", ctx.base_url))
        .json(&serde_json::json!({
            "template_code": "TM_DEADLINE_01",
            "service_type": "notice",
            "target": "all",
            "send_type": "scheduled",
        }))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(
        body["error"]["details"]["scheduled_at"].is_array(),
        "expected a scheduled_at detail entry: {body}"
    );

    ctx.cleanup_account(&email).await;
}
