//! End-to-end tests for the CSV export endpoint.
//!
//! Run with: cargo test -p techmeet-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;

use techmeet_core::AdminRole;
use techmeet_integration_tests::TestContext;

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_users_export_is_bom_prefixed_csv_attachment() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let resp = ctx
        .client
        .get(format!("{}/api/export?type=users", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(
        content_type.starts_with("text/csv"),
        "unexpected content type: {content_type}"
    );

    let disposition = resp
        .headers()
        .get("content-disposition")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();
    assert!(disposition.contains("attachment"), "not an attachment: {disposition}");
    assert!(
        disposition.contains("users_") && disposition.contains(".csv"),
        "unexpected filename: {disposition}"
    );

    let body = resp.text().await.expect("body");
    assert!(body.starts_with('\u{feff}'), "missing UTF-8 BOM");
    let header = body.trim_start_matches('\u{feff}').lines().next().unwrap_or("");
    assert!(header.contains("이메일"), "unexpected header row: {header}");

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_unknown_export_type_is_400() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let resp = ctx
        .client
        .get(format!("{}/api/export?type=invoices", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_export_requires_admin_session() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(format!("{}/api/export?type=projects", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
