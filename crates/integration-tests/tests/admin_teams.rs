//! End-to-end tests for teams, focused on the duplicate-membership conflict.
//!
//! Run with: cargo test -p techmeet-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::Value;
use uuid::Uuid;

use techmeet_core::AdminRole;
use techmeet_integration_tests::TestContext;

async fn seed_profile(ctx: &TestContext) -> String {
    let id = Uuid::new_v4();
    let email = format!("freelancer-{id}@test.techmeet.kr");
    sqlx::query("INSERT INTO profiles (id, name, email) VALUES ($1, 'Test Freelancer', $2)")
        .bind(id)
        .bind(&email)
        .execute(&ctx.pool)
        .await
        .expect("Failed to seed profile");
    id.to_string()
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_duplicate_team_member_is_409() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let profile_id = seed_profile(&ctx).await;

    let resp = ctx
        .client
        .post(format!("{}/api/teams", ctx.base_url))
        .json(&serde_json::json!({"name": "Conflict test team"}))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = resp.json().await.expect("json body");
    let team_id = body["data"]["id"].as_str().expect("team id").to_owned();

    let member = serde_json::json!({"profile_id": profile_id, "role": "member"});

    let resp = ctx
        .client
        .post(format!("{}/api/teams/{team_id}/members", ctx.base_url))
        .json(&member)
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    // Second add of the same profile hits the unique constraint.
    let resp = ctx
        .client
        .post(format!("{}/api/teams/{team_id}/members", ctx.base_url))
        .json(&member)
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = resp.json().await.expect("json body");
    assert_eq!(body["error"]["code"], "CONFLICT");

    // Cleanup: deleting the team cascades the membership.
    ctx.client
        .delete(format!("{}/api/teams/{team_id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    ctx.cleanup_account(&email).await;
}

#[tokio::test]
#[ignore = "Requires running admin server and a migrated database"]
async fn test_team_detail_includes_members() {
    let ctx = TestContext::new().await;
    let email = ctx.seed_admin(AdminRole::Admin, "correct-password-123").await;
    ctx.login(&email, "correct-password-123").await;

    let profile_id = seed_profile(&ctx).await;

    let resp = ctx
        .client
        .post(format!("{}/api/teams", ctx.base_url))
        .json(&serde_json::json!({"name": "Detail test team"}))
        .send()
        .await
        .expect("request failed");
    let body: Value = resp.json().await.expect("json body");
    let team_id = body["data"]["id"].as_str().expect("team id").to_owned();

    ctx.client
        .post(format!("{}/api/teams/{team_id}/members", ctx.base_url))
        .json(&serde_json::json!({"profile_id": profile_id, "role": "leader"}))
        .send()
        .await
        .expect("request failed");

    let resp = ctx
        .client
        .get(format!("{}/api/teams/{team_id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("json body");
    let members = body["data"]["members"].as_array().expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["role"], "leader");
    assert_eq!(members[0]["member_name"], "Test Freelancer");

    ctx.client
        .delete(format!("{}/api/teams/{team_id}", ctx.base_url))
        .send()
        .await
        .expect("request failed");
    ctx.cleanup_account(&email).await;
}
