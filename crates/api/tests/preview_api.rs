//! HTTP-level integration tests for preview tokens: issuance, the
//! token-gated draft view, the collapsed invalid/expired outcome, and
//! cleanup of expired tokens.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, build_test_app, delete, get, post_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Create a draft page with one block; returns the page id.
async fn setup_page(app: &Router, slug: &str) -> i64 {
    let response = post_json(
        app,
        "/api/v1/pages",
        json!({ "slug": slug, "title": format!("Page {slug}") }),
    )
    .await;
    let page_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json(
        app,
        &format!("/api/v1/pages/{page_id}/blocks"),
        json!({ "block_key": "hero_title", "content": { "type": "text", "value": "draft copy" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    page_id
}

async fn issue_token(app: &Router, page_id: i64, minutes: i64) -> String {
    let response = post_json(
        app,
        &format!("/api/v1/pages/{page_id}/preview-tokens"),
        json!({ "expires_in_minutes": minutes }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Issuance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_issue_token_with_default_expiry(pool: PgPool) {
    let app = build_test_app(pool);
    let page_id = setup_page(&app, "home").await;

    let response = post_json(
        &app,
        &format!("/api/v1/pages/{page_id}/preview-tokens"),
        json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let token = body_json(response).await;
    assert_eq!(token["page_id"], page_id);
    let value = token["token"].as_str().unwrap();
    assert_eq!(value.len(), 40);
    assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_issue_token_rejects_bad_expiry(pool: PgPool) {
    let app = build_test_app(pool);
    let page_id = setup_page(&app, "home").await;

    let response = post_json(
        &app,
        &format!("/api/v1/pages/{page_id}/preview-tokens"),
        json!({ "expires_in_minutes": -5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_issue_token_for_unknown_page_is_not_found(pool: PgPool) {
    let app = build_test_app(pool);

    let response = post_json(&app, "/api/v1/pages/9999/preview-tokens", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Draft view
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_preview_exposes_draft_content(pool: PgPool) {
    let app = build_test_app(pool);
    let page_id = setup_page(&app, "home").await;
    let token = issue_token(&app, page_id, 60).await;

    let response = get(&app, &format!("/api/v1/preview/{token}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["page"]["id"], page_id);
    assert_eq!(body["blocks"][0]["content_draft"]["value"], "draft copy");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_preview_token_is_reusable(pool: PgPool) {
    let app = build_test_app(pool);
    let page_id = setup_page(&app, "home").await;
    let token = issue_token(&app, page_id, 60).await;

    for _ in 0..3 {
        let response = get(&app, &format!("/api/v1/preview/{token}")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_expired_and_unknown_tokens_are_indistinguishable(pool: PgPool) {
    let app = build_test_app(pool);
    let page_id = setup_page(&app, "home").await;

    // Expired on arrival: issued with a zero-minute window.
    let expired = issue_token(&app, page_id, 0).await;
    let expired_response = get(&app, &format!("/api/v1/preview/{expired}")).await;

    // Never existed at all.
    let unknown_response = get(&app, "/api/v1/preview/AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA").await;

    // Same status, same code, same message: nothing leaks.
    assert_eq!(expired_response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_response.status(), StatusCode::UNAUTHORIZED);
    let expired_body = body_json(expired_response).await;
    let unknown_body = body_json(unknown_response).await;
    assert_eq!(expired_body, unknown_body);
}

// ---------------------------------------------------------------------------
// Cleanup
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_cleanup_removes_only_expired_tokens(pool: PgPool) {
    let app = build_test_app(pool);
    let page_id = setup_page(&app, "home").await;

    issue_token(&app, page_id, 0).await;
    issue_token(&app, page_id, 0).await;
    let live = issue_token(&app, page_id, 60).await;

    let response = delete(&app, "/api/v1/preview-tokens/expired").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["removed"], 2);

    // The live token survived the sweep.
    let response = get(&app, &format!("/api/v1/preview/{live}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Idempotent: a second sweep removes nothing.
    let response = delete(&app, "/api/v1/preview-tokens/expired").await;
    assert_eq!(body_json(response).await["removed"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_tokens_for_page(pool: PgPool) {
    let app = build_test_app(pool);
    let page_id = setup_page(&app, "home").await;

    issue_token(&app, page_id, 30).await;
    issue_token(&app, page_id, 60).await;

    let response = get(&app, &format!("/api/v1/pages/{page_id}/preview-tokens")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}
