//! Public status lookup and the seller's own status writes.

mod common;

use axum::http::header::AUTHORIZATION;
use common::{bearer, create_active_seller, create_test_context, seed_admin, signup_seller, verify_email};
use fabriq_seller::store::SellerStore;
use serde_json::{json, Value};

#[tokio::test]
async fn health_reports_service_and_version() {
    let ctx = create_test_context();

    let response = ctx.server.get("/health").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "fabriq-seller");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn status_lookup_is_public() {
    let ctx = create_test_context();
    create_active_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;

    // No Authorization header at all.
    let response = ctx.server.get("/seller/status/1").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "new");
    assert!(body["admin_comment"].is_null());
    assert_eq!(body["profile"]["factory_name"], "Asha Textiles");
    assert_eq!(body["profile"]["mobile"], "9876543210");
    assert_eq!(body["profile"]["status"], "new");
    assert!(body["profile"]["documents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn status_lookup_unknown_user_is_not_found() {
    let ctx = create_test_context();

    let response = ctx.server.get("/seller/status/42").await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Not found");
}

#[tokio::test]
async fn status_path_takes_the_user_id_not_the_wire_user_id() {
    let ctx = create_test_context();

    // The admin takes user id 1, so the first seller is user 2 while its
    // profile (what signup returns as userId) is 1.
    seed_admin(&ctx);
    let wire_id = signup_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;
    verify_email(&ctx, "mill@weave.test").await;
    assert_eq!(wire_id, 1);

    let by_user = ctx.server.get("/seller/status/2").await;
    assert_eq!(by_user.status_code(), 200);

    // The admin account has no profile, so the wire id misses here.
    let by_wire = ctx.server.get("/seller/status/1").await;
    assert_eq!(by_wire.status_code(), 404);
}

#[tokio::test]
async fn update_status_defaults_to_pending() {
    let ctx = create_test_context();
    let (_, access) = create_active_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;

    let response = ctx
        .server
        .patch("/seller/update-status")
        .add_header(AUTHORIZATION, bearer(&access))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Status updated to pending");

    let profile = ctx.store.profile_by_user(1).unwrap().unwrap();
    assert_eq!(profile.status, "pending");
}

#[tokio::test]
async fn update_status_writes_the_caller_string_verbatim() {
    let ctx = create_test_context();
    let (_, access) = create_active_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;

    let response = ctx
        .server
        .patch("/seller/update-status")
        .add_header(AUTHORIZATION, bearer(&access))
        .json(&json!({ "status": "on vacation" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["message"], "Status updated to on vacation");

    let profile = ctx.store.profile_by_user(1).unwrap().unwrap();
    assert_eq!(profile.status, "on vacation");
}

#[tokio::test]
async fn update_status_leaves_the_reviewer_comment_alone() {
    let ctx = create_test_context();
    let (profile_id, access) = create_active_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;
    ctx.store
        .set_status(profile_id, "rejected", Some("blurry scan"))
        .unwrap();

    let response = ctx
        .server
        .patch("/seller/update-status")
        .add_header(AUTHORIZATION, bearer(&access))
        .await;
    assert_eq!(response.status_code(), 200);

    let profile = ctx.store.profile_by_user(1).unwrap().unwrap();
    assert_eq!(profile.status, "pending");
    assert_eq!(profile.admin_comment.as_deref(), Some("blurry scan"));
}

#[tokio::test]
async fn update_status_requires_an_access_token() {
    let ctx = create_test_context();

    let response = ctx.server.patch("/seller/update-status").await;
    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn status_reflects_review_verdicts() {
    let ctx = create_test_context();
    let (profile_id, _) = create_active_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;
    ctx.store
        .set_status(profile_id, "rejected", Some("GSTIN does not match"))
        .unwrap();

    let response = ctx.server.get("/seller/status/1").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["status"], "rejected");
    assert_eq!(body["admin_comment"], "GSTIN does not match");
    assert_eq!(body["profile"]["admin_comment"], "GSTIN does not match");
}
