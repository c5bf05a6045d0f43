//! Email OTP ledger behavior over the HTTP surface.

mod common;

use chrono::{Duration, Utc};
use common::{create_test_context, signup_seller, verify_email};
use fabriq_seller::store::{OtpPurpose, SellerStore};
use serde_json::{json, Value};

#[tokio::test]
async fn verify_otp_activates_account_and_returns_tokens() {
    let ctx = create_test_context();
    signup_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;

    let body = verify_email(&ctx, "mill@weave.test").await;
    assert_eq!(body["detail"], "OTP verified");
    assert!(body["tokens"]["access"].as_str().is_some());
    assert!(body["tokens"]["refresh"].as_str().is_some());

    let user = ctx.store.user_by_email("mill@weave.test").unwrap().unwrap();
    assert!(user.is_active);
}

#[tokio::test]
async fn resend_overwrites_previous_code() {
    let ctx = create_test_context();
    signup_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;
    let first_code = ctx.email.get_code("mill@weave.test").unwrap();

    let resend = ctx
        .server
        .post("/auth/send-otp")
        .json(&json!({ "email": "mill@weave.test" }))
        .await;
    assert_eq!(resend.status_code(), 200);
    let second_code = ctx.email.get_code("mill@weave.test").unwrap();

    if first_code != second_code {
        let stale = ctx
            .server
            .post("/auth/verify-otp")
            .json(&json!({ "email": "mill@weave.test", "otp": first_code }))
            .await;
        assert_eq!(stale.status_code(), 400);
        let body: Value = stale.json();
        assert_eq!(body["detail"], "Invalid or expired OTP");
    }

    let fresh = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "mill@weave.test", "otp": second_code }))
        .await;
    assert_eq!(fresh.status_code(), 200);
}

#[tokio::test]
async fn correct_code_can_be_replayed_within_window() {
    let ctx = create_test_context();
    signup_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;
    let code = ctx.email.get_code("mill@weave.test").unwrap();

    // Verification does not consume the code.
    for _ in 0..2 {
        let response = ctx
            .server
            .post("/auth/verify-otp")
            .json(&json!({ "email": "mill@weave.test", "otp": code }))
            .await;
        assert_eq!(response.status_code(), 200);
    }
}

#[tokio::test]
async fn verify_with_no_ledger_row_is_distinct_from_mismatch() {
    let ctx = create_test_context();
    signup_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;

    // No row at all for this address
    let missing = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "other@weave.test", "otp": "123456" }))
        .await;
    assert_eq!(missing.status_code(), 404);
    let body: Value = missing.json();
    assert_eq!(body["detail"], "No OTP found for this email");

    // Row exists but the candidate does not match
    let mismatch = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "mill@weave.test", "otp": "000000" }))
        .await;
    let code = ctx.email.get_code("mill@weave.test").unwrap();
    if code != "000000" {
        assert_eq!(mismatch.status_code(), 400);
        let body: Value = mismatch.json();
        assert_eq!(body["detail"], "Invalid or expired OTP");
    }
}

#[tokio::test]
async fn code_past_its_window_is_rejected() {
    let ctx = create_test_context();
    signup_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;
    let code = ctx.email.get_code("mill@weave.test").unwrap();

    // Rewind the ledger row as if it had been issued eleven minutes ago.
    ctx.store
        .replace_otp(
            OtpPurpose::EmailVerification,
            "mill@weave.test",
            &code,
            Utc::now() - Duration::minutes(1),
        )
        .unwrap();

    let response = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "mill@weave.test", "otp": code }))
        .await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Invalid or expired OTP");

    let user = ctx.store.user_by_email("mill@weave.test").unwrap().unwrap();
    assert!(!user.is_active);
}

#[tokio::test]
async fn expiry_boundary_is_inclusive() {
    let ctx = create_test_context();
    signup_seller(&ctx, "mill@weave.test", "loom-and-spindle-4").await;
    let code = ctx.email.get_code("mill@weave.test").unwrap();

    ctx.store
        .replace_otp(
            OtpPurpose::EmailVerification,
            "mill@weave.test",
            &code,
            Utc::now() + Duration::seconds(5),
        )
        .unwrap();

    let response = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "mill@weave.test", "otp": code }))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn send_otp_requires_email_field() {
    let ctx = create_test_context();

    let response = ctx.server.post("/auth/send-otp").json(&json!({})).await;
    assert_eq!(response.status_code(), 400);
    let body: Value = response.json();
    assert_eq!(body["detail"], "Email is required");
}

#[tokio::test]
async fn verify_otp_requires_both_fields() {
    let ctx = create_test_context();

    for body in [json!({}), json!({ "email": "a@b.test" }), json!({ "otp": "123456" })] {
        let response = ctx.server.post("/auth/verify-otp").json(&body).await;
        assert_eq!(response.status_code(), 400);
        let body: Value = response.json();
        assert_eq!(body["detail"], "Email and OTP are required");
    }
}

#[tokio::test]
async fn send_otp_works_for_addresses_without_accounts() {
    let ctx = create_test_context();

    let response = ctx
        .server
        .post("/auth/send-otp")
        .json(&json!({ "email": "early@weave.test" }))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["detail"], "OTP sent to email");
    assert!(ctx.email.get_code("early@weave.test").is_some());
}

#[tokio::test]
async fn verify_otp_without_account_is_user_not_found() {
    let ctx = create_test_context();

    ctx.server
        .post("/auth/send-otp")
        .json(&json!({ "email": "early@weave.test" }))
        .await;
    let code = ctx.email.get_code("early@weave.test").unwrap();

    // The code is right, but there is no account to activate.
    let response = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": "early@weave.test", "otp": code }))
        .await;
    assert_eq!(response.status_code(), 404);
    let body: Value = response.json();
    assert_eq!(body["detail"], "User not found");
}
