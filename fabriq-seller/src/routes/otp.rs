use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult};
use fabriq_shared::types::auth::{TokenPair, UserRole};
use fabriq_shared::types::Detail;

use crate::services::{otp_service, token_service};
use crate::services::otp_service::OtpCheck;
use crate::store::OtpPurpose;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SendOtpRequest {
    pub email: Option<String>,
}

/// Works for addresses with no account yet; sellers may verify their email
/// before finishing signup elsewhere.
pub async fn send_otp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendOtpRequest>,
) -> AppResult<Json<Detail>> {
    let email = req.email.unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::bad_request("Email is required"));
    }

    otp_service::issue(
        state.store.as_ref(),
        state.email.as_ref(),
        OtpPurpose::EmailVerification,
        &email,
    )
    .await?;

    Ok(Json(Detail::new("OTP sent to email")))
}

#[derive(Debug, Deserialize)]
pub struct VerifyOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VerifyOtpResponse {
    pub detail: String,
    pub tokens: TokenPair,
}

pub async fn verify_otp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<VerifyOtpResponse>> {
    let email = req.email.unwrap_or_default();
    let otp = req.otp.unwrap_or_default();

    if email.is_empty() || otp.is_empty() {
        return Err(AppError::bad_request("Email and OTP are required"));
    }

    match otp_service::check(state.store.as_ref(), OtpPurpose::EmailVerification, &email, &otp)? {
        OtpCheck::NotFound => return Err(AppError::not_found("No OTP found for this email")),
        OtpCheck::Invalid => return Err(AppError::bad_request("Invalid or expired OTP")),
        OtpCheck::Valid => {}
    }

    let user = state
        .store
        .user_by_email(&email)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    state.store.activate_user(user.id)?;

    let role = user.role.parse::<UserRole>().unwrap_or(UserRole::User);
    let tokens = token_service::create_token_pair(
        user.id,
        role,
        &state.config.jwt_secret,
        state.config.jwt_access_ttl,
        state.config.jwt_refresh_ttl,
    )?;

    tracing::info!(user_id = %user.id, "email verified, account active");

    Ok(Json(VerifyOtpResponse {
        detail: "OTP verified".to_string(),
        tokens,
    }))
}
