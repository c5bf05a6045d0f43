use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult};
use fabriq_shared::types::Detail;

use crate::services::otp_service::{self, OtpCheck};
use crate::services::auth_service;
use crate::store::OtpPurpose;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

pub async fn forgot_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<Detail>> {
    let email = req.email.unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::bad_request("Email is required"));
    }

    // Unlike email verification, resets only make sense for existing accounts.
    if state.store.user_by_email(&email)?.is_none() {
        return Err(AppError::not_found("User not found"));
    }

    otp_service::issue(
        state.store.as_ref(),
        state.email.as_ref(),
        OtpPurpose::PasswordReset,
        &email,
    )
    .await?;

    Ok(Json(Detail::new("OTP sent to email")))
}

#[derive(Debug, Deserialize)]
pub struct VerifyResetOtpRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
}

pub async fn verify_reset_otp(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyResetOtpRequest>,
) -> AppResult<Json<Detail>> {
    let email = req.email.unwrap_or_default();
    let otp = req.otp.unwrap_or_default();

    if email.is_empty() || otp.is_empty() {
        return Err(AppError::bad_request("Email and OTP are required"));
    }

    match otp_service::check(state.store.as_ref(), OtpPurpose::PasswordReset, &email, &otp)? {
        OtpCheck::NotFound => Err(AppError::not_found("No OTP found")),
        OtpCheck::Invalid => Err(AppError::bad_request("Invalid or expired OTP")),
        OtpCheck::Valid => Ok(Json(Detail::new("OTP verified"))),
    }
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: Option<String>,
    pub otp: Option<String>,
    pub password: Option<String>,
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<Detail>> {
    let email = req.email.unwrap_or_default();
    let otp = req.otp.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if email.is_empty() || otp.is_empty() || password.is_empty() {
        return Err(AppError::bad_request("Email, OTP, and password are required"));
    }

    match otp_service::check(state.store.as_ref(), OtpPurpose::PasswordReset, &email, &otp)? {
        OtpCheck::NotFound => return Err(AppError::not_found("No OTP found")),
        OtpCheck::Invalid => return Err(AppError::bad_request("Invalid or expired OTP")),
        OtpCheck::Valid => {}
    }

    let user = state
        .store
        .user_by_email(&email)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let password_hash = auth_service::hash_password(&password)?;
    state.store.update_password(user.id, &password_hash)?;

    tracing::info!(user_id = %user.id, "password reset");

    Ok(Json(Detail::new("Password reset successful")))
}
