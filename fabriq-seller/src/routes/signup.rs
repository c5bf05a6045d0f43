use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use fabriq_shared::errors::{AppError, AppResult, ErrorCode};
use fabriq_shared::types::auth::UserRole;

use crate::models::{NewSellerProfile, NewUser, VerificationStatus};
use crate::services::{auth_service, otp_service};
use crate::store::OtpPurpose;
use crate::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "invalid email format"))]
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub password: Option<String>,
    pub owner_name: Option<String>,
    pub factory_name: Option<String>,
    pub gstin: Option<String>,
    pub iec: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub detail: String,
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    let email = req.email.clone().unwrap_or_default();
    let mobile = req.mobile.clone().unwrap_or_default();
    let password = req.password.clone().unwrap_or_default();

    if email.is_empty() || mobile.is_empty() || password.is_empty() {
        return Err(AppError::bad_request(
            "Email, mobile, and password are required",
        ));
    }

    req.validate()
        .map_err(|e| AppError::new(ErrorCode::ValidationError, e.to_string()))?;

    if state.store.user_by_email(&email)?.is_some() {
        return Err(AppError::conflict("User already exists"));
    }

    let password_hash = auth_service::hash_password(&password)?;

    let user = state.store.create_user(NewUser {
        email: email.clone(),
        password_hash,
        first_name: req.owner_name.unwrap_or_default(),
        last_name: String::new(),
        is_active: false,
        role: UserRole::User.to_string(),
    })?;

    let profile = state.store.create_profile(NewSellerProfile {
        user_id: user.id,
        factory_name: req
            .factory_name
            .unwrap_or_else(|| "Unnamed Factory".to_string()),
        gstin: Some(req.gstin.unwrap_or_default()),
        iec: Some(req.iec.unwrap_or_default()),
        mobile,
        address: Some(req.address.unwrap_or_default()),
        geo_lat: None,
        geo_long: None,
        status: VerificationStatus::New.to_string(),
    })?;

    // Rows are committed before the mail goes out; a send failure is a 500
    // with the account already created.
    otp_service::issue(
        state.store.as_ref(),
        state.email.as_ref(),
        OtpPurpose::EmailVerification,
        &email,
    )
    .await?;

    tracing::info!(user_id = %user.id, profile_id = %profile.id, "seller signed up");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            user_id: profile.id,
            detail: "OTP sent to email".to_string(),
        }),
    ))
}
