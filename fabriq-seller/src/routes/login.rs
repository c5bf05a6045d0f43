use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult, ErrorCode};
use fabriq_shared::types::auth::{TokenPair, UserRole};

use crate::services::{auth_service, token_service};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub status: String,
    pub tokens: TokenPair,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let email = req.email.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    if email.is_empty() || password.is_empty() {
        return Err(AppError::bad_request("Email and password required"));
    }

    let user = state
        .store
        .user_by_email(&email)?
        .ok_or_else(|| AppError::new(ErrorCode::InvalidCredentials, "Invalid credentials"))?;

    // Accounts stay inactive until the email OTP is verified and cannot
    // authenticate before that.
    if !user.is_active {
        return Err(AppError::new(
            ErrorCode::InvalidCredentials,
            "Invalid credentials",
        ));
    }

    if !auth_service::verify_password(&password, &user.password_hash)? {
        return Err(AppError::new(
            ErrorCode::InvalidCredentials,
            "Invalid credentials",
        ));
    }

    let profile = state
        .store
        .profile_by_user(user.id)?
        .ok_or_else(|| AppError::not_found("User profile not found"))?;

    let role = user.role.parse::<UserRole>().unwrap_or(UserRole::User);
    let tokens = token_service::create_token_pair(
        user.id,
        role,
        &state.config.jwt_secret,
        state.config.jwt_access_ttl,
        state.config.jwt_refresh_ttl,
    )?;

    tracing::info!(user_id = %user.id, "seller logged in");

    Ok(Json(LoginResponse {
        user_id: profile.id,
        status: profile.status,
        tokens,
    }))
}
