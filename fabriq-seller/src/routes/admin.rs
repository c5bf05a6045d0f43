use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult};
use fabriq_shared::middleware::AdminUser;
use fabriq_shared::types::Message;

use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ApproveSellerRequest {
    pub status: Option<String>,
    pub admin_comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApproveSellerResponse {
    pub message: String,
    pub status: String,
    pub admin_comment: String,
}

/// POST /admin/approve/{user_id}. Status and comment are written exactly
/// as supplied, whatever the profile was in before.
pub async fn approve_seller(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
    body: Option<Json<ApproveSellerRequest>>,
) -> AppResult<Json<ApproveSellerResponse>> {
    let req = body.map(|Json(b)| b).unwrap_or_default();
    let status = req.status.unwrap_or_else(|| "approved".to_string());
    let admin_comment = req.admin_comment.unwrap_or_default();

    let profile = state
        .store
        .profile_by_user(user_id)?
        .ok_or_else(|| AppError::not_found("Not found"))?;

    state
        .store
        .set_status(profile.id, &status, Some(&admin_comment))?;

    tracing::info!(
        admin_id = %admin.id,
        profile_id = %profile.id,
        status = %status,
        "seller reviewed"
    );

    Ok(Json(ApproveSellerResponse {
        message: "Updated".to_string(),
        status,
        admin_comment,
    }))
}

/// DELETE /auth/delete-user/{user_id}. Cascades the profile and its
/// document rows; stored objects stay in the bucket.
pub async fn delete_user(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Message>> {
    if !state.store.delete_user(user_id)? {
        return Err(AppError::not_found("User not found"));
    }

    tracing::info!(admin_id = %admin.id, user_id = %user_id, "user deleted");

    Ok(Json(Message::new(format!(
        "User {user_id} deleted successfully"
    ))))
}
