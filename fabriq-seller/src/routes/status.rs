use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult};
use fabriq_shared::types::auth::AuthUser;
use fabriq_shared::types::Message;

use crate::models::SellerProfileBody;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct SellerStatusResponse {
    pub status: String,
    pub admin_comment: Option<String>,
    pub profile: SellerProfileBody,
}

/// GET /seller/status/{user_id}. Public; the path carries the user id.
pub async fn seller_status(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<SellerStatusResponse>> {
    let profile = state
        .store
        .profile_by_user(user_id)?
        .ok_or_else(|| AppError::not_found("Not found"))?;

    let documents = state.store.documents_for_profile(profile.id)?;
    let status = profile.status.clone();
    let admin_comment = profile.admin_comment.clone();

    Ok(Json(SellerStatusResponse {
        status,
        admin_comment,
        profile: SellerProfileBody::new(profile, documents),
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// PATCH /seller/update-status. Writes whatever status the caller sends
/// on their own profile, defaulting to "pending". There is no transition
/// guard here; see the admin review flow for the vetted path.
pub async fn update_status(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    body: Option<Json<UpdateStatusRequest>>,
) -> AppResult<Json<Message>> {
    let req = body.map(|Json(b)| b).unwrap_or_default();
    let status = req.status.unwrap_or_else(|| "pending".to_string());

    let profile = state
        .store
        .profile_by_user(user.id)?
        .ok_or_else(|| AppError::not_found("Seller profile not found"))?;

    state.store.set_status(profile.id, &status, None)?;

    tracing::info!(profile_id = %profile.id, status = %status, "seller set own status");

    Ok(Json(Message::new(format!("Status updated to {status}"))))
}
