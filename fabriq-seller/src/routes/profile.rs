use axum::extract::{Path, State};
use axum::Json;
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult};
use fabriq_shared::types::auth::AuthUser;

use crate::models::{SellerProfileBody, UpdateSellerProfile};
use crate::AppState;

/// PATCH /seller/update/{profile_id}. The path carries the profile id
/// (the `userId` clients got from signup), and the profile must belong
/// to the bearer.
pub async fn update_profile(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(profile_id): Path<i64>,
    Json(changes): Json<UpdateSellerProfile>,
) -> AppResult<Json<SellerProfileBody>> {
    let profile = state
        .store
        .profile_owned_by(profile_id, user.id)?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

    let updated = state.store.update_profile(profile.id, &changes)?;
    let documents = state.store.documents_for_profile(updated.id)?;

    tracing::info!(profile_id = %updated.id, "seller profile updated");

    Ok(Json(SellerProfileBody::new(updated, documents)))
}
