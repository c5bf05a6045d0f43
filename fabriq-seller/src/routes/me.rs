use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult};
use fabriq_shared::types::auth::AuthUser;

use crate::models::SellerProfileBody;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub profile: Option<SellerProfileBody>,
}

pub async fn me(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<MeResponse>> {
    let account = state
        .store
        .user_by_id(user.id)?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let profile = match state.store.profile_by_user(account.id)? {
        Some(profile) => {
            let documents = state.store.documents_for_profile(profile.id)?;
            Some(SellerProfileBody::new(profile, documents))
        }
        None => None,
    };

    Ok(Json(MeResponse {
        id: account.id,
        // Accounts are keyed by email; the username mirrors it.
        username: account.email.clone(),
        email: account.email,
        first_name: account.first_name,
        last_name: account.last_name,
        profile,
    }))
}
