pub mod config;
pub mod models;
pub mod routes;
pub mod schema;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fabriq_shared::clients::{BlobStore, EmailSender};

use crate::config::AppConfig;
use crate::store::SellerStore;

/// Collaborators handed to every handler. Built once at startup; tests
/// build one over in-memory fakes.
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn SellerStore>,
    pub email: Arc<dyn EmailSender>,
    pub blobs: Arc<dyn BlobStore>,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/signup", post(routes::signup::signup))
        .route("/auth/login", post(routes::login::login))
        .route("/auth/send-otp", post(routes::otp::send_otp))
        .route("/auth/verify-otp", post(routes::otp::verify_otp))
        .route("/auth/forgot-password", post(routes::password::forgot_password))
        .route("/auth/verify-reset-otp", post(routes::password::verify_reset_otp))
        .route("/auth/reset-password", post(routes::password::reset_password))
        .route("/auth/delete-user/:user_id", delete(routes::admin::delete_user))
        .route("/user/me", get(routes::me::me))
        .route("/seller/update/:profile_id", patch(routes::profile::update_profile))
        .route(
            "/seller/upload-doc",
            post(routes::documents::upload_documents)
                .layer(DefaultBodyLimit::max(25 * 1024 * 1024)),
        )
        .route("/seller/status/:user_id", get(routes::status::seller_status))
        .route("/seller/update-status", patch(routes::status::update_status))
        .route("/admin/approve/:user_id", post(routes::admin::approve_seller))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
