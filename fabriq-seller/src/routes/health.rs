use axum::Json;
use fabriq_shared::types::api::HealthResponse;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("fabriq-seller", env!("CARGO_PKG_VERSION")))
}
