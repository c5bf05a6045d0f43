use std::sync::Arc;

use fabriq_seller::config::AppConfig;
use fabriq_seller::store::PostgresStore;
use fabriq_seller::{build_router, AppState};
use fabriq_shared::clients::{create_pool, HttpEmailClient, S3BlobStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fabriq_shared::middleware::init_tracing("fabriq-seller");

    let config = AppConfig::load()?;
    let port = config.port;

    let pool = create_pool(&config.database_url);
    let store = PostgresStore::new(pool);

    let email = HttpEmailClient::new(&config.resend_api_key, &config.from_email, &config.from_name);

    let blobs = S3BlobStore::new(
        &config.minio_endpoint,
        &config.minio_access_key,
        &config.minio_secret_key,
        &config.minio_bucket,
        &config.minio_public_url,
    )
    .await;

    let state = Arc::new(AppState {
        config,
        store: Arc::new(store),
        email: Arc::new(email),
        blobs: Arc::new(blobs),
    });

    let app = build_router(state);

    let addr = format!("0.0.0.0:{port}");
    tracing::info!(addr = %addr, "fabriq-seller starting");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
