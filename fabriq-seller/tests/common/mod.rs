//! Common test utilities for seller service integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum_test::TestServer;
use serde_json::{json, Value};

use fabriq_seller::config::AppConfig;
use fabriq_seller::models::NewUser;
use fabriq_seller::services::{auth_service, token_service};
use fabriq_seller::store::{MemoryStore, SellerStore};
use fabriq_seller::{build_router, AppState};
use fabriq_shared::clients::{BlobStore, EmailSender};
use fabriq_shared::types::auth::UserRole;

/// Mock email sender that captures OTP codes instead of dispatching them.
#[derive(Default, Clone)]
pub struct MockEmailSender {
    /// Captured (recipient, code) pairs, both purposes interleaved
    pub sent: Arc<RwLock<Vec<(String, String)>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockEmailSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last code sent to an address
    pub fn get_code(&self, email: &str) -> Option<String> {
        self.sent
            .read()
            .unwrap()
            .iter()
            .rev()
            .find(|(e, _)| e == email)
            .map(|(_, c)| c.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.read().unwrap().len()
    }

    /// Make every send fail, simulating a provider outage.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.write().unwrap() = fail;
    }

    fn record(&self, to: &str, code: &str) -> Result<(), String> {
        if *self.fail.read().unwrap() {
            return Err("email provider unavailable".to_string());
        }
        self.sent
            .write()
            .unwrap()
            .push((to.to_string(), code.to_string()));
        Ok(())
    }
}

#[axum::async_trait]
impl EmailSender for MockEmailSender {
    async fn send_verification_code(&self, to: &str, code: &str) -> Result<(), String> {
        self.record(to, code)
    }

    async fn send_password_reset_code(&self, to: &str, code: &str) -> Result<(), String> {
        self.record(to, code)
    }
}

/// Blob store that keeps uploads in memory and hands back local URLs.
#[derive(Default, Clone)]
pub struct MemoryBlobStore {
    pub uploads: Arc<RwLock<Vec<(String, Vec<u8>)>>>,
    fail: Arc<RwLock<bool>>,
}

impl MemoryBlobStore {
    pub fn keys(&self) -> Vec<String> {
        self.uploads
            .read()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Make every subsequent upload fail, as if the object store were down.
    pub fn set_fail(&self, fail: bool) {
        *self.fail.write().unwrap() = fail;
    }
}

#[axum::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn upload(&self, key: &str, body: Vec<u8>, _content_type: &str) -> Result<String, String> {
        if *self.fail.read().unwrap() {
            return Err("simulated object store outage".to_string());
        }
        self.uploads
            .write()
            .unwrap()
            .push((key.to_string(), body));
        Ok(format!("http://localhost:9000/fabriq-docs/{key}"))
    }
}

pub struct TestContext {
    pub server: TestServer,
    pub email: MockEmailSender,
    pub blobs: MemoryBlobStore,
    pub store: Arc<MemoryStore>,
    pub config: AppConfig,
}

pub fn create_test_context() -> TestContext {
    let config = AppConfig::load().expect("failed to load config");
    let store = Arc::new(MemoryStore::new());
    let email = MockEmailSender::new();
    let blobs = MemoryBlobStore::default();

    let state = Arc::new(AppState {
        config: config.clone(),
        store: store.clone(),
        email: Arc::new(email.clone()),
        blobs: Arc::new(blobs.clone()),
    });

    let server = TestServer::new(build_router(state)).expect("failed to create test server");

    TestContext {
        server,
        email,
        blobs,
        store,
        config,
    }
}

/// Sign a seller up and return the profile id the API calls `userId`.
pub async fn signup_seller(ctx: &TestContext, email: &str, password: &str) -> i64 {
    let response = ctx
        .server
        .post("/auth/signup")
        .json(&json!({
            "email": email,
            "mobile": "9876543210",
            "password": password,
            "owner_name": "Asha",
            "factory_name": "Asha Textiles",
        }))
        .await;
    assert_eq!(response.status_code(), 201);

    let body: Value = response.json();
    body["userId"].as_i64().expect("userId missing")
}

/// Verify the signup OTP, activating the account. Returns the response
/// body carrying the token pair.
pub async fn verify_email(ctx: &TestContext, email: &str) -> Value {
    let code = ctx.email.get_code(email).expect("no OTP captured");
    let response = ctx
        .server
        .post("/auth/verify-otp")
        .json(&json!({ "email": email, "otp": code }))
        .await;
    assert_eq!(response.status_code(), 200);
    response.json()
}

/// Signup + OTP verification. Returns (profile id, access token).
pub async fn create_active_seller(ctx: &TestContext, email: &str, password: &str) -> (i64, String) {
    let profile_id = signup_seller(ctx, email, password).await;
    let body = verify_email(ctx, email).await;
    let access = body["tokens"]["access"]
        .as_str()
        .expect("access token missing")
        .to_string();
    (profile_id, access)
}

pub fn bearer(token: &str) -> axum::http::HeaderValue {
    axum::http::HeaderValue::from_str(&format!("Bearer {token}")).expect("invalid header value")
}

/// Seed an active admin account directly in the store and mint an access
/// token for it. There is no admin signup endpoint; operators are created
/// out-of-band.
pub fn seed_admin(ctx: &TestContext) -> (i64, String) {
    let password_hash = auth_service::hash_password("ops-password-1").expect("hash failed");
    let admin = ctx
        .store
        .create_user(NewUser {
            email: "ops@fabriq.trade".to_string(),
            password_hash,
            first_name: "Ops".to_string(),
            last_name: String::new(),
            is_active: true,
            role: UserRole::Admin.to_string(),
        })
        .expect("failed to seed admin");

    let token = token_service::create_access_token(
        admin.id,
        UserRole::Admin,
        &ctx.config.jwt_secret,
        3600,
    )
    .expect("failed to mint admin token");

    (admin.id, token)
}
