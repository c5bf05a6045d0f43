//! Storage seam for the seller service.
//!
//! The production binary wires [`PostgresStore`]; tests run the same
//! handlers over [`MemoryStore`].

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use chrono::{DateTime, Utc};

use fabriq_shared::errors::AppResult;

use crate::models::{
    Document, NewDocument, NewSellerProfile, NewUser, SellerProfile, UpdateSellerProfile, User,
};

/// The two OTP ledgers, kept in separate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpPurpose {
    EmailVerification,
    PasswordReset,
}

/// Current OTP row for an (email, purpose) pair.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

pub trait SellerStore: Send + Sync {
    // --- users ---

    fn create_user(&self, new_user: NewUser) -> AppResult<User>;

    fn user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    fn user_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Flip `is_active` on. Idempotent.
    fn activate_user(&self, id: i64) -> AppResult<()>;

    fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()>;

    /// Delete a user row, cascading the profile and its documents.
    /// Returns false when no such user existed.
    fn delete_user(&self, id: i64) -> AppResult<bool>;

    // --- seller profiles ---

    fn create_profile(&self, new_profile: NewSellerProfile) -> AppResult<SellerProfile>;

    fn profile_by_user(&self, user_id: i64) -> AppResult<Option<SellerProfile>>;

    /// Profile by its own id, but only when it belongs to `user_id`.
    fn profile_owned_by(&self, profile_id: i64, user_id: i64) -> AppResult<Option<SellerProfile>>;

    fn update_profile(
        &self,
        profile_id: i64,
        changes: &UpdateSellerProfile,
    ) -> AppResult<SellerProfile>;

    /// Write the status column verbatim. `admin_comment` is left untouched
    /// when `None` and overwritten (including to empty) when `Some`.
    fn set_status(
        &self,
        profile_id: i64,
        status: &str,
        admin_comment: Option<&str>,
    ) -> AppResult<SellerProfile>;

    // --- documents ---

    fn create_document(&self, new_doc: NewDocument) -> AppResult<Document>;

    fn documents_for_profile(&self, profile_id: i64) -> AppResult<Vec<Document>>;

    // --- OTP ledger ---

    /// Insert or overwrite the single OTP row for (purpose, email),
    /// refreshing `created_at`.
    fn replace_otp(
        &self,
        purpose: OtpPurpose,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()>;

    /// Most recently created OTP row for (purpose, email), if any.
    fn latest_otp(&self, purpose: OtpPurpose, email: &str) -> AppResult<Option<OtpRecord>>;
}
