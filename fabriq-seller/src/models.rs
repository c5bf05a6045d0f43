use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{documents, email_otps, password_reset_otps, seller_profiles, users};

// --- Users ---

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = users)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub role: String,
}

// --- Seller Profiles ---

/// Review states a seller profile moves through. The column itself is a
/// varchar; admin writes are stored verbatim, so parsing can fail and
/// callers treat unparseable values as neither-new-nor-rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    New,
    Pending,
    Approved,
    Rejected,
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::New => write!(f, "new"),
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Approved => write!(f, "approved"),
            VerificationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(VerificationStatus::New),
            "pending" => Ok(VerificationStatus::Pending),
            "approved" => Ok(VerificationStatus::Approved),
            "rejected" => Ok(VerificationStatus::Rejected),
            _ => Err(format!("unknown verification status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = seller_profiles)]
pub struct SellerProfile {
    pub id: i64,
    pub user_id: i64,
    pub factory_name: String,
    pub gstin: Option<String>,
    pub iec: Option<String>,
    pub mobile: String,
    pub address: Option<String>,
    pub geo_lat: Option<f64>,
    pub geo_long: Option<f64>,
    pub status: String,
    pub admin_comment: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = seller_profiles)]
pub struct NewSellerProfile {
    pub user_id: i64,
    pub factory_name: String,
    pub gstin: Option<String>,
    pub iec: Option<String>,
    pub mobile: String,
    pub address: Option<String>,
    pub geo_lat: Option<f64>,
    pub geo_long: Option<f64>,
    pub status: String,
}

/// Partial update applied by the profile PATCH route. `None` means the
/// field was absent from the request and must be left untouched.
#[derive(Debug, Clone, Default, Deserialize, AsChangeset)]
#[diesel(table_name = seller_profiles)]
pub struct UpdateSellerProfile {
    pub factory_name: Option<String>,
    pub mobile: Option<String>,
    pub gstin: Option<String>,
    pub iec: Option<String>,
    pub address: Option<String>,
    pub geo_lat: Option<f64>,
    pub geo_long: Option<f64>,
}

impl UpdateSellerProfile {
    /// Diesel refuses to build an UPDATE with zero changed columns, so
    /// the store skips the statement entirely for an empty changeset.
    pub fn is_empty(&self) -> bool {
        self.factory_name.is_none()
            && self.mobile.is_none()
            && self.gstin.is_none()
            && self.iec.is_none()
            && self.address.is_none()
            && self.geo_lat.is_none()
            && self.geo_long.is_none()
    }
}

// --- Documents ---

#[derive(Debug, Clone, Queryable, Identifiable, Serialize)]
#[diesel(table_name = documents)]
pub struct Document {
    pub id: i64,
    #[serde(skip_serializing)]
    pub profile_id: i64,
    pub doc_type: String,
    #[serde(rename = "file")]
    pub file_url: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocument {
    pub profile_id: i64,
    pub doc_type: String,
    pub file_url: String,
}

// --- OTP rows ---

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = email_otps)]
pub struct EmailOtp {
    pub id: i64,
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = email_otps)]
pub struct NewEmailOtp {
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = password_reset_otps)]
pub struct PasswordResetOtp {
    pub id: i64,
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = password_reset_otps)]
pub struct NewPasswordResetOtp {
    pub email: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

// --- Wire bodies shared across routes ---

/// Profile as the API serializes it, documents embedded.
#[derive(Debug, Serialize)]
pub struct SellerProfileBody {
    pub id: i64,
    pub factory_name: String,
    pub mobile: String,
    pub gstin: Option<String>,
    pub iec: Option<String>,
    pub address: Option<String>,
    pub geo_lat: Option<f64>,
    pub geo_long: Option<f64>,
    pub status: String,
    pub admin_comment: Option<String>,
    pub documents: Vec<Document>,
}

impl SellerProfileBody {
    pub fn new(profile: SellerProfile, documents: Vec<Document>) -> Self {
        Self {
            id: profile.id,
            factory_name: profile.factory_name,
            mobile: profile.mobile,
            gstin: profile.gstin,
            iec: profile.iec,
            address: profile.address,
            geo_lat: profile.geo_lat,
            geo_long: profile.geo_long,
            status: profile.status,
            admin_comment: profile.admin_comment,
            documents,
        }
    }
}
