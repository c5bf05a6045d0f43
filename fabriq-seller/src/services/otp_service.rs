use chrono::{Duration, Utc};
use rand::Rng;

use fabriq_shared::clients::EmailSender;
use fabriq_shared::errors::{AppError, AppResult};

use crate::store::{OtpPurpose, SellerStore};

pub const OTP_TTL_MINUTES: i64 = 10;

/// 6 decimal digits, leading zeros kept.
pub fn generate_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(0..1_000_000))
}

/// Outcome of matching a candidate code against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpCheck {
    Valid,
    Invalid,
    NotFound,
}

/// Store a fresh code for (purpose, email), replacing any previous one,
/// then dispatch it. The row is already committed when dispatch runs, so
/// a provider failure surfaces to the caller with the code persisted.
pub async fn issue(
    store: &dyn SellerStore,
    email_client: &dyn EmailSender,
    purpose: OtpPurpose,
    email: &str,
) -> AppResult<()> {
    let code = generate_code();
    let expires_at = Utc::now() + Duration::minutes(OTP_TTL_MINUTES);
    store.replace_otp(purpose, email, &code, expires_at)?;

    let sent = match purpose {
        OtpPurpose::EmailVerification => email_client.send_verification_code(email, &code).await,
        OtpPurpose::PasswordReset => email_client.send_password_reset_code(email, &code).await,
    };
    sent.map_err(|e| AppError::Internal(anyhow::anyhow!("OTP email send failed: {e}")))?;

    tracing::info!(email = %email, purpose = ?purpose, "OTP issued");
    Ok(())
}

/// Compare a candidate against the current row. A match does not consume
/// the code; it stays usable until replaced or expired.
pub fn check(
    store: &dyn SellerStore,
    purpose: OtpPurpose,
    email: &str,
    candidate: &str,
) -> AppResult<OtpCheck> {
    let record = match store.latest_otp(purpose, email)? {
        Some(record) => record,
        None => return Ok(OtpCheck::NotFound),
    };

    if record.code == candidate && Utc::now() <= record.expires_at {
        Ok(OtpCheck::Valid)
    } else {
        Ok(OtpCheck::Invalid)
    }
}
