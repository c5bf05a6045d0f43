use std::str::FromStr;

use crate::models::VerificationStatus;

/// Object key for an uploaded seller document. The doc type is the
/// multipart field name, lowercased with spaces collapsed to underscores.
pub fn doc_storage_key(profile_id: i64, doc_type: &str, filename: &str) -> String {
    let label = doc_type.to_lowercase().replace(' ', "_");
    format!("seller_docs/{profile_id}/{label}_{filename}")
}

/// Uploads from a fresh or rejected profile put it back in front of the
/// reviewers; uploads during review or after approval change nothing.
/// Unrecognized status strings (admins can write anything) also change
/// nothing.
pub fn upload_resets_review(status: &str) -> bool {
    matches!(
        VerificationStatus::from_str(status),
        Ok(VerificationStatus::New) | Ok(VerificationStatus::Rejected)
    )
}
