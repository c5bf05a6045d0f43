use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use fabriq_shared::errors::{AppError, AppResult};
use fabriq_shared::types::auth::AuthUser;

use crate::models::{Document, NewDocument, VerificationStatus};
use crate::services::seller_service;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct UploadDocsResponse {
    pub message: String,
    pub status: String,
    pub documents: Vec<Document>,
}

/// POST /seller/upload-doc. Each multipart file field becomes one
/// document; the field name is the document type. Fields without a
/// filename are ignored.
pub async fn upload_documents(
    user: AuthUser,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadDocsResponse>> {
    let mut profile = state
        .store
        .profile_by_user(user.id)?
        .ok_or_else(|| AppError::not_found("Seller profile not found"))?;

    // Resubmission happens before any file lands: a fresh or rejected
    // profile goes back to pending and the reviewer comment is cleared.
    if seller_service::upload_resets_review(&profile.status) {
        profile = state.store.set_status(
            profile.id,
            &VerificationStatus::Pending.to_string(),
            Some(""),
        )?;
    }

    let mut uploaded: Vec<Document> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("failed to read multipart: {e}")))?
    {
        let doc_type = match field.name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let filename = match field.file_name() {
            Some(name) => name.to_string(),
            None => continue,
        };
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("failed to read file data: {e}")))?;

        let key = seller_service::doc_storage_key(profile.id, &doc_type, &filename);
        let file_url = state
            .blobs
            .upload(&key, data.to_vec(), &content_type)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("document upload failed: {e}")))?;

        let doc = state.store.create_document(NewDocument {
            profile_id: profile.id,
            doc_type,
            file_url,
        })?;

        tracing::info!(profile_id = %profile.id, doc_id = %doc.id, doc_type = %doc.doc_type, "document stored");
        uploaded.push(doc);
    }

    Ok(Json(UploadDocsResponse {
        message: "Documents uploaded successfully".to_string(),
        status: profile.status,
        documents: uploaded,
    }))
}
