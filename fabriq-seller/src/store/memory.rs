//! In-memory implementation used by the test suites.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use fabriq_shared::errors::{AppError, AppResult};

use crate::models::{
    Document, NewDocument, NewSellerProfile, NewUser, SellerProfile, UpdateSellerProfile, User,
};
use crate::store::{OtpPurpose, OtpRecord, SellerStore};

pub struct MemoryStore {
    users: RwLock<HashMap<i64, User>>,
    profiles: RwLock<HashMap<i64, SellerProfile>>,
    documents: RwLock<HashMap<i64, Document>>,
    email_otps: RwLock<HashMap<String, OtpRecord>>,
    reset_otps: RwLock<HashMap<String, OtpRecord>>,
    next_user_id: AtomicI64,
    next_profile_id: AtomicI64,
    next_document_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
            documents: RwLock::new(HashMap::new()),
            email_otps: RwLock::new(HashMap::new()),
            reset_otps: RwLock::new(HashMap::new()),
            next_user_id: AtomicI64::new(1),
            next_profile_id: AtomicI64::new(1),
            next_document_id: AtomicI64::new(1),
        }
    }

    fn otp_map(&self, purpose: OtpPurpose) -> &RwLock<HashMap<String, OtpRecord>> {
        match purpose {
            OtpPurpose::EmailVerification => &self.email_otps,
            OtpPurpose::PasswordReset => &self.reset_otps,
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SellerStore for MemoryStore {
    fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let id = self.next_user_id.fetch_add(1, Ordering::SeqCst);
        let user = User {
            id,
            email: new_user.email,
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            is_active: new_user.is_active,
            role: new_user.role,
            created_at: Utc::now(),
        };
        self.users.write().unwrap().insert(id, user.clone());
        Ok(user)
    }

    fn user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    fn user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.users.read().unwrap().get(&id).cloned())
    }

    fn activate_user(&self, id: i64) -> AppResult<()> {
        if let Some(user) = self.users.write().unwrap().get_mut(&id) {
            user.is_active = true;
        }
        Ok(())
    }

    fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()> {
        if let Some(user) = self.users.write().unwrap().get_mut(&user_id) {
            user.password_hash = password_hash.to_string();
        }
        Ok(())
    }

    fn delete_user(&self, id: i64) -> AppResult<bool> {
        let removed = self.users.write().unwrap().remove(&id).is_some();
        if removed {
            let profile_id = {
                let mut profiles = self.profiles.write().unwrap();
                let profile_id = profiles
                    .values()
                    .find(|p| p.user_id == id)
                    .map(|p| p.id);
                if let Some(pid) = profile_id {
                    profiles.remove(&pid);
                }
                profile_id
            };
            if let Some(pid) = profile_id {
                self.documents
                    .write()
                    .unwrap()
                    .retain(|_, d| d.profile_id != pid);
            }
        }
        Ok(removed)
    }

    fn create_profile(&self, new_profile: NewSellerProfile) -> AppResult<SellerProfile> {
        let id = self.next_profile_id.fetch_add(1, Ordering::SeqCst);
        let profile = SellerProfile {
            id,
            user_id: new_profile.user_id,
            factory_name: new_profile.factory_name,
            gstin: new_profile.gstin,
            iec: new_profile.iec,
            mobile: new_profile.mobile,
            address: new_profile.address,
            geo_lat: new_profile.geo_lat,
            geo_long: new_profile.geo_long,
            status: new_profile.status,
            admin_comment: None,
        };
        self.profiles.write().unwrap().insert(id, profile.clone());
        Ok(profile)
    }

    fn profile_by_user(&self, user_id: i64) -> AppResult<Option<SellerProfile>> {
        let profiles = self.profiles.read().unwrap();
        Ok(profiles.values().find(|p| p.user_id == user_id).cloned())
    }

    fn profile_owned_by(&self, profile_id: i64, user_id: i64) -> AppResult<Option<SellerProfile>> {
        let profiles = self.profiles.read().unwrap();
        Ok(profiles
            .get(&profile_id)
            .filter(|p| p.user_id == user_id)
            .cloned())
    }

    fn update_profile(
        &self,
        profile_id: i64,
        changes: &UpdateSellerProfile,
    ) -> AppResult<SellerProfile> {
        let mut profiles = self.profiles.write().unwrap();
        let profile = profiles
            .get_mut(&profile_id)
            .ok_or_else(|| AppError::not_found("Not found"))?;

        if let Some(ref v) = changes.factory_name {
            profile.factory_name = v.clone();
        }
        if let Some(ref v) = changes.mobile {
            profile.mobile = v.clone();
        }
        if let Some(ref v) = changes.gstin {
            profile.gstin = Some(v.clone());
        }
        if let Some(ref v) = changes.iec {
            profile.iec = Some(v.clone());
        }
        if let Some(ref v) = changes.address {
            profile.address = Some(v.clone());
        }
        if let Some(v) = changes.geo_lat {
            profile.geo_lat = Some(v);
        }
        if let Some(v) = changes.geo_long {
            profile.geo_long = Some(v);
        }

        Ok(profile.clone())
    }

    fn set_status(
        &self,
        profile_id: i64,
        status: &str,
        admin_comment: Option<&str>,
    ) -> AppResult<SellerProfile> {
        let mut profiles = self.profiles.write().unwrap();
        let profile = profiles
            .get_mut(&profile_id)
            .ok_or_else(|| AppError::not_found("Not found"))?;

        profile.status = status.to_string();
        if let Some(comment) = admin_comment {
            profile.admin_comment = Some(comment.to_string());
        }

        Ok(profile.clone())
    }

    fn create_document(&self, new_doc: NewDocument) -> AppResult<Document> {
        let id = self.next_document_id.fetch_add(1, Ordering::SeqCst);
        let doc = Document {
            id,
            profile_id: new_doc.profile_id,
            doc_type: new_doc.doc_type,
            file_url: new_doc.file_url,
            uploaded_at: Utc::now(),
        };
        self.documents.write().unwrap().insert(id, doc.clone());
        Ok(doc)
    }

    fn documents_for_profile(&self, profile_id: i64) -> AppResult<Vec<Document>> {
        let documents = self.documents.read().unwrap();
        let mut docs: Vec<Document> = documents
            .values()
            .filter(|d| d.profile_id == profile_id)
            .cloned()
            .collect();
        docs.sort_by_key(|d| d.id);
        Ok(docs)
    }

    fn replace_otp(
        &self,
        purpose: OtpPurpose,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let record = OtpRecord {
            code: code.to_string(),
            created_at: Utc::now(),
            expires_at,
        };
        self.otp_map(purpose)
            .write()
            .unwrap()
            .insert(email.to_string(), record);
        Ok(())
    }

    fn latest_otp(&self, purpose: OtpPurpose, email: &str) -> AppResult<Option<OtpRecord>> {
        Ok(self.otp_map(purpose).read().unwrap().get(email).cloned())
    }
}
