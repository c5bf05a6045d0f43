use chrono::{DateTime, Utc};
use diesel::prelude::*;

use fabriq_shared::clients::{DbConn, DbPool};
use fabriq_shared::errors::{AppError, AppResult};

use crate::models::{
    Document, EmailOtp, NewDocument, NewEmailOtp, NewPasswordResetOtp, NewSellerProfile, NewUser,
    PasswordResetOtp, SellerProfile, UpdateSellerProfile, User,
};
use crate::schema::{documents, email_otps, password_reset_otps, seller_profiles, users};
use crate::store::{OtpPurpose, OtpRecord, SellerStore};

pub struct PostgresStore {
    pool: DbPool,
}

impl PostgresStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> AppResult<DbConn> {
        self.pool.get().map_err(|e| AppError::internal(e.to_string()))
    }
}

impl SellerStore for PostgresStore {
    fn create_user(&self, new_user: NewUser) -> AppResult<User> {
        let mut conn = self.conn()?;
        let user = diesel::insert_into(users::table)
            .values(&new_user)
            .get_result(&mut conn)?;
        Ok(user)
    }

    fn user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()?;
        Ok(user)
    }

    fn user_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let mut conn = self.conn()?;
        let user = users::table.find(id).first::<User>(&mut conn).optional()?;
        Ok(user)
    }

    fn activate_user(&self, id: i64) -> AppResult<()> {
        let mut conn = self.conn()?;
        diesel::update(users::table.find(id))
            .set(users::is_active.eq(true))
            .execute(&mut conn)?;
        Ok(())
    }

    fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<()> {
        let mut conn = self.conn()?;
        diesel::update(users::table.find(user_id))
            .set(users::password_hash.eq(password_hash))
            .execute(&mut conn)?;
        Ok(())
    }

    fn delete_user(&self, id: i64) -> AppResult<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(users::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn create_profile(&self, new_profile: NewSellerProfile) -> AppResult<SellerProfile> {
        let mut conn = self.conn()?;
        let profile = diesel::insert_into(seller_profiles::table)
            .values(&new_profile)
            .get_result(&mut conn)?;
        Ok(profile)
    }

    fn profile_by_user(&self, user_id: i64) -> AppResult<Option<SellerProfile>> {
        let mut conn = self.conn()?;
        let profile = seller_profiles::table
            .filter(seller_profiles::user_id.eq(user_id))
            .first::<SellerProfile>(&mut conn)
            .optional()?;
        Ok(profile)
    }

    fn profile_owned_by(&self, profile_id: i64, user_id: i64) -> AppResult<Option<SellerProfile>> {
        let mut conn = self.conn()?;
        let profile = seller_profiles::table
            .find(profile_id)
            .filter(seller_profiles::user_id.eq(user_id))
            .first::<SellerProfile>(&mut conn)
            .optional()?;
        Ok(profile)
    }

    fn update_profile(
        &self,
        profile_id: i64,
        changes: &UpdateSellerProfile,
    ) -> AppResult<SellerProfile> {
        let mut conn = self.conn()?;
        if changes.is_empty() {
            let profile = seller_profiles::table
                .find(profile_id)
                .first::<SellerProfile>(&mut conn)?;
            return Ok(profile);
        }
        let profile = diesel::update(seller_profiles::table.find(profile_id))
            .set(changes)
            .get_result(&mut conn)?;
        Ok(profile)
    }

    fn set_status(
        &self,
        profile_id: i64,
        status: &str,
        admin_comment: Option<&str>,
    ) -> AppResult<SellerProfile> {
        let mut conn = self.conn()?;
        let profile = match admin_comment {
            Some(comment) => diesel::update(seller_profiles::table.find(profile_id))
                .set((
                    seller_profiles::status.eq(status),
                    seller_profiles::admin_comment.eq(comment),
                ))
                .get_result(&mut conn)?,
            None => diesel::update(seller_profiles::table.find(profile_id))
                .set(seller_profiles::status.eq(status))
                .get_result(&mut conn)?,
        };
        Ok(profile)
    }

    fn create_document(&self, new_doc: NewDocument) -> AppResult<Document> {
        let mut conn = self.conn()?;
        let doc = diesel::insert_into(documents::table)
            .values(&new_doc)
            .get_result(&mut conn)?;
        Ok(doc)
    }

    fn documents_for_profile(&self, profile_id: i64) -> AppResult<Vec<Document>> {
        let mut conn = self.conn()?;
        let docs = documents::table
            .filter(documents::profile_id.eq(profile_id))
            .order(documents::id.asc())
            .load::<Document>(&mut conn)?;
        Ok(docs)
    }

    fn replace_otp(
        &self,
        purpose: OtpPurpose,
        email: &str,
        code: &str,
        expires_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let mut conn = self.conn()?;
        let now = Utc::now();
        match purpose {
            OtpPurpose::EmailVerification => {
                let row = NewEmailOtp {
                    email: email.to_string(),
                    code: code.to_string(),
                    created_at: now,
                    expires_at,
                };
                diesel::insert_into(email_otps::table)
                    .values(&row)
                    .on_conflict(email_otps::email)
                    .do_update()
                    .set((
                        email_otps::code.eq(code),
                        email_otps::created_at.eq(now),
                        email_otps::expires_at.eq(expires_at),
                    ))
                    .execute(&mut conn)?;
            }
            OtpPurpose::PasswordReset => {
                let row = NewPasswordResetOtp {
                    email: email.to_string(),
                    code: code.to_string(),
                    created_at: now,
                    expires_at,
                };
                diesel::insert_into(password_reset_otps::table)
                    .values(&row)
                    .on_conflict(password_reset_otps::email)
                    .do_update()
                    .set((
                        password_reset_otps::code.eq(code),
                        password_reset_otps::created_at.eq(now),
                        password_reset_otps::expires_at.eq(expires_at),
                    ))
                    .execute(&mut conn)?;
            }
        }
        Ok(())
    }

    fn latest_otp(&self, purpose: OtpPurpose, email: &str) -> AppResult<Option<OtpRecord>> {
        let mut conn = self.conn()?;
        let record = match purpose {
            OtpPurpose::EmailVerification => email_otps::table
                .filter(email_otps::email.eq(email))
                .order(email_otps::created_at.desc())
                .first::<EmailOtp>(&mut conn)
                .optional()?
                .map(|row| OtpRecord {
                    code: row.code,
                    created_at: row.created_at,
                    expires_at: row.expires_at,
                }),
            OtpPurpose::PasswordReset => password_reset_otps::table
                .filter(password_reset_otps::email.eq(email))
                .order(password_reset_otps::created_at.desc())
                .first::<PasswordResetOtp>(&mut conn)
                .optional()?
                .map(|row| OtpRecord {
                    code: row.code,
                    created_at: row.created_at,
                    expires_at: row.expires_at,
                }),
        };
        Ok(record)
    }
}
