use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use fabriq_shared::errors::AppError;
use fabriq_shared::types::auth::{Claims, TokenKind, TokenPair, UserRole};

fn mint(
    user_id: i64,
    role: UserRole,
    kind: TokenKind,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, role, kind, ttl_secs);
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(format!("JWT encoding failed: {e}")))
}

pub fn create_access_token(
    user_id: i64,
    role: UserRole,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    mint(user_id, role, TokenKind::Access, secret, ttl_secs)
}

pub fn create_refresh_token(
    user_id: i64,
    role: UserRole,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, AppError> {
    mint(user_id, role, TokenKind::Refresh, secret, ttl_secs)
}

pub fn create_token_pair(
    user_id: i64,
    role: UserRole,
    secret: &str,
    access_ttl: i64,
    refresh_ttl: i64,
) -> Result<TokenPair, AppError> {
    let access = create_access_token(user_id, role, secret, access_ttl)?;
    let refresh = create_refresh_token(user_id, role, secret, refresh_ttl)?;
    Ok(TokenPair::new(access, refresh))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized(format!("invalid token: {e}")))
}
