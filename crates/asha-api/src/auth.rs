//! Password hashing and bearer-token authentication.
//!
//! Passwords never leave this module in plaintext; tokens are HS256 JWTs
//! carrying the worker's login handle and a 30-day expiry. Every protected
//! handler receives the resolved worker through the [`AuthWorker`] extractor,
//! so a missing, tampered, or expired token is rejected uniformly.

use crate::db::schema::Worker;
use crate::error::ApiError;
use crate::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const TOKEN_LIFETIME_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, ApiError> {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|err| ApiError::Internal(format!("password hashing failed: {err}")))
}

pub fn verify_password(password: &str, hashed: &str) -> bool {
    bcrypt::verify(password, hashed).unwrap_or(false)
}

pub fn create_token(username: &str, secret: &str) -> Result<String, ApiError> {
    create_token_with_expiry(username, secret, Utc::now() + Duration::days(TOKEN_LIFETIME_DAYS))
}

pub fn create_token_with_expiry(
    username: &str,
    secret: &str,
    expires_at: DateTime<Utc>,
) -> Result<String, ApiError> {
    let claims = Claims {
        sub: username.to_string(),
        exp: expires_at.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| ApiError::Internal(format!("token signing failed: {err}")))
}

/// Verify signature and expiry, returning the embedded login handle.
pub fn decode_token(token: &str, secret: &str) -> Option<String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims.sub)
}

/// The authenticated worker resolved from the request's bearer token.
pub struct AuthWorker(pub Worker);

#[axum::async_trait]
impl FromRequestParts<Arc<AppState>> for AuthWorker {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;
        let username = decode_token(token, &state.config.jwt_secret)
            .ok_or(ApiError::Unauthorized("Invalid authentication credentials"))?;
        let worker = state
            .store
            .find_worker_by_username(&username)
            .await?
            .ok_or(ApiError::Unauthorized("User not found"))?;
        Ok(AuthWorker(worker))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_password_hash_round_trip() {
        let hashed = hash_password("correct horse").expect("hash");
        assert_ne!(hashed, "correct horse");
        assert!(verify_password("correct horse", &hashed));
        assert!(!verify_password("battery staple", &hashed));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_token_round_trip() {
        let token = create_token("priyasharma", SECRET).expect("token");
        assert_eq!(decode_token(&token, SECRET).as_deref(), Some("priyasharma"));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token =
            create_token_with_expiry("priyasharma", SECRET, Utc::now() - Duration::hours(1))
                .expect("token");
        assert!(decode_token(&token, SECRET).is_none());
    }

    #[test]
    fn test_tampered_token_rejected() {
        let token = create_token("priyasharma", SECRET).expect("token");
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(decode_token(&tampered, SECRET).is_none());
        assert!(decode_token(&token, "other-secret").is_none());
    }
}
