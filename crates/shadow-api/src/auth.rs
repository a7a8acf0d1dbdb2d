//! Bearer-token session authentication.
//!
//! Tokens are HS256 JWTs with the account email as subject and a fixed TTL.
//! No revocation or refresh; expiry is the only invalidation.

use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use shadow_models::UserAccount;

use crate::error::ApiError;
use crate::state::AppState;

/// Session token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email.
    pub sub: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expiration (Unix seconds).
    pub exp: i64,
}

/// Issues and validates session tokens.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Sign a token for `subject` expiring after the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| ApiError::internal(format!("failed to sign token: {}", e)))
    }

    /// Validate a token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| ApiError::unauthorized("Could not validate credentials"))
    }
}

/// Authenticated user extracted from the bearer token.
///
/// The token subject is resolved against the user store, so a token for a
/// deleted account does not authenticate.
#[derive(Debug, Clone)]
pub struct AuthUser(pub UserAccount);

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::unauthorized("Invalid Authorization header format"))?;

        let claims = state.auth.verify(token)?;

        let account = state
            .users
            .find_by_email(&claims.sub)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Could not validate credentials"))?;

        Ok(AuthUser(account))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_verify() {
        let issuer = TokenIssuer::new("secret", Duration::from_secs(60));
        let token = issuer.issue("a@example.com").unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "a@example.com");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn tokens_from_another_secret_are_rejected() {
        let issuer = TokenIssuer::new("secret", Duration::from_secs(60));
        let other = TokenIssuer::new("different", Duration::from_secs(60));
        let token = other.issue("a@example.com").unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let issuer = TokenIssuer::new("secret", Duration::from_secs(60));
        assert!(issuer.verify("not-a-jwt").is_err());
    }
}
