//! API request and response schemas.

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/signup`.
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Request body for `POST /api/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Bearer token issued on signup/login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    /// Wrap a signed JWT in the standard bearer envelope.
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: "bearer".to_string(),
        }
    }
}

/// Response body for `GET /api/sports`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportsResponse {
    pub sports: Vec<String>,
}

/// Response body for `POST /api/analyze-video/{sport}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub sport: String,
    pub analysis: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_envelope() {
        let token = TokenResponse::bearer("abc");
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type, "bearer");
    }
}
