//! Signup, login, and profile handlers.

use axum::extract::State;
use axum::Json;
use tracing::info;

use shadow_models::{LoginRequest, SignupRequest, TokenResponse, UserProfile};

use crate::auth::AuthUser;
use crate::credentials::{hash_password, verify_password};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Register a new account and return a session token.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> ApiResult<Json<TokenResponse>> {
    validate_signup(&request)?;

    let password_hash = hash_password(&request.password);
    let user = state
        .users
        .create_user(&request.email, &request.username, &password_hash)
        .await?;

    info!(user_id = user.id, "User registered");

    let token = state.auth.issue(&user.email)?;
    Ok(Json(TokenResponse::bearer(token)))
}

/// Exchange email and password for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    let user = state.users.find_by_email(&request.email).await?;

    // One rejection path for both unknown email and wrong password.
    let user = match user {
        Some(user) if verify_password(&request.password, &user.password_hash) => user,
        _ => return Err(ApiError::unauthorized("Incorrect email or password")),
    };

    let token = state.auth.issue(&user.email)?;
    Ok(Json(TokenResponse::bearer(token)))
}

/// Return the authenticated user's profile.
pub async fn me(AuthUser(account): AuthUser) -> Json<UserProfile> {
    Json(account.profile())
}

fn validate_signup(request: &SignupRequest) -> ApiResult<()> {
    let email = request.email.trim();
    if email.is_empty() || !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    if request.username.trim().is_empty() {
        return Err(ApiError::bad_request("Username must not be empty"));
    }
    if request.password.is_empty() {
        return Err(ApiError::bad_request("Password must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, username: &str, password: &str) -> SignupRequest {
        SignupRequest {
            email: email.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(validate_signup(&request("nope", "alice", "pw")).is_err());
        assert!(validate_signup(&request("@nope", "alice", "pw")).is_err());
        assert!(validate_signup(&request("a@example.com", "alice", "pw")).is_ok());
    }

    #[test]
    fn rejects_empty_username_and_password() {
        assert!(validate_signup(&request("a@example.com", " ", "pw")).is_err());
        assert!(validate_signup(&request("a@example.com", "alice", "")).is_err());
    }
}
