//! User account records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user as stored in the database.
///
/// The password hash never leaves the API crate; handlers convert to
/// [`UserProfile`] before responding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Public view of the account, safe to return to the client.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
        }
    }
}

/// Public user profile returned by `GET /api/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub username: String,
}
