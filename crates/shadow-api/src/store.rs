//! SQLite-backed user store.
//!
//! One table: users (id, email unique, username unique, password_hash,
//! created_at). The orchestrator never touches this; only the auth handlers
//! and the bearer-token extractor read it.

use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::info;

use shadow_models::UserAccount;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already registered")]
    EmailTaken,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// User account store.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    /// Open (creating if needed) the database at `path` and ensure the
    /// users table exists.
    pub async fn connect(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StoreError::Database(sqlx::Error::Io(e))
                })?;
            }
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        info!(path = %path.display(), "User store ready");
        Ok(store)
    }

    /// In-memory store for tests.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                username TEXT NOT NULL UNIQUE,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Create a new account. Uniqueness is checked up front so the caller
    /// gets a specific duplicate error rather than a bare constraint
    /// violation.
    pub async fn create_user(
        &self,
        email: &str,
        username: &str,
        password_hash: &str,
    ) -> Result<UserAccount, StoreError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(StoreError::EmailTaken);
        }
        if self.find_by_username(username).await?.is_some() {
            return Err(StoreError::UsernameTaken);
        }

        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (email, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(email)
        .bind(username)
        .bind(password_hash)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(UserAccount {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, StoreError> {
        let row = sqlx::query(
            "SELECT id, email, username, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(account_from_row).transpose()
    }

    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, StoreError> {
        let row = sqlx::query(
            "SELECT id, email, username, password_hash, created_at FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        row.map(account_from_row).transpose()
    }
}

fn account_from_row(row: sqlx::sqlite::SqliteRow) -> Result<UserAccount, StoreError> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now());

    Ok(UserAccount {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        username: row.try_get("username")?,
        password_hash: row.try_get("password_hash")?,
        created_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_find_round_trip() {
        let store = UserStore::in_memory().await.unwrap();

        let user = store
            .create_user("a@example.com", "alice", "salt$hash")
            .await
            .unwrap();
        assert!(user.id > 0);

        let found = store.find_by_email("a@example.com").await.unwrap().unwrap();
        assert_eq!(found.username, "alice");
        assert_eq!(found.password_hash, "salt$hash");

        assert!(store.find_by_email("b@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_and_username_are_distinct_errors() {
        let store = UserStore::in_memory().await.unwrap();
        store
            .create_user("a@example.com", "alice", "h")
            .await
            .unwrap();

        let err = store
            .create_user("a@example.com", "alice2", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::EmailTaken));

        let err = store
            .create_user("a2@example.com", "alice", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::UsernameTaken));
    }
}
