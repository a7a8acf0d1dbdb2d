//! Axum HTTP API server for ShadowSync.
//!
//! This crate provides:
//! - Signup/login with JWT bearer sessions backed by a SQLite user table
//! - The public sport list
//! - The authenticated video analysis endpoint

pub mod auth;
pub mod config;
pub mod credentials;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
