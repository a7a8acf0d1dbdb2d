//! Shared data models for the ShadowSync backend.
//!
//! This crate provides Serde-serializable types for:
//! - Sport definitions (prompt + reference video)
//! - Remote asset handles and readiness states
//! - Inference request parts
//! - API request/response schemas
//! - User account records

pub mod api;
pub mod asset;
pub mod inference;
pub mod sport;
pub mod user;

// Re-export common types
pub use api::{AnalysisResponse, LoginRequest, SignupRequest, SportsResponse, TokenResponse};
pub use asset::{AssetState, AssetStatus, RemoteAsset};
pub use inference::InferencePart;
pub use sport::{AnalysisResult, SportDefinition};
pub use user::{UserAccount, UserProfile};
