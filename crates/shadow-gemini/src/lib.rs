//! Gemini HTTP client for the ShadowSync backend.
//!
//! This crate wraps the two Gemini surfaces the orchestrator needs:
//! - The File API: upload a video, read back its processing state
//! - `generateContent`: one multimodal call referencing uploaded files
//!
//! The client never loops or retries; readiness polling policy belongs to
//! the analysis orchestrator.

pub mod client;
pub mod error;
mod types;

pub use client::GeminiClient;
pub use error::{GeminiError, GeminiResult};
