//! Transport traits for the remote file store and inference call.
//!
//! The orchestrator owns the retry/backoff loop; these traits expose only
//! single-shot operations so polling policy stays testable independent of
//! the Gemini transport.

use async_trait::async_trait;
use thiserror::Error;

use shadow_gemini::{GeminiClient, GeminiError};
use shadow_models::{AssetStatus, InferencePart, RemoteAsset};

/// Errors surfaced by a gateway implementation.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The remote service refused the payload outright at upload time.
    #[error("Upload rejected: {0}")]
    UploadRejected(String),

    /// Transport or service failure.
    #[error("Remote service error: {0}")]
    Transport(String),
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::UploadRejected { detail, .. } => Self::UploadRejected(detail),
            other => Self::Transport(other.to_string()),
        }
    }
}

/// Uploads byte blobs to the remote file store and reads back their
/// processing state.
#[async_trait]
pub trait AssetGateway: Send + Sync {
    /// Upload a blob; returns the asset handle with its initial state.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        display_name: &str,
        mime_type: &str,
    ) -> Result<RemoteAsset, GatewayError>;

    /// Single non-blocking state read for a previously uploaded asset.
    async fn poll(&self, handle: &str) -> Result<AssetStatus, GatewayError>;
}

/// Issues one multimodal inference call over ordered content parts.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, parts: &[InferencePart]) -> Result<String, GatewayError>;
}

#[async_trait]
impl AssetGateway for GeminiClient {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        display_name: &str,
        mime_type: &str,
    ) -> Result<RemoteAsset, GatewayError> {
        Ok(self.upload_file(bytes, display_name, mime_type).await?)
    }

    async fn poll(&self, handle: &str) -> Result<AssetStatus, GatewayError> {
        Ok(self.get_file(handle).await?)
    }
}

#[async_trait]
impl InferenceClient for GeminiClient {
    async fn generate(&self, parts: &[InferencePart]) -> Result<String, GatewayError> {
        Ok(GeminiClient::generate(self, parts).await?)
    }
}
