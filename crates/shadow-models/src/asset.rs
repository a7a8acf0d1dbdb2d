//! Remote asset handles and readiness states.
//!
//! A remote asset is a file uploaded to the inference service's file store.
//! It is identified by an opaque handle and progresses through a small
//! readiness state machine that the orchestrator observes via polling.

use serde::{Deserialize, Serialize};

/// Readiness state of a remote asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssetState {
    /// The remote service is still processing the upload.
    #[default]
    Pending,
    /// The asset is ready to be referenced in an inference request.
    Active,
    /// The remote service could not process the asset.
    Failed,
}

impl AssetState {
    /// Returns the state as a string for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Failed => "failed",
        }
    }

    /// Returns true if the state is terminal (active or failed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Active | Self::Failed)
    }
}

impl std::fmt::Display for AssetState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file tracked by the remote inference service.
///
/// Created by an upload call; the state only changes via polling. The
/// orchestrator never mutates a remote asset directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteAsset {
    /// Opaque handle issued by the remote service (e.g. `files/abc123`).
    pub handle: String,
    /// Resolvable locator for the asset, used in inference requests.
    pub uri: String,
    /// MIME type reported by the remote service.
    pub mime_type: String,
    /// Current readiness state.
    pub state: AssetState,
    /// Diagnostic from the remote service when processing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Snapshot of an asset's readiness returned by a single poll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetStatus {
    pub state: AssetState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_not_terminal() {
        assert!(!AssetState::Pending.is_terminal());
        assert!(AssetState::Active.is_terminal());
        assert!(AssetState::Failed.is_terminal());
    }

    #[test]
    fn state_display_matches_as_str() {
        assert_eq!(AssetState::Active.to_string(), "active");
        assert_eq!(AssetState::Failed.as_str(), "failed");
    }
}
