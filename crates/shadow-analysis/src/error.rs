//! Analysis error taxonomy.

use thiserror::Error;

/// Which side of the comparison failed remote processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedAsset {
    User,
    Reference,
    Both,
}

impl FailedAsset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Reference => "reference",
            Self::Both => "both",
        }
    }
}

/// Errors raised by the analysis workflow.
///
/// All variants are terminal for the request; the orchestrator never
/// retries. Retry, if desired, is a caller concern.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The requested sport is not in the catalog.
    #[error("Unsupported sport: {sport}")]
    UnknownSport { sport: String },

    /// The curated reference video is not available on disk.
    #[error("Reference video for {sport} not found")]
    ReferenceAssetMissing { sport: String },

    /// The remote service reported FAILED for one or both assets.
    /// `detail` already attributes the failure and, for user-side
    /// failures, includes remediation guidance.
    #[error("{detail}")]
    AssetProcessingFailed { who: FailedAsset, detail: String },

    /// Neither terminal state was reached within the polling ceiling.
    #[error("File processing timeout")]
    ProcessingTimeout,

    /// The single inference call failed. Not retried: the call is not
    /// assumed idempotent given billing/quota side effects.
    #[error("Analysis service error: {detail}")]
    InferenceFailed { detail: String },

    /// Upload or poll transport failure.
    #[error(transparent)]
    Gateway(#[from] crate::gateway::GatewayError),

    /// Failed to stage the user upload locally.
    #[error("Failed to stage upload: {0}")]
    Io(#[from] std::io::Error),
}
