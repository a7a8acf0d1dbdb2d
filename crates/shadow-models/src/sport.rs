//! Sport definitions and analysis results.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A sport supported by the comparison service.
///
/// Definitions are immutable after catalog load. The reference video is a
/// curated clip of a professional athlete that user uploads are compared
/// against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SportDefinition {
    /// Stable identifier used in API paths (e.g. "basketball").
    pub id: String,
    /// Prompt sent to the model describing how to compare the two videos.
    pub analysis_prompt: String,
    /// Path to the curated reference video on local disk.
    pub reference_video: PathBuf,
}

/// Result of a completed video comparison.
///
/// Not persisted; returned to the caller and discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sport the analysis was performed for.
    pub sport: String,
    /// Free-form analysis text from the model, including a similarity score.
    pub analysis: String,
}
