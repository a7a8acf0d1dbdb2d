//! Static sport catalog.
//!
//! Maps a sport identifier to its analysis prompt and curated reference
//! video. Loaded once at startup and never mutated; lookups are pure reads
//! so the catalog is safe for unlimited concurrent readers behind an `Arc`.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use shadow_models::SportDefinition;

use crate::error::AnalysisError;

const BASKETBALL_PROMPT: &str = "Describe the basketball shooting form compared to the player in the video on the Golden State Warriors \
with the number 30 jersey (Stephen Curry). Compare elements like guide hand, follow-through, shooting stance, \
footwork, release speed, and overall fluidity. Provide a similarity score (percentage) and highlight strengths, \
differences, and areas for improvement. If the uploaded video doesn't depict a basketball shooting motion, reject it.";

const SOCCER_PROMPT: &str = "Analyze the soccer shooting or passing technique compared to a professional player's form. \
Evaluate aspects such as body alignment, foot placement, follow-through, balance, and accuracy. \
Include comments on approach angle and timing. Provide a similarity score (percentage) and give feedback \
on how to improve the user's shooting or passing technique. \
If the uploaded video does not show a soccer shooting or passing action, reject it.";

const BOXING_PROMPT: &str = "Analyze the boxing technique compared to that of a professional boxer. Focus on stance, guard position, \
punch form (jab, cross, hook, uppercut), hip rotation, and defensive movements. \
Provide a similarity score (percentage) and explain where the user's technique aligns with or differs from \
a professional's form. Suggest targeted improvements for power, precision, and defense. \
If the uploaded video does not show a boxing action, reject it.";

const GOLF_PROMPT: &str = "Analyze the golf swing form compared to that of a professional golfer. Evaluate grip, stance, backswing, \
downswing, impact, and follow-through. Comment on balance, swing plane, tempo, and consistency. \
Provide a similarity score (percentage) and detailed suggestions for improving swing mechanics and accuracy. \
If the uploaded video does not show a golf swing, reject it.";

/// Errors while loading a catalog from disk.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read sports config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse sports config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("sports config contains no sports")]
    Empty,
}

/// Entry shape of an external sports config file.
#[derive(Debug, Deserialize)]
struct SportEntry {
    id: String,
    analysis_prompt: String,
    reference_video: String,
}

/// Read-only mapping of sport id to definition, in insertion order.
#[derive(Debug, Clone)]
pub struct SportCatalog {
    sports: Vec<SportDefinition>,
}

impl SportCatalog {
    /// Build a catalog from pre-assembled definitions.
    pub fn from_definitions(sports: Vec<SportDefinition>) -> Self {
        Self { sports }
    }

    /// The built-in sport set, with reference videos resolved against
    /// `reference_dir`.
    pub fn builtin(reference_dir: &Path) -> Self {
        let sports = [
            ("basketball", BASKETBALL_PROMPT, "stephShot.mp4"),
            ("soccer", SOCCER_PROMPT, "ronaldoKick.mp4"),
            ("boxing", BOXING_PROMPT, "tysonUppercut.mp4"),
            ("golf", GOLF_PROMPT, "tigerSwing.mp4"),
        ]
        .into_iter()
        .map(|(id, prompt, video)| SportDefinition {
            id: id.to_string(),
            analysis_prompt: prompt.to_string(),
            reference_video: reference_dir.join(video),
        })
        .collect();

        Self { sports }
    }

    /// Load a catalog from a JSON file so new sports need no code changes.
    ///
    /// Relative `reference_video` entries are resolved against
    /// `reference_dir`.
    pub fn from_json_file(path: &Path, reference_dir: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<SportEntry> = serde_json::from_str(&raw)?;
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }

        let sports = entries
            .into_iter()
            .map(|e| {
                let video = Path::new(&e.reference_video);
                let reference_video = if video.is_absolute() {
                    video.to_path_buf()
                } else {
                    reference_dir.join(video)
                };
                SportDefinition {
                    id: e.id,
                    analysis_prompt: e.analysis_prompt,
                    reference_video,
                }
            })
            .collect();

        Ok(Self { sports })
    }

    /// Look up a sport by id.
    pub fn lookup(&self, sport_id: &str) -> Result<&SportDefinition, AnalysisError> {
        self.sports
            .iter()
            .find(|s| s.id == sport_id)
            .ok_or_else(|| AnalysisError::UnknownSport {
                sport: sport_id.to_string(),
            })
    }

    /// Sport ids in catalog insertion order, stable across calls.
    pub fn list(&self) -> Vec<&str> {
        self.sports.iter().map(|s| s.id.as_str()).collect()
    }
}
