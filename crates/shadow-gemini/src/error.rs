//! Gemini client error types.

use thiserror::Error;

pub type GeminiResult<T> = Result<T, GeminiError>;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// The File API refused the payload at upload time. Distinct from a
    /// later FAILED processing state observed via polling.
    #[error("upload rejected ({status}): {detail}")]
    UploadRejected { status: u16, detail: String },

    /// Non-success response from any other Gemini endpoint.
    #[error("Gemini API returned {status}: {detail}")]
    Api { status: u16, detail: String },

    /// Network or protocol failure before a response was received.
    #[error("Gemini request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected Gemini response: {0}")]
    InvalidResponse(String),
}
