//! Inference request content parts.

use serde::{Deserialize, Serialize};

/// One ordered part of a multimodal inference request.
///
/// Part order is semantic: the prompt text instructs the model which of the
/// following media parts is the user's video and which is the reference, so
/// callers must preserve prompt-then-user-then-reference ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferencePart {
    /// Plain text (the analysis prompt).
    Text(String),
    /// A reference to a previously uploaded remote asset.
    Media { uri: String, mime_type: String },
}

impl InferencePart {
    /// Text part from anything string-like.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Media part referencing a remote asset.
    pub fn media(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Media {
            uri: uri.into(),
            mime_type: mime_type.into(),
        }
    }
}
