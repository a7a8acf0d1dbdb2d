//! Wire types for the Gemini REST API.

use serde::{Deserialize, Serialize};

use shadow_models::{AssetState, InferencePart};

/// Processing state as reported by the File API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum FileState {
    #[serde(rename = "STATE_UNSPECIFIED")]
    #[default]
    Unspecified,
    #[serde(rename = "PROCESSING")]
    Processing,
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "FAILED")]
    Failed,
}

impl From<FileState> for AssetState {
    fn from(state: FileState) -> Self {
        match state {
            FileState::Active => AssetState::Active,
            FileState::Failed => AssetState::Failed,
            FileState::Processing | FileState::Unspecified => AssetState::Pending,
        }
    }
}

/// Error detail attached to a FAILED file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileError {
    #[serde(default)]
    pub message: String,
}

/// File resource returned by upload and `files.get`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileMetadata {
    pub name: String,
    #[serde(default)]
    pub uri: String,
    #[serde(rename = "mimeType", default)]
    pub mime_type: String,
    #[serde(default)]
    pub state: FileState,
    pub error: Option<FileError>,
}

/// Envelope of the multipart media upload response.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub file: FileMetadata,
}

/// Metadata part sent alongside the file bytes in a multipart upload.
#[derive(Debug, Serialize)]
pub struct UploadMetadata {
    pub file: UploadFileInfo,
}

#[derive(Debug, Serialize)]
pub struct UploadFileInfo {
    #[serde(rename = "displayName")]
    pub display_name: String,
}

/// `generateContent` request body.
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

/// One content part; either inline text or a reference to an uploaded file.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FileData {
        #[serde(rename = "fileData")]
        file_data: FileData,
    },
}

#[derive(Debug, Serialize)]
pub struct FileData {
    #[serde(rename = "mimeType")]
    pub mime_type: String,
    #[serde(rename = "fileUri")]
    pub file_uri: String,
}

impl From<&InferencePart> for Part {
    fn from(part: &InferencePart) -> Self {
        match part {
            InferencePart::Text(text) => Part::Text { text: text.clone() },
            InferencePart::Media { uri, mime_type } => Part::FileData {
                file_data: FileData {
                    mime_type: mime_type.clone(),
                    file_uri: uri.clone(),
                },
            },
        }
    }
}

/// `generateContent` response body.
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_state_maps_to_asset_state() {
        assert_eq!(AssetState::from(FileState::Processing), AssetState::Pending);
        assert_eq!(AssetState::from(FileState::Active), AssetState::Active);
        assert_eq!(AssetState::from(FileState::Failed), AssetState::Failed);
        assert_eq!(
            AssetState::from(FileState::Unspecified),
            AssetState::Pending
        );
    }

    #[test]
    fn parts_serialize_with_camel_case_keys() {
        let part = Part::from(&InferencePart::media("files/abc", "video/mp4"));
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["fileData"]["fileUri"], "files/abc");
        assert_eq!(json["fileData"]["mimeType"], "video/mp4");
    }
}
