//! Gemini API client.

use reqwest::multipart::{Form, Part as MultipartPart};
use reqwest::Client;
use tracing::{debug, info};

use shadow_models::{AssetStatus, InferencePart, RemoteAsset};

use crate::error::{GeminiError, GeminiResult};
use crate::types::{
    Content, FileMetadata, GenerateContentRequest, GenerateContentResponse, Part, UploadFileInfo,
    UploadMetadata, UploadResponse,
};

/// Default public endpoint for the Gemini REST API.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini File API and `generateContent`.
///
/// Holds an API key and a target model. The base URL is injectable so tests
/// can point the client at a local mock server.
pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create a new client against the public Gemini endpoint.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Override the base URL (used by tests with a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Upload a file to the Gemini File API via multipart media upload.
    ///
    /// Returns the remote asset in whatever state the service reports,
    /// normally still processing. An outright rejection (4xx) becomes
    /// [`GeminiError::UploadRejected`].
    pub async fn upload_file(
        &self,
        bytes: Vec<u8>,
        display_name: &str,
        mime_type: &str,
    ) -> GeminiResult<RemoteAsset> {
        let url = format!(
            "{}/upload/v1beta/files?uploadType=multipart&key={}",
            self.base_url, self.api_key
        );

        let metadata = UploadMetadata {
            file: UploadFileInfo {
                display_name: display_name.to_string(),
            },
        };
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| GeminiError::InvalidResponse(format!("metadata encode: {}", e)))?;

        let form = Form::new()
            .part(
                "metadata",
                MultipartPart::text(metadata_json)
                    .mime_str("application/json")
                    .map_err(|e| GeminiError::InvalidResponse(e.to_string()))?,
            )
            .part(
                "file",
                MultipartPart::bytes(bytes)
                    .file_name(display_name.to_string())
                    .mime_str(mime_type)
                    .map_err(|e| GeminiError::InvalidResponse(e.to_string()))?,
            );

        debug!(display_name, mime_type, "Uploading file to Gemini");

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        if status.is_client_error() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GeminiError::UploadRejected {
                status: status.as_u16(),
                detail,
            });
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let upload: UploadResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidResponse(format!("upload response: {}", e)))?;

        info!(handle = %upload.file.name, state = ?upload.file.state, "File uploaded");
        Ok(asset_from_metadata(upload.file, mime_type))
    }

    /// Read the current processing state of an uploaded file.
    ///
    /// This is a single non-blocking state read; the caller owns any
    /// polling loop built on top of it.
    pub async fn get_file(&self, handle: &str) -> GeminiResult<AssetStatus> {
        let url = format!("{}/v1beta/{}?key={}", self.base_url, handle, self.api_key);

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let file: FileMetadata = response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidResponse(format!("file response: {}", e)))?;

        Ok(AssetStatus {
            state: file.state.into(),
            error: file.error.map(|e| e.message),
        })
    }

    /// Issue a single `generateContent` call with the given ordered parts.
    ///
    /// Part order is preserved exactly as given. Returns the text of the
    /// first candidate.
    pub async fn generate(&self, parts: &[InferencePart]) -> GeminiResult<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: parts.iter().map(Part::from).collect(),
            }],
        };

        debug!(model = %self.model, parts = parts.len(), "Calling generateContent");

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api {
                status: status.as_u16(),
                detail,
            });
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GeminiError::InvalidResponse(format!("generate response: {}", e)))?;

        let text = body
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .ok_or_else(|| GeminiError::InvalidResponse("no candidates in response".into()))?;

        Ok(text)
    }
}

/// Build a [`RemoteAsset`] from upload metadata, falling back to the local
/// MIME type when the service omits one.
fn asset_from_metadata(file: FileMetadata, fallback_mime: &str) -> RemoteAsset {
    let mime_type = if file.mime_type.is_empty() {
        fallback_mime.to_string()
    } else {
        file.mime_type
    };
    RemoteAsset {
        handle: file.name,
        uri: file.uri,
        mime_type,
        state: file.state.into(),
        error: file.error.map(|e| e.message),
    }
}
