//! Video analysis handler.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use tracing::info;

use shadow_analysis::UserVideo;
use shadow_models::AnalysisResponse;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Multipart field carrying the user's video.
const VIDEO_FIELD: &str = "user_video";

/// Compare an uploaded video against the sport's reference video.
///
/// The request is all-or-nothing: the orchestrator either returns the full
/// analysis text or a typed error that maps to 400/500 with an explanatory
/// detail string.
pub async fn analyze_video(
    State(state): State<AppState>,
    Path(sport): Path<String>,
    AuthUser(account): AuthUser,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalysisResponse>> {
    let mut video: Option<UserVideo> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let file_name = field
            .file_name()
            .unwrap_or("upload.mp4")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Malformed upload: {}", e)))?
            .to_vec();

        video = Some(UserVideo { file_name, bytes });
    }

    let video = video
        .ok_or_else(|| ApiError::bad_request(format!("Missing '{}' file field", VIDEO_FIELD)))?;
    if video.bytes.is_empty() {
        return Err(ApiError::bad_request("Uploaded video is empty"));
    }

    info!(
        sport,
        user_id = account.id,
        size = video.bytes.len(),
        "Received analysis request"
    );

    let result = state
        .orchestrator
        .analyze(&sport, &account.id.to_string(), video)
        .await?;

    Ok(Json(AnalysisResponse {
        sport: result.sport,
        analysis: result.analysis,
    }))
}
