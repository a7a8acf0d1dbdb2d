//! The dual-asset analysis orchestrator.
//!
//! Drives one request end to end: upload the curated reference video and the
//! user's video to the remote file store, poll both until ACTIVE under a
//! hard ceiling, then issue a single multimodal inference call. The locally
//! staged copy of the user's upload is deleted on every exit path, including
//! cancellation of the request future.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};
use uuid::Uuid;

use shadow_models::{AnalysisResult, AssetState, AssetStatus, InferencePart, RemoteAsset};

use crate::catalog::SportCatalog;
use crate::error::{AnalysisError, FailedAsset};
use crate::gateway::{AssetGateway, InferenceClient};

/// Fixed sleep between readiness polls. Deliberately simple; no backoff.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Hard ceiling on the number of polling ticks per request. The remote
/// service's processing latency is unbounded, so the HTTP caller needs a
/// deterministic upper bound on request latency.
pub const MAX_POLL_TICKS: u32 = 60;

/// A user-submitted video scoped to one request.
#[derive(Debug)]
pub struct UserVideo {
    /// Original file name as submitted (used for the staged copy and the
    /// remote display name).
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Orchestrates the per-request analysis workflow.
pub struct AnalysisOrchestrator {
    catalog: Arc<SportCatalog>,
    gateway: Arc<dyn AssetGateway>,
    inference: Arc<dyn InferenceClient>,
    tmp_dir: PathBuf,
    poll_interval: Duration,
    max_poll_ticks: u32,
}

impl AnalysisOrchestrator {
    pub fn new(
        catalog: Arc<SportCatalog>,
        gateway: Arc<dyn AssetGateway>,
        inference: Arc<dyn InferenceClient>,
        tmp_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            inference,
            tmp_dir: tmp_dir.into(),
            poll_interval: POLL_INTERVAL,
            max_poll_ticks: MAX_POLL_TICKS,
        }
    }

    /// Override polling parameters (tests only use shorter intervals; the
    /// production values are [`POLL_INTERVAL`] and [`MAX_POLL_TICKS`]).
    pub fn with_polling(mut self, interval: Duration, max_ticks: u32) -> Self {
        self.poll_interval = interval;
        self.max_poll_ticks = max_ticks;
        self
    }

    /// Run one full analysis for `requester`.
    ///
    /// All errors are terminal for this request; nothing is retried here.
    pub async fn analyze(
        &self,
        sport_id: &str,
        requester: &str,
        video: UserVideo,
    ) -> Result<AnalysisResult, AnalysisError> {
        let sport = self.catalog.lookup(sport_id)?;

        // The reference set is expected to be present but is still external
        // state; check it at call time rather than trusting deployment.
        let reference_bytes = tokio::fs::read(&sport.reference_video).await.map_err(|e| {
            warn!(sport = %sport.id, path = %sport.reference_video.display(), error = %e, "Reference video unavailable");
            AnalysisError::ReferenceAssetMissing {
                sport: sport.id.clone(),
            }
        })?;

        info!(sport = %sport.id, requester, "Starting analysis");

        let reference_name = sport
            .reference_video
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("reference.mp4")
            .to_string();
        let reference_asset = self
            .gateway
            .upload(reference_bytes, &reference_name, &guess_mime(&reference_name))
            .await?;

        // Stage the user's bytes under a per-request unique name. The guard
        // deletes the file when it drops, which also covers cancellation of
        // this future.
        let staged = StagedUpload::create(&self.tmp_dir, requester, &video.file_name, &video.bytes)
            .await?;

        let user_mime = guess_mime(&video.file_name);
        let user_asset = self
            .gateway
            .upload(video.bytes, &video.file_name, &user_mime)
            .await?;

        self.wait_until_active(&user_asset, &reference_asset).await?;

        // Prompt first, then the user's video, then the reference. The
        // prompt tells the model which asset is which, so this ordering is
        // semantic and must not change.
        let parts = [
            InferencePart::text(sport.analysis_prompt.clone()),
            InferencePart::media(user_asset.uri.clone(), user_asset.mime_type.clone()),
            InferencePart::media(
                reference_asset.uri.clone(),
                reference_asset.mime_type.clone(),
            ),
        ];

        let analysis = self
            .inference
            .generate(&parts)
            .await
            .map_err(|e| AnalysisError::InferenceFailed {
                detail: e.to_string(),
            })?;

        info!(sport = %sport.id, requester, "Analysis complete");
        drop(staged);

        Ok(AnalysisResult {
            sport: sport.id.clone(),
            analysis,
        })
    }

    /// Readiness polling loop.
    ///
    /// One state read per asset per tick, fixed 1-tick sleep between polls.
    /// Terminates when both assets are ACTIVE, when either is FAILED, or
    /// when the tick ceiling is exhausted. All-or-nothing; no partial
    /// results.
    async fn wait_until_active(
        &self,
        user: &RemoteAsset,
        reference: &RemoteAsset,
    ) -> Result<(), AnalysisError> {
        for tick in 0..self.max_poll_ticks {
            let user_status = self.gateway.poll(&user.handle).await?;
            let reference_status = self.gateway.poll(&reference.handle).await?;

            if user_status.state == AssetState::Active
                && reference_status.state == AssetState::Active
            {
                debug!(tick, "Both assets active");
                return Ok(());
            }

            if user_status.state == AssetState::Failed
                || reference_status.state == AssetState::Failed
            {
                return Err(processing_failure(&user_status, &reference_status));
            }

            tokio::time::sleep(self.poll_interval).await;
        }

        warn!(
            ticks = self.max_poll_ticks,
            "Asset processing did not finish within the polling ceiling"
        );
        Err(AnalysisError::ProcessingTimeout)
    }
}

/// Build the attribution error for a FAILED asset state.
///
/// A user-asset failure is actionable by the caller, so it carries
/// re-encode guidance; a reference-asset failure is operational and does
/// not.
fn processing_failure(user: &AssetStatus, reference: &AssetStatus) -> AnalysisError {
    let user_failed = user.state == AssetState::Failed;
    let reference_failed = reference.state == AssetState::Failed;

    let who = match (user_failed, reference_failed) {
        (true, true) => FailedAsset::Both,
        (true, false) => FailedAsset::User,
        _ => FailedAsset::Reference,
    };

    let mut details = Vec::new();
    if user_failed {
        details.push(format!(
            "Your video failed: {}",
            user.error.as_deref().unwrap_or("unknown error")
        ));
    }
    if reference_failed {
        details.push(format!(
            "Reference video failed: {}",
            reference.error.as_deref().unwrap_or("unknown error")
        ));
    }

    let mut detail = details.join(" | ");
    if user_failed {
        detail.push_str(". Try converting your video to MP4 format or reducing its size/length.");
    }

    AnalysisError::AssetProcessingFailed { who, detail }
}

/// Locally staged copy of the user's upload.
///
/// Deleting on drop makes the cleanup run on every exit path of the
/// analysis future, including cancellation when the HTTP caller
/// disconnects. Cleanup failure is logged, never escalated.
struct StagedUpload {
    path: PathBuf,
}

impl StagedUpload {
    async fn create(
        dir: &Path,
        requester: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> std::io::Result<Self> {
        tokio::fs::create_dir_all(dir).await?;

        // Unique per request: requester plus a fresh disambiguator, so
        // concurrent uploads never collide.
        let name = format!(
            "{}_{}_{}",
            sanitize_component(requester),
            Uuid::new_v4().simple(),
            sanitize_component(file_name)
        );
        let path = dir.join(name);
        tokio::fs::write(&path, bytes).await?;
        debug!(path = %path.display(), "Staged user upload");

        Ok(Self { path })
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "Could not remove staged upload");
        } else {
            debug!(path = %self.path.display(), "Removed staged upload");
        }
    }
}

/// Restrict a path component to a safe character set.
fn sanitize_component(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Best-effort MIME type from a file extension; the remote service sniffs
/// the real container anyway.
fn guess_mime(file_name: &str) -> String {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("mov") => "video/quicktime",
        Some("webm") => "video/webm",
        Some("avi") => "video/x-msvideo",
        Some("mkv") => "video/x-matroska",
        _ => "video/mp4",
    }
    .to_string()
}
