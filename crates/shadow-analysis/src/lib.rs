//! Video comparison core for the ShadowSync backend.
//!
//! This crate owns the per-request analysis workflow:
//! - [`SportCatalog`]: read-only lookup of sport prompts and reference videos
//! - [`AnalysisOrchestrator`]: uploads the user and reference videos to the
//!   remote file store, polls both until ready under a bounded timeout,
//!   issues one multimodal inference call, and guarantees cleanup of the
//!   locally staged upload on every exit path
//!
//! Transport is abstracted behind [`AssetGateway`] and [`InferenceClient`]
//! so the polling policy can be tested without a network.

pub mod catalog;
pub mod error;
pub mod gateway;
pub mod orchestrator;

pub use catalog::{CatalogError, SportCatalog};
pub use error::{AnalysisError, FailedAsset};
pub use gateway::{AssetGateway, GatewayError, InferenceClient};
pub use orchestrator::{AnalysisOrchestrator, UserVideo, MAX_POLL_TICKS, POLL_INTERVAL};
