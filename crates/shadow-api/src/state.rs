//! Application state.

use std::sync::Arc;

use shadow_analysis::{AnalysisOrchestrator, AssetGateway, InferenceClient, SportCatalog};
use shadow_gemini::GeminiClient;

use crate::auth::TokenIssuer;
use crate::config::ApiConfig;
use crate::store::UserStore;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub catalog: Arc<SportCatalog>,
    pub orchestrator: Arc<AnalysisOrchestrator>,
    pub users: UserStore,
    pub auth: Arc<TokenIssuer>,
}

impl AppState {
    /// Create new application state from config.
    pub async fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let api_key = config
            .gemini_api_key
            .clone()
            .ok_or("GEMINI_API_KEY not configured")?;

        let catalog = match &config.sports_config_path {
            Some(path) => SportCatalog::from_json_file(path, &config.reference_video_dir)?,
            None => SportCatalog::builtin(&config.reference_video_dir),
        };
        let catalog = Arc::new(catalog);

        let client = Arc::new(GeminiClient::new(api_key, config.gemini_model.clone()));
        let gateway: Arc<dyn AssetGateway> = client.clone();
        let inference: Arc<dyn InferenceClient> = client;

        let orchestrator = Arc::new(AnalysisOrchestrator::new(
            Arc::clone(&catalog),
            gateway,
            inference,
            config.temp_upload_dir.clone(),
        ));

        let users = UserStore::connect(&config.database_path).await?;
        let auth = Arc::new(TokenIssuer::new(&config.jwt_secret, config.access_token_ttl));

        Ok(Self {
            config,
            catalog,
            orchestrator,
            users,
            auth,
        })
    }
}
