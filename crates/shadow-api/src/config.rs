//! API configuration.

use std::path::PathBuf;
use std::time::Duration;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// CORS origins
    pub cors_origins: Vec<String>,
    /// Max request body size (uploads are videos, so this is generous)
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
    /// Gemini API credential; analysis is unavailable without it
    pub gemini_api_key: Option<String>,
    /// Gemini model used for the comparison call
    pub gemini_model: String,
    /// Directory holding the curated reference videos
    pub reference_video_dir: PathBuf,
    /// Directory for per-request staged uploads
    pub temp_upload_dir: PathBuf,
    /// Optional external sports catalog (JSON); built-ins used when unset
    pub sports_config_path: Option<PathBuf>,
    /// SQLite database file for user accounts
    pub database_path: PathBuf,
    /// Secret for signing session tokens
    pub jwt_secret: String,
    /// Session token lifetime
    pub access_token_ttl: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_origins: vec!["*".to_string()],
            max_body_size: 100 * 1024 * 1024, // 100MB
            environment: "development".to_string(),
            gemini_api_key: None,
            gemini_model: "gemini-2.5-flash".to_string(),
            reference_video_dir: PathBuf::from("reference_videos"),
            temp_upload_dir: PathBuf::from("temp_uploads"),
            sports_config_path: None,
            database_path: PathBuf::from("shadowsync.db"),
            jwt_secret: "insecure-dev-secret".to_string(),
            access_token_ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| s.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or(defaults.cors_origins),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_body_size),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            reference_video_dir: std::env::var("REFERENCE_VIDEO_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.reference_video_dir),
            temp_upload_dir: std::env::var("TEMP_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.temp_upload_dir),
            sports_config_path: std::env::var("SPORTS_CONFIG_PATH").ok().map(PathBuf::from),
            database_path: std::env::var("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            jwt_secret: std::env::var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            access_token_ttl: Duration::from_secs(
                std::env::var("ACCESS_TOKEN_TTL_MINUTES")
                    .ok()
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(30)
                    * 60,
            ),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
