//! Application configuration loaded from environment variables.
//!
//! The signing secrets and store connection are loaded once at startup and
//! passed explicitly to the services that need them; nothing reads the
//! environment after boot.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Firestore project ID (document store connection)
    pub firestore_project_id: String,
    /// Signing secret for access tokens
    pub jwt_access_secret: Vec<u8>,
    /// Signing secret for refresh tokens (distinct key class)
    pub jwt_refresh_secret: Vec<u8>,
    /// Allowed CORS origins
    pub cors_origins: Vec<String>,
    /// Rate limit window in milliseconds
    pub rate_limit_window_ms: u64,
    /// Maximum requests per client per window
    pub rate_limit_max: u32,
    /// OpenWeather API key (optional; the wttr provider needs none)
    pub openweather_api_key: Option<String>,
    /// Deployment environment ("development" unlocks dev-only endpoints)
    pub app_env: String,
    /// Shared secret required by the dev password-reset endpoint, when set
    pub dev_reset_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Fails fast when a signing secret is missing so the process never
    /// starts with an unusable token service.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            firestore_project_id: env::var("FIRESTORE_PROJECT_ID")
                .unwrap_or_else(|_| "local-dev".to_string()),
            jwt_access_secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET"))?
                .into_bytes(),
            jwt_refresh_secret: env::var("JWT_REFRESH_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_REFRESH_SECRET"))?
                .into_bytes(),
            cors_origins: env::var("CORS_ORIGIN")
                .unwrap_or_else(|_| {
                    "http://localhost:5173,http://localhost:3000".to_string()
                })
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            rate_limit_window_ms: env::var("RATE_LIMIT_WINDOW_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(15 * 60 * 1000),
            rate_limit_max: env::var("RATE_LIMIT_MAX")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            openweather_api_key: env::var("OPENWEATHER_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "production".to_string()),
            dev_reset_secret: env::var("DEV_RESET_SECRET").ok(),
        })
    }

    /// Whether the server runs in a development-like mode.
    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    /// Default config for tests: fixed secrets, generous rate limit.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            firestore_project_id: "test-project".to_string(),
            jwt_access_secret: b"test_access_key_32_bytes_minimum".to_vec(),
            jwt_refresh_secret: b"test_refresh_key_32_bytes_minimu".to_vec(),
            cors_origins: vec!["http://localhost:5173".to_string()],
            rate_limit_window_ms: 15 * 60 * 1000,
            rate_limit_max: 1000,
            openweather_api_key: None,
            app_env: "development".to_string(),
            dev_reset_secret: Some("test_dev_secret".to_string()),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
