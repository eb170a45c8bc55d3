/// Configuration management for Message Service
///
/// Settings are read from environment variables (a `.env` file is honored).
use crate::error::AppError;
use db_pool::parse_env_optional;
use serde::{Deserialize, Serialize};

/// Profile that marks a managed cloud deployment
pub const CLOUD_PROFILE: &str = "cloud";

const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_PORT: u16 = 8080;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// Message listing settings
    pub messages: MessagesConfig,
    /// Database URL; `None` selects the in-memory store
    #[serde(skip_serializing)]
    pub database_url: Option<String>,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Active deployment profiles (e.g. `cloud`)
    pub profiles: Vec<String>,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Maximum number of messages returned by a list request
    pub page_size: usize,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let profiles = parse_profiles(&std::env::var("APP_PROFILES").unwrap_or_default());

        let port = match std::env::var("MESSAGE_SERVICE_PORT").or_else(|_| std::env::var("PORT")) {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("invalid port '{raw}'")))?,
            Err(_) => DEFAULT_PORT,
        };

        let page_size = match std::env::var("MESSAGES_PAGE_SIZE") {
            Ok(raw) => parse_page_size(&raw)?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let config = Self {
            app: AppConfig {
                profiles,
                host: std::env::var("MESSAGE_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
            },
            messages: MessagesConfig { page_size },
            database_url,
        };

        if config.is_cloud() && config.database_url.is_none() {
            return Err(AppError::Config(
                "DATABASE_URL must be set in the cloud profile".to_string(),
            ));
        }

        Ok(config)
    }

    /// Whether the `cloud` profile is active
    pub fn is_cloud(&self) -> bool {
        self.app
            .profiles
            .iter()
            .any(|p| p.eq_ignore_ascii_case(CLOUD_PROFILE))
    }

    /// Permissive CORS is only installed outside the cloud profile
    pub fn cors_enabled(&self) -> bool {
        !self.is_cloud()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app.host, self.app.port)
    }
}

fn parse_profiles(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn parse_page_size(raw: &str) -> Result<usize, AppError> {
    match parse_positive(raw) {
        Some(size) => Ok(size),
        None => Err(AppError::Config(format!(
            "MESSAGES_PAGE_SIZE must be a positive integer, got '{raw}'"
        ))),
    }
}

fn parse_positive(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|v| *v > 0)
}

/// Port for the `healthcheck` subcommand, which must not fail on a bad config
pub fn healthcheck_port() -> u16 {
    parse_env_optional("MESSAGE_SERVICE_PORT")
        .or_else(|| parse_env_optional("PORT"))
        .unwrap_or(DEFAULT_PORT)
}
