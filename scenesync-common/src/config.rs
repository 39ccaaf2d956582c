//! Configuration loading for scenesync tools
//!
//! Settings are read once at process start, in this priority order:
//! 1. Environment variable (API token only)
//! 2. TOML config file (`./scenesync.toml`, then the per-user config dir)
//! 3. Compiled defaults
//!
//! A missing or malformed TOML file never stops the tool; it logs and
//! falls back to the compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Catalog API host
pub const DEFAULT_API_BASE_URL: &str = "https://api.theporndb.net";

/// The `/jav/` endpoint rejects requests without a curl-style User-Agent
pub const DEFAULT_USER_AGENT: &str = "curl/8.7.1";

/// Environment variable holding the bearer token
pub const TOKEN_ENV_VAR: &str = "SCENESYNC_API_TOKEN";

/// Config file name looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "scenesync.toml";

/// Runtime configuration for a sync run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Bearer token sent in the Authorization header
    pub api_token: Option<String>,

    /// Base URL of the catalog API (no trailing slash)
    pub api_base_url: String,

    /// User-Agent header value
    pub user_agent: String,

    /// Requested items (JSON array of slug/video_id + scene_id)
    pub input_file: PathBuf,

    /// Accumulated scene records
    pub output_file: PathBuf,

    /// This run's failures
    pub failed_file: PathBuf,

    /// This run's performer side table
    pub performer_file: PathBuf,

    /// This run's site side table
    pub site_file: PathBuf,

    /// Attempts per scene before giving up
    pub max_retries: u32,

    /// Base throttle/backoff delay in milliseconds
    pub retry_delay_ms: u64,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_token: None,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            input_file: PathBuf::from("video.json"),
            output_file: PathBuf::from("scene_details.json"),
            failed_file: PathBuf::from("failed_entry.json"),
            performer_file: PathBuf::from("performer.json"),
            site_file: PathBuf::from("site.json"),
            max_retries: 3,
            retry_delay_ms: 500,
            request_timeout_secs: 30,
            logging: LoggingConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Load configuration from the first config file found plus environment
    pub fn load() -> Self {
        Self::resolve(locate_config_file().as_deref())
    }

    /// Load configuration from an explicit (optional) TOML file plus environment
    ///
    /// Unreadable or malformed files are logged and replaced by defaults.
    pub fn resolve(config_path: Option<&Path>) -> Self {
        let file_config = match config_path {
            Some(path) => match Self::from_file(path) {
                Ok(config) => {
                    info!(path = %path.display(), "Loaded config file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring config file, using defaults");
                    Self::default()
                }
            },
            None => Self::default(),
        };

        let env_token = std::env::var(TOKEN_ENV_VAR).ok();
        file_config.with_env_token(env_token)
    }

    /// Parse a TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse TOML text; omitted keys take compiled defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Parse TOML failed: {}", e)))
    }

    /// Apply the environment token over the file token
    pub fn with_env_token(mut self, env_token: Option<String>) -> Self {
        self.api_token = resolve_api_token(env_token, self.api_token.take());
        self
    }

    /// Attempts per item, never less than one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.max(1)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Pick the API token: environment wins over TOML
pub fn resolve_api_token(env_token: Option<String>, toml_token: Option<String>) -> Option<String> {
    let env_token = env_token.filter(|t| is_valid_token(t));
    let toml_token = toml_token.filter(|t| is_valid_token(t));

    match (env_token, toml_token) {
        (Some(env), Some(_)) => {
            warn!("API token found in both {} and TOML config. Using environment.", TOKEN_ENV_VAR);
            Some(env)
        }
        (Some(env), None) => {
            info!("API token loaded from environment variable");
            Some(env)
        }
        (None, Some(toml)) => {
            info!("API token loaded from TOML config");
            Some(toml)
        }
        (None, None) => None,
    }
}

/// Token must be non-empty, non-whitespace
pub fn is_valid_token(token: &str) -> bool {
    !token.trim().is_empty()
}

/// Find the config file: working directory first, then `<config dir>/scenesync/config.toml`
pub fn locate_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|d| d.join("scenesync").join("config.toml"))
        .filter(|p| p.is_file())
}
