//! Configuration module for SDROP.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::password::min_length;
use crate::upload::MAX_EXPIRY_DAYS;
use crate::{Result, SdropError};

/// Environment variable that overrides `api.base_url`.
pub const API_URL_ENV: &str = "SDROP_API_URL";

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to (e.g. `https://sdrop.io/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds. Unset means no limit beyond the
    /// transport's own.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: None,
        }
    }
}

/// Upload defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    /// Days until an uploaded file expires.
    #[serde(default = "default_expiry_days")]
    pub default_expiry_days: u32,
}

fn default_expiry_days() -> u32 {
    7
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            default_expiry_days: default_expiry_days(),
        }
    }
}

/// Generated password settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordConfig {
    /// Length of generated passwords.
    #[serde(default = "default_password_length")]
    pub length: usize,
}

fn default_password_length() -> usize {
    16
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            length: default_password_length(),
        }
    }
}

/// Terminal display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Timezone for displaying dates (e.g., "Europe/Berlin", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Emit ANSI colors.
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_color() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            color: default_color(),
        }
    }
}

/// Simulated backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulateConfig {
    /// Use the in-memory backend instead of HTTP.
    #[serde(default)]
    pub enabled: bool,
    /// Origin share links are built from.
    #[serde(default = "default_origin")]
    pub origin: String,
    /// Artificial upload latency in milliseconds.
    #[serde(default = "default_upload_delay")]
    pub upload_delay_ms: u64,
    /// Artificial metadata latency in milliseconds.
    #[serde(default = "default_metadata_delay")]
    pub metadata_delay_ms: u64,
    /// Artificial password validation latency in milliseconds.
    #[serde(default = "default_validate_delay")]
    pub validate_delay_ms: u64,
    /// Artificial download latency in milliseconds.
    #[serde(default = "default_download_delay")]
    pub download_delay_ms: u64,
}

fn default_origin() -> String {
    "http://localhost:3000".to_string()
}

fn default_upload_delay() -> u64 {
    1000
}

fn default_metadata_delay() -> u64 {
    300
}

fn default_validate_delay() -> u64 {
    300
}

fn default_download_delay() -> u64 {
    800
}

impl SimulateConfig {
    /// Latencies with every delay set to zero.
    pub fn instant() -> Self {
        Self {
            upload_delay_ms: 0,
            metadata_delay_ms: 0,
            validate_delay_ms: 0,
            download_delay_ms: 0,
            ..Self::default()
        }
    }

    pub(crate) fn upload_delay(&self) -> Duration {
        Duration::from_millis(self.upload_delay_ms)
    }

    pub(crate) fn metadata_delay(&self) -> Duration {
        Duration::from_millis(self.metadata_delay_ms)
    }

    pub(crate) fn validate_delay(&self) -> Duration {
        Duration::from_millis(self.validate_delay_ms)
    }

    pub(crate) fn download_delay(&self) -> Duration {
        Duration::from_millis(self.download_delay_ms)
    }
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            origin: default_origin(),
            upload_delay_ms: default_upload_delay(),
            metadata_delay_ms: default_metadata_delay(),
            validate_delay_ms: default_validate_delay(),
            download_delay_ms: default_download_delay(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; stderr is always written.
    #[serde(default)]
    pub file: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Backend API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Upload defaults.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Generated password settings.
    #[serde(default)]
    pub password: PasswordConfig,
    /// Display configuration.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Simulated backend configuration.
    #[serde(default)]
    pub simulate: SimulateConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(SdropError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file, falling back to defaults when the
    /// file does not exist, then apply environment overrides.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = if path.as_ref().exists() {
            Self::load(path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| SdropError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `SDROP_API_URL`: Override the API base URL
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var(API_URL_ENV) {
            if !base_url.is_empty() {
                self.api.base_url = base_url;
            }
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url)
            .map_err(|e| SdropError::Config(format!("invalid api.base_url: {e}")))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SdropError::Config(format!(
                "unsupported api.base_url scheme: {}",
                base.scheme()
            )));
        }
        if !(1..=MAX_EXPIRY_DAYS).contains(&self.upload.default_expiry_days) {
            return Err(SdropError::Config(format!(
                "upload.default_expiry_days must be between 1 and {MAX_EXPIRY_DAYS}"
            )));
        }
        if self.password.length < min_length() {
            return Err(SdropError::Config(format!(
                "password.length must be at least {}",
                min_length()
            )));
        }
        if self.display.timezone.parse::<chrono_tz::Tz>().is_err() {
            return Err(SdropError::Config(format!(
                "unknown display.timezone: {}",
                self.display.timezone
            )));
        }
        Ok(())
    }
}
