use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

pub mod defaults;
pub mod duration_serde;

use defaults::*;

use crate::errors::{AppError, AppResult};
use crate::utils::human_format::parse_memory;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub image_cache: ImageCacheConfig,
}

/// Remote metadata API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
    /// Required for any remote lookup; empty means "not configured"
    #[serde(default)]
    pub api_key: String,
    #[serde(
        default = "default_omdb_request_timeout",
        with = "duration_serde::duration"
    )]
    pub request_timeout: Duration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
    pub max_connections: Option<u32>,
}

/// Poster image cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageCacheConfig {
    /// Fixed memory budget, e.g. "64MB". When unset the budget is
    /// `available memory / memory_fraction`.
    pub max_memory: Option<String>,
    #[serde(default = "default_memory_fraction")]
    pub memory_fraction: u32,
    /// Applies to each individual fetch attempt
    #[serde(default = "default_fetch_timeout", with = "duration_serde::duration")]
    pub fetch_timeout: Duration,
    #[serde(default = "default_connect_timeout", with = "duration_serde::duration")]
    pub connect_timeout: Duration,
    /// Bodies larger than this are treated as a failed fetch
    #[serde(default = "default_max_image_size")]
    pub max_image_size: String,
    /// Upper bound on one decoded RGBA image; the cache budget applies too
    #[serde(default = "default_max_decoded_size")]
    pub max_decoded_size: String,
}

fn default_omdb_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_omdb_request_timeout() -> Duration {
    Duration::from_secs(DEFAULT_OMDB_REQUEST_TIMEOUT_SECS)
}

fn default_database_url() -> String {
    DEFAULT_DATABASE_URL.to_string()
}

fn default_memory_fraction() -> u32 {
    DEFAULT_MEMORY_FRACTION
}

fn default_fetch_timeout() -> Duration {
    Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn default_max_image_size() -> String {
    DEFAULT_MAX_IMAGE_SIZE.to_string()
}

fn default_max_decoded_size() -> String {
    DEFAULT_MAX_DECODED_SIZE.to_string()
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_omdb_base_url(),
            api_key: String::new(),
            request_timeout: default_omdb_request_timeout(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: Some(DEFAULT_MAX_CONNECTIONS),
        }
    }
}

impl Default for ImageCacheConfig {
    fn default() -> Self {
        Self {
            max_memory: None,
            memory_fraction: default_memory_fraction(),
            fetch_timeout: default_fetch_timeout(),
            connect_timeout: default_connect_timeout(),
            max_image_size: default_max_image_size(),
            max_decoded_size: default_max_decoded_size(),
        }
    }
}

impl ImageCacheConfig {
    /// Explicit memory budget in bytes, if one is configured
    pub fn max_memory_bytes(&self) -> AppResult<Option<u64>> {
        self.max_memory
            .as_deref()
            .map(|value| parse_size("image_cache.max_memory", value))
            .transpose()
    }

    pub fn max_image_bytes(&self) -> AppResult<u64> {
        parse_size("image_cache.max_image_size", &self.max_image_size)
    }

    pub fn max_decoded_bytes(&self) -> AppResult<u64> {
        parse_size("image_cache.max_decoded_size", &self.max_decoded_size)
    }
}

fn parse_size(key: &str, value: &str) -> AppResult<u64> {
    parse_memory(value)
        .ok_or_else(|| AppError::configuration(format!("Invalid {key} '{value}'")))
}

impl Config {
    /// Load configuration from `FILMFINDER_CONFIG` or the default file name
    pub fn load() -> AppResult<Self> {
        let config_file = std::env::var("FILMFINDER_CONFIG")
            .unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load_from_file(&config_file)
    }

    /// Defaults, then the TOML file (if present), then `FILMFINDER_*` env vars.
    /// Nested keys use a double underscore: `FILMFINDER_OMDB__API_KEY`.
    pub fn load_from_file(config_file: impl AsRef<Path>) -> AppResult<Self> {
        let config_file = config_file.as_ref();
        if !config_file.exists() {
            debug!(
                "Config file {} not found, using defaults and environment",
                config_file.display()
            );
        }

        let config: Config = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| AppError::configuration(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.image_cache.memory_fraction == 0 {
            return Err(AppError::configuration(
                "image_cache.memory_fraction must be at least 1",
            ));
        }
        if self.image_cache.fetch_timeout.is_zero() {
            return Err(AppError::configuration(
                "image_cache.fetch_timeout must be greater than zero",
            ));
        }
        if self.image_cache.connect_timeout.is_zero() {
            return Err(AppError::configuration(
                "image_cache.connect_timeout must be greater than zero",
            ));
        }
        if self.image_cache.max_memory_bytes()? == Some(0) {
            return Err(AppError::configuration(
                "image_cache.max_memory must be greater than zero",
            ));
        }
        if self.image_cache.max_image_bytes()? == 0 {
            return Err(AppError::configuration(
                "image_cache.max_image_size must be greater than zero",
            ));
        }
        if self.image_cache.max_decoded_bytes()? == 0 {
            return Err(AppError::configuration(
                "image_cache.max_decoded_size must be greater than zero",
            ));
        }
        url::Url::parse(&self.omdb.base_url).map_err(|e| {
            AppError::configuration(format!("Invalid omdb.base_url '{}': {e}", self.omdb.base_url))
        })?;
        Ok(())
    }
}
