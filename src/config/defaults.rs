/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// OMDb defaults
pub const DEFAULT_OMDB_BASE_URL: &str = "https://www.omdbapi.com/";
pub const DEFAULT_OMDB_REQUEST_TIMEOUT_SECS: u64 = 15;

// Database defaults
pub const DEFAULT_DATABASE_URL: &str = "sqlite://./filmfinder.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// Image cache defaults
pub const DEFAULT_MEMORY_FRACTION: u32 = 8;
pub const DEFAULT_MIN_CACHE_BYTES: u64 = 4 * 1024 * 1024; // 4MB
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;
pub const DEFAULT_MAX_IMAGE_SIZE: &str = "10MB";
pub const DEFAULT_MAX_DECODED_SIZE: &str = "64MB";
pub const DEFAULT_MAX_DECODED_BYTES: u64 = 64 * 1024 * 1024;

// Environment
pub const ENV_PREFIX: &str = "FILMFINDER_";
pub const DEFAULT_CONFIG_FILE: &str = "filmfinder.toml";
