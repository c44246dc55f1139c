//! Error type definitions for filmfinder
//!
//! A small hierarchy: `AppError` wraps the layer-specific enums so callers at
//! the composition root only deal with one type.

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Remote metadata API errors
    #[error("OMDb error: {0}")]
    Omdb(#[from] OmdbError),

    /// Local store errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Errors raised by the OMDb client
#[derive(Error, Debug)]
pub enum OmdbError {
    /// Transport failures: connection refused, timeout, TLS
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the API
    #[error("HTTP error: {status}")]
    Status { status: u16 },

    /// Body was not a JSON object we could read
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered `Response: "False"` for a detail lookup
    #[error("Movie not found: {0}")]
    NotFound(String),

    /// Base URL could not be combined with the query
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No OMDb API key configured (set omdb.api_key or FILMFINDER_OMDB__API_KEY)")]
    MissingApiKey,
}

/// Local store errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Database errors from SeaORM
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// List columns are stored as JSON text
    #[error("Serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    /// Record not found
    #[error("Record not found: {table} with {field} = {value}")]
    RecordNotFound {
        table: String,
        field: String,
        value: String,
    },
}

/// Convenience methods for creating common error types
impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

impl RepositoryError {
    pub fn movie_not_found<S: Into<String>>(imdb_id: S) -> Self {
        Self::RecordNotFound {
            table: "movies".to_string(),
            field: "imdb_id".to_string(),
            value: imdb_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::validation("empty title");
        assert_eq!(err.to_string(), "Validation error: empty title");

        let err: AppError = OmdbError::NotFound("Movie not found!".to_string()).into();
        assert_eq!(err.to_string(), "OMDb error: Movie not found: Movie not found!");

        let err = RepositoryError::movie_not_found("tt0000001");
        assert_eq!(
            err.to_string(),
            "Record not found: movies with imdb_id = tt0000001"
        );
    }

    #[test]
    fn test_status_error() {
        let err = OmdbError::Status { status: 401 };
        assert_eq!(err.to_string(), "HTTP error: 401");
    }
}
