//! Centralized error handling for filmfinder
//!
//! Errors are grouped by the layer that raises them:
//!
//! - **OMDb Errors**: remote metadata lookups (transport, status, parsing)
//! - **Repository Errors**: local movie store access
//! - **Configuration / Validation Errors**: startup and input problems
//!
//! The image cache has its own failure types (`FetchError`, `DecodeError`)
//! which never leave `ScopedImageCache::load`; a failed image load is reported
//! as the absence of an image.
//!
//! # Usage
//!
//! ```rust
//! use filmfinder::errors::{AppError, AppResult};
//!
//! fn example_function() -> AppResult<String> {
//!     Err(AppError::validation("title must not be empty"))
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for Repository Results
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for OMDb client Results
pub type OmdbResult<T> = Result<T, OmdbError>;
