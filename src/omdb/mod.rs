//! OMDb metadata client
//!
//! Lookups are keyed by IMDb id, exact title or a free-text search term. The
//! API answers with HTTP 200 even when nothing matched; that case is carried
//! in the body's `Response`/`Error` fields rather than as an HTTP error.

pub mod client;
pub mod filter;
pub mod models;

pub use client::{MovieApi, OmdbClient};
pub use filter::{MediaType, MovieFilter};
pub use models::{MovieResponse, RatingResponse, SearchItem, SearchResponse};

#[cfg(test)]
pub use client::MockMovieApi;
