//! Utility modules shared across filmfinder

pub mod human_format;
pub mod sample_data;

pub use human_format::{format_duration, format_memory, parse_memory};
pub use sample_data::sample_movies;
