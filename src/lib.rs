pub mod config;
pub mod database;
pub mod errors;
pub mod image_cache;
pub mod models;
pub mod omdb;
pub mod services;
pub mod utils;
