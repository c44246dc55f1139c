//! Denormalized movie record as stored locally

use serde::{Deserialize, Serialize};

/// Marker the API uses for "no value"
pub const NOT_AVAILABLE: &str = "N/A";

/// A rating from one source, e.g. `("Rotten Tomatoes", "91%")`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub source: String,
    pub value: String,
}

impl Rating {
    pub fn new(source: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            value: value.into(),
        }
    }
}

/// Full movie details keyed by IMDb id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub imdb_id: String,
    pub title: String,
    pub year: i32,
    pub rated: String,
    pub released: String,
    pub runtime: String,
    pub genres: Vec<String>,
    pub director: String,
    pub writers: Vec<String>,
    pub actors: Vec<String>,
    pub plot: String,
    pub languages: Vec<String>,
    pub countries: Vec<String>,
    pub awards: String,
    pub poster: String,
    pub ratings: Vec<Rating>,
    pub metascore: i32,
    pub imdb_rating: f32,
    pub imdb_votes: String,
    pub media_type: String,
    pub dvd: String,
    pub box_office: String,
    pub production: String,
    pub website: String,
    pub response: String,
}

impl Default for Movie {
    fn default() -> Self {
        Self {
            imdb_id: String::new(),
            title: String::new(),
            year: 0,
            rated: String::new(),
            released: String::new(),
            runtime: String::new(),
            genres: Vec::new(),
            director: String::new(),
            writers: Vec::new(),
            actors: Vec::new(),
            plot: String::new(),
            languages: Vec::new(),
            countries: Vec::new(),
            awards: String::new(),
            poster: String::new(),
            ratings: Vec::new(),
            metascore: 0,
            imdb_rating: 0.0,
            imdb_votes: String::new(),
            media_type: String::new(),
            dvd: NOT_AVAILABLE.to_string(),
            box_office: NOT_AVAILABLE.to_string(),
            production: NOT_AVAILABLE.to_string(),
            website: NOT_AVAILABLE.to_string(),
            response: "True".to_string(),
        }
    }
}

impl Movie {
    /// Poster URL if it points somewhere, `None` for empty or "N/A"
    pub fn poster_url(&self) -> Option<&str> {
        let poster = self.poster.trim();
        if poster.is_empty() || poster == NOT_AVAILABLE {
            None
        } else {
            Some(poster)
        }
    }
}
