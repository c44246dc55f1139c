//! Post-query filters for the local actor search

use serde::{Deserialize, Serialize};

use super::Movie;

/// Rating threshold behind `high_rated_only`
pub const HIGH_RATING_THRESHOLD: f32 = 7.0;

/// Narrows the movies returned by an actor search. Every unset field passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorSearchFilter {
    /// Case-insensitive substring matched against any of the movie's genres
    pub genre: String,
    /// Inclusive lower bound on release year
    pub from_year: Option<i32>,
    /// Inclusive upper bound on release year
    pub to_year: Option<i32>,
    pub high_rated_only: bool,
}

impl ActorSearchFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        if !self.genre.is_empty() {
            let needle = self.genre.to_lowercase();
            if !movie
                .genres
                .iter()
                .any(|genre| genre.to_lowercase().contains(&needle))
            {
                return false;
            }
        }

        if let Some(from_year) = self.from_year
            && movie.year < from_year
        {
            return false;
        }

        if let Some(to_year) = self.to_year
            && movie.year > to_year
        {
            return false;
        }

        !self.high_rated_only || movie.imdb_rating >= HIGH_RATING_THRESHOLD
    }

    pub fn apply(&self, movies: Vec<Movie>) -> Vec<Movie> {
        movies.into_iter().filter(|m| self.matches(m)).collect()
    }
}
