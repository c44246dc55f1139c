//! Movie service
//!
//! Joins the OMDb client and the local store: remote lookups and searches,
//! saving lookups locally, and the offline actor search.

use std::sync::Arc;
use tracing::{debug, info};

use crate::database::repositories::MovieSeaOrmRepository;
use crate::errors::{AppError, AppResult, OmdbError, RepositoryError};
use crate::models::{ActorSearchFilter, Movie};
use crate::omdb::{MovieApi, MovieFilter, SearchResponse};
use crate::utils::sample_movies;

pub struct MovieService {
    api: Arc<dyn MovieApi>,
    repository: Arc<MovieSeaOrmRepository>,
}

impl MovieService {
    pub fn new(api: Arc<dyn MovieApi>, repository: Arc<MovieSeaOrmRepository>) -> Self {
        Self { api, repository }
    }

    /// Detail lookup by IMDb id or exact title
    pub async fn lookup(&self, filter: &MovieFilter) -> AppResult<Movie> {
        if filter.imdb_id.is_empty() && filter.title.is_empty() {
            return Err(AppError::validation("A title or IMDb id is required"));
        }

        let response = self.api.get_movie(filter).await?;
        if !response.is_found() {
            let reason = response
                .error
                .unwrap_or_else(|| "Movie not found!".to_string());
            return Err(OmdbError::NotFound(reason).into());
        }

        Ok(Movie::from(response))
    }

    /// One page of a free-text search. No matches is an empty page, not an error.
    pub async fn search(&self, filter: &MovieFilter) -> AppResult<SearchResponse> {
        if filter.search_term.trim().is_empty() {
            return Err(AppError::validation("Search term must not be empty"));
        }

        let page = self.api.search_movies(filter).await?;
        debug!(
            "Search '{}' page {}: {} of {} results",
            filter.search_term,
            page.page,
            page.results.len(),
            page.total_results
        );
        Ok(page)
    }

    /// Fetch full details for `imdb_id` and store them
    pub async fn save_by_id(&self, imdb_id: &str) -> AppResult<Movie> {
        let movie = self.lookup(&MovieFilter::by_id(imdb_id)).await?;
        self.save(&movie).await?;
        Ok(movie)
    }

    pub async fn save(&self, movie: &Movie) -> AppResult<()> {
        if movie.imdb_id.trim().is_empty() {
            return Err(AppError::validation("Movie has no IMDb id"));
        }
        self.repository.upsert(movie).await?;
        Ok(())
    }

    /// Store the built-in sample movies. Safe to repeat.
    pub async fn seed_sample_movies(&self) -> AppResult<usize> {
        let written = self.repository.upsert_many(&sample_movies()).await?;
        info!("Seeded {} sample movies", written);
        Ok(written)
    }

    pub async fn get_saved(&self, imdb_id: &str) -> AppResult<Option<Movie>> {
        Ok(self.repository.get(imdb_id).await?)
    }

    /// Like `get_saved`, but a missing movie is an error
    pub async fn require_saved(&self, imdb_id: &str) -> AppResult<Movie> {
        self.repository
            .get(imdb_id)
            .await?
            .ok_or_else(|| RepositoryError::movie_not_found(imdb_id).into())
    }

    pub async fn list_saved(&self) -> AppResult<Vec<Movie>> {
        Ok(self.repository.list_all().await?)
    }

    /// Stored movies featuring `name`, narrowed by `filter`. A blank name
    /// matches nothing.
    pub async fn search_by_actor(
        &self,
        name: &str,
        filter: &ActorSearchFilter,
    ) -> AppResult<Vec<Movie>> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.repository.search_by_actor(name).await?;
        let matched = filter.apply(candidates);
        debug!("Actor search '{}' returned {} movies", name, matched.len());
        Ok(matched)
    }
}
