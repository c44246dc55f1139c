//! Wire models for OMDb responses
//!
//! Every field is optional on the wire. Missing text falls back to `""`,
//! except the release/commercial fields which fall back to `"N/A"` the way the
//! API itself reports them.

use serde::{Deserialize, Serialize};

use crate::models::{Movie, NOT_AVAILABLE, Rating};

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RatingResponse {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub value: String,
}

/// Detail lookup body (`?i=` / `?t=`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MovieResponse {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub rated: String,
    #[serde(default)]
    pub released: String,
    #[serde(default)]
    pub runtime: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub writer: String,
    #[serde(default)]
    pub actors: String,
    #[serde(default)]
    pub plot: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub awards: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub ratings: Vec<RatingResponse>,
    #[serde(default)]
    pub metascore: String,
    #[serde(default, rename = "imdbRating")]
    pub imdb_rating: String,
    #[serde(default, rename = "imdbVotes")]
    pub imdb_votes: String,
    #[serde(default, rename = "imdbID")]
    pub imdb_id: String,
    #[serde(default, rename = "Type")]
    pub media_type: String,
    #[serde(default = "not_available", rename = "DVD")]
    pub dvd: String,
    #[serde(default = "not_available")]
    pub box_office: String,
    #[serde(default = "not_available")]
    pub production: String,
    #[serde(default = "not_available")]
    pub website: String,
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl MovieResponse {
    pub fn is_found(&self) -> bool {
        self.response == "True"
    }
}

impl From<MovieResponse> for Movie {
    fn from(r: MovieResponse) -> Self {
        Movie {
            imdb_id: r.imdb_id,
            title: r.title,
            year: parse_year(&r.year),
            rated: r.rated,
            released: r.released,
            runtime: r.runtime,
            genres: split_list(&r.genre),
            director: r.director,
            writers: split_list(&r.writer),
            actors: split_list(&r.actors),
            plot: r.plot,
            languages: split_list(&r.language),
            countries: split_list(&r.country),
            awards: r.awards,
            poster: r.poster,
            ratings: r
                .ratings
                .into_iter()
                .map(|rating| Rating::new(rating.source, rating.value))
                .collect(),
            metascore: r.metascore.trim().parse().unwrap_or(0),
            imdb_rating: r.imdb_rating.trim().parse().unwrap_or(0.0),
            imdb_votes: r.imdb_votes,
            media_type: r.media_type,
            dvd: r.dvd,
            box_office: r.box_office,
            production: r.production,
            website: r.website,
            response: r.response,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SearchItemResponse {
    #[serde(default)]
    title: String,
    #[serde(default)]
    year: String,
    #[serde(default, rename = "imdbID")]
    imdb_id: String,
    #[serde(default, rename = "Type")]
    media_type: String,
    #[serde(default)]
    poster: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawSearchResponse {
    #[serde(default, rename = "Search")]
    search: Vec<SearchItemResponse>,
    #[serde(default, rename = "totalResults")]
    total_results: String,
    #[serde(default, rename = "Response")]
    response: String,
    #[serde(default, rename = "Error")]
    error: Option<String>,
}

/// One row of a search page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub year: i32,
    pub imdb_id: String,
    pub media_type: String,
    pub poster: String,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchItem>,
    pub total_results: u32,
    /// Page that was requested
    pub page: u32,
    /// API message when nothing matched, e.g. "Movie not found!"
    pub error: Option<String>,
}

impl SearchResponse {
    pub(crate) fn from_raw(raw: RawSearchResponse, page: u32) -> Self {
        if raw.response != "True" {
            return Self {
                results: Vec::new(),
                total_results: 0,
                page,
                error: raw.error,
            };
        }

        let results = raw
            .search
            .into_iter()
            .map(|item| SearchItem {
                title: item.title,
                year: parse_year(&item.year),
                imdb_id: item.imdb_id,
                media_type: item.media_type,
                poster: item.poster,
            })
            .collect();

        Self {
            results,
            total_results: raw.total_results.trim().parse().unwrap_or(0),
            page,
            error: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Whether a later page exists, at ten results per page
    pub fn has_more(&self) -> bool {
        u64::from(self.page) * 10 < u64::from(self.total_results)
    }
}

/// Comma-separated API text into a list, dropping empty items
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(", ")
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Leading digits of the year field, 0 when there are none.
/// Series ranges like "2001–2004" yield the start year.
pub fn parse_year(value: &str) -> i32 {
    let digits: String = value
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
