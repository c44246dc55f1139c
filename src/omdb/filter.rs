//! Query parameters for OMDb lookups

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Media types the API can be restricted to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Movie,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detail lookup or one page of a search.
///
/// Exactly one of `imdb_id`, `title` and `search_term` is sent, in that order
/// of preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieFilter {
    pub title: String,
    pub search_term: String,
    pub imdb_id: String,
    pub year: Option<i32>,
    /// Ask for Rotten Tomatoes data as well
    pub include_ratings: bool,
    pub page: u32,
}

impl Default for MovieFilter {
    fn default() -> Self {
        Self {
            title: String::new(),
            search_term: String::new(),
            imdb_id: String::new(),
            year: None,
            include_ratings: false,
            page: 1,
        }
    }
}

impl MovieFilter {
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn by_id(imdb_id: impl Into<String>) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            ..Default::default()
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: term.into(),
            ..Default::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_ratings(mut self) -> Self {
        self.include_ratings = true;
        self
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// True when none of id, title or search term is set
    pub fn is_empty(&self) -> bool {
        self.imdb_id.is_empty() && self.title.is_empty() && self.search_term.is_empty()
    }

    /// Parameters for the request, without the API key
    pub fn to_query_map(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();

        if !self.imdb_id.is_empty() {
            params.insert("i".to_string(), self.imdb_id.clone());
        } else if !self.title.is_empty() {
            params.insert("t".to_string(), self.title.clone());
        } else if !self.search_term.is_empty() {
            params.insert("s".to_string(), self.search_term.clone());
        }

        params.insert("type".to_string(), MediaType::Movie.to_string());

        if let Some(year) = self.year {
            params.insert("y".to_string(), year.to_string());
        }

        if self.include_ratings {
            params.insert("tomatoes".to_string(), "true".to_string());
        }

        // Pagination only applies to searches
        if !self.search_term.is_empty() && self.page > 1 {
            params.insert("page".to_string(), self.page.to_string());
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(filter: &MovieFilter) -> Vec<(String, String)> {
        filter.to_query_map().into_iter().collect()
    }

    fn expected(items: &[(&str, &str)]) -> Vec<(String, String)> {
        let mut v: Vec<_> = items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        v.sort();
        v
    }

    #[test]
    fn test_id_takes_precedence() {
        let filter = MovieFilter {
            title: "Heat".to_string(),
            search_term: "heat".to_string(),
            imdb_id: "tt0113277".to_string(),
            ..Default::default()
        };
        assert_eq!(
            pairs(&filter),
            expected(&[("i", "tt0113277"), ("type", "movie")])
        );
    }

    #[test]
    fn test_title_before_search_term() {
        let mut filter = MovieFilter::by_title("Heat");
        filter.search_term = "heat".to_string();
        assert_eq!(pairs(&filter), expected(&[("t", "Heat"), ("type", "movie")]));
    }

    #[test]
    fn test_year_and_ratings() {
        let filter = MovieFilter::by_title("Heat").with_year(1995).with_ratings();
        assert_eq!(
            pairs(&filter),
            expected(&[("t", "Heat"), ("tomatoes", "true"), ("type", "movie"), ("y", "1995")])
        );
    }

    #[test]
    fn test_page_only_for_search_beyond_first() {
        assert!(!MovieFilter::search("alien").to_query_map().contains_key("page"));
        assert_eq!(
            MovieFilter::search("alien").with_page(3).to_query_map().get("page"),
            Some(&"3".to_string())
        );
        assert!(!MovieFilter::by_title("Alien").with_page(3).to_query_map().contains_key("page"));
    }

    #[test]
    fn test_empty_filter_still_sends_type() {
        let filter = MovieFilter::default();
        assert!(filter.is_empty());
        assert_eq!(pairs(&filter), expected(&[("type", "movie")]));
    }
}
