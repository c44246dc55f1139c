//! HTTP client for the OMDb API

use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::filter::MovieFilter;
use super::models::{MovieResponse, RawSearchResponse, SearchResponse};
use crate::config::OmdbConfig;
use crate::errors::{AppError, AppResult, OmdbError, OmdbResult};

/// Remote movie metadata source
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Detail lookup by id or exact title
    async fn get_movie(&self, filter: &MovieFilter) -> OmdbResult<MovieResponse>;

    /// One page of a free-text search
    async fn search_movies(&self, filter: &MovieFilter) -> OmdbResult<SearchResponse>;
}

pub struct OmdbClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl OmdbClient {
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> OmdbResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("filmfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &OmdbConfig) -> AppResult<Self> {
        Self::new(&config.base_url, config.api_key.clone(), config.request_timeout)
            .map_err(|e| AppError::configuration(format!("Failed to create OMDb client: {e}")))
    }

    /// One GET against the API with `params` plus the key. Returns the body
    /// text of any 2xx response.
    pub async fn get(&self, params: &BTreeMap<String, String>) -> OmdbResult<String> {
        if self.api_key.is_empty() {
            return Err(OmdbError::MissingApiKey);
        }

        let mut url = self.base_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params {
                query.append_pair(key, value);
            }
            query.append_pair("apikey", &self.api_key);
        }

        // Logged before the key is part of anything we print
        debug!("OMDb request to {} with {:?}", self.base_url, params);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(OmdbError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!("OMDb response: {} bytes", body.len());
        Ok(body)
    }
}

#[async_trait]
impl MovieApi for OmdbClient {
    async fn get_movie(&self, filter: &MovieFilter) -> OmdbResult<MovieResponse> {
        let body = self.get(&filter.to_query_map()).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn search_movies(&self, filter: &MovieFilter) -> OmdbResult<SearchResponse> {
        let body = self.get(&filter.to_query_map()).await?;
        let raw: RawSearchResponse = serde_json::from_str(&body)?;
        Ok(SearchResponse::from_raw(raw, filter.page.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        // Port 9 is discard; nothing should be sent anyway
        let client = OmdbClient::new("http://127.0.0.1:9/", "", Duration::from_secs(1)).unwrap();
        let result = client.get_movie(&MovieFilter::by_title("Heat")).await;
        assert!(matches!(result, Err(OmdbError::MissingApiKey)));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let result = OmdbClient::new("not a url", "key", Duration::from_secs(1));
        assert!(matches!(result, Err(OmdbError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_config_defaults() {
        assert!(OmdbClient::from_config(&OmdbConfig::default()).is_ok());
    }
}
