//! Network side of the image cache

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::ImageCacheConfig;
use crate::errors::{AppError, AppResult};

/// Why a single fetch attempt produced no bytes
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {status}")]
    Status { status: u16 },

    /// `size` is the declared length, or the bytes read when the limit tripped
    #[error("Payload too large: {size} bytes (max: {max_size})")]
    TooLarge { size: u64, max_size: u64 },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Retrieves the raw bytes behind an image URL
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError>;
}

/// reqwest-backed fetcher with a per-attempt timeout and a body size cap
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
    timeout: Duration,
    max_bytes: u64,
}

impl HttpImageFetcher {
    pub fn new(
        timeout: Duration,
        connect_timeout: Duration,
        max_bytes: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("filmfinder/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            timeout,
            max_bytes,
        })
    }

    pub fn from_config(config: &ImageCacheConfig) -> AppResult<Self> {
        Self::new(
            config.fetch_timeout,
            config.connect_timeout,
            config.max_image_bytes()?,
        )
        .map_err(|e| AppError::configuration(format!("Failed to create image HTTP client: {e}")))
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Request(error)
        }
    }
}

#[async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::InvalidUrl(format!(
                "{url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        if let Some(length) = response.content_length()
            && length > self.max_bytes
        {
            return Err(FetchError::TooLarge {
                size: length,
                max_size: self.max_bytes,
            });
        }

        // Chunked responses carry no length, so the cap is enforced while reading
        let mut body = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| self.classify(e))?;
            let size = (body.len() + chunk.len()) as u64;
            if size > self.max_bytes {
                return Err(FetchError::TooLarge {
                    size,
                    max_size: self.max_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }
        let bytes = body.freeze();

        debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher() -> HttpImageFetcher {
        HttpImageFetcher::new(Duration::from_secs(1), Duration::from_secs(1), 1024).unwrap()
    }

    #[tokio::test]
    async fn test_rejects_unparseable_url() {
        let result = fetcher().fetch("not a url").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let result = fetcher().fetch("file:///etc/passwd").await;
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_from_config_rejects_bad_size() {
        let config = ImageCacheConfig {
            max_image_size: "huge".to_string(),
            ..Default::default()
        };
        assert!(HttpImageFetcher::from_config(&config).is_err());
    }
}
