//! Scoped image cache service

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::capacity::cache_capacity_bytes;
use super::decoder::{ImageDecoder, RasterDecoder};
use super::entry::{DecodedImage, is_unavailable_url};
use super::fetcher::{HttpImageFetcher, ImageFetcher};
use super::state::{CacheState, InsertOutcome};
use crate::config::ImageCacheConfig;
use crate::errors::AppResult;
use crate::utils::{format_duration, format_memory};

/// Snapshot of cache occupancy and counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub used_bytes: usize,
    pub capacity_bytes: usize,
    pub screens: usize,
    pub hits: u64,
    pub misses: u64,
    pub fetch_failures: u64,
    pub decode_failures: u64,
    pub evictions: u64,
}

/// In-memory image cache keyed by URL, with per-screen bulk eviction.
///
/// Construct one at the composition root and share it through `Arc`. The
/// internal lock is never held while a fetch or decode is running, so a
/// caller that drops a pending `load` leaves the cache untouched. Concurrent
/// loads of the same uncached URL each fetch; the last insert wins.
pub struct ScopedImageCache {
    state: Mutex<CacheState>,
    fetcher: Arc<dyn ImageFetcher>,
    decoder: Arc<dyn ImageDecoder>,
}

impl ScopedImageCache {
    pub fn new(
        capacity_bytes: usize,
        fetcher: Arc<dyn ImageFetcher>,
        decoder: Arc<dyn ImageDecoder>,
    ) -> Self {
        Self {
            state: Mutex::new(CacheState::new(capacity_bytes)),
            fetcher,
            decoder,
        }
    }

    /// HTTP fetcher, raster decoder and a budget sized from config. The
    /// decoder refuses images larger than the budget or `max_decoded_size`.
    pub fn from_config(config: &ImageCacheConfig) -> AppResult<Self> {
        let capacity = cache_capacity_bytes(config)?;
        let fetcher = HttpImageFetcher::from_config(config)?;
        let max_decoded = config.max_decoded_bytes()?.min(capacity as u64);
        debug!("Decoded image limit: {}", format_memory(max_decoded as f64));

        let decoder = RasterDecoder::new(max_decoded);
        Ok(Self::new(capacity, Arc::new(fetcher), Arc::new(decoder)))
    }

    /// Returns the image behind `url`, from memory when cached, otherwise by
    /// fetching and decoding it. `None` means "show a placeholder": the URL
    /// was empty or "N/A", or the fetch or decode failed. Failures are not
    /// cached and not retried.
    pub async fn load(&self, url: &str, screen_id: &str) -> Option<Arc<DecodedImage>> {
        if is_unavailable_url(url) {
            debug!("No image for screen {}: unavailable URL '{}'", screen_id, url);
            return None;
        }

        {
            let mut state = self.state.lock().await;
            state.register(screen_id, url);
            if let Some(image) = state.get(url) {
                state.hits += 1;
                return Some(image);
            }
            state.misses += 1;
        }

        let started = Instant::now();
        let bytes = match self.fetcher.fetch(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to fetch image {}: {}", url, e);
                self.state.lock().await.fetch_failures += 1;
                return None;
            }
        };

        let decoder = Arc::clone(&self.decoder);
        let image = match tokio::task::spawn_blocking(move || decoder.decode(&bytes)).await {
            Ok(Ok(image)) => Arc::new(image),
            Ok(Err(e)) => {
                warn!("Failed to decode image {}: {}", url, e);
                self.state.lock().await.decode_failures += 1;
                return None;
            }
            Err(e) => {
                warn!("Image decode task for {} did not complete: {}", url, e);
                self.state.lock().await.decode_failures += 1;
                return None;
            }
        };

        let mut state = self.state.lock().await;
        match state.insert(url.to_string(), Arc::clone(&image)) {
            InsertOutcome::Stored { evicted } if evicted > 0 => {
                debug!(
                    "Cached {} ({}) in {}, evicted {} least recently used",
                    url,
                    format_memory(image.weight() as f64),
                    format_duration(started.elapsed().as_millis() as u64),
                    evicted
                );
            }
            InsertOutcome::Stored { .. } => {
                debug!(
                    "Cached {} ({}) in {}",
                    url,
                    format_memory(image.weight() as f64),
                    format_duration(started.elapsed().as_millis() as u64)
                );
            }
            InsertOutcome::TooLarge => {
                debug!(
                    "Not caching {}: {} exceeds budget of {}",
                    url,
                    format_memory(image.weight() as f64),
                    format_memory(state.capacity_bytes() as f64)
                );
            }
        }

        Some(image)
    }

    /// Evicts every URL the screen registered, including URLs other screens
    /// also registered, and forgets the screen. Unknown screens are a no-op.
    pub async fn clear_screen(&self, screen_id: &str) {
        let cleared = self.state.lock().await.clear_screen(screen_id);
        if let Some(count) = cleared {
            debug!("Cleared cache for screen: {} ({} images)", screen_id, count);
        }
    }

    /// Empties the cache and all screen bookkeeping
    pub async fn clear_all(&self) {
        self.state.lock().await.clear();
        info!("Cleared entire image cache");
    }

    /// Presence check that does not count as a use
    pub async fn is_cached(&self, url: &str) -> bool {
        self.state.lock().await.contains(url)
    }

    pub async fn screen_urls(&self, screen_id: &str) -> Vec<String> {
        self.state.lock().await.screen_urls(screen_id)
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;
        CacheStats {
            entries: state.len(),
            used_bytes: state.used_bytes(),
            capacity_bytes: state.capacity_bytes(),
            screens: state.screen_count(),
            hits: state.hits,
            misses: state.misses,
            fetch_failures: state.fetch_failures,
            decode_failures: state.decode_failures,
            evictions: state.evictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_cache::decoder::DecodeError;
    use crate::image_cache::fetcher::{FetchError, MockImageFetcher};
    use bytes::Bytes;
    use mockall::Sequence;
    use mockall::predicate::eq;
    use tracing_test::traced_test;

    /// Treats the payload itself as the pixel buffer so tests control weights
    struct PassthroughDecoder;

    impl ImageDecoder for PassthroughDecoder {
        fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
            if bytes.is_empty() {
                return Err(DecodeError::Empty);
            }
            Ok(DecodedImage::new(bytes.len() as u32, 1, bytes.to_vec()))
        }
    }

    fn cache_with(capacity: usize, fetcher: MockImageFetcher) -> ScopedImageCache {
        ScopedImageCache::new(capacity, Arc::new(fetcher), Arc::new(PassthroughDecoder))
    }

    fn payload(weight: usize) -> Bytes {
        Bytes::from(vec![7u8; weight])
    }

    #[tokio::test]
    async fn test_second_load_served_from_memory() {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq("https://img.example.com/a.jpg"))
            .times(1)
            .returning(|_| Ok(payload(4)));
        let cache = cache_with(100, fetcher);

        let first = cache.load("https://img.example.com/a.jpg", "main").await;
        let second = cache.load("https://img.example.com/a.jpg", "details").await;

        let (first, second) = (first.unwrap(), second.unwrap());
        assert!(Arc::ptr_eq(&first, &second));

        let stats = cache.stats().await;
        assert_eq!((stats.hits, stats.misses), (1, 1));
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.screens, 2);
    }

    #[tokio::test]
    async fn test_unavailable_urls_never_fetch() {
        let mut fetcher = MockImageFetcher::new();
        fetcher.expect_fetch().never();
        let cache = cache_with(100, fetcher);

        for url in ["", "  ", "N/A"] {
            assert!(cache.load(url, "main").await.is_none());
        }

        assert!(cache.screen_urls("main").await.is_empty());
        assert_eq!(cache.stats().await, CacheStats {
            capacity_bytes: 100,
            ..Default::default()
        });
    }

    #[tokio::test]
    async fn test_clear_screen_forces_refetch_including_shared_urls() {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq("https://img.example.com/shared.jpg"))
            .times(2)
            .returning(|_| Ok(payload(3)));
        fetcher
            .expect_fetch()
            .with(eq("https://img.example.com/main-only.jpg"))
            .times(2)
            .returning(|_| Ok(payload(3)));
        let cache = cache_with(100, fetcher);

        cache.load("https://img.example.com/shared.jpg", "main").await;
        cache.load("https://img.example.com/main-only.jpg", "main").await;
        cache.load("https://img.example.com/shared.jpg", "actor").await;

        cache.clear_screen("main").await;

        assert!(!cache.is_cached("https://img.example.com/main-only.jpg").await);
        // "actor" still registered it, but the shared entry goes too
        assert!(!cache.is_cached("https://img.example.com/shared.jpg").await);
        assert!(cache.screen_urls("main").await.is_empty());
        assert_eq!(cache.screen_urls("actor").await.len(), 1);

        assert!(cache.load("https://img.example.com/shared.jpg", "actor").await.is_some());
        assert!(cache.load("https://img.example.com/main-only.jpg", "main").await.is_some());
    }

    #[tokio::test]
    async fn test_clear_unknown_screen_is_noop() {
        let mut fetcher = MockImageFetcher::new();
        fetcher.expect_fetch().times(1).returning(|_| Ok(payload(2)));
        let cache = cache_with(100, fetcher);

        cache.load("https://img.example.com/a.jpg", "main").await;
        cache.clear_screen("settings").await;
        cache.clear_screen("settings").await;

        assert!(cache.is_cached("https://img.example.com/a.jpg").await);
    }

    #[tokio::test]
    async fn test_clear_all_forces_refetch() {
        let mut fetcher = MockImageFetcher::new();
        fetcher.expect_fetch().times(2).returning(|_| Ok(payload(2)));
        let cache = cache_with(100, fetcher);

        cache.load("https://img.example.com/a.jpg", "main").await;
        cache.clear_all().await;

        let stats = cache.stats().await;
        assert_eq!((stats.entries, stats.screens, stats.used_bytes), (0, 0, 0));

        assert!(cache.load("https://img.example.com/a.jpg", "main").await.is_some());
    }

    #[tokio::test]
    async fn test_capacity_evicts_least_recently_used() {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .with(eq("https://img.example.com/A"))
            .times(1)
            .returning(|_| Ok(payload(6)));
        fetcher
            .expect_fetch()
            .with(eq("https://img.example.com/B"))
            .times(1)
            .returning(|_| Ok(payload(5)));
        let cache = cache_with(10, fetcher);

        cache.load("https://img.example.com/A", "main").await;
        cache.load("https://img.example.com/B", "main").await;

        assert!(!cache.is_cached("https://img.example.com/A").await);
        assert!(cache.is_cached("https://img.example.com/B").await);
        let stats = cache.stats().await;
        assert_eq!((stats.entries, stats.used_bytes, stats.evictions), (1, 5, 1));
    }

    #[tokio::test]
    async fn test_oversized_image_returned_but_not_cached() {
        let mut fetcher = MockImageFetcher::new();
        fetcher.expect_fetch().times(2).returning(|_| Ok(payload(50)));
        let cache = cache_with(10, fetcher);

        let image = cache.load("https://img.example.com/huge", "main").await;
        assert_eq!(image.map(|i| i.weight()), Some(50));
        assert!(!cache.is_cached("https://img.example.com/huge").await);

        cache.load("https://img.example.com/huge", "main").await;
    }

    #[tokio::test]
    #[traced_test]
    async fn test_failed_fetch_not_cached_and_retried_next_time() {
        let mut seq = Sequence::new();
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(FetchError::Status { status: 503 }));
        fetcher
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(payload(3)));
        let cache = cache_with(100, fetcher);

        assert!(cache.load("https://img.example.com/x", "main").await.is_none());
        assert!(!cache.is_cached("https://img.example.com/x").await);
        assert!(logs_contain("Failed to fetch image"));

        assert!(cache.load("https://img.example.com/x", "main").await.is_some());
        assert!(cache.is_cached("https://img.example.com/x").await);
        assert_eq!(cache.stats().await.fetch_failures, 1);
    }

    #[tokio::test]
    async fn test_decode_failure_yields_placeholder() {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .times(2)
            .returning(|_| Ok(Bytes::from_static(b"<html>404</html>")));
        let cache = ScopedImageCache::new(
            1024,
            Arc::new(fetcher),
            Arc::new(RasterDecoder::default()),
        );

        assert!(cache.load("https://img.example.com/x", "main").await.is_none());
        assert!(cache.load("https://img.example.com/x", "main").await.is_none());

        let stats = cache.stats().await;
        assert_eq!((stats.entries, stats.decode_failures), (0, 2));
    }

    #[tokio::test]
    async fn test_failed_url_still_registered_for_screen() {
        let mut fetcher = MockImageFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|_| Err(FetchError::Timeout(std::time::Duration::from_secs(3))));
        let cache = cache_with(100, fetcher);

        cache.load("https://img.example.com/slow", "main").await;

        assert_eq!(
            cache.screen_urls("main").await,
            vec!["https://img.example.com/slow".to_string()]
        );
    }
}
