//! Screen-scoped poster image cache
//!
//! Decoded images are held in memory keyed by their source URL and bounded by
//! a byte budget with least-recently-used eviction. Each load also records the
//! URL under the screen that asked for it, so leaving a screen can drop that
//! screen's images in one call:
//!
//! - At most one network fetch per URL while it stays cached
//! - Failures (bad URL, network, timeout, status, decode) surface as `None`
//! - `clear_screen` removes the screen's URLs from the shared cache even when
//!   another screen still shows the same image
//!
//! Fetching and decoding sit behind the [`ImageFetcher`] and [`ImageDecoder`]
//! traits; [`HttpImageFetcher`] and [`RasterDecoder`] are the production
//! implementations.

pub mod capacity;
pub mod decoder;
pub mod entry;
pub mod fetcher;
pub mod service;
pub mod state;

pub use capacity::cache_capacity_bytes;
pub use decoder::{DecodeError, ImageDecoder, RasterDecoder};
pub use entry::{DecodedImage, is_unavailable_url};
pub use fetcher::{FetchError, HttpImageFetcher, ImageFetcher};
pub use service::{CacheStats, ScopedImageCache};
pub use state::{CacheState, InsertOutcome};
