//! Decoded image payload and URL precondition checks

use std::fmt;

use crate::models::movie::NOT_AVAILABLE;

/// An image decoded to RGBA8 pixels. Immutable once built; shared as `Arc`.
#[derive(Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes this image counts against the cache budget
    pub fn weight(&self) -> usize {
        self.pixels.len()
    }
}

impl fmt::Debug for DecodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecodedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("weight", &self.pixels.len())
            .finish()
    }
}

/// Empty, blank, or the API's "N/A" marker: no fetch should be attempted
pub fn is_unavailable_url(url: &str) -> bool {
    let url = url.trim();
    url.is_empty() || url == NOT_AVAILABLE
}
