//! Turns fetched bytes into an in-memory image

use image::{ImageReader, Limits};
use std::io::Cursor;
use thiserror::Error;

use super::entry::DecodedImage;
use crate::config::defaults::DEFAULT_MAX_DECODED_BYTES;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Empty image payload")]
    Empty,

    #[error("Image {width}x{height} needs {size} bytes decoded (max: {max_size})")]
    TooLarge {
        width: u32,
        height: u32,
        size: u64,
        max_size: u64,
    },

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Platform-agnostic decoding capability
pub trait ImageDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError>;
}

/// Decodes PNG, JPEG, GIF and WebP through the `image` crate into RGBA8.
///
/// The header is read first and images whose RGBA8 buffer would exceed
/// `max_bytes` are refused before any pixel data is allocated. The decode
/// itself runs under `image::Limits` with the same allocation bound.
#[derive(Debug, Clone, Copy)]
pub struct RasterDecoder {
    max_bytes: u64,
}

impl RasterDecoder {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    fn reader(bytes: &[u8]) -> Result<ImageReader<Cursor<&[u8]>>, DecodeError> {
        ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::Image(image::ImageError::IoError(e)))
    }
}

impl Default for RasterDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DECODED_BYTES)
    }
}

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }

        let (width, height) = Self::reader(bytes)?.into_dimensions()?;
        let size = u64::from(width) * u64::from(height) * 4;
        if size > self.max_bytes {
            return Err(DecodeError::TooLarge {
                width,
                height,
                size,
                max_size: self.max_bytes,
            });
        }

        let mut limits = Limits::default();
        limits.max_alloc = Some(self.max_bytes);
        let mut reader = Self::reader(bytes)?;
        reader.limits(limits);

        let rgba = reader.decode()?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(DecodedImage::new(width, height, rgba.into_raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = RgbaImage::from_pixel(3, 2, Rgba([200, 10, 10, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format).unwrap();
        bytes
    }

    #[test]
    fn test_decode_png() {
        let decoded = RasterDecoder::default().decode(&encode(ImageFormat::Png)).unwrap();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.weight(), 3 * 2 * 4);
        assert_eq!(&decoded.pixels()[..4], &[200, 10, 10, 255]);
    }

    #[test]
    fn test_decode_jpeg() {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([0, 0, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
            .unwrap();

        let decoded = RasterDecoder::default().decode(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 4));
        assert_eq!(decoded.weight(), 64);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = RasterDecoder::default().decode(b"<html>not an image</html>");
        assert!(matches!(result, Err(DecodeError::Image(_))));
    }

    #[test]
    fn test_decode_refuses_oversized_dimensions() {
        // A flat 1024x1024 grayscale PNG compresses to a few KB but would need
        // 4MB as RGBA8
        let img = image::GrayImage::new(1024, 1024);
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        assert!(bytes.len() < 64 * 1024);

        let result = RasterDecoder::new(1024 * 1024).decode(&bytes);
        assert!(
            matches!(
                result,
                Err(DecodeError::TooLarge {
                    width: 1024,
                    height: 1024,
                    size: 4_194_304,
                    max_size: 1_048_576,
                })
            ),
            "{result:?}"
        );

        let decoded = RasterDecoder::new(4 * 1024 * 1024).decode(&bytes).unwrap();
        assert_eq!(decoded.weight(), 4 * 1024 * 1024);
    }

    #[test]
    fn test_decode_empty_fails() {
        assert!(matches!(RasterDecoder::default().decode(&[]), Err(DecodeError::Empty)));
    }
}
