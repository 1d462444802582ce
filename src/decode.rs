//! Turning fetched bytes into cached payloads

use crate::cache_key::CacheKey;
use crate::error::DecodeError;

/// Converts raw bytes into the resource type a loader caches.
///
/// Decoding runs on the loader's owning thread, right before waiters are
/// notified.
pub trait Decoder {
    type Output: 'static;

    fn decode(&self, key: &CacheKey, bytes: &[u8]) -> Result<Self::Output, DecodeError>;
}

/// Decoded image ready to be handed to a renderer.
///
/// Pixels are tightly packed BGRA8 rows, `width * height * 4` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBrush {
    /// Unique resource name, equal to the cache key
    pub resource_name: String,
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl ImageBrush {
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Detects the image format from the data itself and decodes it to BGRA8
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageDecoder;

impl Decoder for ImageDecoder {
    type Output = ImageBrush;

    fn decode(&self, key: &CacheKey, bytes: &[u8]) -> Result<ImageBrush, DecodeError> {
        let format = image::guess_format(bytes).map_err(|_| DecodeError::UnknownFormat)?;
        let decoded = image::load_from_memory_with_format(bytes, format)
            .map_err(|e| DecodeError::Image(e.to_string()))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(DecodeError::EmptyImage);
        }

        let mut pixels = rgba.into_raw();
        if pixels.is_empty() {
            return Err(DecodeError::EmptyImage);
        }
        for px in pixels.chunks_exact_mut(4) {
            px.swap(0, 2);
        }

        Ok(ImageBrush {
            resource_name: key.to_string(),
            width,
            height,
            pixels,
        })
    }
}

/// Keeps the fetched bytes as they are; only empty bodies are rejected
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesDecoder;

impl Decoder for BytesDecoder {
    type Output = Vec<u8>;

    fn decode(&self, _key: &CacheKey, bytes: &[u8]) -> Result<Vec<u8>, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::EmptyBody);
        }
        Ok(bytes.to_vec())
    }
}
