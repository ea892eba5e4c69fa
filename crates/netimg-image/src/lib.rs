//! netimg Images
//!
//! Decoding remote image bytes into bitmaps, and a small process-wide
//! bitmap cache keyed by URL.

pub mod cache;
pub mod decoder;

use std::sync::Arc;

pub use cache::{CacheStats, MAX_ENTRIES, SimpleImageCache, shared_cache};
pub use decoder::{DecodedImage, ImageDecoder, ImageError, ImageFormat};

/// Shared handle to a decoded bitmap
pub type Bitmap = Arc<DecodedImage>;
