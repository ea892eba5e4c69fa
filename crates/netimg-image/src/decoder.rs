//! Image decoder
//!
//! Sniffs the payload format and decodes PNG, JPEG, GIF and WebP via the
//! image crate. Output is always RGBA8.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat as ImgFormat};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Unknown,
}

impl ImageFormat {
    /// Detect format from magic bytes
    pub fn from_bytes(data: &[u8]) -> Self {
        // PNG: 89 50 4E 47 0D 0A 1A 0A
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Self::Png;
        }

        // JPEG: FF D8 FF
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Self::Gif;
        }

        // WebP: RIFF....WEBP
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        Self::Unknown
    }

    /// Map a Content-Type header value to a format
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/png" => Self::Png,
            "image/jpeg" | "image/jpg" => Self::Jpeg,
            "image/gif" => Self::Gif,
            "image/webp" => Self::WebP,
            _ => Self::Unknown,
        }
    }

    fn to_image_format(self) -> Option<ImgFormat> {
        match self {
            Self::Png => Some(ImgFormat::Png),
            Self::Jpeg => Some(ImgFormat::Jpeg),
            Self::Gif => Some(ImgFormat::Gif),
            Self::WebP => Some(ImgFormat::WebP),
            Self::Unknown => None,
        }
    }
}

/// A decoded bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// RGBA pixel data
    pub pixels: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Original format
    pub format: ImageFormat,
}

impl DecodedImage {
    /// Create from raw RGBA data
    pub fn from_rgba(pixels: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            pixels,
            width,
            height,
            format: ImageFormat::Unknown,
        }
    }

    /// Memory size in bytes
    pub fn memory_size(&self) -> usize {
        self.pixels.len()
    }
}

/// Image decoder
pub struct ImageDecoder;

impl ImageDecoder {
    /// Decode image from bytes, sniffing the format
    pub fn decode(data: &[u8]) -> Result<DecodedImage, ImageError> {
        if data.is_empty() {
            return Err(ImageError::Empty);
        }
        Self::decode_with_format(data, ImageFormat::from_bytes(data))
    }

    /// Decode with a declared format, falling back to sniffing when the
    /// declaration is unknown
    pub fn decode_with_hint(data: &[u8], hint: ImageFormat) -> Result<DecodedImage, ImageError> {
        if data.is_empty() {
            return Err(ImageError::Empty);
        }
        match ImageFormat::from_bytes(data) {
            ImageFormat::Unknown => Self::decode_with_format(data, hint),
            sniffed => Self::decode_with_format(data, sniffed),
        }
    }

    /// Decode with known format
    pub fn decode_with_format(
        data: &[u8],
        format: ImageFormat,
    ) -> Result<DecodedImage, ImageError> {
        let img_format = format.to_image_format().ok_or(ImageError::UnsupportedFormat)?;

        let img = image::load(Cursor::new(data), img_format)
            .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

        Ok(Self::image_to_decoded(img, format))
    }

    fn image_to_decoded(img: DynamicImage, format: ImageFormat) -> DecodedImage {
        let (width, height) = img.dimensions();
        let rgba = img.into_rgba8();

        DecodedImage {
            pixels: rgba.into_raw(),
            width,
            height,
            format,
        }
    }
}

/// Image decoding errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ImageError {
    #[error("Empty image payload")]
    Empty,

    #[error("Unsupported image format")]
    UnsupportedFormat,

    #[error("Decode failed: {0}")]
    DecodeFailed(String),
}
