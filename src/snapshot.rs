//! Data-URI snapshots of the drawing surface.
//!
//! A snapshot is the surface encoded as a PNG and wrapped in a
//! `data:image/png;base64,` URI, the form the output field carries and
//! downstream consumers decode. Encoding is lossless and deterministic:
//! the same pixels always produce a payload that decodes back to the
//! same pixels.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use image::RgbaImage;
use image::codecs::png::PngEncoder;

use crate::surface::Surface;

/// URI scheme prefix for PNG snapshots.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

#[derive(Debug)]
pub enum SnapshotError {
    /// The surface has zero area; there is nothing to encode.
    EmptySurface,
    Png(image::ImageError),
    Base64(base64::DecodeError),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::EmptySurface => write!(f, "Surface has zero area"),
            SnapshotError::Png(e) => write!(f, "PNG error: {}", e),
            SnapshotError::Base64(e) => write!(f, "Base64 error: {}", e),
        }
    }
}

impl From<image::ImageError> for SnapshotError {
    fn from(e: image::ImageError) -> Self {
        SnapshotError::Png(e)
    }
}

impl From<base64::DecodeError> for SnapshotError {
    fn from(e: base64::DecodeError) -> Self {
        SnapshotError::Base64(e)
    }
}

/// Encode the surface as a base64 PNG data URI.
pub fn encode_data_uri(surface: &Surface) -> Result<String, SnapshotError> {
    if surface.is_empty() {
        return Err(SnapshotError::EmptySurface);
    }

    let image = surface.image();
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    #[allow(deprecated)]
    encoder.encode(
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
    )?;

    Ok(format!("{}{}", DATA_URI_PREFIX, BASE64.encode(&png)))
}

/// Decode a PNG data URI (or a bare base64 payload) back into pixels.
///
/// Everything up to and including the last comma is treated as the URI
/// header, so consumers can pass the field value through unmodified.
pub fn decode_data_uri(uri: &str) -> Result<RgbaImage, SnapshotError> {
    let payload = match uri.trim().rsplit_once(',') {
        Some((_, payload)) => payload,
        None => uri.trim(),
    };
    let png = BASE64.decode(payload)?;
    let decoded = image::load_from_memory(&png)?;
    Ok(decoded.to_rgba8())
}
