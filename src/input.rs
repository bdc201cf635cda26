use std::path::Path;

use image::RgbImage;
use tracing::debug;

use crate::error::{InputError, Result};

/// Decode uploaded bytes into an RGB product image
///
/// The format is sniffed from the data. Only the codecs compiled into the
/// `image` dependency (JPEG and PNG) are accepted.
pub fn decode_product(bytes: &[u8]) -> Result<RgbImage> {
    let decoded = image::load_from_memory(bytes).map_err(|source| InputError::Decode { source })?;
    let rgb = decoded.to_rgb8();
    debug!("Decoded product image {}x{}", rgb.width(), rgb.height());
    Ok(rgb)
}

/// Read and decode a product image from disk
pub fn load_product<P: AsRef<Path>>(path: P) -> Result<RgbImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|_| InputError::ReadFailed {
        path: path.display().to_string(),
    })?;
    decode_product(&bytes)
}
