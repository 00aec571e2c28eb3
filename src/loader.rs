//! Bitmap loading.
//!
//! Decoding itself is delegated to the `image` crate; this module only turns
//! the decoded pixels into row-major `0xAARRGGBB` samples and chains the
//! load into quantization.

use log::{debug, info};
use std::convert::TryFrom;
use std::path::Path;

use crate::{
    error::{Error, Result},
    quantize::{quantize, DotMatrix},
};

/// Decoded bitmap as row-major `0xAARRGGBB` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBitmap {
    pub width: u16,
    pub height: u16,
    pub pixels: Vec<u32>,
}

impl DecodedBitmap {
    pub fn quantize(&self, threshold: u8) -> DotMatrix {
        quantize(&self.pixels, self.width, self.height, threshold)
    }
}

/// Decode an in-memory bitmap. The format is detected from the payload.
pub fn decode_bitmap(bytes: &[u8]) -> Result<DecodedBitmap> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (w, h) = image.dimensions();

    let (width, height) = match (u16::try_from(w), u16::try_from(h)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => return Err(Error::DimensionsTooLarge { width: w, height: h }),
    };

    let pixels = image
        .pixels()
        .map(|p| {
            let [r, g, b, a] = p.0;
            u32::from_be_bytes([a, r, g, b])
        })
        .collect();

    debug!("decoded {}x{} bitmap", width, height);
    Ok(DecodedBitmap {
        width,
        height,
        pixels,
    })
}

/// Read and decode a bitmap file, blocking the current thread.
pub fn load_bitmap<P: AsRef<Path>>(path: P) -> Result<DecodedBitmap> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    info!("loaded {} ({} bytes)", path.display(), bytes.len());
    decode_bitmap(&bytes)
}

/// Read and decode a bitmap file without blocking the runtime.
pub async fn load_bitmap_async<P: AsRef<Path>>(path: P) -> Result<DecodedBitmap> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    info!("loaded {} ({} bytes)", path.display(), bytes.len());
    decode_bitmap(&bytes)
}

/// Load a bitmap file and quantize it.
///
/// Load and decode failures return before any quantization happens.
pub async fn load<P: AsRef<Path>>(path: P, threshold: u8) -> Result<DotMatrix> {
    let bitmap = load_bitmap_async(path).await?;
    Ok(bitmap.quantize(threshold))
}
