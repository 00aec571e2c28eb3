//! Thermal receipt printer raster encoder
//!
//! This crate turns a bitmap into the raster-graphics command stream of a
//! thermal receipt printer: pixels are thresholded into a packed dot matrix,
//! which is then framed into 8-dot or 24-dot bit-image bands.
//!
//! # Example
//!
//! ```rust,no_run
//! use thermal_raster::{
//!     load, PrinterImageSizeMode, RasterCommandSet, RasterEncoder, DEFAULT_THRESHOLD,
//! };
//!
//! # async fn run() -> thermal_raster::Result<()> {
//! let commands = RasterCommandSet::esc_pos();
//! let matrix = load("receipt-logo.bmp", DEFAULT_THRESHOLD).await?;
//! let bytes = RasterEncoder::new(&commands).encode_to_vec(&matrix, PrinterImageSizeMode::Normal);
//! # Ok(())
//! # }
//! ```

mod commands;
mod encoder;
mod error;
mod loader;
mod quantize;
mod size;

pub use crate::{
    commands::{CommandSetBuilder, Opcode, RasterCommandSet},
    encoder::{encode, FnSink, RasterEncoder, Sink, BAND_HEIGHT, LINE_SPACING, SINGLE_ROW_HEIGHT},
    error::{Error, Result},
    loader::{decode_bitmap, load, load_bitmap, load_bitmap_async, DecodedBitmap},
    quantize::{luminance, quantize, DotMatrix, DEFAULT_THRESHOLD},
    size::PrinterImageSizeMode,
};
