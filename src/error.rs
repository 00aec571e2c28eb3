//! Error types for bitmap loading and raster encoding.
//!
//! Quantizing and encoding never fail on their own; everything here comes
//! from reading the source image, validating the opcode table or parsing
//! user input.

use crate::commands::Opcode;
use thiserror::Error;

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The bitmap file could not be read, or the output could not be written.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The bitmap payload is malformed or in an unsupported format.
    #[error("Failed to decode bitmap: {0}")]
    Decode(#[from] image::ImageError),

    /// Raster widths and heights travel as 16-bit values on the wire.
    #[error("Bitmap is too large: {width}x{height}, maximum is 65535x65535")]
    DimensionsTooLarge { width: u32, height: u32 },

    /// A required opcode was not supplied to the command set.
    ///
    /// Raised while building a [`RasterCommandSet`](crate::RasterCommandSet),
    /// so no byte is ever emitted with an incomplete table.
    #[error("Missing opcode {}", .0.name())]
    MissingOpcode(Opcode),

    #[error("Unknown opcode name: {0}")]
    UnknownOpcode(String),

    #[error("Invalid image size mode: {0}")]
    InvalidSizeMode(String),

    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, Error>;
