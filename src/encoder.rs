//! Raster command stream encoder.
//!
//! Layout of one encode call:
//!
//! ```text
//! LS_SET 0x18
//! <SIZE_OPCODE>
//! for each band:
//!     <BAND_OPCODE>       BIT_IMAGE_1 if height <= 8, else BIT_IMAGE_33
//!     widthLo widthHi
//!     <data bytes>        1 byte/column or 3 bytes/column
//!     [CTL_LF]            24-dot bands only
//! ```
//!
//! An empty matrix (zero width or zero height) produces the preamble only.

use log::debug;
use std::io::Write;

use crate::{
    commands::{Opcode, RasterCommandSet},
    error::Result,
    quantize::DotMatrix,
    size::PrinterImageSizeMode,
};

/// Line spacing in dots, matching the 24-dot band height.
pub const LINE_SPACING: u8 = 24;

/// Rows covered by one `BIT_IMAGE_33` band.
pub const BAND_HEIGHT: u16 = 24;

/// Tallest image sent through a single `BIT_IMAGE_1` transfer.
pub const SINGLE_ROW_HEIGHT: u16 = 8;

/// Byte consumer driven by the encoder, in wire order.
pub trait Sink {
    fn append(&mut self, bytes: &[u8]);
}

impl Sink for Vec<u8> {
    fn append(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Adapts a closure into a [`Sink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(&[u8])> Sink for FnSink<F> {
    fn append(&mut self, bytes: &[u8]) {
        (self.0)(bytes)
    }
}

/// Encodes dot matrices with one validated opcode table.
#[derive(Debug, Clone, Copy)]
pub struct RasterEncoder<'a> {
    commands: &'a RasterCommandSet,
}

impl<'a> RasterEncoder<'a> {
    pub fn new(commands: &'a RasterCommandSet) -> Self {
        RasterEncoder { commands }
    }

    /// Append the raster scale opcode for `size`.
    pub fn append_size(&self, size: PrinterImageSizeMode, sink: &mut impl Sink) {
        sink.append(size.opcode_bytes(self.commands));
    }

    pub fn encode(&self, matrix: &DotMatrix, size: PrinterImageSizeMode, sink: &mut impl Sink) {
        sink.append(self.commands.get(Opcode::LsSet));
        sink.append(&[LINE_SPACING]);
        self.append_size(size, sink);

        let (width, height) = (matrix.width(), matrix.height());
        if matrix.is_empty() {
            debug!("{}x{} matrix, no bands emitted", width, height);
            return;
        }

        if height <= SINGLE_ROW_HEIGHT {
            debug!("{}x{} matrix, single 8-dot transfer", width, height);
            self.append_single_row(matrix, sink);
        } else {
            debug!(
                "{}x{} matrix, {} 24-dot bands",
                width,
                height,
                (height as u32 + BAND_HEIGHT as u32 - 1) / BAND_HEIGHT as u32
            );
            let mut offset: u32 = 0;
            while offset < height as u32 {
                self.append_band(matrix, offset, sink);
                offset += BAND_HEIGHT as u32;
            }
        }
    }

    /// Encode into a fresh buffer.
    pub fn encode_to_vec(&self, matrix: &DotMatrix, size: PrinterImageSizeMode) -> Vec<u8> {
        let mut buf: Vec<u8> = Vec::new();
        self.encode(matrix, size, &mut buf);
        buf
    }

    /// Encode the whole stream in memory, then hand it to `writer` in one piece.
    pub fn write_to<W: Write>(
        &self,
        matrix: &DotMatrix,
        size: PrinterImageSizeMode,
        writer: &mut W,
    ) -> Result<()> {
        let buf = self.encode_to_vec(matrix, size);
        writer.write_all(&buf)?;
        writer.flush()?;
        debug!("wrote {} bytes", buf.len());
        Ok(())
    }

    fn append_single_row(&self, matrix: &DotMatrix, sink: &mut impl Sink) {
        sink.append(self.commands.get(Opcode::BitImage1));
        sink.append(&width_le(matrix.width()));
        let data: Vec<u8> = (0..matrix.width())
            .map(|x| column_slice(matrix, x, 0))
            .collect();
        sink.append(&data);
    }

    fn append_band(&self, matrix: &DotMatrix, offset: u32, sink: &mut impl Sink) {
        sink.append(self.commands.get(Opcode::BitImage33));
        sink.append(&width_le(matrix.width()));
        let mut data = Vec::with_capacity(matrix.width() as usize * 3);
        for x in 0..matrix.width() {
            for k in 0..3 {
                data.push(column_slice(matrix, x, offset + k * 8));
            }
        }
        sink.append(&data);
        sink.append(self.commands.get(Opcode::CtlLf));
    }
}

/// Encode `matrix` with `commands` into `sink`.
pub fn encode(
    matrix: &DotMatrix,
    size: PrinterImageSizeMode,
    commands: &RasterCommandSet,
    sink: &mut impl Sink,
) {
    RasterEncoder::new(commands).encode(matrix, size, sink)
}

fn width_le(width: u16) -> [u8; 2] {
    [(width & 0xff) as u8, (width >> 8 & 0xff) as u8]
}

/// Eight vertical dots of column `x` starting at row `top`; top row is bit 7.
/// Rows past the bottom of the matrix read as zero.
fn column_slice(matrix: &DotMatrix, x: u16, top: u32) -> u8 {
    let mut slice: u8 = 0;
    for b in 0..8u32 {
        let y = top + b;
        if y < matrix.height() as u32 && matrix.get(x, y as u16) {
            slice |= 1 << (7 - b);
        }
    }
    slice
}
