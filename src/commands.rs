//! Printer opcode table used by the raster encoder.
//!
//! The encoder never hard-codes opcode bytes. Callers hand it a
//! [`RasterCommandSet`] built once and validated up front, so an incomplete
//! table is rejected before a single byte reaches the sink.

use crate::error::{Error, Result};
use log::debug;

/// Symbolic names of the opcodes the raster encoder emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Set line spacing; followed by one parameter byte.
    LsSet,
    SRasterNormal,
    SRasterDoubleWidth,
    SRasterDoubleHeight,
    SRasterQuadruple,
    /// 8-dot bit image, one data byte per column.
    BitImage1,
    /// 24-dot bit image, three data bytes per column.
    BitImage33,
    /// Line feed committing a 24-dot band.
    CtlLf,
}

impl Opcode {
    pub const ALL: [Opcode; 8] = [
        Opcode::LsSet,
        Opcode::SRasterNormal,
        Opcode::SRasterDoubleWidth,
        Opcode::SRasterDoubleHeight,
        Opcode::SRasterQuadruple,
        Opcode::BitImage1,
        Opcode::BitImage33,
        Opcode::CtlLf,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::LsSet => "LS_SET",
            Self::SRasterNormal => "S_RASTER_N",
            Self::SRasterDoubleWidth => "S_RASTER_2W",
            Self::SRasterDoubleHeight => "S_RASTER_2H",
            Self::SRasterQuadruple => "S_RASTER_Q",
            Self::BitImage1 => "BIT_IMAGE_1",
            Self::BitImage33 => "BIT_IMAGE_33",
            Self::CtlLf => "CTL_LF",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| op.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Validated, immutable opcode table.
///
/// Every [`Opcode`] is guaranteed to map to a non-empty byte string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterCommandSet {
    opcodes: Vec<Vec<u8>>,
}

impl RasterCommandSet {
    /// Start an empty table.
    pub fn builder() -> CommandSetBuilder {
        CommandSetBuilder::default()
    }

    /// Build a table from `(name, bytes)` pairs such as `("LS_SET", b"\x1b\x33")`.
    ///
    /// Later entries override earlier ones with the same name.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Vec<u8>>,
    {
        let mut builder = Self::builder();
        for (name, bytes) in entries {
            let name = name.as_ref();
            let op = Opcode::from_name(name).ok_or_else(|| Error::UnknownOpcode(name.to_string()))?;
            builder = builder.set(op, bytes);
        }
        builder.build()
    }

    /// Standard ESC/POS values.
    ///
    /// `ESC 3 n` for line spacing, `GS v 0 m` for the raster scale,
    /// `ESC * 0` and `ESC * 33` for the 8-dot and 24-dot bit images.
    pub fn esc_pos() -> Self {
        RasterCommandSet {
            opcodes: vec![
                vec![0x1B, 0x33],
                vec![0x1D, 0x76, 0x30, 0x00],
                vec![0x1D, 0x76, 0x30, 0x01],
                vec![0x1D, 0x76, 0x30, 0x02],
                vec![0x1D, 0x76, 0x30, 0x03],
                vec![0x1B, 0x2A, 0x00],
                vec![0x1B, 0x2A, 0x21],
                vec![0x0A],
            ],
        }
    }

    pub fn get(&self, op: Opcode) -> &[u8] {
        &self.opcodes[op.index()]
    }
}

/// Builder for [`RasterCommandSet`].
#[derive(Debug, Clone, Default)]
pub struct CommandSetBuilder {
    opcodes: [Option<Vec<u8>>; 8],
}

impl CommandSetBuilder {
    pub fn set(mut self, op: Opcode, bytes: impl Into<Vec<u8>>) -> Self {
        self.opcodes[op.index()] = Some(bytes.into());
        self
    }

    pub fn ls_set(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::LsSet, bytes)
    }

    pub fn s_raster_normal(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::SRasterNormal, bytes)
    }

    pub fn s_raster_double_width(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::SRasterDoubleWidth, bytes)
    }

    pub fn s_raster_double_height(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::SRasterDoubleHeight, bytes)
    }

    pub fn s_raster_quadruple(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::SRasterQuadruple, bytes)
    }

    pub fn bit_image_1(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::BitImage1, bytes)
    }

    pub fn bit_image_33(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::BitImage33, bytes)
    }

    pub fn ctl_lf(self, bytes: impl Into<Vec<u8>>) -> Self {
        self.set(Opcode::CtlLf, bytes)
    }

    /// Validate the table. An absent or empty entry is reported as missing.
    pub fn build(self) -> Result<RasterCommandSet> {
        let mut opcodes = Vec::with_capacity(Opcode::ALL.len());
        for (op, bytes) in Opcode::ALL.iter().zip(self.opcodes) {
            match bytes {
                Some(bytes) if !bytes.is_empty() => {
                    debug!("{} = {:02X?}", op.name(), bytes);
                    opcodes.push(bytes);
                }
                _ => return Err(Error::MissingOpcode(*op)),
            }
        }
        Ok(RasterCommandSet { opcodes })
    }
}
