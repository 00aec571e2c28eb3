use crate::commands::{Opcode, RasterCommandSet};
use crate::error::Error;
use std::str::FromStr;

/// Raster scale applied by the printer firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrinterImageSizeMode {
    Normal,
    DoubleWidth,
    DoubleHeight,
    Quadruple,
}

impl Default for PrinterImageSizeMode {
    fn default() -> Self {
        Self::Normal
    }
}

impl PrinterImageSizeMode {
    /// Unknown codes fall back to `Normal`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::DoubleWidth,
            2 => Self::DoubleHeight,
            3 => Self::Quadruple,
            _ => Self::Normal,
        }
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Self::Normal => Opcode::SRasterNormal,
            Self::DoubleWidth => Opcode::SRasterDoubleWidth,
            Self::DoubleHeight => Opcode::SRasterDoubleHeight,
            Self::Quadruple => Opcode::SRasterQuadruple,
        }
    }

    pub fn opcode_bytes<'a>(&self, commands: &'a RasterCommandSet) -> &'a [u8] {
        commands.get(self.opcode())
    }
}

impl FromStr for PrinterImageSizeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" | "n" => Ok(Self::Normal),
            "double-width" | "2w" => Ok(Self::DoubleWidth),
            "double-height" | "2h" => Ok(Self::DoubleHeight),
            "quadruple" | "q" => Ok(Self::Quadruple),
            _ => Err(Error::InvalidSizeMode(s.to_string())),
        }
    }
}
