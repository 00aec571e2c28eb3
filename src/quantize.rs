//! Threshold quantization of RGB samples into a packed dot matrix.

use log::debug;

/// Luminance threshold used when the caller has no preference.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Immutable 1-bit-per-pixel bitmap.
///
/// Pixel `i = y * width + x` is stored in word `i / 32`, bit `i % 32`
/// (LSB first). The word buffer is sized once at construction to
/// `ceil(width * height / 32)` and never grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotMatrix {
    width: u16,
    height: u16,
    bits: Box<[u32]>,
}

impl DotMatrix {
    fn blank(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        DotMatrix {
            width,
            height,
            bits: vec![0u32; (len + 31) / 32].into_boxed_slice(),
        }
    }

    fn set(&mut self, index: usize) {
        self.bits[index / 32] |= 1 << (index % 32);
    }

    /// Build a matrix from a predicate called once per pixel, row by row.
    pub fn from_fn<F>(width: u16, height: u16, mut f: F) -> Self
    where
        F: FnMut(u16, u16) -> bool,
    {
        let mut matrix = Self::blank(width, height);
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    matrix.set(y as usize * width as usize + x as usize);
                }
            }
        }
        matrix
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bits(&self) -> &[u32] {
        &self.bits
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read one dot. Coordinates outside the matrix read as unset.
    pub fn get(&self, x: u16, y: u16) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let index = y as usize * self.width as usize + x as usize;
        self.bits[index / 32] & (1 << (index % 32)) != 0
    }
}

/// Integer luminance of a `0xAARRGGBB` sample; alpha is ignored.
pub fn luminance(pixel: u32) -> u8 {
    let r = (pixel >> 16 & 0xff) as f64;
    let g = (pixel >> 8 & 0xff) as f64;
    let b = (pixel & 0xff) as f64;
    (r * 0.3 + g * 0.59 + b * 0.11) as u8
}

/// Convert row-major `0xAARRGGBB` samples into a dot matrix.
///
/// A dot is set when the pixel's luminance is strictly greater than
/// `threshold`, so a set bit marks a *bright* source pixel. Printers fire a
/// dot for every set bit: a dark-on-light source therefore prints inverted
/// unless the caller inverts the source first.
///
/// Samples beyond `width * height` are ignored; missing samples stay unset.
pub fn quantize(pixels: &[u32], width: u16, height: u16, threshold: u8) -> DotMatrix {
    let mut matrix = DotMatrix::blank(width, height);
    let len = matrix.len();

    if pixels.len() < len {
        debug!(
            "{} samples for a {}x{} bitmap, padding with unset dots",
            pixels.len(),
            width,
            height
        );
    }

    for (i, &pixel) in pixels.iter().take(len).enumerate() {
        if luminance(pixel) > threshold {
            matrix.set(i);
        }
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: u32 = 0xFFFF_FFFF;
    const BLACK: u32 = 0xFF00_0000;

    #[test]
    fn luminance_weights_channels() {
        assert_eq!(luminance(0x0000_0000), 0);
        assert_eq!(luminance(0x00FF_0000), 76);
        assert_eq!(luminance(0x0000_FF00), 150);
        assert_eq!(luminance(0x0000_00FF), 28);
        assert_eq!(luminance(0x0064_6464), 100);
    }

    #[test]
    fn luminance_ignores_alpha() {
        assert_eq!(luminance(0x0080_8080), luminance(0xFF80_8080));
    }

    #[test]
    fn threshold_is_strict() {
        // luminance of a 0x64 gray is exactly 100
        let gray = 0x0064_6464;
        assert!(!quantize(&[gray], 1, 1, 100).get(0, 0));
        assert!(quantize(&[gray], 1, 1, 99).get(0, 0));
    }

    #[test]
    fn threshold_extremes() {
        let pixels = [WHITE, BLACK, 0x0002_0202, 0x0080_8080, 0x00FF_0000];
        let len = pixels.len() as u16;

        let none = quantize(&pixels, len, 1, 255);
        assert!(none.bits().iter().all(|&word| word == 0));

        // black is the only sample with zero luminance
        let all = quantize(&pixels, len, 1, 0);
        for x in 0..len {
            assert_eq!(all.get(x, 0), pixels[x as usize] & 0x00FF_FFFF != 0);
        }
        assert!(!all.get(1, 0));
    }

    #[test]
    fn bright_pixels_set_bits() {
        let pixels = [WHITE, BLACK, BLACK, WHITE];
        let matrix = quantize(&pixels, 2, 2, DEFAULT_THRESHOLD);
        assert!(matrix.get(0, 0));
        assert!(!matrix.get(1, 0));
        assert!(!matrix.get(0, 1));
        assert!(matrix.get(1, 1));
        assert_eq!(matrix.bits(), &[0b1001]);
    }

    #[test]
    fn word_count_is_ceiling_of_pixels_over_32() {
        let cases: [(u16, u16, usize); 8] = [
            (0, 0, 0),
            (0, 5, 0),
            (1, 1, 1),
            (32, 1, 1),
            (33, 1, 2),
            (8, 8, 2),
            (7, 9, 2),
            (100, 3, 10),
        ];
        for &(w, h, words) in &cases {
            let matrix = quantize(&[], w, h, DEFAULT_THRESHOLD);
            assert_eq!(matrix.bits().len(), words, "{}x{}", w, h);
        }
    }

    #[test]
    fn bits_pack_lsb_first_across_words() {
        let mut pixels = vec![BLACK; 40];
        pixels[0] = WHITE;
        pixels[31] = WHITE;
        pixels[32] = WHITE;
        pixels[39] = WHITE;
        let matrix = quantize(&pixels, 40, 1, DEFAULT_THRESHOLD);
        assert_eq!(matrix.bits(), &[0x8000_0001, 0x0000_0081]);
    }

    #[test]
    fn short_input_leaves_remaining_dots_unset() {
        let matrix = quantize(&[WHITE], 3, 1, DEFAULT_THRESHOLD);
        assert!(matrix.get(0, 0));
        assert!(!matrix.get(1, 0));
        assert!(!matrix.get(2, 0));
    }

    #[test]
    fn from_fn_agrees_with_get() {
        let matrix = DotMatrix::from_fn(5, 7, |x, y| (x + y) % 3 == 0);
        for y in 0..7 {
            for x in 0..5 {
                assert_eq!(matrix.get(x, y), (x + y) % 3 == 0);
            }
        }
        assert!(!matrix.get(5, 0));
        assert!(!matrix.get(0, 7));
    }

    #[test]
    fn empty_matrix() {
        let matrix = quantize(&[WHITE, WHITE], 0, 2, DEFAULT_THRESHOLD);
        assert!(matrix.is_empty());
        assert!(matrix.bits().is_empty());
    }
}
