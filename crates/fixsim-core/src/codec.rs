//! Signed fixed-point codec.
//!
//! A value `x` is represented at bit-width `b` by the integer
//! `round(x * scale)`, where `scale = 2^(b-1) - 1`. A full-scale input of
//! `±1.0` therefore maps to `±scale`, the largest magnitude a signed `b`-bit
//! word holds symmetrically.
//!
//! # Rounding
//!
//! All rounding in this crate is *round half up* (`floor(x + 0.5)`), so
//! `2.5 → 3` and `-2.5 → -2`. Reference waveforms for the fixed-point
//! filters were produced with this rule; switching to round-half-away-from-zero
//! changes results by one LSB on exact ties.
//!
//! # Overflow
//!
//! No clamping or saturation is applied. Inputs with `|x| > 1` quantize to
//! integers beyond the nominal `b`-bit range; this is an idealization, not a
//! hardware-accurate model. Only the final cast to `i64` saturates (and maps
//! `NaN` to zero). Products of saturated words stay exact in `i128`, and the
//! filter accumulator saturates at the `i128` bounds instead of wrapping.
//!
//! # Example
//!
//! ```rust
//! use fixsim_core::{BitWidth, dequantize, quantize};
//!
//! let bits = BitWidth::new(16).unwrap();
//! assert_eq!(bits.scale(), 32767);
//! assert_eq!(quantize(0.5, bits), 16384);
//! assert!((dequantize(16384, bits) - 0.5).abs() <= 1.0 / (2.0 * 32767.0));
//! ```

use crate::error::DspError;

/// Total bit count of a signed fixed-point word.
///
/// Construction validates the range, so every function taking a `BitWidth`
/// can compute its scale without guarding against division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitWidth(u32);

impl BitWidth {
    /// Smallest supported width. One bit leaves a scale of zero.
    pub const MIN: u32 = 2;
    /// Largest supported width.
    pub const MAX: u32 = 32;

    /// The 16-bit width used by baseline (unconfigured) filter stages.
    pub const BASELINE: BitWidth = BitWidth(16);

    /// Create a bit-width, rejecting values outside `2..=32`.
    pub fn new(bits: u32) -> Result<Self, DspError> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(DspError::InvalidBitWidth(bits))
        }
    }

    /// Number of bits.
    #[inline]
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Quantization scale `2^(bits-1) - 1`.
    #[inline]
    pub fn scale(self) -> i64 {
        (1_i64 << (self.0 - 1)) - 1
    }

    /// Size of one least-significant bit in the floating-point domain.
    #[inline]
    pub fn lsb(self) -> f64 {
        1.0 / self.scale() as f64
    }
}

impl TryFrom<u32> for BitWidth {
    type Error = DspError;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<BitWidth> for u32 {
    fn from(width: BitWidth) -> Self {
        width.0
    }
}

impl core::fmt::Display for BitWidth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}-bit", self.0)
    }
}

/// Round half up: `floor(x + 0.5)`.
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    libm::floor(x + 0.5)
}

/// Quantize a floating-point value to a signed fixed-point integer.
#[inline]
pub fn quantize(value: f64, bits: BitWidth) -> i64 {
    round_half_up(value * bits.scale() as f64) as i64
}

/// Convert a fixed-point integer back to floating point.
#[inline]
pub fn dequantize(value: i64, bits: BitWidth) -> f64 {
    value as f64 / bits.scale() as f64
}

/// Quantize every element of a slice.
pub fn quantize_slice(values: &[f64], bits: BitWidth) -> impl Iterator<Item = i64> + '_ {
    values.iter().map(move |&v| quantize(v, bits))
}

/// Fixed-point multiply-and-rescale: `round(a * b / scale(bits))`.
///
/// In hardware this is the product followed by an arithmetic shift of
/// `bits - 1`; here the division by the symmetric scale is done exactly in
/// integer arithmetic with the same round-half-up rule as [`quantize`].
#[inline]
pub fn fixed_multiply(a: i64, b: i64, bits: BitWidth) -> i128 {
    // |a * b| <= 2^126, so the product itself cannot overflow.
    let product = a as i128 * b as i128;
    let scale = bits.scale() as i128;
    // floor(p/s + 1/2) without forming 2p: round up when r >= s/2.
    let quotient = product.div_euclid(scale);
    let remainder = product.rem_euclid(scale);
    if remainder >= scale - remainder {
        quotient + 1
    } else {
        quotient
    }
}
