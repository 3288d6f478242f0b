//! Fixed-point FIR filter engine.
//!
//! Simulates a direct-form FIR running on fixed-point hardware: samples and
//! coefficients are quantized independently, every tap product is rescaled
//! with [`fixed_multiply`] at the *coefficient* width, products are summed in
//! a wide accumulator, and the sum is dequantized at the *data* width.
//!
//! The rescale always uses the coefficient width rather than a combined
//! data/coefficient scale. Keep it that way: stored reference outputs depend
//! on this asymmetry.
//!
//! # Accumulator
//!
//! The accumulator is an `i128` and is never truncated to a register width.
//! Real hardware would need guard bits or saturation logic; this engine models
//! the ideal case only. The sole exception is the `i128` range itself: sums of
//! saturated `i64` words clamp at `i128::MIN`/`MAX` rather than wrap.
//!
//! # Example
//!
//! ```rust
//! use fixsim_core::{BitWidth, apply_fixed_point_filter, moving_average};
//!
//! let bits = BitWidth::new(16).unwrap();
//! let mut impulse = vec![0.0; 16];
//! impulse[0] = 1.0;
//!
//! let out = apply_fixed_point_filter(&impulse, &moving_average(4), bits, bits);
//! assert!((out[0] - 0.25).abs() < 1e-4);
//! assert!(out[4].abs() < 1e-9);
//! ```

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::codec::{BitWidth, dequantize, fixed_multiply, quantize_slice};
use crate::error::DspError;

/// Filter order used when a filter stage does not specify one.
pub const DEFAULT_FILTER_ORDER: usize = 11;

/// Apply an FIR filter with fixed-point arithmetic.
///
/// Output length equals input length. The first `taps - 1` outputs are
/// ramp-up values computed from the samples available so far (history before
/// index 0 is zero). An empty coefficient slice bypasses the filter and
/// returns the input unchanged.
pub fn apply_fixed_point_filter(
    input: &[f64],
    coefficients: &[f64],
    data_bits: BitWidth,
    coeff_bits: BitWidth,
) -> Vec<f64> {
    if coefficients.is_empty() {
        return input.to_vec();
    }

    let q_coeffs: Vec<i64> = quantize_slice(coefficients, coeff_bits).collect();
    let q_input: Vec<i64> = quantize_slice(input, data_bits).collect();

    let mut output = Vec::with_capacity(q_input.len());
    for i in 0..q_input.len() {
        let mut acc: i128 = 0;
        for (j, &c) in q_coeffs.iter().enumerate().take(i + 1) {
            acc = acc.saturating_add(fixed_multiply(q_input[i - j], c, coeff_bits));
        }
        output.push(dequantize_wide(acc, data_bits));
    }
    output
}

/// Dequantize an accumulator that may exceed `i64`.
#[inline]
fn dequantize_wide(acc: i128, bits: BitWidth) -> f64 {
    match i64::try_from(acc) {
        Ok(v) => dequantize(v, bits),
        Err(_) => acc as f64 / bits.scale() as f64,
    }
}

/// Uniform moving-average taps: `order` coefficients of `1 / order`.
///
/// `order == 0` yields an empty (bypass) set.
pub fn moving_average(order: usize) -> Vec<f64> {
    if order == 0 {
        return Vec::new();
    }
    vec![1.0 / order as f64; order]
}

/// A coefficient set bound to the word widths it runs at.
///
/// Immutable once built; produced when a design result or a custom
/// coefficient set is applied to a chain stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    coefficients: Vec<f64>,
    data_bits: BitWidth,
    coeff_bits: BitWidth,
}

impl FilterConfig {
    /// Bind coefficients to data and coefficient widths.
    pub fn new(coefficients: Vec<f64>, data_bits: BitWidth, coeff_bits: BitWidth) -> Self {
        Self {
            coefficients,
            data_bits,
            coeff_bits,
        }
    }

    /// Build from raw bit counts, validating both widths.
    pub fn try_new(coefficients: Vec<f64>, data_bits: u32, coeff_bits: u32) -> Result<Self, DspError> {
        Ok(Self::new(
            coefficients,
            BitWidth::new(data_bits)?,
            BitWidth::new(coeff_bits)?,
        ))
    }

    /// Moving average of `order` taps at the 16/16-bit baseline widths.
    pub fn baseline(order: usize) -> Result<Self, DspError> {
        if order == 0 {
            return Err(DspError::InvalidFilterOrder(order));
        }
        Ok(Self::new(
            moving_average(order),
            BitWidth::BASELINE,
            BitWidth::BASELINE,
        ))
    }

    /// Filter taps.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Width samples are quantized to.
    pub fn data_bits(&self) -> BitWidth {
        self.data_bits
    }

    /// Width coefficients are quantized to.
    pub fn coeff_bits(&self) -> BitWidth {
        self.coeff_bits
    }

    /// Number of taps.
    pub fn taps(&self) -> usize {
        self.coefficients.len()
    }

    /// Same widths, different coefficients.
    pub fn with_coefficients(&self, coefficients: Vec<f64>) -> Self {
        Self {
            coefficients,
            data_bits: self.data_bits,
            coeff_bits: self.coeff_bits,
        }
    }

    /// Run the filter over `input`.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        apply_fixed_point_filter(input, &self.coefficients, self.data_bits, self.coeff_bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b16() -> BitWidth {
        BitWidth::new(16).unwrap()
    }

    #[test]
    fn empty_coefficients_bypass() {
        let input = vec![0.3, -0.7, 1.5, f64::NAN];
        let out = apply_fixed_point_filter(&input, &[], b16(), b16());
        assert_eq!(out.len(), input.len());
        assert_eq!(out[..3], input[..3]);
        assert!(out[3].is_nan());
    }

    #[test]
    fn output_length_matches_input() {
        let input: Vec<f64> = (0..37).map(|i| (i as f64 * 0.1).sin()).collect();
        let out = apply_fixed_point_filter(&input, &[0.25, 0.5, 0.25], b16(), b16());
        assert_eq!(out.len(), 37);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let out = apply_fixed_point_filter(&[], &[0.5, 0.5], b16(), b16());
        assert!(out.is_empty());
    }

    #[test]
    fn unit_tap_is_near_identity() {
        let input: Vec<f64> = (0..64).map(|i| (i as f64 * 0.3).cos() * 0.9).collect();
        let out = apply_fixed_point_filter(&input, &[1.0], b16(), b16());
        for (x, y) in input.iter().zip(&out) {
            assert!((x - y).abs() <= 1.0 / (2.0 * 32767.0) + 1e-12, "{x} vs {y}");
        }
    }

    #[test]
    fn ramp_up_uses_partial_sums() {
        let input = vec![1.0; 5];
        let out = apply_fixed_point_filter(&input, &moving_average(4), b16(), b16());
        // 0.25 -> 8192 at 16 bits; each product is 32767 * 8192 / 32767 = 8192
        let expected = [8192.0, 16384.0, 24576.0, 32768.0, 32768.0];
        for (y, e) in out.iter().zip(expected) {
            assert!((y - e / 32767.0).abs() < 1e-12, "{y} vs {}", e / 32767.0);
        }
    }

    #[test]
    fn rescale_uses_coefficient_width() {
        // data at 16 bits, coefficients at 8 bits
        let data = b16();
        let coeff = BitWidth::new(8).unwrap();
        let out = apply_fixed_point_filter(&[0.5], &[0.5], data, coeff);
        // q(0.5,16)=16384, q(0.5,8)=64, 16384*64/127 = 8256.5... -> 8257
        assert!((out[0] - 8257.0 / 32767.0).abs() < 1e-12, "got {}", out[0]);
    }

    #[test]
    fn moving_average_taps() {
        let taps = moving_average(11);
        assert_eq!(taps.len(), 11);
        assert!(taps.iter().all(|&c| (c - 1.0 / 11.0).abs() < 1e-15));
        assert!(moving_average(0).is_empty());
    }

    #[test]
    fn filter_config_accessors() {
        let cfg = FilterConfig::try_new(vec![0.1, 0.8, 0.1], 12, 10).unwrap();
        assert_eq!(cfg.taps(), 3);
        assert_eq!(cfg.data_bits().bits(), 12);
        assert_eq!(cfg.coeff_bits().bits(), 10);

        let swapped = cfg.with_coefficients(vec![1.0]);
        assert_eq!(swapped.coefficients(), &[1.0]);
        assert_eq!(swapped.data_bits(), cfg.data_bits());
    }

    #[test]
    fn filter_config_rejects_bad_widths() {
        assert_eq!(
            FilterConfig::try_new(vec![1.0], 1, 16),
            Err(DspError::InvalidBitWidth(1))
        );
        assert_eq!(FilterConfig::baseline(0), Err(DspError::InvalidFilterOrder(0)));
    }

    #[test]
    fn extreme_finite_inputs_do_not_overflow() {
        let b16 = BitWidth::BASELINE;
        let out = apply_fixed_point_filter(&[-1e300], &[-1e300], b16, b16);
        assert_eq!(out.len(), 1);
        assert!(out[0].is_finite() && out[0] > 0.0);
    }

    #[test]
    fn accumulator_saturates_instead_of_wrapping() {
        let b2 = BitWidth::new(2).unwrap();
        // Four taps of 2^126 each would wrap a plain i128 sum.
        let input = [-1e300; 4];
        let coeffs = [-1e300; 4];
        let out = apply_fixed_point_filter(&input, &coeffs, b2, b2);
        assert_eq!(out.len(), 4);
        assert!(out.iter().all(|&y| y.is_finite() && y > 0.0));
        assert!((out[3] - i128::MAX as f64).abs() / (i128::MAX as f64) < 1e-12);
    }
}
