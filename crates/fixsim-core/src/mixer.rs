//! Carrier mixing and the DUC/DDC composite.
//!
//! The carrier frequency is expressed in cycles per [`MIXER_PERIOD`] samples,
//! independent of the signal's sampling rate: sample `i` is multiplied by
//! `cos(2π · cycles · i / 200)`.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::f64::consts::PI;

use crate::codec::BitWidth;
use crate::fir::apply_fixed_point_filter;

/// Samples per carrier-frequency unit.
pub const MIXER_PERIOD: f64 = 200.0;

/// Carrier used by the DUC/DDC stage, in cycles per [`MIXER_PERIOD`].
pub const DUC_DDC_CARRIER: f64 = 20.0;

/// Low-pass taps used by the DUC/DDC stage when none are configured.
pub const DUC_DDC_DEFAULT_TAPS: [f64; 5] = [0.1, 0.2, 0.4, 0.2, 0.1];

/// Multiply `input` by a cosine carrier.
pub fn apply_mixing(input: &[f64], carrier_cycles: f64) -> Vec<f64> {
    input
        .iter()
        .enumerate()
        .map(|(i, &x)| x * libm::cos(2.0 * PI * carrier_cycles * (i as f64 / MIXER_PERIOD)))
        .collect()
}

/// Digital up/down conversion: mix with the fixed carrier, then low-pass.
///
/// Empty `coefficients` select [`DUC_DDC_DEFAULT_TAPS`]. Data and
/// coefficients are both quantized at `bits`.
pub fn apply_duc_ddc(input: &[f64], coefficients: &[f64], bits: BitWidth) -> Vec<f64> {
    let mixed = apply_mixing(input, DUC_DDC_CARRIER);
    let taps = if coefficients.is_empty() {
        &DUC_DDC_DEFAULT_TAPS[..]
    } else {
        coefficients
    };
    apply_fixed_point_filter(&mixed, taps, bits, bits)
}
