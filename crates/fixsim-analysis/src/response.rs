//! FIR magnitude response.
//!
//! The response is sampled at [`RESPONSE_POINTS`] frequencies
//! `ω_k = πk / 256`, from DC up to (but excluding) Nyquist, and reported in
//! dB as `20·log10(max(|H(ω_k)|, 1e-9))`.

use std::f64::consts::PI;

/// Number of frequencies the response is evaluated at.
pub const RESPONSE_POINTS: usize = 256;

/// Magnitude floor applied before converting to dB.
pub const MAGNITUDE_FLOOR: f64 = 1e-9;

/// Magnitude response of an FIR filter in dB.
///
/// Returns an empty vector when `coefficients` is empty.
pub fn calculate_frequency_response(coefficients: &[f64]) -> Vec<f64> {
    if coefficients.is_empty() {
        return Vec::new();
    }

    (0..RESPONSE_POINTS)
        .map(|k| {
            let omega = PI * k as f64 / RESPONSE_POINTS as f64;
            let (real, imag) = coefficients.iter().enumerate().fold(
                (0.0, 0.0),
                |(re, im), (n, &c)| {
                    let phase = omega * n as f64;
                    (re + c * phase.cos(), im - c * phase.sin())
                },
            );
            let magnitude = (real * real + imag * imag).sqrt();
            20.0 * magnitude.max(MAGNITUDE_FLOOR).log10()
        })
        .collect()
}

/// Normalized frequency (cycles per sample) of each response point: `k / 512`.
pub fn response_frequencies() -> Vec<f64> {
    (0..RESPONSE_POINTS)
        .map(|k| k as f64 / (RESPONSE_POINTS * 2) as f64)
        .collect()
}
