//! Fidelity metrics comparing a processed signal against its clean reference.
//!
//! Degenerate inputs return sentinels rather than errors: empty or
//! mismatched sequences score `0` for both metrics, and a perfect
//! reconstruction has infinite SNR.

/// Mean squared error between `clean` and `test`.
///
/// Returns `0.0` when the sequences are empty or differ in length.
pub fn calculate_mse(clean: &[f64], test: &[f64]) -> f64 {
    if clean.is_empty() || clean.len() != test.len() {
        tracing::debug!(clean = clean.len(), test = test.len(), "mse: degenerate input");
        return 0.0;
    }
    let sum: f64 = clean
        .iter()
        .zip(test)
        .map(|(c, t)| (c - t) * (c - t))
        .sum();
    sum / clean.len() as f64
}

/// Signal-to-noise ratio in dB: `10·log10(Σ clean² / Σ (clean - test)²)`.
///
/// | Condition | Result |
/// |-----------|--------|
/// | empty or mismatched lengths | `0` |
/// | error power is zero | `+∞` |
/// | signal power is zero | `0` |
///
/// The error-power check comes first, so two all-zero signals score `+∞`.
pub fn calculate_snr(clean: &[f64], test: &[f64]) -> f64 {
    if clean.is_empty() || clean.len() != test.len() {
        tracing::debug!(clean = clean.len(), test = test.len(), "snr: degenerate input");
        return 0.0;
    }

    let (signal_power, error_power) =
        clean
            .iter()
            .zip(test)
            .fold((0.0, 0.0), |(sig, err), (&c, &t)| {
                let e = c - t;
                (sig + c * c, err + e * e)
            });

    if error_power == 0.0 {
        return f64::INFINITY;
    }
    if signal_power == 0.0 {
        return 0.0;
    }
    10.0 * (signal_power / error_power).log10()
}

/// SNR and MSE of one output against the clean reference.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FidelityMetrics {
    /// Signal-to-noise ratio in dB
    pub snr: f64,
    /// Mean squared error
    pub mse: f64,
}

impl FidelityMetrics {
    /// Measure `test` against `clean`.
    pub fn measure(clean: &[f64], test: &[f64]) -> Self {
        Self {
            snr: calculate_snr(clean, test),
            mse: calculate_mse(clean, test),
        }
    }
}
