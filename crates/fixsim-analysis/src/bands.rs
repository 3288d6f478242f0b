//! Band-power summaries for biosignals.
//!
//! Power is integrated over named frequency bands of a one-sided PSD and
//! doubled to account for the mirrored negative-frequency half. The DC bin
//! is never counted.
//!
//! # Example
//!
//! ```rust
//! use fixsim_analysis::{FftSize, WindowKind, calculate_eeg_bands, calculate_psd};
//!
//! let signal: Vec<f64> = (0..256)
//!     .map(|i| (2.0 * std::f64::consts::PI * 10.0 * i as f64 / 250.0).sin())
//!     .collect();
//! let psd = calculate_psd(&signal, FftSize::N256, WindowKind::Hann);
//! let bands = calculate_eeg_bands(&psd, 250.0);
//! assert!(bands.delta >= 0.0 && bands.beta >= 0.0);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::ParseKindError;
use crate::spectrum::{FftSize, calculate_psd};
use crate::window::WindowKind;

/// A frequency band specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    /// Human-readable name for the band
    pub name: &'static str,
    /// Lower edge in Hz
    pub low_hz: f64,
    /// Upper edge in Hz
    pub high_hz: f64,
}

impl FrequencyBand {
    /// Create a new frequency band.
    pub const fn new(name: &'static str, low_hz: f64, high_hz: f64) -> Self {
        Self {
            name,
            low_hz,
            high_hz,
        }
    }

    /// `low <= f < high`
    pub fn contains_half_open(&self, freq: f64) -> bool {
        freq >= self.low_hz && freq < self.high_hz
    }
}

/// Standard EEG frequency bands.
pub mod eeg_bands {
    use super::FrequencyBand;

    /// Delta band (0.5-4 Hz) - Deep sleep
    pub const DELTA: FrequencyBand = FrequencyBand::new("delta", 0.5, 4.0);

    /// Theta band (4-8 Hz) - Drowsiness, memory
    pub const THETA: FrequencyBand = FrequencyBand::new("theta", 4.0, 8.0);

    /// Alpha band (8-13 Hz) - Relaxed wakefulness
    pub const ALPHA: FrequencyBand = FrequencyBand::new("alpha", 8.0, 13.0);

    /// Beta band (13-30 Hz) - Active thinking, focus
    pub const BETA: FrequencyBand = FrequencyBand::new("beta", 13.0, 30.0);

    /// All bands in order of increasing frequency.
    pub const ALL: [FrequencyBand; 4] = [DELTA, THETA, ALPHA, BETA];
}

/// Heart-rate-variability frequency bands.
pub mod hrv_bands {
    use super::FrequencyBand;

    /// Low frequency (0.04-0.15 Hz), both edges inclusive
    pub const LF: FrequencyBand = FrequencyBand::new("lf", 0.04, 0.15);

    /// High frequency (0.15-0.4 Hz), lower edge exclusive
    pub const HF: FrequencyBand = FrequencyBand::new("hf", 0.15, 0.4);
}

/// Power in each EEG band.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EegBands {
    /// 0.5-4 Hz
    pub delta: f64,
    /// 4-8 Hz
    pub theta: f64,
    /// 8-13 Hz
    pub alpha: f64,
    /// 13-30 Hz
    pub beta: f64,
}

impl EegBands {
    /// `(band, power)` pairs in frequency order.
    pub fn iter(&self) -> impl Iterator<Item = (FrequencyBand, f64)> {
        eeg_bands::ALL
            .into_iter()
            .zip([self.delta, self.theta, self.alpha, self.beta])
    }

    /// Sum of all four bands.
    pub fn total(&self) -> f64 {
        self.delta + self.theta + self.alpha + self.beta
    }
}

/// LF/HF power and their ratio.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HrvBands {
    /// Power in the LF band
    pub lf_power: f64,
    /// Power in the HF band
    pub hf_power: f64,
    /// `lf_power / hf_power`, `+∞` when `hf_power` is zero
    pub lf_hf_ratio: f64,
}

/// Integrate EEG band power from a one-sided PSD.
///
/// With `N = psd.len()`, bin `k` is taken to sit at `k · sampling_rate / N`
/// and only bins `1 <= k < N/2` are visited. Band membership is half-open.
pub fn calculate_eeg_bands(psd: &[f64], sampling_rate: f64) -> EegBands {
    let n = psd.len();
    if n == 0 {
        return EegBands::default();
    }
    let resolution = sampling_rate / n as f64;

    let mut powers = [0.0; 4];
    for (k, &p) in psd.iter().enumerate().take(n / 2).skip(1) {
        let freq = k as f64 * resolution;
        for (band, power) in eeg_bands::ALL.iter().zip(powers.iter_mut()) {
            if band.contains_half_open(freq) {
                *power += p;
            }
        }
    }

    let [delta, theta, alpha, beta] = powers.map(|p| p * 2.0);
    EegBands {
        delta,
        theta,
        alpha,
        beta,
    }
}

/// Compute the PSD of `signal` and integrate LF and HF power.
///
/// Bins `1 <= k < fft_size/2` sit at `k · sampling_rate / fft_size`. LF is
/// `[0.04, 0.15]`; HF is `(0.15, 0.4]`, so 0.15 Hz counts toward LF only.
pub fn calculate_hrv_power_bands(
    signal: &[f64],
    sampling_rate: f64,
    fft_size: FftSize,
    window: WindowKind,
) -> HrvBands {
    let psd = calculate_psd(signal, fft_size, window);
    let resolution = sampling_rate / fft_size.points() as f64;

    let (lf, hf) = (hrv_bands::LF, hrv_bands::HF);

    let mut lf_power = 0.0;
    let mut hf_power = 0.0;
    for (k, &p) in psd.iter().enumerate().skip(1) {
        let freq = k as f64 * resolution;
        if freq >= lf.low_hz && freq <= lf.high_hz {
            lf_power += p;
        }
        if freq > hf.low_hz && freq <= hf.high_hz {
            hf_power += p;
        }
    }
    lf_power *= 2.0;
    hf_power *= 2.0;

    let lf_hf_ratio = if hf_power > 0.0 {
        lf_power / hf_power
    } else {
        f64::INFINITY
    };
    tracing::debug!(lf_power, hf_power, lf_hf_ratio, "hrv bands");

    HrvBands {
        lf_power,
        hf_power,
        lf_hf_ratio,
    }
}

/// Which band summary an analysis run computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BandAnalysis {
    /// No band summary
    #[default]
    None,
    /// EEG delta/theta/alpha/beta
    Eeg,
    /// HRV LF/HF
    Hrv,
}

impl BandAnalysis {
    const NAMES: [&'static str; 3] = ["none", "eeg", "hrv"];

    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        Self::NAMES[self as usize]
    }
}

impl fmt::Display for BandAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BandAnalysis {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(BandAnalysis::None),
            "eeg" => Ok(BandAnalysis::Eeg),
            "hrv" => Ok(BandAnalysis::Hrv),
            _ => Err(ParseKindError::new("band analysis", s, &Self::NAMES)),
        }
    }
}
