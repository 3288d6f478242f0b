//! Power spectral density.
//!
//! [`calculate_psd`] is the reference implementation: the signal is
//! truncated or zero-padded to the transform size, windowed, and run through
//! a direct O(N²) DFT. Power in bin `k` is `(re² + im²) / N` for
//! `k < N/2`; bin `k` corresponds to `k · fs / N` Hz.
//!
//! [`calculate_psd_fft`] has the same contract but computes the transform
//! with `rustfft`. The two agree to within floating-point rounding.
//!
//! Transform sizes are restricted to [`FftSize`] so the direct DFT stays
//! interactive.

use std::f64::consts::PI;
use std::fmt;

use fixsim_core::DspError;
use rustfft::{FftPlanner, num_complex::Complex};

use crate::window::WindowKind;

/// Floor applied before converting power to decibels.
pub const POWER_FLOOR: f64 = 1e-12;

/// Supported transform sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum FftSize {
    /// 64 points
    N64,
    /// 128 points
    N128,
    /// 256 points
    #[default]
    N256,
    /// 512 points
    N512,
    /// 1024 points
    N1024,
}

impl FftSize {
    /// Every size, smallest first.
    pub const ALL: [FftSize; 5] = [
        FftSize::N64,
        FftSize::N128,
        FftSize::N256,
        FftSize::N512,
        FftSize::N1024,
    ];

    /// Number of points.
    pub fn points(self) -> usize {
        match self {
            FftSize::N64 => 64,
            FftSize::N128 => 128,
            FftSize::N256 => 256,
            FftSize::N512 => 512,
            FftSize::N1024 => 1024,
        }
    }

    /// Number of one-sided power bins (`len / 2`).
    pub fn bins(self) -> usize {
        self.points() / 2
    }
}

impl TryFrom<usize> for FftSize {
    type Error = DspError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|s| s.points() == size)
            .ok_or(DspError::InvalidFftSize(size))
    }
}

impl From<FftSize> for usize {
    fn from(size: FftSize) -> Self {
        size.points()
    }
}

impl fmt::Display for FftSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.points())
    }
}

/// Truncate or zero-pad to `n` samples and apply the window.
fn prepare_segment(signal: &[f64], n: usize, window: WindowKind) -> Vec<f64> {
    let mut segment: Vec<f64> = signal.iter().copied().take(n).collect();
    segment.resize(n, 0.0);
    // FftSize is at least 64 points
    window.taper(&mut segment);
    segment
}

/// One-sided power spectrum via a direct DFT.
///
/// Returns `fft_size / 2` power values.
pub fn calculate_psd(signal: &[f64], fft_size: FftSize, window: WindowKind) -> Vec<f64> {
    let n = fft_size.points();
    let segment = prepare_segment(signal, n, window);

    (0..n / 2)
        .map(|k| {
            let mut real = 0.0;
            let mut imag = 0.0;
            for (i, &x) in segment.iter().enumerate() {
                let angle = 2.0 * PI * k as f64 * i as f64 / n as f64;
                real += x * angle.cos();
                imag -= x * angle.sin();
            }
            (real * real + imag * imag) / n as f64
        })
        .collect()
}

/// One-sided power spectrum via `rustfft`.
///
/// Same bins and normalization as [`calculate_psd`].
pub fn calculate_psd_fft(signal: &[f64], fft_size: FftSize, window: WindowKind) -> Vec<f64> {
    let n = fft_size.points();
    let segment = prepare_segment(signal, n, window);

    let mut buffer: Vec<Complex<f64>> = segment.iter().map(|&x| Complex::new(x, 0.0)).collect();
    let fft = FftPlanner::new().plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer
        .iter()
        .take(n / 2)
        .map(|c| c.norm_sqr() / n as f64)
        .collect()
}

/// Convert power values to decibels: `10·log10(max(p, 1e-12))`.
pub fn power_to_db(psd: &[f64]) -> Vec<f64> {
    psd.iter()
        .map(|&p| 10.0 * p.max(POWER_FLOOR).log10())
        .collect()
}

/// Center frequency in Hz of each one-sided bin.
pub fn bin_frequencies(fft_size: FftSize, sampling_rate: f64) -> Vec<f64> {
    let n = fft_size.points() as f64;
    (0..fft_size.bins())
        .map(|k| k as f64 * sampling_rate / n)
        .collect()
}

/// Local maxima of `psd`, strongest first, at most `count` of them.
///
/// Returns `(bin, power)` pairs. Endpoints count as peaks when they exceed
/// their single neighbor.
pub fn find_peaks(psd: &[f64], count: usize) -> Vec<(usize, f64)> {
    let mut peaks: Vec<(usize, f64)> = psd
        .iter()
        .enumerate()
        .filter(|&(i, &p)| {
            let left = i.checked_sub(1).map_or(f64::NEG_INFINITY, |j| psd[j]);
            let right = psd.get(i + 1).copied().unwrap_or(f64::NEG_INFINITY);
            p > left && p > right
        })
        .map(|(i, &p)| (i, p))
        .collect();
    peaks.sort_by(|a, b| b.1.total_cmp(&a.1));
    peaks.truncate(count);
    peaks
}
