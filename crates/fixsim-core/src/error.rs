//! Configuration errors raised before any computation runs.

use thiserror::Error;

/// Invalid simulation configuration.
///
/// Every variant is raised when a setting is built or checked (a
/// [`BitWidth`](crate::BitWidth), an FFT size, a window segment), so the
/// numeric routines themselves never produce `NaN`/`Infinity` from a bad setting.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum DspError {
    /// Bit-width outside the supported `2..=32` range.
    #[error("invalid bit width {0}: must be between {min} and {max}", min = crate::BitWidth::MIN, max = crate::BitWidth::MAX)]
    InvalidBitWidth(u32),

    /// A tapered window needs at least two samples.
    #[error("invalid segment length {0}: tapered windows need at least 2 samples")]
    InvalidSegmentLength(usize),

    /// Transform size outside the supported set.
    #[error("invalid FFT size {0}: expected one of 64, 128, 256, 512, 1024")]
    InvalidFftSize(usize),

    /// Filter order below one tap.
    #[error("invalid filter order {0}: must be at least 1")]
    InvalidFilterOrder(usize),

    /// Sampling rate that is not a positive finite number.
    #[error("invalid sampling rate {0}: must be positive and finite")]
    InvalidSamplingRate(f64),
}
