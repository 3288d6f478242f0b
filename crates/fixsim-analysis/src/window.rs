//! Window functions applied before spectral analysis.
//!
//! All tapers are the symmetric forms, evaluated with an `N - 1` denominator
//! so both endpoints of the block get the same weight:
//!
//! | Window | `w[n]` |
//! |--------|--------|
//! | None | `1` |
//! | Hamming | `0.54 - 0.46 cos(2πn/(N-1))` |
//! | Blackman | `0.42 - 0.5 cos(2πn/(N-1)) + 0.08 cos(4πn/(N-1))` |
//! | Hann | `0.5 (1 - cos(2πn/(N-1)))` |
//!
//! A single-sample block has no valid symmetric taper, so tapered windows
//! reject it with [`DspError::InvalidSegmentLength`].

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use fixsim_core::DspError;

use crate::error::ParseKindError;

/// Window function types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WindowKind {
    /// Rectangular (no windowing)
    #[default]
    None,
    /// Hamming window
    Hamming,
    /// Blackman window
    Blackman,
    /// Hann window (raised cosine)
    Hann,
}

impl WindowKind {
    /// Every window, in display order.
    pub const ALL: [WindowKind; 4] = [
        WindowKind::None,
        WindowKind::Hamming,
        WindowKind::Blackman,
        WindowKind::Hann,
    ];

    const NAMES: [&'static str; 5] = ["none", "rectangular", "hamming", "blackman", "hann"];

    /// Lowercase identifier used in project files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            WindowKind::None => "none",
            WindowKind::Hamming => "hamming",
            WindowKind::Blackman => "blackman",
            WindowKind::Hann => "hann",
        }
    }

    /// Weight of sample `n` in a block of `len` samples.
    ///
    /// `len` must be at least 2 for the tapered kinds.
    fn weight(self, n: usize, len: usize) -> f64 {
        let x = 2.0 * PI * n as f64 / (len - 1) as f64;
        match self {
            WindowKind::None => 1.0,
            WindowKind::Hamming => 0.54 - 0.46 * x.cos(),
            WindowKind::Blackman => 0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos(),
            WindowKind::Hann => 0.5 * (1.0 - x.cos()),
        }
    }

    /// Multiply `buffer` by the window in place.
    pub fn apply(self, buffer: &mut [f64]) -> Result<(), DspError> {
        if self != WindowKind::None && buffer.len() == 1 {
            return Err(DspError::InvalidSegmentLength(1));
        }
        self.taper(buffer);
        Ok(())
    }

    /// Apply the taper to a block already known to hold 0 or at least 2
    /// samples. Single-sample blocks are left untouched.
    pub(crate) fn taper(self, buffer: &mut [f64]) {
        let len = buffer.len();
        if self == WindowKind::None || len < 2 {
            return;
        }
        for (n, sample) in buffer.iter_mut().enumerate() {
            *sample *= self.weight(n, len);
        }
    }

    /// Window coefficients for a block of `len` samples.
    pub fn coefficients(self, len: usize) -> Result<Vec<f64>, DspError> {
        let mut coeffs = vec![1.0; len];
        self.apply(&mut coeffs)?;
        Ok(coeffs)
    }
}

impl fmt::Display for WindowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "rectangular" => Ok(WindowKind::None),
            "hamming" => Ok(WindowKind::Hamming),
            "blackman" => Ok(WindowKind::Blackman),
            "hann" | "hanning" => Ok(WindowKind::Hann),
            _ => Err(ParseKindError::new("window", s, &Self::NAMES)),
        }
    }
}

/// Return a windowed copy of `signal`.
///
/// Empty input yields empty output; [`WindowKind::None`] is always the
/// identity.
pub fn apply_window(signal: &[f64], kind: WindowKind) -> Result<Vec<f64>, DspError> {
    let mut out = signal.to_vec();
    kind.apply(&mut out)?;
    Ok(out)
}
