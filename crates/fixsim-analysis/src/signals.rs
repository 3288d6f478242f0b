//! Synthetic test signals.
//!
//! Every source produces [`SIGNAL_POINTS`] samples on a normalized time axis
//! `t = i / 1024`, paired with a noisy copy carrying additive uniform noise
//! in `[-0.1, 0.1)`. The noise comes from a seeded LCG, so a given
//! `(kind, seed)` always yields the same pair.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseKindError;

/// Samples per generated signal.
pub const SIGNAL_POINTS: usize = 1024;

/// Peak-to-peak amplitude of the additive noise.
pub const NOISE_AMPLITUDE: f64 = 0.2;

/// Default noise seed.
pub const DEFAULT_SEED: u32 = 42;

/// Deterministic uniform noise.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    state: u32,
}

impl NoiseSource {
    /// Create a noise source from a seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next value in `[0, 1)`.
    pub fn next_uniform(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        // top 24 bits; the low bits of an LCG are weak
        f64::from(self.state >> 8) / f64::from(1_u32 << 24)
    }

    /// Next noise sample, `(u - 0.5) * amplitude`.
    pub fn next_noise(&mut self, amplitude: f64) -> f64 {
        (self.next_uniform() - 0.5) * amplitude
    }
}

/// A clean reference and its noisy observation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SignalPair {
    /// Noise-free signal
    pub clean: Vec<f64>,
    /// `clean` plus additive noise
    pub noisy: Vec<f64>,
}

impl SignalPair {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.clean.len()
    }

    /// True when the pair holds no samples.
    pub fn is_empty(&self) -> bool {
        self.clean.is_empty()
    }
}

/// Available signal sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// Synthetic ECG, ten beats with P/QRS/T segments
    Ecg,
    /// ECG whose rate jumps by half midway through
    EcgArrhythmia,
    /// Alpha (10) + beta (25) rhythm
    Eeg,
    /// Heart-rate series with 0.1 and 0.25 modulation
    Hrv,
    /// Slow breathing wave
    Respiratory,
    /// 440-cycle tone
    Audio,
    /// Decaying voiced burst
    Speech,
    /// C major triad
    Music,
    /// 5-cycle sine
    Sine,
    /// 5-cycle square wave
    Square,
    /// Linear chirp
    Chirp,
    /// Three equal tones
    Multitone,
    /// Exponentially damped sine
    DampedSine,
    /// Unit impulse at the midpoint
    Impulse,
    /// Unit step after the midpoint
    Step,
    /// Amplitude-modulated carrier
    Am,
}

impl SignalKind {
    /// Every source, in display order.
    pub const ALL: [SignalKind; 16] = [
        SignalKind::Ecg,
        SignalKind::EcgArrhythmia,
        SignalKind::Eeg,
        SignalKind::Hrv,
        SignalKind::Respiratory,
        SignalKind::Audio,
        SignalKind::Speech,
        SignalKind::Music,
        SignalKind::Sine,
        SignalKind::Square,
        SignalKind::Chirp,
        SignalKind::Multitone,
        SignalKind::DampedSine,
        SignalKind::Impulse,
        SignalKind::Step,
        SignalKind::Am,
    ];

    /// Lowercase identifier used in project files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            SignalKind::Ecg => "ecg",
            SignalKind::EcgArrhythmia => "ecg_arrhythmia",
            SignalKind::Eeg => "eeg",
            SignalKind::Hrv => "hrv",
            SignalKind::Respiratory => "respiratory",
            SignalKind::Audio => "audio",
            SignalKind::Speech => "speech",
            SignalKind::Music => "music",
            SignalKind::Sine => "sine",
            SignalKind::Square => "square",
            SignalKind::Chirp => "chirp",
            SignalKind::Multitone => "multitone",
            SignalKind::DampedSine => "damped_sine",
            SignalKind::Impulse => "impulse",
            SignalKind::Step => "step",
            SignalKind::Am => "am",
        }
    }

    /// Nominal sampling rate in Hz used for spectral axes and band analysis.
    pub fn sampling_rate(self) -> f64 {
        match self {
            SignalKind::Ecg | SignalKind::Eeg => 250.0,
            SignalKind::Hrv => 4.0,
            SignalKind::Audio | SignalKind::Speech | SignalKind::Music => 8000.0,
            _ => 1000.0,
        }
    }

    /// Clean sample `i`.
    fn sample(self, i: usize) -> f64 {
        let points = SIGNAL_POINTS as f64;
        let t = i as f64 / points;
        let tone = |cycles: f64| (2.0 * PI * cycles * t).sin();
        match self {
            SignalKind::Ecg => ecg_beat(i as f64, points / 10.0),
            SignalKind::EcgArrhythmia => {
                let period = if i < SIGNAL_POINTS / 2 {
                    points / 10.0
                } else {
                    points / 15.0
                };
                ecg_beat(i as f64, period)
            }
            SignalKind::Eeg => 0.5 * tone(10.0) + 0.3 * tone(25.0),
            SignalKind::Hrv => 1.0 + 0.1 * tone(0.1) + 0.05 * tone(0.25),
            SignalKind::Respiratory => 0.5 * tone(0.25),
            SignalKind::Audio => tone(440.0),
            SignalKind::Speech => tone(2.0) * (-3.0 * t).exp() * tone(150.0),
            SignalKind::Music => 0.5 * tone(261.63) + 0.3 * tone(329.63) + 0.2 * tone(392.0),
            SignalKind::Sine => tone(5.0),
            SignalKind::Square => {
                if tone(5.0) > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            SignalKind::Chirp => (2.0 * PI * (1.0 + 100.0 * t) * t).sin(),
            SignalKind::Multitone => 0.3 * (tone(50.0) + tone(120.0) + tone(200.0)),
            SignalKind::DampedSine => (-5.0 * t).exp() * tone(20.0),
            SignalKind::Impulse => f64::from(u8::from(i == SIGNAL_POINTS / 2)),
            SignalKind::Step => f64::from(u8::from(i > SIGNAL_POINTS / 2)),
            SignalKind::Am => (1.0 + 0.5 * tone(2.0)) * tone(30.0),
        }
    }

    /// Clean samples only.
    pub fn clean(self) -> Vec<f64> {
        (0..SIGNAL_POINTS).map(|i| self.sample(i)).collect()
    }

    /// Generate the clean/noisy pair for `seed`.
    pub fn generate(self, seed: u32) -> SignalPair {
        let mut noise = NoiseSource::new(seed);
        let clean = self.clean();
        let noisy = clean
            .iter()
            .map(|&c| c + noise.next_noise(NOISE_AMPLITUDE))
            .collect();
        tracing::debug!(signal = %self, seed, "generated {} samples", clean.len());
        SignalPair { clean, noisy }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignalKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
                ParseKindError::new("signal", s, &names)
            })
    }
}

/// One heartbeat of a piecewise-sinusoidal ECG, evaluated at sample `i`.
///
/// Segment boundaries as fractions of `period`:
/// P `[0, 0.08)`, Q `(0.12, 0.16)`, R `[0.16, 0.20)`, S `[0.20, 0.24)`,
/// T `(0.30, 0.50)`.
fn ecg_beat(i: f64, period: f64) -> f64 {
    let ip = i % period;
    let seg = |start: f64, width: f64| (PI * (ip - period * start) / (period * width)).sin();

    if ip < period * 0.08 {
        0.1 * seg(0.0, 0.08)
    } else if ip > period * 0.12 && ip < period * 0.16 {
        -0.2 * seg(0.12, 0.04)
    } else if ip >= period * 0.16 && ip < period * 0.20 {
        seg(0.16, 0.04)
    } else if ip >= period * 0.20 && ip < period * 0.24 {
        -0.5 * seg(0.20, 0.04)
    } else if ip > period * 0.3 && ip < period * 0.5 {
        0.2 * seg(0.3, 0.2)
    } else {
        0.0
    }
}
