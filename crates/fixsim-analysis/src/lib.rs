//! Fixsim Analysis - spectral and fidelity tools for fixed-point simulations
//!
//! This crate measures what quantization does to a signal chain built with
//! [`fixsim_core`]:
//!
//! - [`window`] - Hamming, Blackman and Hann tapers
//! - [`spectrum`] - one-sided PSD (direct DFT and `rustfft`), dB conversion, peaks
//! - [`response`] - FIR magnitude response
//! - [`metrics`] - SNR and MSE against a clean reference
//! - [`bands`] - EEG delta/theta/alpha/beta and HRV LF/HF band power
//! - [`signals`] - seeded synthetic biosignal and test sources
//! - [`sweep`] - bit-width tradeoff sweeps
//! - [`pipeline`] - [`derive_analysis`], the single recomputation entry point
//!
//! ## Example Workflow
//!
//! ```rust
//! use fixsim_analysis::{AnalysisConfig, BandAnalysis, SignalKind, derive_analysis};
//! use fixsim_core::{FilterConfig, StageConfig, StageKind};
//!
//! // 1. Generate a clean/noisy pair
//! let signals = SignalKind::Eeg.generate(42);
//!
//! // 2. Describe the chain
//! let design = FilterConfig::try_new(vec![0.25, 0.5, 0.25], 12, 12).unwrap();
//! let chain = vec![StageConfig::new(StageKind::Filter).with_filter(design)];
//!
//! // 3. Analyze
//! let config = AnalysisConfig::new(250.0).with_bands(BandAnalysis::Eeg);
//! let report = derive_analysis(&signals, &chain, &config);
//!
//! let optimized = report.optimized.unwrap();
//! println!("SNR {:.2} dB, MSE {:.5}", optimized.metrics.snr, optimized.metrics.mse);
//! ```

pub mod bands;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod response;
pub mod signals;
pub mod spectrum;
pub mod sweep;
pub mod window;

pub use bands::{
    BandAnalysis, EegBands, FrequencyBand, HrvBands, calculate_eeg_bands,
    calculate_hrv_power_bands, eeg_bands, hrv_bands,
};
pub use error::ParseKindError;
pub use metrics::{FidelityMetrics, calculate_mse, calculate_snr};
pub use pipeline::{
    AnalysisConfig, AnalysisReport, BandComparison, ResponseComparison, RunResult,
    derive_analysis,
};
pub use response::{RESPONSE_POINTS, calculate_frequency_response, response_frequencies};
pub use signals::{DEFAULT_SEED, NoiseSource, SIGNAL_POINTS, SignalKind, SignalPair};
pub use spectrum::{
    FftSize, bin_frequencies, calculate_psd, calculate_psd_fft, find_peaks, power_to_db,
};
pub use sweep::{SweepPoint, bitwidth_sweep, recommend};
pub use window::{WindowKind, apply_window};
