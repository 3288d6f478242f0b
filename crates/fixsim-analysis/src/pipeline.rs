//! Full recomputation pipeline.
//!
//! [`derive_analysis`] is a pure function of the signal pair, the chain and
//! an [`AnalysisConfig`]. It runs up to three versions of the chain over the
//! noisy input:
//!
//! - **baseline**: every stage stripped of its configuration, so filter
//!   stages fall back to moving averages and everything else passes through;
//! - **optimized**: the chain as given, only when at least one stage carries
//!   a configuration;
//! - **custom**: the chain with the active stage's coefficients replaced by
//!   [`AnalysisConfig::custom_coefficients`], when both are set.
//!
//! Each run is scored against the clean signal and transformed into a PSD;
//! the active stage's frequency response and the configured band summary
//! are computed alongside.
//!
//! # Example
//!
//! ```rust
//! use fixsim_analysis::{AnalysisConfig, SignalKind, derive_analysis};
//! use fixsim_core::{StageConfig, StageKind};
//!
//! let signals = SignalKind::Eeg.generate(7);
//! let chain = vec![StageConfig::new(StageKind::Filter)];
//! let config = AnalysisConfig::new(SignalKind::Eeg.sampling_rate());
//!
//! let report = derive_analysis(&signals, &chain, &config);
//! assert!(report.optimized.is_none());
//! assert_eq!(report.baseline.output.len(), signals.noisy.len());
//! ```

use fixsim_core::{StageConfig, StageKind, moving_average, process_full_chain};

use crate::bands::{BandAnalysis, EegBands, HrvBands, calculate_eeg_bands, calculate_hrv_power_bands};
use crate::metrics::FidelityMetrics;
use crate::response::{calculate_frequency_response, response_frequencies};
use crate::signals::SignalPair;
use crate::spectrum::{FftSize, bin_frequencies, calculate_psd, power_to_db};
use crate::window::WindowKind;

/// Settings that shape an analysis run but are not part of the chain.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Sampling rate in Hz for spectral axes and band edges
    pub sampling_rate: f64,
    /// PSD transform size
    pub fft_size: FftSize,
    /// PSD window
    pub window: WindowKind,
    /// Band summary to compute
    pub bands: BandAnalysis,
    /// Index of the stage whose response is reported and whose coefficients
    /// `custom_coefficients` replace
    pub active_stage: Option<usize>,
    /// Hand-edited coefficients for the active stage
    pub custom_coefficients: Option<Vec<f64>>,
}

impl AnalysisConfig {
    /// Defaults: 256-point PSD, no window, no band summary, no active stage.
    pub fn new(sampling_rate: f64) -> Self {
        Self {
            sampling_rate,
            fft_size: FftSize::default(),
            window: WindowKind::default(),
            bands: BandAnalysis::default(),
            active_stage: None,
            custom_coefficients: None,
        }
    }

    /// Set the PSD transform size.
    pub fn with_fft_size(mut self, fft_size: FftSize) -> Self {
        self.fft_size = fft_size;
        self
    }

    /// Set the PSD window.
    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window;
        self
    }

    /// Select the band summary.
    pub fn with_bands(mut self, bands: BandAnalysis) -> Self {
        self.bands = bands;
        self
    }

    /// Select the active stage.
    pub fn with_active_stage(mut self, index: usize) -> Self {
        self.active_stage = Some(index);
        self
    }

    /// Set custom coefficients for the active stage.
    pub fn with_custom_coefficients(mut self, coefficients: Vec<f64>) -> Self {
        self.custom_coefficients = Some(coefficients);
        self
    }
}

/// One processed version of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// Chain output
    pub output: Vec<f64>,
    /// Fidelity against the clean signal
    pub metrics: FidelityMetrics,
    /// One-sided power spectrum of `output`
    pub psd: Vec<f64>,
}

impl RunResult {
    fn new(output: Vec<f64>, clean: &[f64], config: &AnalysisConfig) -> Self {
        let metrics = FidelityMetrics::measure(clean, &output);
        let psd = calculate_psd(&output, config.fft_size, config.window);
        Self {
            output,
            metrics,
            psd,
        }
    }

    /// PSD in dB.
    pub fn psd_db(&self) -> Vec<f64> {
        power_to_db(&self.psd)
    }
}

/// Magnitude responses of the active stage, in dB.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseComparison {
    /// Normalized frequency of each point
    pub frequencies: Vec<f64>,
    /// Moving average of the stage's order
    pub baseline: Vec<f64>,
    /// Configured coefficients, if any
    pub optimized: Option<Vec<f64>>,
    /// Custom coefficients, if any
    pub custom: Option<Vec<f64>>,
}

/// A band summary for each run that was performed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandComparison<T> {
    /// Baseline run
    pub baseline: T,
    /// Optimized run, when present
    pub optimized: Option<T>,
    /// Custom run, when present
    pub custom: Option<T>,
}

impl<T> BandComparison<T> {
    fn from_runs(report: &AnalysisReport, f: impl Fn(&RunResult) -> T) -> Self {
        Self {
            baseline: f(&report.baseline),
            optimized: report.optimized.as_ref().map(&f),
            custom: report.custom.as_ref().map(&f),
        }
    }
}

/// Everything derived from one signal pair and chain.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Sampling rate the spectral axes use
    pub sampling_rate: f64,
    /// Fidelity of the unprocessed noisy input
    pub input_metrics: FidelityMetrics,
    /// One-sided power spectrum of the noisy input
    pub input_psd: Vec<f64>,
    /// Frequency in Hz of each PSD bin
    pub psd_frequencies: Vec<f64>,
    /// Baseline chain
    pub baseline: RunResult,
    /// Configured chain
    pub optimized: Option<RunResult>,
    /// Chain with custom coefficients on the active stage
    pub custom: Option<RunResult>,
    /// Active stage response, for filter stages
    pub response: Option<ResponseComparison>,
    /// EEG band powers, when requested
    pub eeg: Option<BandComparison<EegBands>>,
    /// HRV band powers, when requested
    pub hrv: Option<BandComparison<HrvBands>>,
}

/// Run the baseline, optimized and custom chains and analyze the results.
pub fn derive_analysis(
    signals: &SignalPair,
    chain: &[StageConfig],
    config: &AnalysisConfig,
) -> AnalysisReport {
    let clean = &signals.clean;
    let input = &signals.noisy;
    let active = config.active_stage.and_then(|i| chain.get(i).map(|s| (i, s)));

    let baseline_chain: Vec<StageConfig> = chain.iter().map(StageConfig::baseline).collect();
    let baseline = RunResult::new(process_full_chain(input, &baseline_chain), clean, config);

    let optimized = chain
        .iter()
        .any(|s| s.filter.is_some())
        .then(|| RunResult::new(process_full_chain(input, chain), clean, config));

    let custom = match (active, &config.custom_coefficients) {
        (Some((index, stage)), Some(coefficients)) => {
            let mut custom_chain = chain.to_vec();
            custom_chain[index] = stage.with_coefficients(coefficients.clone());
            Some(RunResult::new(
                process_full_chain(input, &custom_chain),
                clean,
                config,
            ))
        }
        _ => None,
    };

    tracing::debug!(
        stages = chain.len(),
        optimized = optimized.is_some(),
        custom = custom.is_some(),
        baseline_snr = baseline.metrics.snr,
        "derive_analysis"
    );

    let response = active.and_then(|(_, stage)| active_response(stage, config));

    let mut report = AnalysisReport {
        sampling_rate: config.sampling_rate,
        input_metrics: FidelityMetrics::measure(clean, input),
        input_psd: calculate_psd(input, config.fft_size, config.window),
        psd_frequencies: bin_frequencies(config.fft_size, config.sampling_rate),
        baseline,
        optimized,
        custom,
        response,
        eeg: None,
        hrv: None,
    };

    match config.bands {
        BandAnalysis::None => {}
        BandAnalysis::Eeg => {
            let sr = config.sampling_rate;
            report.eeg = Some(BandComparison::from_runs(&report, |run| {
                calculate_eeg_bands(&run.psd, sr)
            }));
        }
        BandAnalysis::Hrv => {
            report.hrv = Some(BandComparison::from_runs(&report, |run| {
                calculate_hrv_power_bands(
                    &run.output,
                    config.sampling_rate,
                    config.fft_size,
                    config.window,
                )
            }));
        }
    }

    report
}

/// Frequency responses of a filter stage: baseline average, configured and
/// custom coefficients.
fn active_response(stage: &StageConfig, config: &AnalysisConfig) -> Option<ResponseComparison> {
    if stage.kind != StageKind::Filter {
        return None;
    }
    let baseline = calculate_frequency_response(&moving_average(stage.effective_order()));
    let optimized = stage
        .filter
        .as_ref()
        .map(|f| calculate_frequency_response(f.coefficients()))
        .filter(|r| !r.is_empty());
    let custom = config
        .custom_coefficients
        .as_deref()
        .map(calculate_frequency_response)
        .filter(|r| !r.is_empty());

    Some(ResponseComparison {
        frequencies: response_frequencies(),
        baseline,
        optimized,
        custom,
    })
}
