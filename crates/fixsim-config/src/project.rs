//! Simulation project file format and operations.

use std::path::Path;

use fixsim_analysis::{
    AnalysisConfig, AnalysisReport, BandAnalysis, FftSize, SignalKind, SignalPair, WindowKind,
    derive_analysis,
};
use fixsim_core::StageConfig;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::stage_entry::{StageEntry, decode_chain};
use crate::validation::validate_project;

/// A complete simulation setup: signal source, chain and analysis settings.
///
/// # TOML Format
///
/// ```toml
/// name = "ECG Denoise"
/// description = "11-tap low-pass against the moving-average baseline"
/// signal = "ecg"
/// seed = 42
/// fft_size = 256
/// window = "hann"
/// bands = "none"
/// active_stage = 0
///
/// [[stages]]
/// kind = "FIR"
/// order = 11
/// coefficients = [-0.003, 0.005, 0.031, 0.107, 0.222, 0.276, 0.222, 0.107, 0.031, 0.005, -0.003]
/// data_bit_width = 16
/// coeff_bit_width = 16
///
/// [[stages]]
/// kind = "FFT"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationProject {
    /// Name of the project.
    pub name: String,

    /// Optional description of the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Signal source name (see [`SignalKind`]).
    #[serde(default = "default_signal")]
    pub signal: String,

    /// Override for the signal's nominal sampling rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sampling_rate: Option<f64>,

    /// Noise seed.
    #[serde(default = "default_seed")]
    pub seed: u32,

    /// PSD transform size.
    #[serde(default = "default_fft_size")]
    pub fft_size: usize,

    /// PSD window name.
    #[serde(default = "default_window")]
    pub window: String,

    /// Band summary (`none`, `eeg`, `hrv`).
    #[serde(default = "default_bands")]
    pub bands: String,

    /// Stage whose response is reported and whose coefficients
    /// `custom_coefficients` replace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_stage: Option<usize>,

    /// Hand-edited coefficients for the active stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_coefficients: Option<Vec<f64>>,

    /// Processing chain, in order.
    #[serde(default)]
    pub stages: Vec<StageEntry>,
}

fn default_signal() -> String {
    SignalKind::Ecg.as_str().to_string()
}

fn default_seed() -> u32 {
    fixsim_analysis::DEFAULT_SEED
}

fn default_fft_size() -> usize {
    FftSize::default().points()
}

fn default_window() -> String {
    WindowKind::default().as_str().to_string()
}

fn default_bands() -> String {
    BandAnalysis::default().as_str().to_string()
}

impl SimulationProject {
    /// Create a project with an empty chain and default analysis settings.
    pub fn new(name: impl Into<String>, signal: SignalKind) -> Self {
        Self {
            name: name.into(),
            description: None,
            signal: signal.as_str().to_string(),
            sampling_rate: None,
            seed: default_seed(),
            fft_size: default_fft_size(),
            window: default_window(),
            bands: default_bands(),
            active_stage: None,
            custom_coefficients: None,
            stages: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the sampling rate.
    pub fn with_sampling_rate(mut self, sampling_rate: f64) -> Self {
        self.sampling_rate = Some(sampling_rate);
        self
    }

    /// Set the noise seed.
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Set the PSD transform size.
    pub fn with_fft_size(mut self, fft_size: FftSize) -> Self {
        self.fft_size = fft_size.points();
        self
    }

    /// Set the PSD window.
    pub fn with_window(mut self, window: WindowKind) -> Self {
        self.window = window.as_str().to_string();
        self
    }

    /// Set the band summary.
    pub fn with_bands(mut self, bands: BandAnalysis) -> Self {
        self.bands = bands.as_str().to_string();
        self
    }

    /// Select the active stage.
    pub fn with_active_stage(mut self, index: usize) -> Self {
        self.active_stage = Some(index);
        self
    }

    /// Set custom coefficients for the active stage.
    pub fn with_custom_coefficients(mut self, coefficients: impl Into<Vec<f64>>) -> Self {
        self.custom_coefficients = Some(coefficients.into());
        self
    }

    /// Append a stage.
    pub fn with_stage(mut self, stage: StageEntry) -> Self {
        self.stages.push(stage);
        self
    }

    /// Append several stages.
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = StageEntry>) -> Self {
        self.stages.extend(stages);
        self
    }

    /// Load a project from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let project: SimulationProject = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), name = %project.name, "loaded project");
        Ok(project)
    }

    /// Load a project from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the project to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        tracing::debug!(path = %path.display(), "saved project");
        Ok(())
    }

    /// Convert the project to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Parsed signal source.
    pub fn signal_kind(&self) -> Result<SignalKind, ConfigError> {
        Ok(self.signal.parse()?)
    }

    /// Sampling rate in Hz: the override if set, else the signal's nominal rate.
    pub fn effective_sampling_rate(&self) -> Result<f64, ConfigError> {
        match self.sampling_rate {
            Some(rate) => Ok(rate),
            None => Ok(self.signal_kind()?.sampling_rate()),
        }
    }

    /// Decoded processing chain.
    pub fn chain(&self) -> Result<Vec<StageConfig>, ConfigError> {
        decode_chain(&self.stages)
    }

    /// Analysis settings for [`derive_analysis`].
    pub fn analysis_config(&self) -> Result<AnalysisConfig, ConfigError> {
        let mut config = AnalysisConfig::new(self.effective_sampling_rate()?)
            .with_fft_size(FftSize::try_from(self.fft_size)?)
            .with_window(self.window.parse()?)
            .with_bands(self.bands.parse()?);
        if let Some(index) = self.active_stage {
            config = config.with_active_stage(index);
        }
        if let Some(custom) = &self.custom_coefficients {
            config = config.with_custom_coefficients(custom.clone());
        }
        Ok(config)
    }

    /// Generate the clean/noisy pair for this project's signal and seed.
    pub fn generate_signals(&self) -> Result<SignalPair, ConfigError> {
        Ok(self.signal_kind()?.generate(self.seed))
    }

    /// Validate, decode and run the full analysis.
    pub fn analyze(&self) -> Result<AnalysisReport, ConfigError> {
        validate_project(self)?;
        let signals = self.generate_signals()?;
        self.analyze_signals(&signals)
    }

    /// Run the analysis on externally supplied signals.
    pub fn analyze_signals(&self, signals: &SignalPair) -> Result<AnalysisReport, ConfigError> {
        let chain = self.chain()?;
        let config = self.analysis_config()?;
        tracing::info!(
            project = %self.name,
            stages = chain.len(),
            samples = signals.len(),
            "running analysis"
        );
        Ok(derive_analysis(signals, &chain, &config))
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// True when the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}
