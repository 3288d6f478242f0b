//! Project validation.
//!
//! [`validate_project`] checks every setting of a [`SimulationProject`]
//! without running anything and reports all problems at once.
//!
//! # Example
//!
//! ```rust
//! use fixsim_config::{SimulationProject, StageEntry, validate_project};
//! use fixsim_analysis::SignalKind;
//!
//! let project = SimulationProject::new("check", SignalKind::Ecg)
//!     .with_stage(StageEntry::new("FIR").with_coefficients(vec![0.5, 0.5]));
//! validate_project(&project).expect("project should be valid");
//! ```

use fixsim_analysis::{BandAnalysis, FftSize, ParseKindError, SignalKind, WindowKind};
use fixsim_core::DspError;
use thiserror::Error;

use crate::project::SimulationProject;
use crate::stage_entry::StageEntry;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unrecognized signal, window or band name.
    #[error(transparent)]
    UnknownName(#[from] ParseKindError),

    /// Setting rejected by the core (bit width, FFT size, sampling rate).
    #[error(transparent)]
    Dsp(#[from] DspError),

    /// A stage entry with a problem.
    #[error("stage {index} ({kind}): {reason}")]
    Stage {
        /// Position in the chain.
        index: usize,
        /// Block name of the stage.
        kind: String,
        /// Description of the problem.
        reason: String,
    },

    /// `active_stage` points past the end of the chain.
    #[error("active stage {index} out of range for {len} stages")]
    ActiveStageOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of stages.
        len: usize,
    },

    /// Custom coefficients given without an active stage to apply them to.
    #[error("custom_coefficients requires active_stage")]
    CustomWithoutActiveStage,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn validate_coefficients(coefficients: &[f64]) -> Result<(), String> {
    match coefficients.iter().position(|c| !c.is_finite()) {
        Some(i) => Err(format!("coefficient {i} is not finite")),
        None => Ok(()),
    }
}

/// Check one stage entry.
pub fn validate_stage(index: usize, entry: &StageEntry) -> ValidationResult<()> {
    let stage_error = |reason: String| ValidationError::Stage {
        index,
        kind: entry.kind.clone(),
        reason,
    };

    if entry.kind.trim().is_empty() {
        return Err(stage_error("empty block name".to_string()));
    }
    if let Some(coefficients) = &entry.coefficients {
        validate_coefficients(coefficients).map_err(stage_error)?;
    }
    for bits in [entry.data_bit_width, entry.coeff_bit_width].into_iter().flatten() {
        fixsim_core::BitWidth::new(bits).map_err(|e| stage_error(e.to_string()))?;
    }
    Ok(())
}

/// Validate every setting of a project, collecting all errors.
///
/// Returns the single error directly when there is only one, and
/// [`ValidationError::Multiple`] otherwise.
pub fn validate_project(project: &SimulationProject) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = Vec::new();

    if let Err(e) = project.signal.parse::<SignalKind>() {
        errors.push(e.into());
    }
    if let Err(e) = project.window.parse::<WindowKind>() {
        errors.push(e.into());
    }
    if let Err(e) = project.bands.parse::<BandAnalysis>() {
        errors.push(e.into());
    }
    if let Err(e) = FftSize::try_from(project.fft_size) {
        errors.push(e.into());
    }
    if let Some(rate) = project.sampling_rate
        && !(rate.is_finite() && rate > 0.0)
    {
        errors.push(DspError::InvalidSamplingRate(rate).into());
    }

    for (index, entry) in project.stages.iter().enumerate() {
        if let Err(e) = validate_stage(index, entry) {
            errors.push(e);
        }
    }

    if let Some(index) = project.active_stage
        && index >= project.stages.len()
    {
        errors.push(ValidationError::ActiveStageOutOfRange {
            index,
            len: project.stages.len(),
        });
    }
    if let Some(custom) = &project.custom_coefficients {
        if project.active_stage.is_none() {
            errors.push(ValidationError::CustomWithoutActiveStage);
        }
        if let Err(reason) = validate_coefficients(custom) {
            errors.push(ValidationError::Stage {
                index: project.active_stage.unwrap_or_default(),
                kind: "custom".to_string(),
                reason,
            });
        }
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
