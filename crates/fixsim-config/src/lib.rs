//! Project files and example setups for fixsim simulations.
//!
//! A [`SimulationProject`] captures everything needed to reproduce a run:
//! the signal source and noise seed, the processing chain as `[[stages]]`
//! entries, and the spectral/band analysis settings.
//!
//! # Features
//!
//! - **Project files**: load and save TOML projects
//! - **Stage decoding**: block names and optional settings become
//!   [`fixsim_core::StageConfig`] values at load time
//! - **Validation**: all problems of a project reported at once
//! - **Examples**: bundled ECG, EEG, HRV and DUC/DDC projects
//!
//! # Example
//!
//! ```rust,no_run
//! use fixsim_analysis::{BandAnalysis, SignalKind, WindowKind};
//! use fixsim_config::{SimulationProject, StageEntry};
//!
//! let project = SimulationProject::new("EEG smoothing", SignalKind::Eeg)
//!     .with_window(WindowKind::Hann)
//!     .with_bands(BandAnalysis::Eeg)
//!     .with_stage(
//!         StageEntry::new("FIR")
//!             .with_coefficients(vec![0.25, 0.5, 0.25])
//!             .with_bit_widths(12, 12),
//!     )
//!     .with_active_stage(0);
//!
//! project.save("projects/eeg.toml").unwrap();
//! let report = project.analyze().unwrap();
//! println!("{:?}", report.eeg);
//! ```

mod error;
mod project;
mod stage_entry;

/// Project validation.
pub mod validation;

/// Example projects bundled with the library.
pub mod example_projects;

pub use error::ConfigError;
pub use example_projects::{
    EXAMPLE_PROJECT_NAMES, example_project_toml, example_projects, get_example_project,
};
pub use project::SimulationProject;
pub use stage_entry::{DUC_DDC_BLOCKS, FILTER_BLOCKS, StageEntry, decode_chain, stage_kind_for};
pub use validation::{ValidationError, ValidationResult, validate_project, validate_stage};
