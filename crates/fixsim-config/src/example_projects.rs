//! Example projects bundled with the library.
//!
//! Each project is stored as TOML and parsed on request, so the examples are
//! exercised by the same loader as user files.

use crate::SimulationProject;
use crate::error::ConfigError;

/// Names of the bundled example projects.
pub static EXAMPLE_PROJECT_NAMES: &[&str] = &["ecg_fir", "eeg_bands", "hrv_lf_hf", "duc_ddc"];

static EXAMPLE_PROJECTS_TOML: &[(&str, &str)] = &[
    ("ecg_fir", ECG_FIR_PROJECT),
    ("eeg_bands", EEG_BANDS_PROJECT),
    ("hrv_lf_hf", HRV_PROJECT),
    ("duc_ddc", DUC_DDC_PROJECT),
];

/// ECG denoising with an 11-tap symmetric low-pass at 16/16 bits.
const ECG_FIR_PROJECT: &str = r#"
name = "ECG FIR"
description = "11-tap symmetric FIR low-pass for ECG denoising, 16-bit data and coefficients"
signal = "ecg"
seed = 42
fft_size = 256
window = "hann"
bands = "none"
active_stage = 0

[[stages]]
kind = "FIR"
order = 11
coefficients = [-0.003, 0.005, 0.031, 0.107, 0.222, 0.276, 0.222, 0.107, 0.031, 0.005, -0.003]
data_bit_width = 16
coeff_bit_width = 16

[[stages]]
kind = "FFT"
"#;

/// EEG rhythm separation with band-power summaries.
const EEG_BANDS_PROJECT: &str = r#"
name = "EEG Bands"
description = "Half-band smoothing of an alpha/beta EEG trace with delta-theta-alpha-beta band power"
signal = "eeg"
seed = 42
fft_size = 256
window = "hamming"
bands = "eeg"
active_stage = 0

[[stages]]
kind = "Half-band Filter"
order = 7
coefficients = [-0.032, 0.0, 0.282, 0.5, 0.282, 0.0, -0.032]
data_bit_width = 14
coeff_bit_width = 12
"#;

/// Heart-rate variability with LF/HF band power.
const HRV_PROJECT: &str = r#"
name = "HRV LF/HF"
description = "Low-order smoothing of an RR-interval series with LF/HF band power"
signal = "hrv"
seed = 42
fft_size = 1024
window = "hann"
bands = "hrv"
active_stage = 0

[[stages]]
kind = "FIR"
order = 5
coefficients = [0.1, 0.2, 0.4, 0.2, 0.1]
data_bit_width = 16
coeff_bit_width = 14

[[stages]]
kind = "FFT"
"#;

/// Digital up/down conversion of a test tone.
const DUC_DDC_PROJECT: &str = r#"
name = "DUC/DDC"
description = "Carrier mixing followed by a 5-tap low-pass at 14-bit data width"
signal = "sine"
seed = 42
fft_size = 512
window = "blackman"
bands = "none"

[[stages]]
kind = "DUC/DDC"
coefficients = [0.1, 0.2, 0.4, 0.2, 0.1]
data_bit_width = 14
coeff_bit_width = 16

[[stages]]
kind = "FIR"
order = 3
"#;

/// All bundled example projects, in [`EXAMPLE_PROJECT_NAMES`] order.
pub fn example_projects() -> Vec<SimulationProject> {
    EXAMPLE_PROJECTS_TOML
        .iter()
        .filter_map(|(_, toml)| SimulationProject::from_toml(toml).ok())
        .collect()
}

/// Get an example project by internal name or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use fixsim_config::get_example_project;
///
/// let project = get_example_project("ecg_fir").unwrap();
/// assert_eq!(project.name, "ECG FIR");
/// assert!(get_example_project("hrv lf/hf").is_ok());
/// ```
pub fn get_example_project(name: &str) -> Result<SimulationProject, ConfigError> {
    let name_lower = name.to_lowercase();

    for (project_name, toml) in EXAMPLE_PROJECTS_TOML {
        if *project_name == name_lower {
            return SimulationProject::from_toml(toml);
        }
    }

    for (_, toml) in EXAMPLE_PROJECTS_TOML {
        let project = SimulationProject::from_toml(toml)?;
        if project.name.to_lowercase() == name_lower {
            return Ok(project);
        }
    }

    Err(ConfigError::UnknownExample(name.to_string()))
}

/// TOML source of an example project, for dumping to a file.
pub fn example_project_toml(name: &str) -> Option<&'static str> {
    EXAMPLE_PROJECTS_TOML
        .iter()
        .find(|(project_name, _)| *project_name == name.to_lowercase())
        .map(|&(_, toml)| toml.trim_start())
}
