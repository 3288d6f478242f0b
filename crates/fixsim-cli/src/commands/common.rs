//! Shared CLI helpers used across multiple commands.

use std::path::{Path, PathBuf};

use clap::Args;
use fixsim_config::{SimulationProject, get_example_project};

/// Where a command gets its project from.
#[derive(Args)]
pub struct ProjectSource {
    /// Project TOML file
    #[arg(value_name = "PROJECT", required_unless_present = "example")]
    pub project: Option<PathBuf>,

    /// Bundled example project name (see `fixsim examples`)
    #[arg(short, long, conflicts_with = "project")]
    pub example: Option<String>,
}

impl ProjectSource {
    /// Load the selected project.
    pub fn load(&self) -> anyhow::Result<SimulationProject> {
        match (&self.example, &self.project) {
            (Some(name), _) => Ok(get_example_project(name)?),
            (None, Some(path)) => Ok(SimulationProject::load(path)?),
            (None, None) => anyhow::bail!("either a PROJECT file or --example is required"),
        }
    }
}

/// Two-decimal format that spells out the infinite sentinels.
pub fn fmt_finite(value: f64) -> String {
    if value == f64::INFINITY {
        "inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{value:.2}")
    }
}

/// Pretty-print `json` to `path`.
pub fn write_json(path: &Path, json: &serde_json::Value) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(json)?)?;
    println!("\nWrote {}", path.display());
    Ok(())
}

/// Read a WAV file as mono `f64` samples in `[-1, 1)` plus its sample rate.
///
/// Multi-channel files are mixed down by averaging channels.
pub fn read_wav_mono(path: &Path) -> anyhow::Result<(Vec<f64>, u32)> {
    let reader = hound::WavReader::open(path)?;
    let spec = reader.spec();
    let channels = usize::from(spec.channels.max(1));

    let samples: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let max_val = f64::from(1_u32 << (spec.bits_per_sample.clamp(1, 32) - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<Result<_, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f64>() / channels as f64)
            .collect()
    } else {
        samples
    };
    tracing::debug!(path = %path.display(), samples = mono.len(), rate = spec.sample_rate, "read wav");

    Ok((mono, spec.sample_rate))
}
