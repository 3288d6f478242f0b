//! Run a simulation project.

use std::path::PathBuf;

use clap::Args;
use fixsim_analysis::{AnalysisReport, FidelityMetrics, RunResult};
use serde_json::{Value, json};

use super::common::{ProjectSource, fmt_finite, write_json};

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    source: ProjectSource,

    /// Override the project's noise seed
    #[arg(long)]
    seed: Option<u32>,

    /// Write the full report as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: RunArgs) -> anyhow::Result<()> {
    let mut project = args.source.load()?;
    if let Some(seed) = args.seed {
        project.seed = seed;
    }

    let report = project.analyze()?;

    println!("Project: {}", project.name);
    if let Some(description) = &project.description {
        println!("  {description}");
    }
    println!(
        "  signal {} (seed {}), {} stages, {:.1} Hz",
        project.signal,
        project.seed,
        project.len(),
        report.sampling_rate
    );

    println!("\n{:<12} {:>10} {:>12}", "Run", "SNR (dB)", "MSE");
    print_metrics("input", &report.input_metrics);
    print_metrics("baseline", &report.baseline.metrics);
    if let Some(optimized) = &report.optimized {
        print_metrics("optimized", &optimized.metrics);
    }
    if let Some(custom) = &report.custom {
        print_metrics("custom", &custom.metrics);
    }

    if let Some(eeg) = &report.eeg {
        let runs = [
            ("baseline", Some(&eeg.baseline)),
            ("optimized", eeg.optimized.as_ref()),
            ("custom", eeg.custom.as_ref()),
        ];
        println!();
        for (label, bands) in runs {
            if let Some(b) = bands {
                println!("EEG band power ({label}):");
                for (band, power) in b.iter() {
                    println!(
                        "  {:<6} {:>8.1}-{:<5.1} Hz {:>14.6}",
                        band.name, band.low_hz, band.high_hz, power
                    );
                }
            }
        }
    }

    if let Some(hrv) = &report.hrv {
        println!("\nHRV band power:");
        let runs = [
            ("baseline", Some(&hrv.baseline)),
            ("optimized", hrv.optimized.as_ref()),
            ("custom", hrv.custom.as_ref()),
        ];
        for (label, bands) in runs {
            if let Some(b) = bands {
                println!(
                    "  {label:<10} LF {:>12.6}  HF {:>12.6}  LF/HF {}",
                    b.lf_power,
                    b.hf_power,
                    fmt_finite(b.lf_hf_ratio)
                );
            }
        }
    }

    if let Some(output) = args.output {
        write_json(&output, &report_json(&project.name, &report))?;
    }

    Ok(())
}

fn print_metrics(label: &str, metrics: &FidelityMetrics) {
    println!("{label:<12} {:>10} {:>12.6}", fmt_finite(metrics.snr), metrics.mse);
}

fn run_json(run: &RunResult) -> Value {
    // serde_json writes non-finite floats as null
    json!({
        "snr_db": run.metrics.snr,
        "mse": run.metrics.mse,
        "output": run.output,
        "psd_db": run.psd_db(),
    })
}

fn report_json(name: &str, report: &AnalysisReport) -> Value {
    let response = report.response.as_ref().map(|r| {
        json!({
            "frequencies": r.frequencies,
            "baseline_db": r.baseline,
            "optimized_db": r.optimized,
            "custom_db": r.custom,
        })
    });
    let eeg = report.eeg.as_ref().map(|eeg| {
        let bands = |b: &fixsim_analysis::EegBands| {
            json!({ "delta": b.delta, "theta": b.theta, "alpha": b.alpha, "beta": b.beta })
        };
        json!({
            "baseline": bands(&eeg.baseline),
            "optimized": eeg.optimized.as_ref().map(bands),
            "custom": eeg.custom.as_ref().map(bands),
        })
    });
    let hrv = report.hrv.as_ref().map(|hrv| {
        let bands = |b: &fixsim_analysis::HrvBands| {
            json!({ "lf_power": b.lf_power, "hf_power": b.hf_power, "lf_hf_ratio": b.lf_hf_ratio })
        };
        json!({
            "baseline": bands(&hrv.baseline),
            "optimized": hrv.optimized.as_ref().map(bands),
            "custom": hrv.custom.as_ref().map(bands),
        })
    });

    json!({
        "project": name,
        "sampling_rate": report.sampling_rate,
        "input": {
            "snr_db": report.input_metrics.snr,
            "mse": report.input_metrics.mse,
            "psd_db": fixsim_analysis::power_to_db(&report.input_psd),
        },
        "psd_frequencies": report.psd_frequencies,
        "baseline": run_json(&report.baseline),
        "optimized": report.optimized.as_ref().map(run_json),
        "custom": report.custom.as_ref().map(run_json),
        "response": response,
        "eeg": eeg,
        "hrv": hrv,
    })
}
