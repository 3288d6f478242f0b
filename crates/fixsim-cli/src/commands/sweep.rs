//! Bit-width sweep over a project's filter.

use std::path::PathBuf;

use clap::Args;
use fixsim_analysis::{bitwidth_sweep, recommend};
use fixsim_core::BitWidth;
use serde_json::json;

use super::common::{ProjectSource, fmt_finite, write_json};

#[derive(Args)]
pub struct SweepArgs {
    #[command(flatten)]
    source: ProjectSource,

    /// Data widths to try
    #[arg(long, value_delimiter = ',', default_value = "8,10,12,14,16,18")]
    data_bits: Vec<u32>,

    /// Coefficient widths to try
    #[arg(long, value_delimiter = ',', default_value = "8,10,12,14,16,18")]
    coeff_bits: Vec<u32>,

    /// Largest SNR loss (dB) accepted for the recommendation
    #[arg(long, default_value = "0.5")]
    max_loss_db: f64,

    /// Write the sweep as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn widths(bits: &[u32]) -> anyhow::Result<Vec<BitWidth>> {
    Ok(bits
        .iter()
        .map(|&b| BitWidth::new(b))
        .collect::<Result<_, _>>()?)
}

pub fn run(args: SweepArgs) -> anyhow::Result<()> {
    let project = args.source.load()?;
    let data_widths = widths(&args.data_bits)?;
    let coeff_widths = widths(&args.coeff_bits)?;

    // the active stage if it has coefficients, else the first stage that does
    let active = project
        .active_stage
        .and_then(|i| project.stages.get(i).map(|s| (i, s)))
        .filter(|(_, s)| s.coefficients.is_some());
    let Some((index, stage)) = active.or_else(|| {
        project
            .stages
            .iter()
            .enumerate()
            .find(|(_, s)| s.coefficients.is_some())
    }) else {
        anyhow::bail!("project '{}' has no stage with coefficients", project.name);
    };
    let coefficients = stage.coefficients.as_deref().unwrap_or_default();

    let signals = project.generate_signals()?;
    println!(
        "Sweeping stage {index} ({}, {} taps) of '{}' on {}",
        stage.kind,
        coefficients.len(),
        project.name,
        project.signal
    );

    let points = bitwidth_sweep(
        &signals.clean,
        &signals.noisy,
        coefficients,
        &data_widths,
        &coeff_widths,
    );

    println!("\n{:>6} {:>6} {:>10} {:>12}", "Data", "Coeff", "SNR (dB)", "MSE");
    for p in &points {
        println!(
            "{:>6} {:>6} {:>10} {:>12.6}",
            p.data_bits.bits(),
            p.coeff_bits.bits(),
            fmt_finite(p.metrics.snr),
            p.metrics.mse
        );
    }

    let pick = recommend(&points, args.max_loss_db);
    if let Some(p) = pick {
        println!(
            "\nRecommended: {}-bit data, {}-bit coefficients ({} dB, within {} dB of best)",
            p.data_bits.bits(),
            p.coeff_bits.bits(),
            fmt_finite(p.metrics.snr),
            args.max_loss_db
        );
    }

    if let Some(output) = args.output {
        let rows: Vec<_> = points
            .iter()
            .map(|p| {
                json!({
                    "data_bits": p.data_bits.bits(),
                    "coeff_bits": p.coeff_bits.bits(),
                    "snr_db": p.metrics.snr,
                    "mse": p.metrics.mse,
                })
            })
            .collect();
        let json = json!({
            "project": project.name,
            "stage": index,
            "points": rows,
            "recommended": pick.map(|p| json!({
                "data_bits": p.data_bits.bits(),
                "coeff_bits": p.coeff_bits.bits(),
            })),
        });
        write_json(&output, &json)?;
    }

    Ok(())
}
