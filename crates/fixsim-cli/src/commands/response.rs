//! Frequency response of a coefficient set.

use std::path::PathBuf;

use clap::Args;
use fixsim_analysis::{calculate_frequency_response, response_frequencies};
use serde_json::json;

use super::common::write_json;

#[derive(Args)]
pub struct ResponseArgs {
    /// Filter coefficients (space- or comma-separated)
    #[arg(
        value_name = "COEFFS",
        required = true,
        allow_negative_numbers = true,
        value_delimiter = ','
    )]
    coefficients: Vec<f64>,

    /// Number of table rows to print
    #[arg(long, default_value = "16")]
    rows: usize,

    /// Write the full response as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// First normalized frequency where the response falls `drop_db` below DC.
fn cutoff(frequencies: &[f64], response_db: &[f64], drop_db: f64) -> Option<f64> {
    let dc = *response_db.first()?;
    frequencies
        .iter()
        .zip(response_db)
        .find(|&(_, &db)| db < dc - drop_db)
        .map(|(&f, _)| f)
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    let response = calculate_frequency_response(&args.coefficients);
    let frequencies = response_frequencies();

    println!("Frequency response of {} taps", args.coefficients.len());

    let dc = response.first().copied().unwrap_or_default();
    let last = response.last().copied().unwrap_or_default();
    let last_freq = frequencies.last().copied().unwrap_or_default();
    let (min, max) = response
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &db| {
            (lo.min(db), hi.max(db))
        });
    println!("  DC gain:      {dc:>8.2} dB");
    println!("  Last point:   {last:>8.2} dB at {last_freq:.4} cycles/sample");
    println!("  Range:        {min:>8.2} .. {max:.2} dB");
    match cutoff(&frequencies, &response, 3.0) {
        Some(f) => println!("  -3 dB point:  {f:>8.4} cycles/sample"),
        None => println!("  -3 dB point:  none"),
    }

    if args.rows > 0 {
        let step = (response.len() / args.rows).max(1);
        println!("\n  {:>10} {:>10}", "Freq", "dB");
        for i in (0..response.len()).step_by(step) {
            println!("  {:>10.4} {:>10.2}", frequencies[i], response[i]);
        }
    }

    if let Some(output) = args.output {
        let json = json!({
            "coefficients": args.coefficients,
            "frequencies": frequencies,
            "magnitude_db": response,
        });
        write_json(&output, &json)?;
    }

    Ok(())
}
