//! Power spectrum of a generated signal or a WAV file.

use std::path::PathBuf;

use clap::Args;
use fixsim_analysis::{
    FftSize, SignalKind, WindowKind, bin_frequencies, calculate_psd, calculate_psd_fft,
    find_peaks, power_to_db,
};
use serde_json::json;

use super::common::{read_wav_mono, write_json};

#[derive(Args)]
pub struct PsdArgs {
    /// Generated signal source
    #[arg(long, default_value = "ecg", conflicts_with = "input")]
    signal: String,

    /// Analyze a WAV file instead of a generated signal
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Use the clean signal rather than the noisy one
    #[arg(long)]
    clean: bool,

    /// Noise seed for generated signals
    #[arg(long, default_value_t = fixsim_analysis::DEFAULT_SEED)]
    seed: u32,

    /// Sampling rate in Hz (defaults to the signal's nominal rate or the WAV header)
    #[arg(long)]
    sampling_rate: Option<f64>,

    /// Transform size: 64, 128, 256, 512 or 1024
    #[arg(long, default_value = "256")]
    fft_size: usize,

    /// Window function: none, hamming, blackman, hann
    #[arg(long, default_value = "hann")]
    window: String,

    /// Show top N peaks
    #[arg(long, default_value = "5")]
    peaks: usize,

    /// Use the direct DFT instead of the FFT
    #[arg(long)]
    direct: bool,

    /// Write frequencies and PSD as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: PsdArgs) -> anyhow::Result<()> {
    let fft_size = FftSize::try_from(args.fft_size)?;
    let window: WindowKind = args.window.parse()?;

    let (samples, nominal_rate, label) = match &args.input {
        Some(path) => {
            let (samples, rate) = read_wav_mono(path)?;
            (samples, f64::from(rate), path.display().to_string())
        }
        None => {
            let kind: SignalKind = args.signal.parse()?;
            let pair = kind.generate(args.seed);
            let samples = if args.clean { pair.clean } else { pair.noisy };
            (samples, kind.sampling_rate(), kind.to_string())
        }
    };
    let sampling_rate = args.sampling_rate.unwrap_or(nominal_rate);
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        anyhow::bail!("sampling rate must be positive, got {sampling_rate}");
    }

    println!("PSD of {label}");
    println!(
        "  {} samples, {:.1} Hz, {}-point transform, {} window",
        samples.len(),
        sampling_rate,
        fft_size,
        window
    );

    let psd = if args.direct {
        calculate_psd(&samples, fft_size, window)
    } else {
        calculate_psd_fft(&samples, fft_size, window)
    };
    let psd_db = power_to_db(&psd);
    let frequencies = bin_frequencies(fft_size, sampling_rate);

    let total: f64 = psd.iter().sum();
    println!("  Total power: {total:.6}");

    if args.peaks > 0 {
        println!("\nTop {} peaks:", args.peaks);
        println!("  {:>5} {:>12} {:>10}", "Bin", "Freq (Hz)", "dB");
        for (bin, _) in find_peaks(&psd, args.peaks) {
            println!("  {:>5} {:>12.3} {:>10.2}", bin, frequencies[bin], psd_db[bin]);
        }
    }

    if let Some(output) = args.output {
        let json = json!({
            "source": label,
            "sampling_rate": sampling_rate,
            "fft_size": fft_size.points(),
            "window": window.as_str(),
            "frequencies": frequencies,
            "psd": psd,
            "psd_db": psd_db,
        });
        write_json(&output, &json)?;
    }

    Ok(())
}
