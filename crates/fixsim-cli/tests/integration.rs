//! Integration tests for fixsim-cli.
//!
//! Each test runs the built `fixsim` binary and checks its output.

use std::process::Command;

use tempfile::TempDir;

/// Helper to get the path to the `fixsim` binary built by cargo.
fn fixsim_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fixsim"))
}

fn stdout_of(args: &[&str]) -> String {
    let output = fixsim_bin()
        .args(args)
        .output()
        .expect("failed to run fixsim");
    assert!(
        output.status.success(),
        "fixsim {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// `fixsim examples`
// ---------------------------------------------------------------------------

#[test]
fn cli_examples_lists_all() {
    let stdout = stdout_of(&["examples"]);
    assert!(stdout.contains("Example Projects"));
    for name in ["ecg_fir", "eeg_bands", "hrv_lf_hf", "duc_ddc"] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn cli_examples_dump_then_run_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("ecg.toml");
    let path_str = path.to_str().unwrap();

    stdout_of(&["examples", "ecg_fir", "--output", path_str]);
    assert!(path.exists());

    let stdout = stdout_of(&["run", path_str]);
    assert!(stdout.contains("Project: ECG FIR"));
    assert!(stdout.contains("optimized"));
}

// ---------------------------------------------------------------------------
// `fixsim run`
// ---------------------------------------------------------------------------

#[test]
fn cli_run_example_prints_metrics() {
    let stdout = stdout_of(&["run", "--example", "ecg_fir"]);
    assert!(stdout.contains("SNR (dB)"));
    assert!(stdout.contains("input"));
    assert!(stdout.contains("baseline"));
    assert!(stdout.contains("optimized"));
}

#[test]
fn cli_run_prints_eeg_bands_for_every_run() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("eeg_custom.toml");
    std::fs::write(
        &path,
        r#"
name = "EEG custom"
signal = "eeg"
bands = "eeg"
active_stage = 0
custom_coefficients = [0.25, 0.5, 0.25]

[[stages]]
kind = "FIR"
coefficients = [-0.032, 0.0, 0.282, 0.5, 0.282, 0.0, -0.032]
"#,
    )
    .unwrap();

    let stdout = stdout_of(&["run", path.to_str().unwrap()]);
    for label in ["baseline", "optimized", "custom"] {
        assert!(
            stdout.contains(&format!("EEG band power ({label}):")),
            "missing {label} EEG block:\n{stdout}"
        );
    }
}

#[test]
fn cli_run_writes_json_report() {
    let temp_dir = TempDir::new().unwrap();
    let json_path = temp_dir.path().join("report.json");

    stdout_of(&[
        "run",
        "--example",
        "eeg_bands",
        "--output",
        json_path.to_str().unwrap(),
    ]);

    let text = std::fs::read_to_string(&json_path).unwrap();
    assert!(text.contains("\"baseline\""));
    assert!(text.contains("\"alpha\""));
    assert!(text.contains("\"psd_frequencies\""));
}

#[test]
fn cli_run_is_deterministic() {
    let a = stdout_of(&["run", "--example", "hrv_lf_hf", "--seed", "3"]);
    let b = stdout_of(&["run", "--example", "hrv_lf_hf", "--seed", "3"]);
    assert_eq!(a, b);
    assert!(a.contains("LF/HF"));
}

#[test]
fn cli_run_unknown_example_fails() {
    let output = fixsim_bin()
        .args(["run", "--example", "radar"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("example project not found"));
}

#[test]
fn cli_run_requires_project_or_example() {
    let output = fixsim_bin().arg("run").output().unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `fixsim psd`
// ---------------------------------------------------------------------------

#[test]
fn cli_psd_generated_signal() {
    let stdout = stdout_of(&["psd", "--signal", "sine", "--clean", "--peaks", "1"]);
    assert!(stdout.contains("PSD of sine"));
    assert!(stdout.contains("Top 1 peaks"));
}

#[test]
fn cli_psd_rejects_bad_fft_size() {
    let output = fixsim_bin()
        .args(["psd", "--fft-size", "300"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid FFT size 300"));
}

#[test]
fn cli_psd_wav_input() {
    let temp_dir = TempDir::new().unwrap();
    let wav_path = temp_dir.path().join("tone.wav");
    let json_path = temp_dir.path().join("psd.json");

    // 1 kHz tone at 8 kHz: bin 32 of a 256-point transform
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 8000,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&wav_path, spec).unwrap();
    for i in 0..1024 {
        let s = (2.0 * std::f64::consts::PI * 1000.0 * f64::from(i) / 8000.0).sin();
        writer.write_sample((s * 16000.0) as i16).unwrap();
    }
    writer.finalize().unwrap();

    let stdout = stdout_of(&[
        "psd",
        "--input",
        wav_path.to_str().unwrap(),
        "--window",
        "none",
        "--peaks",
        "1",
        "--output",
        json_path.to_str().unwrap(),
    ]);
    assert!(stdout.contains("8000.0 Hz"));
    assert!(stdout.contains("1000.000"), "peak should be at 1 kHz:\n{stdout}");
    assert!(json_path.exists());
}

// ---------------------------------------------------------------------------
// `fixsim response`, `quantize`, `sweep`
// ---------------------------------------------------------------------------

#[test]
fn cli_response_summary() {
    let stdout = stdout_of(&["response", "0.25", "0.5", "0.25"]);
    assert!(stdout.contains("Frequency response of 3 taps"));
    assert!(stdout.contains("DC gain:"));
    assert!(stdout.contains("0.00 dB"));
    assert!(stdout.contains("Last point:"));
    assert!(stdout.contains("at 0.4980 cycles/sample"), "{stdout}");
    assert!(!stdout.contains("Nyquist"));
}

#[test]
fn cli_response_accepts_negative_and_commas() {
    let stdout = stdout_of(&["response", "--rows", "0", "--", "-0.003,0.5,-0.003"]);
    assert!(stdout.contains("Frequency response of 3 taps"));
}

#[test]
fn cli_quantize_round_trip() {
    let stdout = stdout_of(&["quantize", "0.5", "-1", "--bits", "8"]);
    assert!(stdout.contains("8-bit fixed point: scale 127"));
    assert!(stdout.contains("64"), "0.5 * 127 rounds half up to 64:\n{stdout}");
    assert!(stdout.contains("-127"));
}

#[test]
fn cli_quantize_rejects_bad_width() {
    let output = fixsim_bin()
        .args(["quantize", "0.5", "--bits", "1"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid bit width 1"));
}

#[test]
fn cli_sweep_example() {
    let stdout = stdout_of(&[
        "sweep",
        "--example",
        "ecg_fir",
        "--data-bits",
        "8,16",
        "--coeff-bits",
        "8,16",
    ]);
    assert!(stdout.contains("Sweeping stage 0"));
    assert!(stdout.contains("Recommended:"));
    let rows = stdout
        .lines()
        .filter(|l| {
            let cols: Vec<&str> = l.split_whitespace().collect();
            cols.len() == 4 && cols[0].parse::<u32>().is_ok()
        })
        .count();
    assert_eq!(rows, 4);
}
