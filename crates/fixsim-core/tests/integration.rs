//! Integration tests for fixsim-core.
//!
//! Exercises the filter engine and chain processor end to end against
//! floating-point references.

use fixsim_core::{
    BitWidth, DUC_DDC_DEFAULT_TAPS, FilterConfig, StageConfig, StageKind, apply_duc_ddc,
    apply_fixed_point_filter, apply_mixing, moving_average, process_full_chain,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unit impulse at index 0.
fn impulse(len: usize) -> Vec<f64> {
    let mut x = vec![0.0; len];
    x[0] = 1.0;
    x
}

/// Floating-point causal FIR reference.
fn reference_fir(input: &[f64], taps: &[f64]) -> Vec<f64> {
    (0..input.len())
        .map(|i| {
            taps.iter()
                .enumerate()
                .filter(|(j, _)| *j <= i)
                .map(|(j, c)| c * input[i - j])
                .sum()
        })
        .collect()
}

// ===========================================================================
// Baseline moving average
// ===========================================================================

#[test]
fn baseline_impulse_response_matches_float_average() {
    let input = impulse(200);
    let stage = StageConfig::new(StageKind::Filter);
    let out = process_full_chain(&input, &[stage]);

    let tolerance = 1.0 / (2.0 * 32767.0);
    for (i, &y) in out.iter().enumerate() {
        let expected = if i < 11 { 1.0 / 11.0 } else { 0.0 };
        assert!(
            (y - expected).abs() <= tolerance,
            "sample {i}: {y} vs {expected}"
        );
    }
    // Quantized step is flat across the window.
    assert!(out[..11].windows(2).all(|w| w[0] == w[1]));
    assert!(out[11..].iter().all(|&y| y == 0.0));
}

#[test]
fn quantized_filter_tracks_float_reference() {
    let taps = [-0.003, 0.005, 0.031, 0.107, 0.222, 0.276, 0.222, 0.107, 0.031, 0.005, -0.003];
    let input: Vec<f64> = (0..512)
        .map(|i| 0.6 * (i as f64 * 0.07).sin() + 0.3 * (i as f64 * 0.9).cos())
        .collect();
    let bits = BitWidth::new(16).unwrap();

    let fixed = apply_fixed_point_filter(&input, &taps, bits, bits);
    let float = reference_fir(&input, &taps);

    // One LSB of coefficient error per tap plus rounding per product.
    let bound = taps.len() as f64 * 2.0 / 32767.0;
    for (i, (a, b)) in fixed.iter().zip(&float).enumerate() {
        assert!((a - b).abs() < bound, "sample {i}: {a} vs {b}");
    }
}

#[test]
fn coarse_widths_increase_error() {
    let taps = moving_average(7);
    let input: Vec<f64> = (0..400).map(|i| (i as f64 * 0.05).sin() * 0.8).collect();
    let float = reference_fir(&input, &taps);

    let err = |bits: u32| -> f64 {
        let w = BitWidth::new(bits).unwrap();
        apply_fixed_point_filter(&input, &taps, w, w)
            .iter()
            .zip(&float)
            .map(|(a, b)| (a - b).powi(2))
            .sum::<f64>()
    };

    assert!(err(6) > err(12));
    assert!(err(12) > err(20));
}

// ===========================================================================
// Chains
// ===========================================================================

#[test]
fn configured_chain_differs_from_baseline() {
    let design = FilterConfig::try_new(vec![0.5, 0.5], 16, 16).unwrap();
    let chain = vec![StageConfig::new(StageKind::Filter).with_filter(design)];
    let baseline: Vec<StageConfig> = chain.iter().map(StageConfig::baseline).collect();

    let input: Vec<f64> = (0..64).map(|i| if i % 2 == 0 { 0.5 } else { -0.5 }).collect();
    let optimized = process_full_chain(&input, &chain);
    let base = process_full_chain(&input, &baseline);

    assert_ne!(optimized, base);
    // Two-tap average nulls the alternating signal after the first sample.
    assert!(optimized[1..].iter().all(|y| y.abs() < 1e-9));
}

#[test]
fn duc_ddc_stage_mixes_then_filters() {
    let design = FilterConfig::try_new(Vec::new(), 14, 16).unwrap();
    let stage = StageConfig::new(StageKind::DucDdc).with_filter(design);
    let input: Vec<f64> = (0..128).map(|i| (i as f64 * 0.1).sin() * 0.5).collect();

    let out = process_full_chain(&input, &[stage]);
    let expected = apply_fixed_point_filter(
        &apply_mixing(&input, 20.0),
        &DUC_DDC_DEFAULT_TAPS,
        BitWidth::new(14).unwrap(),
        BitWidth::new(14).unwrap(),
    );
    assert_eq!(out, expected);
    assert_eq!(out, apply_duc_ddc(&input, &[], BitWidth::new(14).unwrap()));
}

#[test]
fn mixed_chain_length_is_stable() {
    let chain = vec![
        StageConfig::new(StageKind::PassThrough),
        StageConfig::new(StageKind::Filter).with_order(4),
        StageConfig::new(StageKind::DucDdc),
        StageConfig::new(StageKind::Filter),
    ];
    let input = impulse(333);
    assert_eq!(process_full_chain(&input, &chain).len(), 333);
}
