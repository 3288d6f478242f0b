//! Property-based tests for fixsim-analysis.
//!
//! Checks the sentinel and sign contracts of the metrics, spectral and
//! band-power functions over random inputs.

use fixsim_analysis::{
    FftSize, WindowKind, apply_window, calculate_eeg_bands, calculate_hrv_power_bands,
    calculate_mse, calculate_psd, calculate_snr, calculate_frequency_response, RESPONSE_POINTS,
};
use proptest::prelude::*;

fn fft_size() -> impl Strategy<Value = FftSize> {
    prop::sample::select(FftSize::ALL.to_vec())
}

fn window() -> impl Strategy<Value = WindowKind> {
    prop::sample::select(WindowKind::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// MSE is non-negative and symmetric.
    #[test]
    fn mse_non_negative_and_symmetric(
        pairs in prop::collection::vec((-2.0f64..2.0, -2.0f64..2.0), 1..200),
    ) {
        let (a, b): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
        let ab = calculate_mse(&a, &b);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - calculate_mse(&b, &a)).abs() < 1e-12);
    }

    /// A non-silent signal compared with itself scores infinite SNR.
    #[test]
    fn snr_of_identical_signal_is_infinite(
        mut x in prop::collection::vec(-1.0f64..1.0, 1..200),
    ) {
        x[0] = 0.5;
        prop_assert_eq!(calculate_snr(&x, &x), f64::INFINITY);
        prop_assert_eq!(calculate_mse(&x, &x), 0.0);
    }

    /// PSD has `fft_size / 2` non-negative bins for any input.
    #[test]
    fn psd_shape_and_sign(
        signal in prop::collection::vec(-1.0f64..1.0, 0..1500),
        size in fft_size(),
        win in window(),
    ) {
        let psd = calculate_psd(&signal, size, win);
        prop_assert_eq!(psd.len(), size.points() / 2);
        prop_assert!(psd.iter().all(|&p| p >= 0.0));
    }

    /// EEG band powers are non-negative for non-negative PSDs.
    #[test]
    fn eeg_bands_non_negative(
        psd in prop::collection::vec(0.0f64..100.0, 0..600),
        sampling_rate in 1.0f64..2000.0,
    ) {
        let bands = calculate_eeg_bands(&psd, sampling_rate);
        prop_assert!(bands.delta >= 0.0);
        prop_assert!(bands.theta >= 0.0);
        prop_assert!(bands.alpha >= 0.0);
        prop_assert!(bands.beta >= 0.0);
    }

    /// HRV band powers are non-negative and the ratio is never negative.
    #[test]
    fn hrv_bands_non_negative(
        signal in prop::collection::vec(-2.0f64..2.0, 0..300),
        sampling_rate in 0.5f64..10.0,
        win in window(),
    ) {
        let hrv = calculate_hrv_power_bands(&signal, sampling_rate, FftSize::N256, win);
        prop_assert!(hrv.lf_power >= 0.0);
        prop_assert!(hrv.hf_power >= 0.0);
        prop_assert!(hrv.lf_hf_ratio >= 0.0);
    }

    /// Windows preserve length and never amplify.
    #[test]
    fn window_bounds(
        signal in prop::collection::vec(-1.0f64..1.0, 2..300),
        win in window(),
    ) {
        let out = apply_window(&signal, win).unwrap();
        prop_assert_eq!(out.len(), signal.len());
        for (x, y) in signal.iter().zip(&out) {
            prop_assert!(y.abs() <= x.abs() + 1e-12);
        }
    }

    /// Responses always have 256 points for non-empty coefficients.
    #[test]
    fn response_length(coeffs in prop::collection::vec(-1.0f64..1.0, 1..64)) {
        let response = calculate_frequency_response(&coeffs);
        prop_assert_eq!(response.len(), RESPONSE_POINTS);
        prop_assert!(response.iter().all(|db| db.is_finite()));
    }
}
