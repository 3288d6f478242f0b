//! Bit-width sweep.
//!
//! Runs the fixed-point filter over a grid of data/coefficient widths and
//! scores each combination against the clean reference, the numeric half of
//! a word-length tradeoff study.

use fixsim_core::{BitWidth, apply_fixed_point_filter};

use crate::metrics::FidelityMetrics;

/// Fidelity of one width combination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPoint {
    /// Sample width
    pub data_bits: BitWidth,
    /// Coefficient width
    pub coeff_bits: BitWidth,
    /// SNR/MSE of the filtered noisy signal against the clean one
    pub metrics: FidelityMetrics,
}

impl SweepPoint {
    /// Data plus coefficient bits, a rough proxy for datapath cost.
    pub fn total_bits(&self) -> u32 {
        self.data_bits.bits() + self.coeff_bits.bits()
    }
}

/// Filter `noisy` with `coefficients` at every `(data, coeff)` pair.
///
/// Points are ordered data-width-major, following the order of the input
/// slices.
pub fn bitwidth_sweep(
    clean: &[f64],
    noisy: &[f64],
    coefficients: &[f64],
    data_widths: &[BitWidth],
    coeff_widths: &[BitWidth],
) -> Vec<SweepPoint> {
    let mut points = Vec::with_capacity(data_widths.len() * coeff_widths.len());
    for &data_bits in data_widths {
        for &coeff_bits in coeff_widths {
            let output = apply_fixed_point_filter(noisy, coefficients, data_bits, coeff_bits);
            let metrics = FidelityMetrics::measure(clean, &output);
            tracing::debug!(
                data = data_bits.bits(),
                coeff = coeff_bits.bits(),
                snr = metrics.snr,
                "sweep point"
            );
            points.push(SweepPoint {
                data_bits,
                coeff_bits,
                metrics,
            });
        }
    }
    points
}

/// The cheapest point whose SNR is within `max_loss_db` of the best one.
///
/// Ties on total bits go to the higher SNR. Returns `None` for an empty
/// sweep.
pub fn recommend(points: &[SweepPoint], max_loss_db: f64) -> Option<&SweepPoint> {
    let best = points
        .iter()
        .map(|p| p.metrics.snr)
        .fold(f64::NEG_INFINITY, f64::max);
    points
        .iter()
        .filter(|p| p.metrics.snr >= best - max_loss_db)
        .min_by(|a, b| {
            a.total_bits()
                .cmp(&b.total_bits())
                .then(b.metrics.snr.total_cmp(&a.metrics.snr))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widths(bits: &[u32]) -> Vec<BitWidth> {
        bits.iter().map(|&b| BitWidth::new(b).unwrap()).collect()
    }

    fn pair() -> (Vec<f64>, Vec<f64>) {
        let clean: Vec<f64> = (0..512).map(|i| (i as f64 * 0.02).sin() * 0.8).collect();
        let noisy: Vec<f64> = clean
            .iter()
            .enumerate()
            .map(|(i, c)| c + 0.05 * (i as f64 * 2.7).sin())
            .collect();
        (clean, noisy)
    }

    #[test]
    fn grid_order_and_size() {
        let (clean, noisy) = pair();
        let points = bitwidth_sweep(&clean, &noisy, &[0.5, 0.5], &widths(&[8, 16]), &widths(&[6, 12, 18]));
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].data_bits.bits(), 8);
        assert_eq!(points[0].coeff_bits.bits(), 6);
        assert_eq!(points[5].data_bits.bits(), 16);
        assert_eq!(points[5].coeff_bits.bits(), 18);
    }

    #[test]
    fn wider_words_do_not_hurt_much() {
        let (clean, noisy) = pair();
        let taps = [0.2, 0.2, 0.2, 0.2, 0.2];
        let points = bitwidth_sweep(&clean, &noisy, &taps, &widths(&[4, 20]), &widths(&[20]));
        assert!(points[1].metrics.mse < points[0].metrics.mse);
    }

    #[test]
    fn recommend_picks_cheapest_acceptable() {
        let (clean, noisy) = pair();
        let taps = [0.25, 0.5, 0.25];
        let points = bitwidth_sweep(
            &clean,
            &noisy,
            &taps,
            &widths(&[4, 12, 24]),
            &widths(&[4, 12, 24]),
        );
        let pick = recommend(&points, 0.5).unwrap();
        let best = points
            .iter()
            .map(|p| p.metrics.snr)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(pick.metrics.snr >= best - 0.5);
        assert!(pick.total_bits() < 48);
        assert!(recommend(&[], 1.0).is_none());
    }
}
