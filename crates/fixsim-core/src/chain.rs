//! DSP chain processing.
//!
//! A chain is an ordered list of [`StageConfig`]s applied left to right, each
//! stage consuming the previous stage's output. There is no fan-out or
//! fan-in.
//!
//! Stage settings are resolved once, by [`StageConfig::resolve`], into a
//! [`ResolvedStage`] with every default filled in:
//!
//! | Kind | Filter config | Resolved to |
//! |------|---------------|-------------|
//! | `Filter` | present | fixed-point FIR with the configured taps and widths |
//! | `Filter` | absent | moving average of `order` taps (default 11) at 16/16 bits |
//! | `DucDdc` | present | carrier mix + low-pass at the configured data width |
//! | `DucDdc` | absent | pass-through |
//! | `PassThrough` | any | pass-through |
//!
//! # Example
//!
//! ```rust
//! use fixsim_core::{StageConfig, StageKind, process_full_chain};
//!
//! let chain = vec![
//!     StageConfig::new(StageKind::Filter).with_order(5),
//!     StageConfig::new(StageKind::PassThrough),
//! ];
//! let input = vec![1.0; 20];
//! let out = process_full_chain(&input, &chain);
//! assert_eq!(out.len(), 20);
//! assert!((out[10] - 1.0).abs() < 1e-3);
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::fir::{DEFAULT_FILTER_ORDER, FilterConfig};
use crate::mixer::apply_duc_ddc;

/// What a chain stage does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    /// FIR-style block (FIR, IIR stand-ins, convolution, correlation, ...).
    Filter,
    /// Digital up/down converter: carrier mixing followed by a low-pass.
    DucDdc,
    /// Any block without a numeric model; output equals input.
    PassThrough,
}

impl StageKind {
    /// Stable lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            StageKind::Filter => "filter",
            StageKind::DucDdc => "duc_ddc",
            StageKind::PassThrough => "pass_through",
        }
    }
}

impl core::fmt::Display for StageKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings of one chain stage, as edited by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct StageConfig {
    /// Stage behavior.
    pub kind: StageKind,
    /// Baseline moving-average length for unconfigured filter stages.
    pub order: Option<usize>,
    /// Design result or custom coefficients bound to word widths.
    pub filter: Option<FilterConfig>,
}

impl StageConfig {
    /// A stage with no order and no filter configuration.
    pub fn new(kind: StageKind) -> Self {
        Self {
            kind,
            order: None,
            filter: None,
        }
    }

    /// Set the baseline filter order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Attach a filter configuration.
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = Some(filter);
        self
    }

    /// The same stage with its configuration stripped.
    pub fn baseline(&self) -> Self {
        Self {
            kind: self.kind,
            order: self.order,
            filter: None,
        }
    }

    /// The same stage with the configured coefficients replaced.
    ///
    /// A stage without a configuration gets one at the baseline widths.
    pub fn with_coefficients(&self, coefficients: Vec<f64>) -> Self {
        let filter = match &self.filter {
            Some(f) => f.with_coefficients(coefficients),
            None => FilterConfig::new(
                coefficients,
                crate::BitWidth::BASELINE,
                crate::BitWidth::BASELINE,
            ),
        };
        Self {
            kind: self.kind,
            order: self.order,
            filter: Some(filter),
        }
    }

    /// Baseline order with the default applied (absent or zero → 11).
    pub fn effective_order(&self) -> usize {
        match self.order {
            Some(order) if order > 0 => order,
            _ => DEFAULT_FILTER_ORDER,
        }
    }

    /// Fill in every default and pick the numeric model for this stage.
    pub fn resolve(&self) -> ResolvedStage {
        match (self.kind, &self.filter) {
            (StageKind::Filter, Some(filter)) => ResolvedStage::Fir(filter.clone()),
            // effective_order() is never zero.
            (StageKind::Filter, None) => match FilterConfig::baseline(self.effective_order()) {
                Ok(filter) => ResolvedStage::Fir(filter),
                Err(_) => ResolvedStage::PassThrough,
            },
            (StageKind::DucDdc, Some(filter)) => ResolvedStage::DucDdc(filter.clone()),
            (StageKind::DucDdc, None) | (StageKind::PassThrough, _) => ResolvedStage::PassThrough,
        }
    }
}

/// A stage with all defaults resolved, ready to run.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedStage {
    /// Fixed-point FIR.
    Fir(FilterConfig),
    /// Carrier mix + fixed-point low-pass at the configuration's data width.
    DucDdc(FilterConfig),
    /// Identity.
    PassThrough,
}

impl ResolvedStage {
    /// Run this stage over `input`.
    pub fn process(&self, input: &[f64]) -> Vec<f64> {
        match self {
            ResolvedStage::Fir(filter) => filter.apply(input),
            ResolvedStage::DucDdc(filter) => {
                apply_duc_ddc(input, filter.coefficients(), filter.data_bits())
            }
            ResolvedStage::PassThrough => input.to_vec(),
        }
    }

    /// Coefficients whose frequency response describes this stage, if any.
    pub fn coefficients(&self) -> Option<&[f64]> {
        match self {
            ResolvedStage::Fir(filter) | ResolvedStage::DucDdc(filter) => {
                Some(filter.coefficients())
            }
            ResolvedStage::PassThrough => None,
        }
    }
}

/// Apply one stage to `input`.
pub fn apply_block(input: &[f64], stage: &StageConfig) -> Vec<f64> {
    let resolved = stage.resolve();
    #[cfg(feature = "tracing")]
    tracing::debug!(kind = %stage.kind, configured = stage.filter.is_some(), "apply_block: {resolved:?}");
    resolved.process(input)
}

/// Fold [`apply_block`] over `chain`. An empty chain returns the input.
pub fn process_full_chain(input: &[f64], chain: &[StageConfig]) -> Vec<f64> {
    #[cfg(feature = "tracing")]
    tracing::debug!("process_full_chain: {} stages, {} samples", chain.len(), input.len());
    chain
        .iter()
        .fold(input.to_vec(), |signal, stage| apply_block(&signal, stage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BitWidth, apply_fixed_point_filter, moving_average};

    fn ramp(n: usize) -> Vec<f64> {
        (0..n).map(|i| (i as f64 / n as f64) - 0.5).collect()
    }

    #[test]
    fn empty_chain_is_identity() {
        let input = ramp(64);
        assert_eq!(process_full_chain(&input, &[]), input);
    }

    #[test]
    fn unconfigured_filter_defaults_to_eleven_tap_average() {
        let stage = StageConfig::new(StageKind::Filter);
        match stage.resolve() {
            ResolvedStage::Fir(f) => {
                assert_eq!(f.taps(), 11);
                assert_eq!(f.data_bits(), BitWidth::BASELINE);
                assert_eq!(f.coeff_bits(), BitWidth::BASELINE);
            }
            other => panic!("expected FIR, got {other:?}"),
        }
    }

    #[test]
    fn unconfigured_filter_resolves_to_baseline() {
        let stage = StageConfig::new(StageKind::Filter).with_order(0);
        assert_eq!(
            stage.resolve(),
            ResolvedStage::Fir(FilterConfig::baseline(DEFAULT_FILTER_ORDER).unwrap())
        );
        let stage = StageConfig::new(StageKind::Filter).with_order(5);
        assert_eq!(
            stage.resolve(),
            ResolvedStage::Fir(FilterConfig::baseline(5).unwrap())
        );
    }

    #[test]
    fn zero_order_falls_back_to_default() {
        let stage = StageConfig::new(StageKind::Filter).with_order(0);
        assert_eq!(stage.effective_order(), DEFAULT_FILTER_ORDER);
    }

    #[test]
    fn unconfigured_duc_ddc_passes_through() {
        let stage = StageConfig::new(StageKind::DucDdc);
        assert_eq!(stage.resolve(), ResolvedStage::PassThrough);
        let input = ramp(10);
        assert_eq!(apply_block(&input, &stage), input);
    }

    #[test]
    fn pass_through_ignores_configuration() {
        let filter = FilterConfig::try_new(vec![0.5, 0.5], 16, 16).unwrap();
        let stage = StageConfig::new(StageKind::PassThrough).with_filter(filter);
        let input = ramp(10);
        assert_eq!(apply_block(&input, &stage), input);
    }

    #[test]
    fn configured_filter_uses_its_widths() {
        let filter = FilterConfig::try_new(vec![0.2, 0.6, 0.2], 10, 8).unwrap();
        let stage = StageConfig::new(StageKind::Filter).with_filter(filter);
        let input = ramp(32);
        let expected = apply_fixed_point_filter(
            &input,
            &[0.2, 0.6, 0.2],
            BitWidth::new(10).unwrap(),
            BitWidth::new(8).unwrap(),
        );
        assert_eq!(apply_block(&input, &stage), expected);
    }

    #[test]
    fn chain_folds_in_order() {
        let chain = vec![
            StageConfig::new(StageKind::Filter).with_order(3),
            StageConfig::new(StageKind::Filter).with_order(5),
        ];
        let input = ramp(40);
        let b = BitWidth::BASELINE;
        let first = apply_fixed_point_filter(&input, &moving_average(3), b, b);
        let second = apply_fixed_point_filter(&first, &moving_average(5), b, b);
        assert_eq!(process_full_chain(&input, &chain), second);
    }

    #[test]
    fn baseline_strips_configuration() {
        let filter = FilterConfig::try_new(vec![1.0], 16, 16).unwrap();
        let stage = StageConfig::new(StageKind::Filter)
            .with_order(7)
            .with_filter(filter);
        let base = stage.baseline();
        assert!(base.filter.is_none());
        assert_eq!(base.order, Some(7));
    }

    #[test]
    fn with_coefficients_keeps_widths() {
        let filter = FilterConfig::try_new(vec![1.0], 12, 10).unwrap();
        let stage = StageConfig::new(StageKind::Filter).with_filter(filter);
        let custom = stage.with_coefficients(vec![0.5, 0.5]);
        let f = custom.filter.unwrap();
        assert_eq!(f.coefficients(), &[0.5, 0.5]);
        assert_eq!(f.data_bits().bits(), 12);
        assert_eq!(f.coeff_bits().bits(), 10);

        let fresh = StageConfig::new(StageKind::Filter).with_coefficients(vec![1.0]);
        assert_eq!(fresh.filter.unwrap().data_bits(), BitWidth::BASELINE);
    }

    #[test]
    fn resolved_coefficients() {
        assert!(ResolvedStage::PassThrough.coefficients().is_none());
        let stage = StageConfig::new(StageKind::Filter).with_order(4);
        assert_eq!(stage.resolve().coefficients().map(<[f64]>::len), Some(4));
    }
}
