//! Fixsim Core - fixed-point DSP simulation primitives
//!
//! This crate models how a DSP block behaves once it is mapped onto
//! fixed-point hardware, without simulating the hardware itself.
//!
//! # Modules
//!
//! - [`codec`] - [`BitWidth`], [`quantize`], [`dequantize`], [`fixed_multiply`]
//! - [`fir`] - [`apply_fixed_point_filter`] and [`FilterConfig`]
//! - [`mixer`] - cosine carrier mixing and the DUC/DDC composite
//! - [`chain`] - [`StageConfig`], default resolution and [`process_full_chain`]
//! - [`error`] - [`DspError`] for invalid configuration
//!
//! # Arithmetic Model
//!
//! Samples and coefficients are quantized to `round(x * (2^(b-1) - 1))` with
//! round-half-up ties. Tap products are rescaled at the coefficient width and
//! summed in an `i128` accumulator that never saturates. The result is an
//! idealized fixed-point datapath: word-width rounding is modeled, register
//! overflow is not.
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for `no_std` + `alloc`:
//!
//! ```toml
//! [dependencies]
//! fixsim-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use fixsim_core::{FilterConfig, StageConfig, StageKind, process_full_chain};
//!
//! let design = FilterConfig::try_new(vec![0.25, 0.5, 0.25], 16, 16).unwrap();
//! let chain = vec![StageConfig::new(StageKind::Filter).with_filter(design)];
//!
//! let input: Vec<f64> = (0..256).map(|i| (i as f64 * 0.05).sin()).collect();
//! let output = process_full_chain(&input, &chain);
//! assert_eq!(output.len(), input.len());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod chain;
pub mod codec;
pub mod error;
pub mod fir;
pub mod mixer;

pub use chain::{ResolvedStage, StageConfig, StageKind, apply_block, process_full_chain};
pub use codec::{BitWidth, dequantize, fixed_multiply, quantize, quantize_slice, round_half_up};
pub use error::DspError;
pub use fir::{DEFAULT_FILTER_ORDER, FilterConfig, apply_fixed_point_filter, moving_average};
pub use mixer::{DUC_DDC_CARRIER, DUC_DDC_DEFAULT_TAPS, MIXER_PERIOD, apply_duc_ddc, apply_mixing};
