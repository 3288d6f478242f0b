//! Chain stage entries as they appear in project files.

use fixsim_core::{BitWidth, FilterConfig, StageConfig, StageKind};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Block names that run as a fixed-point FIR.
pub static FILTER_BLOCKS: &[&str] = &[
    "filter",
    "fir",
    "iir",
    "cic_filter",
    "half_band_filter",
    "matched_filter",
    "wiener_filter",
    "kalman_filter",
    "convolution",
    "correlation",
];

/// Block names that run as carrier mixing plus low-pass.
pub static DUC_DDC_BLOCKS: &[&str] = &["duc_ddc", "duc", "ddc"];

/// Lowercase, with separators (`-`, `/`, space) folded to `_`.
fn normalize_block_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .replace(['-', '/', ' '], "_")
}

/// Map a block name to the numeric model that simulates it.
///
/// Every block without a fixed-point model passes its input through, so any
/// other name maps to [`StageKind::PassThrough`].
pub fn stage_kind_for(name: &str) -> StageKind {
    let key = normalize_block_name(name);
    if FILTER_BLOCKS.contains(&key.as_str()) {
        StageKind::Filter
    } else if DUC_DDC_BLOCKS.contains(&key.as_str()) {
        StageKind::DucDdc
    } else {
        StageKind::PassThrough
    }
}

/// One `[[stages]]` table.
///
/// ```toml
/// [[stages]]
/// kind = "FIR"
/// order = 11
/// coefficients = [0.25, 0.5, 0.25]
/// data_bit_width = 14
/// coeff_bit_width = 12
/// ```
///
/// A stage carries a filter configuration exactly when `coefficients` is
/// present; missing widths then default to 16 bits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageEntry {
    /// Block name (`"FIR"`, `"DUC/DDC"`, `"FFT"`, ...).
    pub kind: String,

    /// Moving-average length used when the stage has no coefficients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<usize>,

    /// Configured coefficients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficients: Option<Vec<f64>>,

    /// Sample width in bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_bit_width: Option<u32>,

    /// Coefficient width in bits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coeff_bit_width: Option<u32>,
}

impl StageEntry {
    /// Create an entry with only a block name.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            order: None,
            coefficients: None,
            data_bit_width: None,
            coeff_bit_width: None,
        }
    }

    /// Set the baseline order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the configured coefficients.
    pub fn with_coefficients(mut self, coefficients: impl Into<Vec<f64>>) -> Self {
        self.coefficients = Some(coefficients.into());
        self
    }

    /// Set both word widths.
    pub fn with_bit_widths(mut self, data_bits: u32, coeff_bits: u32) -> Self {
        self.data_bit_width = Some(data_bits);
        self.coeff_bit_width = Some(coeff_bits);
        self
    }

    /// Numeric model for this entry's block name.
    pub fn stage_kind(&self) -> StageKind {
        stage_kind_for(&self.kind)
    }

    /// Decode into a [`StageConfig`], validating the word widths.
    pub fn to_stage_config(&self) -> Result<StageConfig, fixsim_core::DspError> {
        let kind = self.stage_kind();
        if kind == StageKind::PassThrough
            && normalize_block_name(&self.kind) != StageKind::PassThrough.as_str()
        {
            tracing::debug!(block = %self.kind, "no numeric model, passing through");
        }

        let mut stage = StageConfig::new(kind);
        if let Some(order) = self.order {
            stage = stage.with_order(order);
        }
        if let Some(coefficients) = &self.coefficients {
            let data_bits = self.data_bit_width.unwrap_or(BitWidth::BASELINE.bits());
            let coeff_bits = self.coeff_bit_width.unwrap_or(BitWidth::BASELINE.bits());
            stage = stage.with_filter(FilterConfig::try_new(
                coefficients.clone(),
                data_bits,
                coeff_bits,
            )?);
        }
        Ok(stage)
    }

    /// Encode a [`StageConfig`] back into an entry.
    pub fn from_stage_config(stage: &StageConfig) -> Self {
        let mut entry = Self::new(stage.kind.as_str());
        entry.order = stage.order;
        if let Some(filter) = &stage.filter {
            entry.coefficients = Some(filter.coefficients().to_vec());
            entry.data_bit_width = Some(filter.data_bits().bits());
            entry.coeff_bit_width = Some(filter.coeff_bits().bits());
        }
        entry
    }
}

/// Decode a whole chain, tagging failures with the stage index.
pub fn decode_chain(entries: &[StageEntry]) -> Result<Vec<StageConfig>, ConfigError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            entry
                .to_stage_config()
                .map_err(|source| ConfigError::InvalidStage { index, source })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_names_map_to_models() {
        assert_eq!(stage_kind_for("FIR"), StageKind::Filter);
        assert_eq!(stage_kind_for("Half-band Filter"), StageKind::Filter);
        assert_eq!(stage_kind_for("Correlation"), StageKind::Filter);
        assert_eq!(stage_kind_for("DUC/DDC"), StageKind::DucDdc);
        assert_eq!(stage_kind_for("FFT"), StageKind::PassThrough);
        assert_eq!(stage_kind_for("pass_through"), StageKind::PassThrough);
    }

    #[test]
    fn filter_present_iff_coefficients_present() {
        let bare = StageEntry::new("FIR").with_bit_widths(8, 8);
        assert!(bare.to_stage_config().unwrap().filter.is_none());

        let configured = StageEntry::new("FIR").with_coefficients(vec![0.5, 0.5]);
        let stage = configured.to_stage_config().unwrap();
        let filter = stage.filter.unwrap();
        assert_eq!(filter.data_bits(), BitWidth::BASELINE);
        assert_eq!(filter.coeff_bits(), BitWidth::BASELINE);
        assert_eq!(filter.coefficients(), &[0.5, 0.5]);
    }

    #[test]
    fn explicit_widths_are_kept() {
        let stage = StageEntry::new("IIR")
            .with_order(5)
            .with_coefficients(vec![1.0])
            .with_bit_widths(14, 12)
            .to_stage_config()
            .unwrap();
        assert_eq!(stage.order, Some(5));
        let filter = stage.filter.unwrap();
        assert_eq!(filter.data_bits().bits(), 14);
        assert_eq!(filter.coeff_bits().bits(), 12);
    }

    #[test]
    fn bad_width_is_rejected() {
        let err = StageEntry::new("FIR")
            .with_coefficients(vec![1.0])
            .with_bit_widths(16, 64)
            .to_stage_config()
            .unwrap_err();
        assert_eq!(err, fixsim_core::DspError::InvalidBitWidth(64));
    }

    #[test]
    fn decode_chain_reports_index() {
        let entries = vec![
            StageEntry::new("FIR"),
            StageEntry::new("FIR").with_coefficients(vec![1.0]).with_bit_widths(1, 16),
        ];
        match decode_chain(&entries) {
            Err(ConfigError::InvalidStage { index, .. }) => assert_eq!(index, 1),
            other => panic!("expected InvalidStage, got {other:?}"),
        }
    }

    #[test]
    fn stage_config_round_trip() {
        let entry = StageEntry::new("duc_ddc")
            .with_coefficients(vec![0.1, 0.8, 0.1])
            .with_bit_widths(14, 16);
        let stage = entry.to_stage_config().unwrap();
        assert_eq!(StageEntry::from_stage_config(&stage), entry);
    }
}
