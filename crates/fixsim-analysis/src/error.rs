//! Error types for name parsing.

use thiserror::Error;

/// A textual name did not match any known variant.
///
/// Returned by the `FromStr` impls of [`WindowKind`](crate::WindowKind),
/// [`SignalKind`](crate::SignalKind) and [`BandAnalysis`](crate::BandAnalysis).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {what} '{name}' (expected one of: {expected})")]
pub struct ParseKindError {
    /// What was being parsed ("window", "signal", ...).
    pub what: &'static str,
    /// The rejected input.
    pub name: String,
    /// Comma-separated list of accepted names.
    pub expected: String,
}

impl ParseKindError {
    pub(crate) fn new(what: &'static str, name: &str, expected: &[&str]) -> Self {
        Self {
            what,
            name: name.to_string(),
            expected: expected.join(", "),
        }
    }
}
