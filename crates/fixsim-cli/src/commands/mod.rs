//! CLI command implementations.

pub mod common;
pub mod examples;
pub mod psd;
pub mod quantize;
pub mod response;
pub mod run;
pub mod sweep;
