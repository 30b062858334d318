//! Error handling for the baler toolchain.
//!
//! This module centralizes the error types used across all baler crates.
//! Build-time errors share one taxonomy (configuration, lint, resolution,
//! I/O), and the CLI wraps them in [`CliError`] with process exit codes.

/// Errors produced while building a bundle.
pub mod build;
/// Errors surfaced at the CLI boundary.
pub mod cli;

pub use build::{BuildError, BuildResult, LintViolation};
pub use cli::{CliError, CliResult};
