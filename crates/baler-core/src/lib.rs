//! Baler Core - shared foundations for the baler module bundler.
//!
//! This crate provides the error taxonomy, logging macros, and project
//! path discovery that the other baler crates depend on.

pub mod error;
pub mod logging;
pub mod paths;

pub use error::{BuildError, BuildResult, LintViolation};
pub use paths::ProjectPaths;
