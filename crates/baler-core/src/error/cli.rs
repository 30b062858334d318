//! CLI-boundary errors.
//!
//! Wraps [`BuildError`] and CLI-specific failures, and maps every variant
//! to a stable process exit code.

use std::path::PathBuf;

use thiserror::Error as ThisError;

use crate::error::BuildError;

/// Result type for CLI operations.
pub type CliResult<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the CLI invoker.
#[derive(Debug, ThisError)]
pub enum CliError {
    /// Invalid CLI usage or project setup.
    #[error("configuration error: {message}")]
    Config {
        /// What is wrong.
        message: String,
    },

    /// The project configuration file could not be located.
    #[error("configuration file not found: {}", path.display())]
    ConfigNotFound {
        /// The path that was looked for.
        path: PathBuf,
    },

    /// A task name that is not in the registry.
    #[error("unknown task: '{name}'")]
    UnknownTask {
        /// The requested task name.
        name: String,
    },

    /// A build failure, forwarded from the bundling pipeline.
    #[error(transparent)]
    Build(#[from] BuildError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config { .. } | CliError::ConfigNotFound { .. } => 2,
            CliError::UnknownTask { .. } => 2,
            CliError::Build(BuildError::Config { .. }) => 2,
            CliError::Build(BuildError::Lint { .. }) => 3,
            CliError::Build(BuildError::Resolution { .. }) => 4,
            CliError::Build(BuildError::Io { .. }) => 5,
        }
    }
}
