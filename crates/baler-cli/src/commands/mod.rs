//! CLI commands.
//!
//! Each command is implemented in its own module; project loading is
//! shared here.

pub mod build;
pub mod tasks;
pub mod watch;

pub use build::BuildArgs;

use std::path::Path;

use baler_bundler::Bundler;
use baler_config::BalerConfig;
use baler_core::error::cli::{CliError, CliResult};
use baler_core::ProjectPaths;

/// Locate the project and load its configuration. An explicit `--config`
/// path wins over `baler.toml` discovery; its parent directory becomes
/// the project root.
pub(crate) fn load_project(config: Option<&Path>) -> CliResult<Bundler> {
    let (root, config_path) = match config {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            let root = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => Path::new(".").to_path_buf(),
            };
            (root, path.to_path_buf())
        }
        None => {
            let paths = ProjectPaths::discover().map_err(|e| CliError::Config {
                message: format!("failed to locate project: {}", e),
            })?;
            (paths.root().to_path_buf(), paths.config_path())
        }
    };
    let config = BalerConfig::from_file(&config_path).map_err(|e| CliError::Config {
        message: e.to_string(),
    })?;
    Ok(Bundler::new(root, config))
}
