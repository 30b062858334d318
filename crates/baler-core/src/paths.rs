//! Project root discovery.
//!
//! A baler project is the closest ancestor directory containing a
//! `baler.toml`. All patterns and paths in the configuration are
//! interpreted relative to that root.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "baler.toml";

/// Resolved project directories for the current process.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    root: PathBuf,
}

impl ProjectPaths {
    /// Discover the project root starting from the current working directory.
    pub fn discover() -> io::Result<Self> {
        let cwd = env::current_dir()?;
        Self::discover_from(&cwd)
    }

    /// Discover the project root by walking ancestors of `start` until a
    /// directory containing [`CONFIG_FILE`] is found.
    pub fn discover_from(start: &Path) -> io::Result<Self> {
        for ancestor in start.ancestors() {
            if ancestor.join(CONFIG_FILE).is_file() {
                return Ok(Self {
                    root: ancestor.to_path_buf(),
                });
            }
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no {} found in {} or any ancestor", CONFIG_FILE, start.display()),
        ))
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the project configuration file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }
}
