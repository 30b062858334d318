//! Shim adapters for global-variable scripts.
//!
//! A shim wraps a plain script that assigns to a global rather than
//! exporting a value, so it can be required like any module. The wrapper's
//! contract: execute the script once per bundle load, then export whatever
//! the script left on the declared global. If the global was never set the
//! export passes through as `undefined`; callers must treat that as a
//! configuration bug, not a bundler bug.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use baler_config::ShimConfig;
use baler_core::{BuildError, BuildResult};

use crate::emit;

/// A plain script requirable by name, exporting one named global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShimDescriptor {
    /// The require name other modules use.
    pub require_name: String,
    /// Absolute path of the script.
    pub path: PathBuf,
    /// The global the script leaves its value on.
    pub exposed_global: String,
}

/// The declared shims, keyed by require name.
#[derive(Debug, Default)]
pub struct ShimSet {
    shims: BTreeMap<String, ShimDescriptor>,
}

impl ShimSet {
    /// Validate the declared shims against the filesystem.
    pub fn build(root: &Path, configs: &[ShimConfig]) -> BuildResult<Self> {
        let mut shims = BTreeMap::new();
        for config in configs {
            let path = root.join(&config.path);
            if !path.is_file() {
                return Err(BuildError::config(
                    &config.name,
                    format!("shim target does not exist: {}", path.display()),
                ));
            }
            if shims.contains_key(&config.name) {
                return Err(BuildError::config(&config.name, "duplicate shim name"));
            }
            shims.insert(
                config.name.clone(),
                ShimDescriptor {
                    require_name: config.name.clone(),
                    path,
                    exposed_global: config.exports.clone(),
                },
            );
        }
        Ok(Self { shims })
    }

    /// Look up a shim by require name.
    pub fn get(&self, name: &str) -> Option<&ShimDescriptor> {
        self.shims.get(name)
    }

    /// All shims, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ShimDescriptor> {
        self.shims.values()
    }

    /// All target scripts, in name order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.shims.values().map(|s| s.path.as_path())
    }
}

/// Synthesize the module body for a shim: the script's text, then an export
/// of the declared global's current value. The module registry cache gives
/// the execute-once guarantee.
pub fn wrapper_source(descriptor: &ShimDescriptor, script: &str) -> String {
    format!(
        "{}\n;module.exports = (typeof window !== \"undefined\" ? window : this)[{}];\n",
        script,
        emit::js_string(&descriptor.exposed_global)
    )
}
