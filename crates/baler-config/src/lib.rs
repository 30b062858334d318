//! Configuration primitives for the baler toolchain.
//!
//! This crate parses the TOML-based `baler.toml` at the project root so the
//! CLI and bundler share a single schema: source globs, the artifact
//! destination, alias entries, alias mapping rules, global-variable shims,
//! lint options, and watch options.
//!
//! All paths and patterns in the file are relative to the project root.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, ConfigError>;

/// Project configuration loaded from `baler.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BalerConfig {
    /// Bundle inputs and output.
    pub bundle: BundleConfig,

    /// Lint gate options.
    pub lint: LintConfig,

    /// Watch trigger options.
    pub watch: WatchConfig,
}

/// Bundle inputs and output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Glob patterns selecting the source module set.
    pub sources: Vec<String>,

    /// Directory that default require names are derived relative to.
    pub source_root: PathBuf,

    /// Destination path for the emitted artifact.
    pub dest: PathBuf,

    /// Explicit alias entries, in declaration order.
    #[serde(rename = "alias")]
    pub aliases: Vec<AliasEntryConfig>,

    /// Directory-tree alias mapping rules, in declaration order.
    #[serde(rename = "alias_mapping")]
    pub alias_mappings: Vec<AliasMappingConfig>,

    /// Global-variable shims.
    #[serde(rename = "shim")]
    pub shims: Vec<ShimConfig>,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            source_root: PathBuf::from("."),
            dest: PathBuf::from("bundle.js"),
            aliases: Vec::new(),
            alias_mappings: Vec::new(),
            shims: Vec::new(),
        }
    }
}

/// One explicit alias: a require name bound to a concrete file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasEntryConfig {
    /// The require name other modules use.
    pub name: String,
    /// The file the name resolves to.
    pub path: PathBuf,
}

/// One alias mapping rule: every file under `base_dir` matching `pattern`
/// becomes requirable as `prefix` plus its relative path without extension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AliasMappingConfig {
    /// Directory the rule's relative names are computed against.
    pub base_dir: PathBuf,
    /// Glob pattern, relative to `base_dir`.
    pub pattern: String,
    /// Require-name prefix for matched files.
    pub prefix: String,
}

/// One shim: a plain script that assigns to a global rather than exporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShimConfig {
    /// The require name other modules use.
    pub name: String,
    /// The script file to execute.
    pub path: PathBuf,
    /// The global the script leaves its value on.
    pub exports: String,
}

/// Lint gate options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Enabled rule names.
    pub rules: Vec<String>,

    /// Extra files to lint beyond the discovered module set.
    pub extra_files: Vec<PathBuf>,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                "strict".to_string(),
                "eqeqeq".to_string(),
                "no-debugger".to_string(),
            ],
            extra_files: Vec::new(),
        }
    }
}

/// Watch trigger options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Milliseconds to keep draining change events before rebuilding.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 100 }
    }
}

impl BalerConfig {
    /// Load configuration from the given file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<BalerConfig>(&contents).map_err(ConfigError::Parse)
    }
}

/// Errors produced while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The configuration file path.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for the schema.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
