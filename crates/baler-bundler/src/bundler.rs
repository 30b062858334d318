//! The bundle compiler facade.
//!
//! Ties the pipeline together for one project: discover the module set,
//! build the alias table and shim set, resolve the require graph, render,
//! and write the artifact. Each call re-evaluates everything from the
//! filesystem, so watch cycles always see the current file set.

use std::path::{Path, PathBuf};

use baler_config::BalerConfig;
use baler_core::{log_info, BuildResult};

use crate::alias::AliasTable;
use crate::emit::{self, EmitOptions};
use crate::graph;
use crate::lint::Linter;
use crate::shim::ShimSet;
use crate::sources::{self, ModuleDescriptor};

/// Compiles one project's bundle.
#[derive(Debug)]
pub struct Bundler {
    root: PathBuf,
    config: BalerConfig,
}

/// Summary of one successful compile.
#[derive(Debug, Clone)]
pub struct BundleReport {
    /// Where the artifact was written.
    pub dest: PathBuf,
    /// Number of modules in the artifact.
    pub module_count: usize,
    /// Artifact size in bytes.
    pub bytes: usize,
}

impl Bundler {
    /// Create a bundler for the project at `root`.
    pub fn new(root: impl Into<PathBuf>, config: BalerConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// The project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The project configuration.
    pub fn config(&self) -> &BalerConfig {
        &self.config
    }

    /// Absolute artifact destination.
    pub fn dest(&self) -> PathBuf {
        self.root.join(&self.config.bundle.dest)
    }

    /// Override the artifact destination.
    pub fn set_dest(&mut self, dest: PathBuf) {
        self.config.bundle.dest = dest;
    }

    /// Expand the source globs into the current module set.
    pub fn discover(&self) -> BuildResult<Vec<ModuleDescriptor>> {
        sources::discover(
            &self.root,
            &self.config.bundle.source_root,
            &self.config.bundle.sources,
        )
    }

    /// Compile the bundle and write the artifact. On any failure the
    /// previous artifact is left untouched.
    pub fn compile(&self, options: &EmitOptions) -> BuildResult<BundleReport> {
        let modules = self.discover()?;
        let aliases = AliasTable::build(
            &self.root,
            &self.config.bundle.aliases,
            &self.config.bundle.alias_mappings,
        )?;
        let shims = ShimSet::build(&self.root, &self.config.bundle.shims)?;
        let graph = graph::resolve(&modules, &aliases, &shims)?;
        let artifact = emit::render(&graph, options);
        let dest = self.dest();
        emit::write_artifact(&dest, &artifact)?;
        log_info!(
            "compile",
            "wrote {} ({} modules, {} bytes)",
            dest.display(),
            graph.modules.len(),
            artifact.len()
        );
        Ok(BundleReport {
            dest,
            module_count: graph.modules.len(),
            bytes: artifact.len(),
        })
    }

    /// Run the lint gate over the module set plus any configured extras.
    pub fn lint(&self) -> BuildResult<()> {
        let linter = Linter::from_config(&self.config.lint)?;
        let mut files: Vec<PathBuf> = self.discover()?.into_iter().map(|m| m.path).collect();
        for extra in &self.config.lint.extra_files {
            files.push(self.root.join(extra));
        }
        linter.check_files(files.iter().map(PathBuf::as_path))
    }

    /// Paths the watch trigger subscribes to: the source root plus every
    /// declared alias, mapping, and shim input.
    pub fn watch_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.root.join(&self.config.bundle.source_root)];
        for alias in &self.config.bundle.aliases {
            paths.push(self.root.join(&alias.path));
        }
        for rule in &self.config.bundle.alias_mappings {
            paths.push(self.root.join(&rule.base_dir));
        }
        for shim in &self.config.bundle.shims {
            paths.push(self.root.join(&shim.path));
        }
        paths.sort();
        paths.dedup();
        paths
    }
}
