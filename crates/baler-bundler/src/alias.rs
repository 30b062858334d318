//! Alias table construction and lookup.
//!
//! The table is built once per task invocation from the declared alias
//! entries followed by the expanded alias mapping rules. Registration is
//! first-wins: a second registration of the same name is an ambiguous alias
//! and fails the build.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use baler_config::{AliasEntryConfig, AliasMappingConfig};
use baler_core::{BuildError, BuildResult};

use crate::sources;

/// Name-to-file overrides consulted before the discovered module set.
#[derive(Debug, Default)]
pub struct AliasTable {
    entries: BTreeMap<String, PathBuf>,
}

impl AliasTable {
    /// Build the table from explicit entries and mapping rules, both rooted
    /// at the project root.
    pub fn build(
        root: &Path,
        aliases: &[AliasEntryConfig],
        mappings: &[AliasMappingConfig],
    ) -> BuildResult<Self> {
        let mut table = Self::default();
        for alias in aliases {
            let path = root.join(&alias.path);
            if !path.is_file() {
                return Err(BuildError::config(
                    &alias.name,
                    format!("alias target does not exist: {}", path.display()),
                ));
            }
            table.register(&alias.name, path)?;
        }
        for rule in mappings {
            let base = root.join(&rule.base_dir);
            let files = sources::expand_patterns(&base, std::slice::from_ref(&rule.pattern))?;
            for file in files {
                let relative = sources::require_name(&base, &file).ok_or_else(|| {
                    BuildError::config(
                        file.display().to_string(),
                        "mapped file is outside the rule's base_dir",
                    )
                })?;
                let name = if rule.prefix.is_empty() {
                    relative
                } else {
                    format!("{}/{}", rule.prefix, relative)
                };
                table.register(&name, file)?;
            }
        }
        Ok(table)
    }

    fn register(&mut self, name: &str, path: PathBuf) -> BuildResult<()> {
        if self.entries.contains_key(name) {
            return Err(BuildError::config(
                name,
                "ambiguous alias: name already registered",
            ));
        }
        self.entries.insert(name.to_string(), path);
        Ok(())
    }

    /// Look up the file an aliased name resolves to.
    pub fn resolve(&self, name: &str) -> Option<&Path> {
        self.entries.get(name).map(PathBuf::as_path)
    }

    /// All registered names and targets, in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_path()))
    }

    /// All target files, in name order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.values().map(PathBuf::as_path)
    }

    /// Number of registered aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
