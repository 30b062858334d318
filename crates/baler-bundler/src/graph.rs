//! Static dependency resolution.
//!
//! Builds the full name-to-file table up front, then walks requires from
//! the entry set. Every reference must resolve to exactly one alias entry,
//! shim, or discovered module, in that precedence order. A miss fails the
//! whole build with the missing name and its requester; nothing is written.

use std::collections::{BTreeMap, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use baler_core::{log_trace, BuildError, BuildResult};

use crate::alias::AliasTable;
use crate::scan;
use crate::shim::{self, ShimSet};
use crate::sources::ModuleDescriptor;

/// How a bundled module entered the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleKind {
    /// A discovered source module.
    Source,
    /// An alias table entry.
    Alias,
    /// A shim-wrapped plain script.
    Shim {
        /// The global the wrapper exports.
        exposed_global: String,
    },
}

/// One module of the bundle, ready for emission.
#[derive(Debug, Clone)]
pub struct BundleModule {
    /// Require name, unique across the bundle.
    pub name: String,
    /// File the body came from.
    pub path: PathBuf,
    /// How the module entered the graph.
    pub kind: ModuleKind,
    /// Registry-ready body; shims are already wrapped.
    pub body: String,
    /// Names this module requires.
    pub requires: Vec<String>,
}

/// All reachable modules plus the entry list, both in name order.
#[derive(Debug, Clone)]
pub struct BundleGraph {
    /// Reachable modules keyed by require name.
    pub modules: BTreeMap<String, BundleModule>,
    /// Entry names, sorted. Every discovered module is an entry.
    pub entries: Vec<String>,
}

/// Resolve the require graph over the module set, alias table, and shims.
pub fn resolve(
    modules: &[ModuleDescriptor],
    aliases: &AliasTable,
    shims: &ShimSet,
) -> BuildResult<BundleGraph> {
    let module_paths: BTreeMap<&str, &Path> = modules
        .iter()
        .map(|m| (m.require_name.as_str(), m.path.as_path()))
        .collect();
    let names_by_path: BTreeMap<&Path, &str> = modules
        .iter()
        .map(|m| (m.path.as_path(), m.require_name.as_str()))
        .collect();

    let mut entries: Vec<String> = modules.iter().map(|m| m.require_name.clone()).collect();
    entries.sort();

    let mut resolved: BTreeMap<String, BundleModule> = BTreeMap::new();
    let mut queue: VecDeque<(String, Option<String>)> =
        entries.iter().map(|name| (name.clone(), None)).collect();

    while let Some((name, requester)) = queue.pop_front() {
        if resolved.contains_key(&name) {
            continue;
        }
        let module = load_module(
            &name,
            requester.as_deref(),
            &module_paths,
            &names_by_path,
            aliases,
            shims,
        )?;
        for dep in &module.requires {
            if !resolved.contains_key(dep) {
                queue.push_back((dep.clone(), Some(name.clone())));
            }
        }
        log_trace!(
            "graph",
            "resolved '{}' ({} require(s))",
            name,
            module.requires.len()
        );
        resolved.insert(name, module);
    }

    Ok(BundleGraph {
        modules: resolved,
        entries,
    })
}

fn load_module(
    name: &str,
    requester: Option<&str>,
    module_paths: &BTreeMap<&str, &Path>,
    names_by_path: &BTreeMap<&Path, &str>,
    aliases: &AliasTable,
    shims: &ShimSet,
) -> BuildResult<BundleModule> {
    if let Some(path) = aliases.resolve(name) {
        // An alias onto a discovered module delegates to it instead of
        // bundling the body a second time under the alias name.
        if let Some(target) = names_by_path.get(path) {
            if *target != name {
                return Ok(BundleModule {
                    name: name.to_string(),
                    path: path.to_path_buf(),
                    kind: ModuleKind::Alias,
                    body: format!("module.exports = require({});\n", crate::emit::js_string(target)),
                    requires: vec![target.to_string()],
                });
            }
        }
        let body = read(path)?;
        let requires = scan::scan_requires(&body);
        return Ok(BundleModule {
            name: name.to_string(),
            path: path.to_path_buf(),
            kind: ModuleKind::Alias,
            body,
            requires,
        });
    }

    if let Some(descriptor) = shims.get(name) {
        let script = read(&descriptor.path)?;
        return Ok(BundleModule {
            name: name.to_string(),
            path: descriptor.path.clone(),
            kind: ModuleKind::Shim {
                exposed_global: descriptor.exposed_global.clone(),
            },
            body: shim::wrapper_source(descriptor, &script),
            // Plain scripts are not modules; their text is never scanned.
            requires: Vec::new(),
        });
    }

    if let Some(path) = module_paths.get(name) {
        let body = read(path)?;
        let requires = scan::scan_requires(&body);
        return Ok(BundleModule {
            name: name.to_string(),
            path: path.to_path_buf(),
            kind: ModuleKind::Source,
            body,
            requires,
        });
    }

    Err(BuildError::Resolution {
        name: name.to_string(),
        requester: requester.unwrap_or("<entry>").to_string(),
    })
}

fn read(path: &Path) -> BuildResult<String> {
    fs::read_to_string(path).map_err(|e| BuildError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use baler_config::{AliasEntryConfig, ShimConfig};
    use std::fs;

    struct Fixture {
        dir: tempfile::TempDir,
        modules: Vec<ModuleDescriptor>,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            fs::create_dir_all(dir.path().join("js/src")).unwrap();
            fs::create_dir_all(dir.path().join("js/lib")).unwrap();
            Self {
                dir,
                modules: Vec::new(),
            }
        }

        fn module(&mut self, name: &str, body: &str) -> &mut Self {
            let path = self.dir.path().join("js/src").join(format!("{}.js", name));
            fs::write(&path, body).unwrap();
            self.modules.push(ModuleDescriptor {
                path,
                require_name: name.to_string(),
            });
            self
        }

        fn lib(&self, file: &str, body: &str) -> PathBuf {
            let path = self.dir.path().join("js/lib").join(file);
            fs::write(&path, body).unwrap();
            path
        }
    }

    fn alias_table(fixture: &Fixture, entries: &[(&str, &str)]) -> AliasTable {
        let configs: Vec<AliasEntryConfig> = entries
            .iter()
            .map(|(name, path)| AliasEntryConfig {
                name: name.to_string(),
                path: PathBuf::from(path),
            })
            .collect();
        AliasTable::build(fixture.dir.path(), &configs, &[]).unwrap()
    }

    #[test]
    fn test_resolves_alias_reference() {
        let mut fixture = Fixture::new();
        fixture.lib("jquery.js", "module.exports = {};");
        fixture.module("review_form", "var $ = require('jquery');");
        let aliases = alias_table(&fixture, &[("jquery", "js/lib/jquery.js")]);

        let graph = resolve(&fixture.modules, &aliases, &ShimSet::default()).unwrap();
        assert_eq!(graph.entries, vec!["review_form"]);
        assert_eq!(graph.modules.len(), 2);
        assert_eq!(graph.modules["jquery"].kind, ModuleKind::Alias);
    }

    #[test]
    fn test_alias_takes_precedence_over_module() {
        let mut fixture = Fixture::new();
        let lib = fixture.lib("jquery.js", "// the real one");
        fixture.module("jquery", "// a module that shadows the alias name");
        fixture.module("main", "require('jquery');");
        let aliases = alias_table(&fixture, &[("jquery", "js/lib/jquery.js")]);

        let graph = resolve(&fixture.modules, &aliases, &ShimSet::default()).unwrap();
        assert_eq!(graph.modules["jquery"].path, lib);
        assert_eq!(graph.modules["jquery"].kind, ModuleKind::Alias);
    }

    #[test]
    fn test_unresolved_reference_names_requester() {
        let mut fixture = Fixture::new();
        fixture.module("review_form", "var _ = require('underscore');");

        let err = resolve(&fixture.modules, &AliasTable::default(), &ShimSet::default())
            .unwrap_err();
        match err {
            BuildError::Resolution { name, requester } => {
                assert_eq!(name, "underscore");
                assert_eq!(requester, "review_form");
            }
            other => panic!("expected resolution error, got {:?}", other),
        }
    }

    #[test]
    fn test_shim_is_wrapped_and_not_scanned() {
        let mut fixture = Fixture::new();
        let script = fixture
            .dir
            .path()
            .join("js/lib")
            .join("googlemap.js");
        fs::write(&script, "window.google = {}; // require('nothing')").unwrap();
        fixture.module("map", "var google = require('google');");
        let shims = ShimSet::build(
            fixture.dir.path(),
            &[ShimConfig {
                name: "google".to_string(),
                path: PathBuf::from("js/lib/googlemap.js"),
                exports: "google".to_string(),
            }],
        )
        .unwrap();

        let graph = resolve(&fixture.modules, &AliasTable::default(), &shims).unwrap();
        let shim_module = &graph.modules["google"];
        assert!(matches!(shim_module.kind, ModuleKind::Shim { .. }));
        assert!(shim_module.requires.is_empty());
        assert!(shim_module.body.contains("module.exports"));
    }

    #[test]
    fn test_alias_onto_discovered_module_delegates() {
        let mut fixture = Fixture::new();
        fixture.module("review_form", "var form = true;");
        fixture.module("main", "require('vegancity/review_form');");
        let aliases = alias_table(
            &fixture,
            &[("vegancity/review_form", "js/src/review_form.js")],
        );

        let graph = resolve(&fixture.modules, &aliases, &ShimSet::default()).unwrap();
        let delegate = &graph.modules["vegancity/review_form"];
        assert_eq!(delegate.body, "module.exports = require(\"review_form\");\n");
        assert_eq!(delegate.requires, vec!["review_form"]);
        // The underlying body appears once, under the module's own name.
        assert!(graph.modules["review_form"].body.contains("var form = true;"));
    }

    #[test]
    fn test_transitive_requires_reach_fixpoint() {
        let mut fixture = Fixture::new();
        fixture.module("a", "require('b');");
        fixture.module("b", "require('c');");
        fixture.module("c", "var done = true;");

        let graph = resolve(&fixture.modules, &AliasTable::default(), &ShimSet::default())
            .unwrap();
        assert_eq!(graph.modules.len(), 3);
    }

    #[test]
    fn test_cyclic_requires_terminate() {
        let mut fixture = Fixture::new();
        fixture.module("a", "require('b');");
        fixture.module("b", "require('a');");

        let graph = resolve(&fixture.modules, &AliasTable::default(), &ShimSet::default())
            .unwrap();
        assert_eq!(graph.modules.len(), 2);
    }
}
