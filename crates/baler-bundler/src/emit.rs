//! Artifact emission.
//!
//! Renders a small runtime loader plus the module registry and writes the
//! destination file atomically (temp file in the destination directory,
//! then rename). Identical inputs produce byte-identical artifacts: the
//! registry and entry list are emitted in name order and nothing
//! environment-dependent is embedded.

use std::fs;
use std::io::Write;
use std::path::Path;

use baler_core::{BuildError, BuildResult};

use crate::graph::BundleGraph;

/// Options affecting artifact content but not correctness.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmitOptions {
    /// Embed per-module source-position metadata for browser devtools.
    pub debug: bool,
}

/// The require/module-registry loader that heads every artifact. Module
/// exports are cached by name, so each module body runs at most once.
const PRELUDE: &str = r#"(function (modules, entries) {
    "use strict";
    var cache = {};
    function load(name) {
        if (Object.prototype.hasOwnProperty.call(cache, name)) {
            return cache[name].exports;
        }
        var module = { exports: {} };
        cache[name] = module;
        modules[name].call(module.exports, load, module, module.exports);
        return module.exports;
    }
    for (var i = 0; i < entries.length; i += 1) {
        load(entries[i]);
    }
})({
"#;

/// Render the full artifact text.
pub fn render(graph: &BundleGraph, options: &EmitOptions) -> String {
    let mut out = String::with_capacity(PRELUDE.len() + 256 * graph.modules.len());
    out.push_str(PRELUDE);

    let mut first = true;
    for (name, module) in &graph.modules {
        if !first {
            out.push_str(",\n");
        }
        first = false;
        out.push_str(&js_string(name));
        out.push_str(": function (require, module, exports) {\n");
        if options.debug {
            out.push_str("//# sourceURL=");
            out.push_str(&module.path.display().to_string());
            out.push('\n');
        }
        out.push_str(&module.body);
        if !module.body.ends_with('\n') {
            out.push('\n');
        }
        out.push('}');
    }

    out.push_str("\n}, [");
    for (index, entry) in graph.entries.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&js_string(entry));
    }
    out.push_str("]);\n");
    out
}

/// Write the artifact atomically: the destination either keeps its previous
/// content or holds the complete new bundle, never a partial write.
pub fn write_artifact(dest: &Path, contents: &str) -> BuildResult<()> {
    let parent = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| BuildError::io(parent, e))?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(|e| BuildError::io(parent, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| BuildError::io(dest, e))?;
    tmp.persist(dest).map_err(|e| BuildError::io(dest, e.error))?;
    Ok(())
}

/// Escape a name as a JS double-quoted string literal.
pub(crate) fn js_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BundleModule, ModuleKind};
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn graph(modules: &[(&str, &str)]) -> BundleGraph {
        let mut map = BTreeMap::new();
        let mut entries = Vec::new();
        for (name, body) in modules {
            entries.push(name.to_string());
            map.insert(
                name.to_string(),
                BundleModule {
                    name: name.to_string(),
                    path: PathBuf::from(format!("js/src/{}.js", name)),
                    kind: ModuleKind::Source,
                    body: body.to_string(),
                    requires: Vec::new(),
                },
            );
        }
        entries.sort();
        BundleGraph {
            modules: map,
            entries,
        }
    }

    #[test]
    fn test_render_contains_loader_and_modules() {
        let artifact = render(
            &graph(&[("a", "var x = 1;"), ("b", "var y = 2;")]),
            &EmitOptions::default(),
        );
        assert!(artifact.starts_with("(function (modules, entries)"));
        assert!(artifact.contains("\"a\": function (require, module, exports)"));
        assert!(artifact.contains("var y = 2;"));
        assert!(artifact.ends_with("[\"a\", \"b\"]);\n"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let g = graph(&[("b", "var y = 2;"), ("a", "var x = 1;")]);
        assert_eq!(
            render(&g, &EmitOptions::default()),
            render(&g, &EmitOptions::default())
        );
    }

    #[test]
    fn test_registry_sorted_by_name() {
        let artifact = render(
            &graph(&[("zulu", ""), ("alpha", "")]),
            &EmitOptions::default(),
        );
        let alpha = artifact.find("\"alpha\": function").unwrap();
        let zulu = artifact.find("\"zulu\": function").unwrap();
        assert!(alpha < zulu);
    }

    #[test]
    fn test_debug_embeds_source_url() {
        let g = graph(&[("a", "var x = 1;")]);
        let plain = render(&g, &EmitOptions { debug: false });
        let debug = render(&g, &EmitOptions { debug: true });
        assert!(!plain.contains("sourceURL"));
        assert!(debug.contains("//# sourceURL=js/src/a.js"));
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("plain/name"), "\"plain/name\"");
        assert_eq!(js_string("a\"b\\c"), "\"a\\\"b\\\\c\"");
    }

    #[test]
    fn test_write_artifact_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("static/js/bundle.js");
        write_artifact(&dest, "content").unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "content");
    }

    #[test]
    fn test_write_artifact_overwrites_in_full() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("bundle.js");
        write_artifact(&dest, "first version, quite long").unwrap();
        write_artifact(&dest, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "second");
    }
}
