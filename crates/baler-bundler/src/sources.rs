//! Module set resolution.
//!
//! Expands the configured glob patterns into an ordered, deduplicated list
//! of source files and derives each module's default require name from its
//! path relative to the source root. Evaluated fresh on every invocation:
//! the file set itself may change between watch cycles.

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use baler_core::{BuildError, BuildResult};

/// One source file and the logical name other modules use to import it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    /// Absolute path of the source file.
    pub path: PathBuf,
    /// Unique require name, derived from the path relative to the source root.
    pub require_name: String,
}

/// Expand glob patterns rooted at `root` into an ordered, deduplicated list
/// of files. Zero matches is legal; a malformed pattern is a configuration
/// error.
pub fn expand_patterns(root: &Path, patterns: &[String]) -> BuildResult<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut files = Vec::new();
    for pattern in patterns {
        check_rooted(pattern)?;
        let full = root.join(pattern);
        let walker = glob::glob(&full.to_string_lossy()).map_err(|e| {
            BuildError::config(pattern.clone(), format!("malformed pattern: {}", e))
        })?;
        for entry in walker {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                BuildError::io(path, e.into_error())
            })?;
            if path.is_file() && seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }
    Ok(files)
}

/// Expand the source patterns and derive require names. Fails on a require
/// name collision or on a file outside `source_root`.
pub fn discover(
    root: &Path,
    source_root: &Path,
    patterns: &[String],
) -> BuildResult<Vec<ModuleDescriptor>> {
    let files = expand_patterns(root, patterns)?;
    let source_root = root.join(source_root);
    let mut names = HashSet::new();
    let mut modules = Vec::with_capacity(files.len());
    for path in files {
        let require_name = require_name(&source_root, &path).ok_or_else(|| {
            BuildError::config(
                path.display().to_string(),
                "module is outside the configured source_root",
            )
        })?;
        if !names.insert(require_name.clone()) {
            return Err(BuildError::config(
                require_name,
                "duplicate module require name",
            ));
        }
        modules.push(ModuleDescriptor { path, require_name });
    }
    Ok(modules)
}

/// Require name for `path` relative to `base`: the relative path with the
/// extension stripped and `/` separators. `None` if `path` is not under
/// `base` or is not valid UTF-8.
pub fn require_name(base: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?.with_extension("");
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?.to_string()),
            _ => return None,
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

fn check_rooted(pattern: &str) -> BuildResult<()> {
    let as_path = Path::new(pattern);
    if as_path.is_absolute()
        || as_path
            .components()
            .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(BuildError::config(
            pattern,
            "patterns must stay under the project source tree",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("js/src/forms")).unwrap();
        fs::write(dir.path().join("js/src/review_form.js"), "").unwrap();
        fs::write(dir.path().join("js/src/forms/search.js"), "").unwrap();
        fs::write(dir.path().join("js/src/notes.txt"), "").unwrap();
        dir
    }

    #[test]
    fn test_expand_matches_only_files() {
        let dir = project();
        let files =
            expand_patterns(dir.path(), &["js/src/**/*.js".to_string()]).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.extension().unwrap() == "js"));
    }

    #[test]
    fn test_expand_deduplicates_across_patterns() {
        let dir = project();
        let files = expand_patterns(
            dir.path(),
            &[
                "js/src/**/*.js".to_string(),
                "js/src/review_form.js".to_string(),
            ],
        )
        .unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_zero_matches_is_legal() {
        let dir = project();
        let files = expand_patterns(dir.path(), &["js/vendor/**/*.js".to_string()]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_malformed_pattern_is_config_error() {
        let dir = project();
        let err = expand_patterns(dir.path(), &["js/[".to_string()]).unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
    }

    #[test]
    fn test_escaping_pattern_is_config_error() {
        let dir = project();
        let err = expand_patterns(dir.path(), &["../**/*.js".to_string()]).unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
    }

    #[test]
    fn test_discover_derives_require_names() {
        let dir = project();
        let modules = discover(
            dir.path(),
            Path::new("js/src"),
            &["js/src/**/*.js".to_string()],
        )
        .unwrap();
        let names: Vec<&str> = modules.iter().map(|m| m.require_name.as_str()).collect();
        assert!(names.contains(&"review_form"));
        assert!(names.contains(&"forms/search"));
    }

    #[test]
    fn test_require_name_strips_extension() {
        let name = require_name(Path::new("/p/js/src"), Path::new("/p/js/src/a/b.js"));
        assert_eq!(name.as_deref(), Some("a/b"));
    }

    #[test]
    fn test_require_name_outside_base() {
        assert!(require_name(Path::new("/p/js/src"), Path::new("/p/js/lib/x.js")).is_none());
    }
}
