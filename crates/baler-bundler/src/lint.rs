//! The lint gate.
//!
//! Style checks run over the module set before compilation. Any violation
//! fails the task before the compiler runs, leaving the previous artifact
//! in place. Rule names are configured in `[lint]`; an unknown name is a
//! configuration error.

use std::path::Path;

use baler_config::LintConfig;
use baler_core::{BuildError, BuildResult, LintViolation};

use crate::scan;

/// A style rule the gate can enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintRule {
    /// Files must open with a "use strict" directive.
    Strict,
    /// `==` and `!=` are forbidden outside strings and comments.
    Eqeqeq,
    /// `debugger` statements are forbidden.
    NoDebugger,
    /// Lines must not end with spaces or tabs.
    TrailingSpace,
}

impl LintRule {
    /// Parse a configured rule name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "strict" => Some(Self::Strict),
            "eqeqeq" => Some(Self::Eqeqeq),
            "no-debugger" => Some(Self::NoDebugger),
            "trailing-space" => Some(Self::TrailingSpace),
            _ => None,
        }
    }

    /// The configured name of this rule.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Eqeqeq => "eqeqeq",
            Self::NoDebugger => "no-debugger",
            Self::TrailingSpace => "trailing-space",
        }
    }
}

/// Runs the configured rules over a set of files.
#[derive(Debug)]
pub struct Linter {
    rules: Vec<LintRule>,
}

impl Linter {
    /// Build a linter from configuration. Unknown rule names fail.
    pub fn from_config(config: &LintConfig) -> BuildResult<Self> {
        let mut rules = Vec::new();
        for name in &config.rules {
            let rule = LintRule::parse(name)
                .ok_or_else(|| BuildError::config(name.clone(), "unknown lint rule"))?;
            if !rules.contains(&rule) {
                rules.push(rule);
            }
        }
        Ok(Self { rules })
    }

    /// Check every file, collecting all violations before failing.
    pub fn check_files<'a>(
        &self,
        files: impl IntoIterator<Item = &'a Path>,
    ) -> BuildResult<()> {
        let mut violations = Vec::new();
        for file in files {
            let source =
                std::fs::read_to_string(file).map_err(|e| BuildError::io(file, e))?;
            self.check_source(file, &source, &mut violations);
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(BuildError::Lint { violations })
        }
    }

    /// Run every enabled rule over one source text.
    pub fn check_source(&self, file: &Path, source: &str, out: &mut Vec<LintViolation>) {
        for rule in &self.rules {
            match rule {
                LintRule::Strict => check_strict(file, source, out),
                LintRule::Eqeqeq => check_eqeqeq(file, source, out),
                LintRule::NoDebugger => check_no_debugger(file, source, out),
                LintRule::TrailingSpace => check_trailing_space(file, source, out),
            }
        }
    }
}

/// Byte offset of the first statement, past leading whitespace and comments.
fn first_statement_offset(source: &str) -> usize {
    let bytes = source.as_bytes();
    let mut i = 0;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i + 1 < bytes.len() && bytes[i] == b'/' && bytes[i + 1] == b'/' {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
        } else if i + 1 < bytes.len() && bytes[i] == b'/' && bytes[i + 1] == b'*' {
            i += 2;
            while i + 1 < bytes.len() && !(bytes[i] == b'*' && bytes[i + 1] == b'/') {
                i += 1;
            }
            i = (i + 2).min(bytes.len());
        } else {
            return i;
        }
    }
}

fn check_strict(file: &Path, source: &str, out: &mut Vec<LintViolation>) {
    let offset = first_statement_offset(source);
    let rest = &source[offset..];
    if rest.is_empty() {
        return;
    }
    if !(rest.starts_with("\"use strict\"") || rest.starts_with("'use strict'")) {
        let (line, column) = scan::line_col(source, offset);
        out.push(LintViolation {
            file: file.to_path_buf(),
            line,
            column,
            rule: LintRule::Strict.name(),
            message: "missing \"use strict\" directive".to_string(),
        });
    }
}

fn check_eqeqeq(file: &Path, source: &str, out: &mut Vec<LintViolation>) {
    let bytes = source.as_bytes();
    let mask = scan::code_mask(source);
    let mut i = 0;
    while i < bytes.len() {
        if !mask[i] {
            i += 1;
            continue;
        }
        let byte = bytes[i];
        if (byte == b'=' || byte == b'!') && bytes.get(i + 1) == Some(&b'=') {
            if bytes.get(i + 2) == Some(&b'=') {
                i += 3;
                continue;
            }
            // Tail of another operator (===, !==, <=, >=).
            if i > 0 && matches!(bytes[i - 1], b'=' | b'!' | b'<' | b'>') {
                i += 2;
                continue;
            }
            let (line, column) = scan::line_col(source, i);
            let (found, wanted) = if byte == b'=' {
                ("==", "===")
            } else {
                ("!=", "!==")
            };
            out.push(LintViolation {
                file: file.to_path_buf(),
                line,
                column,
                rule: LintRule::Eqeqeq.name(),
                message: format!("use '{}' instead of '{}'", wanted, found),
            });
            i += 2;
            continue;
        }
        i += 1;
    }
}

fn check_no_debugger(file: &Path, source: &str, out: &mut Vec<LintViolation>) {
    const KEYWORD: &[u8] = b"debugger";
    let bytes = source.as_bytes();
    let mask = scan::code_mask(source);
    let mut i = 0;
    while i + KEYWORD.len() <= bytes.len() {
        if !mask[i] || &bytes[i..i + KEYWORD.len()] != KEYWORD {
            i += 1;
            continue;
        }
        let before_ok = i == 0 || !is_word_byte(bytes[i - 1]);
        let after = i + KEYWORD.len();
        let after_ok = after >= bytes.len() || !is_word_byte(bytes[after]);
        if before_ok && after_ok {
            let (line, column) = scan::line_col(source, i);
            out.push(LintViolation {
                file: file.to_path_buf(),
                line,
                column,
                rule: LintRule::NoDebugger.name(),
                message: "unexpected 'debugger' statement".to_string(),
            });
        }
        i = after;
    }
}

fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'$' || byte == b'.'
}

fn check_trailing_space(file: &Path, source: &str, out: &mut Vec<LintViolation>) {
    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim_end_matches('\r');
        if trimmed.ends_with(' ') || trimmed.ends_with('\t') {
            out.push(LintViolation {
                file: file.to_path_buf(),
                line: index + 1,
                column: trimmed.trim_end().chars().count() + 1,
                rule: LintRule::TrailingSpace.name(),
                message: "trailing whitespace".to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn linter(rules: &[&str]) -> Linter {
        let config = LintConfig {
            rules: rules.iter().map(|r| r.to_string()).collect(),
            extra_files: Vec::new(),
        };
        Linter::from_config(&config).unwrap()
    }

    fn violations(linter: &Linter, source: &str) -> Vec<LintViolation> {
        let mut out = Vec::new();
        linter.check_source(&PathBuf::from("test.js"), source, &mut out);
        out
    }

    #[test]
    fn test_unknown_rule_is_config_error() {
        let config = LintConfig {
            rules: vec!["no-such-rule".to_string()],
            extra_files: Vec::new(),
        };
        let err = Linter::from_config(&config).unwrap_err();
        assert!(matches!(err, BuildError::Config { .. }));
    }

    #[test]
    fn test_strict_passes_with_directive() {
        let found = violations(
            &linter(&["strict"]),
            "// header comment\n\"use strict\";\nvar a = 1;\n",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_strict_flags_missing_directive() {
        let found = violations(&linter(&["strict"]), "var a = 1;\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].rule, "strict");
        assert_eq!(found[0].line, 1);
    }

    #[test]
    fn test_strict_ignores_empty_file() {
        assert!(violations(&linter(&["strict"]), "\n\n").is_empty());
    }

    #[test]
    fn test_eqeqeq_flags_loose_equality() {
        let found = violations(&linter(&["eqeqeq"]), "if (a == b || c != d) {}\n");
        assert_eq!(found.len(), 2);
        assert!(found[0].message.contains("'==='"));
        assert!(found[1].message.contains("'!=='"));
    }

    #[test]
    fn test_eqeqeq_allows_strict_equality() {
        let found = violations(&linter(&["eqeqeq"]), "if (a === b && c !== d && e <= f) {}\n");
        assert!(found.is_empty());
    }

    #[test]
    fn test_eqeqeq_ignores_strings_and_comments() {
        let found = violations(
            &linter(&["eqeqeq"]),
            "var s = 'a == b'; // x == y\n",
        );
        assert!(found.is_empty());
    }

    #[test]
    fn test_no_debugger() {
        let found = violations(&linter(&["no-debugger"]), "debugger;\nvar debuggers = 1;\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 1);
    }

    #[test]
    fn test_trailing_space() {
        let found = violations(&linter(&["trailing-space"]), "var a = 1; \nvar b = 2;\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].line, 1);
    }

    #[test]
    fn test_check_files_collects_across_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.js"), "var a = 1;\n").unwrap();
        std::fs::write(dir.path().join("b.js"), "var b = 2;\n").unwrap();
        let files = [dir.path().join("a.js"), dir.path().join("b.js")];

        let err = linter(&["strict"])
            .check_files(files.iter().map(|p| p.as_path()))
            .unwrap_err();
        assert_eq!(err.lint_violations().unwrap().len(), 2);
    }
}
