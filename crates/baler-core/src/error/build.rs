//! Build errors.
//!
//! Every failure in the bundling pipeline falls into one of four classes:
//! invalid configuration, lint violations, an unresolvable require
//! reference, or an I/O failure. All of them abort the current task
//! invocation and leave any previously written artifact untouched.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Result type for build operations.
pub type BuildResult<T> = std::result::Result<T, BuildError>;

/// One style-check violation reported by the lint gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintViolation {
    /// File the violation was found in.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// Name of the rule that fired.
    pub rule: &'static str,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for LintViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: [{}] {}",
            self.file.display(),
            self.line,
            self.column,
            self.rule,
            self.message
        )
    }
}

/// Errors that abort a build task invocation.
#[derive(Debug, ThisError)]
pub enum BuildError {
    /// Invalid or ambiguous setup: duplicate alias name, malformed glob
    /// pattern, missing shim target, unknown lint rule.
    #[error("configuration error for '{identifier}': {message}")]
    Config {
        /// The offending identifier (alias name, pattern, path).
        identifier: String,
        /// What is wrong with it.
        message: String,
    },

    /// Style-check violations found before compilation.
    #[error("{} lint violation(s)", violations.len())]
    Lint {
        /// All violations found across the module set.
        violations: Vec<LintViolation>,
    },

    /// A require reference did not match any module, alias, or shim.
    #[error("cannot resolve '{name}' required by '{requester}'")]
    Resolution {
        /// The missing require name.
        name: String,
        /// The module that asked for it.
        requester: String,
    },

    /// Output path unwritable, or a source file disappeared between
    /// discovery and read.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path the operation failed on.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    /// Shorthand for a configuration error.
    pub fn config(identifier: impl Into<String>, message: impl Into<String>) -> Self {
        BuildError::Config {
            identifier: identifier.into(),
            message: message.into(),
        }
    }

    /// Shorthand for an I/O error tagged with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.into(),
            source,
        }
    }

    /// The lint violations carried by this error, if any.
    pub fn lint_violations(&self) -> Option<&[LintViolation]> {
        match self {
            BuildError::Lint { violations } => Some(violations),
            _ => None,
        }
    }
}
