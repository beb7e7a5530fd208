//! Transpile error types.

use serde::Serialize;
use std::fmt;
use swc_common::Span;
use thiserror::Error;

/// Transpile error codes.
pub mod codes {
    pub const TRANSPILE_UNSUPPORTED_SPECIFIER: &str = "TRANSPILE_UNSUPPORTED_SPECIFIER";
    pub const TRANSPILE_UNSUPPORTED_CONSTRUCT: &str = "TRANSPILE_UNSUPPORTED_CONSTRUCT";
    pub const TRANSPILE_PARSE_ERROR: &str = "TRANSPILE_PARSE_ERROR";
    pub const TRANSPILE_EMIT_ERROR: &str = "TRANSPILE_EMIT_ERROR";
}

/// 1-based position in the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A parser diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub message: String,
    pub location: Option<Location>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(loc) => write!(f, "{} at {loc}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Why a transpile call failed. No output is produced for a failed call.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// An import/export combines features that are not modeled, or names a
    /// module the resolver cannot key.
    #[error("unsupported specifier shape in {file} at {location}: {message}\n  {snippet}")]
    UnsupportedSpecifierShape {
        file: String,
        message: String,
        location: Location,
        snippet: String,
    },

    /// Module syntax with no rewrite rule.
    #[error("unsupported construct in {file} at {location}: {message}\n  {snippet}")]
    UnsupportedConstruct {
        file: String,
        message: String,
        location: Location,
        snippet: String,
    },

    #[error("failed to parse {file}: {}", join(.diagnostics))]
    ParseFailure {
        file: String,
        diagnostics: Vec<Diagnostic>,
    },

    #[error("failed to emit {file}: {message}")]
    Emit { file: String, message: String },
}

impl TranspileError {
    /// Stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnsupportedSpecifierShape { .. } => codes::TRANSPILE_UNSUPPORTED_SPECIFIER,
            Self::UnsupportedConstruct { .. } => codes::TRANSPILE_UNSUPPORTED_CONSTRUCT,
            Self::ParseFailure { .. } => codes::TRANSPILE_PARSE_ERROR,
            Self::Emit { .. } => codes::TRANSPILE_EMIT_ERROR,
        }
    }

    /// Where in the source the error points, when known.
    #[must_use]
    pub fn location(&self) -> Option<Location> {
        match self {
            Self::UnsupportedSpecifierShape { location, .. }
            | Self::UnsupportedConstruct { location, .. } => Some(*location),
            Self::ParseFailure { diagnostics, .. } => {
                diagnostics.first().and_then(|d| d.location)
            }
            Self::Emit { .. } => None,
        }
    }
}

fn join(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Rewrite failure before it is placed in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RewriteError {
    pub kind: RewriteErrorKind,
    pub span: Span,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RewriteErrorKind {
    SpecifierShape,
    Construct,
}

impl RewriteError {
    pub(crate) fn shape(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: RewriteErrorKind::SpecifierShape,
            span,
            message: message.into(),
        }
    }

    pub(crate) fn construct(span: Span, message: impl Into<String>) -> Self {
        Self {
            kind: RewriteErrorKind::Construct,
            span,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = TranspileError::ParseFailure {
            file: "app/app.js".to_string(),
            diagnostics: vec![],
        };
        assert_eq!(err.code(), codes::TRANSPILE_PARSE_ERROR);

        let err = TranspileError::Emit {
            file: "app/app.js".to_string(),
            message: "boom".to_string(),
        };
        assert_eq!(err.code(), codes::TRANSPILE_EMIT_ERROR);
        assert!(err.location().is_none());
    }

    #[test]
    fn test_parse_failure_display_lists_diagnostics() {
        let err = TranspileError::ParseFailure {
            file: "app/app.js".to_string(),
            diagnostics: vec![
                Diagnostic {
                    message: "Expected ident".to_string(),
                    location: Some(Location { line: 3, column: 7 }),
                },
                Diagnostic {
                    message: "Unexpected eof".to_string(),
                    location: None,
                },
            ],
        };
        let display = err.to_string();
        assert!(display.contains("app/app.js"));
        assert!(display.contains("Expected ident at 3:7"));
        assert!(display.contains("Unexpected eof"));
        assert_eq!(err.location(), Some(Location { line: 3, column: 7 }));
    }

    #[test]
    fn test_unsupported_display() {
        let err = TranspileError::UnsupportedSpecifierShape {
            file: "app/app.js".to_string(),
            message: "default and named imports cannot be combined".to_string(),
            location: Location { line: 1, column: 1 },
            snippet: "import foo, { bar } from 'baz';".to_string(),
        };
        let display = err.to_string();
        assert!(display.contains("unsupported specifier shape"));
        assert!(display.contains("1:1"));
        assert!(display.contains("import foo, { bar }"));
    }
}
