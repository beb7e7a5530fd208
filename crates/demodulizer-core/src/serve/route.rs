//! Component request URLs.
//!
//! `<prefix>/<package>/<path>.html` names the transpiled form of
//! `<package>/<path>.js`. Scoped packages take two segments
//! (`@scope/name`).

use crate::transpile::key::{MARKUP_EXTENSION, SCRIPT_EXTENSION};
use crate::transpile::ModuleKey;

/// A parsed component request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRequest {
    /// Package name, e.g. `lit` or `@polymer/polymer`.
    pub package: String,
    /// Script path inside the package, e.g. `src/lit.js`.
    pub file: String,
}

impl ComponentRequest {
    /// Module key of the requested script.
    #[must_use]
    pub fn qualified_name(&self) -> ModuleKey {
        ModuleKey::qualified(&self.package, &self.file)
    }
}

/// Matches request paths under a URL prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentRoute {
    prefix: String,
}

impl ComponentRoute {
    /// Create a route; the prefix is normalized to `/a/b` form.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{trimmed}")
        };
        Self { prefix }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parse `path` if it is a component request under this route.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<ComponentRequest> {
        let rest = path.strip_prefix(self.prefix.as_str())?;
        let rest = rest.strip_prefix('/')?;
        let stem = rest.strip_suffix(MARKUP_EXTENSION)?;

        let segments: Vec<&str> = stem.split('/').collect();
        if segments
            .iter()
            .any(|s| s.is_empty() || *s == "." || *s == ".." || s.contains('\\'))
        {
            return None;
        }

        let package_len = if segments[0].starts_with('@') { 2 } else { 1 };
        if segments.len() <= package_len {
            return None;
        }

        Some(ComponentRequest {
            package: segments[..package_len].join("/"),
            file: format!("{}{SCRIPT_EXTENSION}", segments[package_len..].join("/")),
        })
    }
}

impl Default for ComponentRoute {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PREFIX)
    }
}
