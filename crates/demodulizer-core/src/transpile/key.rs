//! Module keys and link URLs for import specifiers.
//!
//! A module key names a file independently of who imports it:
//! - `./x.js` imported from `pkg/sub/mod.js` → `pkg/sub/x.js`
//! - `lit` → `lit/lit.js` (packages are assumed to ship a self-named entry file)
//!
//! The link URL is what the emitted `<link rel=import>` points at, relative
//! to the importing file, with `.js` swapped for `.html`.

use crate::config::BareLinkStrategy;
use std::fmt;
use thiserror::Error;

/// Extension of the files the transpiler reads.
pub const SCRIPT_EXTENSION: &str = ".js";

/// Extension of the documents the link directives point at.
pub const MARKUP_EXTENSION: &str = ".html";

/// Normalized, importer-independent name of a module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleKey(String);

impl ModuleKey {
    /// Create a key, collapsing `.` and `..` segments and duplicate slashes.
    #[must_use]
    pub fn new(path: &str) -> Self {
        Self(normalize(path))
    }

    /// Qualified name of `file` inside `package`.
    #[must_use]
    pub fn qualified(package: &str, file: &str) -> Self {
        Self::new(&format!("{package}/{file}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Directory part of the key (empty for a key without `/`).
    #[must_use]
    pub fn dir(&self) -> &str {
        self.0.rfind('/').map_or("", |idx| &self.0[..idx])
    }

    /// Number of `/` separators in the key.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.matches('/').count()
    }

    /// The key with its script extension swapped for the markup extension.
    #[must_use]
    pub fn markup(&self) -> String {
        to_markup(&self.0)
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ModuleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A specifier the resolver cannot map to a module key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpecifierError {
    #[error("relative import `{0}` does not name a `.js` file")]
    NotScript(String),

    #[error("empty import specifier")]
    Empty,
}

/// Key and link URL for one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSpecifier {
    pub key: ModuleKey,
    pub link_url: String,
}

/// Resolves specifiers as seen from one importing file.
#[derive(Debug, Clone, Copy)]
pub struct KeyResolver<'a> {
    current: &'a ModuleKey,
    bare_links: BareLinkStrategy,
}

impl<'a> KeyResolver<'a> {
    #[must_use]
    pub fn new(current: &'a ModuleKey, bare_links: BareLinkStrategy) -> Self {
        Self {
            current,
            bare_links,
        }
    }

    /// Resolve both the module key and the link URL.
    pub fn resolve(&self, specifier: &str) -> Result<ResolvedSpecifier, SpecifierError> {
        Ok(ResolvedSpecifier {
            key: self.resolve_key(specifier)?,
            link_url: self.resolve_link_url(specifier)?,
        })
    }

    /// Module key for `specifier`.
    pub fn resolve_key(&self, specifier: &str) -> Result<ModuleKey, SpecifierError> {
        if is_relative(specifier) {
            check_script(specifier)?;
            let dir = self.current.dir();
            if dir.is_empty() {
                Ok(ModuleKey::new(specifier))
            } else {
                Ok(ModuleKey::new(&format!("{dir}/{specifier}")))
            }
        } else {
            Ok(ModuleKey::new(&resolve_bare_import(specifier)?))
        }
    }

    /// Link URL for `specifier`, relative to the importing file.
    pub fn resolve_link_url(&self, specifier: &str) -> Result<String, SpecifierError> {
        if is_relative(specifier) {
            check_script(specifier)?;
            return Ok(to_markup(specifier));
        }

        let target = to_markup(&resolve_bare_import(specifier)?);
        Ok(match self.bare_links {
            BareLinkStrategy::Depth => {
                format!("{}{target}", "../".repeat(self.current.depth()))
            }
            BareLinkStrategy::Relative => relativize(self.current.dir(), &target),
        })
    }
}

/// Whether a specifier is resolved against the importing file.
#[must_use]
pub fn is_relative(specifier: &str) -> bool {
    specifier.starts_with('.')
}

/// Map a package specifier to the file it is assumed to load.
///
/// `lit` → `lit/lit.js`; `lit/decorators.js` is kept as-is. Package
/// manifests (`main`, `exports`) are not consulted.
pub fn resolve_bare_import(specifier: &str) -> Result<String, SpecifierError> {
    if specifier.is_empty() {
        return Err(SpecifierError::Empty);
    }
    if specifier.ends_with(SCRIPT_EXTENSION) {
        Ok(specifier.to_string())
    } else {
        Ok(format!("{specifier}/{specifier}{SCRIPT_EXTENSION}"))
    }
}

fn check_script(specifier: &str) -> Result<(), SpecifierError> {
    if specifier.ends_with(SCRIPT_EXTENSION) {
        Ok(())
    } else {
        Err(SpecifierError::NotScript(specifier.to_string()))
    }
}

fn to_markup(path: &str) -> String {
    match path.strip_suffix(SCRIPT_EXTENSION) {
        Some(stem) => format!("{stem}{MARKUP_EXTENSION}"),
        None => path.to_string(),
    }
}

/// Lexically collapse `.` and `..` segments. Leading `..` that climb above
/// the root are kept.
fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}

/// Path of `target` as seen from the directory `from_dir`.
fn relativize(from_dir: &str, target: &str) -> String {
    let from: Vec<&str> = from_dir.split('/').filter(|s| !s.is_empty()).collect();
    let to: Vec<&str> = target.split('/').filter(|s| !s.is_empty()).collect();

    // The last segment of `to` is the file name and never shared.
    let shareable = to.len().saturating_sub(1);
    let common = from
        .iter()
        .zip(to.iter().take(shareable))
        .take_while(|(a, b)| a == b)
        .count();

    let mut url = "../".repeat(from.len() - common);
    url.push_str(&to[common..].join("/"));
    url
}
