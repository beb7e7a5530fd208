//! Where component sources come from.

use crate::error::Error;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};

/// A store of installed packages.
pub trait PackageSource: Send + Sync {
    /// Installed version of `package`, or `None` if it is not installed or
    /// has no readable version.
    fn version(&self, package: &str) -> Result<Option<String>, Error>;

    /// Contents of `file` inside `package`, or `None` if it does not exist.
    fn read(&self, package: &str, file: &str) -> Result<Option<String>, Error>;
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    version: Option<String>,
}

/// Packages laid out as `<root>/<package>/package.json`.
#[derive(Debug, Clone)]
pub struct NodeModules {
    root: PathBuf,
}

impl NodeModules {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn package_dir(&self, package: &str) -> Result<PathBuf, Error> {
        checked_join(&self.root, package, package)
    }
}

impl PackageSource for NodeModules {
    fn version(&self, package: &str) -> Result<Option<String>, Error> {
        let manifest_path = self.package_dir(package)?.join("package.json");
        let Some(text) = read_optional(&manifest_path)? else {
            return Ok(None);
        };
        let Ok(manifest) = serde_json::from_str::<PackageManifest>(&text) else {
            return Ok(None);
        };
        Ok(manifest.version.filter(|v| !v.is_empty()))
    }

    fn read(&self, package: &str, file: &str) -> Result<Option<String>, Error> {
        let dir = self.package_dir(package)?;
        let path = checked_join(&dir, package, file)?;
        read_optional(&path)
    }
}

/// In-memory packages, keyed by package name then file path.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    packages: HashMap<String, (String, HashMap<String, String>)>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package with the given version.
    #[must_use]
    pub fn with_package(mut self, package: &str, version: &str) -> Self {
        self.packages
            .entry(package.to_string())
            .or_insert_with(|| (version.to_string(), HashMap::new()));
        self
    }

    /// Add a file, creating its package at version `0.0.0` if needed.
    #[must_use]
    pub fn with_file(mut self, package: &str, file: &str, contents: &str) -> Self {
        self.packages
            .entry(package.to_string())
            .or_insert_with(|| ("0.0.0".to_string(), HashMap::new()))
            .1
            .insert(file.to_string(), contents.to_string());
        self
    }
}

impl PackageSource for MemorySource {
    fn version(&self, package: &str) -> Result<Option<String>, Error> {
        Ok(self.packages.get(package).map(|(version, _)| version.clone()))
    }

    fn read(&self, package: &str, file: &str) -> Result<Option<String>, Error> {
        Ok(self
            .packages
            .get(package)
            .and_then(|(_, files)| files.get(file).cloned()))
    }
}

/// Join a relative path onto `base`, rejecting anything that could leave it.
fn checked_join(base: &Path, package: &str, relative: &str) -> Result<PathBuf, Error> {
    let escapes = || Error::PathEscapesPackage {
        package: package.to_string(),
        path: relative.to_string(),
    };

    let mut joined = base.to_path_buf();
    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => joined.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(escapes())
            }
        }
    }
    if joined == base {
        return Err(escapes());
    }
    Ok(joined)
}

/// Read a UTF-8 (lossy) file; a missing file is `None`.
fn read_optional(path: &Path) -> Result<Option<String>, Error> {
    if path.is_dir() {
        return Ok(None);
    }
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::PackageRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_node_modules_version_and_read() {
        let dir = tempdir().unwrap();
        write(dir.path(), "lit/package.json", r#"{"name":"lit","version":"3.1.0"}"#);
        write(dir.path(), "lit/lit.js", "export const html = 1;");
        write(
            dir.path(),
            "@polymer/polymer/package.json",
            r#"{"name":"@polymer/polymer","version":"3.5.1"}"#,
        );

        let source = NodeModules::new(dir.path());
        assert_eq!(source.version("lit").unwrap().as_deref(), Some("3.1.0"));
        assert_eq!(
            source.version("@polymer/polymer").unwrap().as_deref(),
            Some("3.5.1")
        );
        assert_eq!(source.version("missing").unwrap(), None);
        assert_eq!(
            source.read("lit", "lit.js").unwrap().as_deref(),
            Some("export const html = 1;")
        );
        assert_eq!(source.read("lit", "nope.js").unwrap(), None);
    }

    #[test]
    fn test_node_modules_without_readable_version() {
        let dir = tempdir().unwrap();
        write(dir.path(), "app/package.json", r#"{"name":"app"}"#);
        write(dir.path(), "empty/package.json", r#"{"name":"empty","version":""}"#);
        write(dir.path(), "broken/package.json", "{ not json");
        write(dir.path(), "typed/package.json", r#"{"version":3}"#);

        let source = NodeModules::new(dir.path());
        for package in ["app", "empty", "broken", "typed"] {
            assert_eq!(source.version(package).unwrap(), None, "{package}");
        }
    }

    #[test]
    fn test_path_escape_rejected() {
        let dir = tempdir().unwrap();
        let source = NodeModules::new(dir.path());
        assert!(matches!(
            source.read("lit", "../secret.js"),
            Err(Error::PathEscapesPackage { .. })
        ));
        assert!(matches!(
            source.read("lit", "/etc/passwd"),
            Err(Error::PathEscapesPackage { .. })
        ));
        assert!(matches!(
            source.version(".."),
            Err(Error::PathEscapesPackage { .. })
        ));
    }

    #[test]
    fn test_read_lossy_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pkg/a.js");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, b"const a = '\xff';").unwrap();
        let source = NodeModules::new(dir.path());
        let text = source.read("pkg", "a.js").unwrap().unwrap();
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn test_memory_source() {
        let source = MemorySource::new()
            .with_package("lit", "3.0.0")
            .with_file("lit", "lit.js", "x();")
            .with_file("app", "app.js", "y();");
        assert_eq!(source.version("lit").unwrap().as_deref(), Some("3.0.0"));
        assert_eq!(source.version("app").unwrap().as_deref(), Some("0.0.0"));
        assert_eq!(source.read("lit", "lit.js").unwrap().as_deref(), Some("x();"));
        assert_eq!(source.read("lit", "other.js").unwrap(), None);
        assert_eq!(source.version("none").unwrap(), None);
    }
}
