//! Runtime configuration.
//!
//! [`Config`] is built from CLI flags. [`FileConfig`] is the optional
//! `demodulizer.json` in the working directory:
//!
//! ```json
//! {
//!   "registry": "window.Vaadin",
//!   "bareLinks": "relative",
//!   "server": { "host": "127.0.0.1", "port": 8080, "prefix": "/frontend/npm_components", "root": "node_modules" }
//! }
//! ```

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "demodulizer.json";

/// Global object the registry maps live under.
pub const DEFAULT_REGISTRY: &str = "window.Vaadin";

/// URL prefix component requests are served under.
pub const DEFAULT_PREFIX: &str = "/frontend/npm_components";

/// Settings taken from the command line, shared by every command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory relative paths and `demodulizer.json` are resolved against.
    pub cwd: PathBuf,

    /// Config file named with `--config`; `None` means look in `cwd`.
    pub config_file: Option<PathBuf>,

    /// Log as JSON lines and print machine-readable results.
    pub json_logs: bool,

    /// 0 = INFO, 1 = DEBUG, 2+ = TRACE.
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl Config {
    #[must_use]
    pub fn new(cwd: PathBuf) -> Self {
        Self {
            cwd,
            config_file: None,
            json_logs: false,
            verbosity: 0,
        }
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.verbosity = verbosity;
        self
    }

    #[must_use]
    pub fn with_json_logs(mut self, json: bool) -> Self {
        self.json_logs = json;
        self
    }

    #[must_use]
    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Load the file config this command line points at.
    pub fn load_file_config(&self) -> Result<Option<(PathBuf, FileConfig)>, Error> {
        load_config(&self.cwd, self.config_file.as_deref())
    }
}

/// How link URLs for bare (package) imports are made relative to the
/// importing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BareLinkStrategy {
    /// One `../` per `/` in the importing file's qualified name.
    Depth,
    /// Lexical relativization between the importing file's directory and
    /// the target.
    #[default]
    Relative,
}

impl BareLinkStrategy {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Depth => "depth",
            Self::Relative => "relative",
        }
    }
}

impl std::fmt::Display for BareLinkStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Options that shape the transpiler output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranspileOptions {
    /// Dotted path of the global object holding `modules` and `moduleDefaults`.
    pub registry: String,
    /// Link URL strategy for bare imports.
    pub bare_links: BareLinkStrategy,
}

impl Default for TranspileOptions {
    fn default() -> Self {
        Self {
            registry: DEFAULT_REGISTRY.to_string(),
            bare_links: BareLinkStrategy::default(),
        }
    }
}

/// Server section of the config file. Every field is optional; CLI flags win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// URL prefix for component requests.
    pub prefix: Option<String>,
    /// Directory holding installed packages, relative to the config file.
    pub root: Option<PathBuf>,
}

/// Contents of `demodulizer.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Transpiler options (top-level keys).
    #[serde(flatten)]
    pub transpile: TranspileOptions,
    /// Server options.
    pub server: ServerConfig,
}

/// Find the config file in the given directory.
#[must_use]
pub fn find_config_file(root: &Path) -> Option<PathBuf> {
    let path = root.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// Load the config file.
///
/// If `explicit` is `Some`, that file must exist. Otherwise `demodulizer.json`
/// in `root` is used when present, and `Ok(None)` is returned when it is not.
pub fn load_config(
    root: &Path,
    explicit: Option<&Path>,
) -> Result<Option<(PathBuf, FileConfig)>, Error> {
    let path = match explicit {
        Some(p) => {
            let abs = if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            };
            if !abs.exists() {
                return Err(Error::ConfigNotFound { path: abs });
            }
            abs
        }
        None => match find_config_file(root) {
            Some(p) => p,
            None => return Ok(None),
        },
    };

    let source = std::fs::read_to_string(&path).map_err(|source| Error::ConfigRead {
        path: path.clone(),
        source,
    })?;

    let config: FileConfig =
        serde_json::from_str(&source).map_err(|source| Error::ConfigParse {
            path: path.clone(),
            source,
        })?;

    Ok(Some((path, config)))
}
