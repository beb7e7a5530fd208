use std::path::PathBuf;
use thiserror::Error;

/// Error type for everything around the transpiler: configuration,
/// package lookup and I/O. Transpile failures use [`crate::TranspileError`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid registry global `{global}`: {reason}")]
    InvalidRegistry { global: String, reason: &'static str },

    #[error("Failed to read {path}: {source}")]
    PackageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Refusing to read outside of package `{package}`: {path}")]
    PathEscapesPackage { package: String, path: String },
}
