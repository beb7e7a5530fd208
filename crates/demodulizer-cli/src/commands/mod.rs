pub mod serve;
pub mod transpile;
pub mod version;

use demodulizer_core::{Config, FileConfig};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

/// Load `demodulizer.json` from the working directory, or the file named by
/// `--config`.
///
/// Returns the path it was read from, if any, and the config (defaults when
/// there is no file).
pub fn load_file_config(config: &Config) -> Result<(Option<PathBuf>, FileConfig)> {
    match config.load_file_config().into_diagnostic()? {
        Some((path, config)) => {
            tracing::debug!(path = %path.display(), "loaded config");
            Ok((Some(path), config))
        }
        None => Ok((None, FileConfig::default())),
    }
}

/// `path` as absolute, relative paths taken from `base`.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
