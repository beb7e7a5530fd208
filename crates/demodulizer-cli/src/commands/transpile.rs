//! `demodulizer transpile` command.

use super::{absolutize, load_file_config};
use demodulizer_core::{Config, ModuleKey, TranspileError, TranspileOutput, Transpiler};
use miette::{miette, IntoDiagnostic, Result, WrapErr};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct TranspileAction {
    pub file: PathBuf,
    pub name: Option<String>,
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

#[derive(Serialize)]
struct SuccessJson<'a> {
    ok: bool,
    #[serde(flatten)]
    transpiled: &'a TranspileOutput,
    hash: String,
}

#[derive(Serialize)]
struct FailureJson<'a> {
    ok: bool,
    qualified_name: &'a str,
    error: ErrorJson,
}

#[derive(Serialize)]
struct ErrorJson {
    code: &'static str,
    message: String,
    line: Option<usize>,
    column: Option<usize>,
}

pub fn run(config: &Config, action: TranspileAction) -> Result<()> {
    let (_, file_config) = load_file_config(config)?;
    let transpiler = Transpiler::new(&file_config.transpile).into_diagnostic()?;

    let file = absolutize(&config.cwd, &action.file);
    let key = qualified_name(
        &config.cwd,
        &file,
        action.name.as_deref(),
        action.root.as_deref(),
    )?;
    debug!(file = %file.display(), qualified_name = %key, "transpiling");

    let bytes = std::fs::read(&file)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", file.display()))?;
    let source = String::from_utf8_lossy(&bytes);

    let transpiled = match transpiler.transpile(&key, &source) {
        Ok(transpiled) => transpiled,
        Err(e) => return report_failure(&key, &e, config.json_logs),
    };

    if let Some(out) = &action.output {
        let out = absolutize(&config.cwd, out);
        std::fs::write(&out, &transpiled.output)
            .into_diagnostic()
            .wrap_err_with(|| format!("failed to write {}", out.display()))?;
        info!(
            output = %out.display(),
            directives = transpiled.directives.len(),
            "wrote transpiled module"
        );
    }

    if config.json_logs {
        let json = SuccessJson {
            ok: true,
            transpiled: &transpiled,
            hash: transpiled.hash(),
        };
        println!("{}", serde_json::to_string_pretty(&json).into_diagnostic()?);
    } else if action.output.is_none() {
        print!("{}", transpiled.output);
    }

    Ok(())
}

fn report_failure(key: &ModuleKey, error: &TranspileError, json: bool) -> Result<()> {
    if !json {
        return Err(miette!("[{}] {error}", error.code()));
    }

    let location = error.location();
    let failure = FailureJson {
        ok: false,
        qualified_name: key.as_str(),
        error: ErrorJson {
            code: error.code(),
            message: error.to_string(),
            line: location.map(|l| l.line),
            column: location.map(|l| l.column),
        },
    };
    println!("{}", serde_json::to_string_pretty(&failure).into_diagnostic()?);
    std::process::exit(1);
}

/// Qualified name for `file`: `--name` if given, else the path of `file`
/// relative to the root.
///
/// Without `--root`, files under `<cwd>/node_modules` are named relative to
/// it and anything else relative to `cwd`.
fn qualified_name(
    cwd: &Path,
    file: &Path,
    name: Option<&str>,
    root: Option<&Path>,
) -> Result<ModuleKey> {
    if let Some(name) = name {
        return Ok(ModuleKey::new(name));
    }

    let root = match root {
        Some(root) => absolutize(cwd, root),
        None => {
            let node_modules = cwd.join("node_modules");
            if file.starts_with(&node_modules) {
                node_modules
            } else {
                cwd.to_path_buf()
            }
        }
    };

    let relative = file.strip_prefix(&root).map_err(|_| {
        miette!(
            "{} is not under {}; pass --root or --name",
            file.display(),
            root.display()
        )
    })?;

    let name = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Ok(ModuleKey::new(&name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_prefers_explicit_name() {
        let key = qualified_name(
            Path::new("/work"),
            Path::new("/work/x.js"),
            Some("app/./app.js"),
            None,
        )
        .unwrap();
        assert_eq!(key.as_str(), "app/app.js");
    }

    #[test]
    fn test_qualified_name_under_node_modules() {
        let key = qualified_name(
            Path::new("/work"),
            Path::new("/work/node_modules/lit/lit.js"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(key.as_str(), "lit/lit.js");
    }

    #[test]
    fn test_qualified_name_falls_back_to_cwd() {
        let key = qualified_name(
            Path::new("/work"),
            Path::new("/work/app/src/app.js"),
            None,
            None,
        )
        .unwrap();
        assert_eq!(key.as_str(), "app/src/app.js");
    }

    #[test]
    fn test_qualified_name_with_root() {
        let key = qualified_name(
            Path::new("/work"),
            Path::new("/work/web/app/app.js"),
            None,
            Some(Path::new("web")),
        )
        .unwrap();
        assert_eq!(key.as_str(), "app/app.js");
    }

    #[test]
    fn test_qualified_name_outside_root() {
        assert!(qualified_name(
            Path::new("/work"),
            Path::new("/elsewhere/app.js"),
            None,
            None,
        )
        .is_err());
    }
}
