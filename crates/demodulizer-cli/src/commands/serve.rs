//! `demodulizer serve` command.
//!
//! Answers `GET <prefix>/<package>/<path>.html` with the transpiled form of
//! `<root>/<package>/<path>.js`:
//!
//! ```text
//! GET /frontend/npm_components/app/app.html
//!   → route match (package `app`, file `app.js`)
//!   → package lookup (package.json) and file read
//!   → transpile on the blocking pool
//!   → 200 text/html + ETag, or 304 on If-None-Match
//! ```
//!
//! Anything that cannot be served is a plain 404.

use super::{absolutize, load_file_config};
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use demodulizer_core::config::DEFAULT_PREFIX;
use demodulizer_core::{
    ComponentRoute, ComponentService, Config, Decline, NodeModules, PackageSource, Resolution,
    Transpiler,
};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Serve action.
#[derive(Debug, Clone)]
pub struct ServeAction {
    /// Directory holding installed packages.
    pub root: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub prefix: Option<String>,
}

/// Run the component server until Ctrl+C.
pub async fn run(config: Config, action: ServeAction) -> Result<()> {
    let (config_path, file_config) = load_file_config(&config)?;
    let cwd = config.cwd;

    // Paths in the config file are relative to the file itself.
    let config_dir = config_path
        .as_deref()
        .and_then(std::path::Path::parent)
        .map_or_else(|| cwd.clone(), std::path::Path::to_path_buf);

    let root = match (action.root, file_config.server.root) {
        (Some(root), _) => absolutize(&cwd, &root),
        (None, Some(root)) => absolutize(&config_dir, &root),
        (None, None) => cwd.join("node_modules"),
    };
    let host = action
        .host
        .or(file_config.server.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = action.port.or(file_config.server.port).unwrap_or(DEFAULT_PORT);
    let prefix = action
        .prefix
        .or(file_config.server.prefix)
        .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

    let transpiler = Transpiler::new(&file_config.transpile).into_diagnostic()?;
    let service = Arc::new(ComponentService::new(
        ComponentRoute::new(&prefix),
        NodeModules::new(root.clone()),
        transpiler,
    ));
    let route_prefix = service.route().prefix().to_string();
    let app = router(service);

    let listener = bind(&host, port)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to bind {host}:{port}"))?;
    let local = listener.local_addr().into_diagnostic()?;

    info!(addr = %local, prefix = %route_prefix, root = %root.display(), "serving components");
    println!();
    println!("  Serving components at http://{local}{route_prefix}/");
    println!("  Packages from {}", root.display());
    println!();
    println!("  Press Ctrl+C to stop");
    println!();

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;

    info!("server stopped");
    Ok(())
}

/// Router for component requests under the service's prefix.
pub fn router<S: PackageSource + 'static>(service: Arc<ComponentService<S>>) -> Router {
    let pattern = format!("{}/*path", service.route().prefix());
    Router::new()
        .route(&pattern, get(serve_component::<S>))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Serve a transpiled component.
async fn serve_component<S: PackageSource + 'static>(
    State(service): State<Arc<ComponentService<S>>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let path = uri.path().to_string();
    let lookup = path.clone();
    let result = tokio::task::spawn_blocking(move || service.handle(&lookup)).await;

    match result {
        Ok(Ok(Resolution::Served(component))) => {
            debug!(
                %path,
                package = %component.package,
                version = %component.version,
                directives = component.transpiled.directives.len(),
                "served component"
            );

            let cached = headers
                .get(header::IF_NONE_MATCH)
                .and_then(|v| v.to_str().ok())
                .is_some_and(|v| etag_matches(v, &component.etag));
            if cached {
                return (StatusCode::NOT_MODIFIED, [(header::ETAG, component.etag)])
                    .into_response();
            }

            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/html; charset=utf-8".to_string()),
                    (header::ETAG, component.etag.clone()),
                ],
                component.transpiled.output,
            )
                .into_response()
        }
        Ok(Ok(Resolution::Declined(decline))) => {
            match &decline {
                Decline::TranspileFailed(_) => warn!(%path, reason = %decline, "not serving"),
                _ => debug!(%path, reason = %decline, "not serving"),
            }
            not_found().await
        }
        Ok(Err(e)) => {
            error!(%path, error = %e, "failed to load component");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
        Err(e) => {
            error!(%path, error = %e, "transpile task failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Bind a listener. `host` is a name, an IPv4 address or an IPv6 address
/// with or without brackets.
async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    let host = host
        .strip_prefix('[')
        .and_then(|h| h.strip_suffix(']'))
        .unwrap_or(host);
    TcpListener::bind((host, port)).await
}

/// Whether an `If-None-Match` value names `etag` (weak tags compare equal).
fn etag_matches(header_value: &str, etag: &str) -> bool {
    header_value
        .split(',')
        .map(str::trim)
        .any(|tag| tag == "*" || tag.trim_start_matches("W/") == etag)
}
