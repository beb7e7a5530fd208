//! Serving transpiled components by URL.
//!
//! A request path is matched against the component route, the package and
//! file are looked up in a [`PackageSource`], and the file is transpiled.
//! Anything short of a successful transpile is a [`Decline`]: the caller
//! answers it the way it answers any unknown path.

pub mod route;
pub mod source;

pub use route::{ComponentRequest, ComponentRoute};
pub use source::{MemorySource, NodeModules, PackageSource};

use crate::error::Error;
use crate::transpile::{TranspileError, TranspileOutput, Transpiler};
use std::fmt;

/// A transpiled component ready to send.
#[derive(Debug, Clone)]
pub struct ServedComponent {
    pub package: String,
    pub version: String,
    pub transpiled: TranspileOutput,
    /// Quoted entity tag for the body.
    pub etag: String,
}

impl ServedComponent {
    #[must_use]
    pub fn body(&self) -> &str {
        &self.transpiled.output
    }
}

/// Why a request was not served.
#[derive(Debug)]
pub enum Decline {
    /// The path is not under the component route.
    NotComponent,
    /// Not installed, or its manifest has no readable version.
    UnknownPackage { package: String },
    MissingFile { package: String, file: String },
    TranspileFailed(TranspileError),
}

impl fmt::Display for Decline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotComponent => f.write_str("not a component request"),
            Self::UnknownPackage { package } => write!(f, "package `{package}` is not installed"),
            Self::MissingFile { package, file } => {
                write!(f, "file `{file}` not found in package `{package}`")
            }
            Self::TranspileFailed(e) => write!(f, "transpile failed [{}]: {e}", e.code()),
        }
    }
}

#[derive(Debug)]
pub enum Resolution {
    Served(Box<ServedComponent>),
    Declined(Decline),
}

/// Matches, loads and transpiles component requests.
pub struct ComponentService<S> {
    route: ComponentRoute,
    source: S,
    transpiler: Transpiler,
}

impl<S: PackageSource> ComponentService<S> {
    pub fn new(route: ComponentRoute, source: S, transpiler: Transpiler) -> Self {
        Self {
            route,
            source,
            transpiler,
        }
    }

    pub fn route(&self) -> &ComponentRoute {
        &self.route
    }

    /// Resolve a request path. I/O failures are errors; everything the
    /// client could have caused is a [`Decline`].
    pub fn handle(&self, path: &str) -> Result<Resolution, Error> {
        let Some(request) = self.route.matches(path) else {
            return Ok(Resolution::Declined(Decline::NotComponent));
        };

        let Some(version) = self.source.version(&request.package)? else {
            return Ok(Resolution::Declined(Decline::UnknownPackage {
                package: request.package,
            }));
        };

        let Some(source) = self.source.read(&request.package, &request.file)? else {
            return Ok(Resolution::Declined(Decline::MissingFile {
                package: request.package,
                file: request.file,
            }));
        };

        match self.transpiler.transpile(&request.qualified_name(), &source) {
            Ok(transpiled) => {
                let etag = format!("\"{}\"", transpiled.hash());
                Ok(Resolution::Served(Box::new(ServedComponent {
                    package: request.package,
                    version,
                    transpiled,
                    etag,
                })))
            }
            Err(e) => Ok(Resolution::Declined(Decline::TranspileFailed(e))),
        }
    }
}
