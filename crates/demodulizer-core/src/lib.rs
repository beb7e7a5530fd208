#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::return_self_not_must_use)]

pub mod config;
pub mod error;
pub mod serve;
pub mod transpile;
pub mod version;

pub use config::{BareLinkStrategy, Config, FileConfig, ServerConfig, TranspileOptions};
pub use error::Error;
pub use serve::{ComponentRoute, ComponentService, Decline, NodeModules, PackageSource, Resolution};
pub use transpile::{
    codes as transpile_codes, ModuleKey, Registry, TranspileError, TranspileOutput, Transpiler,
};
pub use version::VERSION;
