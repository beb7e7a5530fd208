//! ES module to HTML-import transpiler.
//!
//! Turns one ES module into a document that an HTML-imports loader can
//! consume: a `<link rel=import>` per dependency, then a `<script>` that runs
//! the module body inside a function and publishes its exports to a global
//! registry.
//!
//! ## Usage
//!
//! ```ignore
//! use demodulizer_core::transpile::{ModuleKey, Transpiler};
//!
//! let transpiler = Transpiler::default();
//! let out = transpiler.transpile(&ModuleKey::new("app/app.js"), "import foo from 'bar';")?;
//! println!("{}", out.output);
//! ```

pub mod assemble;
pub mod directives;
pub mod error;
pub mod key;
pub mod registry;

mod parse;
mod rewrite;

pub use assemble::assemble;
pub use directives::DirectiveCollector;
pub use error::{codes, Diagnostic, Location, TranspileError};
pub use key::{resolve_bare_import, KeyResolver, ModuleKey, ResolvedSpecifier, SpecifierError};
pub use registry::Registry;

use crate::config::{BareLinkStrategy, TranspileOptions};
use crate::error::Error;
use parse::SourceUnit;
use rewrite::Rewriter;
use serde::Serialize;

/// Result of a successful transpile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranspileOutput {
    /// Module key of the transpiled file.
    pub qualified_name: String,
    /// Link URLs in visit order.
    pub directives: Vec<String>,
    /// The rewritten program, before wrapping.
    pub script: String,
    /// The assembled document.
    pub output: String,
}

impl TranspileOutput {
    /// BLAKE3 hex digest of the assembled document.
    #[must_use]
    pub fn hash(&self) -> String {
        blake3::hash(self.output.as_bytes()).to_hex().to_string()
    }
}

/// Transpiler holding immutable options; shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct Transpiler {
    registry: Registry,
    bare_links: BareLinkStrategy,
}

impl Transpiler {
    pub fn new(options: &TranspileOptions) -> Result<Self, Error> {
        Ok(Self {
            registry: Registry::parse(&options.registry)?,
            bare_links: options.bare_links,
        })
    }

    /// Transpile `source`, the contents of the module `qualified_name`.
    pub fn transpile(
        &self,
        qualified_name: &ModuleKey,
        source: &str,
    ) -> Result<TranspileOutput, TranspileError> {
        let (unit, module) = SourceUnit::parse(qualified_name.as_str(), source)?;

        let mut rewriter = Rewriter::new(qualified_name, &self.registry, self.bare_links)
            .with_comments(unit.comments());
        let program = rewriter
            .rewrite_module(module)
            .map_err(|e| unit.locate(e))?;
        let directives = rewriter.into_directives().into_vec();

        let script = unit.print(program)?;
        let output = assemble(&self.registry, qualified_name, &script, &directives);

        Ok(TranspileOutput {
            qualified_name: qualified_name.to_string(),
            directives,
            script,
            output,
        })
    }
}
