//! SWC front-end: parse one ES module, print rewritten statements.

use super::error::{Diagnostic, Location, RewriteError, RewriteErrorKind, TranspileError};
use swc_common::{
    comments::SingleThreadedComments, sync::Lrc, FileName, SourceMap, SourceMapper, Span, Spanned,
    DUMMY_SP,
};
use swc_ecma_ast::{EsVersion, Module, ModuleItem, Stmt};
use swc_ecma_codegen::{text_writer::JsWriter, Emitter};
use swc_ecma_parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax};

/// Longest snippet quoted in an error.
const SNIPPET_LIMIT: usize = 120;

/// One parsed source file: its source map and comments, kept for printing
/// and for placing errors.
pub(crate) struct SourceUnit {
    file: String,
    cm: Lrc<SourceMap>,
    comments: SingleThreadedComments,
}

impl SourceUnit {
    /// Parse `source` as an ES module.
    pub(crate) fn parse(file: &str, source: &str) -> Result<(Self, Module), TranspileError> {
        let cm: Lrc<SourceMap> = Lrc::default();
        let fm = cm.new_source_file(
            Lrc::new(FileName::Custom(file.to_string())),
            source.to_string(),
        );
        let comments = SingleThreadedComments::default();

        let lexer = Lexer::new(
            Syntax::Es(EsSyntax::default()),
            EsVersion::EsNext,
            StringInput::from(&*fm),
            Some(&comments),
        );
        let mut parser = Parser::new_from(lexer);
        let parsed = parser.parse_module();
        let recovered = parser.take_errors();

        let unit = Self {
            file: file.to_string(),
            cm,
            comments,
        };

        let module = match parsed {
            Ok(module) => module,
            Err(e) => {
                let diagnostic = unit.diagnostic(format!("{:?}", e.kind()), e.span());
                return Err(unit.parse_failure(vec![diagnostic]));
            }
        };

        if !recovered.is_empty() {
            let diagnostics = recovered
                .into_iter()
                .map(|e| unit.diagnostic(format!("{:?}", e.kind()), e.span()))
                .collect();
            return Err(unit.parse_failure(diagnostics));
        }

        Ok((unit, module))
    }

    pub(crate) fn comments(&self) -> &SingleThreadedComments {
        &self.comments
    }

    /// Print statements as script code.
    pub(crate) fn print(&self, stmts: Vec<Stmt>) -> Result<String, TranspileError> {
        let program = Module {
            span: DUMMY_SP,
            body: stmts.into_iter().map(ModuleItem::Stmt).collect(),
            shebang: None,
        };

        let mut buf = Vec::new();
        {
            let writer = JsWriter::new(self.cm.clone(), "\n", &mut buf, None);
            let mut emitter = Emitter {
                cfg: swc_ecma_codegen::Config::default().with_target(EsVersion::EsNext),
                cm: self.cm.clone(),
                comments: Some(&self.comments),
                wr: writer,
            };
            emitter
                .emit_module(&program)
                .map_err(|e| self.emit_failure(e.to_string()))?;
        }

        String::from_utf8(buf).map_err(|e| self.emit_failure(format!("invalid UTF-8 output: {e}")))
    }

    /// Place a rewrite failure in the source.
    pub(crate) fn locate(&self, error: RewriteError) -> TranspileError {
        let file = self.file.clone();
        let location = self.location(error.span);
        let snippet = self.snippet(error.span);
        match error.kind {
            RewriteErrorKind::SpecifierShape => TranspileError::UnsupportedSpecifierShape {
                file,
                message: error.message,
                location,
                snippet,
            },
            RewriteErrorKind::Construct => TranspileError::UnsupportedConstruct {
                file,
                message: error.message,
                location,
                snippet,
            },
        }
    }

    fn location(&self, span: Span) -> Location {
        let loc = self.cm.lookup_char_pos(span.lo);
        Location {
            line: loc.line,
            column: loc.col_display + 1,
        }
    }

    fn snippet(&self, span: Span) -> String {
        let text = self.cm.span_to_snippet(span).unwrap_or_default();
        let first_line = text.lines().next().unwrap_or_default().trim();
        if first_line.chars().count() > SNIPPET_LIMIT {
            let cut: String = first_line.chars().take(SNIPPET_LIMIT).collect();
            format!("{cut}…")
        } else {
            first_line.to_string()
        }
    }

    fn diagnostic(&self, message: String, span: Span) -> Diagnostic {
        Diagnostic {
            message,
            location: (!span.is_dummy()).then(|| self.location(span)),
        }
    }

    fn parse_failure(&self, diagnostics: Vec<Diagnostic>) -> TranspileError {
        TranspileError::ParseFailure {
            file: self.file.clone(),
            diagnostics,
        }
    }

    fn emit_failure(&self, message: String) -> TranspileError {
        TranspileError::Emit {
            file: self.file.clone(),
            message,
        }
    }
}
