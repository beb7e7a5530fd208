//! Rewrites module declarations into registry reads and writes.
//!
//! Each top-level item maps to zero or more replacement statements; plain
//! statements pass through untouched. A resolved specifier records exactly
//! one link directive.

use super::directives::DirectiveCollector;
use super::error::RewriteError;
use super::key::{KeyResolver, ModuleKey};
use super::registry::{assign, const_decl, ident, Registry};
use crate::config::BareLinkStrategy;
use swc_common::{comments::Comments, Span, Spanned, DUMMY_SP};
use swc_ecma_ast::{
    ArrowExpr, AwaitExpr, ClassDecl, ClassExpr, Decl, DefaultDecl, ExportAll, ExportDecl,
    ExportDefaultDecl, ExportDefaultExpr, ExportSpecifier, Expr, FnDecl, FnExpr, ForOfStmt,
    Function, ImportDecl, ImportSpecifier, MetaPropExpr, MetaPropKind, Module, ModuleDecl,
    ModuleExportName, ModuleItem, NamedExport, ObjectLit, Pat, PropOrSpread, SpreadElement, Stmt,
    Str,
};
use swc_ecma_visit::{Visit, VisitWith};

pub(crate) struct Rewriter<'a> {
    current: &'a ModuleKey,
    resolver: KeyResolver<'a>,
    registry: &'a Registry,
    directives: DirectiveCollector,
    comments: Option<&'a dyn Comments>,
    /// Local export-list writes, emitted once every top-level binding is
    /// initialized.
    trailing: Vec<Stmt>,
}

impl<'a> Rewriter<'a> {
    pub(crate) fn new(
        current: &'a ModuleKey,
        registry: &'a Registry,
        bare_links: BareLinkStrategy,
    ) -> Self {
        Self {
            current,
            resolver: KeyResolver::new(current, bare_links),
            registry,
            directives: DirectiveCollector::new(),
            comments: None,
            trailing: Vec::new(),
        }
    }

    /// Move comments attached to rewritten items onto their replacements.
    pub(crate) fn with_comments(mut self, comments: &'a dyn Comments) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Rewrite a whole module into script statements.
    pub(crate) fn rewrite_module(&mut self, module: Module) -> Result<Vec<Stmt>, RewriteError> {
        reject_module_only_syntax(&module)?;

        let mut program = Vec::with_capacity(module.body.len());
        for item in module.body {
            let span = item.span();
            let mut stmts = self.rewrite_item(item)?;
            self.carry_comments(span, &mut stmts);
            program.extend(stmts);
        }
        program.append(&mut self.trailing);
        Ok(program)
    }

    pub(crate) fn into_directives(self) -> DirectiveCollector {
        self.directives
    }

    fn rewrite_item(&mut self, item: ModuleItem) -> Result<Vec<Stmt>, RewriteError> {
        let decl = match item {
            ModuleItem::Stmt(stmt) => return Ok(vec![stmt]),
            ModuleItem::ModuleDecl(decl) => decl,
        };

        match decl {
            ModuleDecl::Import(import) => self.rewrite_import(import),
            ModuleDecl::ExportDecl(export) => self.rewrite_export_decl(export),
            ModuleDecl::ExportDefaultDecl(export) => self.rewrite_export_default_decl(export),
            ModuleDecl::ExportDefaultExpr(export) => self.rewrite_export_default_expr(export),
            ModuleDecl::ExportNamed(export) => self.rewrite_named_export(export),
            ModuleDecl::ExportAll(export) => self.rewrite_export_all(export),
            other => Err(RewriteError::construct(
                other.span(),
                "TypeScript module syntax is not supported",
            )),
        }
    }

    /// Resolve a source specifier and record its directive.
    fn link(&mut self, src: &Str) -> Result<ModuleKey, RewriteError> {
        let resolved = self
            .resolver
            .resolve(&src.value)
            .map_err(|e| RewriteError::shape(src.span, e.to_string()))?;
        self.directives.record(resolved.link_url);
        Ok(resolved.key)
    }

    fn rewrite_import(&mut self, import: ImportDecl) -> Result<Vec<Stmt>, RewriteError> {
        if import.type_only {
            return Err(RewriteError::construct(
                import.span,
                "type-only imports are not supported",
            ));
        }
        if import.with.is_some() {
            return Err(RewriteError::construct(
                import.span,
                "import attributes are not supported",
            ));
        }

        let has_default = import
            .specifiers
            .iter()
            .any(|s| matches!(s, ImportSpecifier::Default(_)));
        if has_default && import.specifiers.len() > 1 {
            return Err(RewriteError::shape(
                import.span,
                "a default import cannot be combined with other specifiers",
            ));
        }

        let key = self.link(&import.src)?;

        let mut stmts = Vec::with_capacity(import.specifiers.len());
        for specifier in import.specifiers {
            match specifier {
                ImportSpecifier::Default(default) => {
                    let source = self.registry.default_of(&key);
                    stmts.push(const_decl(default.local, Expr::Member(source)));
                }
                ImportSpecifier::Namespace(namespace) => {
                    let source = self.registry.exports_of(&key);
                    stmts.push(const_decl(namespace.local, Expr::Member(source)));
                }
                ImportSpecifier::Named(named) => {
                    if named.is_type_only {
                        return Err(RewriteError::construct(
                            named.span,
                            "type-only import specifiers are not supported",
                        ));
                    }
                    let imported = named
                        .imported
                        .as_ref()
                        .map_or(&*named.local.sym, export_name);
                    let source = self.registry.binding(&key, imported);
                    stmts.push(const_decl(named.local, Expr::Member(source)));
                }
            }
        }
        Ok(stmts)
    }

    fn rewrite_export_decl(&mut self, export: ExportDecl) -> Result<Vec<Stmt>, RewriteError> {
        let names: Vec<String> = match &export.decl {
            Decl::Fn(f) => vec![f.ident.sym.to_string()],
            Decl::Class(c) => vec![c.ident.sym.to_string()],
            Decl::Var(var) => var
                .decls
                .iter()
                .map(|d| match &d.name {
                    Pat::Ident(binding) => Ok(binding.id.sym.to_string()),
                    other => Err(RewriteError::construct(
                        other.span(),
                        "destructuring exports are not supported",
                    )),
                })
                .collect::<Result<_, _>>()?,
            other => {
                return Err(RewriteError::construct(
                    other.span(),
                    "this export declaration is not supported",
                ))
            }
        };

        let mut stmts = Vec::with_capacity(names.len() + 1);
        stmts.push(Stmt::Decl(export.decl));
        for name in names {
            let slot = self.registry.export_slot(self.current, &name);
            stmts.push(assign(slot, Expr::Ident(ident(&name))));
        }
        Ok(stmts)
    }

    fn rewrite_export_default_decl(
        &mut self,
        export: ExportDefaultDecl,
    ) -> Result<Vec<Stmt>, RewriteError> {
        let (decl, name) = match export.decl {
            DefaultDecl::Fn(FnExpr {
                ident: Some(name),
                function,
            }) => {
                let sym = name.sym.to_string();
                let decl = Decl::Fn(FnDecl {
                    ident: name,
                    declare: false,
                    function,
                });
                (decl, sym)
            }
            DefaultDecl::Class(ClassExpr {
                ident: Some(name),
                class,
            }) => {
                let sym = name.sym.to_string();
                let decl = Decl::Class(ClassDecl {
                    ident: name,
                    declare: false,
                    class,
                });
                (decl, sym)
            }
            DefaultDecl::Fn(_) | DefaultDecl::Class(_) => {
                return Err(RewriteError::construct(
                    export.span,
                    "anonymous default export declarations are not supported",
                ))
            }
            DefaultDecl::TsInterfaceDecl(_) => {
                return Err(RewriteError::construct(
                    export.span,
                    "TypeScript module syntax is not supported",
                ))
            }
        };

        let slot = self.registry.default_of(self.current);
        Ok(vec![Stmt::Decl(decl), assign(slot, Expr::Ident(ident(&name)))])
    }

    fn rewrite_export_default_expr(
        &mut self,
        export: ExportDefaultExpr,
    ) -> Result<Vec<Stmt>, RewriteError> {
        match unparen(*export.expr) {
            Expr::Ident(name) => {
                let slot = self.registry.default_of(self.current);
                Ok(vec![assign(slot, Expr::Ident(name))])
            }
            other => Err(RewriteError::construct(
                other.span(),
                "default exports must name a binding",
            )),
        }
    }

    fn rewrite_named_export(&mut self, export: NamedExport) -> Result<Vec<Stmt>, RewriteError> {
        if export.type_only {
            return Err(RewriteError::construct(
                export.span,
                "type-only exports are not supported",
            ));
        }

        let source = match &export.src {
            Some(src) => Some(self.link(src)?),
            None => None,
        };

        let mut stmts = Vec::with_capacity(export.specifiers.len());
        for specifier in &export.specifiers {
            let stmt = match (specifier, &source) {
                (ExportSpecifier::Named(named), _) if named.is_type_only => {
                    return Err(RewriteError::construct(
                        named.span,
                        "type-only export specifiers are not supported",
                    ))
                }
                (ExportSpecifier::Named(named), Some(key)) => {
                    let orig = export_name(&named.orig);
                    let exported = named.exported.as_ref().map_or(orig, export_name);
                    assign(
                        self.registry.binding(self.current, exported),
                        Expr::Member(self.registry.binding(key, orig)),
                    )
                }
                (ExportSpecifier::Named(named), None) => {
                    let ModuleExportName::Ident(local) = &named.orig else {
                        return Err(RewriteError::construct(
                            named.span,
                            "string-named local exports are not supported",
                        ));
                    };
                    let exported = named.exported.as_ref().map_or(&*local.sym, export_name);
                    self.trailing.push(assign(
                        self.registry.binding(self.current, exported),
                        Expr::Ident(ident(&local.sym)),
                    ));
                    continue;
                }
                (ExportSpecifier::Namespace(namespace), Some(key)) => assign(
                    self.registry
                        .binding(self.current, export_name(&namespace.name)),
                    Expr::Member(self.registry.exports_of(key)),
                ),
                (other, _) => {
                    return Err(RewriteError::shape(
                        other.span(),
                        "this export specifier is not supported",
                    ))
                }
            };
            stmts.push(stmt);
        }
        Ok(stmts)
    }

    fn rewrite_export_all(&mut self, export: ExportAll) -> Result<Vec<Stmt>, RewriteError> {
        if export.type_only {
            return Err(RewriteError::construct(
                export.span,
                "type-only exports are not supported",
            ));
        }

        let key = self.link(&export.src)?;
        let merged = Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props: vec![
                spread(Expr::Member(self.registry.exports_of(self.current))),
                spread(Expr::Member(self.registry.exports_of(&key))),
            ],
        });
        Ok(vec![assign(self.registry.exports_of(self.current), merged)])
    }

    /// Keep the leading comments of `span` in front of its first replacement.
    fn carry_comments(&self, span: Span, stmts: &mut [Stmt]) {
        let Some(first) = stmts.first_mut() else {
            return;
        };
        let first_span = first.span();
        if first_span.is_dummy() {
            set_span(first, span);
        } else if first_span.lo != span.lo {
            if let Some(comments) = self.comments {
                if let Some(leading) = comments.take_leading(span.lo) {
                    comments.add_leading_comments(first_span.lo, leading);
                }
            }
        }
    }
}

fn export_name(name: &ModuleExportName) -> &str {
    match name {
        ModuleExportName::Ident(ident) => &ident.sym,
        ModuleExportName::Str(s) => &s.value,
    }
}

fn unparen(mut expr: Expr) -> Expr {
    while let Expr::Paren(paren) = expr {
        expr = *paren.expr;
    }
    expr
}

fn spread(expr: Expr) -> PropOrSpread {
    PropOrSpread::Spread(SpreadElement {
        dot3_token: DUMMY_SP,
        expr: Box::new(expr),
    })
}

fn set_span(stmt: &mut Stmt, span: Span) {
    match stmt {
        Stmt::Expr(expr) => expr.span = span,
        Stmt::Decl(Decl::Var(var)) => var.span = span,
        _ => {}
    }
}

/// Syntax that only works in module code and cannot survive the wrapper
/// function.
fn reject_module_only_syntax(module: &Module) -> Result<(), RewriteError> {
    let mut finder = ModuleOnlyFinder::default();
    module.visit_with(&mut finder);
    match finder.found {
        Some((span, what)) => Err(RewriteError::construct(
            span,
            format!("{what} is not supported"),
        )),
        None => Ok(()),
    }
}

#[derive(Default)]
struct ModuleOnlyFinder {
    function_depth: usize,
    found: Option<(Span, &'static str)>,
}

impl ModuleOnlyFinder {
    fn report(&mut self, span: Span, what: &'static str) {
        if self.found.is_none() {
            self.found = Some((span, what));
        }
    }
}

impl Visit for ModuleOnlyFinder {
    fn visit_meta_prop_expr(&mut self, n: &MetaPropExpr) {
        if n.kind == MetaPropKind::ImportMeta {
            self.report(n.span, "`import.meta`");
        }
    }

    fn visit_await_expr(&mut self, n: &AwaitExpr) {
        if self.function_depth == 0 {
            self.report(n.span, "top-level `await`");
        }
        n.visit_children_with(self);
    }

    fn visit_for_of_stmt(&mut self, n: &ForOfStmt) {
        if n.is_await && self.function_depth == 0 {
            self.report(n.span, "top-level `for await`");
        }
        n.visit_children_with(self);
    }

    fn visit_function(&mut self, n: &Function) {
        self.function_depth += 1;
        n.visit_children_with(self);
        self.function_depth -= 1;
    }

    fn visit_arrow_expr(&mut self, n: &ArrowExpr) {
        self.function_depth += 1;
        n.visit_children_with(self);
        self.function_depth -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transpile::error::{RewriteErrorKind, TranspileError};
    use crate::transpile::parse::SourceUnit;

    struct Rewritten {
        code: String,
        directives: Vec<String>,
    }

    fn squash(s: &str) -> String {
        s.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn run_with(
        file: &str,
        source: &str,
        bare_links: BareLinkStrategy,
    ) -> Result<Rewritten, TranspileError> {
        let (unit, module) = SourceUnit::parse(file, source)?;
        let key = ModuleKey::new(file);
        let registry = Registry::parse("window.Vaadin").unwrap();
        let mut rewriter =
            Rewriter::new(&key, &registry, bare_links).with_comments(unit.comments());
        let stmts = rewriter
            .rewrite_module(module)
            .map_err(|e| unit.locate(e))?;
        Ok(Rewritten {
            code: unit.print(stmts)?,
            directives: rewriter.into_directives().into_vec(),
        })
    }

    fn run(file: &str, source: &str) -> Rewritten {
        run_with(file, source, BareLinkStrategy::Relative).unwrap()
    }

    fn run_err(file: &str, source: &str) -> TranspileError {
        run_with(file, source, BareLinkStrategy::Relative)
            .err()
            .expect("rewrite should fail")
    }

    fn assert_code(actual: &str, expected: &str) {
        assert_eq!(squash(actual), squash(expected), "actual:\n{actual}");
    }

    #[test]
    fn test_default_import() {
        let out = run("app/app.js", "import foo from 'bar';\nfoo();\n");
        assert_eq!(out.directives, ["../bar/bar.html"]);
        assert_code(
            &out.code,
            r#"const foo = window.Vaadin.moduleDefaults["bar/bar.js"]; foo();"#,
        );
    }

    #[test]
    fn test_export_const() {
        let out = run("app/app.js", "export const x = 1;");
        assert!(out.directives.is_empty());
        assert_code(
            &out.code,
            r#"const x = 1; window.Vaadin.modules["app/app.js"].x = x;"#,
        );
    }

    #[test]
    fn test_named_import_from_sibling() {
        let out = run("pkg/mod.js", "import { a as b } from './sibling.js';");
        assert_eq!(out.directives, ["./sibling.html"]);
        assert_code(
            &out.code,
            r#"const b = window.Vaadin.modules["pkg/sibling.js"].a;"#,
        );
    }

    #[test]
    fn test_named_imports_keep_specifier_order() {
        let out = run("pkg/mod.js", "import { z, a as y, 'a-b' as c } from './m.js';");
        assert_eq!(out.directives.len(), 1);
        assert_code(
            &out.code,
            r#"const z = window.Vaadin.modules["pkg/m.js"].z;
               const y = window.Vaadin.modules["pkg/m.js"].a;
               const c = window.Vaadin.modules["pkg/m.js"]["a-b"];"#,
        );
    }

    #[test]
    fn test_export_all() {
        let out = run("pkg/mod.js", "export * from './other.js';");
        assert_eq!(out.directives, ["./other.html"]);
        assert_code(
            &out.code,
            r#"window.Vaadin.modules["pkg/mod.js"] = {
                 ...window.Vaadin.modules["pkg/mod.js"],
                 ...window.Vaadin.modules["pkg/other.js"]
               };"#,
        );
    }

    #[test]
    fn test_default_with_named_is_rejected() {
        let err = run_err("app/app.js", "import foo, { bar } from 'baz';");
        assert!(matches!(err, TranspileError::UnsupportedSpecifierShape { .. }));
        assert_eq!(err.location().map(|l| l.line), Some(1));
    }

    #[test]
    fn test_default_with_namespace_is_rejected() {
        let err = run_err("app/app.js", "import foo, * as ns from 'baz';");
        assert!(matches!(err, TranspileError::UnsupportedSpecifierShape { .. }));
    }

    #[test]
    fn test_import_default_by_name() {
        let out = run("app/app.js", "import { default as x } from 'bar';");
        assert_code(
            &out.code,
            r#"const x = window.Vaadin.moduleDefaults["bar/bar.js"];"#,
        );
    }

    #[test]
    fn test_namespace_import() {
        let out = run("app/app.js", "import * as ns from './util.js';");
        assert_eq!(out.directives, ["./util.html"]);
        assert_code(
            &out.code,
            r#"const ns = window.Vaadin.modules["app/util.js"];"#,
        );
    }

    #[test]
    fn test_side_effect_import_only_links() {
        let out = run("app/app.js", "import './polyfill.js';\nrun();");
        assert_eq!(out.directives, ["./polyfill.html"]);
        assert_code(&out.code, "run();");
    }

    #[test]
    fn test_export_function_and_class() {
        let out = run(
            "app/app.js",
            "export function f() { return 1; }\nexport class C {}",
        );
        assert_code(
            &out.code,
            r#"function f() { return 1; }
               window.Vaadin.modules["app/app.js"].f = f;
               class C {}
               window.Vaadin.modules["app/app.js"].C = C;"#,
        );
    }

    #[test]
    fn test_export_let_with_several_declarators() {
        let out = run("app/app.js", "export let a = 1, b;");
        assert_code(
            &out.code,
            r#"let a = 1, b;
               window.Vaadin.modules["app/app.js"].a = a;
               window.Vaadin.modules["app/app.js"].b = b;"#,
        );
    }

    #[test]
    fn test_export_default_named_declarations() {
        let out = run("app/app.js", "export default function main() {}");
        assert_code(
            &out.code,
            r#"function main() {}
               window.Vaadin.moduleDefaults["app/app.js"] = main;"#,
        );

        let out = run("app/app.js", "export default class Widget {}");
        assert_code(
            &out.code,
            r#"class Widget {}
               window.Vaadin.moduleDefaults["app/app.js"] = Widget;"#,
        );
    }

    #[test]
    fn test_export_default_identifier() {
        let out = run("app/app.js", "const foo = 1;\nexport default (foo);");
        assert_code(
            &out.code,
            r#"const foo = 1; window.Vaadin.moduleDefaults["app/app.js"] = foo;"#,
        );
    }

    #[test]
    fn test_reexports() {
        let out = run(
            "pkg/mod.js",
            "export { a as b, c, default as d, e as default } from './other.js';",
        );
        assert_eq!(out.directives, ["./other.html"]);
        assert_code(
            &out.code,
            r#"window.Vaadin.modules["pkg/mod.js"].b = window.Vaadin.modules["pkg/other.js"].a;
               window.Vaadin.modules["pkg/mod.js"].c = window.Vaadin.modules["pkg/other.js"].c;
               window.Vaadin.modules["pkg/mod.js"].d = window.Vaadin.moduleDefaults["pkg/other.js"];
               window.Vaadin.moduleDefaults["pkg/mod.js"] = window.Vaadin.modules["pkg/other.js"].e;"#,
        );
    }

    #[test]
    fn test_export_namespace_from() {
        let out = run("pkg/mod.js", "export * as util from './util.js';");
        assert_eq!(out.directives, ["./util.html"]);
        assert_code(
            &out.code,
            r#"window.Vaadin.modules["pkg/mod.js"].util = window.Vaadin.modules["pkg/util.js"];"#,
        );
    }

    #[test]
    fn test_local_export_list() {
        let out = run("pkg/mod.js", "const a = 1, c = 2;\nexport { a as b, c as default };");
        assert!(out.directives.is_empty());
        assert_code(
            &out.code,
            r#"const a = 1, c = 2;
               window.Vaadin.modules["pkg/mod.js"].b = a;
               window.Vaadin.moduleDefaults["pkg/mod.js"] = c;"#,
        );
    }

    #[test]
    fn test_local_export_list_before_declaration() {
        let out = run(
            "app/app.js",
            "export { x, f as g };\nconst x = 1;\nfunction f() {}\nuse(x);",
        );
        assert_code(
            &out.code,
            r#"const x = 1;
               function f() {}
               use(x);
               window.Vaadin.modules["app/app.js"].x = x;
               window.Vaadin.modules["app/app.js"].g = f;"#,
        );
    }

    #[test]
    fn test_local_export_list_follows_export_all() {
        let out = run(
            "pkg/mod.js",
            "const a = 1;\nexport { a };\nexport * from './other.js';",
        );
        assert_code(
            &out.code,
            r#"const a = 1;
               window.Vaadin.modules["pkg/mod.js"] = {
                 ...window.Vaadin.modules["pkg/mod.js"],
                 ...window.Vaadin.modules["pkg/other.js"]
               };
               window.Vaadin.modules["pkg/mod.js"].a = a;"#,
        );
    }

    #[test]
    fn test_directives_follow_visit_order_with_duplicates() {
        let out = run(
            "app/app.js",
            "import a from 'lit';\nimport { b } from './b.js';\nexport * from './b.js';",
        );
        assert_eq!(out.directives, ["../lit/lit.html", "./b.html", "./b.html"]);
    }

    #[test]
    fn test_depth_strategy() {
        let out = run_with(
            "app/src/app.js",
            "import foo from 'bar';",
            BareLinkStrategy::Depth,
        )
        .unwrap();
        assert_eq!(out.directives, ["../../bar/bar.html"]);
    }

    #[test]
    fn test_plain_script_unchanged() {
        let source = "const x = 1;\nfunction f() { return x; }\nf();\n";
        let out = run("app/app.js", source);
        assert!(out.directives.is_empty());
        assert_code(&out.code, source);
    }

    #[test]
    fn test_comments_survive_rewrite() {
        let out = run(
            "app/app.js",
            "// the answer\nexport const x = 42;\n/* dep */\nimport foo from 'bar';\n",
        );
        assert!(out.code.contains("the answer"), "{}", out.code);
        assert!(out.code.contains("dep"), "{}", out.code);
    }

    #[test]
    fn test_unsupported_constructs() {
        let cases = [
            "export const { a, b } = obj;",
            "export default function () {}",
            "export default class {}",
            "export default 1 + 2;",
            "export default foo.bar;",
            "console.log(import.meta.url);",
            "await load();",
            "for await (const x of xs) {}",
        ];
        for source in cases {
            let err = run_with("app/app.js", source, BareLinkStrategy::Relative)
                .err()
                .unwrap_or_else(|| panic!("expected failure for {source:?}"));
            assert!(
                matches!(err, TranspileError::UnsupportedConstruct { .. }),
                "{source:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_await_inside_function_is_fine() {
        let out = run("app/app.js", "async function f() { await g(); }\nconst h = async () => await f();");
        assert!(out.code.contains("await g()"));
    }

    #[test]
    fn test_relative_specifier_without_extension_is_rejected() {
        let err = run_err("app/app.js", "import x from './x';");
        match err {
            TranspileError::UnsupportedSpecifierShape {
                message, snippet, ..
            } => {
                assert!(message.contains("./x"));
                assert!(snippet.contains("'./x'"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_error_location_points_at_item() {
        let err = run_err("app/app.js", "const a = 1;\n\nexport default 1 + 2;");
        let location = err.location().unwrap();
        assert_eq!(location.line, 3);
    }

    #[test]
    fn test_rewrite_error_kinds() {
        let shape = RewriteError::shape(DUMMY_SP, "x");
        assert_eq!(shape.kind, RewriteErrorKind::SpecifierShape);
        let construct = RewriteError::construct(DUMMY_SP, "x");
        assert_eq!(construct.kind, RewriteErrorKind::Construct);
    }
}
