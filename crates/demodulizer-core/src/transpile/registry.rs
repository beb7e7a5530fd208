//! Addressing the global module registry.
//!
//! The registry is two maps hanging off one global object:
//!
//! ```text
//! <global>.modules[key]        -> exports object of `key`
//! <global>.moduleDefaults[key] -> default export of `key`
//! ```
//!
//! This module builds the AST for reads and writes of those slots, and the
//! text that creates them at script load.

use super::key::ModuleKey;
use crate::config::DEFAULT_REGISTRY;
use crate::error::Error;
use std::fmt::Write;
use swc_common::DUMMY_SP;
use swc_ecma_ast::{
    AssignExpr, AssignOp, AssignTarget, ComputedPropName, Decl, Expr, ExprStmt, Ident, IdentName,
    Lit, MemberExpr, MemberProp, Pat, SimpleAssignTarget, Stmt, Str, VarDecl, VarDeclKind,
    VarDeclarator,
};

const MODULES: &str = "modules";
const MODULE_DEFAULTS: &str = "moduleDefaults";

/// Object path of the registry, e.g. `window.Vaadin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    path: Vec<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            path: DEFAULT_REGISTRY.split('.').map(String::from).collect(),
        }
    }
}

impl Registry {
    /// Parse a dotted global path. A single identifier is taken as a
    /// property of `globalThis`.
    pub fn parse(global: &str) -> Result<Self, Error> {
        let invalid = |reason| Error::InvalidRegistry {
            global: global.to_string(),
            reason,
        };

        if global.trim().is_empty() {
            return Err(invalid("empty path"));
        }

        let mut path = Vec::new();
        for segment in global.split('.') {
            if !is_identifier_name(segment) {
                return Err(invalid("every segment must be an identifier"));
            }
            path.push(segment.to_string());
        }

        if path.len() == 1 {
            path.insert(0, "globalThis".to_string());
        }

        Ok(Self { path })
    }

    /// The dotted global path.
    #[must_use]
    pub fn global(&self) -> String {
        self.path.join(".")
    }

    /// Statements that create the registry objects when missing. The first
    /// path segment (`window`, `globalThis`) is assumed to exist.
    #[must_use]
    pub fn init_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.path.len() + 1);
        for end in 2..=self.path.len() {
            let object = self.path[..end].join(".");
            lines.push(format!("{object} = {object} || {{}};"));
        }
        for map in [MODULES, MODULE_DEFAULTS] {
            let object = format!("{}.{map}", self.global());
            lines.push(format!("{object} = {object} || {{}};"));
        }
        lines
    }

    /// Statement that resets the exports object of `key`.
    #[must_use]
    pub fn reset_line(&self, key: &ModuleKey) -> String {
        let mut line = String::new();
        let _ = write!(
            line,
            "{}.{MODULES}[{}] = {{}};",
            self.global(),
            quote(key.as_str())
        );
        line
    }

    fn root(&self) -> Expr {
        let mut segments = self.path.iter();
        let first = segments.next().map_or("globalThis", String::as_str);
        segments.fold(Expr::Ident(ident(first)), |obj, segment| {
            Expr::Member(member(obj, segment))
        })
    }

    /// `<global>.modules[key]`
    #[must_use]
    pub fn exports_of(&self, key: &ModuleKey) -> MemberExpr {
        index(Expr::Member(member(self.root(), MODULES)), key.as_str())
    }

    /// `<global>.moduleDefaults[key]`
    #[must_use]
    pub fn default_of(&self, key: &ModuleKey) -> MemberExpr {
        index(Expr::Member(member(self.root(), MODULE_DEFAULTS)), key.as_str())
    }

    /// `<global>.modules[key].<name>`
    #[must_use]
    pub fn export_slot(&self, key: &ModuleKey, name: &str) -> MemberExpr {
        member(Expr::Member(self.exports_of(key)), name)
    }

    /// Read or write target for export `name` of `key`; `default` lives in
    /// `moduleDefaults`.
    #[must_use]
    pub fn binding(&self, key: &ModuleKey, name: &str) -> MemberExpr {
        if name == "default" {
            self.default_of(key)
        } else {
            self.export_slot(key, name)
        }
    }
}

/// Whether `name` can be written as `obj.name`.
#[must_use]
pub fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '$' || c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '$' || c == '_' || c.is_alphanumeric())
}

/// Double-quoted JavaScript string literal.
#[must_use]
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn ident(name: &str) -> Ident {
    Ident::new_no_ctxt(name.into(), DUMMY_SP)
}

pub(crate) fn str_lit(value: &str) -> Expr {
    Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: Some(quote(value).into()),
    }))
}

/// `obj.prop`, or `obj["prop"]` when `prop` is not an identifier name.
pub(crate) fn member(obj: Expr, prop: &str) -> MemberExpr {
    if is_identifier_name(prop) {
        MemberExpr {
            span: DUMMY_SP,
            obj: Box::new(obj),
            prop: MemberProp::Ident(IdentName {
                span: DUMMY_SP,
                sym: prop.into(),
            }),
        }
    } else {
        index(obj, prop)
    }
}

/// `obj["key"]`
pub(crate) fn index(obj: Expr, key: &str) -> MemberExpr {
    MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(obj),
        prop: MemberProp::Computed(ComputedPropName {
            span: DUMMY_SP,
            expr: Box::new(str_lit(key)),
        }),
    }
}

/// `const <local> = <init>;`
pub(crate) fn const_decl(local: Ident, init: Expr) -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(local.into()),
            init: Some(Box::new(init)),
            definite: false,
        }],
        ..Default::default()
    })))
}

/// `<target> = <value>;`
pub(crate) fn assign(target: MemberExpr, value: Expr) -> Stmt {
    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(Expr::Assign(AssignExpr {
            span: DUMMY_SP,
            op: AssignOp::Assign,
            left: AssignTarget::Simple(SimpleAssignTarget::Member(target)),
            right: Box::new(value),
        })),
    })
}
