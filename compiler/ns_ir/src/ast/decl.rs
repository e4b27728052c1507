//! Declarations and the module root.

use crate::{DeclId, ExprId, Name, ParsedTypeId, Span, StmtId};

/// One translation unit.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Module {
    pub decls: Vec<DeclId>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Decl {
    pub name: Name,
    pub name_span: Span,
    /// Declared type. For functions this is a `Func` type node; for type
    /// declarations it is the aliased or defined type.
    pub ty: ParsedTypeId,
    pub kind: DeclKind,
    /// Marked with `declare`.
    pub is_declare: bool,
    /// Comment text written directly above the declaration.
    pub description: Option<String>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    Var {
        value: Option<ExprId>,
        is_static: bool,
    },
    Const {
        value: ExprId,
        is_static: bool,
    },
    Func {
        params: Vec<Param>,
        body: Option<StmtId>,
        is_static: bool,
        is_inline: bool,
    },
    /// `using`, `struct` or `union` declaration.
    Type,
}

/// Parameter name; its type is the matching entry in the `Func` type node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Param {
    pub name: Name,
    pub span: Span,
}

impl Decl {
    /// Whether this appearance carries a value or body.
    pub fn is_defining(&self) -> bool {
        match &self.kind {
            DeclKind::Var { value, .. } => value.is_some(),
            DeclKind::Func { body, .. } => body.is_some(),
            DeclKind::Const { .. } | DeclKind::Type => true,
        }
    }

    pub fn is_static(&self) -> bool {
        match &self.kind {
            DeclKind::Var { is_static, .. }
            | DeclKind::Const { is_static, .. }
            | DeclKind::Func { is_static, .. } => *is_static,
            DeclKind::Type => false,
        }
    }
}
