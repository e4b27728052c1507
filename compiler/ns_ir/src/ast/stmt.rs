//! Statement nodes.

use std::fmt;

use crate::{DeclId, ExprId, Name, Span, StmtId};

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }

    /// Label attached to an `if` or loop.
    pub fn label(&self) -> Option<Label> {
        match &self.kind {
            StmtKind::If { label, .. } | StmtKind::Iter { label, .. } => *label,
            _ => None,
        }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// `name:` in front of an `if`, `while` or `for`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub name: Name,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum StmtKind {
    Empty,
    Def(DeclId),
    Compound(Vec<StmtId>),
    Expr(ExprId),
    Continue {
        label: Option<Label>,
    },
    Break {
        is_breakif: bool,
        label: Option<Label>,
    },
    Return(Option<ExprId>),
    If {
        cond: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
        label: Option<Label>,
    },
    /// `while` and `for`. A `while` only fills `cond`.
    Iter {
        init: Option<ExprId>,
        cond: Option<ExprId>,
        step: Option<ExprId>,
        body: StmtId,
        else_branch: Option<StmtId>,
        label: Option<Label>,
    },
}
