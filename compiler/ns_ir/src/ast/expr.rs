//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, CondOp, UnaryCondOp, UnaryOp};
use crate::{ExprId, IntLit, Name, ParsedTypeId, Span, StrLit};

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum ExprKind {
    Name(Name),
    Int(IntLit),
    Str(StrLit),
    SizeofExpr(ExprId),
    SizeofType(ParsedTypeId),
    Call {
        func: ExprId,
        args: Vec<ExprId>,
    },
    Index {
        array: ExprId,
        index: ExprId,
    },
    /// `record.member`; `p->member` is built as `Access(Deref(p))`.
    Access {
        record: ExprId,
        member: Name,
        member_span: Span,
    },
    Cast {
        expr: ExprId,
        ty: ParsedTypeId,
        signed: bool,
    },
    Deref(ExprId),
    AddrOf(ExprId),
    Unary {
        op: UnaryOp,
        operand: ExprId,
    },
    UnaryCond {
        op: UnaryCondOp,
        operand: ExprId,
    },
    Binary {
        left: ExprId,
        op: BinaryOp,
        right: ExprId,
    },
    BinaryCond {
        left: ExprId,
        op: CondOp,
        right: ExprId,
    },
    Ternary {
        cond: ExprId,
        then_expr: ExprId,
        else_expr: ExprId,
    },
    /// `target := value`, or `target op= value` when `op` is set.
    Assign {
        target: ExprId,
        value: ExprId,
        op: Option<BinaryOp>,
    },
    Comma(Vec<ExprId>),
    /// Brace initializer; only valid in initializer position.
    AggregateInit {
        kind: AggregateKind,
        payload: AggregatePayload,
    },
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AggregateKind {
    Array,
    Struct,
    Union,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum AggregatePayload {
    /// `{a, b, c}`
    Elements(Vec<ExprId>),
    /// `struct { x: a, y: b }`
    Fields(Vec<FieldInit>),
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct FieldInit {
    pub name: Name,
    pub value: ExprId,
    pub span: Span,
}
