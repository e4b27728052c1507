//! AST node model.
//!
//! Four closed node families (types, declarations, statements,
//! expressions) stored in an [`AstArena`](crate::AstArena) and linked by
//! index. Nodes are immutable once built; later phases keep their
//! annotations in side tables keyed by the node ids.

mod decl;
mod expr;
mod ids;
mod operators;
mod stmt;
mod ty;

pub use decl::{Decl, DeclKind, Module, Param};
pub use expr::{AggregateKind, AggregatePayload, Expr, ExprKind, FieldInit};
pub use ids::{DeclId, ExprId, ParsedTypeId, StmtId};
pub use operators::{BinaryOp, CondOp, UnaryCondOp, UnaryOp};
pub use stmt::{Label, Stmt, StmtKind};
pub use ty::{IntWidth, MemberData, ParsedType, TypeKind};
