//! Shared node traits.

use crate::ast::{Decl, Expr, ParsedType, Stmt};
use crate::Span;

/// Anything with a source location.
pub trait Spanned {
    fn span(&self) -> Span;
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for ParsedType {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for Decl {
    fn span(&self) -> Span {
        self.span
    }
}

impl Spanned for crate::Token {
    fn span(&self) -> Span {
        self.span
    }
}
