//! Expressions.
//!
//! Comma, assignment and ternary levels are explicit; binary operators
//! use precedence climbing over the table in `operators.rs`.

mod operators;
mod postfix;
mod primary;
mod unary;

use ns_ir::ast::{Expr, ExprKind};
use ns_ir::{ExprId, Span, TokenKind};

use self::operators::{compound_assign_op, infix_op, InfixOp, LOWEST_PREC};
use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `assign_expr {, assign_expr}`
    pub(crate) fn parse_expr(&mut self) -> Result<ExprId, ParseError> {
        let first = self.parse_assign_expr()?;
        if !self.check(TokenKind::Comma) {
            return Ok(first);
        }
        let start = self.expr_span(first);
        let mut exprs = vec![first];
        while self.eat(TokenKind::Comma) {
            exprs.push(self.parse_assign_expr()?);
        }
        Ok(self.alloc_expr(ExprKind::Comma(exprs), start))
    }

    /// Right-associative: `a := b += c` is `a := (b += c)`.
    pub(crate) fn parse_assign_expr(&mut self) -> Result<ExprId, ParseError> {
        let target = self.parse_ternary()?;
        let kind = self.current_kind();
        if !kind.is_assign() {
            return Ok(target);
        }
        self.advance();
        let op = compound_assign_op(kind);
        let value = self.nested(Self::parse_assign_expr)?;
        let start = self.expr_span(target);
        Ok(self.alloc_expr(ExprKind::Assign { target, value, op }, start))
    }

    /// `cond ? expr : ternary`
    fn parse_ternary(&mut self) -> Result<ExprId, ParseError> {
        let cond = self.parse_binary(LOWEST_PREC)?;
        if !self.eat(TokenKind::Question) {
            return Ok(cond);
        }
        let then_expr = self.nested(Self::parse_expr)?;
        self.expect(TokenKind::Colon)?;
        let else_expr = self.nested(Self::parse_ternary)?;
        let start = self.expr_span(cond);
        Ok(self.alloc_expr(
            ExprKind::Ternary {
                cond,
                then_expr,
                else_expr,
            },
            start,
        ))
    }

    /// Binary operators binding at least as tight as `min_prec`, all
    /// left-associative.
    fn parse_binary(&mut self, min_prec: u8) -> Result<ExprId, ParseError> {
        let mut left = self.parse_prefix()?;
        while let Some((prec, op)) = infix_op(self.current_kind()) {
            if prec < min_prec {
                break;
            }
            self.advance();
            let right = self.nested(|p| p.parse_binary(prec + 1))?;
            let start = self.expr_span(left);
            let kind = match op {
                InfixOp::Arith(op) => ExprKind::Binary { left, op, right },
                InfixOp::Cond(op) => ExprKind::BinaryCond { left, op, right },
            };
            left = self.alloc_expr(kind, start);
        }
        Ok(left)
    }

    #[inline]
    fn expr_span(&self, id: ExprId) -> Span {
        self.arena.expr(id).span
    }

    /// Allocate an expression spanning from `start` to the last consumed
    /// token.
    fn alloc_expr(&mut self, kind: ExprKind, start: Span) -> ExprId {
        let span = self.span_from(start);
        self.arena.alloc_expr(Expr::new(kind, span))
    }
}
