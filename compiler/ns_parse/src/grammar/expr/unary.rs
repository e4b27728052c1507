//! Prefix operators and `sizeof`.

use ns_ir::ast::{ExprKind, UnaryCondOp};
use ns_ir::{ExprId, TokenKind};

use super::operators::{prefix_op, PrefixOp};
use crate::recovery::TYPE_ONLY_START;
use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_prefix(&mut self) -> Result<ExprId, ParseError> {
        if self.check(TokenKind::Sizeof) {
            return self.parse_sizeof();
        }
        let Some(op) = prefix_op(self.current_kind()) else {
            return self.parse_postfix();
        };
        let start = self.advance().span;
        let operand = self.nested(Self::parse_prefix)?;
        let kind = match op {
            PrefixOp::Arith(op) => ExprKind::Unary { op, operand },
            PrefixOp::Not => ExprKind::UnaryCond {
                op: UnaryCondOp::Not,
                operand,
            },
            PrefixOp::Deref => ExprKind::Deref(operand),
            PrefixOp::AddrOf => ExprKind::AddrOf(operand),
        };
        Ok(self.alloc_expr(kind, start))
    }

    /// `sizeof ( type )` or `sizeof prefix_expr`.
    fn parse_sizeof(&mut self) -> Result<ExprId, ParseError> {
        let start = self.expect(TokenKind::Sizeof)?.span;
        let kind = if self.check(TokenKind::LParen) && self.type_starts_at(1) {
            self.advance();
            let ty = self.parse_type()?;
            self.expect(TokenKind::RParen)?;
            ExprKind::SizeofType(ty)
        } else {
            ExprKind::SizeofExpr(self.nested(Self::parse_prefix)?)
        };
        Ok(self.alloc_expr(kind, start))
    }

    /// Whether the tokens from `n` on can only be a type: any run of `*`
    /// followed by a type-only token.
    fn type_starts_at(&self, mut n: usize) -> bool {
        while self.peek_kind(n) == TokenKind::Star {
            n += 1;
        }
        TYPE_ONLY_START.contains(self.peek_kind(n))
    }
}
