//! Postfix operators: calls, indexing, member access and casts.

use ns_ir::ast::ExprKind;
use ns_ir::{CastSign, ExprId, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    pub(super) fn parse_postfix(&mut self) -> Result<ExprId, ParseError> {
        let mut expr = self.parse_primary()?;
        loop {
            let start = self.expr_span(expr);
            let kind = match self.current_kind() {
                TokenKind::LParen => {
                    self.advance();
                    let args = self.parse_call_args()?;
                    ExprKind::Call { func: expr, args }
                }
                TokenKind::LBracket => {
                    self.advance();
                    let index = self.nested(Self::parse_expr)?;
                    self.expect(TokenKind::RBracket)?;
                    ExprKind::Index { array: expr, index }
                }
                TokenKind::Dot => {
                    self.advance();
                    let (member, member_span) = self.cursor.expect_ident()?;
                    ExprKind::Access {
                        record: expr,
                        member,
                        member_span,
                    }
                }
                TokenKind::Arrow => {
                    self.advance();
                    let record = self.alloc_expr(ExprKind::Deref(expr), start);
                    let (member, member_span) = self.cursor.expect_ident()?;
                    ExprKind::Access {
                        record,
                        member,
                        member_span,
                    }
                }
                kind => match kind.cast_sign() {
                    Some(sign) => {
                        self.advance();
                        let ty = self.parse_type()?;
                        ExprKind::Cast {
                            expr,
                            ty,
                            signed: sign == CastSign::Signed,
                        }
                    }
                    None => return Ok(expr),
                },
            };
            expr = self.alloc_expr(kind, start);
        }
    }

    /// Arguments after `(`, through the closing `)`.
    fn parse_call_args(&mut self) -> Result<Vec<ExprId>, ParseError> {
        let mut args = Vec::new();
        if self.eat(TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.nested(Self::parse_assign_expr)?);
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }
}
