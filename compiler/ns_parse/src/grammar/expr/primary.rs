//! Primary expressions.

use ns_diagnostic::ErrorCode;
use ns_ir::ast::ExprKind;
use ns_ir::{ExprId, StrLit, TokenKind, TokenValue};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// `NAME | INT | STR+ | ( expr )`
    pub(super) fn parse_primary(&mut self) -> Result<ExprId, ParseError> {
        let token = self.current();
        let kind = match (token.kind, &token.value) {
            (TokenKind::Ident, TokenValue::Name(name)) => ExprKind::Name(*name),
            (TokenKind::Int, TokenValue::Int(lit)) => ExprKind::Int(*lit),
            (TokenKind::Str, TokenValue::Str(_)) => return self.parse_string(),
            (TokenKind::LParen, _) => {
                self.advance();
                let inner = self.nested(Self::parse_expr)?;
                self.expect(TokenKind::RParen)?;
                return Ok(inner);
            }
            (found, _) => {
                return Err(ParseError::expected_construct(
                    "an expression",
                    found,
                    token.span,
                ));
            }
        };
        self.advance();
        Ok(self.alloc_expr(kind, token.span))
    }

    /// Adjacent string literals concatenate. Mixing narrow and wide
    /// literals is reported and the offending piece dropped.
    fn parse_string(&mut self) -> Result<ExprId, ParseError> {
        let first = self.advance();
        let Some(lit) = first.str_lit() else {
            return Err(ParseError::expected_construct(
                "a string literal",
                first.kind,
                first.span,
            ));
        };
        let mut joined = StrLit {
            units: lit.units.clone(),
            encoding: lit.encoding,
        };

        while self.check(TokenKind::Str) {
            let next = self.advance();
            let Some(piece) = next.str_lit() else {
                continue;
            };
            if piece.encoding == joined.encoding {
                joined.units.extend_from_slice(&piece.units);
            } else {
                self.report(
                    ParseError::new(
                        ErrorCode::E1007,
                        "cannot concatenate narrow and wide string literals",
                        next.span,
                    )
                    .with_related(first.span, "first literal here"),
                );
            }
        }

        Ok(self.alloc_expr(ExprKind::Str(joined), first.span))
    }
}
