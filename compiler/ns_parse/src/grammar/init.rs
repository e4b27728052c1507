//! Initializers.

use ns_diagnostic::ErrorCode;
use ns_ir::ast::{AggregateKind, AggregatePayload, Expr, ExprKind, FieldInit};
use ns_ir::{ExprId, TokenKind};
use rustc_hash::FxHashMap;

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// ```text
    /// init := { [init {, init} [,]] }
    ///       | (struct | union) { [NAME : init {, NAME : init} [,]] }
    ///       | assign_expr
    /// ```
    ///
    /// String literals are ordinary expressions here.
    pub(crate) fn parse_init(&mut self) -> Result<ExprId, ParseError> {
        self.nested(Self::parse_init_inner)
    }

    fn parse_init_inner(&mut self) -> Result<ExprId, ParseError> {
        let start = self.current_span();
        let (kind, payload) = match self.current_kind() {
            TokenKind::LBrace => {
                let open = self.advance().span;
                let mut elements = Vec::new();
                while !self.check(TokenKind::RBrace) && !self.is_at_end() {
                    elements.push(self.parse_init()?);
                    if !self.eat(TokenKind::Comma) {
                        break;
                    }
                }
                self.expect_close_brace(open)?;
                (AggregateKind::Array, AggregatePayload::Elements(elements))
            }
            TokenKind::Struct | TokenKind::Union if self.peek_kind(1) == TokenKind::LBrace => {
                let kind = if self.advance().kind == TokenKind::Union {
                    AggregateKind::Union
                } else {
                    AggregateKind::Struct
                };
                let fields = self.parse_field_inits()?;
                (kind, AggregatePayload::Fields(fields))
            }
            _ => return self.parse_assign_expr(),
        };
        let span = self.span_from(start);
        Ok(self
            .arena
            .alloc_expr(Expr::new(ExprKind::AggregateInit { kind, payload }, span)))
    }

    /// `{ NAME : init, ... }`; a repeated field name is reported and the
    /// repeat dropped.
    fn parse_field_inits(&mut self) -> Result<Vec<FieldInit>, ParseError> {
        let open = self.expect(TokenKind::LBrace)?.span;
        let mut fields = Vec::new();
        let mut seen = FxHashMap::default();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let (name, name_span) = self.cursor.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let value = self.parse_init()?;
            let span = self.span_from(name_span);
            if let Some(&first) = seen.get(&name) {
                let text = self.cursor.interner().lookup(name);
                self.report(
                    ParseError::new(
                        ErrorCode::E1005,
                        format!("field `{text}` is initialized more than once"),
                        name_span,
                    )
                    .with_related(first, "first initialized here"),
                );
            } else {
                seen.insert(name, name_span);
                fields.push(FieldInit { name, value, span });
            }
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_close_brace(open)?;
        Ok(fields)
    }
}
