//! Type syntax.

use ns_diagnostic::ErrorCode;
use ns_ir::ast::{IntWidth, MemberData, ParsedType, TypeKind};
use ns_ir::{ParsedTypeId, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Parse a type.
    ///
    /// ```text
    /// type := {volatile} ( void | int16 | int32 | NAME
    ///                    | * type | [ [expr] ] type
    ///                    | fun ( [types] ) [-> type]
    ///                    | struct record | union record
    ///                    | typeof ( expr ) )
    /// ```
    pub(crate) fn parse_type(&mut self) -> Result<ParsedTypeId, ParseError> {
        self.nested(Self::parse_type_inner)
    }

    fn parse_type_inner(&mut self) -> Result<ParsedTypeId, ParseError> {
        let start = self.current_span();
        let mut volatile = false;
        while self.eat(TokenKind::Volatile) {
            volatile = true;
        }

        let kind = match self.current_kind() {
            TokenKind::Void => {
                self.advance();
                TypeKind::Void
            }
            TokenKind::Int16 => {
                self.advance();
                TypeKind::Int(IntWidth::W16)
            }
            TokenKind::Int32 => {
                self.advance();
                TypeKind::Int(IntWidth::W32)
            }
            TokenKind::Ident => {
                let (name, _) = self.cursor.expect_ident()?;
                TypeKind::Ref(name)
            }
            TokenKind::Star => {
                self.advance();
                TypeKind::Array {
                    inner: self.parse_type()?,
                    size: None,
                }
            }
            TokenKind::LBracket => {
                self.advance();
                let size = if self.check(TokenKind::RBracket) {
                    None
                } else {
                    Some(self.parse_expr()?)
                };
                self.expect(TokenKind::RBracket)?;
                TypeKind::Array {
                    inner: self.parse_type()?,
                    size,
                }
            }
            TokenKind::Fun => {
                self.advance();
                self.parse_fun_type()?
            }
            TokenKind::Struct => {
                self.advance();
                TypeKind::Struct(self.parse_record_body()?)
            }
            TokenKind::Union => {
                self.advance();
                TypeKind::Union(self.parse_record_body()?)
            }
            TokenKind::Typeof => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                TypeKind::Typeof(expr)
            }
            found => {
                return Err(ParseError::expected_construct(
                    "a type",
                    found,
                    self.current_span(),
                ));
            }
        };

        let mut ty = ParsedType::new(kind, self.span_from(start));
        ty.volatile = volatile;
        Ok(self.arena.alloc_type(ty))
    }

    /// `( [type {, type}] [, ...] ) [-> type]`, after `fun`.
    fn parse_fun_type(&mut self) -> Result<TypeKind, ParseError> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        let mut variadic = false;
        if !self.check(TokenKind::RParen) {
            loop {
                if self.check(TokenKind::Ellipsis) {
                    variadic = self.parse_variadic_marker()?;
                    break;
                }
                params.push(self.parse_type()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        let ret = self.parse_return_type()?;
        Ok(TypeKind::Func {
            ret,
            params,
            variadic,
        })
    }

    /// `{ NAME : type [: INT] {, ...} [,] }`
    pub(crate) fn parse_record_body(&mut self) -> Result<Vec<MemberData>, ParseError> {
        let open = self.expect(TokenKind::LBrace)?.span;
        let mut members = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.is_at_end() {
            let (name, name_span) = self.cursor.expect_ident()?;
            self.expect(TokenKind::Colon)?;
            let ty = self.parse_type()?;
            let bits = if self.eat(TokenKind::Colon) {
                let (lit, _) = self.cursor.expect_int()?;
                Some(lit.value)
            } else {
                None
            };
            members.push(MemberData {
                name,
                ty,
                bits,
                span: self.span_from(name_span),
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        self.expect_close_brace(open)?;

        if members.is_empty() {
            self.report(
                ParseError::new(
                    ErrorCode::E1004,
                    "a record needs at least one member",
                    self.span_from(open),
                )
                .with_context("empty record"),
            );
        }
        Ok(members)
    }
}
