//! Declarations.

use ns_diagnostic::ErrorCode;
use ns_ir::ast::{Decl, DeclKind, Param, ParsedType, TypeKind};
use ns_ir::{DeclId, Name, ParsedTypeId, Span, TokenKind};

use crate::{ParseError, Parser};

/// Modifiers in front of a declaration, with the span of each.
#[derive(Copy, Clone, Debug, Default)]
struct Modifiers {
    declare: Option<Span>,
    is_static: Option<Span>,
    inline: Option<Span>,
}

/// Name, span and leading comment shared by every declaration form.
struct DeclHead {
    start: Span,
    modifiers: Modifiers,
    description: Option<String>,
}

impl Parser<'_> {
    /// Parse a module-level declaration.
    pub(crate) fn parse_decl(&mut self) -> Result<DeclId, ParseError> {
        let head = self.parse_decl_head();
        self.parse_decl_body(head)
    }

    /// Parse a declaration inside a block. Functions cannot be nested.
    pub(crate) fn parse_local_decl(&mut self) -> Result<DeclId, ParseError> {
        let head = self.parse_decl_head();
        if self.check(TokenKind::Fun) {
            return Err(ParseError::new(
                ErrorCode::E1001,
                "functions can only be declared at module level",
                self.current_span(),
            )
            .with_context("nested function"));
        }
        self.parse_decl_body(head)
    }

    fn parse_decl_head(&mut self) -> DeclHead {
        let start = self.current_span();
        let description = self.leading_comment();
        let modifiers = self.parse_modifiers();
        DeclHead {
            start,
            modifiers,
            description,
        }
    }

    fn parse_decl_body(&mut self, head: DeclHead) -> Result<DeclId, ParseError> {
        let decl = match self.current_kind() {
            TokenKind::Fun => self.parse_fun(&head)?,
            TokenKind::Var => self.parse_var(&head)?,
            TokenKind::Const => self.parse_const(&head)?,
            TokenKind::Using => self.parse_using(&head)?,
            TokenKind::Struct | TokenKind::Union => self.parse_record_decl(&head)?,
            found => {
                return Err(ParseError::expected_construct(
                    "a declaration",
                    found,
                    self.current_span(),
                ));
            }
        };
        tracing::trace!(name = ?decl.name, span = ?decl.span, "declaration");
        Ok(self.arena.alloc_decl(decl))
    }

    /// Comments between the previous token and the current one, joined.
    fn leading_comment(&self) -> Option<String> {
        let start = self.previous_span().end;
        let end = self.current_span().start;
        let comments = self.cursor.tokens().comments_between(start, end);
        if comments.is_empty() {
            return None;
        }
        let text: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        Some(text.join("\n"))
    }

    fn parse_modifiers(&mut self) -> Modifiers {
        let mut mods = Modifiers::default();
        loop {
            let span = self.current_span();
            let slot = match self.current_kind() {
                TokenKind::Declare => &mut mods.declare,
                TokenKind::Static => &mut mods.is_static,
                TokenKind::Inline => &mut mods.inline,
                _ => return mods,
            };
            let kind = self.current_kind();
            if slot.is_some() {
                self.report(
                    ParseError::new(
                        ErrorCode::E1003,
                        format!("duplicate modifier {}", kind.display_name()),
                        span,
                    )
                    .with_context("repeated here"),
                );
            }
            *slot = Some(span);
            self.advance();
        }
    }

    /// Report every modifier in `mods` not allowed on a `what` declaration.
    fn reject_modifiers(&mut self, mods: Modifiers, what: &str, allowed: &[TokenKind]) {
        let present = [
            (TokenKind::Declare, mods.declare),
            (TokenKind::Static, mods.is_static),
            (TokenKind::Inline, mods.inline),
        ];
        for (kind, span) in present {
            if let Some(span) = span {
                if !allowed.contains(&kind) {
                    self.report(
                        ParseError::new(
                            ErrorCode::E1003,
                            format!("{} is not allowed on {what}", kind.display_name()),
                            span,
                        )
                        .with_context("invalid modifier"),
                    );
                }
            }
        }
    }

    /// `fun NAME ( params ) [-> type] ( ; | block )`
    fn parse_fun(&mut self, head: &DeclHead) -> Result<Decl, ParseError> {
        self.expect(TokenKind::Fun)?;
        let (name, name_span) = self.cursor.expect_ident()?;

        let sig_start = self.current_span();
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        let mut param_tys = Vec::new();
        let mut variadic = false;
        if !self.check(TokenKind::RParen) {
            loop {
                if self.check(TokenKind::Ellipsis) {
                    variadic = self.parse_variadic_marker()?;
                    break;
                }
                let (param, span) = self.cursor.expect_ident()?;
                self.expect(TokenKind::Colon)?;
                param_tys.push(self.parse_type()?);
                params.push(Param { name: param, span });
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        let ret = self.parse_return_type()?;
        let ty = self.arena.alloc_type(ParsedType::new(
            TypeKind::Func {
                ret,
                params: param_tys,
                variadic,
            },
            self.span_from(sig_start),
        ));

        let body = if self.eat(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_block()?)
        };

        let mods = head.modifiers;
        Ok(self.finish_decl(
            head,
            name,
            name_span,
            ty,
            DeclKind::Func {
                params,
                body,
                is_static: mods.is_static.is_some() || mods.inline.is_some(),
                is_inline: mods.inline.is_some(),
            },
        ))
    }

    /// Consume `...`, which must be the last entry of a parameter list.
    pub(crate) fn parse_variadic_marker(&mut self) -> Result<bool, ParseError> {
        let span = self.expect(TokenKind::Ellipsis)?.span;
        if self.check(TokenKind::Comma) {
            return Err(ParseError::new(
                ErrorCode::E1008,
                "`...` must be the last parameter",
                span,
            )
            .with_context("variadic marker"));
        }
        Ok(true)
    }

    /// `[-> type]`; a missing return type means `void`.
    pub(crate) fn parse_return_type(&mut self) -> Result<ParsedTypeId, ParseError> {
        if self.eat(TokenKind::Arrow) {
            self.parse_type()
        } else {
            let at = Span::point(self.previous_span().end);
            Ok(self.arena.alloc_type(ParsedType::new(TypeKind::Void, at)))
        }
    }

    /// `var NAME : type [:= init] ;`
    fn parse_var(&mut self, head: &DeclHead) -> Result<Decl, ParseError> {
        self.reject_modifiers(
            head.modifiers,
            "a variable",
            &[TokenKind::Declare, TokenKind::Static],
        );
        self.expect(TokenKind::Var)?;
        let (name, name_span) = self.cursor.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        let value = if self.eat(TokenKind::Assign) {
            Some(self.parse_init()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;
        let is_static = head.modifiers.is_static.is_some();
        Ok(self.finish_decl(head, name, name_span, ty, DeclKind::Var { value, is_static }))
    }

    /// `const NAME : type := expr ;`
    fn parse_const(&mut self, head: &DeclHead) -> Result<Decl, ParseError> {
        self.reject_modifiers(head.modifiers, "a constant", &[TokenKind::Static]);
        self.expect(TokenKind::Const)?;
        let (name, name_span) = self.cursor.expect_ident()?;
        self.expect(TokenKind::Colon)?;
        let ty = self.parse_type()?;
        self.expect(TokenKind::Assign)?;
        let value = self.parse_assign_expr()?;
        self.expect(TokenKind::Semicolon)?;
        let is_static = head.modifiers.is_static.is_some();
        Ok(self.finish_decl(head, name, name_span, ty, DeclKind::Const { value, is_static }))
    }

    /// `using NAME := type ;`
    fn parse_using(&mut self, head: &DeclHead) -> Result<Decl, ParseError> {
        self.reject_modifiers(head.modifiers, "a type alias", &[]);
        self.expect(TokenKind::Using)?;
        let (name, name_span) = self.cursor.expect_ident()?;
        self.expect(TokenKind::Assign)?;
        let ty = self.parse_type()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(self.finish_decl(head, name, name_span, ty, DeclKind::Type))
    }

    /// `( struct | union ) NAME record ;`
    fn parse_record_decl(&mut self, head: &DeclHead) -> Result<Decl, ParseError> {
        self.reject_modifiers(head.modifiers, "a record type", &[]);
        let keyword = self.advance();
        let (name, name_span) = self.cursor.expect_ident()?;
        let members = self.parse_record_body()?;
        let kind = if keyword.kind == TokenKind::Union {
            TypeKind::Union(members)
        } else {
            TypeKind::Struct(members)
        };
        let ty = self
            .arena
            .alloc_type(ParsedType::new(kind, self.span_from(keyword.span)));
        self.expect(TokenKind::Semicolon)?;
        Ok(self.finish_decl(head, name, name_span, ty, DeclKind::Type))
    }

    fn finish_decl(
        &self,
        head: &DeclHead,
        name: Name,
        name_span: Span,
        ty: ParsedTypeId,
        kind: DeclKind,
    ) -> Decl {
        let is_declare = match kind {
            DeclKind::Var { .. } | DeclKind::Func { .. } => head.modifiers.declare.is_some(),
            _ => false,
        };
        Decl {
            name,
            name_span,
            ty,
            kind,
            is_declare,
            description: head.description.clone(),
            span: self.span_from(head.start),
        }
    }
}
