//! Token cursor for navigating the token stream.

use ns_ir::{IntLit, Name, Span, StringInterner, Token, TokenKind, TokenList};

use crate::ParseError;

/// Position in a [`TokenList`] with lookahead and consumption helpers.
///
/// The list always ends with `Eof` and the cursor never moves past it.
pub struct Cursor<'a> {
    tokens: &'a TokenList,
    interner: &'a StringInterner,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Cursor {
            tokens,
            interner,
            pos: 0,
        }
    }

    pub fn interner(&self) -> &'a StringInterner {
        self.interner
    }

    pub fn tokens(&self) -> &'a TokenList {
        self.tokens
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn current(&self) -> &'a Token {
        self.peek_nth(0)
    }

    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Span of the last consumed token.
    pub fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map_or(Span::DUMMY, |t| t.span)
    }

    /// Token `n` positions ahead; saturates at `Eof`.
    pub fn peek_nth(&self, n: usize) -> &'a Token {
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[(self.pos + n).min(last)]
    }

    #[inline]
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.peek_nth(n).kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current_kind() == TokenKind::Eof
    }

    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == kind
    }

    /// Consume the current token. At `Eof` the cursor stays put.
    pub fn advance(&mut self) -> &'a Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// Consume the current token if it is `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.make_expect_error(kind))
        }
    }

    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, kind: TokenKind) -> ParseError {
        ParseError::unexpected(&[kind], self.current_kind(), self.current_span())
            .with_context(format!("expected {}", kind.display_name()))
    }

    /// Expect an identifier and return its name and span.
    pub fn expect_ident(&mut self) -> Result<(Name, Span), ParseError> {
        let token = self.current();
        match token.name() {
            Some(name) if token.kind == TokenKind::Ident => {
                self.advance();
                Ok((name, token.span))
            }
            _ => Err(ParseError::expected_construct(
                "identifier",
                token.kind,
                token.span,
            )),
        }
    }

    /// Expect an integer literal and return its value.
    pub fn expect_int(&mut self) -> Result<(IntLit, Span), ParseError> {
        let token = self.current();
        match token.int() {
            Some(lit) if token.kind == TokenKind::Int => {
                self.advance();
                Ok((lit, token.span))
            }
            _ => Err(ParseError::expected_construct(
                "integer literal",
                token.kind,
                token.span,
            )),
        }
    }
}
