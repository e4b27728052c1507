//! Recursive descent parser for New Solar.
//!
//! Produces a [`Module`] whose nodes live in an [`AstArena`]. Expressions
//! use precedence climbing; the type and expression grammars call into each
//! other (`typeof(expr)`, `sizeof(type)`), so every recursive entry point
//! goes through [`Parser::nested`], which grows the stack and enforces a
//! nesting limit.

mod cursor;
mod error;
mod grammar;
mod recovery;

pub use cursor::Cursor;
pub use error::ParseError;
pub use recovery::{synchronize, TokenSet};

use ns_diagnostic::Diagnostic;
use ns_ir::ast::Module;
use ns_ir::{AstArena, Span, StringInterner, Token, TokenKind, TokenList};
use ns_stack::{ensure_sufficient_stack, NestingBudget};

/// Output of parsing one translation unit.
#[derive(Clone, Debug, Default)]
pub struct ParseOutput {
    pub module: Module,
    pub arena: AstArena,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(ParseError::to_diagnostic)
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    arena: AstArena,
    budget: NestingBudget,
    /// Errors already recovered from.
    errors: Vec<ParseError>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a TokenList, interner: &'a StringInterner) -> Self {
        Parser {
            cursor: Cursor::new(tokens, interner),
            arena: AstArena::new(),
            budget: NestingBudget::default(),
            errors: Vec::new(),
        }
    }

    /// Use a nesting limit other than the default.
    #[must_use]
    pub fn with_nesting_limit(mut self, limit: u32) -> Self {
        self.budget = NestingBudget::new(limit);
        self
    }

    #[inline]
    fn current(&self) -> &'a Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn previous_span(&self) -> Span {
        self.cursor.previous_span()
    }

    #[inline]
    fn peek_kind(&self, n: usize) -> TokenKind {
        self.cursor.peek_kind(n)
    }

    #[inline]
    fn is_at_end(&self) -> bool {
        self.cursor.is_at_end()
    }

    #[inline]
    fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    #[inline]
    fn advance(&mut self) -> &'a Token {
        self.cursor.advance()
    }

    #[inline]
    fn eat(&mut self, kind: TokenKind) -> bool {
        self.cursor.eat(kind)
    }

    #[inline]
    fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        self.cursor.expect(kind)
    }

    /// Span from `start` to the end of the last consumed token.
    fn span_from(&self, start: Span) -> Span {
        start.merge(self.previous_span())
    }

    /// Run `f` one nesting level deeper, with stack growth.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if let Err(exceeded) = self.budget.enter() {
            return Err(ParseError::nesting_too_deep(
                self.current_span(),
                exceeded.limit,
            ));
        }
        let result = ensure_sufficient_stack(|| f(self));
        self.budget.exit();
        result
    }

    /// Record a recoverable error and resynchronize.
    fn recover(&mut self, error: ParseError) {
        tracing::debug!(code = %error.code, span = ?error.span, "parse error, recovering");
        self.errors.push(error);
        synchronize(&mut self.cursor);
    }

    /// Record an error that needs no resynchronization.
    fn report(&mut self, error: ParseError) {
        tracing::debug!(code = %error.code, span = ?error.span, "parse error");
        self.errors.push(error);
    }

    /// Parse the whole token list into a module.
    pub fn parse_module(mut self) -> ParseOutput {
        let mut module = Module::default();

        while !self.is_at_end() {
            let before = self.cursor.position();
            match self.parse_decl() {
                Ok(decl) => module.decls.push(decl),
                Err(error) if error.is_fatal() => {
                    self.report(error);
                    break;
                }
                Err(error) => {
                    self.recover(error);
                    // A stray `}` at top level stops synchronization without
                    // consuming anything.
                    if self.cursor.position() == before {
                        self.advance();
                    }
                }
            }
        }

        ParseOutput {
            module,
            arena: self.arena,
            errors: self.errors,
        }
    }
}

/// Parse a token list into a module.
#[tracing::instrument(level = "debug", skip_all, fields(tokens = tokens.len()))]
pub fn parse(tokens: &TokenList, interner: &StringInterner) -> ParseOutput {
    let output = Parser::new(tokens, interner).parse_module();
    tracing::debug!(
        decls = output.module.decls.len(),
        errors = output.errors.len(),
        "parsed"
    );
    output
}

#[cfg(test)]
mod tests;
