//! Lexer for New Solar using logos with string interning.
//!
//! [`Lexer`] hands out one [`Token`] at a time and keeps returning `Eof`
//! once the input is exhausted. [`lex`] drives it to completion and
//! returns the whole [`TokenList`] together with every error it saw.

mod cook_escape;
mod lex_error;
mod number;
mod raw_token;

use logos::Logos;
use ns_diagnostic::Diagnostic;
use ns_ir::{
    Comment, Encoding, IntLit, LitWidth, Span, StrLit, StringInterner, Token, TokenKind,
    TokenList, TokenValue,
};

use cook_escape::{cook_units, LiteralContext};
pub use lex_error::{LexError, LexErrorKind};
use raw_token::{CommentEnd, RawToken};

/// Per-invocation lexer configuration.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct LexerConfig {
    /// Accept identifiers of the form `_` + uppercase letter, which are
    /// otherwise reserved for library code.
    pub allow_reserved: bool,
}

/// Result of lexing a whole translation unit.
#[derive(Clone, Debug, Default)]
pub struct LexOutput {
    pub tokens: TokenList,
    /// Errors and warnings in source order.
    pub errors: Vec<LexError>,
}

impl LexOutput {
    /// True if any error (not warning) was reported.
    pub fn has_errors(&self) -> bool {
        self.errors.iter().any(|e| !e.is_warning())
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.errors.iter().map(LexError::to_diagnostic)
    }
}

/// Pull-based token stream over one source text.
pub struct Lexer<'a> {
    logos: logos::Lexer<'a, RawToken>,
    interner: &'a StringInterner,
    config: LexerConfig,
    errors: Vec<LexError>,
    comments: Vec<Comment>,
    eof: Option<Token>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, interner: &'a StringInterner, config: LexerConfig) -> Self {
        Lexer {
            logos: RawToken::lexer(source),
            interner,
            config,
            errors: Vec::new(),
            comments: Vec::new(),
            eof: None,
        }
    }

    /// Next token in source order. Returns `Eof` forever once the input is
    /// exhausted.
    pub fn next_token(&mut self) -> Token {
        if let Some(eof) = &self.eof {
            return eof.clone();
        }

        while let Some(raw) = self.logos.next() {
            let span = Span::from_range(self.logos.span());
            let slice = self.logos.slice();
            match raw {
                Ok(raw) => {
                    if let Some(token) = self.cook(raw, slice, span) {
                        return token;
                    }
                }
                Err(()) => {
                    let c = slice.chars().next().unwrap_or('\u{FFFD}');
                    tracing::trace!(?span, "invalid character");
                    self.error(LexErrorKind::InvalidCharacter(c), span);
                }
            }
        }

        let end = u32::try_from(self.logos.source().len()).unwrap_or(u32::MAX);
        let eof = Token::new(TokenKind::Eof, Span::point(end));
        self.eof = Some(eof.clone());
        eof
    }

    /// Errors reported so far.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    /// Consume the lexer, yielding collected comments and errors.
    pub fn finish(self) -> (Vec<Comment>, Vec<LexError>) {
        (self.comments, self.errors)
    }

    fn error(&mut self, kind: LexErrorKind, span: Span) {
        self.errors.push(LexError::new(kind, span));
    }

    fn cook(&mut self, raw: RawToken, slice: &str, span: Span) -> Option<Token> {
        let token = match raw {
            RawToken::LineComment => {
                self.comments.push(Comment {
                    span,
                    text: slice.trim_start_matches('/').trim().to_owned(),
                });
                return None;
            }
            RawToken::BlockComment(end) => {
                let body = slice.strip_prefix("/*").unwrap_or(slice);
                let body = match end {
                    CommentEnd::Closed => body.strip_suffix("*/").unwrap_or(body),
                    CommentEnd::Open => {
                        self.error(LexErrorKind::UnterminatedComment, span);
                        body
                    }
                };
                self.comments.push(Comment {
                    span,
                    text: body.trim().to_owned(),
                });
                return None;
            }
            RawToken::Ident => {
                if !self.config.allow_reserved && is_reserved(slice) {
                    self.error(LexErrorKind::ReservedName(slice.to_owned()), span);
                }
                let name = self.interner.intern(slice);
                Token::with_value(TokenKind::Ident, TokenValue::Name(name), span)
            }
            RawToken::Number => {
                let lit = number::cook_int(slice).unwrap_or_else(|kind| {
                    self.error(kind, span);
                    IntLit {
                        value: 0,
                        width: LitWidth::W16,
                    }
                });
                Token::with_value(TokenKind::Int, TokenValue::Int(lit), span)
            }
            RawToken::Str | RawToken::UnterminatedStr => {
                let terminated = raw == RawToken::Str;
                if !terminated {
                    self.error(LexErrorKind::UnterminatedString, span);
                }
                let (ctx, body) = literal_body(slice, span, terminated, false);
                let units = cook_units(body, ctx, &mut self.errors);
                let lit = StrLit {
                    units,
                    encoding: ctx.encoding,
                };
                Token::with_value(TokenKind::Str, TokenValue::Str(lit), span)
            }
            RawToken::Char | RawToken::UnterminatedChar => {
                let terminated = raw == RawToken::Char;
                let (ctx, body) = literal_body(slice, span, terminated, true);
                let units = cook_units(body, ctx, &mut self.errors);
                if !terminated {
                    self.error(LexErrorKind::UnterminatedChar, span);
                } else if units.is_empty() {
                    self.error(LexErrorKind::EmptyChar, span);
                } else if units.len() > 1 {
                    self.error(LexErrorKind::MultiUnitChar, span);
                }
                // Character literals are always 16 bits wide.
                let lit = IntLit {
                    value: units.first().copied().map_or(0, u32::from),
                    width: LitWidth::W16,
                };
                Token::with_value(TokenKind::Int, TokenValue::Int(lit), span)
            }
            RawToken::Fixed(kind) => Token::new(kind, span),
        };
        Some(token)
    }
}

/// `_` followed by an uppercase letter.
fn is_reserved(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes.next() == Some(b'_') && bytes.next().is_some_and(|b| b.is_ascii_uppercase())
}

/// Strip the encoding prefix and quotes from a char/string literal slice.
fn literal_body(
    slice: &str,
    span: Span,
    terminated: bool,
    is_char: bool,
) -> (LiteralContext, &str) {
    let (encoding, rest) = match slice.strip_prefix(['w', 'W']) {
        Some(rest) => (Encoding::Wide, rest),
        None => (Encoding::Narrow, slice),
    };
    // Skip the opening quote.
    let body = rest.get(1..).unwrap_or("");
    let body = if terminated {
        body.get(..body.len().saturating_sub(1)).unwrap_or("")
    } else {
        body
    };
    let prefix_len = slice.len() - rest.len() + 1;
    let base = span
        .start
        .saturating_add(u32::try_from(prefix_len).unwrap_or(u32::MAX));
    let ctx = LiteralContext {
        encoding,
        is_char,
        base,
    };
    (ctx, body)
}

/// Lex a whole source text.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn lex(source: &str, interner: &StringInterner, config: LexerConfig) -> LexOutput {
    let mut lexer = Lexer::new(source, interner, config);
    let mut tokens = TokenList::new();
    loop {
        let token = lexer.next_token();
        let is_eof = token.kind == TokenKind::Eof;
        tokens.push(token);
        if is_eof {
            break;
        }
    }

    let (comments, errors) = lexer.finish();
    for comment in comments {
        tokens.push_comment(comment);
    }
    tracing::debug!(tokens = tokens.len(), errors = errors.len(), "lexed");
    LexOutput { tokens, errors }
}
