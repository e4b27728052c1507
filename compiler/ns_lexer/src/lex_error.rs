//! Lexer errors.
//!
//! Every error carries the offending span. The lexer never stops on an
//! error: it records it and keeps producing tokens.

use ns_diagnostic::{Diagnostic, ErrorCode};
use ns_ir::Span;
use thiserror::Error;

/// A lexer error (or warning) at a source span.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

/// What went wrong.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    #[error("invalid digit `{digit}` in a base-{base} integer literal")]
    InvalidDigit { digit: char, base: u32 },
    #[error("integer literal has no digits after its base prefix")]
    MissingDigits,
    #[error("integer literal does not fit in {bits} bits")]
    IntOverflow { bits: u32 },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("unterminated character literal")]
    UnterminatedChar,
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("invalid escape sequence: {0}")]
    InvalidEscape(&'static str),
    #[error("unknown escape sequence `\\{0}`")]
    UnknownEscape(char),
    #[error("invalid character `{0}` in source")]
    InvalidCharacter(char),
    #[error("empty character literal")]
    EmptyChar,
    #[error("character literal must contain exactly one code unit")]
    MultiUnitChar,
    #[error("`{ch}` cannot be represented in a {encoding} literal")]
    NotRepresentable { ch: char, encoding: &'static str },
    #[error("`{0}` is reserved for library code")]
    ReservedName(String),
}

impl LexErrorKind {
    pub fn code(&self) -> ErrorCode {
        match self {
            LexErrorKind::InvalidDigit { .. }
            | LexErrorKind::MissingDigits
            | LexErrorKind::IntOverflow { .. } => ErrorCode::E0001,
            LexErrorKind::UnterminatedString | LexErrorKind::UnterminatedChar => ErrorCode::E0002,
            LexErrorKind::UnterminatedComment => ErrorCode::E0003,
            LexErrorKind::InvalidEscape(_) => ErrorCode::E0004,
            LexErrorKind::InvalidCharacter(_) => ErrorCode::E0005,
            LexErrorKind::EmptyChar | LexErrorKind::MultiUnitChar => ErrorCode::E0006,
            LexErrorKind::NotRepresentable { .. } => ErrorCode::E0007,
            LexErrorKind::ReservedName(_) => ErrorCode::E0008,
            LexErrorKind::UnknownEscape(_) => ErrorCode::W0001,
        }
    }
}

impl LexError {
    #[cold]
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    pub fn code(&self) -> ErrorCode {
        self.kind.code()
    }

    pub fn is_warning(&self) -> bool {
        self.code().is_warning()
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = self.code();
        let diag = if code.is_warning() {
            Diagnostic::warning(code)
        } else {
            Diagnostic::error(code)
        };
        let diag = diag
            .with_message(self.kind.to_string())
            .with_label(self.span, label_for(&self.kind));
        match &self.kind {
            LexErrorKind::ReservedName(_) => {
                diag.with_note("names starting with `_` and an uppercase letter are reserved")
            }
            LexErrorKind::UnknownEscape(c) => {
                diag.with_note(format!("the escape is read as a literal `{c}`"))
            }
            _ => diag,
        }
    }
}

fn label_for(kind: &LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnterminatedString
        | LexErrorKind::UnterminatedChar
        | LexErrorKind::UnterminatedComment => "literal starts here",
        LexErrorKind::InvalidEscape(_) | LexErrorKind::UnknownEscape(_) => "in this escape",
        LexErrorKind::ReservedName(_) => "reserved identifier",
        _ => "here",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ns_diagnostic::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_codes_map_to_lex_taxonomy() {
        let reserved = LexErrorKind::ReservedName("_Foo".into());
        assert_eq!(reserved.code().kind(), ErrorKind::ReservedName);
        assert_eq!(
            LexErrorKind::IntOverflow { bits: 16 }.code().kind(),
            ErrorKind::Malformed
        );
    }

    #[test]
    fn test_unknown_escape_is_warning() {
        let err = LexError::new(LexErrorKind::UnknownEscape('q'), Span::new(3, 5));
        let diag = err.to_diagnostic();
        assert!(!diag.is_error());
        assert_eq!(diag.message, "unknown escape sequence `\\q`");
        assert_eq!(diag.primary_span(), Some(Span::new(3, 5)));
    }
}
