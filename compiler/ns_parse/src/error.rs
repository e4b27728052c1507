//! Parse errors.

use ns_diagnostic::{Diagnostic, ErrorCode};
use ns_ir::{Span, TokenKind};

/// A parse error at one source location.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    pub span: Span,
    /// Tokens that would have been accepted here, if known.
    pub expected: Vec<TokenKind>,
    /// Short label for the primary span.
    pub context: Option<String>,
    /// Related location, e.g. where an unclosed block was opened.
    pub related: Option<(Span, String)>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        ParseError {
            code,
            message: message.into(),
            span,
            expected: Vec::new(),
            context: None,
            related: None,
        }
    }

    /// `expected one of ..., found ...`.
    #[cold]
    pub fn unexpected(expected: &[TokenKind], found: TokenKind, span: Span) -> Self {
        let wanted = match expected {
            [] => "something else".to_owned(),
            [one] => one.display_name().to_owned(),
            many => {
                let names: Vec<_> = many.iter().map(|k| k.display_name()).collect();
                format!("one of {}", names.join(", "))
            }
        };
        let mut err = ParseError::new(
            ErrorCode::E1001,
            format!("expected {wanted}, found {}", found.display_name()),
            span,
        );
        err.expected = expected.to_vec();
        err
    }

    /// Unexpected token where a named construct was required.
    #[cold]
    pub fn expected_construct(what: &str, found: TokenKind, span: Span) -> Self {
        ParseError::new(
            ErrorCode::E1001,
            format!("expected {what}, found {}", found.display_name()),
            span,
        )
        .with_context(format!("expected {what}"))
    }

    #[cold]
    pub fn unterminated_block(open: Span, eof: Span) -> Self {
        let mut err = ParseError::new(ErrorCode::E1002, "unterminated block", eof);
        err.expected = vec![TokenKind::RBrace];
        err.context = Some("expected `}` before end of file".to_owned());
        err.related = Some((open, "block opened here".to_owned()));
        err
    }

    #[cold]
    pub fn nesting_too_deep(span: Span, limit: u32) -> Self {
        ParseError::new(
            ErrorCode::E1006,
            format!("nesting exceeds the limit of {limit} levels"),
            span,
        )
    }

    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    #[must_use]
    pub fn with_related(mut self, span: Span, label: impl Into<String>) -> Self {
        self.related = Some((span, label.into()));
        self
    }

    /// A fatal error ends parsing of the file.
    pub fn is_fatal(&self) -> bool {
        self.code == ErrorCode::E1002
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.span, self.context.as_deref().unwrap_or("here"));
        if let Some((span, label)) = &self.related {
            diag = diag.with_secondary_label(*span, label);
        }
        diag
    }
}
