use std::fmt;

use ns_ir::Span;

use crate::span_utils::{LineCol, LineOffsetTable};
use crate::{ErrorCode, ErrorKind};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A labeled span with a message.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub is_primary: bool,
}

impl Label {
    /// Create a primary label (the main error location).
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a secondary label (related context, e.g. a previous definition).
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Label {
            span,
            message: message.into(),
            is_primary: false,
        }
    }
}

/// A diagnostic carrying everything needed to report one problem.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[must_use = "diagnostics should be reported or returned, not silently dropped"]
pub struct Diagnostic {
    /// Error code for searchability.
    pub code: ErrorCode,
    pub severity: Severity,
    /// Main error message.
    pub message: String,
    /// Labeled spans showing where the error occurred.
    pub labels: Vec<Label>,
    /// Additional notes providing context.
    pub notes: Vec<String>,
}

impl Diagnostic {
    fn new_with_severity(code: ErrorCode, severity: Severity) -> Self {
        Diagnostic {
            code,
            severity,
            message: String::new(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Error)
    }

    /// Create a new warning diagnostic.
    pub fn warning(code: ErrorCode) -> Self {
        Self::new_with_severity(code, Severity::Warning)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add a primary label at the error location.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label for context.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Taxonomy tag of this diagnostic's code.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Get the primary span (first primary label's span).
    pub fn primary_span(&self) -> Option<Span> {
        self.labels.iter().find(|l| l.is_primary).map(|l| l.span)
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }

    /// 1-based line/column of the primary span's start.
    pub fn location(&self, table: &LineOffsetTable, source: &str) -> Option<LineCol> {
        self.primary_span()
            .map(|span| table.line_col(source, span.start))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.code, self.message)?;

        for label in &self.labels {
            let marker = if label.is_primary { "-->" } else { "   " };
            write!(f, "\n  {} {:?}: {}", marker, label.span, label.message)?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}

// Constructors for the most common diagnostics.

/// Create a type mismatch diagnostic.
pub fn type_mismatch(span: Span, expected: &str, found: &str, context: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3001)
        .with_message(format!(
            "type mismatch: expected `{expected}`, found `{found}`"
        ))
        .with_label(span, format!("expected `{expected}` {context}"))
}

/// Create an unexpected token diagnostic.
pub fn unexpected_token(span: Span, expected: &str, found: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1001)
        .with_message(format!("unexpected token: expected {expected}, found {found}"))
        .with_label(span, format!("expected {expected}"))
}

/// Create an unknown name diagnostic.
pub fn unknown_name(span: Span, name: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E2004)
        .with_message(format!("cannot find `{name}` in this scope"))
        .with_label(span, "not found in this scope")
}

/// Create an invalid operands diagnostic for operator `op`.
pub fn invalid_operands(span: Span, op: &str, left: &str, right: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3004)
        .with_message(format!(
            "invalid operands to `{op}`: `{left}` and `{right}`"
        ))
        .with_label(span, format!("`{op}` cannot be applied to these operands"))
}

/// Create an incompatible cast diagnostic.
pub fn incompatible_cast(span: Span, from: &str, to: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E3002)
        .with_message(format!("cannot cast `{from}` to `{to}`"))
        .with_label(span, "invalid cast")
}
