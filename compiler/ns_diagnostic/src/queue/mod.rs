//! Diagnostic queue for collecting, deduplicating, and sorting diagnostics.
//!
//! Every phase reports all of its diagnostics; the queue only drops exact
//! duplicates (same code, primary span and message) and orders the rest by
//! source position. An error cap is a driver decision and is off by default.

use rustc_hash::FxHashSet;

use ns_ir::Span;

use crate::{Diagnostic, ErrorCode};

/// Configuration for diagnostic processing.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct DiagnosticConfig {
    /// Maximum number of errors kept (0 = unlimited).
    pub error_limit: usize,
    /// Drop diagnostics identical to one already queued.
    pub deduplicate: bool,
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        DiagnosticConfig {
            error_limit: 0,
            deduplicate: true,
        }
    }
}

type DedupKey = (ErrorCode, Option<Span>, String);

/// Queue for collecting, deduplicating, and sorting diagnostics.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    seen: FxHashSet<DedupKey>,
    error_count: usize,
    config: DiagnosticConfig,
}

impl DiagnosticQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: DiagnosticConfig) -> Self {
        DiagnosticQueue {
            config,
            ..Self::default()
        }
    }

    /// Add a diagnostic.
    ///
    /// Returns `true` if the diagnostic was kept, `false` if it was filtered.
    pub fn add(&mut self, diag: Diagnostic) -> bool {
        let is_error = diag.is_error();
        if is_error && self.limit_reached() {
            return false;
        }

        if self.config.deduplicate {
            let key = (diag.code, diag.primary_span(), diag.message.clone());
            if !self.seen.insert(key) {
                return false;
            }
        }

        if is_error {
            self.error_count += 1;
        }
        self.diagnostics.push(diag);
        true
    }

    pub fn extend(&mut self, diags: impl IntoIterator<Item = Diagnostic>) {
        for diag in diags {
            self.add(diag);
        }
    }

    /// Check if the error limit has been reached.
    pub fn limit_reached(&self) -> bool {
        self.config.error_limit > 0 && self.error_count >= self.config.error_limit
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all queued diagnostics ordered by primary span start.
    ///
    /// The sort is stable, so diagnostics at the same position keep their
    /// report order. Diagnostics without a span sort first.
    pub fn flush(&mut self) -> Vec<Diagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.sort_by_key(|d| d.primary_span().map(|s| s.start));
        self.seen.clear();
        self.error_count = 0;
        diagnostics
    }
}
