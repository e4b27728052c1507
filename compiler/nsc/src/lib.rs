//! New Solar compiler front end.
//!
//! Drives one translation unit through the pipeline:
//!
//! ```text
//! source ──lex──▶ tokens ──parse──▶ Module ──check──▶ TypedModule
//! ```
//!
//! Every phase runs even when an earlier one reported errors, so one call
//! collects as many independent diagnostics as possible. Whether a result
//! with errors is lowered any further is the caller's decision.
//!
//! Each call owns all of its state; separate files can be compiled on
//! separate threads.

use std::fmt;
use std::sync::Once;

use ns_diagnostic::{Diagnostic, DiagnosticQueue, LineCol, LineOffsetTable};
use ns_ir::ast::Module;
use ns_ir::{AstArena, StringInterner, TokenList};
use ns_lexer::LexerConfig;
use ns_types::TypedModule;

/// Identifies the translation unit a diagnostic belongs to.
///
/// Chosen by the caller; the front end only carries it along.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct SourceId(pub u32);

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Options for one compilation.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default)]
pub struct CompileOptions {
    /// Accept `_` + uppercase identifiers reserved for library code.
    pub allow_reserved: bool,
    pub source_id: SourceId,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn allow_reserved(mut self, allow: bool) -> Self {
        self.allow_reserved = allow;
        self
    }

    #[must_use]
    pub fn source_id(mut self, id: SourceId) -> Self {
        self.source_id = id;
        self
    }

    fn lexer_config(self) -> LexerConfig {
        LexerConfig {
            allow_reserved: self.allow_reserved,
        }
    }
}

/// Everything the front end produced for one translation unit.
#[derive(Debug)]
pub struct CompileOutput {
    pub source_id: SourceId,
    pub interner: StringInterner,
    pub tokens: TokenList,
    pub module: Module,
    pub arena: AstArena,
    pub typed: TypedModule,
    /// Diagnostics of every phase, ordered by position.
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileOutput {
    /// True if any diagnostic is an error. Such output is not fit for
    /// lowering.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }
}

/// A diagnostic placed in its source file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Located<'a> {
    pub source_id: SourceId,
    /// Start of the primary span, when there is one.
    pub location: Option<LineCol>,
    pub diagnostic: &'a Diagnostic,
}

impl fmt::Display for Located<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location {
            Some(at) => write!(f, "{}:{}:{}: ", self.source_id, at.line, at.col)?,
            None => write!(f, "{}: ", self.source_id)?,
        }
        write!(
            f,
            "{} [{}]: {}",
            self.diagnostic.severity, self.diagnostic.code, self.diagnostic.message
        )
    }
}

impl CompileOutput {
    /// Diagnostics with their file and 1-based line and column.
    pub fn located<'a>(&'a self, source: &str) -> Vec<Located<'a>> {
        let table = LineOffsetTable::build(source);
        self.diagnostics
            .iter()
            .map(|diagnostic| Located {
                source_id: self.source_id,
                location: diagnostic.location(&table, source),
                diagnostic,
            })
            .collect()
    }
}

/// Lex, parse and check one translation unit.
#[tracing::instrument(level = "debug", skip_all, fields(source_id = %options.source_id, len = source.len()))]
pub fn compile(source: &str, options: &CompileOptions) -> CompileOutput {
    let interner = StringInterner::new();
    let mut queue = DiagnosticQueue::new();

    let lexed = ns_lexer::lex(source, &interner, options.lexer_config());
    queue.extend(lexed.diagnostics());

    let parsed = ns_parse::parse(&lexed.tokens, &interner);
    queue.extend(parsed.diagnostics());

    let mut typed = ns_types::check_module(&parsed.module, &parsed.arena, &interner);
    queue.extend(std::mem::take(&mut typed.diagnostics));

    let diagnostics = queue.flush();
    tracing::debug!(
        diagnostics = diagnostics.len(),
        errors = diagnostics.iter().filter(|d| d.is_error()).count(),
        "compiled"
    );

    CompileOutput {
        source_id: options.source_id,
        interner,
        tokens: lexed.tokens,
        module: parsed.module,
        arena: parsed.arena,
        typed,
        diagnostics,
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a tracing subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once.
/// Enable with e.g. `RUST_LOG=ns_types=debug` or `RUST_LOG=nsc=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
