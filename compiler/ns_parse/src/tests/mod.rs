//! Parser tests.
//!
//! - `parser`: declarations, types, statements and expressions
//! - `errors`: error reporting and recovery

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod errors;

use ns_diagnostic::ErrorCode;
use ns_ir::ast::{Decl, DeclKind, Expr, StmtKind};
use ns_ir::{StmtId, StringInterner};
use ns_lexer::{lex, LexerConfig};

use crate::{parse, ParseOutput};

fn parse_source(source: &str) -> (ParseOutput, StringInterner) {
    let interner = StringInterner::new();
    let lexed = lex(source, &interner, LexerConfig::default());
    assert!(!lexed.has_errors(), "lex errors: {:?}", lexed.errors);
    let output = parse(&lexed.tokens, &interner);
    (output, interner)
}

fn codes(output: &ParseOutput) -> Vec<ErrorCode> {
    output.errors.iter().map(|e| e.code).collect()
}

fn decl(output: &ParseOutput, index: usize) -> &Decl {
    output.arena.decl(output.module.decls[index])
}

/// Value of the first declaration, which must be a `const`.
fn const_value(output: &ParseOutput) -> &Expr {
    match &decl(output, 0).kind {
        DeclKind::Const { value, .. } => output.arena.expr(*value),
        other => panic!("expected a constant, got {other:?}"),
    }
}

/// Statements of the body of the first declaration, which must be a
/// function definition.
fn body_stmts(output: &ParseOutput) -> Vec<StmtId> {
    let DeclKind::Func {
        body: Some(body), ..
    } = &decl(output, 0).kind
    else {
        panic!("expected a function definition");
    };
    match &output.arena.stmt(*body).kind {
        StmtKind::Compound(stmts) => stmts.clone(),
        other => panic!("expected a block, got {other:?}"),
    }
}
