//! Checker tests over parsed source.
//!
//! - `declarations`: literals, arrays, redeclaration, constants
//! - `statements`: scopes, labels, return analysis
//! - `expressions`: operators, calls, casts, `sizeof`
//! - `records`: record layout, cycles, bitfields, initializers

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod declarations;
mod statements;

use ns_diagnostic::ErrorCode;
use ns_ir::ast::{DeclKind, ExprKind, StmtKind};
use ns_ir::{ExprId, StmtId, StringInterner};
use ns_lexer::{lex, LexerConfig};
use ns_parse::{parse, ParseOutput};

use crate::{check_module, Symbol, TypeData, TypeId, TypedModule};

struct Checked {
    parsed: ParseOutput,
    typed: TypedModule,
    interner: StringInterner,
}

fn check_source(source: &str) -> Checked {
    let interner = StringInterner::new();
    let lexed = lex(source, &interner, LexerConfig::default());
    assert!(!lexed.has_errors(), "lex errors: {:?}", lexed.errors);
    let parsed = parse(&lexed.tokens, &interner);
    assert!(!parsed.has_errors(), "parse errors: {:?}", parsed.errors);
    let typed = check_module(&parsed.module, &parsed.arena, &interner);
    Checked {
        parsed,
        typed,
        interner,
    }
}

impl Checked {
    fn codes(&self) -> Vec<ErrorCode> {
        self.typed.diagnostics.iter().map(|d| d.code).collect()
    }

    fn assert_clean(&self) {
        assert!(
            self.typed.diagnostics.is_empty(),
            "unexpected diagnostics: {:#?}",
            self.typed.diagnostics
        );
    }

    fn global(&self, name: &str) -> &Symbol {
        self.typed
            .symbols
            .global(self.interner.intern(name))
            .unwrap_or_else(|| panic!("no global `{name}`"))
    }

    /// Initial value of the module-level variable or constant `name`.
    fn global_value(&self, name: &str) -> ExprId {
        let name = self.interner.intern(name);
        self.parsed
            .module
            .decls
            .iter()
            .map(|&id| self.parsed.arena.decl(id))
            .find_map(|decl| match decl.kind {
                DeclKind::Var {
                    value: Some(value), ..
                }
                | DeclKind::Const { value, .. }
                    if decl.name == name =>
                {
                    Some(value)
                }
                _ => None,
            })
            .expect("no initialized global with that name")
    }

    fn fmt(&self, ty: TypeId) -> String {
        self.typed.format_type(ty, &self.interner)
    }

    /// Every expression of the given shape, in allocation order.
    fn exprs_where(&self, pred: impl Fn(&ExprKind) -> bool) -> Vec<ExprId> {
        (0..self.parsed.arena.expr_count())
            .map(|i| ExprId::new(u32::try_from(i).unwrap()))
            .filter(|&id| pred(&self.parsed.arena.expr(id).kind))
            .collect()
    }

    fn stmts_where(&self, pred: impl Fn(&StmtKind) -> bool) -> Vec<StmtId> {
        (0..self.parsed.arena.stmt_count())
            .map(|i| StmtId::new(u32::try_from(i).unwrap()))
            .filter(|&id| pred(&self.parsed.arena.stmt(id).kind))
            .collect()
    }

    fn array_len(&self, ty: TypeId) -> Option<u32> {
        match self.typed.pool.get(ty) {
            TypeData::Array { len, .. } => *len,
            other => panic!("expected an array, got {other:?}"),
        }
    }
}
