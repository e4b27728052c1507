//! Shared helpers for phase tests.

use ns_diagnostic::{ErrorCode, ErrorKind};
use ns_ir::ast::{DeclKind, ExprKind, StmtKind};
use ns_ir::{ExprId, StmtId};
use ns_types::{Symbol, TypeData, TypeId};
use nsc::{compile, CompileOptions, CompileOutput};

/// Compile with default options.
pub fn compile_ok(source: &str) -> CompileOutput {
    nsc::init_tracing();
    let output = compile(source, &CompileOptions::default());
    assert!(
        !output.has_errors(),
        "unexpected diagnostics:\n{}",
        output
            .located(source)
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    );
    output
}

/// Compile with default options, keeping any diagnostics.
pub fn compile_any(source: &str) -> CompileOutput {
    nsc::init_tracing();
    compile(source, &CompileOptions::default())
}

pub fn codes(output: &CompileOutput) -> Vec<ErrorCode> {
    output.diagnostics.iter().map(|d| d.code).collect()
}

pub fn kinds(output: &CompileOutput) -> Vec<ErrorKind> {
    output.diagnostics.iter().map(|d| d.kind()).collect()
}

pub fn global<'a>(output: &'a CompileOutput, name: &str) -> &'a Symbol {
    output
        .typed
        .symbols
        .global(output.interner.intern(name))
        .unwrap_or_else(|| panic!("no global `{name}`"))
}

/// Initial value of the module-level variable `name`.
pub fn global_value(output: &CompileOutput, name: &str) -> ExprId {
    let name = output.interner.intern(name);
    output
        .module
        .decls
        .iter()
        .map(|&id| output.arena.decl(id))
        .find_map(|decl| match decl.kind {
            DeclKind::Var {
                value: Some(value), ..
            } if decl.name == name => Some(value),
            _ => None,
        })
        .expect("no initialized global with that name")
}

pub fn int_width_bits(output: &CompileOutput, ty: TypeId) -> u32 {
    match output.typed.pool.get(ty) {
        TypeData::Int(width) => width.bits(),
        other => panic!("expected an integer type, got {other:?}"),
    }
}

pub fn array_len(output: &CompileOutput, ty: TypeId) -> Option<u32> {
    match output.typed.pool.get(ty) {
        TypeData::Array { len, .. } => *len,
        other => panic!("expected an array type, got {other:?}"),
    }
}

pub fn stmts_where(output: &CompileOutput, pred: impl Fn(&StmtKind) -> bool) -> Vec<StmtId> {
    (0..output.arena.stmt_count())
        .map(|i| StmtId::new(u32::try_from(i).unwrap()))
        .filter(|&id| pred(&output.arena.stmt(id).kind))
        .collect()
}

pub fn exprs_where(output: &CompileOutput, pred: impl Fn(&ExprKind) -> bool) -> Vec<ExprId> {
    (0..output.arena.expr_count())
        .map(|i| ExprId::new(u32::try_from(i).unwrap()))
        .filter(|&id| pred(&output.arena.expr(id).kind))
        .collect()
}
