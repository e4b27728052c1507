use ns_diagnostic::ErrorCode;
use ns_ir::ast::{ExprKind, StmtKind};
use pretty_assertions::assert_eq;

use super::check_source;
use crate::TypeId;

#[test]
fn test_inner_scope_shadows_outer() {
    let out = check_source(
        "fun f() -> void {
             var x : int16 := 1;
             {
                 var x : int32 := 2l;
                 x := 3l;
             }
             x := 4;
         }",
    );
    out.assert_clean();

    let uses = out.exprs_where(|k| matches!(k, ExprKind::Name(_)));
    assert_eq!(uses.len(), 2);
    let types: Vec<_> = uses
        .iter()
        .map(|&id| {
            let symbol = out.typed.binding(id).unwrap();
            out.typed.symbols.symbol(symbol).ty
        })
        .collect();
    assert_eq!(types, vec![TypeId::INT32, TypeId::INT16]);
}

#[test]
fn test_labeled_break_leaves_outer_loop() {
    let out = check_source(
        "fun f() -> void {
             var i : int16;
             outer: for (i := 0; i < 3; i += 1) {
                 inner: while (1) {
                     break outer;
                 }
                 while (1) {
                     break;
                 }
             }
         }",
    );
    out.assert_clean();

    let outer = out.interner.intern("outer");
    let loops = out.stmts_where(|k| matches!(k, StmtKind::Iter { .. }));
    let for_loop = loops
        .iter()
        .copied()
        .find(|&id| out.parsed.arena.stmt(id).label().is_some_and(|l| l.name == outer))
        .unwrap();
    let unlabeled = loops
        .iter()
        .copied()
        .find(|&id| out.parsed.arena.stmt(id).label().is_none())
        .unwrap();

    let breaks = out.stmts_where(|k| matches!(k, StmtKind::Break { .. }));
    assert_eq!(breaks.len(), 2);
    assert_eq!(out.typed.jump_target(breaks[0]), Some(for_loop));
    assert_eq!(out.typed.jump_target(breaks[1]), Some(unlabeled));
}

#[test]
fn test_breakif_leaves_if() {
    let out = check_source(
        "fun f(a: int16) -> void {
             if (a) {
                 breakif;
             } else {
                 a := 1;
             }
         }",
    );
    out.assert_clean();
    let ifs = out.stmts_where(|k| matches!(k, StmtKind::If { .. }));
    let breaks = out.stmts_where(|k| matches!(k, StmtKind::Break { .. }));
    assert_eq!(out.typed.jump_target(breaks[0]), Some(ifs[0]));
}

#[test]
fn test_jump_without_target() {
    let out = check_source(
        "fun f() -> void {
             continue;
             breakif;
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2005, ErrorCode::E2005]);
}

#[test]
fn test_unknown_label() {
    let out = check_source(
        "fun f() -> void {
             while (1) {
                 break nowhere;
             }
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2002]);
}

#[test]
fn test_breakif_to_loop_label_is_kind_mismatch() {
    let out = check_source(
        "fun f() -> void {
             l: while (1) {
                 breakif l;
             }
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2003]);
}

#[test]
fn test_continue_to_if_label_is_kind_mismatch() {
    let out = check_source(
        "fun f() -> void {
             while (1) {
                 c: if (1) {
                     continue c;
                 }
             }
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2003]);
}

#[test]
fn test_labels_do_not_cross_functions() {
    let out = check_source(
        "fun f() -> void {
             l: while (1) { }
         }
         fun g() -> void {
             break l;
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2002]);
}

#[test]
fn test_missing_return() {
    let out = check_source(
        "fun f(a: int16) -> int16 {
             if (a) {
                 return 1;
             }
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E3012]);
}

#[test]
fn test_always_returning_bodies() {
    let out = check_source(
        "fun f(a: int16) -> int16 {
             if (a) {
                 return 1;
             } else {
                 return 2;
             }
         }
         fun g() -> int16 {
             for (;;) { }
         }
         fun h(a: int16) -> int16 {
             while (a) {
                 a := a - 1;
             } else {
                 return a;
             }
         }",
    );
    out.assert_clean();
}

#[test]
fn test_broken_infinite_loop_can_fall_through() {
    let out = check_source(
        "fun f() -> int16 {
             for (;;) {
                 break;
             }
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E3012]);
}

#[test]
fn test_return_value_checks() {
    let out = check_source(
        "fun f() -> void {
             return 1;
         }
         fun g() -> int16 {
             return;
         }
         declare fun v() -> void;
         fun h() -> int16 {
             return v();
         }",
    );
    assert_eq!(
        out.codes(),
        vec![ErrorCode::E3001, ErrorCode::E3001, ErrorCode::E3014]
    );
}

#[test]
fn test_static_locals_are_recorded() {
    let out = check_source(
        "fun counter() -> int16 {
             static var n : int16 := 0;
             n += 1;
             return n;
         }",
    );
    out.assert_clean();
    assert_eq!(out.typed.static_locals.len(), 1);
    let n = out.typed.symbols.symbol(out.typed.static_locals[0]);
    assert!(n.has_static_storage());
    assert!(!n.is_global);
}

#[test]
fn test_static_local_needs_constant() {
    let out = check_source(
        "fun f(a: int16) -> void {
             static var n : int16 := a;
             var m : int16 := a;
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E3007]);
}

#[test]
fn test_local_redefinition() {
    let out = check_source(
        "fun f(a: int16) -> void {
             var a : int16 := 1;
         }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2001]);
}
