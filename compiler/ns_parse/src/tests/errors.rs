//! Error reporting and recovery.

use ns_diagnostic::ErrorCode;
use ns_ir::ast::{AggregatePayload, DeclKind, ExprKind, StmtKind};
use ns_ir::StringInterner;
use ns_lexer::{lex, LexerConfig};
use pretty_assertions::assert_eq;

use super::{body_stmts, codes, decl, parse_source};
use crate::Parser;

#[test]
fn test_unexpected_token_recovers_at_semicolon() {
    let (out, interner) = parse_source("var x: int16 := ; var y: int16;");
    assert_eq!(codes(&out), vec![ErrorCode::E1001]);
    assert_eq!(out.module.decls.len(), 1);
    assert_eq!(interner.lookup(decl(&out, 0).name), "y");
}

#[test]
fn test_statement_errors_recover_inside_block() {
    let (out, _) = parse_source("fun f() { x := ; y := 1; } var z: int16;");
    assert_eq!(codes(&out), vec![ErrorCode::E1001]);
    assert_eq!(out.module.decls.len(), 2);
    assert_eq!(body_stmts(&out).len(), 1);
}

#[test]
fn test_multiple_errors_are_all_reported() {
    let (out, _) = parse_source("var a: := 1; var b: int16 := ); var c: int16;");
    assert_eq!(codes(&out), vec![ErrorCode::E1001, ErrorCode::E1001]);
    assert_eq!(out.module.decls.len(), 1);
}

#[test]
fn test_stray_close_brace_at_top_level() {
    let (out, _) = parse_source("} var a: int16;");
    assert_eq!(codes(&out), vec![ErrorCode::E1001]);
    assert_eq!(out.module.decls.len(), 1);
}

#[test]
fn test_duplicate_modifier() {
    let (out, _) = parse_source("static static var x: int16;");
    assert_eq!(codes(&out), vec![ErrorCode::E1003]);
    assert!(matches!(
        decl(&out, 0).kind,
        DeclKind::Var {
            is_static: true,
            ..
        }
    ));
}

#[test]
fn test_modifier_not_allowed() {
    let (out, _) = parse_source("inline var x: int16; declare const k: int16 := 1; static using W := int16;");
    assert_eq!(
        codes(&out),
        vec![ErrorCode::E1003, ErrorCode::E1003, ErrorCode::E1003]
    );
    assert_eq!(out.module.decls.len(), 3);
    assert!(!decl(&out, 1).is_declare);
}

#[test]
fn test_empty_record() {
    let (out, _) = parse_source("struct S {}; var u: union {};");
    assert_eq!(codes(&out), vec![ErrorCode::E1004, ErrorCode::E1004]);
    assert_eq!(out.module.decls.len(), 2);
}

#[test]
fn test_duplicate_field_initializer() {
    let (out, interner) = parse_source("var s: S := struct { a: 1, b: 2, a: 3 };");
    assert_eq!(codes(&out), vec![ErrorCode::E1005]);
    let error = &out.errors[0];
    assert!(error.message.contains("`a`"));
    assert!(error.related.is_some());

    let DeclKind::Var {
        value: Some(value), ..
    } = &decl(&out, 0).kind
    else {
        panic!("expected an initialized variable");
    };
    let ExprKind::AggregateInit {
        payload: AggregatePayload::Fields(fields),
        ..
    } = &out.arena.expr(*value).kind
    else {
        panic!("expected a struct initializer");
    };
    let names: Vec<_> = fields.iter().map(|f| interner.lookup(f.name)).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_unterminated_block_is_fatal() {
    let (out, _) = parse_source("fun f() { return 1;\nvar x: int16;");
    assert_eq!(codes(&out), vec![ErrorCode::E1002]);
    assert!(out.errors[0].is_fatal());
    assert!(out.errors[0].related.is_some());
    assert!(out.module.decls.is_empty());
}

#[test]
fn test_mixed_string_encodings() {
    let (out, _) = parse_source(r#"var s: *int16 := "ab" w"cd";"#);
    assert_eq!(codes(&out), vec![ErrorCode::E1007]);
    let DeclKind::Var {
        value: Some(value), ..
    } = &decl(&out, 0).kind
    else {
        panic!("expected an initialized variable");
    };
    let ExprKind::Str(lit) = &out.arena.expr(*value).kind else {
        panic!("expected a string");
    };
    assert_eq!(lit.units, vec![0x61, 0x62]);
}

#[test]
fn test_variadic_marker_must_be_last() {
    let (out, _) = parse_source("declare fun f(..., a: int16); var x: int16;");
    assert_eq!(codes(&out), vec![ErrorCode::E1008]);
    assert_eq!(out.module.decls.len(), 1);
}

#[test]
fn test_nested_function_rejected() {
    let (out, _) = parse_source("fun f() { fun g(); return; }");
    assert_eq!(codes(&out), vec![ErrorCode::E1001]);
    let stmts = body_stmts(&out);
    assert_eq!(stmts.len(), 1);
    assert!(matches!(
        out.arena.stmt(stmts[0]).kind,
        StmtKind::Return(None)
    ));
}

#[test]
fn test_label_must_precede_if_or_loop() {
    let (out, _) = parse_source("fun f() { here: return; }");
    assert_eq!(codes(&out), vec![ErrorCode::E1001]);
}

#[test]
fn test_nesting_limit() {
    let interner = StringInterner::new();
    let source = format!("const c: int16 := {}1{};", "(".repeat(40), ")".repeat(40));
    let lexed = lex(&source, &interner, LexerConfig::default());
    let out = Parser::new(&lexed.tokens, &interner)
        .with_nesting_limit(16)
        .parse_module();
    assert_eq!(codes(&out), vec![ErrorCode::E1006]);
    assert!(out.module.decls.is_empty());
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let source = format!("const c: int16 := {}1{};", "(".repeat(5000), ")".repeat(5000));
    let (out, _) = parse_source(&source);
    assert_eq!(codes(&out), vec![ErrorCode::E1006]);
}

#[test]
fn test_diagnostics_carry_codes() {
    let (out, _) = parse_source("var x: int16 := ;");
    let diagnostics: Vec<_> = out.diagnostics().collect();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E1001);
    assert!(diagnostics[0].is_error());
}
