use ns_diagnostic::ErrorCode;
use pretty_assertions::assert_eq;

use super::check_source;
use crate::TypeId;

#[test]
fn test_integer_literal_widths() {
    let out = check_source(
        "var a : int16 := 42;
         var b : int32 := 42l;",
    );
    out.assert_clean();

    let a = out.global_value("a");
    let b = out.global_value("b");
    assert_eq!(out.typed.expr_type(a), TypeId::INT16);
    assert_eq!(out.typed.const_value(a), Some(42));
    assert_eq!(out.typed.expr_type(b), TypeId::INT32);
    assert_eq!(out.typed.const_value(b), Some(42));
}

#[test]
fn test_array_size_from_initializer() {
    let out = check_source(
        "var a : []int16 := {1, 2, 3};
         var b : [5]int16 := {1, 2};",
    );
    out.assert_clean();
    assert_eq!(out.array_len(out.global("a").ty), Some(3));
    assert_eq!(out.fmt(out.global("a").ty), "[3]int16");
    assert_eq!(out.array_len(out.global("b").ty), Some(5));
}

#[test]
fn test_too_many_initializers() {
    let out = check_source("var c : [2]int16 := {1, 2, 3};");
    assert_eq!(out.codes(), vec![ErrorCode::E3006]);
}

#[test]
fn test_declarations_merge_with_one_definition() {
    let out = check_source(
        "declare fun f() -> int16;
         declare fun f() -> int16;
         fun f() -> int16 { return 0; }",
    );
    out.assert_clean();
    let f = out.global("f");
    assert!(f.defined);
    assert!(f.definition.is_some());
}

#[test]
fn test_second_definition_is_redefinition() {
    let out = check_source(
        "declare fun f() -> int16;
         fun f() -> int16 { return 0; }
         fun f() -> int16 { return 1; }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2001]);
}

#[test]
fn test_declarations_must_agree_on_type() {
    let out = check_source(
        "declare fun f() -> int16;
         fun f() -> int32 { return 0; }",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2006]);
}

#[test]
fn test_global_needs_value_or_declare() {
    let out = check_source(
        "declare var x : int16;
         var y : int16;",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E3013]);
}

#[test]
fn test_function_needs_body_or_declare() {
    let out = check_source("fun f() -> void;");
    assert_eq!(out.codes(), vec![ErrorCode::E3013]);
}

#[test]
fn test_global_initializer_must_be_constant() {
    let out = check_source(
        "var a : int16 := 1;
         var b : int16 := a;",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E3007]);
}

#[test]
fn test_static_addresses_are_constant() {
    let out = check_source(
        "var buf : [4]int16 := {0, 0, 0, 0};
         var p : *int16 := buf;
         var q : *int16 := &buf[2];
         declare fun f() -> void;
         var g : *fun() -> void := f;",
    );
    out.assert_clean();
}

#[test]
fn test_constants_fold_and_wrap() {
    let out = check_source(
        "const K : int16 := 3 * 4 + 1;
         const W : int16 := 70000l;
         const M : int16 := -1;",
    );
    out.assert_clean();
    assert_eq!(out.global("K").value, Some(13));
    assert_eq!(out.global("W").value, Some(70000 & 0xFFFF));
    assert_eq!(out.global("M").value, Some(0xFFFF));
}

#[test]
fn test_constant_must_be_integral() {
    let out = check_source("const P : *int16 := 0p;");
    assert_eq!(out.codes(), vec![ErrorCode::E3001]);
}

#[test]
fn test_unknown_name_does_not_cascade() {
    let out = check_source("var a : int16 := missing;");
    assert_eq!(out.codes(), vec![ErrorCode::E2004]);
}

#[test]
fn test_void_variable() {
    let out = check_source("declare var v : void;");
    assert_eq!(out.codes(), vec![ErrorCode::E3001]);
}

#[test]
fn test_value_used_as_type() {
    let out = check_source(
        "var a : int16 := 1;
         declare var b : a;",
    );
    assert_eq!(out.codes(), vec![ErrorCode::E2007]);
}

#[test]
fn test_types_may_be_used_before_declaration() {
    let out = check_source(
        "declare var p : Point;
         struct Point { x: int16, y: int16 };",
    );
    out.assert_clean();
    assert_eq!(out.fmt(out.global("p").ty), "struct Point");
}
