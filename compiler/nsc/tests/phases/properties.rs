//! The language's documented behaviors, end to end.

use ns_diagnostic::{ErrorCode, ErrorKind};
use ns_ir::ast::{ExprKind, StmtKind};
use ns_types::TypeId;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{
    array_len, codes, compile_any, compile_ok, exprs_where, global, global_value, int_width_bits,
    kinds, stmts_where,
};

// Literal widths

#[test]
fn test_unsuffixed_literal_is_16_bits() {
    let out = compile_ok("var a : int16 := 42;");
    let value = global_value(&out, "a");
    assert_eq!(int_width_bits(&out, out.typed.expr_type(value)), 16);
    assert_eq!(out.typed.const_value(value), Some(42));
}

#[test]
fn test_l_suffix_is_32_bits() {
    let out = compile_ok("var a : int32 := 42l;");
    let value = global_value(&out, "a");
    assert_eq!(int_width_bits(&out, out.typed.expr_type(value)), 32);
    assert_eq!(out.typed.const_value(value), Some(42));
}

fn spell(value: u32, base: u8) -> String {
    match base {
        2 => format!("0b{value:b}"),
        8 => format!("0o{value:o}"),
        16 => format!("0x{value:X}"),
        _ => value.to_string(),
    }
}

proptest! {
    #[test]
    fn prop_literal_width_follows_suffix(
        narrow in any::<u16>(),
        wide in any::<u32>(),
        base in prop::sample::select(vec![2u8, 8, 10, 16]),
    ) {
        let source = format!(
            "var a : int16 := {};\nvar b : int32 := {}l;",
            spell(u32::from(narrow), base),
            spell(wide, base),
        );
        let out = compile_ok(&source);
        let (a, b) = (global_value(&out, "a"), global_value(&out, "b"));
        prop_assert_eq!(int_width_bits(&out, out.typed.expr_type(a)), 16);
        prop_assert_eq!(out.typed.const_value(a), Some(u32::from(narrow)));
        prop_assert_eq!(int_width_bits(&out, out.typed.expr_type(b)), 32);
        prop_assert_eq!(out.typed.const_value(b), Some(wide));
    }
}

// Shadowing

fn level_type(depth: usize) -> (&'static str, &'static str, TypeId) {
    if depth % 2 == 0 {
        ("int16", "0", TypeId::INT16)
    } else {
        ("int32", "0l", TypeId::INT32)
    }
}

/// `depth` nested blocks, each redeclaring `x`, with a use of `x` at the
/// end of every block.
fn nested_shadowing(depth: usize) -> String {
    let mut source = String::from("fun f() -> void {\n");
    for level in 0..=depth {
        let (ty, zero, _) = level_type(level);
        if level > 0 {
            source.push_str("{\n");
        }
        source.push_str(&format!("var x : {ty} := {zero};\n"));
    }
    for level in (0..=depth).rev() {
        source.push_str("x := 1;\n");
        if level > 0 {
            source.push_str("}\n");
        }
    }
    source.push_str("}\n");
    source
}

proptest! {
    #[test]
    fn prop_shadowing_round_trip(depth in 1usize..8) {
        let out = compile_ok(&nested_shadowing(depth));
        let uses = exprs_where(&out, |k| matches!(k, ExprKind::Name(_)));
        prop_assert_eq!(uses.len(), depth + 1);

        let mut seen = Vec::new();
        // Uses are allocated innermost first.
        for (use_id, level) in uses.iter().zip((0..=depth).rev()) {
            let symbol = out.typed.binding(*use_id).unwrap();
            prop_assert_eq!(out.typed.symbols.symbol(symbol).ty, level_type(level).2);
            prop_assert!(!seen.contains(&symbol));
            seen.push(symbol);
        }
    }
}

// Structural casts

const RECORDS: &str = "
    struct A { x: int16, y: int32 };
    struct B { x: int16, y: int32 };
    struct Renamed { x: int16, z: int32 };
    struct Retyped { x: int32, y: int32 };
    struct Reordered { y: int32, x: int16 };
";

#[test]
fn test_cast_between_identical_records() {
    compile_ok(&format!(
        "{RECORDS}
         fun f(a: A) -> B {{ return a as B; }}
         fun g(b: B) -> A {{ return b as A; }}"
    ));
}

#[test]
fn test_cast_between_different_records() {
    for target in ["Renamed", "Retyped", "Reordered"] {
        let out = compile_any(&format!(
            "{RECORDS}
             fun f(a: A) -> {target} {{ return a as {target}; }}"
        ));
        assert_eq!(codes(&out), vec![ErrorCode::E3002], "cast to {target}");
        assert_eq!(kinds(&out), vec![ErrorKind::IncompatibleCast]);
    }
}

#[test]
fn test_cast_looks_through_pointers_arrays_and_self_references() {
    let shapes = [
        "struct I { v: int16 };
         struct J { v: int16 };
         struct A { p: *I };
         struct B { p: *J };",
        "struct I { v: int16, w: int32 };
         struct J { v: int16, w: int32 };
         struct A { items: [2]I };
         struct B { items: [2]J };",
        "struct A { next: *A, v: int16 };
         struct B { next: *B, v: int16 };",
        "struct A { f: *fun(*A) -> int16 };
         struct B { f: *fun(*B) -> int16 };",
    ];
    for shape in shapes {
        compile_ok(&format!(
            "{shape}
             fun f(a: A) -> B {{ return a as B; }}"
        ));
    }
}

#[test]
fn test_cast_through_pointers_still_compares_members() {
    for shape in [
        "struct I { v: int16 };
         struct J { w: int16 };
         struct A { p: *I };
         struct B { p: *J };",
        "struct I { v: int16 };
         struct A { items: [2]I };
         struct B { items: [3]I };",
        "struct A { next: *A, v: int16 };
         struct B { next: *B, v: int32 };",
    ] {
        let out = compile_any(&format!(
            "{shape}
             fun f(a: A) -> B {{ return a as B; }}"
        ));
        assert_eq!(codes(&out), vec![ErrorCode::E3002], "{shape}");
    }
}

// Bitfields

#[test]
fn test_bitfield_packing() {
    let out = compile_ok("struct P { a: int16 : 4, b: int16 : 4, c: int16 : 10 };");
    let layout = out.typed.layout(global(&out, "P").ty).unwrap();
    let placed: Vec<_> = layout
        .members
        .iter()
        .map(|m| (out.interner.lookup(m.name), m.offset, m.bit_offset))
        .collect();
    assert_eq!(placed, vec![("a", 0, 0), ("b", 0, 4), ("c", 2, 0)]);
    assert_eq!(layout.size, 4);
}

// Labels

#[test]
fn test_break_label_scoping() {
    let out = compile_ok(
        "fun f() -> void {
             var i : int16;
             outer: for (i := 0; i < 10; i += 1) {
                 inner: while (1) {
                     break outer;
                 }
             }
             for (;;) {
                 while (1) {
                     break;
                 }
                 break;
             }
         }",
    );
    let loops = stmts_where(&out, |k| matches!(k, StmtKind::Iter { .. }));
    let breaks = stmts_where(&out, |k| matches!(k, StmtKind::Break { .. }));
    // Statements are allocated when they end: `inner`, `outer`, then the
    // unlabeled `while` and `for`.
    assert_eq!(loops.len(), 4);
    assert_eq!(breaks.len(), 3);
    let (outer, inner_while, plain_for) = (loops[1], loops[2], loops[3]);
    assert_eq!(out.typed.jump_target(breaks[0]), Some(outer));
    assert_eq!(out.typed.jump_target(breaks[1]), Some(inner_while));
    assert_eq!(out.typed.jump_target(breaks[2]), Some(plain_for));
}

#[test]
fn test_label_errors() {
    let out = compile_any(
        "fun f() -> void {
             l: while (1) {
                 break m;
                 breakif l;
             }
             continue;
         }",
    );
    assert_eq!(
        kinds(&out),
        vec![
            ErrorKind::UnknownLabel,
            ErrorKind::LabelKindMismatch,
            ErrorKind::UnknownLabel,
        ]
    );
}

// Array size inference

#[test]
fn test_array_size_inference() {
    let out = compile_ok(
        "var a : []int16 := {1, 2, 3};
         var b : [5]int16 := {1, 2};",
    );
    assert_eq!(array_len(&out, global(&out, "a").ty), Some(3));
    assert_eq!(array_len(&out, global(&out, "b").ty), Some(5));
    assert_eq!(out.typed.size_of(global(&out, "b").ty), Some(10));
}

#[test]
fn test_too_many_initializers() {
    let out = compile_any("var c : [2]int16 := {1, 2, 3};");
    assert_eq!(codes(&out), vec![ErrorCode::E3006]);
    assert!(out.has_errors());
}

// Redeclaration

#[test]
fn test_declarations_then_one_definition() {
    let out = compile_ok(
        "declare fun f() -> int16;
         declare fun f() -> int16;
         fun f() -> int16 { return 0; }",
    );
    let f = global(&out, "f");
    assert!(f.defined);
    assert_eq!(
        out.typed.symbols.globals().filter(|(_, s)| s.name == f.name).count(),
        1
    );
}

#[test]
fn test_second_definition_fails() {
    let out = compile_any(
        "declare fun f() -> int16;
         declare fun f() -> int16;
         fun f() -> int16 { return 0; }
         fun f() -> int16 { return 1; }",
    );
    assert_eq!(kinds(&out), vec![ErrorKind::Redefinition]);
    assert_eq!(codes(&out), vec![ErrorCode::E2001]);
}
