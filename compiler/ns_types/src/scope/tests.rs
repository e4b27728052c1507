#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use ns_ir::StringInterner;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn var(name: Name, ty: TypeId, defined: bool, at: u32) -> Symbol {
    Symbol {
        defined,
        ..Symbol::new(name, SymbolKind::Var, ty, Span::new(at, at + 1))
    }
}

#[test]
fn test_inner_binding_shadows_outer() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut scopes = ScopeStack::new();

    let outer = scopes.declare(var(x, TypeId::INT16, true, 0)).unwrap();
    scopes.push();
    let inner = scopes.declare(var(x, TypeId::INT32, true, 10)).unwrap();
    assert_eq!(scopes.resolve(x), Some(inner));
    scopes.pop();
    assert_eq!(scopes.resolve(x), Some(outer));
}

#[test]
fn test_module_frame_is_never_popped() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut scopes = ScopeStack::new();
    scopes.declare(var(x, TypeId::INT16, true, 0)).unwrap();
    scopes.pop();
    scopes.pop();
    assert!(scopes.at_module_level());
    assert!(scopes.resolve(x).is_some());
}

#[test]
fn test_declarations_merge_into_one_definition() {
    let interner = StringInterner::new();
    let f = interner.intern("f");
    let mut scopes = ScopeStack::new();
    let func = |defined, at| Symbol {
        defined,
        ..Symbol::new(f, SymbolKind::Func, TypeId::INT16, Span::new(at, at + 1))
    };

    let first = scopes.declare(func(false, 0)).unwrap();
    let second = scopes.declare(func(false, 10)).unwrap();
    let third = scopes.declare(func(true, 20)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, third);
    assert!(scopes.symbol(first).defined);
    assert_eq!(scopes.symbol(first).span, Span::new(0, 1));

    assert_eq!(
        scopes.declare(func(true, 30)),
        Err(SymbolError::Redefinition {
            previous: Span::new(0, 1)
        })
    );
}

#[test]
fn test_type_mismatch_conflicts() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut scopes = ScopeStack::new();
    scopes.declare(var(x, TypeId::INT16, false, 0)).unwrap();
    let err = scopes.declare(var(x, TypeId::INT32, true, 5)).unwrap_err();
    assert_eq!(err.code(), ErrorCode::E2006);
    assert_eq!(err.previous(), Span::new(0, 1));
}

#[test]
fn test_static_mismatch_conflicts() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut scopes = ScopeStack::new();
    scopes.declare(var(x, TypeId::INT16, false, 0)).unwrap();
    let err = scopes
        .declare(Symbol {
            is_static: true,
            ..var(x, TypeId::INT16, true, 5)
        })
        .unwrap_err();
    assert!(matches!(err, SymbolError::Conflicting { .. }));
}

#[test]
fn test_kind_change_and_types_never_merge() {
    let interner = StringInterner::new();
    let t = interner.intern("t");
    let mut scopes = ScopeStack::new();
    scopes
        .declare(Symbol::new(t, SymbolKind::Type, TypeId::INT16, Span::new(0, 1)))
        .unwrap();
    let again = Symbol::new(t, SymbolKind::Type, TypeId::INT16, Span::new(5, 6));
    assert_eq!(scopes.declare(again).map_err(SymbolError::code), Err(ErrorCode::E2001));
    let as_var = var(t, TypeId::INT16, false, 9);
    assert_eq!(scopes.declare(as_var).map_err(SymbolError::code), Err(ErrorCode::E2001));
}

#[test]
fn test_into_table_keeps_globals() {
    let interner = StringInterner::new();
    let (g, l) = (interner.intern("g"), interner.intern("l"));
    let mut scopes = ScopeStack::new();
    let global = scopes.declare(var(g, TypeId::INT16, true, 0)).unwrap();
    scopes.push();
    let local = scopes.declare(var(l, TypeId::INT16, true, 4)).unwrap();

    let table = scopes.into_table();
    assert_eq!(table.global_id(g), Some(global));
    assert!(table.global(l).is_none());
    assert_eq!(table.symbol(local).name, l);
    assert_eq!(table.globals().count(), 1);
}

proptest! {
    /// Each frame binds a subset of a few names; after every push the
    /// innermost binding wins, and after every pop the bindings seen
    /// before that push come back.
    #[test]
    fn prop_shadowing_round_trip(frames in prop::collection::vec(
        prop::collection::vec(any::<bool>(), 4),
        1..8,
    )) {
        let interner = StringInterner::new();
        let names: Vec<Name> = (0..4).map(|i| interner.intern(&format!("n{i}"))).collect();
        let mut scopes = ScopeStack::new();
        let mut snapshots: Vec<Vec<Option<SymbolId>>> = Vec::new();

        for (depth, binds) in frames.iter().enumerate() {
            snapshots.push(names.iter().map(|&n| scopes.resolve(n)).collect());
            scopes.push();
            let mut expected = snapshots[depth].clone();
            for (slot, (&name, &bind)) in names.iter().zip(binds).enumerate() {
                if bind {
                    let at = u32::try_from(depth * 4 + slot).unwrap();
                    expected[slot] = Some(scopes.declare(var(name, TypeId::INT16, true, at)).unwrap());
                }
            }
            let seen: Vec<_> = names.iter().map(|&n| scopes.resolve(n)).collect();
            prop_assert_eq!(seen, expected);
        }

        while let Some(before) = snapshots.pop() {
            scopes.pop();
            let seen: Vec<_> = names.iter().map(|&n| scopes.resolve(n)).collect();
            prop_assert_eq!(seen, before);
        }
    }
}
