#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::layout::{struct_layout, FieldShape};
use ns_ir::StringInterner;
use pretty_assertions::assert_eq;

fn member(name: Name, ty: TypeId) -> Member {
    Member {
        name,
        ty,
        bits: None,
        span: Span::DUMMY,
    }
}

#[test]
fn test_primitives_have_fixed_ids() {
    let pool = TypePool::new();
    assert_eq!(pool.len(), TypeId::PRIMITIVE_COUNT as usize);
    assert_eq!(pool.get(TypeId::VOID), &TypeData::Void);
    assert_eq!(pool.get(TypeId::INT8), &TypeData::Int(IntWidth::W8));
    assert_eq!(pool.get(TypeId::INT16), &TypeData::Int(IntWidth::W16));
    assert_eq!(pool.get(TypeId::INT32), &TypeData::Int(IntWidth::W32));
    assert_eq!(pool.get(TypeId::ERROR), &TypeData::Error);
    assert_eq!(TypePool::int(IntWidth::W16), TypeId::INT16);
}

#[test]
fn test_structural_types_are_interned() {
    let mut pool = TypePool::new();
    let p1 = pool.pointer(TypeId::INT16);
    let p2 = pool.pointer(TypeId::INT16);
    let a1 = pool.array(TypeId::INT16, 4);
    let a2 = pool.array(TypeId::INT16, 4);
    let f1 = pool.func(TypeId::VOID, vec![p1], false);
    let f2 = pool.func(TypeId::VOID, vec![p2], false);

    assert_eq!(p1, p2);
    assert_eq!(a1, a2);
    assert_eq!(f1, f2);
    assert_ne!(p1, a1);
    assert_ne!(f1, pool.func(TypeId::VOID, vec![p1], true));
}

#[test]
fn test_records_are_nominal() {
    let mut pool = TypePool::new();
    let (r1, t1) = pool.new_record(RecordKind::Struct, None, false, Span::DUMMY);
    let (r2, t2) = pool.new_record(RecordKind::Struct, None, false, Span::DUMMY);
    assert_ne!(r1, r2);
    assert_ne!(t1, t2);
    assert_eq!(pool.record_of(t1), Some(r1));
    assert_eq!(pool.record_of(TypeId::INT16), None);
    assert_eq!(pool.records().count(), 2);
}

#[test]
fn test_structural_equality_of_records() {
    let interner = StringInterner::new();
    let (a, b) = (interner.intern("a"), interner.intern("b"));
    let mut pool = TypePool::new();

    let (r1, t1) = pool.new_record(RecordKind::Struct, None, false, Span::DUMMY);
    let (r2, t2) = pool.new_record(RecordKind::Struct, None, false, Span::DUMMY);
    let (r3, t3) = pool.new_record(RecordKind::Struct, None, false, Span::DUMMY);
    let (r4, t4) = pool.new_record(RecordKind::Union, None, false, Span::DUMMY);
    let fields = vec![member(a, TypeId::INT16), member(b, TypeId::INT32)];
    pool.set_members(r1, fields.clone());
    pool.set_members(r2, fields.clone());
    pool.set_members(r3, vec![member(a, TypeId::INT16), member(b, TypeId::INT16)]);
    pool.set_members(r4, fields);

    assert!(pool.structurally_equal(t1, t2));
    assert!(!pool.structurally_equal(t1, t3));
    assert!(!pool.structurally_equal(t1, t4));
    assert!(!pool.structurally_equal(t1, TypeId::INT16));
}

#[test]
fn test_size_align() {
    let mut pool = TypePool::new();
    let ptr = pool.pointer(TypeId::INT8);
    let arr = pool.array(TypeId::INT16, 5);
    let func = pool.func(TypeId::VOID, Vec::new(), false);

    assert_eq!(pool.size_align(TypeId::INT8), Some((1, 1)));
    assert_eq!(pool.size_align(TypeId::INT32), Some((4, 4)));
    assert_eq!(pool.size_align(ptr), Some((POINTER_SIZE, POINTER_SIZE)));
    assert_eq!(pool.size_align(func), Some((POINTER_SIZE, POINTER_SIZE)));
    assert_eq!(pool.size_align(arr), Some((10, 2)));
    assert_eq!(pool.size_align(TypeId::VOID), None);
    assert_eq!(pool.size_align(TypeId::ERROR), None);
}

#[test]
fn test_record_size_needs_layout() {
    let interner = StringInterner::new();
    let x = interner.intern("x");
    let mut pool = TypePool::new();
    let (record, ty) = pool.new_record(RecordKind::Struct, None, false, Span::DUMMY);
    pool.set_members(record, vec![member(x, TypeId::INT32)]);
    assert_eq!(pool.size_align(ty), None);

    pool.record_mut(record).layout = LayoutState::Done(struct_layout(&[FieldShape {
        name: x,
        ty: TypeId::INT32,
        size: 4,
        align: 4,
        bits: None,
    }]));
    assert_eq!(pool.size_align(ty), Some((4, 4)));
    assert_eq!(pool.record(record).member(x).map(|(i, _)| i), Some(0));
}

#[test]
fn test_decay() {
    let mut pool = TypePool::new();
    let arr = pool.array(TypeId::INT16, 3);
    let ptr = pool.pointer(TypeId::INT16);
    let func = pool.func(TypeId::INT16, Vec::new(), false);
    let func_ptr = pool.pointer(func);

    assert_eq!(pool.decay(arr), ptr);
    assert_eq!(pool.decay(ptr), ptr);
    assert_eq!(pool.decay(func), func_ptr);
    assert_eq!(pool.decay(TypeId::INT16), TypeId::INT16);
}

#[test]
fn test_format_type() {
    let interner = StringInterner::new();
    let mut pool = TypePool::new();
    let ptr = pool.pointer(TypeId::INT8);
    let arr = pool.array(ptr, 2);
    let func = pool.func(TypeId::INT16, vec![TypeId::INT32, ptr], true);
    let (_, named) = pool.new_record(
        RecordKind::Union,
        Some(interner.intern("U")),
        false,
        Span::DUMMY,
    );
    let (_, anon) = pool.new_record(RecordKind::Struct, None, false, Span::DUMMY);

    assert_eq!(pool.format_type(TypeId::VOID, &interner), "void");
    assert_eq!(pool.format_type(TypeId::INT16, &interner), "int16");
    assert_eq!(pool.format_type(arr, &interner), "[2]*int8");
    assert_eq!(
        pool.format_type(func, &interner),
        "fun(int32, *int8, ...) -> int16"
    );
    assert_eq!(pool.format_type(named, &interner), "union U");
    assert_eq!(pool.format_type(anon, &interner), "struct {...}");
    assert_eq!(pool.format_type(TypeId::ERROR, &interner), "<error>");
}
