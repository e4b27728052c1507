//! Interned type storage.
//!
//! Every resolved type lives in one [`TypePool`] and is named by a
//! [`TypeId`]. Structural types (integers, arrays, functions) are interned
//! so equality is id equality. Records are nominal: each definition gets a
//! fresh [`RecordId`] and its own `TypeId`.

mod format;

use ns_ir::ast::IntWidth;
use ns_ir::{Name, Span};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::layout::Layout;
use crate::{RecordId, TypeId};

/// Size and alignment of everything that is addressed like a pointer.
pub const POINTER_SIZE: u32 = 4;

/// Structure of one type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Void,
    Int(IntWidth),
    Error,
    /// `[len]elem`. `len` is `None` for pointers and `[]elem`.
    Array { elem: TypeId, len: Option<u32> },
    Func {
        ret: TypeId,
        params: Vec<TypeId>,
        variadic: bool,
    },
    Record(RecordId),
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum RecordKind {
    Struct,
    Union,
}

impl RecordKind {
    pub const fn keyword(self) -> &'static str {
        match self {
            RecordKind::Struct => "struct",
            RecordKind::Union => "union",
        }
    }
}

/// A resolved record member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Member {
    pub name: Name,
    pub ty: TypeId,
    pub bits: Option<u32>,
    pub span: Span,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub(crate) enum LayoutState {
    Pending,
    InProgress,
    Done(Layout),
    /// The record contains itself by value.
    Failed,
}

/// A struct or union definition.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct RecordDef {
    pub kind: RecordKind,
    /// Declared name; anonymous records written inline have none.
    pub name: Option<Name>,
    pub members: Vec<Member>,
    pub volatile: bool,
    pub span: Span,
    pub(crate) layout: LayoutState,
}

impl RecordDef {
    /// Position and data of the member called `name`.
    pub fn member(&self, name: Name) -> Option<(usize, &Member)> {
        self.members.iter().enumerate().find(|(_, m)| m.name == name)
    }

    /// Computed layout, once the record is complete.
    pub fn layout(&self) -> Option<&Layout> {
        match &self.layout {
            LayoutState::Done(layout) => Some(layout),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TypePool {
    types: Vec<TypeData>,
    interned: FxHashMap<TypeData, TypeId>,
    records: Vec<RecordDef>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// A pool holding the primitive types at their fixed ids.
    pub fn new() -> Self {
        let mut pool = TypePool {
            types: Vec::with_capacity(64),
            interned: FxHashMap::default(),
            records: Vec::new(),
        };
        for data in [
            TypeData::Void,
            TypeData::Int(IntWidth::W8),
            TypeData::Int(IntWidth::W16),
            TypeData::Int(IntWidth::W32),
            TypeData::Error,
        ] {
            pool.intern(data);
        }
        debug_assert_eq!(pool.types.len(), TypeId::PRIMITIVE_COUNT as usize);
        pool
    }

    fn push(&mut self, data: TypeData) -> TypeId {
        let id = TypeId::from_raw(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(data);
        id
    }

    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.interned.get(&data) {
            return id;
        }
        let id = self.push(data.clone());
        self.interned.insert(data, id);
        id
    }

    #[inline]
    pub fn get(&self, ty: TypeId) -> &TypeData {
        &self.types[ty.index()]
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub const fn int(width: IntWidth) -> TypeId {
        match width {
            IntWidth::W8 => TypeId::INT8,
            IntWidth::W16 => TypeId::INT16,
            IntWidth::W32 => TypeId::INT32,
        }
    }

    /// `*elem`.
    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeData::Array { elem, len: None })
    }

    /// `[len]elem`.
    pub fn array(&mut self, elem: TypeId, len: u32) -> TypeId {
        self.intern(TypeData::Array {
            elem,
            len: Some(len),
        })
    }

    pub fn func(&mut self, ret: TypeId, params: Vec<TypeId>, variadic: bool) -> TypeId {
        self.intern(TypeData::Func {
            ret,
            params,
            variadic,
        })
    }

    // Records

    /// Allocate a record whose members are filled in later with
    /// [`set_members`](Self::set_members).
    pub fn new_record(
        &mut self,
        kind: RecordKind,
        name: Option<Name>,
        volatile: bool,
        span: Span,
    ) -> (RecordId, TypeId) {
        let id = RecordId::new(u32::try_from(self.records.len()).unwrap_or(u32::MAX));
        self.records.push(RecordDef {
            kind,
            name,
            members: Vec::new(),
            volatile,
            span,
            layout: LayoutState::Pending,
        });
        (id, self.push(TypeData::Record(id)))
    }

    pub fn set_members(&mut self, record: RecordId, members: Vec<Member>) {
        self.records[record.index()].members = members;
    }

    #[inline]
    pub fn record(&self, id: RecordId) -> &RecordDef {
        &self.records[id.index()]
    }

    pub(crate) fn record_mut(&mut self, id: RecordId) -> &mut RecordDef {
        &mut self.records[id.index()]
    }

    pub fn records(&self) -> impl Iterator<Item = (RecordId, &RecordDef)> {
        self.records.iter().enumerate().map(|(i, def)| {
            (
                RecordId::new(u32::try_from(i).unwrap_or(u32::MAX)),
                def,
            )
        })
    }

    pub fn record_of(&self, ty: TypeId) -> Option<RecordId> {
        match self.get(ty) {
            TypeData::Record(id) => Some(*id),
            _ => None,
        }
    }

    // Classification

    pub fn int_width(&self, ty: TypeId) -> Option<IntWidth> {
        match self.get(ty) {
            TypeData::Int(width) => Some(*width),
            _ => None,
        }
    }

    pub fn is_integral(&self, ty: TypeId) -> bool {
        matches!(self.get(ty), TypeData::Int(_))
    }

    /// Pointers and arrays, sized or not.
    pub fn is_pointer_like(&self, ty: TypeId) -> bool {
        matches!(self.get(ty), TypeData::Array { .. })
    }

    pub fn is_func(&self, ty: TypeId) -> bool {
        matches!(self.get(ty), TypeData::Func { .. })
    }

    /// Integral, pointer-like or function: usable as a condition and in
    /// unrestricted casts.
    pub fn is_scalar(&self, ty: TypeId) -> bool {
        matches!(
            self.get(ty),
            TypeData::Int(_) | TypeData::Array { .. } | TypeData::Func { .. }
        )
    }

    /// Element type of a pointer or array.
    pub fn elem(&self, ty: TypeId) -> Option<TypeId> {
        match self.get(ty) {
            TypeData::Array { elem, .. } => Some(*elem),
            _ => None,
        }
    }

    /// Sized arrays decay to pointers and functions to function pointers.
    pub fn decay(&mut self, ty: TypeId) -> TypeId {
        match self.get(ty) {
            TypeData::Array {
                elem,
                len: Some(_),
            } => {
                let elem = *elem;
                self.pointer(elem)
            }
            TypeData::Func { .. } => self.pointer(ty),
            _ => ty,
        }
    }

    /// Byte size and alignment, when known.
    ///
    /// `None` for `void`, the error type, and records whose layout has not
    /// been computed or failed.
    pub fn size_align(&self, ty: TypeId) -> Option<(u32, u32)> {
        match self.get(ty) {
            TypeData::Void | TypeData::Error => None,
            TypeData::Int(width) => Some((width.bytes(), width.bytes())),
            TypeData::Func { .. } | TypeData::Array { len: None, .. } => {
                Some((POINTER_SIZE, POINTER_SIZE))
            }
            TypeData::Array {
                elem,
                len: Some(len),
            } => self
                .size_align(*elem)
                .map(|(size, align)| (size.saturating_mul(*len), align)),
            TypeData::Record(id) => self
                .record(*id)
                .layout()
                .map(|layout| (layout.size, layout.align)),
        }
    }

    /// Structural equality, looking through record identity: two records
    /// match when they have the same kind and the same member names, bit
    /// widths and types in the same order. Pointers, arrays and function
    /// signatures are compared through their component types.
    pub fn structurally_equal(&self, a: TypeId, b: TypeId) -> bool {
        self.equiv(a, b, &mut FxHashSet::default())
    }

    /// `assumed` holds record pairs already under comparison; a pair met
    /// again is taken as equal so self-referencing records terminate.
    fn equiv(&self, a: TypeId, b: TypeId, assumed: &mut FxHashSet<(TypeId, TypeId)>) -> bool {
        if a == b {
            return true;
        }
        match (self.get(a), self.get(b)) {
            (
                TypeData::Array { elem: ea, len: la },
                TypeData::Array { elem: eb, len: lb },
            ) => la == lb && self.equiv(*ea, *eb, assumed),
            (
                TypeData::Func {
                    ret: ra,
                    params: pa,
                    variadic: va,
                },
                TypeData::Func {
                    ret: rb,
                    params: pb,
                    variadic: vb,
                },
            ) => {
                va == vb
                    && pa.len() == pb.len()
                    && self.equiv(*ra, *rb, assumed)
                    && pa.iter().zip(pb).all(|(x, y)| self.equiv(*x, *y, assumed))
            }
            (TypeData::Record(ra), TypeData::Record(rb)) => {
                if !assumed.insert((a, b)) {
                    return true;
                }
                let (ra, rb) = (self.record(*ra), self.record(*rb));
                ra.kind == rb.kind
                    && ra.members.len() == rb.members.len()
                    && ra.members.iter().zip(&rb.members).all(|(ma, mb)| {
                        ma.name == mb.name
                            && ma.bits == mb.bits
                            && self.equiv(ma.ty, mb.ty, assumed)
                    })
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests;
