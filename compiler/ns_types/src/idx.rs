//! Type handles.

use std::fmt;

/// Index of a type in the [`TypePool`](crate::TypePool).
///
/// Types are interned, so equal types have equal ids. Records are nominal:
/// every record definition gets its own id even when two are spelled the
/// same.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const VOID: Self = Self(0);
    /// Unit of narrow string literals; not spellable in source.
    pub const INT8: Self = Self(1);
    pub const INT16: Self = Self(2);
    pub const INT32: Self = Self(3);
    /// Placeholder for anything that failed to check; suppresses follow-up
    /// errors on its uses.
    pub const ERROR: Self = Self(4);

    pub(crate) const PRIMITIVE_COUNT: u32 = 5;

    #[inline]
    pub(crate) const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_error(self) -> bool {
        self.0 == Self::ERROR.0
    }

    #[inline]
    pub const fn is_void(self) -> bool {
        self.0 == Self::VOID.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::VOID => write!(f, "TypeId::VOID"),
            Self::INT8 => write!(f, "TypeId::INT8"),
            Self::INT16 => write!(f, "TypeId::INT16"),
            Self::INT32 => write!(f, "TypeId::INT32"),
            Self::ERROR => write!(f, "TypeId::ERROR"),
            Self(raw) => write!(f, "TypeId({raw})"),
        }
    }
}

/// Index of a record definition.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct RecordId(u32);

impl RecordId {
    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index of a symbol in the [`SymbolTable`](crate::SymbolTable).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub(crate) const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
