//! Type syntax.

use std::fmt;

use crate::{ExprId, Name, ParsedTypeId, Span};

/// Integer widths known to the target.
///
/// `W8` is the unit of narrow string literals and has no keyword.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum IntWidth {
    W8,
    W16,
    W32,
}

impl IntWidth {
    pub const fn bits(self) -> u32 {
        match self {
            IntWidth::W8 => 8,
            IntWidth::W16 => 16,
            IntWidth::W32 => 32,
        }
    }

    /// Size in bytes.
    pub const fn bytes(self) -> u32 {
        self.bits() / 8
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "int{}", self.bits())
    }
}

/// A type as written in source.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParsedType {
    pub kind: TypeKind,
    pub volatile: bool,
    pub span: Span,
}

impl ParsedType {
    pub fn new(kind: TypeKind, span: Span) -> Self {
        ParsedType {
            kind,
            volatile: false,
            span,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeKind {
    Void,
    /// A named type, resolved by the type resolver.
    Ref(Name),
    Int(IntWidth),
    /// `[size]inner`; `*inner` and `[]inner` leave `size` empty.
    Array {
        inner: ParsedTypeId,
        size: Option<ExprId>,
    },
    Func {
        ret: ParsedTypeId,
        params: Vec<ParsedTypeId>,
        variadic: bool,
    },
    Struct(Vec<MemberData>),
    Union(Vec<MemberData>),
    /// `typeof(expr)`
    Typeof(ExprId),
}

/// One member of a struct or union.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MemberData {
    pub name: Name,
    pub ty: ParsedTypeId,
    /// Explicit bitfield width.
    pub bits: Option<u32>,
    pub span: Span,
}
