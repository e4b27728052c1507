//! Arena indices for AST nodes.
//!
//! Nodes refer to each other through `u32` indices into the
//! [`AstArena`](crate::AstArena) rather than through boxes. Side tables in
//! later phases are plain vectors indexed by the same ids.

use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }
    };
}

define_id!(
    /// Index of an [`Expr`](crate::ast::Expr).
    ExprId
);
define_id!(
    /// Index of a [`Stmt`](crate::ast::Stmt).
    StmtId
);
define_id!(
    /// Index of a [`ParsedType`](crate::ast::ParsedType).
    ParsedTypeId
);
define_id!(
    /// Index of a [`Decl`](crate::ast::Decl).
    DeclId
);
