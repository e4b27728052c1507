//! New Solar IR: spans, names, tokens and the AST node model.
//!
//! - Spans are byte ranges; line/column is derived by the diagnostics layer.
//! - Identifiers are interned to [`Name`].
//! - AST nodes live in an [`AstArena`] and refer to each other by id.

/// Compile-time assertion that a type has a specific size.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod arena;
pub mod ast;
mod interner;
mod name;
mod span;
mod token;
mod traits;

pub use arena::AstArena;
pub use ast::{DeclId, ExprId, ParsedTypeId, StmtId};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
pub use token::{
    CastSign, Comment, Encoding, IntLit, LitWidth, StrLit, Token, TokenClass, TokenKind,
    TokenList, TokenValue,
};
pub use traits::Spanned;
