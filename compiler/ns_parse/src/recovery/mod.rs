//! Error recovery for the parser.
//!
//! After an error the parser skips to the next statement or declaration
//! boundary: the next `;` at the current nesting depth, or the `}` that
//! closes a block opened after the error point.

use ns_ir::TokenKind;

use crate::cursor::Cursor;

/// A set of token kinds as a bitset over [`TokenKind::discriminant_index`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const fn new() -> Self {
        Self(0)
    }

    #[must_use]
    pub const fn with(self, kind: TokenKind) -> Self {
        Self(self.0 | (1u128 << kind.discriminant_index()))
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, kind: TokenKind) -> bool {
        (self.0 & (1u128 << kind.discriminant_index())) != 0
    }
}

/// Tokens that begin a declaration.
pub const DECL_START: TokenSet = TokenSet::new()
    .with(TokenKind::Declare)
    .with(TokenKind::Static)
    .with(TokenKind::Inline)
    .with(TokenKind::Var)
    .with(TokenKind::Const)
    .with(TokenKind::Fun)
    .with(TokenKind::Using)
    .with(TokenKind::Struct)
    .with(TokenKind::Union);

/// Tokens that can only start a type, never an expression.
pub const TYPE_ONLY_START: TokenSet = TokenSet::new()
    .with(TokenKind::Void)
    .with(TokenKind::Int16)
    .with(TokenKind::Int32)
    .with(TokenKind::LBracket)
    .with(TokenKind::Fun)
    .with(TokenKind::Struct)
    .with(TokenKind::Union)
    .with(TokenKind::Volatile)
    .with(TokenKind::Typeof);

/// Keywords that begin a statement other than an expression statement.
pub const STMT_KEYWORD: TokenSet = TokenSet::new()
    .with(TokenKind::If)
    .with(TokenKind::While)
    .with(TokenKind::For)
    .with(TokenKind::Continue)
    .with(TokenKind::Break)
    .with(TokenKind::BreakIf)
    .with(TokenKind::Return);

const OPENERS: TokenSet = TokenSet::new()
    .with(TokenKind::LBrace)
    .with(TokenKind::LParen)
    .with(TokenKind::LBracket);

const CLOSERS: TokenSet = TokenSet::new()
    .with(TokenKind::RBrace)
    .with(TokenKind::RParen)
    .with(TokenKind::RBracket);

/// Skip past the construct that failed to parse.
///
/// Stops after a `;` at depth zero, or after a `}` that brings the depth
/// back to zero (plus one trailing `;`). Stops before a `}` that would
/// close an enclosing block, and before `Eof`. Stray `)` and `]` at depth
/// zero are skipped.
pub fn synchronize(cursor: &mut Cursor<'_>) {
    let mut depth = 0u32;
    loop {
        let kind = cursor.current_kind();
        match kind {
            TokenKind::Eof => return,
            TokenKind::Semicolon if depth == 0 => {
                cursor.advance();
                return;
            }
            TokenKind::RBrace if depth == 0 => return,
            _ if OPENERS.contains(kind) => depth += 1,
            _ if CLOSERS.contains(kind) && depth > 0 => {
                depth -= 1;
                if depth == 0 && kind == TokenKind::RBrace {
                    cursor.advance();
                    cursor.eat(TokenKind::Semicolon);
                    return;
                }
            }
            _ => {}
        }
        cursor.advance();
    }
}
