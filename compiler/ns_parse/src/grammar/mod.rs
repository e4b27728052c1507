//! Grammar rules, one file per construct family.
//!
//! - `item.rs`: declarations and modifiers
//! - `ty.rs`: type syntax and record bodies
//! - `stmt.rs`: statements, blocks and labels
//! - `init.rs`: initializers
//! - `expr/`: expressions

mod expr;
mod init;
mod item;
mod stmt;
mod ty;

use ns_ir::{Span, TokenKind};

use crate::{ParseError, Parser};

impl Parser<'_> {
    /// Consume the `}` closing a construct opened at `open`.
    ///
    /// Running into the end of input here is fatal.
    fn expect_close_brace(&mut self, open: Span) -> Result<(), ParseError> {
        if self.is_at_end() {
            return Err(ParseError::unterminated_block(open, self.current_span()));
        }
        self.expect(TokenKind::RBrace)?;
        Ok(())
    }
}
