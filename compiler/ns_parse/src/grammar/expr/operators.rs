//! Token to operator mapping.
//!
//! Binding power, loosest first:
//!
//! | prec | operators |
//! |------|-----------|
//! | 1 | `\|\|` |
//! | 2 | `&&` |
//! | 3 | `\|` |
//! | 4 | `^` |
//! | 5 | `&` |
//! | 6 | `==` `!=` |
//! | 7 | `<` `<=` `>` `>=` and their `$` forms |
//! | 8 | `<<` `>>` `>>$` |
//! | 9 | `+` `-` |
//! | 10 | `*` `/` `/$` `%` `%$` |

use ns_ir::ast::{BinaryOp, CondOp, UnaryOp};
use ns_ir::TokenKind;

/// Loosest binary precedence.
pub(super) const LOWEST_PREC: u8 = 1;

/// A binary operator as it lands in the tree.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) enum InfixOp {
    Arith(BinaryOp),
    Cond(CondOp),
}

/// A prefix operator.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(super) enum PrefixOp {
    Arith(UnaryOp),
    Not,
    Deref,
    AddrOf,
}

/// Precedence and operator for a binary operator token.
pub(super) fn infix_op(kind: TokenKind) -> Option<(u8, InfixOp)> {
    use InfixOp::{Arith, Cond};
    let entry = match kind {
        TokenKind::PipePipe => (1, Cond(CondOp::Or)),
        TokenKind::AmpAmp => (2, Cond(CondOp::And)),
        TokenKind::Pipe => (3, Arith(BinaryOp::BitOr)),
        TokenKind::Caret => (4, Arith(BinaryOp::BitXor)),
        TokenKind::Amp => (5, Arith(BinaryOp::BitAnd)),
        TokenKind::EqEq => (6, Cond(CondOp::Eq)),
        TokenKind::NotEq => (6, Cond(CondOp::NotEq)),
        TokenKind::Lt => (7, Cond(CondOp::ULt)),
        TokenKind::LtEq => (7, Cond(CondOp::ULtEq)),
        TokenKind::Gt => (7, Cond(CondOp::UGt)),
        TokenKind::GtEq => (7, Cond(CondOp::UGtEq)),
        TokenKind::LtDollar => (7, Cond(CondOp::SLt)),
        TokenKind::LtEqDollar => (7, Cond(CondOp::SLtEq)),
        TokenKind::GtDollar => (7, Cond(CondOp::SGt)),
        TokenKind::GtEqDollar => (7, Cond(CondOp::SGtEq)),
        TokenKind::Shl => (8, Arith(BinaryOp::Shl)),
        TokenKind::Shr => (8, Arith(BinaryOp::Shr)),
        TokenKind::ShrDollar => (8, Arith(BinaryOp::Sar)),
        TokenKind::Plus => (9, Arith(BinaryOp::Add)),
        TokenKind::Minus => (9, Arith(BinaryOp::Sub)),
        TokenKind::Star => (10, Arith(BinaryOp::Mul)),
        TokenKind::Slash => (10, Arith(BinaryOp::UDiv)),
        TokenKind::SlashDollar => (10, Arith(BinaryOp::SDiv)),
        TokenKind::Percent => (10, Arith(BinaryOp::UMod)),
        TokenKind::PercentDollar => (10, Arith(BinaryOp::SMod)),
        _ => return None,
    };
    Some(entry)
}

/// Operator applied by a compound assignment; `None` for plain `:=`.
pub(super) fn compound_assign_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::PlusEq => Some(BinaryOp::Add),
        TokenKind::MinusEq => Some(BinaryOp::Sub),
        TokenKind::StarEq => Some(BinaryOp::Mul),
        TokenKind::SlashEq => Some(BinaryOp::UDiv),
        TokenKind::SlashDollarEq => Some(BinaryOp::SDiv),
        TokenKind::PercentEq => Some(BinaryOp::UMod),
        TokenKind::PercentDollarEq => Some(BinaryOp::SMod),
        TokenKind::ShlEq => Some(BinaryOp::Shl),
        TokenKind::ShrEq => Some(BinaryOp::Shr),
        TokenKind::ShrDollarEq => Some(BinaryOp::Sar),
        TokenKind::AmpEq => Some(BinaryOp::BitAnd),
        TokenKind::PipeEq => Some(BinaryOp::BitOr),
        TokenKind::CaretEq => Some(BinaryOp::BitXor),
        _ => None,
    }
}

pub(super) fn prefix_op(kind: TokenKind) -> Option<PrefixOp> {
    match kind {
        TokenKind::Plus => Some(PrefixOp::Arith(UnaryOp::Plus)),
        TokenKind::Minus => Some(PrefixOp::Arith(UnaryOp::Neg)),
        TokenKind::Tilde => Some(PrefixOp::Arith(UnaryOp::BitNot)),
        TokenKind::Bang => Some(PrefixOp::Not),
        TokenKind::Star => Some(PrefixOp::Deref),
        TokenKind::Amp => Some(PrefixOp::AddrOf),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplicative_binds_tighter_than_additive() {
        let (mul, _) = infix_op(TokenKind::Star).unwrap_or((0, InfixOp::Arith(BinaryOp::Add)));
        let (add, _) = infix_op(TokenKind::Plus).unwrap_or((0, InfixOp::Arith(BinaryOp::Add)));
        assert!(mul > add);
    }

    #[test]
    fn dollar_forms_are_signed() {
        assert_eq!(
            infix_op(TokenKind::LtDollar),
            Some((7, InfixOp::Cond(CondOp::SLt)))
        );
        assert_eq!(
            infix_op(TokenKind::ShrDollar),
            Some((8, InfixOp::Arith(BinaryOp::Sar)))
        );
        assert_eq!(
            infix_op(TokenKind::Slash),
            Some((10, InfixOp::Arith(BinaryOp::UDiv)))
        );
    }

    #[test]
    fn every_compound_assignment_maps_to_an_operator() {
        let compound = [
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::StarEq,
            TokenKind::SlashEq,
            TokenKind::SlashDollarEq,
            TokenKind::PercentEq,
            TokenKind::PercentDollarEq,
            TokenKind::ShlEq,
            TokenKind::ShrEq,
            TokenKind::ShrDollarEq,
            TokenKind::AmpEq,
            TokenKind::PipeEq,
            TokenKind::CaretEq,
        ];
        for kind in compound {
            assert!(kind.is_assign());
            assert!(compound_assign_op(kind).is_some(), "{kind:?}");
        }
        assert!(TokenKind::Assign.is_assign());
        assert_eq!(compound_assign_op(TokenKind::Assign), None);
    }

    #[test]
    fn star_and_amp_are_both_prefix_and_infix() {
        assert_eq!(prefix_op(TokenKind::Star), Some(PrefixOp::Deref));
        assert_eq!(prefix_op(TokenKind::Amp), Some(PrefixOp::AddrOf));
        assert!(infix_op(TokenKind::Star).is_some());
        assert!(infix_op(TokenKind::Amp).is_some());
        assert_eq!(prefix_op(TokenKind::Slash), None);
    }
}
