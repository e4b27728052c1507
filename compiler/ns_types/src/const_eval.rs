//! Integer constant folding.
//!
//! Values are carried as `u32` bit patterns and every result is truncated
//! to the operation width, so folding matches what the target computes.
//! Signed operators reinterpret their operands at that width.

use ns_ir::ast::{BinaryOp, CondOp, IntWidth, UnaryOp};

/// Keep the low `width` bits.
pub fn truncate(value: u32, width: IntWidth) -> u32 {
    match width {
        IntWidth::W32 => value,
        narrower => value & ((1u32 << narrower.bits()) - 1),
    }
}

/// Reinterpret the low `width` bits as a two's complement value.
pub fn sign_extend(value: u32, width: IntWidth) -> i32 {
    let shift = 32 - width.bits();
    #[allow(clippy::cast_possible_wrap)]
    let widened = (value << shift) as i32;
    widened >> shift
}

#[allow(clippy::cast_sign_loss)]
fn from_signed(value: i32, width: IntWidth) -> u32 {
    truncate(value as u32, width)
}

pub fn fold_unary(op: UnaryOp, value: u32, width: IntWidth) -> u32 {
    match op {
        UnaryOp::Plus => truncate(value, width),
        UnaryOp::Neg => truncate(value.wrapping_neg(), width),
        UnaryOp::BitNot => truncate(!value, width),
    }
}

/// `!value`.
pub fn fold_not(value: u32) -> u32 {
    u32::from(value == 0)
}

/// Fold an arithmetic operator; `None` when the result is undefined
/// (division or remainder by zero).
pub fn fold_binary(op: BinaryOp, left: u32, right: u32, width: IntWidth) -> Option<u32> {
    let (l, r) = (truncate(left, width), truncate(right, width));
    let (sl, sr) = (sign_extend(l, width), sign_extend(r, width));
    let bits = width.bits();
    let value = match op {
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::UDiv => l.checked_div(r)?,
        BinaryOp::UMod => l.checked_rem(r)?,
        BinaryOp::SDiv if sr == 0 => return None,
        BinaryOp::SDiv => from_signed(sl.wrapping_div(sr), width),
        BinaryOp::SMod if sr == 0 => return None,
        BinaryOp::SMod => from_signed(sl.wrapping_rem(sr), width),
        BinaryOp::Shl if r >= bits => 0,
        BinaryOp::Shl => l << r,
        BinaryOp::Shr if r >= bits => 0,
        BinaryOp::Shr => l >> r,
        BinaryOp::Sar => from_signed(sl >> r.min(bits - 1), width),
        BinaryOp::BitAnd => l & r,
        BinaryOp::BitXor => l ^ r,
        BinaryOp::BitOr => l | r,
    };
    Some(truncate(value, width))
}

/// Fold a conditional operator to `0` or `1`.
pub fn fold_cond(op: CondOp, left: u32, right: u32, width: IntWidth) -> u32 {
    let (l, r) = (truncate(left, width), truncate(right, width));
    let (sl, sr) = (sign_extend(l, width), sign_extend(r, width));
    let holds = match op {
        CondOp::And => l != 0 && r != 0,
        CondOp::Or => l != 0 || r != 0,
        CondOp::Eq => l == r,
        CondOp::NotEq => l != r,
        CondOp::ULt => l < r,
        CondOp::ULtEq => l <= r,
        CondOp::UGt => l > r,
        CondOp::UGtEq => l >= r,
        CondOp::SLt => sl < sr,
        CondOp::SLtEq => sl <= sr,
        CondOp::SGt => sl > sr,
        CondOp::SGtEq => sl >= sr,
    };
    u32::from(holds)
}

/// Convert a value between widths, sign-extending for signed casts.
pub fn convert(value: u32, from: IntWidth, to: IntWidth, signed: bool) -> u32 {
    let source = truncate(value, from);
    if signed {
        from_signed(sign_extend(source, from), to)
    } else {
        truncate(source, to)
    }
}
