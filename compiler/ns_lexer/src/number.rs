//! Integer literal cooking.
//!
//! The raw lexer accepts any run of alphanumerics starting with a digit so
//! that glued garbage (`12ab`) is reported as one malformed literal instead
//! of splitting into a number and a name.

use ns_ir::{IntLit, LitWidth};

use crate::LexErrorKind;

/// Decode `text` into a value and width tag.
///
/// Accepts an optional `0b`/`0o`/`0x` prefix (either case) and an optional
/// `l` (32-bit) or `p` (pointer) suffix.
pub(crate) fn cook_int(text: &str) -> Result<IntLit, LexErrorKind> {
    let (radix, body) = split_radix(text);

    let (digits, width) = if let Some(rest) = body.strip_suffix(|c: char| matches!(c, 'l' | 'L')) {
        (rest, LitWidth::W32)
    } else if let Some(rest) = body.strip_suffix(|c: char| matches!(c, 'p' | 'P')) {
        (rest, LitWidth::Ptr)
    } else {
        (body, LitWidth::W16)
    };

    if digits.is_empty() {
        return Err(LexErrorKind::MissingDigits);
    }

    let overflow = LexErrorKind::IntOverflow { bits: width.bits() };
    let mut value: u64 = 0;
    for c in digits.chars() {
        let digit = c
            .to_digit(radix)
            .ok_or(LexErrorKind::InvalidDigit { digit: c, base: radix })?;
        value = value
            .checked_mul(u64::from(radix))
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or_else(|| overflow.clone())?;
    }

    if value > width.max_value() {
        return Err(overflow);
    }
    let value = u32::try_from(value).map_err(|_| overflow)?;
    Ok(IntLit { value, width })
}

fn split_radix(text: &str) -> (u32, &str) {
    let prefixes = [
        ("0x", 16),
        ("0X", 16),
        ("0o", 8),
        ("0O", 8),
        ("0b", 2),
        ("0B", 2),
    ];
    for (prefix, radix) in prefixes {
        if let Some(rest) = text.strip_prefix(prefix) {
            return (radix, rest);
        }
    }
    (10, text)
}
