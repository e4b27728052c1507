//! Escape processing for character and string literals.
//!
//! Escape grammar:
//! - single-character: `\0 \a \b \t \n \v \f \r \e \d \\ \' \"`
//! - octal: `\` + 1 to 6 octal digits; after the first digit a `0` ends
//!   the sequence, so `\015` is 13 but `\105` is 1 followed by `05`
//! - `\x` + 1 to 4 hex digits
//! - `\u` + exactly 4 hex digits (wide literals only)
//! - `\U` + exactly 6 hex digits (strings only), encoded as UTF-8 in narrow
//!   strings and as a surrogate pair in wide strings when above U+FFFF
//!
//! Any other escaped character stands for itself and raises a warning.

use std::iter::Peekable;
use std::str::CharIndices;

use ns_ir::{Encoding, Span};

use crate::{LexError, LexErrorKind};

/// Unit pushed in place of a character that cannot be encoded.
const REPLACEMENT_UNIT: u16 = 0x3F;

/// Where a literal body sits and how it is encoded.
#[derive(Copy, Clone, Debug)]
pub(crate) struct LiteralContext {
    pub encoding: Encoding,
    pub is_char: bool,
    /// Byte offset of the body in the source.
    pub base: u32,
}

impl LiteralContext {
    fn span(&self, start: usize, end: usize) -> Span {
        let offset = |i: usize| self.base.saturating_add(u32::try_from(i).unwrap_or(u32::MAX));
        Span::new(offset(start), offset(end))
    }

    fn max_unit(&self) -> u32 {
        match self.encoding {
            Encoding::Narrow => 0xFF,
            Encoding::Wide => 0xFFFF,
        }
    }
}

/// Decode a literal body (without quotes) into code units.
pub(crate) fn cook_units(body: &str, ctx: LiteralContext, errors: &mut Vec<LexError>) -> Vec<u16> {
    let mut units = Vec::with_capacity(body.len());
    let mut chars = body.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '\\' {
            push_char(c, ctx.span(start, start + c.len_utf8()), ctx, &mut units, errors);
            continue;
        }

        // A trailing backslash only occurs in an unterminated literal,
        // which is already reported.
        let Some((esc_at, esc)) = chars.next() else {
            break;
        };
        let mut end = esc_at + esc.len_utf8();

        match esc {
            '0'..='7' => {
                let value = take_octal(esc, &mut chars, &mut end);
                push_numeric(value, ctx.span(start, end), ctx, &mut units, errors);
            }
            'x' => {
                let (value, count) = take_hex(&mut chars, 4, &mut end);
                if count == 0 {
                    errors.push(invalid(ctx.span(start, end), "`\\x` needs at least one hex digit"));
                } else {
                    push_numeric(value, ctx.span(start, end), ctx, &mut units, errors);
                }
            }
            'u' => {
                let (value, count) = take_hex(&mut chars, 4, &mut end);
                let span = ctx.span(start, end);
                if count != 4 {
                    errors.push(invalid(span, "`\\u` needs exactly 4 hex digits"));
                } else if ctx.encoding == Encoding::Narrow {
                    errors.push(invalid(span, "`\\u` is only allowed in wide literals"));
                } else {
                    push_numeric(value, span, ctx, &mut units, errors);
                }
            }
            'U' => {
                let (value, count) = take_hex(&mut chars, 6, &mut end);
                let span = ctx.span(start, end);
                if count != 6 {
                    errors.push(invalid(span, "`\\U` needs exactly 6 hex digits"));
                } else if ctx.is_char {
                    errors.push(invalid(span, "`\\U` is not allowed in character literals"));
                } else {
                    push_code_point(value, span, ctx.encoding, &mut units, errors);
                }
            }
            _ => {
                if let Some(unit) = simple_escape(esc) {
                    units.push(unit);
                } else {
                    let span = ctx.span(start, end);
                    errors.push(LexError::new(LexErrorKind::UnknownEscape(esc), span));
                    push_char(esc, span, ctx, &mut units, errors);
                }
            }
        }
    }

    units
}

fn simple_escape(c: char) -> Option<u16> {
    let unit = match c {
        'a' => 0x07,
        'b' => 0x08,
        't' => 0x09,
        'n' => 0x0A,
        'v' => 0x0B,
        'f' => 0x0C,
        'r' => 0x0D,
        'e' => 0x1B,
        'd' => 0x7F,
        '\\' => 0x5C,
        '\'' => 0x27,
        '"' => 0x22,
        _ => return None,
    };
    Some(unit)
}

fn take_octal(first: char, chars: &mut Peekable<CharIndices<'_>>, end: &mut usize) -> u32 {
    let mut value = first.to_digit(8).unwrap_or(0);
    let mut count = 1;
    while count < 6 {
        match chars.peek() {
            Some(&(i, d @ '1'..='7')) => {
                value = value * 8 + d.to_digit(8).unwrap_or(0);
                *end = i + 1;
                count += 1;
                chars.next();
            }
            _ => break,
        }
    }
    value
}

fn take_hex(chars: &mut Peekable<CharIndices<'_>>, max: usize, end: &mut usize) -> (u32, usize) {
    let mut value = 0;
    let mut count = 0;
    while count < max {
        match chars.peek() {
            Some(&(i, d)) if d.is_ascii_hexdigit() => {
                value = value * 16 + d.to_digit(16).unwrap_or(0);
                *end = i + 1;
                count += 1;
                chars.next();
            }
            _ => break,
        }
    }
    (value, count)
}

/// Push a source character, checking it is representable in one unit.
fn push_char(
    c: char,
    span: Span,
    ctx: LiteralContext,
    units: &mut Vec<u16>,
    errors: &mut Vec<LexError>,
) {
    let unit = match ctx.encoding {
        Encoding::Narrow if c.is_ascii() => u16::try_from(u32::from(c)).ok(),
        Encoding::Narrow => None,
        Encoding::Wide => u16::try_from(u32::from(c)).ok(),
    };
    if let Some(unit) = unit {
        units.push(unit);
    } else {
        let encoding = match ctx.encoding {
            Encoding::Narrow => "narrow",
            Encoding::Wide => "wide",
        };
        errors.push(LexError::new(
            LexErrorKind::NotRepresentable { ch: c, encoding },
            span,
        ));
        units.push(REPLACEMENT_UNIT);
    }
}

fn push_numeric(
    value: u32,
    span: Span,
    ctx: LiteralContext,
    units: &mut Vec<u16>,
    errors: &mut Vec<LexError>,
) {
    match u16::try_from(value) {
        Ok(unit) if value <= ctx.max_unit() => units.push(unit),
        _ => {
            errors.push(invalid(span, "escape value does not fit one code unit"));
            units.push(REPLACEMENT_UNIT);
        }
    }
}

fn push_code_point(
    value: u32,
    span: Span,
    encoding: Encoding,
    units: &mut Vec<u16>,
    errors: &mut Vec<LexError>,
) {
    if value > 0x10_FFFF {
        errors.push(invalid(span, "`\\U` escape is beyond U+10FFFF"));
        return;
    }
    let Some(c) = char::from_u32(value) else {
        errors.push(invalid(span, "`\\U` escape names a surrogate code point"));
        return;
    };
    match encoding {
        Encoding::Narrow => {
            let mut buf = [0u8; 4];
            units.extend(c.encode_utf8(&mut buf).bytes().map(u16::from));
        }
        Encoding::Wide => {
            let mut buf = [0u16; 2];
            units.extend_from_slice(c.encode_utf16(&mut buf));
        }
    }
}

#[cold]
fn invalid(span: Span, what: &'static str) -> LexError {
    LexError::new(LexErrorKind::InvalidEscape(what), span)
}

#[cfg(test)]
mod tests;
