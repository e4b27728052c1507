use super::*;
use pretty_assertions::assert_eq;

fn narrow_str() -> LiteralContext {
    LiteralContext {
        encoding: Encoding::Narrow,
        is_char: false,
        base: 0,
    }
}

fn wide_str() -> LiteralContext {
    LiteralContext {
        encoding: Encoding::Wide,
        ..narrow_str()
    }
}

fn cook(body: &str, ctx: LiteralContext) -> (Vec<u16>, Vec<LexError>) {
    let mut errors = Vec::new();
    let units = cook_units(body, ctx, &mut errors);
    (units, errors)
}

fn cook_ok(body: &str, ctx: LiteralContext) -> Vec<u16> {
    let (units, errors) = cook(body, ctx);
    assert_eq!(errors, vec![], "unexpected errors for {body:?}");
    units
}

#[test]
fn test_plain_text() {
    assert_eq!(cook_ok("hi", narrow_str()), vec![0x68, 0x69]);
}

#[test]
fn test_single_character_escapes() {
    assert_eq!(
        cook_ok(r#"\a\b\t\n\v\f\r\e\d\\\'\""#, narrow_str()),
        vec![0x07, 0x08, 0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x1B, 0x7F, 0x5C, 0x27, 0x22]
    );
}

// Octal escapes stop at a `0` once one digit has been read. Both readings
// of the rule are pinned here.
#[test]
fn test_octal_zero_terminates_after_first_digit() {
    assert_eq!(cook_ok(r"\015", narrow_str()), vec![0o15]);
    assert_eq!(cook_ok(r"\105", narrow_str()), vec![1, u16::from(b'0'), u16::from(b'5')]);
    assert_eq!(cook_ok(r"\0", narrow_str()), vec![0]);
    assert_eq!(cook_ok(r"\00", narrow_str()), vec![0, u16::from(b'0')]);
    assert_eq!(cook_ok(r"\177", narrow_str()), vec![0o177]);
}

#[test]
fn test_octal_takes_at_most_six_digits() {
    assert_eq!(cook_ok(r"\1111117", wide_str()), vec![0o111_111, u16::from(b'7')]);
}

#[test]
fn test_octal_too_wide_for_narrow_unit() {
    let (units, errors) = cook(r"\777", narrow_str());
    assert_eq!(units, vec![REPLACEMENT_UNIT]);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].span, Span::new(0, 4));
}

#[test]
fn test_hex_escapes() {
    assert_eq!(cook_ok(r"\x41", narrow_str()), vec![0x41]);
    assert_eq!(cook_ok(r"\x7", narrow_str()), vec![0x07]);
    assert_eq!(cook_ok(r"\x12345", wide_str()), vec![0x1234, u16::from(b'5')]);

    let (_, errors) = cook(r"\xg", narrow_str());
    assert_eq!(
        errors[0].kind,
        LexErrorKind::InvalidEscape("`\\x` needs at least one hex digit")
    );
}

#[test]
fn test_small_u_is_wide_only() {
    assert_eq!(cook_ok(r"\u00e9", wide_str()), vec![0xE9]);

    let (_, errors) = cook(r"\u00e9", narrow_str());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].code(), ns_diagnostic::ErrorCode::E0004);

    let (_, errors) = cook(r"\u0e9", wide_str());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_big_u_encodings() {
    assert_eq!(cook_ok(r"\U01F600", wide_str()), vec![0xD83D, 0xDE00]);
    assert_eq!(cook_ok(r"\U01F600", narrow_str()), vec![0xF0, 0x9F, 0x98, 0x80]);
    assert_eq!(cook_ok(r"\U000041", narrow_str()), vec![0x41]);
}

#[test]
fn test_big_u_rejections() {
    let char_ctx = LiteralContext {
        is_char: true,
        ..wide_str()
    };
    let (_, errors) = cook(r"\U000041", char_ctx);
    assert_eq!(errors.len(), 1);

    let (_, errors) = cook(r"\U110000", wide_str());
    assert_eq!(
        errors[0].kind,
        LexErrorKind::InvalidEscape("`\\U` escape is beyond U+10FFFF")
    );
}

#[test]
fn test_unknown_escape_degrades_with_warning() {
    let (units, errors) = cook(r"\q", narrow_str());
    assert_eq!(units, vec![u16::from(b'q')]);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].is_warning());
}

#[test]
fn test_encoding_range() {
    let (units, errors) = cook("é", narrow_str());
    assert_eq!(units, vec![REPLACEMENT_UNIT]);
    assert_eq!(errors[0].code(), ns_diagnostic::ErrorCode::E0007);

    assert_eq!(cook_ok("é", wide_str()), vec![0xE9]);

    let (_, errors) = cook("😀", wide_str());
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_error_spans_are_offset_by_base() {
    let ctx = LiteralContext {
        base: 10,
        ..narrow_str()
    };
    let (_, errors) = cook(r"ab\q", ctx);
    assert_eq!(errors[0].span, Span::new(12, 14));
}
