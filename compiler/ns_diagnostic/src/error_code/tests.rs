use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E3005.as_str(), "E3005");
}

#[test]
fn test_codes_map_to_taxonomy() {
    assert_eq!(ErrorCode::E0008.kind(), ErrorKind::ReservedName);
    assert_eq!(ErrorCode::E1002.kind(), ErrorKind::UnterminatedBlock);
    assert_eq!(ErrorCode::E2003.kind(), ErrorKind::LabelKindMismatch);
    assert_eq!(ErrorCode::E3006.kind(), ErrorKind::Mismatch);
    assert_eq!(ErrorCode::E3009.kind(), ErrorKind::CircularType);
}

#[test]
fn test_families_follow_code_ranges() {
    let cases = [
        (ErrorCode::E0001, ErrorFamily::Lex),
        (ErrorCode::E1005, ErrorFamily::Parse),
        (ErrorCode::E2006, ErrorFamily::Symbol),
        (ErrorCode::E3014, ErrorFamily::Type),
    ];
    for (code, family) in cases {
        assert_eq!(code.kind().family(), family, "{code}");
    }
}

#[test]
fn test_kind_display_names_family() {
    assert_eq!(ErrorKind::Redefinition.to_string(), "SymbolError::Redefinition");
    assert_eq!(ErrorKind::IncompleteArray.to_string(), "TypeError::IncompleteArray");
}

#[test]
fn test_warning_codes() {
    assert!(ErrorCode::W0001.is_warning());
    assert!(!ErrorCode::E0004.is_warning());
}
