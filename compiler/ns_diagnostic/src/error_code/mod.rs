use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: lexer
/// - E1xxx: parser
/// - E2xxx: scopes, symbols and labels
/// - E3xxx: types and layout
/// - W0xxx: warnings
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum ErrorCode {
    // Lexer Errors (E0xxx)
    /// Malformed integer literal
    E0001,
    /// Unterminated string or character literal
    E0002,
    /// Unterminated block comment
    E0003,
    /// Invalid escape sequence
    E0004,
    /// Invalid character in source
    E0005,
    /// Character literal without exactly one code unit
    E0006,
    /// Character not representable in the literal's encoding
    E0007,
    /// Reserved identifier
    E0008,

    // Parser Errors (E1xxx)
    /// Unexpected token
    E1001,
    /// Unterminated block
    E1002,
    /// Invalid declaration modifier
    E1003,
    /// Empty record definition
    E1004,
    /// Duplicate field in an initializer
    E1005,
    /// Nesting too deep
    E1006,
    /// Narrow and wide string literals concatenated
    E1007,
    /// Variadic marker not in last position
    E1008,

    // Symbol Errors (E2xxx)
    /// Name defined twice in one scope
    E2001,
    /// Unknown label
    E2002,
    /// Jump targets a label of the wrong kind
    E2003,
    /// Unknown name
    E2004,
    /// Jump outside of any loop or conditional
    E2005,
    /// Conflicting declarations of one name
    E2006,
    /// Type used as a value, or value used as a type
    E2007,

    // Type Errors (E3xxx)
    /// Type mismatch
    E3001,
    /// Incompatible cast
    E3002,
    /// Unknown member or member access on a non-record
    E3003,
    /// Invalid operand types for an operator
    E3004,
    /// Array size cannot be determined
    E3005,
    /// Too many initializers
    E3006,
    /// Expression is not a compile-time constant
    E3007,
    /// Expression is not assignable
    E3008,
    /// Circular type definition
    E3009,
    /// Invalid bitfield width
    E3010,
    /// Argument count mismatch
    E3011,
    /// Non-void function may fall through without returning
    E3012,
    /// Definition without a value or body
    E3013,
    /// `void` value used where a value is required
    E3014,

    // Warnings (W0xxx)
    /// Unknown escape sequence degraded to its character
    W0001,
}

/// The error taxonomy every code maps onto.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    Malformed,
    ReservedName,
    UnexpectedToken,
    UnterminatedBlock,
    Redefinition,
    UnknownLabel,
    LabelKindMismatch,
    UnknownName,
    Mismatch,
    IncompatibleCast,
    BadMemberAccess,
    InvalidOperands,
    IncompleteArray,
    CircularType,
}

/// The phase an [`ErrorKind`] belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorFamily {
    Lex,
    Parse,
    Symbol,
    Type,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0005 => "E0005",
            ErrorCode::E0006 => "E0006",
            ErrorCode::E0007 => "E0007",
            ErrorCode::E0008 => "E0008",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E3009 => "E3009",
            ErrorCode::E3010 => "E3010",
            ErrorCode::E3011 => "E3011",
            ErrorCode::E3012 => "E3012",
            ErrorCode::E3013 => "E3013",
            ErrorCode::E3014 => "E3014",
            ErrorCode::W0001 => "W0001",
        }
    }

    /// Taxonomy tag reported for this code.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E0001
            | ErrorCode::E0002
            | ErrorCode::E0003
            | ErrorCode::E0004
            | ErrorCode::E0005
            | ErrorCode::E0006
            | ErrorCode::E0007
            | ErrorCode::W0001 => ErrorKind::Malformed,
            ErrorCode::E0008 => ErrorKind::ReservedName,
            ErrorCode::E1001
            | ErrorCode::E1003
            | ErrorCode::E1004
            | ErrorCode::E1005
            | ErrorCode::E1006
            | ErrorCode::E1007
            | ErrorCode::E1008 => ErrorKind::UnexpectedToken,
            ErrorCode::E1002 => ErrorKind::UnterminatedBlock,
            ErrorCode::E2001 | ErrorCode::E2006 => ErrorKind::Redefinition,
            ErrorCode::E2002 | ErrorCode::E2005 => ErrorKind::UnknownLabel,
            ErrorCode::E2003 => ErrorKind::LabelKindMismatch,
            ErrorCode::E2004 | ErrorCode::E2007 => ErrorKind::UnknownName,
            ErrorCode::E3001
            | ErrorCode::E3006
            | ErrorCode::E3007
            | ErrorCode::E3010
            | ErrorCode::E3011
            | ErrorCode::E3012
            | ErrorCode::E3013
            | ErrorCode::E3014 => ErrorKind::Mismatch,
            ErrorCode::E3002 => ErrorKind::IncompatibleCast,
            ErrorCode::E3003 => ErrorKind::BadMemberAccess,
            ErrorCode::E3004 | ErrorCode::E3008 => ErrorKind::InvalidOperands,
            ErrorCode::E3005 => ErrorKind::IncompleteArray,
            ErrorCode::E3009 => ErrorKind::CircularType,
        }
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl ErrorKind {
    pub fn family(self) -> ErrorFamily {
        match self {
            ErrorKind::Malformed | ErrorKind::ReservedName => ErrorFamily::Lex,
            ErrorKind::UnexpectedToken | ErrorKind::UnterminatedBlock => ErrorFamily::Parse,
            ErrorKind::Redefinition
            | ErrorKind::UnknownLabel
            | ErrorKind::LabelKindMismatch
            | ErrorKind::UnknownName => ErrorFamily::Symbol,
            ErrorKind::Mismatch
            | ErrorKind::IncompatibleCast
            | ErrorKind::BadMemberAccess
            | ErrorKind::InvalidOperands
            | ErrorKind::IncompleteArray
            | ErrorKind::CircularType => ErrorFamily::Type,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let family = match self.family() {
            ErrorFamily::Lex => "LexError",
            ErrorFamily::Parse => "ParseError",
            ErrorFamily::Symbol => "SymbolError",
            ErrorFamily::Type => "TypeError",
        };
        write!(f, "{family}::{self:?}")
    }
}

#[cfg(test)]
mod tests;
