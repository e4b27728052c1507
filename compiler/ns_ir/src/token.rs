//! Tokens produced by the lexer and consumed by the parser.

use std::fmt;
use std::ops::Index;

use crate::{Name, Span};

/// Token kind.
///
/// Fieldless so that sets of kinds fit in a `u128` bitset; literal payloads
/// travel separately in [`TokenValue`].
///
/// # Invariant
/// Fewer than 128 variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    // Classes with payloads
    Ident,
    Int,
    Str,
    Eof,

    // Keywords
    Declare,
    Static,
    Inline,
    Var,
    Const,
    Fun,
    Struct,
    Union,
    Using,
    Volatile,
    Int16,
    Int32,
    Void,
    Typeof,
    Sizeof,
    If,
    Else,
    While,
    For,
    Continue,
    Break,
    BreakIf,
    Return,
    /// `as`
    As,
    /// `as$`
    AsSigned,

    // Delimiters and punctuation
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Dot,
    Comma,
    /// `->`
    Arrow,
    Colon,
    Semicolon,
    Question,
    /// `...`
    Ellipsis,
    /// `:>`
    PipeArrow,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    SlashDollar,
    Percent,
    PercentDollar,
    Shl,
    Shr,
    ShrDollar,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    LtDollar,
    LtEqDollar,
    GtDollar,
    GtEqDollar,
    Bang,
    AmpAmp,
    PipePipe,
    Tilde,
    Amp,
    Pipe,
    Caret,

    // Assignment
    /// `:=`
    Assign,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    SlashDollarEq,
    PercentEq,
    PercentDollarEq,
    ShlEq,
    ShrEq,
    ShrDollarEq,
    AmpEq,
    PipeEq,
    CaretEq,
}

/// Coarse token classification.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TokenClass {
    Keyword,
    Name,
    IntLiteral,
    StrLiteral,
    Punctuator,
    Eof,
}

/// Signedness selected by a cast operator.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CastSign {
    Unsigned,
    Signed,
}

impl TokenKind {
    /// Bit index used by token sets.
    #[inline]
    pub const fn discriminant_index(self) -> u8 {
        self as u8
    }

    pub const fn class(self) -> TokenClass {
        match self {
            TokenKind::Ident => TokenClass::Name,
            TokenKind::Int => TokenClass::IntLiteral,
            TokenKind::Str => TokenClass::StrLiteral,
            TokenKind::Eof => TokenClass::Eof,
            TokenKind::Declare
            | TokenKind::Static
            | TokenKind::Inline
            | TokenKind::Var
            | TokenKind::Const
            | TokenKind::Fun
            | TokenKind::Struct
            | TokenKind::Union
            | TokenKind::Using
            | TokenKind::Volatile
            | TokenKind::Int16
            | TokenKind::Int32
            | TokenKind::Void
            | TokenKind::Typeof
            | TokenKind::Sizeof
            | TokenKind::If
            | TokenKind::Else
            | TokenKind::While
            | TokenKind::For
            | TokenKind::Continue
            | TokenKind::Break
            | TokenKind::BreakIf
            | TokenKind::Return
            | TokenKind::As
            | TokenKind::AsSigned => TokenClass::Keyword,
            _ => TokenClass::Punctuator,
        }
    }

    /// True for `:=` and every compound assignment operator.
    pub const fn is_assign(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::SlashDollarEq
                | TokenKind::PercentEq
                | TokenKind::PercentDollarEq
                | TokenKind::ShlEq
                | TokenKind::ShrEq
                | TokenKind::ShrDollarEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
        )
    }

    /// `Some(sign)` when this token is a cast operator.
    pub const fn cast_sign(self) -> Option<CastSign> {
        match self {
            TokenKind::As => Some(CastSign::Unsigned),
            TokenKind::AsSigned => Some(CastSign::Signed),
            _ => None,
        }
    }

    /// Human-readable name for diagnostics.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Int => "integer literal",
            TokenKind::Str => "string literal",
            TokenKind::Eof => "end of file",
            TokenKind::Declare => "`declare`",
            TokenKind::Static => "`static`",
            TokenKind::Inline => "`inline`",
            TokenKind::Var => "`var`",
            TokenKind::Const => "`const`",
            TokenKind::Fun => "`fun`",
            TokenKind::Struct => "`struct`",
            TokenKind::Union => "`union`",
            TokenKind::Using => "`using`",
            TokenKind::Volatile => "`volatile`",
            TokenKind::Int16 => "`int16`",
            TokenKind::Int32 => "`int32`",
            TokenKind::Void => "`void`",
            TokenKind::Typeof => "`typeof`",
            TokenKind::Sizeof => "`sizeof`",
            TokenKind::If => "`if`",
            TokenKind::Else => "`else`",
            TokenKind::While => "`while`",
            TokenKind::For => "`for`",
            TokenKind::Continue => "`continue`",
            TokenKind::Break => "`break`",
            TokenKind::BreakIf => "`breakif`",
            TokenKind::Return => "`return`",
            TokenKind::As => "`as`",
            TokenKind::AsSigned => "`as$`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Dot => "`.`",
            TokenKind::Comma => "`,`",
            TokenKind::Arrow => "`->`",
            TokenKind::Colon => "`:`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Question => "`?`",
            TokenKind::Ellipsis => "`...`",
            TokenKind::PipeArrow => "`:>`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::SlashDollar => "`/$`",
            TokenKind::Percent => "`%`",
            TokenKind::PercentDollar => "`%$`",
            TokenKind::Shl => "`<<`",
            TokenKind::Shr => "`>>`",
            TokenKind::ShrDollar => "`>>$`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::LtDollar => "`<$`",
            TokenKind::LtEqDollar => "`<=$`",
            TokenKind::GtDollar => "`>$`",
            TokenKind::GtEqDollar => "`>=$`",
            TokenKind::Bang => "`!`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
            TokenKind::Tilde => "`~`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::Assign => "`:=`",
            TokenKind::PlusEq => "`+=`",
            TokenKind::MinusEq => "`-=`",
            TokenKind::StarEq => "`*=`",
            TokenKind::SlashEq => "`/=`",
            TokenKind::SlashDollarEq => "`/$=`",
            TokenKind::PercentEq => "`%=`",
            TokenKind::PercentDollarEq => "`%$=`",
            TokenKind::ShlEq => "`<<=`",
            TokenKind::ShrEq => "`>>=`",
            TokenKind::ShrDollarEq => "`>>$=`",
            TokenKind::AmpEq => "`&=`",
            TokenKind::PipeEq => "`|=`",
            TokenKind::CaretEq => "`^=`",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Width tag of an integer literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum LitWidth {
    /// No suffix.
    W16,
    /// `l` suffix.
    W32,
    /// `p` suffix: a 32-bit pointer value.
    Ptr,
}

impl LitWidth {
    pub const fn bits(self) -> u32 {
        match self {
            LitWidth::W16 => 16,
            LitWidth::W32 | LitWidth::Ptr => 32,
        }
    }

    /// Largest value representable at this width.
    pub const fn max_value(self) -> u64 {
        (1u64 << self.bits()) - 1
    }
}

/// Decoded integer or character literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IntLit {
    pub value: u32,
    pub width: LitWidth,
}

/// Code-unit encoding of a string literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Encoding {
    /// 8-bit units, ASCII source characters.
    Narrow,
    /// 16-bit units (`w`/`W` prefix), BMP source characters.
    Wide,
}

impl Encoding {
    pub const fn unit_bits(self) -> u32 {
        match self {
            Encoding::Narrow => 8,
            Encoding::Wide => 16,
        }
    }
}

/// Decoded string literal, without the implicit null terminator.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StrLit {
    pub units: Vec<u16>,
    pub encoding: Encoding,
}

/// Literal payload carried next to a [`TokenKind`].
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TokenValue {
    #[default]
    None,
    Name(Name),
    Int(IntLit),
    Str(StrLit),
}

/// A lexed token.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token {
            kind,
            value: TokenValue::None,
            span,
        }
    }

    #[inline]
    pub fn with_value(kind: TokenKind, value: TokenValue, span: Span) -> Self {
        Token { kind, value, span }
    }

    pub fn name(&self) -> Option<Name> {
        match self.value {
            TokenValue::Name(name) => Some(name),
            _ => None,
        }
    }

    pub fn int(&self) -> Option<IntLit> {
        match self.value {
            TokenValue::Int(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn str_lit(&self) -> Option<&StrLit> {
        match &self.value {
            TokenValue::Str(lit) => Some(lit),
            _ => None,
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            TokenValue::None => write!(f, "{:?} @ {:?}", self.kind, self.span),
            value => write!(f, "{:?}({value:?}) @ {:?}", self.kind, self.span),
        }
    }
}

/// A source comment, text without delimiters.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Comment {
    pub span: Span,
    pub text: String,
}

/// Lexer output: tokens terminated by exactly one `Eof`, plus comments.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct TokenList {
    tokens: Vec<Token>,
    comments: Vec<Comment>,
}

impl TokenList {
    pub fn new() -> Self {
        TokenList::default()
    }

    #[inline]
    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn push_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments lying entirely inside `start..end`, in source order.
    pub fn comments_between(&self, start: u32, end: u32) -> &[Comment] {
        let first = self.comments.partition_point(|c| c.span.start < start);
        let last = self.comments.partition_point(|c| c.span.end <= end);
        if first < last {
            &self.comments[first..last]
        } else {
            &[]
        }
    }
}

impl Index<usize> for TokenList {
    type Output = Token;

    #[inline]
    fn index(&self, index: usize) -> &Token {
        &self.tokens[index]
    }
}

impl<'a> IntoIterator for &'a TokenList {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
