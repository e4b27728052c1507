//! Raw tokens recognized by logos, before literal cooking and interning.

use logos::Logos;
use ns_ir::TokenKind;

/// How a block comment ended.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) enum CommentEnd {
    Closed,
    Open,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\x0B\x0C]+")]
pub(crate) enum RawToken {
    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment(CommentEnd),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    /// Any alphanumeric run starting with a digit; validated when cooked.
    #[regex(r"[0-9][0-9A-Za-z_]*")]
    Number,

    #[regex(r#"[wW]?"([^"\\\n]|\\.)*""#)]
    Str,
    #[regex(r#"[wW]?"([^"\\\n]|\\.)*\\?"#)]
    UnterminatedStr,

    #[regex(r"[wW]?'([^'\\\n]|\\.)*'")]
    Char,
    #[regex(r"[wW]?'([^'\\\n]|\\.)*\\?")]
    UnterminatedChar,

    // Keywords
    #[token("declare", |_| TokenKind::Declare)]
    #[token("static", |_| TokenKind::Static)]
    #[token("inline", |_| TokenKind::Inline)]
    #[token("var", |_| TokenKind::Var)]
    #[token("const", |_| TokenKind::Const)]
    #[token("fun", |_| TokenKind::Fun)]
    #[token("struct", |_| TokenKind::Struct)]
    #[token("union", |_| TokenKind::Union)]
    #[token("using", |_| TokenKind::Using)]
    #[token("volatile", |_| TokenKind::Volatile)]
    #[token("int16", |_| TokenKind::Int16)]
    #[token("int32", |_| TokenKind::Int32)]
    #[token("void", |_| TokenKind::Void)]
    #[token("typeof", |_| TokenKind::Typeof)]
    #[token("sizeof", |_| TokenKind::Sizeof)]
    #[token("if", |_| TokenKind::If)]
    #[token("else", |_| TokenKind::Else)]
    #[token("while", |_| TokenKind::While)]
    #[token("for", |_| TokenKind::For)]
    #[token("continue", |_| TokenKind::Continue)]
    #[token("break", |_| TokenKind::Break)]
    #[token("breakif", |_| TokenKind::BreakIf)]
    #[token("return", |_| TokenKind::Return)]
    #[token("as", |_| TokenKind::As)]
    #[token("as$", |_| TokenKind::AsSigned)]
    // Delimiters and punctuation
    #[token("(", |_| TokenKind::LParen)]
    #[token(")", |_| TokenKind::RParen)]
    #[token("{", |_| TokenKind::LBrace)]
    #[token("}", |_| TokenKind::RBrace)]
    #[token("[", |_| TokenKind::LBracket)]
    #[token("]", |_| TokenKind::RBracket)]
    #[token(".", |_| TokenKind::Dot)]
    #[token(",", |_| TokenKind::Comma)]
    #[token("->", |_| TokenKind::Arrow)]
    #[token(":", |_| TokenKind::Colon)]
    #[token(";", |_| TokenKind::Semicolon)]
    #[token("?", |_| TokenKind::Question)]
    #[token("...", |_| TokenKind::Ellipsis)]
    #[token(":>", |_| TokenKind::PipeArrow)]
    // Operators
    #[token("+", |_| TokenKind::Plus)]
    #[token("-", |_| TokenKind::Minus)]
    #[token("*", |_| TokenKind::Star)]
    #[token("/", |_| TokenKind::Slash)]
    #[token("/$", |_| TokenKind::SlashDollar)]
    #[token("%", |_| TokenKind::Percent)]
    #[token("%$", |_| TokenKind::PercentDollar)]
    #[token("<<", |_| TokenKind::Shl)]
    #[token(">>", |_| TokenKind::Shr)]
    #[token(">>$", |_| TokenKind::ShrDollar)]
    #[token("==", |_| TokenKind::EqEq)]
    #[token("!=", |_| TokenKind::NotEq)]
    #[token("<", |_| TokenKind::Lt)]
    #[token("<=", |_| TokenKind::LtEq)]
    #[token(">", |_| TokenKind::Gt)]
    #[token(">=", |_| TokenKind::GtEq)]
    #[token("<$", |_| TokenKind::LtDollar)]
    #[token("<=$", |_| TokenKind::LtEqDollar)]
    #[token(">$", |_| TokenKind::GtDollar)]
    #[token(">=$", |_| TokenKind::GtEqDollar)]
    #[token("!", |_| TokenKind::Bang)]
    #[token("&&", |_| TokenKind::AmpAmp)]
    #[token("||", |_| TokenKind::PipePipe)]
    #[token("~", |_| TokenKind::Tilde)]
    #[token("&", |_| TokenKind::Amp)]
    #[token("|", |_| TokenKind::Pipe)]
    #[token("^", |_| TokenKind::Caret)]
    // Assignment
    #[token(":=", |_| TokenKind::Assign)]
    #[token("+=", |_| TokenKind::PlusEq)]
    #[token("-=", |_| TokenKind::MinusEq)]
    #[token("*=", |_| TokenKind::StarEq)]
    #[token("/=", |_| TokenKind::SlashEq)]
    #[token("/$=", |_| TokenKind::SlashDollarEq)]
    #[token("%=", |_| TokenKind::PercentEq)]
    #[token("%$=", |_| TokenKind::PercentDollarEq)]
    #[token("<<=", |_| TokenKind::ShlEq)]
    #[token(">>=", |_| TokenKind::ShrEq)]
    #[token(">>$=", |_| TokenKind::ShrDollarEq)]
    #[token("&=", |_| TokenKind::AmpEq)]
    #[token("|=", |_| TokenKind::PipeEq)]
    #[token("^=", |_| TokenKind::CaretEq)]
    Fixed(TokenKind),
}

/// Consume a block comment body up to and including `*/`, or to the end
/// of input when it is never closed.
fn block_comment(lex: &mut logos::Lexer<'_, RawToken>) -> CommentEnd {
    let rest = lex.remainder();
    if let Some(end) = rest.find("*/") {
        lex.bump(end + 2);
        CommentEnd::Closed
    } else {
        lex.bump(rest.len());
        CommentEnd::Open
    }
}
