#![forbid(unsafe_code)]

use warden_ast::Span;

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    KwAnd,
    KwOr,
    KwNot,
    KwTrue,
    KwFalse,

    // Operators / punctuation
    EqEq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,

    Plus,
    Minus,
    Star,
    Percent,

    LParen,
    RParen,

    // Out-of-grammar punctuation, lexed so the parser can reject each
    // construct by name.
    Slash,
    Eq,
    Dot,
    Comma,
    LBracket,
    RBracket,
    Str,

    Eof,

    // Literals / identifiers
    Ident(String),
    Int(i64),
}
