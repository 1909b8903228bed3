//! Logos-based tokenizer for date values.

use logos::Logos;

/// A token with its kind and text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: DateToken,
    pub text: &'a str,
}

/// Date token kinds. Digit runs may contain `X` (EDTF unspecified) or
/// `u` (MARC unknown); each encoding decides which it accepts.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateToken {
    #[regex(r"[0-9Xu]+")]
    Number,

    #[token("Y")]
    YearPrefix,

    #[token("T")]
    Time,

    #[token("Z")]
    Utc,

    #[token("-")]
    Dash,

    #[token("+")]
    Plus,

    #[token(":")]
    Colon,

    #[token(".")]
    Dot,

    #[token("..")]
    Open,

    #[token("/")]
    Slash,

    #[token(",")]
    Comma,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("?")]
    Uncertain,

    #[token("~")]
    Approximate,

    #[token("%")]
    UncertainApproximate,
}

/// Tokenize a value; `None` when any character is outside the date alphabet.
pub fn tokenize(input: &str) -> Option<Vec<Token<'_>>> {
    let mut lexer = DateToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        let kind = result.ok()?;
        tokens.push(Token {
            kind,
            text: lexer.slice(),
        });
    }
    Some(tokens)
}
