use crate::common::*;
use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub type Span = logos::Span;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

fn number(lex: &mut LogosLexer<TokenKind>) -> Option<Float> {
    lex.slice().parse().ok().filter(|x: &Float| x.is_finite())
}

#[derive(Logos, Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+(\.[0-9]*)?", number)]
    #[regex(r"\.[0-9]+", number)]
    Number(Float),

    #[token("R")]
    Rarity,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    /// Appended once by [tokenize]; never produced by the DFA itself.
    End,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Number(_) => "a number",
            Rarity => "'R'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            Caret => "'^'",
            LeftParen => "'('",
            RightParen => "')'",
            End => "end of input",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "number {}", x),
            _ => f.write_str(self.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("unrecognized character {character:?} at position {position}")]
pub struct LexError {
    pub character: char,
    pub position: usize,
}

/// Splits a formula into tokens in a single pass. The result always ends with
/// [TokenKind::End].
pub fn tokenize(s: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = lexer(s);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        let span = lexer.span();
        if let TokenKind::Error = kind {
            // error spans always start on a char boundary
            let character = s[span.start..].chars().next().unwrap_or_default();
            return Err(LexError {
                character,
                position: span.start,
            });
        }
        tokens.push(Token::new(kind, span));
    }

    tokens.push(Token::new(TokenKind::End, s.len()..s.len()));
    Ok(tokens)
}
