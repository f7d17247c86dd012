pub mod ast;
mod lexer;
mod parser;

pub use lexer::{tokenize, LexError, Span, Token, TokenKind};
pub use parser::{ParseError, ParseErrorKind};
use parser::Parser;

pub fn parse(s: &str) -> crate::Result<ast::Node> {
    let tokens = tokenize(s)?;
    Ok(Parser::new(&tokens).parse()?)
}
