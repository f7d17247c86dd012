use super::{ast::*, lexer::*};
use crate::common::*;
use std::fmt;

type PResult<T = Node> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {}: {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: TokenKind,
        expected: NonEmpty<&'static str>,
    },
    UnmatchedParen {
        opened_at: usize,
        found: TokenKind,
    },
    TrailingInput {
        found: TokenKind,
    },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken { found, expected } => {
                write!(
                    f,
                    "unexpected token: found {}, expected {}",
                    found,
                    expected.fmt_expected()
                )
            }
            Self::UnmatchedParen { opened_at, found } => {
                write!(
                    f,
                    "'(' at position {} is never closed: found {}, expected ')'",
                    opened_at, found
                )
            }
            Self::TrailingInput { found } => {
                write!(f, "unexpected {} after a complete formula", found)
            }
        }
    }
}

static END: Token = Token {
    kind: TokenKind::End,
    span: 0..0,
};

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    const ADDITION_OPS: &'static [TokenKind] = &[TokenKind::Plus, TokenKind::Minus];

    const MULTIPLICATION_OPS: &'static [TokenKind] = &[TokenKind::Star, TokenKind::Slash];

    pub fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn parse(mut self) -> PResult {
        let root = self.parse_expression()?;
        if self.matches(TokenKind::End) {
            Ok(root)
        } else {
            let found = self.peek().kind;
            self.error(ParseErrorKind::TrailingInput { found })
        }
    }

    fn peek(&self) -> &'t Token {
        self.tokens.get(self.pos).unwrap_or(&END)
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::End {
            self.pos += 1;
        }
        token
    }

    fn matches(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn matches_any(&self, options: &[TokenKind]) -> bool {
        options.contains(&self.peek().kind)
    }

    fn error<T>(&self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.peek().span.clone(),
        })
    }

    fn unexpected_token<T>(&self, expected: NonEmpty<&'static str>) -> PResult<T> {
        let found = self.peek().kind;
        self.error(ParseErrorKind::UnexpectedToken { found, expected })
    }

    fn parse_expression(&mut self) -> PResult {
        let mut lhs = self.parse_term()?;

        while self.matches_any(Self::ADDITION_OPS) {
            let op = match self.advance().kind {
                TokenKind::Plus => BinaryOperator::Add,
                _ => BinaryOperator::Sub,
            };
            let rhs = self.parse_term()?;

            lhs = Node::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn parse_term(&mut self) -> PResult {
        let mut lhs = self.parse_unary()?;

        while self.matches_any(Self::MULTIPLICATION_OPS) {
            let op = match self.advance().kind {
                TokenKind::Star => BinaryOperator::Mul,
                _ => BinaryOperator::Div,
            };
            let rhs = self.parse_unary()?;

            lhs = Node::binary(lhs, op, rhs);
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult {
        if self.matches(TokenKind::Minus) {
            self.advance();
            let operand = self.parse_unary()?;

            Ok(Node::neg(operand))
        } else {
            self.parse_power()
        }
    }

    fn parse_power(&mut self) -> PResult {
        let base = self.parse_primary()?;

        if self.matches(TokenKind::Caret) {
            self.advance();
            let exponent = self.parse_unary()?;

            Ok(Node::binary(base, BinaryOperator::Pow, exponent))
        } else {
            Ok(base)
        }
    }

    fn parse_primary(&mut self) -> PResult {
        match self.peek().kind {
            TokenKind::Number(x) => {
                self.advance();
                Ok(Node::Number(x))
            }
            TokenKind::Rarity => {
                self.advance();
                Ok(Node::Rarity)
            }
            TokenKind::LeftParen => self.parse_parens(),
            _ => self.unexpected_token(vec1![
                TokenKind::Number(0.0).as_str(),
                TokenKind::Rarity.as_str(),
                TokenKind::LeftParen.as_str(),
                TokenKind::Minus.as_str(),
            ]),
        }
    }

    fn parse_parens(&mut self) -> PResult {
        let opened_at = self.advance().span.start;
        let inner = self.parse_expression()?;

        if self.matches(TokenKind::RightParen) {
            self.advance();
            Ok(inner)
        } else {
            let found = self.peek().kind;
            self.error(ParseErrorKind::UnmatchedParen { opened_at, found })
        }
    }
}
