use crate::common::*;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(Float),
    Rarity,
    Neg(Box<Node>),
    Binary(Box<Node>, BinaryOperator, Box<Node>),
}

impl Node {
    pub fn number(x: impl Into<Float>) -> Self {
        Self::Number(x.into())
    }

    pub fn neg(operand: Self) -> Self {
        Self::Neg(Box::new(operand))
    }

    pub fn binary(lhs: Self, op: BinaryOperator, rhs: Self) -> Self {
        Self::Binary(Box::new(lhs), op, Box::new(rhs))
    }

    pub fn size(&self) -> usize {
        match self {
            Self::Number(_) | Self::Rarity => 1,
            Self::Neg(x) => 1 + x.size(),
            Self::Binary(l, _, r) => 1 + l.size() + r.size(),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Binary(_, op, _) => op.precedence(),
            Self::Neg(_) => Self::NEG_PRECEDENCE,
            Self::Number(_) | Self::Rarity => u8::MAX,
        }
    }

    const NEG_PRECEDENCE: u8 = 3;

    fn fmt_operand(&self, f: &mut fmt::Formatter<'_>, parens: bool) -> fmt::Result {
        if parens {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }
}

/// Prints the tree back as KeyLang, adding only the parentheses its shape needs.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(x) => write!(f, "{}", x),
            Self::Rarity => f.write_str("R"),
            Self::Neg(x) => {
                f.write_str("-")?;
                x.fmt_operand(f, x.precedence() < Self::NEG_PRECEDENCE)
            }
            Self::Binary(l, op, r) => {
                let prec = op.precedence();
                let (l_parens, r_parens) = if op.is_right_assoc() {
                    (l.precedence() <= prec, r.precedence() < Self::NEG_PRECEDENCE)
                } else {
                    (l.precedence() < prec, r.precedence() <= prec)
                };
                l.fmt_operand(f, l_parens)?;
                write!(f, " {} ", op)?;
                r.fmt_operand(f, r_parens)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOperator {
    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 4,
        }
    }

    fn is_right_assoc(self) -> bool {
        matches!(self, Self::Pow)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Pow => "^",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
