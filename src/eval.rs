use crate::common::*;
use crate::parse::ast::{BinaryOperator, Node};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("cannot divide by zero")]
    DivisionByZero,
    #[error("{base} ^ {exponent} is not a finite number")]
    InvalidPower { base: Float, exponent: Float },
    #[error("rarity must be a finite number, got {0}")]
    NonFiniteRarity(Rarity),
}

pub fn eval(node: &Node, rarity: Rarity) -> Result<Float, EvalError> {
    if !rarity.is_finite() {
        return Err(EvalError::NonFiniteRarity(rarity));
    }
    eval_node(node, rarity)
}

fn eval_node(node: &Node, rarity: Rarity) -> Result<Float, EvalError> {
    match node {
        Node::Number(x) => Ok(*x),
        Node::Rarity => Ok(rarity),
        Node::Neg(x) => Ok(-eval_node(x, rarity)?),
        Node::Binary(l, op, r) => {
            let lhs = eval_node(l, rarity)?;
            let rhs = eval_node(r, rarity)?;
            apply(*op, lhs, rhs)
        }
    }
}

fn apply(op: BinaryOperator, lhs: Float, rhs: Float) -> Result<Float, EvalError> {
    use BinaryOperator::*;

    Ok(match op {
        Add => lhs + rhs,
        Sub => lhs - rhs,
        Mul => lhs * rhs,
        Div if rhs == 0.0 => return Err(EvalError::DivisionByZero),
        Div => lhs / rhs,
        Pow => {
            let value = lhs.powf(rhs);
            if lhs.is_finite() && rhs.is_finite() && !value.is_finite() {
                return Err(EvalError::InvalidPower {
                    base: lhs,
                    exponent: rhs,
                });
            }
            value
        }
    })
}
