use crate::eval::EvalError;
use crate::parse::{LexError, ParseError};
use crate::pull::WeightError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Weight(#[from] WeightError),
}

impl Error {
    pub fn is_compile_error(&self) -> bool {
        matches!(self, Self::Lex(_) | Self::Parse(_))
    }
}
