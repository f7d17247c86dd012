use crate::common::*;
use crate::eval::{self, EvalError};
use crate::parse::{
    self,
    ast::{BinaryOperator, Node},
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A compiled KeyLang formula. Displays and serializes as its source text.
///
/// ```
/// # use rust_gacha::Formula;
/// let formula = Formula::compile("1 + 1 / R").unwrap();
/// assert_eq!(formula.eval(2.0), Ok(1.5));
/// assert_eq!(formula.to_string(), "1 + 1 / R");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    root: Node,
}

impl Formula {
    pub fn compile(source: impl Into<String>) -> crate::Result<Self> {
        let source = source.into();
        let root = parse::parse(&source)?;
        tracing::debug!(formula = %source, nodes = root.size(), "compiled formula");
        Ok(Self { source, root })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn eval(&self, rarity: Rarity) -> Result<Float, EvalError> {
        eval::eval(&self.root, rarity)
    }
}

impl Default for Formula {
    fn default() -> Self {
        Self {
            source: "1 / R".to_owned(),
            root: Node::binary(Node::number(1), BinaryOperator::Div, Node::Rarity),
        }
    }
}

impl FromStr for Formula {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl Serialize for Formula {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Formula {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::compile(source).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_compile_and_eval() {
        let formula = Formula::compile("1 + 1 / R").unwrap();
        assert_eq!(formula.eval(2.0), Ok(1.5));
        assert_eq!(formula.eval(10.0), Ok(1.1));
        assert_eq!(formula.eval(0.0), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_compile_errors() {
        assert!(matches!(Formula::compile("1 + + 2"), Err(Error::Parse(_))));
        assert!(matches!(Formula::compile("R @ 2"), Err(Error::Lex(_))));
        assert!(matches!("(R".parse::<Formula>(), Err(Error::Parse(_))));
    }

    #[test]
    fn test_source_kept_verbatim() {
        let formula: Formula = "  2*(R+1) ".parse().unwrap();
        assert_eq!(formula.source(), "  2*(R+1) ");
        assert_eq!(formula.to_string(), "  2*(R+1) ");
        assert_eq!(formula.root().to_string(), "2 * (R + 1)");
    }

    #[test]
    fn test_serde_round_trip() {
        let formula = Formula::compile("1 + 1 / R").unwrap();
        let json = serde_json::to_string(&formula).unwrap();
        assert_eq!(json, r#""1 + 1 / R""#);

        let loaded: Formula = serde_json::from_str(&json).unwrap();
        for rarity in [0.5, 1.0, 2.0, 3.0, 10.0, 1e6] {
            assert_eq!(
                formula.eval(rarity).unwrap().to_bits(),
                loaded.eval(rarity).unwrap().to_bits()
            );
        }
    }

    #[test]
    fn test_deserialize_invalid() {
        let err = serde_json::from_str::<Formula>(r#""1 + @""#).unwrap_err();
        assert!(err.to_string().contains("'@'"), "{}", err);
    }

    #[test]
    fn test_default_matches_compiled() {
        assert_eq!(Formula::default(), Formula::compile("1 / R").unwrap());
    }

    #[test]
    fn test_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Formula>();
    }
}
