//! Property-based tests for formula compilation and evaluation.

use proptest::prelude::*;

use crate::eval::EvalError;
use crate::parse::ast::{BinaryOperator, Node};
use crate::Formula;

fn number() -> impl Strategy<Value = Node> {
    prop_oneof![
        (0u32..1000).prop_map(Node::number),
        (0u32..1000, 1u32..64).prop_map(|(n, d)| Node::number(n as f64 / d as f64)),
    ]
}

fn operator() -> impl Strategy<Value = BinaryOperator> {
    use BinaryOperator::*;
    prop_oneof![Just(Add), Just(Sub), Just(Mul), Just(Div), Just(Pow)]
}

fn tree() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![number(), Just(Node::Rarity)];
    leaf.prop_recursive(5, 48, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Node::neg),
            (inner.clone(), operator(), inner).prop_map(|(l, op, r)| Node::binary(l, op, r)),
        ]
    })
}

fn rarity() -> impl Strategy<Value = f64> {
    prop_oneof![-1e3..1e3f64, Just(0.0), Just(1.0)]
}

fn bits(result: Result<f64, EvalError>) -> Result<u64, EvalError> {
    result.map(f64::to_bits)
}

proptest! {
    #[test]
    fn display_reparses_to_same_tree(node in tree()) {
        let formula = Formula::compile(node.to_string()).unwrap();
        prop_assert_eq!(formula.root(), &node);
    }

    #[test]
    fn eval_is_pure(node in tree(), r in rarity()) {
        let formula = Formula::compile(node.to_string()).unwrap();
        prop_assert_eq!(bits(formula.eval(r)), bits(formula.eval(r)));
    }

    #[test]
    fn recompiled_source_evaluates_identically(
        node in tree(),
        rs in proptest::collection::vec(rarity(), 1..8),
    ) {
        let original = Formula::compile(node.to_string()).unwrap();
        let json = serde_json::to_string(&original).unwrap();
        let reloaded: Formula = serde_json::from_str(&json).unwrap();
        for r in rs {
            prop_assert_eq!(bits(original.eval(r)), bits(reloaded.eval(r)));
        }
    }

    #[test]
    fn whitespace_does_not_change_meaning(node in tree(), r in rarity()) {
        let spaced = node.to_string();
        let packed: String = spaced.chars().filter(|c| !c.is_whitespace()).collect();
        let a = Formula::compile(spaced).unwrap();
        let b = Formula::compile(packed).unwrap();
        prop_assert_eq!(bits(a.eval(r)), bits(b.eval(r)));
    }
}
