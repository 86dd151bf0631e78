//! End-to-end tests for the expression pipeline: tokens, postfix, tree, traversals.

use itertools::Itertools;
use rstest::rstest;

use exprtree::application::services::ExpressionService;
use exprtree::config::Settings;
use exprtree::domain::{
    build_from_preorder, DomainError, ExprNode, NegativeCheck, TraversalStrategy,
};
use exprtree::{compute_traversals, parse_and_build};

#[ctor::ctor]
fn init() {
    exprtree::util::testing::init_test_setup();
}

fn service(negative_check: NegativeCheck) -> ExpressionService {
    ExpressionService::new(Settings {
        negative_check,
        ..Settings::default()
    })
}

/// Deterministic pseudo-random expressions, single-digit operands, no parentheses.
///
/// Subtraction is included; under the unary check `5-3` is a valid expression.
fn flat_expressions(count: usize) -> Vec<(String, usize)> {
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };
    (0..count)
        .map(|_| {
            let operands = 1 + (next() % 8) as usize;
            let mut expr = String::new();
            for i in 0..operands {
                if i > 0 {
                    expr.push(['+', '-', '*', '/'][(next() % 4) as usize]);
                }
                expr.push(char::from(b'0' + (next() % 10) as u8));
            }
            (expr, operands)
        })
        .collect()
}

#[test]
fn given_precedence_example_when_running_pipeline_then_matches_expected_sequences() {
    // Arrange
    let svc = ExpressionService::default();

    // Act
    let analysis = svc.analyze("3+4*2").unwrap();

    // Assert
    assert_eq!(analysis.postfix.iter().join(" "), "3 4 2 * +");
    assert_eq!(analysis.tree.root().unwrap().to_string(), "(3 + (4 * 2))");
    assert_eq!(analysis.traversals.preorder, ["+", "3", "*", "4", "2"]);
    assert_eq!(analysis.traversals.inorder, ["3", "+", "4", "*", "2"]);
    assert_eq!(analysis.traversals.postorder, ["3", "4", "2", "*", "+"]);
}

#[test]
fn given_parenthesized_example_when_running_pipeline_then_parens_override_precedence() {
    let analysis = ExpressionService::default().analyze("(1+2)*3").unwrap();

    assert_eq!(analysis.postfix.iter().join(" "), "1 2 + 3 *");
    assert_eq!(analysis.traversals.preorder, ["*", "+", "1", "2", "3"]);
}

#[rstest]
#[case("(1+2", DomainError::UnbalancedParentheses)]
#[case("1+2)", DomainError::UnbalancedParentheses)]
#[case("++2", DomainError::MalformedExpression)]
#[case("2+", DomainError::MalformedExpression)]
#[case("3 4", DomainError::MalformedExpression)]
#[case("", DomainError::EmptyOrInvalidExpression)]
#[case("hello", DomainError::EmptyOrInvalidExpression)]
#[case("()", DomainError::EmptyOrInvalidExpression)]
#[case("-5+3", DomainError::InvalidOperand)]
#[case("2*(-1)", DomainError::InvalidOperand)]
#[case("2*x-3", DomainError::InvalidOperand)]
fn given_invalid_input_when_parsing_then_fails_with_kind(
    #[case] raw: &str,
    #[case] expected: DomainError,
) {
    assert_eq!(parse_and_build(raw), Err(expected));
}

#[test]
fn given_plain_subtraction_when_literal_check_then_rejected_as_negative_operand() {
    // The literal scan treats any "-" followed by a digit as a negative number.
    let result = service(NegativeCheck::Literal).parse_and_build("5-3");

    assert_eq!(result, Err(DomainError::InvalidOperand));
}

#[test]
fn given_plain_subtraction_when_unary_check_then_builds_tree() {
    let svc = service(NegativeCheck::Unary);

    let tree = svc.parse_and_build("5-3").unwrap();

    let t = svc.compute_traversals(&tree);
    assert_eq!(t.preorder, ["-", "5", "3"]);
    assert_eq!(t.inorder, ["5", "-", "3"]);
}

#[test]
fn given_spaced_subtraction_when_literal_check_then_builds_tree() {
    let tree = service(NegativeCheck::Literal)
        .parse_and_build("5 - 3")
        .unwrap();

    assert_eq!(tree.root().unwrap().to_string(), "(5 - 3)");
}

#[rstest]
#[case("8-3-2", "((8 - 3) - 2)")]
#[case("16/4/2", "((16 / 4) / 2)")]
#[case("1+2-3", "((1 + 2) - 3)")]
#[case("8-(3-2)", "(8 - (3 - 2))")]
fn given_equal_precedence_when_parsing_then_associates_left(
    #[case] raw: &str,
    #[case] expected: &str,
) {
    let tree = parse_and_build(raw).unwrap();

    assert_eq!(tree.root().unwrap().to_string(), expected);
}

#[test]
fn given_flat_single_digit_expressions_when_converting_then_postfix_has_2n_minus_1_tokens() {
    let svc = ExpressionService::default();

    for (expr, operands) in flat_expressions(200) {
        let postfix = svc.postfix(&expr).unwrap();
        assert_eq!(postfix.len(), 2 * operands - 1, "expression {expr}");
    }
}

#[test]
fn given_built_trees_when_rebuilding_from_preorder_then_trees_are_equal() {
    let inputs = flat_expressions(100)
        .into_iter()
        .map(|(expr, _)| expr)
        .chain(["(1+2)*(3-4)/5", "((7))", "9*(8+(7*(6+5)))"].map(String::from));

    for expr in inputs {
        let tree = parse_and_build(&expr).unwrap();
        let preorder = compute_traversals(&tree).preorder;

        let rebuilt = build_from_preorder(&preorder).unwrap();

        assert_eq!(rebuilt, tree, "expression {expr}");
    }
}

#[test]
fn given_same_input_when_running_twice_then_results_identical() {
    let svc = ExpressionService::default();

    let first = svc.analyze("12*(3+45)/6-7").unwrap();
    let second = svc.analyze("12*(3+45)/6-7").unwrap();

    assert_eq!(first, second);
}

#[rstest]
#[case(TraversalStrategy::Recursive)]
#[case(TraversalStrategy::Iterative)]
fn given_any_tree_when_traversing_then_sequences_are_permutations_of_node_values(
    #[case] strategy: TraversalStrategy,
) {
    let svc = ExpressionService::new(Settings {
        traversal: strategy,
        ..Settings::default()
    });

    for (expr, _) in flat_expressions(100) {
        let tree = svc.parse_and_build(&expr).unwrap();
        let t = svc.compute_traversals(&tree);

        let count = tree.node_count();
        assert_eq!(t.preorder.len(), count);
        assert_eq!(t.inorder.len(), count);
        assert_eq!(t.postorder.len(), count);

        let sorted = |v: &[String]| v.iter().sorted().cloned().collect::<Vec<_>>();
        assert_eq!(sorted(t.preorder.as_slice()), sorted(t.inorder.as_slice()));
        assert_eq!(sorted(t.preorder.as_slice()), sorted(t.postorder.as_slice()));
    }
}

#[test]
fn given_postfix_when_comparing_with_postorder_then_they_match() {
    let svc = ExpressionService::default();

    let analysis = svc.analyze("(4+5)*(2-1)/3").unwrap();

    let postfix: Vec<String> = analysis.postfix.iter().map(ToString::to_string).collect();
    assert_eq!(postfix, analysis.traversals.postorder);
}

#[test]
fn given_generated_expressions_when_parsing_then_subtraction_is_covered() {
    let svc = ExpressionService::default();
    let with_minus: Vec<String> = flat_expressions(200)
        .into_iter()
        .map(|(expr, _)| expr)
        .filter(|expr| expr.contains('-'))
        .collect();

    assert!(!with_minus.is_empty());
    for expr in with_minus {
        assert!(svc.parse_and_build(&expr).is_ok(), "expression {expr}");
    }
}

#[test]
fn given_very_long_sum_when_iterative_strategy_then_parses_traverses_and_drops() {
    // Arrange
    let svc = ExpressionService::new(Settings {
        traversal: TraversalStrategy::Iterative,
        ..Settings::default()
    });
    let raw = vec!["1"; 200_000].join("+");

    // Act
    let tree = svc.parse_and_build(&raw).unwrap();
    let t = svc.compute_traversals(&tree);

    // Assert
    assert_eq!(tree.node_count(), 399_999);
    assert_eq!(tree.depth(), 200_000);
    assert_eq!(t.preorder.len(), 399_999);
    assert_eq!(t.inorder.first().map(String::as_str), Some("1"));
    assert_eq!(t.postorder.last().map(String::as_str), Some("+"));
    drop(t);
    drop(tree);
}

#[test]
fn given_separator_noise_when_parsing_then_ignored() {
    let tree = parse_and_build(" 3 x+ y4\t*\n2 ").unwrap();

    assert_eq!(tree, parse_and_build("3+4*2").unwrap());
}

#[test]
fn given_single_number_when_parsing_then_tree_is_one_leaf() {
    let tree = parse_and_build("(42)").unwrap();

    assert_eq!(tree.root(), Some(&ExprNode::leaf("42")));
    assert_eq!(tree.depth(), 1);
}
