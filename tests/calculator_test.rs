use color_eyre::eyre::Result;
use proptest::prelude::*;

use pascalette::{
    evaluate,
    parser::{ParserErrorKind, MAX_NESTING_DEPTH},
    value::error::{RuntimeError, RuntimeErrorKind},
    Error, Number,
};

fn check(input: &str, expected: Number) {
    match evaluate(input) {
        Ok(actual) => assert_eq!(actual, expected, "Failed to evaluate {input:?}"),
        Err(error) => panic!("Failed to evaluate {input:?}: {error}"),
    }
}

#[test]
fn smoke_test() {
    check("3", Number::Integer(3));
}

#[test]
fn test_additive() {
    check("12 + 32 - 3 + 321", Number::Integer(362));
    check("7 - 3 + 2 - 1", Number::Integer(5));
}

#[test]
fn test_precedence() {
    check("1 + 2 * 3", Number::Integer(7));
    check("(1 + 2) * 3", Number::Integer(9));
    check("2 + 7 * 4", Number::Integer(30));
    check("7 - 8 DIV 4", Number::Integer(5));
    check("14 + 2 * 3 - 6 DIV 2", Number::Integer(17));
    check("7 + 3 * (10 DIV (12 DIV (3 + 1) - 1))", Number::Integer(22));
    check(
        "7 + 3 * (10 DIV (12 DIV (3 + 1) - 1)) DIV (2 + 3) - 5 - 3 + (8)",
        Number::Integer(10),
    );
}

#[test]
fn test_unary() {
    check("-5", Number::Integer(-5));
    check("- 3", Number::Integer(-3));
    check("+ 3", Number::Integer(3));
    check("--5", Number::Integer(5));
    check("5 - - - + - 3", Number::Integer(8));
    check("5 - - - + - (3 + 4) - +2", Number::Integer(10));
}

#[test]
fn test_real_arithmetic() {
    check("1 / 2", Number::Real(0.5));
    check("0.0", Number::Real(0.0));
    check("1 + 2 / 2 + 3 - 5", Number::Real(0.0));
    check("1.5 + 1", Number::Real(2.5));
    check("10 / 4 * 2", Number::Real(5.0));
}

#[test]
fn test_integer_division_truncates() {
    check("7 DIV 2", Number::Integer(3));
    check("-7 DIV 2", Number::Integer(-3));
    check("7.9 DIV 2", Number::Integer(3));
}

#[test]
fn test_float_division_by_zero_is_infinite() {
    check("1 / 0", Number::Real(f64::INFINITY));
}

#[test]
fn test_integer_division_by_zero() {
    let error = evaluate("1 DIV (3 - 3)").unwrap_err();
    assert!(matches!(
        error,
        Error::Runtime(RuntimeError {
            kind: RuntimeErrorKind::DivisionByZero,
            ..
        })
    ));
    assert!(!error.is_static());
    // The error points at the operator.
    assert_eq!(error.span().range(), 2..5);
}

#[test]
fn test_overflow() {
    let error = evaluate("9223372036854775807 * 2").unwrap_err();
    assert_eq!(error.code(), "RT005");
}

#[test]
fn test_identifiers_are_undefined() {
    let error = evaluate("1 + x").unwrap_err();
    assert!(matches!(
        error,
        Error::Runtime(RuntimeError {
            kind: RuntimeErrorKind::UndefinedVariable(ref name),
            ..
        }) if name == "x"
    ));
}

#[test]
fn test_syntax_errors() -> Result<()> {
    for (input, code) in [
        ("", "PS002"),
        ("1 +", "PS002"),
        ("(1 + 2", "PS001"),
        ("1 2", "PS004"),
        ("1 + ?", "LX001"),
    ] {
        let error = evaluate(input).unwrap_err();
        assert!(error.is_static(), "{input:?} should fail before evaluation");
        assert_eq!(error.code(), code, "Wrong error for {input:?}: {error}");
    }
    Ok(())
}

#[test]
fn test_missing_parenthesis_message() {
    let Error::Parser(error) = evaluate("(1 + 2").unwrap_err() else {
        panic!("Expected a syntax error");
    };
    assert!(matches!(error.kind, ParserErrorKind::UnexpectedToken { .. }));
    assert_eq!(
        format!("{error}"),
        "Expected RPAREN but got END_OF_INPUT. at offset 6"
    );
}

#[test]
fn test_runtime_error_message_has_offset() {
    let error = evaluate("1 DIV 0").unwrap_err();
    assert_eq!(format!("{error}"), "Integer division by zero at offset 2");
}

#[test]
fn test_long_sign_chains() {
    check(&format!("{}5", "-".repeat(200_000)), Number::Integer(5));
    check(&format!("{}5", "-".repeat(200_001)), Number::Integer(-5));
    check(&format!("1 - {}2.5", "+-".repeat(100_001)), Number::Real(3.5));
}

#[test]
fn test_negating_the_minimum_overflows_at_the_innermost_sign() {
    let error = evaluate("--(-9223372036854775807 - 1)").unwrap_err();
    assert_eq!(error.code(), "RT005");
    assert_eq!(error.span().range(), 1..2);
}

#[test]
fn test_nesting_limit() {
    let depth = MAX_NESTING_DEPTH;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    check(&source, Number::Integer(1));

    let depth = 100_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let Error::Parser(error) = evaluate(&source).unwrap_err() else {
        panic!("Expected a syntax error");
    };
    assert_eq!(error.code(), "PS005");
    assert_eq!(error.span.range(), MAX_NESTING_DEPTH..MAX_NESTING_DEPTH + 1);
}

// Property-based tests

proptest! {
    #[test]
    fn additive_chains_evaluate_left_to_right(
        first in -1_000_000i64..1_000_000,
        rest in prop::collection::vec((any::<bool>(), 0i64..1_000_000), 0..50),
    ) {
        let mut source = first.to_string();
        let mut expected = first;
        for (is_addition, operand) in rest.iter() {
            if *is_addition {
                source.push_str(&format!(" + {operand}"));
                expected += operand;
            } else {
                source.push_str(&format!(" - {operand}"));
                expected -= operand;
            }
        }
        prop_assert_eq!(evaluate(&source), Ok(Number::Integer(expected)));
    }

    #[test]
    fn parentheses_do_not_change_values(lhs in 0i64..10_000, rhs in 1i64..10_000) {
        let plain = evaluate(&format!("{lhs} DIV {rhs}"));
        let grouped = evaluate(&format!("(({lhs})) DIV ({rhs})"));
        prop_assert_eq!(plain, grouped);
    }
}
