//! Tests for formula evaluation through the public API

use tarief::{
    eval_arithmetic, evaluate, parse_formula, resolve, try_eval_arithmetic, EvaluationContext,
    FormulaError, LineValues,
};
use tarief::prelude::*;

/// Operator precedence and parentheses
#[test]
fn test_evaluate_simple_formulas() {
    assert_eq!(eval_arithmetic("2+3*4"), 14.0);
    assert_eq!(eval_arithmetic("(2+3)*4"), 20.0);
    assert_eq!(eval_arithmetic("-5+3"), -2.0);
    assert_eq!(eval_arithmetic("10 / 4 - 1"), 1.5);
    assert_eq!(eval_arithmetic("2 * -(3 + 1)"), -8.0);
}

/// Parsed formulas evaluate without a symbol table when they have no names
#[test]
fn test_evaluate_parsed() {
    let ast = parse_formula("(1 + 2) * 3").unwrap();
    let ctx = EvaluationContext::simple();
    assert_eq!(evaluate(&ast, &ctx).unwrap(), 9.0);
}

/// Anything that cannot be evaluated is 0
#[test]
fn test_fail_soft() {
    assert_eq!(eval_arithmetic(""), 0.0);
    assert_eq!(eval_arithmetic("2 +"), 0.0);
    assert_eq!(eval_arithmetic("(1 + 2"), 0.0);
    assert_eq!(eval_arithmetic("uurtarief * 2"), 0.0);
    assert_eq!(eval_arithmetic("1 / 0"), 0.0);
    assert_eq!(
        try_eval_arithmetic("1 / (2 - 2)"),
        Err(FormulaError::DivisionByZero)
    );
}

/// Characters outside the formula language are ignored
#[test]
fn test_foreign_characters_dropped() {
    assert_eq!(eval_arithmetic("2 + 3; drop"), 0.0);
    assert_eq!(eval_arithmetic("€ 2 + 3"), 5.0);
    assert_eq!(eval_arithmetic("2 ** 3"), 0.0);
}

/// Column values and default constants bind by whole name
#[test]
fn test_resolve_line_values() {
    let defaults = Defaults {
        hourly_rate: 45.0,
        km_rate: 0.5,
        dot_price: 21.0,
        dot_is_percentage: false,
    };
    let mut values = LineValues::new();
    values.insert("uren".into(), 8.0.into());
    values.insert("km".into(), LineValue::text("40"));
    values.insert("omschrijving".into(), LineValue::text("Rit Tilburg"));

    assert_eq!(resolve("uren * uurtarief", &values, &defaults), 360.0);
    assert_eq!(resolve("km * kmtarief + km * dotprijs", &values, &defaults), 860.0);
    assert_eq!(resolve("omschrijving * 3", &values, &defaults), 0.0);
    assert_eq!(resolve("uren * onbekend", &values, &defaults), 0.0);
}
