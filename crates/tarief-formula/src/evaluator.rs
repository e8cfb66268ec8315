//! Formula evaluator
//!
//! Evaluates formula ASTs to produce numbers.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};
use crate::parser::parse_formula;
use ahash::AHashMap;
use tarief_core::column_key;

/// Name → value lookup table for formula symbols
///
/// Names are stored lowercased, so lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    values: AHashMap<String, f64>,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name, replacing any previous binding
    pub fn insert<S: AsRef<str>>(&mut self, name: S, value: f64) {
        self.values.insert(column_key(name.as_ref()), value);
    }

    /// Look up a name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(&column_key(name)).copied()
    }

    /// Check whether a name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of bound names
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether no names are bound
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// Symbol bindings (None = every symbol is unknown)
    pub symbols: Option<&'a SymbolTable>,
}

impl<'a> EvaluationContext<'a> {
    /// Create a context resolving symbols from a table
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self {
            symbols: Some(symbols),
        }
    }

    /// Create a context without symbols, for fully substituted expressions
    pub fn simple() -> Self {
        Self { symbols: None }
    }

    /// Resolve a symbol to its value
    pub fn resolve_symbol(&self, name: &str) -> FormulaResult<f64> {
        self.symbols
            .and_then(|table| table.get(name))
            .ok_or_else(|| FormulaError::UnknownSymbol(name.to_string()))
    }
}

/// Evaluate a formula expression
pub fn evaluate(expr: &FormulaExpr, ctx: &EvaluationContext) -> FormulaResult<f64> {
    let value = match expr {
        FormulaExpr::Number(n) => *n,

        FormulaExpr::Symbol(name) => ctx.resolve_symbol(name)?,

        FormulaExpr::BinaryOp { op, left, right } => evaluate_binary_op(*op, left, right, ctx)?,

        FormulaExpr::UnaryOp { op, operand } => match op {
            UnaryOperator::Negate => -evaluate(operand, ctx)?,
        },
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(FormulaError::NonFinite)
    }
}

/// Evaluate a binary operation
fn evaluate_binary_op(
    op: BinaryOperator,
    left: &FormulaExpr,
    right: &FormulaExpr,
    ctx: &EvaluationContext,
) -> FormulaResult<f64> {
    let l = evaluate(left, ctx)?;
    let r = evaluate(right, ctx)?;

    match op {
        BinaryOperator::Add => Ok(l + r),
        BinaryOperator::Subtract => Ok(l - r),
        BinaryOperator::Multiply => Ok(l * r),
        BinaryOperator::Divide => {
            if r == 0.0 {
                Err(FormulaError::DivisionByZero)
            } else {
                Ok(l / r)
            }
        }
    }
}

/// Evaluate a fully substituted arithmetic expression, returning 0 on any failure.
///
/// Any name left in the expression is unknown, so it fails like a syntax error.
///
/// ```rust
/// use tarief_formula::eval_arithmetic;
///
/// assert_eq!(eval_arithmetic("2+3*4"), 14.0);
/// assert_eq!(eval_arithmetic("(2+3)*4"), 20.0);
/// assert_eq!(eval_arithmetic("prijs*2"), 0.0);
/// ```
pub fn eval_arithmetic(expression: &str) -> f64 {
    try_eval_arithmetic(expression).unwrap_or(0.0)
}

/// Evaluate a fully substituted arithmetic expression
pub fn try_eval_arithmetic(expression: &str) -> FormulaResult<f64> {
    let ast = parse_formula(expression)?;
    evaluate(&ast, &EvaluationContext::simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn eval(formula: &str) -> FormulaResult<f64> {
        try_eval_arithmetic(formula)
    }

    #[test]
    fn test_evaluate_number() {
        assert_eq!(eval("42").unwrap(), 42.0);
        assert_eq!(eval("3.14").unwrap(), 3.14);
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("2+3*4").unwrap(), 14.0);
        assert_eq!(eval("(2+3)*4").unwrap(), 20.0);
        assert_eq!(eval("-5+3").unwrap(), -2.0);
        assert_eq!(eval("10-4-3").unwrap(), 3.0);
        assert_eq!(eval("100/10/2").unwrap(), 5.0);
        assert_eq!(eval("2*-3").unwrap(), -6.0);
        assert_eq!(eval("-(2+3)*2").unwrap(), -10.0);
        assert_eq!(eval(" 1.5 * 4 ").unwrap(), 6.0);
    }

    #[test]
    fn test_evaluate_symbols() {
        let mut table = SymbolTable::new();
        table.insert("Aantal", 3.0);
        table.insert("prijs", 12.5);
        let ctx = EvaluationContext::new(&table);

        let ast = parse_formula("AANTAL * Prijs").unwrap();
        assert_eq!(evaluate(&ast, &ctx).unwrap(), 37.5);

        let ast = parse_formula("aantal * korting").unwrap();
        assert_eq!(
            evaluate(&ast, &ctx),
            Err(FormulaError::UnknownSymbol("korting".into()))
        );
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("1/0"), Err(FormulaError::DivisionByZero));
        assert_eq!(eval("1/(2-2)"), Err(FormulaError::DivisionByZero));
        assert_eq!(eval_arithmetic("5/0"), 0.0);
    }

    #[test]
    fn test_overflow_is_not_finite() {
        let huge = format!("1{}", "0".repeat(300));
        let formula = format!("{}*{}", huge, huge);
        assert_eq!(eval(&formula), Err(FormulaError::NonFinite));
    }

    #[test]
    fn test_fail_soft() {
        assert_eq!(eval_arithmetic(""), 0.0);
        assert_eq!(eval_arithmetic("1+"), 0.0);
        assert_eq!(eval_arithmetic("uurtarief*2"), 0.0);
        assert_eq!(eval_arithmetic("((1)"), 0.0);
        // Unknown characters are dropped before parsing
        assert_eq!(eval_arithmetic("2 € * 3"), 6.0);
    }

    #[test]
    fn test_long_chains() {
        // 20k terms exceed the token limit and collapse to 0 instead of overflowing the stack
        let long = format!("{}1", "1+".repeat(20_000));
        assert!(matches!(eval(&long), Err(FormulaError::Parse(_))));
        assert_eq!(eval_arithmetic(&long), 0.0);

        let long_product = format!("{}2", "2*".repeat(200_000));
        assert_eq!(eval_arithmetic(&long_product), 0.0);

        // 400 terms stay within the limit
        let chain = format!("{}1", "1+".repeat(399));
        assert_eq!(eval(&chain).unwrap(), 400.0);
    }

    #[test]
    fn test_symbol_table() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        table.insert("KM", 120.0);
        assert!(table.contains("km"));
        assert_eq!(table.get("Km"), Some(120.0));
        table.insert("km", 80.0);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("km"), Some(80.0));
    }

    proptest! {
        #[test]
        fn prop_integer_arithmetic_matches(a in 0i64..1000, b in 0i64..1000, c in 1i64..1000) {
            let formula = format!("{} + {} * {} - ({} - {})", a, b, c, c, a);
            let expected = (a + b * c - (c - a)) as f64;
            prop_assert_eq!(eval(&formula).unwrap(), expected);
        }

        #[test]
        fn prop_never_panics(input in "\\PC{0,64}") {
            let value = eval_arithmetic(&input);
            prop_assert!(value.is_finite());
        }
    }
}
