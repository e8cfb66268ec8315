//! Column value resolution
//!
//! Binds the names inside a calculated column's formula to the values of the
//! line being computed and to the template's default constants, then
//! evaluates the formula.

use crate::ast::FormulaExpr;
use crate::error::FormulaResult;
use crate::evaluator::{evaluate, EvaluationContext, SymbolTable};
use crate::parser::parse_formula;
use tarief_core::{Defaults, LineValues};

/// Build the symbol table for one line.
///
/// Default constants shadow column identifiers with the same name. Text values
/// that do not parse as numbers bind to 0.
pub fn line_symbols(values: &LineValues, defaults: &Defaults) -> SymbolTable {
    let mut table = SymbolTable::new();
    for (id, value) in values {
        table.insert(id, value.as_number());
    }
    for name in Defaults::CONSTANT_NAMES {
        if let Some(value) = defaults.get(name) {
            table.insert(name, value);
        }
    }
    table
}

/// Evaluate a formula against a line, reporting why it failed
pub fn try_resolve(formula: &str, values: &LineValues, defaults: &Defaults) -> FormulaResult<f64> {
    let ast = parse_formula(formula)?;
    resolve_expr(&ast, values, defaults)
}

/// Evaluate an already parsed formula against a line
pub fn resolve_expr(
    expr: &FormulaExpr,
    values: &LineValues,
    defaults: &Defaults,
) -> FormulaResult<f64> {
    let table = line_symbols(values, defaults);
    evaluate(expr, &EvaluationContext::new(&table))
}

/// Evaluate a formula against a line, returning 0 on any failure
pub fn resolve(formula: &str, values: &LineValues, defaults: &Defaults) -> f64 {
    try_resolve(formula, values, defaults).unwrap_or(0.0)
}
