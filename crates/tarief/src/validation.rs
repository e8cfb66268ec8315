//! Template diagnostics
//!
//! Line computation never fails, so a broken formula silently yields 0. These
//! checks let an administrator find such problems while authoring a template.

use crate::line::create_empty_line;
use std::collections::HashSet;
use std::fmt;
use tarief_core::{Defaults, LineValues, Template};
use tarief_formula::{is_identifier, parse_formula, try_resolve, FormulaError, FormulaResult};

/// A problem found in a template
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateIssue {
    /// Template has no columns
    NoColumns,
    /// Two columns share an identifier (case-insensitive)
    DuplicateColumn(String),
    /// Identifier cannot be written as a single name in a formula
    InvalidIdentifier(String),
    /// Calculated column without a formula
    MissingFormula(String),
    /// Formula does not parse
    InvalidFormula { column: String, error: FormulaError },
    /// Formula uses a name that is neither a column nor a default constant
    UnknownReference { column: String, name: String },
    /// Formula reads a calculated column that is computed later (or itself)
    ForwardReference { column: String, name: String },
    /// VAT percentage outside 0-100
    VatOutOfRange(f64),
}

impl fmt::Display for TemplateIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateIssue::NoColumns => write!(f, "template has no columns"),
            TemplateIssue::DuplicateColumn(id) => write!(f, "duplicate column '{}'", id),
            TemplateIssue::InvalidIdentifier(id) => {
                write!(f, "column '{}' cannot be referenced from a formula", id)
            }
            TemplateIssue::MissingFormula(id) => {
                write!(f, "calculated column '{}' has no formula", id)
            }
            TemplateIssue::InvalidFormula { column, error } => {
                write!(f, "formula of '{}' is invalid: {}", column, error)
            }
            TemplateIssue::UnknownReference { column, name } => {
                write!(f, "formula of '{}' uses unknown name '{}'", column, name)
            }
            TemplateIssue::ForwardReference { column, name } => write!(
                f,
                "formula of '{}' reads '{}' before it is calculated",
                column, name
            ),
            TemplateIssue::VatOutOfRange(pct) => {
                write!(f, "VAT percentage {} outside 0-100", pct)
            }
        }
    }
}

/// Check a template for problems that would make formulas evaluate to 0
pub fn validate_template(template: &Template) -> Vec<TemplateIssue> {
    let mut issues = Vec::new();

    if template.columns.is_empty() {
        issues.push(TemplateIssue::NoColumns);
    }

    let vat = template.totals.vat_percentage;
    if !(0.0..=100.0).contains(&vat) {
        issues.push(TemplateIssue::VatOutOfRange(vat));
    }

    let mut seen = HashSet::new();
    for column in &template.columns {
        if !seen.insert(column.key()) {
            issues.push(TemplateIssue::DuplicateColumn(column.id.clone()));
        }
        if !is_identifier(&column.id) {
            issues.push(TemplateIssue::InvalidIdentifier(column.id.clone()));
        }
    }

    for (index, column) in template.columns.iter().enumerate() {
        if !column.is_calculated() {
            continue;
        }
        let Some(formula) = column.formula() else {
            issues.push(TemplateIssue::MissingFormula(column.id.clone()));
            continue;
        };
        let ast = match parse_formula(formula) {
            Ok(ast) => ast,
            Err(error) => {
                issues.push(TemplateIssue::InvalidFormula {
                    column: column.id.clone(),
                    error,
                });
                continue;
            }
        };

        for name in ast.symbols() {
            if Defaults::is_constant_name(name) {
                continue;
            }
            let position = template
                .columns
                .iter()
                .position(|c| c.key() == name);
            match position {
                None => issues.push(TemplateIssue::UnknownReference {
                    column: column.id.clone(),
                    name: name.to_string(),
                }),
                Some(pos) if pos >= index && template.columns[pos].is_calculated() => {
                    issues.push(TemplateIssue::ForwardReference {
                        column: column.id.clone(),
                        name: name.to_string(),
                    })
                }
                Some(_) => {}
            }
        }
    }

    issues
}

/// Test-evaluate a formula against sample values.
///
/// Unlike line computation this keeps the error, so an editor can tell a
/// legitimate 0 from a failed evaluation.
pub fn check_formula(
    formula: &str,
    sample: &LineValues,
    defaults: &Defaults,
) -> FormulaResult<f64> {
    try_resolve(formula, sample, defaults)
}

/// Test-evaluate every calculated column on an empty line of the template
pub fn check_formulas(template: &Template) -> Vec<(String, FormulaResult<f64>)> {
    let line = create_empty_line(&template.columns, &template.defaults);
    template
        .calculated_columns()
        .map(|column| {
            let result = match column.formula() {
                Some(formula) => check_formula(formula, &line.values, &template.defaults),
                None => Err(FormulaError::Empty),
            };
            (column.id.clone(), result)
        })
        .collect()
}
