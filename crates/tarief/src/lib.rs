//! # tarief
//!
//! Template-driven invoice line calculation.
//!
//! An administrator describes an invoice as a [`Template`]: ordered columns,
//! some of them calculated from a small arithmetic formula over the other
//! columns and a few pricing constants. This crate turns such a template into
//! working invoice lines.
//!
//! ## Features
//!
//! - Create empty lines and edit them one cell at a time
//! - Import lines from time-tracking entries, with kilometer and DOT surcharges
//! - Subtotal, VAT and grand total
//! - Template diagnostics for broken formulas
//!
//! Line computation never fails: a formula that cannot be evaluated yields 0.
//!
//! ## Example
//!
//! ```rust
//! use tarief::prelude::*;
//!
//! let columns = vec![
//!     Column::new("omschrijving", "Omschrijving", ColumnType::Text),
//!     Column::new("aantal", "Aantal", ColumnType::Quantity),
//!     Column::new("prijs", "Prijs", ColumnType::Price),
//!     Column::calculated("totaal", "Totaal", "aantal * prijs"),
//! ];
//! let defaults = Defaults { hourly_rate: 50.0, ..Default::default() };
//!
//! let line = create_empty_line(&columns, &defaults);
//! let line = update_line_value(&line, "aantal", "2", &columns, &defaults);
//! assert_eq!(line.number("totaal"), 100.0);
//!
//! let totals = compute_totals(&[line], &columns, &TotalsConfig::default());
//! assert_eq!(totals.total, 121.0);
//! ```

pub mod import;
pub mod line;
pub mod prelude;
pub mod record;
pub mod totals;
pub mod validation;

pub use import::{
    import_entries, import_from_source, summary_lines, DOT_SUMMARY_LABEL, KM_SUMMARY_LABEL,
};
pub use line::{create_empty_line, recompute_line, update_line_value};
pub use record::{invoice_record, invoice_records, InvoiceLineRecord};
pub use totals::{column_sum, compute_totals, round_cents, Totals};
pub use validation::{check_formula, check_formulas, validate_template, TemplateIssue};

// Re-export core types
pub use tarief_core::{
    parse_number, totals_column, Column, ColumnType, Defaults, Error, Line, LineId, LineKind,
    LineValue, LineValues, Result, Template, TimeEntry, TotalsConfig, DOT_PRICE_NAME,
    HOURLY_RATE_NAME, KM_RATE_NAME,
};

// Re-export formula types
pub use tarief_formula::{
    eval_arithmetic, evaluate, parse_formula, resolve, try_eval_arithmetic, try_resolve,
    EvaluationContext, FormulaError, FormulaExpr, FormulaResult, SymbolTable,
};

/// Extension trait for Template to work with lines directly
pub trait TemplateExt {
    /// A fresh line with defaults and computed columns
    fn empty_line(&self) -> Line;

    /// Edit one cell of a line
    fn update_line(&self, line: &Line, column_id: &str, raw: &str) -> Line;

    /// Import time entries, appending surcharge lines
    fn import(&self, entries: &[TimeEntry]) -> Vec<Line>;

    /// Totals of a set of lines under this template's VAT settings
    fn totals(&self, lines: &[Line]) -> Totals;

    /// Problems that would make formulas evaluate to 0
    fn issues(&self) -> Vec<TemplateIssue>;
}

impl TemplateExt for Template {
    fn empty_line(&self) -> Line {
        create_empty_line(&self.columns, &self.defaults)
    }

    fn update_line(&self, line: &Line, column_id: &str, raw: &str) -> Line {
        update_line_value(line, column_id, raw, &self.columns, &self.defaults)
    }

    fn import(&self, entries: &[TimeEntry]) -> Vec<Line> {
        import_entries(entries, &self.columns, &self.defaults)
    }

    fn totals(&self, lines: &[Line]) -> Totals {
        compute_totals(lines, &self.columns, &self.totals)
    }

    fn issues(&self) -> Vec<TemplateIssue> {
        validate_template(self)
    }
}
