//! Draft line life cycle
//!
//! Lines are created empty or edited one cell at a time; after every change all
//! calculated columns are recomputed in declaration order. Nothing here fails on
//! malformed input: formulas that cannot be evaluated produce 0.

use tarief_core::{find_column, parse_number, Column, ColumnType, Defaults, Line, LineValue};
use tarief_formula::try_resolve;

/// Initial value of a column on a fresh line
fn default_value(column: &Column, defaults: &Defaults) -> LineValue {
    match column.column_type {
        ColumnType::Text => LineValue::text(""),
        _ if column.is_price_like() => LineValue::Number(defaults.hourly_rate),
        _ if column.is_quantity_like() => LineValue::Number(1.0),
        _ => LineValue::Number(0.0),
    }
}

/// Create a line with every column at its default, then compute calculated columns.
///
/// Text columns start empty, price-like columns at the hourly rate, quantity-like
/// columns at 1 and every other numeric column at 0.
pub fn create_empty_line(columns: &[Column], defaults: &Defaults) -> Line {
    let mut line = Line::new();
    for column in columns {
        line.set(&column.id, default_value(column, defaults));
    }
    recompute_in_place(&mut line, columns, defaults);
    line
}

/// Return `line` with one cell changed and calculated columns recomputed.
///
/// Text columns keep `raw` verbatim; other columns parse it as a number (0 when it
/// does not parse). Unknown columns and summary lines leave the line unchanged.
pub fn update_line_value(
    line: &Line,
    column_id: &str,
    raw: &str,
    columns: &[Column],
    defaults: &Defaults,
) -> Line {
    let mut updated = line.clone();

    if !line.is_editable() {
        tracing::debug!(line = %line.id, "ignoring edit of summary line");
        return updated;
    }

    let Some(column) = find_column(columns, column_id) else {
        tracing::debug!(line = %line.id, column = column_id, "ignoring edit of unknown column");
        return updated;
    };

    let value = match column.column_type {
        ColumnType::Text => LineValue::text(raw),
        _ => LineValue::Number(parse_number(raw)),
    };
    updated.set(&column.id, value);
    recompute_in_place(&mut updated, columns, defaults);
    updated
}

/// Return `line` with all calculated columns recomputed, e.g. after a template change
pub fn recompute_line(line: &Line, columns: &[Column], defaults: &Defaults) -> Line {
    let mut updated = line.clone();
    if updated.is_editable() {
        recompute_in_place(&mut updated, columns, defaults);
    }
    updated
}

/// Compute every calculated column top to bottom, once each
pub(crate) fn recompute_in_place(line: &mut Line, columns: &[Column], defaults: &Defaults) {
    for column in columns.iter().filter(|c| c.is_calculated()) {
        let value = evaluate_column(line, column, defaults);
        line.set(&column.id, LineValue::Number(value));
    }
}

/// Value of a calculated column on a line; failures collapse to 0
fn evaluate_column(line: &Line, column: &Column, defaults: &Defaults) -> f64 {
    let Some(formula) = column.formula() else {
        tracing::debug!(column = %column.id, "calculated column has no formula, using 0");
        return 0.0;
    };

    match try_resolve(formula, &line.values, defaults) {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!(
                line = %line.id,
                column = %column.id,
                formula,
                error = %e,
                "formula evaluation failed, using 0"
            );
            0.0
        }
    }
}
