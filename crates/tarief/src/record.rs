//! Invoice line records
//!
//! A finished invoice stores each line as description, quantity, unit price and
//! total, independent of the template that produced it.

use tarief_core::{totals_column, Column, ColumnType, Line};

/// One persisted invoice line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct InvoiceLineRecord {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub total: f64,
}

/// Flatten a line into a record.
///
/// The description comes from the first text column and the total from the
/// totals column. Quantity is the first quantity-like or hours column (1 when
/// there is none). Unit price is the first price-like column, or the total
/// divided by the quantity when the template has no price column.
pub fn invoice_record(line: &Line, columns: &[Column]) -> InvoiceLineRecord {
    let description = columns
        .iter()
        .find(|c| c.column_type == ColumnType::Text)
        .and_then(|c| line.get(&c.id))
        .and_then(|v| v.as_text())
        .map(str::to_string)
        .unwrap_or_default();

    let quantity = columns
        .iter()
        .find(|c| c.is_quantity_like() || c.column_type == ColumnType::Hours)
        .map(|c| line.number(&c.id))
        .unwrap_or(1.0);

    let total = totals_column(columns)
        .map(|c| line.number(&c.id))
        .unwrap_or(0.0);

    let unit_price = match columns.iter().find(|c| c.is_price_like()) {
        Some(column) => line.number(&column.id),
        None if quantity != 0.0 => total / quantity,
        None => total,
    };

    InvoiceLineRecord {
        description,
        quantity,
        unit_price,
        total,
    }
}

/// Records for every line, in order
pub fn invoice_records(lines: &[Line], columns: &[Column]) -> Vec<InvoiceLineRecord> {
    lines
        .iter()
        .map(|line| invoice_record(line, columns))
        .collect()
}
