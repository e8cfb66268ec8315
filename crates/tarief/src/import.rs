//! Line import from time-tracking entries
//!
//! Each entry becomes one regular line. The bulk variant appends non-editable
//! summary lines carrying the DOT surcharge and the kilometer allowance.

use crate::line::recompute_in_place;
use crate::totals::{column_sum, round_cents};
use tarief_core::{
    totals_column, Column, ColumnType, Defaults, Line, LineKind, LineValue, TimeEntry,
};

/// Label of the kilometer allowance summary line
pub const KM_SUMMARY_LABEL: &str = "Kilometervergoeding";
/// Label of the DOT surcharge summary line
pub const DOT_SUMMARY_LABEL: &str = "DOT-toeslag";

/// Column receives the kilometer figure on import
fn is_km_like(column: &Column) -> bool {
    column.column_type == ColumnType::Kilometers
        || (column.column_type.is_numeric()
            && !column.is_calculated()
            && !column.is_price_like()
            && column.key().contains("km"))
}

/// Map one time entry onto the template's columns and compute calculated columns.
///
/// Text columns get the entry's description, price-like columns the hourly rate,
/// kilometer columns the kilometers, hour and quantity-like columns the hours.
pub fn import_from_source(entry: &TimeEntry, columns: &[Column], defaults: &Defaults) -> Line {
    let mut line = Line::new();
    line.source = Some(entry.id.clone());

    for column in columns {
        let value = match column.column_type {
            ColumnType::Text => LineValue::Text(entry.line_description()),
            ColumnType::Calculated => LineValue::Number(0.0),
            _ if column.is_price_like() => LineValue::Number(defaults.hourly_rate),
            _ if is_km_like(column) => LineValue::Number(entry.km),
            ColumnType::Hours => LineValue::Number(entry.hours),
            _ if column.is_quantity_like() => LineValue::Number(entry.hours),
            _ => LineValue::Number(0.0),
        };
        line.set(&column.id, value);
    }

    recompute_in_place(&mut line, columns, defaults);
    line
}

/// Import a batch of entries and append the surcharge summary lines
pub fn import_entries(entries: &[TimeEntry], columns: &[Column], defaults: &Defaults) -> Vec<Line> {
    let mut lines: Vec<Line> = entries
        .iter()
        .map(|entry| import_from_source(entry, columns, defaults))
        .collect();

    let total_km: f64 = entries.iter().map(|e| e.km).sum();
    let summaries = summary_lines(&lines, total_km, columns, defaults);

    tracing::debug!(
        entries = entries.len(),
        summaries = summaries.len(),
        total_km,
        "imported time entries"
    );

    lines.extend(summaries);
    lines
}

/// Surcharge lines for a set of imported lines.
///
/// With DOT as a percentage, one line worth that percentage of the lines' totals
/// column. Otherwise one line for `total_km * kmtarief` and one for
/// `total_km * dotprijs`. A line is only produced when its base is positive and
/// its rate non-zero. Amounts are rounded to cents.
pub fn summary_lines(
    imported: &[Line],
    total_km: f64,
    columns: &[Column],
    defaults: &Defaults,
) -> Vec<Line> {
    let mut out = Vec::new();

    if defaults.dot_is_percentage {
        let subtotal = totals_column(columns)
            .map(|column| column_sum(imported, &column.id))
            .unwrap_or(0.0);
        if subtotal > 0.0 && defaults.dot_price != 0.0 {
            let amount = round_cents(subtotal * defaults.dot_price / 100.0);
            let label = format!("{} {}%", DOT_SUMMARY_LABEL, defaults.dot_price);
            out.push(summary_line(&label, 1.0, amount, amount, columns));
        }
        return out;
    }

    if total_km > 0.0 {
        if defaults.km_rate != 0.0 {
            let amount = round_cents(total_km * defaults.km_rate);
            let label = format!("{} ({} km)", KM_SUMMARY_LABEL, total_km);
            out.push(summary_line(&label, total_km, defaults.km_rate, amount, columns));
        }
        if defaults.dot_price != 0.0 {
            let amount = round_cents(total_km * defaults.dot_price);
            let label = format!("{} ({} km)", DOT_SUMMARY_LABEL, total_km);
            out.push(summary_line(&label, total_km, defaults.dot_price, amount, columns));
        }
    }

    out
}

/// Build a non-editable line showing `quantity × rate = amount`
fn summary_line(label: &str, quantity: f64, rate: f64, amount: f64, columns: &[Column]) -> Line {
    let mut line = Line::new();
    line.kind = LineKind::Summary;

    let mut labelled = false;
    for column in columns {
        let value = match column.column_type {
            ColumnType::Text if !labelled => {
                labelled = true;
                LineValue::text(label)
            }
            ColumnType::Text => LineValue::text(""),
            ColumnType::Calculated => LineValue::Number(0.0),
            _ if column.is_price_like() => LineValue::Number(rate),
            _ if column.is_quantity_like() || column.column_type == ColumnType::Hours => {
                LineValue::Number(quantity)
            }
            _ => LineValue::Number(0.0),
        };
        line.set(&column.id, value);
    }

    if let Some(column) = totals_column(columns) {
        line.set(&column.id, LineValue::Number(amount));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("omschrijving", "Omschrijving", ColumnType::Text),
            Column::new("uren", "Uren", ColumnType::Hours),
            Column::new("km", "Km", ColumnType::Kilometers),
            Column::new("uurprijs", "Uurprijs", ColumnType::Price),
            Column::calculated("totaal", "Totaal", "uren * uurprijs"),
        ]
    }

    fn entry(id: &str, hours: f64, km: f64) -> TimeEntry {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        TimeEntry::new(id, date, "Rit Venlo", hours, km)
    }

    #[test]
    fn test_import_from_source() {
        let defaults = Defaults {
            hourly_rate: 50.0,
            ..Default::default()
        };
        let line = import_from_source(&entry("t1", 8.0, 120.0), &columns(), &defaults);
        assert_eq!(
            line.get("omschrijving"),
            Some(&LineValue::text("14-05-2024 Rit Venlo"))
        );
        assert_eq!(line.number("uren"), 8.0);
        assert_eq!(line.number("km"), 120.0);
        assert_eq!(line.number("uurprijs"), 50.0);
        assert_eq!(line.number("totaal"), 400.0);
        assert_eq!(line.source.as_deref(), Some("t1"));
        assert!(line.is_editable());
    }

    #[test]
    fn test_quantity_column_gets_hours() {
        let cols = vec![
            Column::new("aantal", "Aantal", ColumnType::Quantity),
            Column::new("kilometerstand", "Stand", ColumnType::Kilometers),
        ];
        let line = import_from_source(&entry("t1", 6.5, 42.0), &cols, &Defaults::default());
        assert_eq!(line.number("aantal"), 6.5);
        assert_eq!(line.number("kilometerstand"), 42.0);
    }

    #[test]
    fn test_percentage_summary() {
        let defaults = Defaults {
            hourly_rate: 50.0,
            km_rate: 0.23,
            dot_price: 10.0,
            dot_is_percentage: true,
        };
        // 10h * 50 = 500
        let lines = import_entries(
            &[entry("t1", 4.0, 30.0), entry("t2", 6.0, 70.0)],
            &columns(),
            &defaults,
        );
        assert_eq!(lines.len(), 3);
        let summary = &lines[2];
        assert_eq!(summary.kind, LineKind::Summary);
        assert_eq!(summary.number("totaal"), 50.0);
        assert_eq!(
            summary.get("omschrijving"),
            Some(&LineValue::text("DOT-toeslag 10%"))
        );
    }

    #[test]
    fn test_km_summaries() {
        let defaults = Defaults {
            hourly_rate: 50.0,
            km_rate: 0.23,
            dot_price: 21.0,
            dot_is_percentage: false,
        };
        let lines = import_entries(
            &[entry("t1", 4.0, 30.0), entry("t2", 6.0, 70.0)],
            &columns(),
            &defaults,
        );
        assert_eq!(lines.len(), 4);

        let km = &lines[2];
        assert_eq!(km.kind, LineKind::Summary);
        assert_eq!(km.number("totaal"), 23.0);
        assert_eq!(km.number("uren"), 100.0);
        assert_eq!(km.number("uurprijs"), 0.23);

        let dot = &lines[3];
        assert_eq!(dot.number("totaal"), 2100.0);
    }

    #[test]
    fn test_summaries_skipped_without_base_or_rate() {
        let no_rates = Defaults {
            hourly_rate: 50.0,
            ..Default::default()
        };
        let lines = import_entries(&[entry("t1", 4.0, 30.0)], &columns(), &no_rates);
        assert_eq!(lines.len(), 1);

        let only_km = Defaults {
            km_rate: 0.19,
            ..no_rates
        };
        let lines = import_entries(&[entry("t1", 4.0, 30.0)], &columns(), &only_km);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].number("totaal"), 5.7);

        let no_km = Defaults {
            km_rate: 0.19,
            dot_price: 21.0,
            ..no_rates
        };
        let lines = import_entries(&[entry("t1", 4.0, 0.0)], &columns(), &no_km);
        assert_eq!(lines.len(), 1);

        let percentage_on_nothing = Defaults {
            dot_price: 10.0,
            dot_is_percentage: true,
            ..Default::default()
        };
        assert!(summary_lines(&[], 0.0, &columns(), &percentage_on_nothing).is_empty());
    }
}
