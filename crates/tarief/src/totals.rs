//! Invoice totals

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use tarief_core::{totals_column, Column, Line, TotalsConfig};

/// Subtotal, VAT and grand total of a set of lines
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Totals {
    pub subtotal: f64,
    pub vat: f64,
    pub total: f64,
}

impl Totals {
    /// Figures rounded to cents for presentation
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_cents(self.subtotal),
            vat: round_cents(self.vat),
            total: round_cents(self.total),
        }
    }

    /// Labelled rows to display, honoring the configuration's visibility flags
    pub fn display_rows(&self, config: &TotalsConfig) -> Vec<(String, f64)> {
        let mut rows = Vec::new();
        if config.show_subtotal {
            rows.push(("Subtotaal".to_string(), self.subtotal));
        }
        if config.show_vat {
            rows.push((format!("BTW {}%", config.vat_percentage), self.vat));
        }
        if config.show_total {
            rows.push(("Totaal".to_string(), self.total));
        }
        rows
    }
}

/// Round a monetary amount to two decimals, halves away from zero.
///
/// Non-finite input rounds to 0.
pub fn round_cents(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(0.0)
}

/// Sum of one column's numeric value over all lines
pub fn column_sum(lines: &[Line], column_id: &str) -> f64 {
    lines.iter().map(|line| line.number(column_id)).sum()
}

/// Compute subtotal, VAT and total.
///
/// The subtotal sums the totals column (the last calculated column, else the last
/// column) over every line, summary lines included. Display flags do not affect
/// the computation.
pub fn compute_totals(lines: &[Line], columns: &[Column], config: &TotalsConfig) -> Totals {
    let subtotal = match totals_column(columns) {
        Some(column) => column_sum(lines, &column.id),
        None => 0.0,
    };
    let vat = subtotal * config.vat_percentage / 100.0;

    Totals {
        subtotal,
        vat,
        total: subtotal + vat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tarief_core::{ColumnType, LineValue};

    fn line_with(id: &str, value: impl Into<LineValue>) -> Line {
        let mut line = Line::new();
        line.set(id, value);
        line
    }

    #[test]
    fn test_compute_totals() {
        let columns = vec![
            Column::new("aantal", "Aantal", ColumnType::Quantity),
            Column::calculated("totaal", "Totaal", "aantal"),
        ];
        let lines = vec![
            line_with("totaal", 100.0),
            line_with("totaal", 200.0),
            line_with("totaal", 50.0),
        ];
        let config = TotalsConfig::with_vat(21.0).unwrap();
        assert_eq!(
            compute_totals(&lines, &columns, &config),
            Totals {
                subtotal: 350.0,
                vat: 73.5,
                total: 423.5,
            }
        );
    }

    #[test]
    fn test_flags_do_not_change_computation() {
        let columns = vec![Column::new("bedrag", "Bedrag", ColumnType::Price)];
        let lines = vec![line_with("bedrag", 10.0)];
        let hidden = TotalsConfig {
            show_subtotal: false,
            show_vat: false,
            show_total: false,
            vat_percentage: 10.0,
        };
        let totals = compute_totals(&lines, &columns, &hidden);
        assert_eq!(totals.total, 11.0);
        assert!(totals.display_rows(&hidden).is_empty());

        let shown = TotalsConfig::with_vat(10.0).unwrap();
        let rows = totals.display_rows(&shown);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].0, "BTW 10%");
    }

    #[test]
    fn test_text_and_missing_values() {
        let columns = vec![Column::new("bedrag", "Bedrag", ColumnType::Price)];
        let lines = vec![
            line_with("bedrag", "12,5"),
            line_with("bedrag", "n.v.t."),
            line_with("anders", 99.0),
        ];
        let totals = compute_totals(&lines, &columns, &TotalsConfig::with_vat(0.0).unwrap());
        assert_eq!(totals.subtotal, 12.5);
        assert_eq!(totals.vat, 0.0);
    }

    #[test]
    fn test_line_keys_match_column_ignoring_case() {
        let columns = vec![Column::calculated("totaal", "Totaal", "1")];
        let lines = vec![line_with("Totaal", 30.0), line_with("TOTAAL", 12.0)];
        let totals = compute_totals(&lines, &columns, &TotalsConfig::with_vat(0.0).unwrap());
        assert_eq!(totals.subtotal, 42.0);
        assert_eq!(column_sum(&lines, "Totaal"), 42.0);
    }

    #[test]
    fn test_no_columns() {
        let lines = vec![line_with("totaal", 5.0)];
        assert_eq!(
            compute_totals(&lines, &[], &TotalsConfig::default()),
            Totals::default()
        );
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(0.23 * 100.0), 23.0);
        assert_eq!(round_cents(2.006), 2.01);
        assert_eq!(round_cents(-1.236), -1.24);
        assert_eq!(round_cents(f64::NAN), 0.0);

        let totals = Totals {
            subtotal: 10.004,
            vat: 2.1008,
            total: 12.1048,
        };
        assert_eq!(
            totals.rounded(),
            Totals {
                subtotal: 10.0,
                vat: 2.1,
                total: 12.1,
            }
        );
    }
}
