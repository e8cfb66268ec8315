//! Column types

use std::fmt;

/// Type tag of a template column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ColumnType {
    /// Free text (descriptions)
    Text,
    /// Number of units
    Quantity,
    /// Unit price
    Price,
    /// Distance driven
    Kilometers,
    /// Hours worked
    Hours,
    /// Derived from a formula over the other columns
    Calculated,
}

impl ColumnType {
    /// Get the tag string for this type
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Quantity => "quantity",
            ColumnType::Price => "price",
            ColumnType::Kilometers => "kilometers",
            ColumnType::Hours => "hours",
            ColumnType::Calculated => "calculated",
        }
    }

    /// Whether values of this type are stored as numbers
    pub fn is_numeric(&self) -> bool {
        !matches!(self, ColumnType::Text)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One schema entry of a template
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Identifier, unique within the template and matched case-insensitively in formulas
    pub id: String,
    /// Display name
    pub name: String,
    /// Relative width for layout
    #[cfg_attr(feature = "serde", serde(default = "default_width"))]
    pub width: f64,
    /// Type tag
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub column_type: ColumnType,
    /// Formula (only meaningful for [`ColumnType::Calculated`])
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub formula: Option<String>,
}

#[cfg(feature = "serde")]
fn default_width() -> f64 {
    1.0
}

impl Column {
    /// Create a new non-calculated column
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N, column_type: ColumnType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width: 1.0,
            column_type,
            formula: None,
        }
    }

    /// Create a calculated column with a formula
    pub fn calculated<I, N, F>(id: I, name: N, formula: F) -> Self
    where
        I: Into<String>,
        N: Into<String>,
        F: Into<String>,
    {
        Self {
            id: id.into(),
            name: name.into(),
            width: 1.0,
            column_type: ColumnType::Calculated,
            formula: Some(formula.into()),
        }
    }

    /// Set width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Check if this is a calculated column
    pub fn is_calculated(&self) -> bool {
        self.column_type == ColumnType::Calculated
    }

    /// The formula text, if this is a calculated column with a non-blank formula
    pub fn formula(&self) -> Option<&str> {
        if !self.is_calculated() {
            return None;
        }
        self.formula.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Identifier lowercased, as it is matched inside formulas and lines
    pub fn key(&self) -> String {
        column_key(&self.id)
    }

    /// Column holds a unit price: typed `price`, or named like one
    pub fn is_price_like(&self) -> bool {
        if self.column_type == ColumnType::Price {
            return true;
        }
        if self.column_type != ColumnType::Quantity && self.column_type.is_numeric() {
            let key = self.key();
            return !self.is_calculated()
                && ["prijs", "price", "tarief"].iter().any(|p| key.contains(p));
        }
        false
    }

    /// Column holds a unit count: typed `quantity`, or named like one
    pub fn is_quantity_like(&self) -> bool {
        if self.column_type == ColumnType::Quantity {
            return true;
        }
        if self.column_type.is_numeric() && !self.is_calculated() && !self.is_price_like() {
            let key = self.key();
            return ["aantal", "quantity", "qty"].iter().any(|p| key.contains(p));
        }
        false
    }
}

/// Normalized form of a column identifier.
///
/// Every identifier lookup (line values, formula symbols, column search) goes
/// through this, so `Totaal`, `TOTAAL` and `totaal` name the same column.
pub fn column_key(id: &str) -> String {
    id.to_lowercase()
}

/// Find a column by identifier (case-insensitive)
pub fn find_column<'a>(columns: &'a [Column], id: &str) -> Option<&'a Column> {
    let key = column_key(id);
    columns.iter().find(|c| c.key() == key)
}

/// Find the column whose value is summed into invoice totals.
///
/// This is the last calculated column, or the last column when none is calculated.
pub fn totals_column(columns: &[Column]) -> Option<&Column> {
    columns
        .iter()
        .rev()
        .find(|c| c.is_calculated())
        .or_else(|| columns.last())
}
