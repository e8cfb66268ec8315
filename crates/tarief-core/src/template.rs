//! Invoice templates and their pricing defaults

use crate::column::{self, Column};
use crate::error::{Error, Result};

/// Formula name of [`Defaults::hourly_rate`]
pub const HOURLY_RATE_NAME: &str = "uurtarief";
/// Formula name of [`Defaults::km_rate`]
pub const KM_RATE_NAME: &str = "kmtarief";
/// Formula name of [`Defaults::dot_price`]
pub const DOT_PRICE_NAME: &str = "dotprijs";

/// Named pricing constants available to every formula
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Defaults {
    /// Hourly rate (`uurtarief`)
    #[cfg_attr(feature = "serde", serde(alias = "uurtarief"))]
    pub hourly_rate: f64,
    /// Rate per kilometer (`kmtarief`)
    #[cfg_attr(feature = "serde", serde(alias = "kmtarief"))]
    pub km_rate: f64,
    /// DOT surcharge (`dotprijs`), a percentage or a per-km amount
    #[cfg_attr(feature = "serde", serde(alias = "dotprijs"))]
    pub dot_price: f64,
    /// Whether [`Defaults::dot_price`] is a percentage of the subtotal
    #[cfg_attr(feature = "serde", serde(alias = "dotIsPercentage"))]
    pub dot_is_percentage: bool,
}

impl Defaults {
    /// Formula names of every constant
    pub const CONSTANT_NAMES: [&'static str; 3] =
        [HOURLY_RATE_NAME, KM_RATE_NAME, DOT_PRICE_NAME];

    /// Look up a constant by its formula name (lowercase)
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            HOURLY_RATE_NAME => Some(self.hourly_rate),
            KM_RATE_NAME => Some(self.km_rate),
            DOT_PRICE_NAME => Some(self.dot_price),
            _ => None,
        }
    }

    /// Check whether `name` (lowercase) is a reserved constant name
    pub fn is_constant_name(name: &str) -> bool {
        Self::CONSTANT_NAMES.contains(&name)
    }
}

/// Subtotal/VAT/total display settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TotalsConfig {
    pub show_subtotal: bool,
    pub show_vat: bool,
    pub show_total: bool,
    /// VAT percentage (0-100)
    pub vat_percentage: f64,
}

impl Default for TotalsConfig {
    fn default() -> Self {
        Self {
            show_subtotal: true,
            show_vat: true,
            show_total: true,
            vat_percentage: 21.0,
        }
    }
}

impl TotalsConfig {
    /// Create a configuration that shows every row with the given VAT percentage
    pub fn with_vat(vat_percentage: f64) -> Result<Self> {
        if !(0.0..=100.0).contains(&vat_percentage) {
            return Err(Error::InvalidTemplate(format!(
                "VAT percentage {} outside 0-100",
                vat_percentage
            )));
        }
        Ok(Self {
            vat_percentage,
            ..Default::default()
        })
    }
}

/// Admin-configured invoice schema
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Template {
    pub id: String,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Columns in display and evaluation order
    pub columns: Vec<Column>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub totals: TotalsConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub defaults: Defaults,
    #[cfg_attr(feature = "serde", serde(default = "default_active"))]
    pub active: bool,
}

#[cfg(feature = "serde")]
fn default_active() -> bool {
    true
}

impl Template {
    /// Create an active template with default totals and pricing
    pub fn new<I: Into<String>, N: Into<String>>(id: I, name: N, columns: Vec<Column>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            columns,
            totals: TotalsConfig::default(),
            defaults: Defaults::default(),
            active: true,
        }
    }

    /// Set the pricing defaults
    pub fn with_defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set the totals configuration
    pub fn with_totals(mut self, totals: TotalsConfig) -> Self {
        self.totals = totals;
        self
    }

    /// Find a column by identifier (case-insensitive)
    pub fn column(&self, id: &str) -> Option<&Column> {
        column::find_column(&self.columns, id)
    }

    /// The column summed into invoice totals
    pub fn totals_column(&self) -> Option<&Column> {
        column::totals_column(&self.columns)
    }

    /// Calculated columns in evaluation order
    pub fn calculated_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_calculated())
    }
}
