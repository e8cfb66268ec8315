//! # tarief-core
//!
//! Core data structures for the tarief invoice calculation engine.
//!
//! This crate provides the fundamental types used throughout tarief:
//! - [`Template`], [`Column`] and [`ColumnType`] - The admin-configured invoice schema
//! - [`Defaults`] and [`TotalsConfig`] - Pricing constants and VAT settings
//! - [`Line`] and [`LineValue`] - Invoice draft rows
//! - [`TimeEntry`] - Source records for line import
//!
//! ## Example
//!
//! ```rust
//! use tarief_core::{Column, ColumnType, Line, Template};
//!
//! let template = Template::new(
//!     "rit",
//!     "Ritfactuur",
//!     vec![
//!         Column::new("aantal", "Aantal", ColumnType::Quantity),
//!         Column::new("prijs", "Prijs", ColumnType::Price),
//!         Column::calculated("totaal", "Totaal", "aantal * prijs"),
//!     ],
//! );
//! assert_eq!(template.totals_column().unwrap().id, "totaal");
//!
//! let mut line = Line::new();
//! line.set("aantal", 2.0);
//! assert_eq!(line.number("aantal"), 2.0);
//! ```

pub mod column;
pub mod entry;
pub mod error;
pub mod line;
pub mod template;

// Re-exports for convenience
pub use column::{column_key, find_column, totals_column, Column, ColumnType};
pub use entry::TimeEntry;
pub use error::{Error, Result};
pub use line::{parse_number, Line, LineId, LineKind, LineValue, LineValues};
pub use template::{
    Defaults, Template, TotalsConfig, DOT_PRICE_NAME, HOURLY_RATE_NAME, KM_RATE_NAME,
};
