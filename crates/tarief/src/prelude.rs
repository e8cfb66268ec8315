//! Prelude module - common imports for tarief users
//!
//! ```rust
//! use tarief::prelude::*;
//! ```

pub use crate::{
    // Line operations
    compute_totals,
    create_empty_line,
    import_entries,
    import_from_source,
    update_line_value,
    validate_template,

    // Template types
    Column,
    ColumnType,
    Defaults,
    Template,
    TotalsConfig,

    // Line types
    Line,
    LineKind,
    LineValue,
    TimeEntry,
    Totals,

    // Error types
    Error,
    FormulaError,
    Result,

    // Extension traits
    TemplateExt,
};
