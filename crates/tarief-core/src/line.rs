//! Invoice draft lines

use crate::column::column_key;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Value of one cell in a line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum LineValue {
    Number(f64),
    Text(String),
}

impl LineValue {
    /// Create a new text value
    pub fn text<S: Into<String>>(s: S) -> Self {
        LineValue::Text(s.into())
    }

    /// Numeric view of the value.
    ///
    /// Text that parses as a number is used as such; anything else (including
    /// NaN and infinities) is 0.
    pub fn as_number(&self) -> f64 {
        match self {
            LineValue::Number(n) if n.is_finite() => *n,
            LineValue::Number(_) => 0.0,
            LineValue::Text(s) => parse_number(s),
        }
    }

    /// Try to get the value as a string
    pub fn as_text(&self) -> Option<&str> {
        match self {
            LineValue::Text(s) => Some(s),
            LineValue::Number(_) => None,
        }
    }

}

impl Default for LineValue {
    fn default() -> Self {
        LineValue::Number(0.0)
    }
}

impl fmt::Display for LineValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineValue::Number(n) => write!(f, "{}", n),
            LineValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for LineValue {
    fn from(n: f64) -> Self {
        LineValue::Number(n)
    }
}

impl From<i32> for LineValue {
    fn from(n: i32) -> Self {
        LineValue::Number(n as f64)
    }
}

impl From<&str> for LineValue {
    fn from(s: &str) -> Self {
        LineValue::text(s)
    }
}

impl From<String> for LineValue {
    fn from(s: String) -> Self {
        LineValue::Text(s)
    }
}

/// Parse user input as a number, falling back to 0.
///
/// Accepts a comma as decimal separator. Non-finite results are rejected.
pub fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    let normalized = trimmed.replace(',', ".");
    match normalized.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Column identifier → value, ordered by identifier
pub type LineValues = BTreeMap<String, LineValue>;

/// Local identifier of a draft line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct LineId(pub u64);

static NEXT_LINE_ID: AtomicU64 = AtomicU64::new(1);

impl LineId {
    /// Allocate a fresh process-unique identifier
    pub fn next() -> Self {
        LineId(NEXT_LINE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether a line is user data or a generated surcharge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum LineKind {
    #[default]
    Regular,
    /// Non-editable surcharge line generated by a bulk import
    Summary,
}

/// One row of invoice data
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    #[cfg_attr(feature = "serde", serde(default = "LineId::next"))]
    pub id: LineId,
    /// Values keyed by normalized column identifier (see [`column_key`])
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "deserialize_values")
    )]
    pub values: LineValues,
    /// Time entry this line was imported from
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub source: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: LineKind,
}

impl Line {
    /// Create a regular line without values
    pub fn new() -> Self {
        Self::with_id(LineId::next())
    }

    /// Create a regular line with a given identifier
    pub fn with_id(id: LineId) -> Self {
        Self {
            id,
            values: LineValues::new(),
            source: None,
            kind: LineKind::Regular,
        }
    }

    /// Get a value by column identifier (case-insensitive)
    pub fn get(&self, column_id: &str) -> Option<&LineValue> {
        self.values.get(&column_key(column_id))
    }

    /// Numeric value of a column, 0 when missing or not numeric
    pub fn number(&self, column_id: &str) -> f64 {
        self.get(column_id).map(LineValue::as_number).unwrap_or(0.0)
    }

    /// Set a value under the normalized column identifier
    pub fn set<S: AsRef<str>, V: Into<LineValue>>(&mut self, column_id: S, value: V) {
        self.values.insert(column_key(column_id.as_ref()), value.into());
    }

    /// Check whether the user may edit this line
    pub fn is_editable(&self) -> bool {
        self.kind == LineKind::Regular
    }
}

#[cfg(feature = "serde")]
fn deserialize_values<'de, D>(deserializer: D) -> Result<LineValues, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    let raw = BTreeMap::<String, LineValue>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(id, value)| (column_key(&id), value))
        .collect())
}

impl Default for Line {
    fn default() -> Self {
        Self::new()
    }
}
