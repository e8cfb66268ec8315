//! Time-tracking entries consumed by line import

use chrono::NaiveDate;

/// A registered block of work, as delivered by the time-tracking service
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeEntry {
    pub id: String,
    pub date: NaiveDate,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    /// Hours worked
    #[cfg_attr(feature = "serde", serde(default))]
    pub hours: f64,
    /// Kilometers driven
    #[cfg_attr(feature = "serde", serde(default))]
    pub km: f64,
}

impl TimeEntry {
    /// Create a new entry
    pub fn new<I: Into<String>, D: Into<String>>(
        id: I,
        date: NaiveDate,
        description: D,
        hours: f64,
        km: f64,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            description: description.into(),
            hours,
            km,
        }
    }

    /// Text placed in the description column of an imported line
    pub fn line_description(&self) -> String {
        let date = self.date.format("%d-%m-%Y");
        let description = self.description.trim();
        if description.is_empty() {
            date.to_string()
        } else {
            format!("{} {}", date, description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_description() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let entry = TimeEntry::new("t1", date, " Rit Rotterdam ", 8.0, 120.0);
        assert_eq!(entry.line_description(), "05-03-2024 Rit Rotterdam");

        let bare = TimeEntry::new("t2", date, "", 1.0, 0.0);
        assert_eq!(bare.line_description(), "05-03-2024");
    }
}
