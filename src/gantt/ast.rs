//! Types for parsed Gantt diagrams.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Section assigned to tasks declared before any `section` line.
pub const DEFAULT_SECTION: &str = "Default";

/// One schedulable unit of work within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub section: String,
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format a date as `DD.MM.YYYY` for axis and bar labels.
#[must_use]
pub fn format_label(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
