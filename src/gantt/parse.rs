//! Line-oriented parser for Mermaid `gantt` text.
//!
//! Each physical line is trimmed and classified as blank, directive, section
//! header, or task. Anything else is skipped. Parsing never fails: malformed
//! task lines are dropped and the result simply holds fewer tasks.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use super::ast::{DEFAULT_SECTION, Task};

/// Header keywords whose values are recognized but not captured.
const DIRECTIVES: &[&str] = &["gantt", "title", "dateFormat", "axisFormat"];

/// Parse Gantt text into tasks, in source order.
///
/// Synthetic ids (`task_0`, `task_1`, ...) are numbered per call, so parsing
/// the same text twice yields identical output.
#[must_use]
pub fn parse(input: &str) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut section = DEFAULT_SECTION.to_owned();
    let mut next_synthetic_id = 0_usize;

    for line in input.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if DIRECTIVES.iter().any(|kw| line.starts_with(kw)) {
            continue;
        }

        if let Some(rest) = line.strip_prefix("section") {
            section = section_title(rest).to_owned();
            continue;
        }

        let Some(fields) = split_task_line(line) else {
            continue;
        };

        let id = if let Some(id) = fields.id {
            id.to_owned()
        } else {
            let id = format!("task_{next_synthetic_id}");
            next_synthetic_id += 1;
            id
        };

        let (Some(start_date), Some(end_date)) = (parse_date(fields.start), parse_date(fields.end)) else {
            debug!(line, start = fields.start, end = fields.end, "gantt: dropped task line with invalid date");
            continue;
        };

        tasks.push(Task { id, name: fields.name.to_owned(), start_date, end_date, section: section.clone() });
    }

    tasks
}

/// Parse a calendar date.
///
/// Accepts `YYYY-MM-DD` plus ISO-8601 date-times, of which only the date part
/// is kept. Calendar-invalid dates such as `2024-02-30` are rejected.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|datetime| datetime.date())
}

/// Raw fields of a `<name> : [<id>,] <start>, <end>` line.
struct TaskFields<'a> {
    name: &'a str,
    id: Option<&'a str>,
    start: &'a str,
    end: &'a str,
}

fn split_task_line(line: &str) -> Option<TaskFields<'_>> {
    let (name, rest) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }

    let fields: Vec<&str> = rest.split(',').map(str::trim).collect();
    let (id, start, end) = match fields.as_slice() {
        [start, end] => (None, *start, *end),
        [id, start, end] => (Some(*id).filter(|id| !id.is_empty()), *start, *end),
        _ => return None,
    };
    if start.is_empty() || end.is_empty() {
        return None;
    }

    Some(TaskFields { name, id, start, end })
}

/// Title after the `section` keyword, with an optional `:` separator removed.
fn section_title(rest: &str) -> &str {
    let rest = rest.trim_start();
    rest.strip_prefix(':').unwrap_or(rest).trim()
}
