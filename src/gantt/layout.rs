//! Timeline layout: converts parsed tasks into proportional positions on a
//! padded day axis.
//!
//! DESIGN
//! ======
//! The axis runs from one day before the earliest start to one day after the
//! latest end, so bars never touch the edges and a single one-day task still
//! gets a non-zero span. Offsets and widths are fractions of that span; the
//! renderer maps them to pixels and enforces a minimum bar width.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use super::ast::Task;
use crate::error::ErrorCode;

// =============================================================================
// ERRORS & OPTIONS
// =============================================================================

/// Errors produced by the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Parsing produced no usable tasks, so there is no axis to lay out.
    #[error("no valid tasks found in gantt diagram")]
    NoTasks,
}

impl ErrorCode for LayoutError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NoTasks => "E_NO_TASKS",
        }
    }
}

/// Caller-controlled layout toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    /// Emit one date marker per day of the padded span.
    /// The marker count grows with the span, so very wide date ranges produce
    /// one entry per day with no cap; turn this off for such inputs.
    pub date_markers: bool,
    /// Include Saturday and Sunday markers. Weekends always count toward span math.
    pub weekends: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self { date_markers: true, weekends: true }
    }
}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// Raw and padded date bounds of a task set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineBounds {
    pub min_start: NaiveDate,
    pub max_end: NaiveDate,
    pub padded_start: NaiveDate,
    pub padded_end: NaiveDate,
    pub total_span_days: u64,
}

/// A task positioned on the axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskLayout {
    pub id: String,
    pub name: String,
    pub section: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub offset_fraction: f64,
    pub width_fraction: f64,
}

/// Tasks of one section, in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionLayout {
    pub name: String,
    pub tasks: Vec<TaskLayout>,
}

/// One calendar day on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateMarker {
    pub date: NaiveDate,
    pub offset_fraction: f64,
    pub is_weekend: bool,
}

/// Complete layout of one diagram.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GanttLayout {
    pub padded_start: NaiveDate,
    pub padded_end: NaiveDate,
    pub total_span_days: u64,
    /// Sections in first-seen order.
    pub sections: Vec<SectionLayout>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_markers: Option<Vec<DateMarker>>,
}

impl GanttLayout {
    /// Total number of laid-out tasks across all sections.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.sections.iter().map(|s| s.tasks.len()).sum()
    }
}

// =============================================================================
// LAYOUT
// =============================================================================

/// Lay out parsed tasks on a padded day axis.
///
/// # Errors
///
/// Returns [`LayoutError::NoTasks`] when `tasks` is empty.
pub fn layout(tasks: &[Task], options: LayoutOptions) -> Result<GanttLayout, LayoutError> {
    let bounds = timeline_bounds(tasks).ok_or(LayoutError::NoTasks)?;
    let span = bounds.total_span_days;

    let sections = group_by_section(tasks)
        .into_iter()
        .map(|(name, members)| SectionLayout {
            name: name.to_owned(),
            tasks: members
                .into_iter()
                .map(|task| TaskLayout {
                    id: task.id.clone(),
                    name: task.name.clone(),
                    section: task.section.clone(),
                    start_date: task.start_date,
                    end_date: task.end_date,
                    offset_fraction: fraction(days_between(bounds.padded_start, task.start_date), span),
                    width_fraction: fraction(days_between(task.start_date, task.end_date), span),
                })
                .collect(),
        })
        .collect();

    let date_markers = options
        .date_markers
        .then(|| date_markers(&bounds, options.weekends));

    Ok(GanttLayout {
        padded_start: bounds.padded_start,
        padded_end: bounds.padded_end,
        total_span_days: span,
        sections,
        date_markers,
    })
}

/// Compute raw and padded bounds. `None` for an empty task list.
#[must_use]
pub fn timeline_bounds(tasks: &[Task]) -> Option<TimelineBounds> {
    let min_start = tasks.iter().map(|t| t.start_date).min()?;
    let max_end = tasks.iter().map(|t| t.end_date).max()?;

    // Saturate at the representable range; the span stays non-zero either way.
    let padded_start = min_start.pred_opt().unwrap_or(min_start);
    let padded_end = max_end.succ_opt().unwrap_or(max_end);

    Some(TimelineBounds {
        min_start,
        max_end,
        padded_start,
        padded_end,
        total_span_days: days_between(padded_start, padded_end),
    })
}

/// Whole-day distance between two dates, ignoring order.
#[must_use]
pub fn days_between(a: NaiveDate, b: NaiveDate) -> u64 {
    a.signed_duration_since(b).num_days().unsigned_abs()
}

/// Group tasks by section, keeping first-seen section order and source order
/// within each section.
#[must_use]
pub fn group_by_section(tasks: &[Task]) -> Vec<(&str, Vec<&Task>)> {
    let mut groups: Vec<(&str, Vec<&Task>)> = Vec::new();
    for task in tasks {
        match groups.iter_mut().find(|(name, _)| *name == task.section) {
            Some((_, members)) => members.push(task),
            None => groups.push((task.section.as_str(), vec![task])),
        }
    }
    groups
}

/// One marker per day from `padded_start` to `padded_end` inclusive.
#[must_use]
pub fn date_markers(bounds: &TimelineBounds, include_weekends: bool) -> Vec<DateMarker> {
    let mut markers = Vec::new();
    let mut day = bounds.padded_start;
    loop {
        let weekend = is_weekend(day);
        if include_weekends || !weekend {
            markers.push(DateMarker {
                date: day,
                offset_fraction: fraction(days_between(bounds.padded_start, day), bounds.total_span_days),
                is_weekend: weekend,
            });
        }
        if day >= bounds.padded_end {
            break;
        }
        let Some(next) = day.succ_opt() else {
            break;
        };
        day = next;
    }
    markers
}

/// Saturday or Sunday, by calendar weekday.
#[must_use]
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn fraction(days: u64, span: u64) -> f64 {
    if span == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let value = days as f64 / span as f64;
    value
}
