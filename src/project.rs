//! Project data model and the diagram text generators fed by it.
//!
//! DESIGN
//! ======
//! The form produces a `ProjectData`. Two generators turn it into diagram
//! sources: a markdown outline for the mind-map and a Mermaid `gantt` block
//! for the roadmap. Both are plain string templating; the roadmap text is what
//! `gantt::parse` consumes downstream.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gantt::ast::format_iso;

const DEFAULT_MINDMAP_TITLE: &str = "My Project";
const DEFAULT_ROADMAP_TITLE: &str = "Project Roadmap";
const MAX_ID_LEN: usize = 50;
const MAX_FILENAME_PREFIX_LEN: usize = 50;

// =============================================================================
// MODEL
// =============================================================================

/// One project phase as entered in the form. Dates stay raw strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPhase {
    pub id: String,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
}

impl ProjectPhase {
    /// Phases with an empty name or date are left out of the roadmap.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.start_date.is_empty() && !self.end_date.is_empty()
    }
}

/// Structured project description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectData {
    pub project_name: String,
    pub project_goal: String,
    pub main_components: Vec<String>,
    pub stakeholders: Vec<String>,
    pub phases: Vec<ProjectPhase>,
}

impl ProjectData {
    /// Build project data from raw form fields. Components and stakeholders
    /// are comma-separated; entries are trimmed and empty ones dropped.
    #[must_use]
    pub fn from_form(name: &str, goal: &str, components: &str, stakeholders: &str, phases: Vec<ProjectPhase>) -> Self {
        Self {
            project_name: name.to_owned(),
            project_goal: goal.to_owned(),
            main_components: split_list(components),
            stakeholders: split_list(stakeholders),
            phases,
        }
    }
}

/// Generated diagram sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramContent {
    pub mindmap_markdown: String,
    pub roadmap_mermaid: String,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

// =============================================================================
// GENERATORS
// =============================================================================

/// Generate both diagram sources. `today` seeds the placeholder roadmap used
/// when no phases exist.
#[must_use]
pub fn generate(project: &ProjectData, today: NaiveDate) -> DiagramContent {
    DiagramContent { mindmap_markdown: mindmap_markdown(project), roadmap_mermaid: roadmap_gantt(project, today) }
}

/// Markdown outline for the mind-map.
#[must_use]
pub fn mindmap_markdown(project: &ProjectData) -> String {
    let mut md = format!("# {}\n", non_empty_or(&project.project_name, DEFAULT_MINDMAP_TITLE));
    if !project.project_goal.is_empty() {
        md.push_str(&format!("## Goal: {}\n", project.project_goal));
    }

    if !project.main_components.is_empty() {
        md.push_str("### Core Components\n");
        for component in &project.main_components {
            md.push_str(&format!("  - {}\n", component.trim()));
        }
    }
    if !project.stakeholders.is_empty() {
        md.push_str("### Stakeholders\n");
        for stakeholder in &project.stakeholders {
            md.push_str(&format!("  - {}\n", stakeholder.trim()));
        }
    }
    if !project.phases.is_empty() {
        md.push_str("### Project Phases\n");
        for phase in &project.phases {
            md.push_str(&format!("  - {} ({} to {})\n", phase.name, phase.start_date, phase.end_date));
        }
    }

    md
}

/// Mermaid `gantt` source for the roadmap.
///
/// Each complete phase becomes its own section with one task. Without any
/// phases a placeholder chart spanning `today` and the following day is
/// produced so the roadmap never renders empty.
#[must_use]
pub fn roadmap_gantt(project: &ProjectData, today: NaiveDate) -> String {
    if project.phases.is_empty() {
        let tomorrow = today.succ_opt().unwrap_or(today);
        return format!(
            "gantt\n  title No Phases Defined\n  dateFormat YYYY-MM-DD\n  section Empty\n    Placeholder Task :ph_task, {}, {}\n",
            format_iso(today),
            format_iso(tomorrow)
        );
    }

    let mut mm = format!(
        "gantt\n  title {}\n  dateFormat YYYY-MM-DD\n  axisFormat %Y-%m-%d\n",
        non_empty_or(&project.project_name, DEFAULT_ROADMAP_TITLE)
    );

    for (index, phase) in project.phases.iter().enumerate() {
        if !phase.is_complete() {
            continue;
        }
        let cleaned = clean_task_name(&phase.name);
        let task_name = if cleaned.is_empty() { format!("Phase {}", index + 1) } else { cleaned };
        let task_id = task_id(&task_name, index);

        mm.push_str(&format!("  section {task_name}\n"));
        mm.push_str(&format!("    {task_name} :{task_id}_{index}, {}, {}\n", phase.start_date, phase.end_date));
    }

    mm
}

/// Keep ASCII alphanumerics, whitespace, `-` and `_`; trim the result.
#[must_use]
pub fn clean_task_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_'))
        .collect::<String>()
        .trim()
        .to_owned()
}

/// Task id derived from a cleaned name: whitespace runs become `_`, capped at
/// 50 characters, `task_<index>` when nothing remains.
fn task_id(task_name: &str, index: usize) -> String {
    let id: String = task_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(MAX_ID_LEN)
        .collect();
    if id.is_empty() { format!("task_{index}") } else { id }
}

/// File-name-safe prefix for exported diagrams.
#[must_use]
pub fn safe_filename_prefix(project_name: &str) -> String {
    let prefix: String = project_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .take(MAX_FILENAME_PREFIX_LEN)
        .collect();
    if prefix.is_empty() { "diagram".to_owned() } else { prefix }
}

pub(crate) fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

#[cfg(test)]
#[path = "project_test.rs"]
mod tests;
