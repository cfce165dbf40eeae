//! Requirements document drafting.
//!
//! A project description is turned into an eight-section requirements
//! document in German. With an LLM client the sections are drafted by the
//! model; without one, or when the model reply is unusable, a deterministic
//! document built from the project data is returned instead.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ErrorCode;
use crate::llm::{LlmChat, LlmError, Message};
use crate::project::{ProjectData, non_empty_or};

const NOT_SPECIFIED: &str = "Not specified";
const FILL_IN_MANUALLY: &str = "Bitte vervollständigen Sie diese Sektion manuell.";

const SYSTEM_PROMPT: &str = "You are an experienced project manager and business analyst. \
You write software requirements specifications (Pflichtenheft) in German and answer with a \
single JSON object only.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    fn new(title: &str, content: impl Into<String>) -> Self {
        Self { title: title.to_string(), content: content.into() }
    }
}

/// Eight-section requirements document. JSON keys follow the German section names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementsDocument {
    #[serde(rename = "einleitung")]
    pub introduction: Section,
    #[serde(rename = "ziele")]
    pub goals: Section,
    #[serde(rename = "zielgruppen")]
    pub target_groups: Section,
    #[serde(rename = "funktionalitaet")]
    pub functionality: Section,
    #[serde(rename = "nichtFunktionaleAnforderungen")]
    pub non_functional: Section,
    #[serde(rename = "architektur")]
    pub architecture: Section,
    #[serde(rename = "projektabschluss")]
    pub completion: Section,
    #[serde(rename = "zeitplanung")]
    pub timeline: Section,
}

impl RequirementsDocument {
    /// Sections in document order.
    #[must_use]
    pub fn sections(&self) -> [&Section; 8] {
        [
            &self.introduction,
            &self.goals,
            &self.target_groups,
            &self.functionality,
            &self.non_functional,
            &self.architecture,
            &self.completion,
            &self.timeline,
        ]
    }

    #[must_use]
    pub fn to_markdown(&self) -> String {
        let blocks: Vec<String> = self
            .sections()
            .iter()
            .map(|s| format!("## {}\n\n{}", s.title, s.content.trim_end()))
            .collect();
        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }
}

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RequirementsError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("model reply contained no JSON object")]
    NoJson,

    #[error("model reply did not match the document shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ErrorCode for RequirementsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Llm(e) => e.error_code(),
            Self::NoJson => "E_REPLY_NO_JSON",
            Self::Decode(_) => "E_REPLY_DECODE",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Llm(e) => e.retryable(),
            Self::NoJson | Self::Decode(_) => true,
        }
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// Drafting instructions with the project data filled in.
#[must_use]
pub fn prompt(project: &ProjectData) -> String {
    let mut out = String::from(
        "Draft a Pflichtenheft (software requirements specification) for a new software project.\n\
         Write every section in German.\n\n",
    );
    out.push_str(&format!("Project Name: {}\n", project.project_name));
    out.push_str(&format!("Project Goal: {}\n", project.project_goal));
    out.push_str(&format!("Main Components: {}\n", inline_list(&project.main_components)));
    out.push_str(&format!("Stakeholders: {}\n", inline_list(&project.stakeholders)));
    out.push_str("Project Phases:\n");
    if project.phases.is_empty() {
        out.push_str(NOT_SPECIFIED);
        out.push('\n');
    }
    for phase in &project.phases {
        out.push_str(&format!("  - Phase: {} ({} to {})\n", phase.name, phase.start_date, phase.end_date));
    }
    out.push('\n');
    out.push_str(
        "\
Answer with one JSON object whose keys are einleitung, ziele, zielgruppen, funktionalitaet,
nichtFunktionaleAnforderungen, architektur, projektabschluss and zeitplanung. Each value is an
object with a German \"title\" and a Markdown \"content\". Cover:

- einleitung (Einleitung): project title, project goal, client and contractor if known.
- ziele (Ziele): SMART goals and explicit non-goals.
- zielgruppen (Zielgruppen/User): target users, their needs, where the product is used.
- funktionalitaet (Funktionalität): modules and functions, derived from the main components and
  completed with typical features such as login, payment, user management, persistence.
- nichtFunktionaleAnforderungen (Nicht funktionale Anforderungen): performance, security,
  usability, reliability, maintainability, SEO, interfaces to other systems.
- architektur (Architektur): system architecture, modules and their interactions, technologies.
- projektabschluss (Projektabschluss): completion criteria, deliverables, acceptance, testing.
- zeitplanung (Zeitplanung): milestones and schedule based on the project phases.

Fill every section with meaningful content.
",
    );
    out
}

fn inline_list(items: &[String]) -> String {
    if items.is_empty() {
        return NOT_SPECIFIED.to_string();
    }
    items.iter().map(|i| format!("- {i}")).collect::<Vec<_>>().join(" ")
}

// =============================================================================
// FALLBACK
// =============================================================================

/// Deterministic document built only from the project data.
#[must_use]
pub fn fallback(project: &ProjectData) -> RequirementsDocument {
    let title = non_empty_or(&project.project_name, "Unbenanntes Projekt");
    let goal = non_empty_or(&project.project_goal, "Kein Ziel definiert.");

    let components = if project.main_components.is_empty() {
        "Keine Hauptkomponenten definiert.".to_string()
    } else {
        project.main_components.iter().map(|c| format!("- {c}")).collect::<Vec<_>>().join("\n")
    };
    let phases = if project.phases.is_empty() {
        "Keine Projektphasen definiert.".to_string()
    } else {
        project
            .phases
            .iter()
            .map(|p| format!("- **{}**: {} bis {}", p.name, p.start_date, p.end_date))
            .collect::<Vec<_>>()
            .join("\n")
    };

    RequirementsDocument {
        introduction: Section::new(
            "Einleitung",
            format!(
                "### Titel\n{title}\n\n### Projektziel\n{goal}\n\n### Hinweis\n\
                 Dieses Pflichtenheft wurde automatisch generiert. Für ein detaillierteres \
                 Pflichtenheft konfigurieren Sie einen LLM-Anbieter."
            ),
        ),
        goals: Section::new("Ziele", format!("Keine Ziele definiert. {FILL_IN_MANUALLY}")),
        target_groups: Section::new("Zielgruppen/User", format!("Keine Zielgruppen definiert. {FILL_IN_MANUALLY}")),
        functionality: Section::new("Funktionalität", format!("### Hauptkomponenten\n{components}")),
        non_functional: Section::new(
            "Nicht funktionale Anforderungen",
            format!("Keine nicht-funktionalen Anforderungen definiert. {FILL_IN_MANUALLY}"),
        ),
        architecture: Section::new(
            "Architektur",
            format!("Keine Architekturinformationen verfügbar. {FILL_IN_MANUALLY}"),
        ),
        completion: Section::new(
            "Projektabschluss",
            format!("Keine Kriterien für den Projektabschluss definiert. {FILL_IN_MANUALLY}"),
        ),
        timeline: Section::new("Zeitplanung", format!("### Projektphasen\n{phases}")),
    }
}

// =============================================================================
// DRAFT
// =============================================================================

/// Draft the document with `client`, falling back to [`fallback`] when there
/// is no client or the model call fails.
pub async fn draft(client: Option<&dyn LlmChat>, project: &ProjectData) -> RequirementsDocument {
    let Some(client) = client else {
        debug!("requirements: no llm client configured, using fallback");
        return fallback(project);
    };

    match request(client, project).await {
        Ok(doc) => doc,
        Err(e) => {
            warn!(code = e.error_code(), error = %e, "requirements: llm draft failed, using fallback");
            fallback(project)
        }
    }
}

async fn request(client: &dyn LlmChat, project: &ProjectData) -> Result<RequirementsDocument, RequirementsError> {
    let completion = client
        .complete(SYSTEM_PROMPT, &[Message::user(prompt(project))])
        .await?;
    parse_reply(&completion.text)
}

/// Decode the first `{` through the last `}` of a model reply, which tolerates
/// code fences and surrounding prose.
///
/// # Errors
///
/// Returns [`RequirementsError::NoJson`] when no object delimiters are found
/// and [`RequirementsError::Decode`] when the object lacks a section.
pub fn parse_reply(text: &str) -> Result<RequirementsDocument, RequirementsError> {
    let start = text.find('{').ok_or(RequirementsError::NoJson)?;
    let end = text.rfind('}').ok_or(RequirementsError::NoJson)?;
    if end < start {
        return Err(RequirementsError::NoJson);
    }
    Ok(serde_json::from_str(&text[start..=end])?)
}

#[cfg(test)]
#[path = "requirements_test.rs"]
mod tests;
