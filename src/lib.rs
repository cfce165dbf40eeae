//! Project planning diagrams: Gantt text parsing and timeline layout,
//! markdown mind maps, project-form generators, and requirements drafting.

pub mod error;
pub mod gantt;
pub mod llm;
pub mod mindmap;
pub mod project;
pub mod requirements;
pub mod style;
