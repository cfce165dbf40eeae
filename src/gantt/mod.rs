//! Mermaid-style Gantt parser and timeline layout engine.
//!
//! Parses the line-oriented `gantt` syntax into a flat list of tasks, lays the
//! tasks out on a padded day axis as fractions of the total span, and renders
//! the layout into positioned drawing descriptors.

pub mod ast;
pub mod layout;
pub mod parse;
pub mod render;

pub use layout::{LayoutError, LayoutOptions, layout};
pub use parse::parse;
pub use render::render_to_objects;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
