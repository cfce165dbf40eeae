//! Markdown outline to mind-map tree, plus node placement.

pub mod layout;
pub mod parse;

pub use layout::{MindmapGraph, MindmapLayout, layout};
pub use parse::{MindmapNode, parse};

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
