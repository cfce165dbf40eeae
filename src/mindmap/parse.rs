//! Outline parser: `#` headings and list items become a tree.
//!
//! DESIGN
//! ======
//! Parents are tracked with an owned stack of `(node, level)` pairs. When a
//! line arrives, every stack entry at the same or a deeper level is popped and
//! attached to the entry below it; the new node is then pushed. Draining the
//! stack at the end attaches whatever is still open. No node is referenced
//! twice, so the tree is built without shared ownership.

use serde::{Deserialize, Serialize};

/// Name of the synthetic root that collects top-level entries.
pub const ROOT_NAME: &str = "Root";

/// Deepest markdown heading level.
const MAX_HEADING_LEVEL: usize = 6;

/// Indentation columns per nesting step of list items.
const INDENT_WIDTH: usize = 2;

/// A node of the mind-map tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindmapNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MindmapNode>,
}

impl MindmapNode {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new() }
    }

    /// Number of edges on the longest root-to-leaf path.
    #[must_use]
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes, including `self`.
    #[must_use]
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(MindmapNode::len).sum::<usize>()
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Parse a markdown outline into a tree.
///
/// Headings nest by their `#` count. List items (`-`, `*`, `+`) and plain text
/// lines sit below every heading and nest by indentation. If the outline has a
/// single top-level entry, that entry is returned as the root; otherwise a
/// synthetic `Root` node holds the top-level entries.
#[must_use]
pub fn parse(markdown: &str) -> MindmapNode {
    let mut stack: Vec<(MindmapNode, usize)> = vec![(MindmapNode::new(ROOT_NAME), 0)];

    for raw in markdown.lines() {
        let Some((level, name)) = classify(raw) else {
            continue;
        };

        close_until(&mut stack, level);
        stack.push((MindmapNode::new(name), level));
    }

    close_until(&mut stack, 1);
    let (mut root, _) = stack
        .pop()
        .unwrap_or_else(|| (MindmapNode::new(ROOT_NAME), 0));

    if root.children.len() == 1 {
        return root.children.remove(0);
    }
    root
}

/// Pop every entry at `level` or deeper, attaching each to its parent. The
/// synthetic root at the bottom of the stack is never popped.
fn close_until(stack: &mut Vec<(MindmapNode, usize)>, level: usize) {
    while stack.len() > 1 && stack.last().is_some_and(|(_, l)| *l >= level) {
        if let Some((node, _)) = stack.pop() {
            if let Some((parent, _)) = stack.last_mut() {
                parent.children.push(node);
            }
        }
    }
}

/// Classify a line as `(level, name)`. Blank lines yield `None`.
fn classify(raw: &str) -> Option<(usize, String)> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.starts_with('#') {
        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        let name = trimmed[hashes..].trim();
        return Some((hashes.min(MAX_HEADING_LEVEL), name.to_owned()));
    }

    let indent = raw
        .chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { INDENT_WIDTH } else { 1 })
        .sum::<usize>();
    let level = MAX_HEADING_LEVEL + 1 + indent / INDENT_WIDTH;

    let name = ["- ", "* ", "+ "]
        .iter()
        .find_map(|marker| trimmed.strip_prefix(marker))
        .unwrap_or(trimmed)
        .trim();
    Some((level, name.to_owned()))
}
