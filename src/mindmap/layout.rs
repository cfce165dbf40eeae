//! Node placement for mind-map trees.

use std::collections::VecDeque;
use std::f64::consts::TAU;
use std::str::FromStr;

use serde::Serialize;

use super::parse::MindmapNode;

pub const DEFAULT_NODE_SPACING: f64 = 80.0;
const HORIZONTAL_DEPTH_STEP: f64 = 250.0;
const VERTICAL_DEPTH_STEP: f64 = 150.0;
const RADIAL_CENTER: f64 = 300.0;
const RADIAL_RADIUS: f64 = 200.0;

/// Placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MindmapLayout {
    /// Depth grows to the right, nodes stack downwards in visit order.
    #[default]
    Horizontal,
    /// Depth grows downwards, nodes spread to the right in visit order.
    Vertical,
    /// Depth grows outwards in rings around a fixed center.
    Radial,
}

impl FromStr for MindmapLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" => Ok(Self::Horizontal),
            "vertical" => Ok(Self::Vertical),
            "radial" => Ok(Self::Radial),
            other => Err(format!("unknown mindmap layout: {other}")),
        }
    }
}

/// A placed node. Ids are assigned in breadth-first visit order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionedNode {
    pub id: String,
    pub label: String,
    pub depth: usize,
    pub x: f64,
    pub y: f64,
}

/// A parent-to-child link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MindmapGraph {
    pub nodes: Vec<PositionedNode>,
    pub edges: Vec<Edge>,
}

struct Visit<'a> {
    node: &'a MindmapNode,
    depth: usize,
    parent: Option<usize>,
    sibling_index: usize,
    sibling_count: usize,
}

/// Place every node of `root`, visiting breadth-first.
///
/// `spacing` is the distance between consecutive nodes along the visit axis
/// for the horizontal and vertical layouts; the radial layout ignores it.
#[must_use]
pub fn layout(root: &MindmapNode, kind: MindmapLayout, spacing: f64) -> MindmapGraph {
    let mut nodes = Vec::with_capacity(root.len());
    let mut edges = Vec::new();
    #[allow(clippy::cast_precision_loss)]
    let ring_step = RADIAL_RADIUS / (root.height() + 1) as f64;

    let mut queue = VecDeque::new();
    queue.push_back(Visit { node: root, depth: 0, parent: None, sibling_index: 0, sibling_count: 1 });

    while let Some(visit) = queue.pop_front() {
        let index = nodes.len();

        #[allow(clippy::cast_precision_loss)]
        let (x, y) = match kind {
            MindmapLayout::Horizontal => (visit.depth as f64 * HORIZONTAL_DEPTH_STEP, index as f64 * spacing),
            MindmapLayout::Vertical => (index as f64 * spacing, visit.depth as f64 * VERTICAL_DEPTH_STEP),
            MindmapLayout::Radial => {
                let angle = visit.sibling_index as f64 / visit.sibling_count as f64 * TAU;
                let radius = visit.depth as f64 * ring_step;
                (RADIAL_CENTER + radius * angle.cos(), RADIAL_CENTER + radius * angle.sin())
            }
        };

        nodes.push(PositionedNode { id: index.to_string(), label: visit.node.name.clone(), depth: visit.depth, x, y });

        if let Some(parent) = visit.parent {
            edges.push(Edge { id: format!("e{index}"), source: parent.to_string(), target: index.to_string() });
        }

        let sibling_count = visit.node.children.len();
        for (sibling_index, child) in visit.node.children.iter().enumerate() {
            queue.push_back(Visit { node: child, depth: visit.depth + 1, parent: Some(index), sibling_index, sibling_count });
        }
    }

    MindmapGraph { nodes, edges }
}
