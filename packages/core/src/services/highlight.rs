//! Pointer-Driven Highlighting
//!
//! Visual emphasis of a hovered node's neighborhood, computed as a pure
//! overlay: the graph and the simulation are never perturbed, and leaving
//! the node restores defaults by construction (the overlay is derived, not
//! stored in the graph).

use crate::models::{Note, NoteGraph};
use std::collections::HashMap;

/// Opacity of the hovered node and its neighbors.
pub const NODE_OPACITY_FOCUS: f32 = 1.0;
/// Opacity of nodes outside the hovered neighborhood.
pub const NODE_OPACITY_DIMMED: f32 = 0.3;
/// Default node opacity with no hover.
pub const NODE_OPACITY_DEFAULT: f32 = 1.0;
/// Opacity of edges touching the hovered node.
pub const EDGE_OPACITY_FOCUS: f32 = 0.8;
/// Default edge opacity with no hover.
pub const EDGE_OPACITY_DEFAULT: f32 = 0.6;
/// Opacity of edges outside the hovered neighborhood.
pub const EDGE_OPACITY_DIMMED: f32 = 0.1;

/// Computed opacities for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightView {
    /// Node id → opacity
    pub node_opacity: HashMap<String, f32>,
    /// Edge opacity, indexed like the graph's edge list
    pub edge_opacity: Vec<f32>,
}

/// Callback invoked when a node is clicked, carrying the underlying note.
pub type NodeClickCallback = Box<dyn Fn(&Note) + Send>;

/// Tracks pointer hover and click interactions.
#[derive(Default)]
pub struct InteractionHighlighter {
    hovered: Option<String>,
    on_node_click: Option<NodeClickCallback>,
}

impl InteractionHighlighter {
    /// Create a highlighter with no click callback.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the editor callback fired on node click.
    pub fn on_node_click(&mut self, callback: NodeClickCallback) {
        self.on_node_click = Some(callback);
    }

    /// Pointer entered a node. Unknown ids are no-ops.
    pub fn pointer_enter(&mut self, graph: &NoteGraph, id: &str) {
        if graph.node(id).is_none() {
            return;
        }
        self.hovered = Some(id.to_string());
    }

    /// Pointer left the hovered node; defaults are restored.
    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    /// Currently hovered node id, if any.
    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Node clicked: toggle its selection and emit the note to the editor
    /// collaborator. Clicks with no node under the cursor are no-ops.
    pub fn click(&self, graph: &mut NoteGraph, id: &str) {
        let Some(node) = graph.nodes.iter_mut().find(|n| n.id == id) else {
            return;
        };
        node.selected = !node.selected;
        if let Some(callback) = &self.on_node_click {
            callback(&node.note);
        }
    }

    /// Compute the opacity overlay for the current hover state.
    ///
    /// With a hovered node: the node and every neighbor get full opacity,
    /// all other nodes dim to 0.3; edges touching the node get 0.8, the
    /// rest dim to 0.1. With no hover, defaults apply everywhere.
    pub fn view(&self, graph: &NoteGraph) -> HighlightView {
        let Some(hovered) = self.hovered.as_deref() else {
            return HighlightView {
                node_opacity: graph
                    .nodes
                    .iter()
                    .map(|n| (n.id.clone(), NODE_OPACITY_DEFAULT))
                    .collect(),
                edge_opacity: vec![EDGE_OPACITY_DEFAULT; graph.edges.len()],
            };
        };

        let mut node_opacity: HashMap<String, f32> = graph
            .nodes
            .iter()
            .map(|n| (n.id.clone(), NODE_OPACITY_DIMMED))
            .collect();
        node_opacity.insert(hovered.to_string(), NODE_OPACITY_FOCUS);
        for neighbor in graph.neighbors(hovered) {
            node_opacity.insert(neighbor.to_string(), NODE_OPACITY_FOCUS);
        }

        let edge_opacity = graph
            .edges
            .iter()
            .map(|e| {
                if e.touches(hovered) {
                    EDGE_OPACITY_FOCUS
                } else {
                    EDGE_OPACITY_DIMMED
                }
            })
            .collect();

        HighlightView {
            node_opacity,
            edge_opacity,
        }
    }
}
