//! Graph Data Structures
//!
//! This module defines the note-relationship multigraph: typed edges between
//! note-backed nodes, plus the read-only reporting structures handed to UI
//! collaborators (stats snapshot, share configuration, export request).
//!
//! # Two-phase endpoint model
//!
//! Edges store note *ids* only. The layout engine builds an id → index table
//! once per rebuild and works on resolved indices from then on; nothing in
//! the simulation touches raw ids.
//!
//! # Rebuild semantics
//!
//! The whole graph is discarded and rebuilt on any change to notes, filters
//! or view mode. Node identity does not survive a rebuild.

use crate::models::cluster::ClusterInfo;
use crate::models::filter::FilterCriteria;
use crate::models::note::Note;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Relationship kind inferred between two notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeKind {
    /// Both notes carry the same category
    SameCategory,
    /// Both notes carry a shared tag (one edge per shared tag)
    SameTag,
    /// Bodies share at least one significant token
    SimilarContent,
    /// Chronologically adjacent creations within the temporal window
    Temporal,
}

/// A typed edge of the note multigraph.
///
/// Endpoints are note ids; `source != target` always holds. Parallel edges
/// between one pair are permitted by design (a pair sharing k tags carries
/// k same-tag edges).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    /// Source note id
    pub source: String,

    /// Target note id
    pub target: String,

    /// Relationship kind
    pub kind: EdgeKind,

    /// Relationship strength in (0, 1]
    pub strength: f32,

    /// Preferred rest length of the link spring, in pixels
    pub preferred_distance: f32,

    /// Visual emphasis flag (hover overlay)
    #[serde(default)]
    pub highlighted: bool,
}

impl GraphEdge {
    /// Create a new edge between two distinct note ids.
    pub fn new(
        source: String,
        target: String,
        kind: EdgeKind,
        strength: f32,
        preferred_distance: f32,
    ) -> Self {
        debug_assert_ne!(source, target, "self-edges are not allowed");
        Self {
            source,
            target,
            kind,
            strength,
            preferred_distance,
            highlighted: false,
        }
    }

    /// Whether this edge is incident to the given node id.
    pub fn touches(&self, id: &str) -> bool {
        self.source == id || self.target == id
    }

    /// The opposite endpoint, if `id` is one of the two.
    pub fn other_endpoint(&self, id: &str) -> Option<&str> {
        if self.source == id {
            Some(&self.target)
        } else if self.target == id {
            Some(&self.source)
        } else {
            None
        }
    }
}

/// A node of the note graph.
///
/// Holds the note itself plus derived attributes. Simulation state
/// (position, velocity, pin) lives in the layout engine's per-rebuild
/// records, not here, so the domain object stays immutable under
/// integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Node id (= note id)
    pub id: String,

    /// The underlying note
    pub note: Note,

    /// Number of incident edges, counting parallel edges individually
    #[serde(default)]
    pub degree: usize,

    /// Category cluster this node belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,

    /// Whether this note is currently open in the editor
    #[serde(default)]
    pub selected: bool,

    /// Visual emphasis flag (search matches, hover overlay)
    #[serde(default)]
    pub highlighted: bool,

    /// Whether the host pinned this note's position
    #[serde(default)]
    pub pinned: bool,
}

impl GraphNode {
    /// Wrap a note into a fresh graph node with zeroed derived state.
    pub fn from_note(note: Note) -> Self {
        Self {
            id: note.id.clone(),
            pinned: note.pinned,
            note,
            degree: 0,
            cluster_id: None,
            selected: false,
            highlighted: false,
        }
    }
}

/// The built note-relationship multigraph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteGraph {
    /// All visible nodes
    pub nodes: Vec<GraphNode>,

    /// All edges; every endpoint exists in `nodes`
    pub edges: Vec<GraphEdge>,

    /// Derived cluster legend
    pub clusters: Vec<ClusterInfo>,
}

impl NoteGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Build the id → node-index table used to resolve edge endpoints.
    pub fn node_index(&self) -> HashMap<String, usize> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (node.id.clone(), i))
            .collect()
    }

    /// Look up a node by id.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Ids of all nodes sharing an edge with `id`.
    ///
    /// Parallel edges contribute a neighbor once per edge; callers that
    /// need a set should dedupe.
    pub fn neighbors(&self, id: &str) -> Vec<&str> {
        self.edges
            .iter()
            .filter_map(|e| e.other_endpoint(id))
            .collect()
    }

    /// Read-only size snapshot for UI collaborators.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            cluster_count: self.clusters.len(),
        }
    }
}

/// Read-only live snapshot of graph sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// Number of visible nodes
    pub node_count: usize,
    /// Number of edges
    pub edge_count: usize,
    /// Number of clusters in the legend
    pub cluster_count: usize,
}

/// Layout view mode.
///
/// `Hierarchical` is the plain force layout with the radial anchor
/// disabled; no distinct force exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    Force,
    Radial,
    Hierarchical,
}

/// Serializable share configuration.
///
/// Captures everything needed to reproduce the current view. The core
/// never performs a network call; the host decides where this goes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareConfig {
    /// Unique identifier for this share
    pub id: String,

    /// Active filter criteria
    pub filters: FilterCriteria,

    /// Active view mode
    pub view_mode: ViewMode,

    /// Capture time
    pub timestamp: DateTime<Utc>,

    /// Graph sizes at capture time
    pub stats: GraphStats,
}

impl ShareConfig {
    /// Capture a share configuration for the current view.
    pub fn new(filters: FilterCriteria, view_mode: ViewMode, stats: GraphStats) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            filters,
            view_mode,
            timestamp: Utc::now(),
            stats,
        }
    }
}

/// Raster-export request handed to the host rendering layer.
///
/// Rendering mechanics are outside this core; the engine only describes
/// the surface it wants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Background fill as a hex color
    pub background: String,
}

impl Default for ExportRequest {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            background: "#ffffff".to_string(),
        }
    }
}
