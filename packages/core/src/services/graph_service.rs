//! Graph Orchestration
//!
//! `GraphService` owns the build pipeline (ingest → detect → degree →
//! cluster → layout) and the UI-facing outputs: stats snapshot, filtered
//! views, share configuration and export requests.
//!
//! Any change to notes, filters or view mode goes through
//! [`GraphService::rebuild`]: the previous graph and layout instance are
//! discarded wholesale and rebuilt from scratch. There is no incremental
//! re-layout; "stop stepping the old instance" is the only cancellation.

use crate::models::{
    ClusterPalette, ExportRequest, FilterCriteria, GraphStats, Note, NoteGraph, ShareConfig,
    ViewMode,
};
use crate::services::clusters::ClusterAnalyzer;
use crate::services::degree::DegreeCalculator;
use crate::services::error::GraphEngineError;
use crate::services::filter_engine::FilterEngine;
use crate::services::ingest::{IngestOptions, NoteIngestor};
use crate::services::layout::{LayoutConfig, LayoutEngine};
use crate::services::relationships::RelationshipDetector;

/// Options for one graph build.
#[derive(Debug, Clone, Default)]
pub struct GraphBuildOptions {
    /// Keep soft-deleted notes visible
    pub include_deleted: bool,

    /// Id of the note currently open in the editor
    pub open_note_id: Option<String>,

    /// Layout view mode
    pub view_mode: ViewMode,

    /// Cluster color palettes
    pub palette: ClusterPalette,

    /// Layout simulation parameters
    pub layout: LayoutConfig,
}

/// Owns the built graph and its layout engine.
pub struct GraphService {
    graph: NoteGraph,
    layout: LayoutEngine,
    options: GraphBuildOptions,
}

impl GraphService {
    /// Build the full graph pipeline from a note collection.
    ///
    /// The layout engine is started immediately when the graph has nodes;
    /// an empty graph stays idle and the caller shows its placeholder.
    pub fn build(notes: &[Note], options: GraphBuildOptions) -> Self {
        let ingest_options = IngestOptions {
            include_deleted: options.include_deleted,
            open_note_id: options.open_note_id.clone(),
        };

        let mut nodes = NoteIngestor::ingest(notes, &ingest_options);
        let edges = RelationshipDetector::detect(&nodes);
        DegreeCalculator::assign(&mut nodes, &edges);
        let clusters = ClusterAnalyzer::analyze(&mut nodes, &options.palette);

        let graph = NoteGraph {
            nodes,
            edges,
            clusters,
        };
        let stats = graph.stats();
        tracing::info!(
            "Graph built: {} nodes, {} edges, {} clusters",
            stats.node_count,
            stats.edge_count,
            stats.cluster_count
        );

        let mut layout = LayoutEngine::new(&graph, options.view_mode, options.layout.clone());
        layout.start();

        Self {
            graph,
            layout,
            options,
        }
    }

    /// Discard the current graph and layout and rebuild from new notes.
    pub fn rebuild(&mut self, notes: &[Note]) {
        *self = Self::build(notes, self.options.clone());
    }

    /// Rebuild with a different view mode (same notes must be passed
    /// again; node identity does not survive).
    pub fn set_view_mode(&mut self, notes: &[Note], view_mode: ViewMode) {
        self.options.view_mode = view_mode;
        self.rebuild(notes);
    }

    /// The built graph.
    pub fn graph(&self) -> &NoteGraph {
        &self.graph
    }

    /// Mutable access for interaction flows (selection toggles).
    pub fn graph_mut(&mut self) -> &mut NoteGraph {
        &mut self.graph
    }

    /// The running layout engine.
    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    /// Mutable layout access for ticking and pointer interaction.
    pub fn layout_mut(&mut self) -> &mut LayoutEngine {
        &mut self.layout
    }

    /// Active view mode.
    pub fn view_mode(&self) -> ViewMode {
        self.options.view_mode
    }

    /// Read-only size snapshot.
    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    /// Visible subgraph for the given criteria; the built graph is
    /// untouched.
    pub fn filtered(&self, criteria: &FilterCriteria) -> NoteGraph {
        FilterEngine::apply(&self.graph, criteria)
    }

    /// Capture a serializable share configuration for the current view.
    pub fn share_config(&self, criteria: &FilterCriteria) -> ShareConfig {
        ShareConfig::new(criteria.clone(), self.options.view_mode, self.stats())
    }

    /// Serialize a share configuration to JSON for the host to transport.
    pub fn share_config_json(&self, criteria: &FilterCriteria) -> Result<String, GraphEngineError> {
        let config = self.share_config(criteria);
        Ok(serde_json::to_string(&config)?)
    }

    /// Decode a share configuration the host received.
    pub fn parse_share_config(json: &str) -> Result<ShareConfig, GraphEngineError> {
        serde_json::from_str(json).map_err(|e| {
            GraphEngineError::invalid_share_config(format!("not a share configuration: {e}"))
        })
    }

    /// Describe a raster export surface for the host rendering layer.
    pub fn export_request(&self, width: u32, height: u32) -> ExportRequest {
        ExportRequest {
            width,
            height,
            ..ExportRequest::default()
        }
    }
}
