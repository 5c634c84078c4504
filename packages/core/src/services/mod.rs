//! Business Services
//!
//! This module contains the core engine services:
//!
//! - `NoteIngestor` - Normalizes raw notes into graph nodes
//! - `RelationshipDetector` - Four relationship-inference passes
//! - `DegreeCalculator` - Multigraph degree assignment
//! - `ClusterAnalyzer` - Category/tag legend derivation
//! - `LayoutEngine` - Stepped force-directed simulation
//! - `FilterEngine` - Pure subgraph filtering
//! - `InteractionHighlighter` - Hover/click visual overlay
//! - `GraphService` - Pipeline orchestration and UI-facing outputs

pub mod clusters;
pub mod degree;
pub mod error;
pub mod filter_engine;
pub mod graph_service;
pub mod highlight;
pub mod ingest;
pub mod layout;
pub mod relationships;

pub use clusters::{ClusterAnalyzer, MAX_TAG_CLUSTERS, MIN_TAG_MEMBERS};
pub use degree::DegreeCalculator;
pub use error::GraphEngineError;
pub use filter_engine::FilterEngine;
pub use graph_service::{GraphBuildOptions, GraphService};
pub use highlight::{HighlightView, InteractionHighlighter, NodeClickCallback};
pub use ingest::{IngestOptions, NoteIngestor};
pub use layout::{LayoutConfig, LayoutEngine, LayoutPhase, LayoutState};
pub use relationships::RelationshipDetector;
