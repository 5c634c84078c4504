//! Data Models
//!
//! This module contains the core data structures used throughout the graph
//! engine:
//!
//! - `Note` - External, read-only note record from the storage collaborator
//! - `NoteGraph` / `GraphNode` / `GraphEdge` - The typed multigraph
//! - `ClusterInfo` / `ClusterPalette` - Derived legend groupings
//! - `FilterCriteria` - Pure value object for subgraph filtering
//! - `ShareConfig` / `ExportRequest` / `GraphStats` - UI-facing outputs

mod cluster;
mod filter;
mod graph;
mod note;

pub use cluster::{ClusterInfo, ClusterKind, ClusterPalette};
pub use filter::FilterCriteria;
pub use graph::{
    EdgeKind, ExportRequest, GraphEdge, GraphNode, GraphStats, NoteGraph, ShareConfig, ViewMode,
};
pub use note::{ContentType, Note, UNCATEGORIZED};
