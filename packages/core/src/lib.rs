//! NoteGraph Core Engine
//!
//! This crate turns a flat note collection into a typed relationship
//! multigraph and drives a force-directed layout so related notes visually
//! converge. It is a pure in-memory transform library between a note
//! source and a visual renderer: no persistence, no network, no threads.
//!
//! # Architecture
//!
//! - **Four-pass inference**: shared category, shared tags, lexical
//!   similarity, temporal proximity — in that order (the similarity pass
//!   dedups against earlier edges)
//! - **Separate simulation state**: notes stay immutable; position,
//!   velocity and pin live in per-rebuild layout records
//! - **Full teardown on change**: any change to notes, filters or view
//!   mode rebuilds the graph and layout from scratch
//! - **Cooperative stepping**: the host ticks the simulation once per
//!   animation frame
//!
//! # Modules
//!
//! - [`models`] - Data structures (Note, graph, clusters, filters)
//! - [`services`] - Engine services (ingest, detect, cluster, layout, filter, highlight)
//! - [`utils`] - Tokenization helpers

pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use models::*;
pub use services::*;
