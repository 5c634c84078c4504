//! Degree Calculation
//!
//! Counts edges per node across the full multigraph, parallel edges
//! included. One O(E) accumulation pass, then one write pass over the
//! nodes; no per-node edge scan.

use crate::models::{GraphEdge, GraphNode};
use std::collections::HashMap;

/// Assigns multigraph degrees to nodes.
pub struct DegreeCalculator;

impl DegreeCalculator {
    /// Compute and store the degree of every node.
    ///
    /// Edges referencing ids outside `nodes` contribute nothing; the
    /// detector never produces them, but the calculator stays safe if fed
    /// a foreign edge list.
    pub fn assign(nodes: &mut [GraphNode], edges: &[GraphEdge]) {
        let mut counts: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());

        for edge in edges {
            *counts.entry(edge.source.as_str()).or_insert(0) += 1;
            *counts.entry(edge.target.as_str()).or_insert(0) += 1;
        }

        for node in nodes.iter_mut() {
            node.degree = counts.get(node.id.as_str()).copied().unwrap_or(0);
        }
    }
}
