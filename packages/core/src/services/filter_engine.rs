//! Graph Filtering
//!
//! A pure function from (graph, criteria) to a visible subgraph. The input
//! graph is never mutated; the result is a fresh view. Filtering an
//! already-filtered graph with the same criteria returns the same graph
//! (idempotence), and no returned edge ever dangles.

use crate::models::{FilterCriteria, GraphNode, NoteGraph};
use std::collections::HashSet;

/// Computes visible subgraphs.
pub struct FilterEngine;

impl FilterEngine {
    /// Apply criteria to a graph, producing the visible view.
    ///
    /// Node predicate, evaluated in order: search match, category
    /// membership, tag membership, content-type membership, date range,
    /// minimum degree, deleted visibility. Edges survive only when both
    /// endpoints do. The cluster legend describes the full corpus and is
    /// carried through unchanged.
    ///
    /// When search text is present, surviving nodes are flagged
    /// highlighted so the host can emphasize matches.
    pub fn apply(graph: &NoteGraph, criteria: &FilterCriteria) -> NoteGraph {
        let mut nodes: Vec<GraphNode> = graph
            .nodes
            .iter()
            .filter(|node| Self::node_matches(node, criteria))
            .cloned()
            .collect();

        let has_search = criteria
            .search
            .as_deref()
            .map(|s| !s.trim().is_empty())
            .unwrap_or(false);
        if has_search {
            for node in &mut nodes {
                node.highlighted = true;
            }
        }

        let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        let edges = graph
            .edges
            .iter()
            .filter(|e| visible.contains(e.source.as_str()) && visible.contains(e.target.as_str()))
            .cloned()
            .collect();

        NoteGraph {
            nodes,
            edges,
            clusters: graph.clusters.clone(),
        }
    }

    fn node_matches(node: &GraphNode, criteria: &FilterCriteria) -> bool {
        let note = &node.note;

        if let Some(search) = criteria.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !Self::matches_search(node, &needle) {
                return false;
            }
        }

        if !criteria.categories.is_empty()
            && !criteria
                .categories
                .iter()
                .any(|c| c == note.category_or_default())
        {
            return false;
        }

        if !criteria.tags.is_empty() && !criteria.tags.iter().any(|t| note.tags.contains(t)) {
            return false;
        }

        if !criteria.content_types.is_empty()
            && !criteria.content_types.contains(&note.content_type)
        {
            return false;
        }

        if let Some(after) = criteria.created_after {
            if note.created_at < after {
                return false;
            }
        }
        if let Some(before) = criteria.created_before {
            if note.created_at > before {
                return false;
            }
        }

        if node.degree < criteria.min_degree {
            return false;
        }

        if note.is_deleted() && !criteria.include_deleted {
            return false;
        }

        true
    }

    /// Case-insensitive search over title, body, category and tags.
    fn matches_search(node: &GraphNode, needle: &str) -> bool {
        let note = &node.note;
        note.display_title().to_lowercase().contains(needle)
            || note.text.to_lowercase().contains(needle)
            || note.category_or_default().to_lowercase().contains(needle)
            || note.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}
