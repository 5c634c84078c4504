//! Relationship Detection
//!
//! Infers typed edges between notes from four independent heuristics, run
//! in fixed order:
//!
//! 1. **Same-category** - every pair within a category group
//! 2. **Same-tag** - every pair per shared tag (k shared tags = k edges)
//! 3. **Similar-content** - pairs whose bodies share a significant token,
//!    suppressed when the pair already has an edge of any kind
//! 4. **Temporal** - chronologically adjacent notes created within a week
//!
//! The order is load-bearing: the similarity pass dedups against edges the
//! first two passes produced, and the temporal pass runs unconditionally
//! after it, so one pair may carry both a similarity and a temporal edge.
//! Groupings iterate in `BTreeMap` order so the emitted edge sequence is
//! deterministic for a given input.

use crate::models::{EdgeKind, GraphEdge, GraphNode};
use crate::utils::content_tokens;
use std::collections::{BTreeMap, HashSet};

const CATEGORY_STRENGTH: f32 = 1.0;
const CATEGORY_DISTANCE: f32 = 50.0;

const TAG_STRENGTH: f32 = 0.8;
const TAG_DISTANCE: f32 = 60.0;

const SIMILARITY_STRENGTH: f32 = 0.3;
const SIMILARITY_DISTANCE: f32 = 100.0;

const TEMPORAL_DISTANCE: f32 = 80.0;
const TEMPORAL_WINDOW_SECS: i64 = 7 * 86_400;
const TEMPORAL_MIN_STRENGTH: f32 = 0.1;

/// Runs the four relationship passes over an ingested node set.
pub struct RelationshipDetector;

impl RelationshipDetector {
    /// Detect all relationships, returning the multigraph's edge list.
    pub fn detect(nodes: &[GraphNode]) -> Vec<GraphEdge> {
        let mut edges = Vec::new();

        let category_count = Self::category_pass(nodes, &mut edges);
        tracing::debug!("Category pass produced {} edges", category_count);

        let tag_count = Self::tag_pass(nodes, &mut edges);
        tracing::debug!("Tag pass produced {} edges", tag_count);

        let similarity_count = Self::similarity_pass(nodes, &mut edges);
        tracing::debug!("Similarity pass produced {} edges", similarity_count);

        let temporal_count = Self::temporal_pass(nodes, &mut edges);
        tracing::debug!("Temporal pass produced {} edges", temporal_count);

        edges
    }

    /// Pass 1: every unordered pair within a category group.
    fn category_pass(nodes: &[GraphNode], edges: &mut Vec<GraphEdge>) -> usize {
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, node) in nodes.iter().enumerate() {
            groups.entry(node.note.category_or_default()).or_default().push(i);
        }

        let before = edges.len();
        for members in groups.values() {
            for (a, b) in unordered_pairs(members) {
                edges.push(GraphEdge::new(
                    nodes[a].id.clone(),
                    nodes[b].id.clone(),
                    EdgeKind::SameCategory,
                    CATEGORY_STRENGTH,
                    CATEGORY_DISTANCE,
                ));
            }
        }
        edges.len() - before
    }

    /// Pass 2: every unordered pair per shared tag.
    ///
    /// A pair sharing k tags gets k separate edges; the repetition is
    /// intentional reinforcement of multi-tag overlap. A tag repeated on
    /// one note counts once, so a node never pairs with itself.
    fn tag_pass(nodes: &[GraphNode], edges: &mut Vec<GraphEdge>) -> usize {
        let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (i, node) in nodes.iter().enumerate() {
            let mut seen: HashSet<&str> = HashSet::new();
            for tag in &node.note.tags {
                if seen.insert(tag.as_str()) {
                    groups.entry(tag.as_str()).or_default().push(i);
                }
            }
        }

        let before = edges.len();
        for members in groups.values() {
            for (a, b) in unordered_pairs(members) {
                edges.push(GraphEdge::new(
                    nodes[a].id.clone(),
                    nodes[b].id.clone(),
                    EdgeKind::SameTag,
                    TAG_STRENGTH,
                    TAG_DISTANCE,
                ));
            }
        }
        edges.len() - before
    }

    /// Pass 3: pairs sharing a significant body token.
    ///
    /// A candidate is discarded when the pair already carries an edge of
    /// any kind; category and tag edges, computed earlier, always win. The
    /// seen set is updated as similarity edges land, so one pair never
    /// gets two similarity edges even when it shares many tokens.
    fn similarity_pass(nodes: &[GraphNode], edges: &mut Vec<GraphEdge>) -> usize {
        let mut connected: HashSet<(usize, usize)> = HashSet::new();
        let index = id_index(nodes);
        for edge in edges.iter() {
            if let (Some(&a), Some(&b)) = (
                index.get(edge.source.as_str()),
                index.get(edge.target.as_str()),
            ) {
                connected.insert(pair_key(a, b));
            }
        }

        let mut token_owners: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, node) in nodes.iter().enumerate() {
            for token in content_tokens(&node.note.text) {
                token_owners.entry(token).or_default().push(i);
            }
        }

        let before = edges.len();
        for owners in token_owners.values().filter(|o| o.len() >= 2) {
            for (a, b) in unordered_pairs(owners) {
                if !connected.insert(pair_key(a, b)) {
                    continue;
                }
                edges.push(GraphEdge::new(
                    nodes[a].id.clone(),
                    nodes[b].id.clone(),
                    EdgeKind::SimilarContent,
                    SIMILARITY_STRENGTH,
                    SIMILARITY_DISTANCE,
                ));
            }
        }
        edges.len() - before
    }

    /// Pass 4: each node connects to its immediate chronological successor
    /// when the gap is within the seven-day window.
    ///
    /// Added unconditionally, independent of the pass-3 dedup rule. At
    /// most N-1 edges. Strength decays linearly with the gap:
    /// max(0.1, 0.5 - days/14).
    fn temporal_pass(nodes: &[GraphNode], edges: &mut Vec<GraphEdge>) -> usize {
        let mut order: Vec<usize> = (0..nodes.len()).collect();
        order.sort_by(|&a, &b| {
            nodes[a]
                .note
                .created_at
                .cmp(&nodes[b].note.created_at)
                .then_with(|| nodes[a].id.cmp(&nodes[b].id))
        });

        let before = edges.len();
        for window in order.windows(2) {
            let (a, b) = (window[0], window[1]);
            let gap = nodes[b].note.created_at - nodes[a].note.created_at;
            let secs = gap.num_seconds();
            if secs > TEMPORAL_WINDOW_SECS {
                continue;
            }

            let days = secs as f32 / 86_400.0;
            let strength = (0.5 - days / 14.0).max(TEMPORAL_MIN_STRENGTH);
            edges.push(GraphEdge::new(
                nodes[a].id.clone(),
                nodes[b].id.clone(),
                EdgeKind::Temporal,
                strength,
                TEMPORAL_DISTANCE,
            ));
        }
        edges.len() - before
    }
}

/// Unordered index pairs (a < b) within a group, preserving group order.
fn unordered_pairs(members: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    members.iter().enumerate().flat_map(move |(i, &a)| {
        members[i + 1..].iter().map(move |&b| (a, b))
    })
}

/// Normalized key for an unordered node pair.
fn pair_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Id → index table over a node slice.
fn id_index(nodes: &[GraphNode]) -> std::collections::HashMap<&str, usize> {
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| (node.id.as_str(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Note;
    use chrono::{TimeZone, Utc};

    fn node(id: &str, category: Option<&str>, tags: &[&str], text: &str, day: u32) -> GraphNode {
        let mut note = Note::new(text.to_string());
        note.id = id.to_string();
        note.category = category.map(|c| c.to_string());
        note.tags = tags.iter().map(|t| t.to_string()).collect();
        note.created_at = Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap();
        GraphNode::from_note(note)
    }

    fn edges_of_kind(edges: &[GraphEdge], kind: EdgeKind) -> Vec<&GraphEdge> {
        edges.iter().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn test_same_category_pair_single_edge() {
        let nodes = vec![
            node("a", Some("Setup"), &[], "alpha", 1),
            node("b", Some("Setup"), &[], "beta", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        let category = edges_of_kind(&edges, EdgeKind::SameCategory);
        assert_eq!(category.len(), 1);
        assert_eq!(category[0].strength, 1.0);
        assert_eq!(category[0].preferred_distance, 50.0);
    }

    #[test]
    fn test_missing_category_groups_as_uncategorized() {
        let nodes = vec![
            node("a", None, &[], "alpha", 1),
            node("b", None, &[], "beta", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);
        assert_eq!(edges_of_kind(&edges, EdgeKind::SameCategory).len(), 1);
    }

    #[test]
    fn test_k_shared_tags_k_edges() {
        let nodes = vec![
            node("a", Some("A"), &["x", "y", "z"], "alpha", 1),
            node("b", Some("B"), &["x", "y", "z"], "beta", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        let tag_edges = edges_of_kind(&edges, EdgeKind::SameTag);
        assert_eq!(tag_edges.len(), 3);
        for e in tag_edges {
            assert_eq!(e.strength, 0.8);
            assert_eq!(e.preferred_distance, 60.0);
        }
    }

    #[test]
    fn test_duplicate_tag_on_one_note_yields_no_self_edge() {
        let nodes = vec![
            node("a", Some("A"), &["fomc", "fomc"], "alpha", 1),
            node("b", Some("B"), &["fomc"], "beta", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        let tag_edges = edges_of_kind(&edges, EdgeKind::SameTag);
        assert_eq!(tag_edges.len(), 1);
        for e in &edges {
            assert_ne!(e.source, e.target);
        }
    }

    #[test]
    fn test_similarity_edge_between_lexically_close_notes() {
        let nodes = vec![
            node("a", Some("A"), &[], "breakout patterns everywhere", 1),
            node("b", Some("B"), &[], "watching breakout setups", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        let similar = edges_of_kind(&edges, EdgeKind::SimilarContent);
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].strength, 0.3);
        assert_eq!(similar[0].preferred_distance, 100.0);
    }

    #[test]
    fn test_similarity_suppressed_by_existing_category_edge() {
        let nodes = vec![
            node("a", Some("Same"), &[], "breakout momentum surge", 1),
            node("b", Some("Same"), &[], "breakout momentum surge", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        assert_eq!(edges_of_kind(&edges, EdgeKind::SameCategory).len(), 1);
        assert!(edges_of_kind(&edges, EdgeKind::SimilarContent).is_empty());
    }

    #[test]
    fn test_similarity_single_edge_despite_many_shared_tokens() {
        let nodes = vec![
            node("a", Some("A"), &[], "gamma exposure squeeze unwind", 1),
            node("b", Some("B"), &[], "gamma exposure squeeze unwind", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);
        assert_eq!(edges_of_kind(&edges, EdgeKind::SimilarContent).len(), 1);
    }

    #[test]
    fn test_temporal_adjacency_within_window() {
        let nodes = vec![
            node("a", Some("A"), &[], "alpha", 1),
            node("b", Some("B"), &[], "beta", 3),
            node("c", Some("C"), &[], "gamma", 20),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        let temporal = edges_of_kind(&edges, EdgeKind::Temporal);
        assert_eq!(temporal.len(), 1);
        assert_eq!(temporal[0].source, "a");
        assert_eq!(temporal[0].target, "b");
        assert_eq!(temporal[0].preferred_distance, 80.0);
        // 2 days: 0.5 - 2/14
        assert!((temporal[0].strength - (0.5 - 2.0 / 14.0)).abs() < 1e-6);
    }

    #[test]
    fn test_temporal_strength_bounds() {
        // Same instant: strength 0.5
        let same_day = vec![
            node("a", Some("A"), &[], "alpha", 1),
            node("b", Some("B"), &[], "beta", 1),
        ];
        let edges = RelationshipDetector::detect(&same_day);
        let temporal = edges_of_kind(&edges, EdgeKind::Temporal);
        assert!((temporal[0].strength - 0.5).abs() < 1e-6);

        // Exactly 7 days: floor at 0.1 (0.5 - 7/14 = 0.0 clamps up)
        let week_apart = vec![
            node("a", Some("A"), &[], "alpha", 1),
            node("b", Some("B"), &[], "beta", 8),
        ];
        let edges = RelationshipDetector::detect(&week_apart);
        let temporal = edges_of_kind(&edges, EdgeKind::Temporal);
        assert_eq!(temporal.len(), 1);
        assert!((temporal[0].strength - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_temporal_only_immediate_successor() {
        // a-b-c all within a week of each other: chain edges only, no a-c
        let nodes = vec![
            node("a", Some("A"), &[], "alpha", 1),
            node("b", Some("B"), &[], "beta", 2),
            node("c", Some("C"), &[], "gamma", 3),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        let temporal = edges_of_kind(&edges, EdgeKind::Temporal);
        assert_eq!(temporal.len(), 2);
        assert!(!temporal
            .iter()
            .any(|e| e.touches("a") && e.touches("c")));
    }

    #[test]
    fn test_temporal_ignores_similarity_dedup() {
        // Pair shares tokens AND is chronologically adjacent: both edges
        let nodes = vec![
            node("a", Some("A"), &[], "volatility regime shift", 1),
            node("b", Some("B"), &[], "volatility regime shift", 2),
        ];
        let edges = RelationshipDetector::detect(&nodes);

        assert_eq!(edges_of_kind(&edges, EdgeKind::SimilarContent).len(), 1);
        assert_eq!(edges_of_kind(&edges, EdgeKind::Temporal).len(), 1);
    }

    #[test]
    fn test_detect_empty_and_single() {
        assert!(RelationshipDetector::detect(&[]).is_empty());
        let single = vec![node("a", Some("A"), &["t"], "alpha beta gamma", 1)];
        assert!(RelationshipDetector::detect(&single).is_empty());
    }
}
