//! Integration tests for the full graph build pipeline
//!
//! Tests cover:
//! - The degree invariant over the full multigraph
//! - Cross-pass interaction (similarity dedup vs. temporal independence)
//! - The documented two-note scenario (category + tag + temporal)
//! - Single-note and empty-corpus edge cases
//! - Stats snapshots and rebuild teardown

use anyhow::Result;
use chrono::{TimeZone, Utc};
use notegraph_core::models::{EdgeKind, Note, NoteGraph};
use notegraph_core::services::{GraphBuildOptions, GraphService, LayoutPhase};

/// Opt-in log output for debugging: `RUST_LOG=debug cargo test`
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Test helper: a note with the fields the pipeline cares about
fn note(id: &str, category: &str, tags: &[&str], text: &str, day: u32) -> Note {
    let mut n = Note::new(text.to_string());
    n.id = id.to_string();
    n.category = Some(category.to_string());
    n.tags = tags.iter().map(|t| t.to_string()).collect();
    n.created_at = Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).unwrap();
    n
}

fn count_kind(graph: &NoteGraph, kind: EdgeKind) -> usize {
    graph.edges.iter().filter(|e| e.kind == kind).count()
}

// =========================================================================
// Degree Invariant
// =========================================================================

#[test]
fn test_degree_equals_incident_edge_count() -> Result<()> {
    init_tracing();
    let notes = vec![
        note("a", "Setup", &["fomc", "rates"], "fed pause watch", 1),
        note("b", "Setup", &["fomc"], "fed pause confirmed", 2),
        note("c", "Journal", &["rates"], "quiet tape today", 4),
        note("d", "Macro", &[], "unrelated thoughts entirely", 25),
    ];
    let service = GraphService::build(&notes, GraphBuildOptions::default());
    let graph = service.graph();

    for node in &graph.nodes {
        let incident = graph.edges.iter().filter(|e| e.touches(&node.id)).count();
        assert_eq!(
            node.degree, incident,
            "degree mismatch for node {}",
            node.id
        );
    }
    Ok(())
}

// =========================================================================
// Documented Two-Note Scenario
// =========================================================================

#[test]
fn test_setup_fomc_scenario() -> Result<()> {
    // a and b share category "Setup", tag "fomc", and are two days apart
    let notes = vec![
        note("a", "Setup", &["fomc"], "alpha", 1),
        note("b", "Setup", &["fomc"], "beta", 3),
    ];
    let service = GraphService::build(&notes, GraphBuildOptions::default());
    let graph = service.graph();

    assert_eq!(graph.edges.len(), 3);
    assert_eq!(count_kind(graph, EdgeKind::SameCategory), 1);
    assert_eq!(count_kind(graph, EdgeKind::SameTag), 1);
    assert_eq!(count_kind(graph, EdgeKind::Temporal), 1);

    let category = graph
        .edges
        .iter()
        .find(|e| e.kind == EdgeKind::SameCategory)
        .unwrap();
    assert_eq!(category.strength, 1.0);
    assert_eq!(category.preferred_distance, 50.0);

    let tag = graph
        .edges
        .iter()
        .find(|e| e.kind == EdgeKind::SameTag)
        .unwrap();
    assert_eq!(tag.strength, 0.8);
    assert_eq!(tag.preferred_distance, 60.0);

    let temporal = graph
        .edges
        .iter()
        .find(|e| e.kind == EdgeKind::Temporal)
        .unwrap();
    assert!((temporal.strength - 0.357).abs() < 0.001);
    assert_eq!(temporal.preferred_distance, 80.0);

    for node in &graph.nodes {
        assert_eq!(node.degree, 3);
    }
    Ok(())
}

// =========================================================================
// Cross-Pass Interaction
// =========================================================================

#[test]
fn test_similarity_never_joins_already_connected_pair() -> Result<()> {
    // Strong lexical overlap, but the shared tag edge wins
    let notes = vec![
        note("a", "A", &["shared"], "identical breakout momentum text", 1),
        note("b", "B", &["shared"], "identical breakout momentum text", 20),
    ];
    let service = GraphService::build(&notes, GraphBuildOptions::default());
    let graph = service.graph();

    assert_eq!(count_kind(graph, EdgeKind::SameTag), 1);
    assert_eq!(count_kind(graph, EdgeKind::SimilarContent), 0);
    Ok(())
}

#[test]
fn test_temporal_edge_coexists_with_similarity_edge() -> Result<()> {
    let notes = vec![
        note("a", "A", &[], "volatility regime notes", 1),
        note("b", "B", &[], "volatility regime notes", 2),
    ];
    let service = GraphService::build(&notes, GraphBuildOptions::default());
    let graph = service.graph();

    assert_eq!(count_kind(graph, EdgeKind::SimilarContent), 1);
    assert_eq!(count_kind(graph, EdgeKind::Temporal), 1);
    Ok(())
}

#[test]
fn test_no_temporal_edge_past_seven_days() -> Result<()> {
    let notes = vec![
        note("a", "A", &[], "alpha", 1),
        note("b", "B", &[], "beta", 9),
    ];
    let service = GraphService::build(&notes, GraphBuildOptions::default());
    assert_eq!(count_kind(service.graph(), EdgeKind::Temporal), 0);
    Ok(())
}

// =========================================================================
// Edge Invariants
// =========================================================================

#[test]
fn test_no_self_edges_and_endpoints_exist() -> Result<()> {
    let notes = vec![
        note("a", "Setup", &["x", "y"], "one two three four", 1),
        note("b", "Setup", &["x"], "two three four five", 2),
        note("c", "Other", &["y"], "three four five six", 3),
    ];
    let service = GraphService::build(&notes, GraphBuildOptions::default());
    let graph = service.graph();
    let index = graph.node_index();

    for edge in &graph.edges {
        assert_ne!(edge.source, edge.target);
        assert!(index.contains_key(&edge.source));
        assert!(index.contains_key(&edge.target));
        assert!(edge.strength > 0.0 && edge.strength <= 1.0);
    }
    Ok(())
}

// =========================================================================
// Empty / Single Corpus
// =========================================================================

#[test]
fn test_single_note_graph() -> Result<()> {
    let notes = vec![note("only", "Setup", &["solo"], "just me here", 1)];
    let mut service = GraphService::build(&notes, GraphBuildOptions::default());
    let stats = service.stats();

    assert_eq!(stats.node_count, 1);
    assert_eq!(stats.edge_count, 0);
    assert_eq!(service.graph().nodes[0].degree, 0);
    // One node, one category cluster; the solo tag forms no cluster
    assert_eq!(stats.cluster_count, 1);

    // Settles at the viewport center
    let layout = service.layout_mut();
    layout.settle(1000);
    assert_eq!(layout.phase(), LayoutPhase::Settled);
    let (x, y) = layout.position("only").unwrap();
    assert!((x - 400.0).abs() < 1.0);
    assert!((y - 300.0).abs() < 1.0);
    Ok(())
}

#[test]
fn test_empty_corpus_is_valid() -> Result<()> {
    let service = GraphService::build(&[], GraphBuildOptions::default());
    assert!(service.graph().is_empty());
    assert_eq!(service.layout().phase(), LayoutPhase::Idle);
    Ok(())
}

// =========================================================================
// Deleted Notes and Selection Seeding
// =========================================================================

#[test]
fn test_deleted_notes_excluded_from_pipeline() -> Result<()> {
    let mut gone = note("gone", "Setup", &["fomc"], "deleted note", 2);
    gone.deleted_at = Some(Utc::now());
    let notes = vec![note("kept", "Setup", &["fomc"], "live note", 1), gone];

    let service = GraphService::build(&notes, GraphBuildOptions::default());
    assert_eq!(service.stats().node_count, 1);
    assert_eq!(service.stats().edge_count, 0);

    let options = GraphBuildOptions {
        include_deleted: true,
        ..Default::default()
    };
    let service = GraphService::build(&notes, options);
    assert_eq!(service.stats().node_count, 2);
    assert!(service.stats().edge_count >= 2);
    Ok(())
}

#[test]
fn test_open_note_selected_after_build() -> Result<()> {
    let notes = vec![note("a", "A", &[], "alpha", 1), note("b", "B", &[], "beta", 2)];
    let options = GraphBuildOptions {
        open_note_id: Some("b".to_string()),
        ..Default::default()
    };
    let service = GraphService::build(&notes, options);

    assert!(!service.graph().node("a").unwrap().selected);
    assert!(service.graph().node("b").unwrap().selected);
    Ok(())
}

// =========================================================================
// Rebuild Teardown
// =========================================================================

#[test]
fn test_rebuild_resets_layout_and_graph() -> Result<()> {
    let notes = vec![note("a", "A", &[], "alpha", 1)];
    let mut service = GraphService::build(&notes, GraphBuildOptions::default());

    service.layout_mut().toggle_pin("a");
    service.layout_mut().settle(1000);
    assert_eq!(service.layout().phase(), LayoutPhase::Settled);

    let more = vec![
        note("a", "A", &[], "alpha", 1),
        note("b", "A", &[], "beta", 2),
    ];
    service.rebuild(&more);

    assert_eq!(service.stats().node_count, 2);
    assert_eq!(service.layout().phase(), LayoutPhase::Running);
    assert!(!service.layout().is_pinned("a"));
    Ok(())
}
