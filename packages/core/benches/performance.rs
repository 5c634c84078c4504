//! Performance benchmarks for the graph engine
//!
//! Run with: `cargo bench -p notegraph-core`
//!
//! These benchmarks measure critical path performance:
//! - Full pipeline build over a realistic 200-note corpus
//! - Relationship detection in isolation (the quadratic passes)
//! - Layout settling throughput

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use notegraph_core::models::Note;
use notegraph_core::services::{
    GraphBuildOptions, GraphService, IngestOptions, NoteIngestor, RelationshipDetector,
};

/// Generate a corpus with N notes across a handful of categories and tags
fn generate_corpus(note_count: usize) -> Vec<Note> {
    let categories = ["Setup", "Macro", "Journal", "Review", "Idea"];
    let tags = ["fomc", "swing", "breakout", "earnings", "risk", "rates"];
    let words = [
        "momentum", "volatility", "breakout", "support", "resistance", "volume", "trend",
        "reversal", "consolidation", "liquidity",
    ];
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    (0..note_count)
        .map(|i| {
            let text = (0..8)
                .map(|w| words[(i * 3 + w) % words.len()])
                .collect::<Vec<_>>()
                .join(" ");
            let mut note = Note::new(text);
            note.id = format!("note-{i}");
            note.category = Some(categories[i % categories.len()].to_string());
            note.tags = vec![
                tags[i % tags.len()].to_string(),
                tags[(i + 2) % tags.len()].to_string(),
            ];
            note.created_at = start + Duration::hours(i as i64 * 6);
            note
        })
        .collect()
}

fn bench_full_build(c: &mut Criterion) {
    let corpus = generate_corpus(200);
    c.bench_function("build_200_note_graph", |b| {
        b.iter(|| {
            let service = GraphService::build(black_box(&corpus), GraphBuildOptions::default());
            black_box(service.stats())
        })
    });
}

fn bench_relationship_detection(c: &mut Criterion) {
    let corpus = generate_corpus(200);
    let nodes = NoteIngestor::ingest(&corpus, &IngestOptions::default());
    c.bench_function("detect_relationships_200", |b| {
        b.iter(|| black_box(RelationshipDetector::detect(black_box(&nodes))))
    });
}

fn bench_layout_settling(c: &mut Criterion) {
    let corpus = generate_corpus(100);
    c.bench_function("settle_100_note_layout", |b| {
        b.iter(|| {
            let mut service =
                GraphService::build(black_box(&corpus), GraphBuildOptions::default());
            service.layout_mut().settle(300);
            black_box(service.layout().alpha())
        })
    });
}

criterion_group!(
    benches,
    bench_full_build,
    bench_relationship_detection,
    bench_layout_settling
);
criterion_main!(benches);
