//! Note Ingestion
//!
//! Normalizes raw notes into graph nodes: drops soft-deleted notes unless
//! asked otherwise, seeds selection from the currently open note, seeds pin
//! state from note metadata, and never fails on malformed input.

use crate::models::{GraphNode, Note};
use std::collections::HashSet;

/// Options controlling a single ingestion pass.
#[derive(Debug, Clone, Default)]
pub struct IngestOptions {
    /// Keep soft-deleted notes in the graph
    pub include_deleted: bool,

    /// Id of the note currently open in the editor, if any
    pub open_note_id: Option<String>,
}

/// Normalizes raw notes into graph nodes.
pub struct NoteIngestor;

impl NoteIngestor {
    /// Ingest a note collection into fresh graph nodes.
    ///
    /// Soft-deleted notes are excluded unless `options.include_deleted`.
    /// The node matching `options.open_note_id` is marked selected. A note
    /// whose id was already seen is dropped (first occurrence wins) so edge
    /// endpoints stay unambiguous.
    pub fn ingest(notes: &[Note], options: &IngestOptions) -> Vec<GraphNode> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(notes.len());
        let mut skipped_deleted = 0usize;
        let mut nodes = Vec::with_capacity(notes.len());

        for note in notes {
            if note.is_deleted() && !options.include_deleted {
                skipped_deleted += 1;
                continue;
            }
            if !seen.insert(&note.id) {
                tracing::warn!("Duplicate note id {} dropped during ingestion", note.id);
                continue;
            }

            let mut node = GraphNode::from_note(note.clone());
            node.selected = options.open_note_id.as_deref() == Some(node.id.as_str());
            nodes.push(node);
        }

        if skipped_deleted > 0 {
            tracing::debug!("Ingestion skipped {} deleted notes", skipped_deleted);
        }

        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn note(id: &str) -> Note {
        let mut n = Note::new("body".to_string());
        n.id = id.to_string();
        n
    }

    #[test]
    fn test_deleted_notes_excluded_by_default() {
        let mut deleted = note("gone");
        deleted.deleted_at = Some(Utc::now());
        let notes = vec![note("kept"), deleted];

        let nodes = NoteIngestor::ingest(&notes, &IngestOptions::default());
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].id, "kept");
    }

    #[test]
    fn test_deleted_notes_kept_on_request() {
        let mut deleted = note("gone");
        deleted.deleted_at = Some(Utc::now());
        let notes = vec![note("kept"), deleted];

        let options = IngestOptions {
            include_deleted: true,
            ..Default::default()
        };
        let nodes = NoteIngestor::ingest(&notes, &options);
        assert_eq!(nodes.len(), 2);
    }

    #[test]
    fn test_open_note_seeds_selection() {
        let notes = vec![note("a"), note("b")];
        let options = IngestOptions {
            open_note_id: Some("b".to_string()),
            ..Default::default()
        };

        let nodes = NoteIngestor::ingest(&notes, &options);
        assert!(!nodes[0].selected);
        assert!(nodes[1].selected);
    }

    #[test]
    fn test_pin_metadata_carried_over() {
        let mut pinned = note("p");
        pinned.pinned = true;

        let nodes = NoteIngestor::ingest(&[pinned], &IngestOptions::default());
        assert!(nodes[0].pinned);
    }

    #[test]
    fn test_duplicate_ids_first_wins() {
        let mut first = note("dup");
        first.text = "first".to_string();
        let mut second = note("dup");
        second.text = "second".to_string();

        let nodes = NoteIngestor::ingest(&[first, second], &IngestOptions::default());
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].note.text, "first");
    }

    #[test]
    fn test_empty_input_yields_empty_nodes() {
        assert!(NoteIngestor::ingest(&[], &IngestOptions::default()).is_empty());
    }
}
