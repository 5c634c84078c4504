//! Note Data Structures
//!
//! This module defines the `Note` struct, the external read-only input to the
//! graph engine. Notes are owned by the host note-storage layer; the engine
//! never mutates them and never persists them.
//!
//! # Examples
//!
//! ```rust
//! use notegraph_core::models::Note;
//!
//! let note = Note::new("Fed minutes point to a pause".to_string())
//!     .with_title("FOMC recap".to_string())
//!     .with_category("Macro".to_string())
//!     .with_tags(vec!["fomc".to_string(), "rates".to_string()]);
//!
//! assert_eq!(note.category_or_default(), "Macro");
//! assert!(!note.is_deleted());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Content type of a note, mirroring the host editor's modes.
///
/// Unknown values deserialize as `Text` so malformed input never fails
/// ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ContentType {
    Code,
    Mermaid,
    Math,
    Voice,
    // `serde(other)` requires the catch-all variant to come last
    #[default]
    #[serde(other)]
    Text,
}

/// A note as supplied by the host note-storage collaborator.
///
/// # Fields
///
/// - `id`: Unique identifier (UUID for notes created here)
/// - `text`: Body text, the input to the lexical-similarity pass
/// - `title`: Optional display title
/// - `category`: Optional category; missing categories are treated as
///   "Uncategorized" during ingestion
/// - `tags`: Free-form tags (missing tags deserialize as empty)
/// - `content_type`: Editor mode the note was authored in
/// - `created_at`: Creation timestamp, drives the temporal pass
/// - `deleted_at`: Soft-delete marker; deleted notes are excluded unless
///   the caller opts in
/// - `pinned`: Host-side pin metadata, seeds the layout pin state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier
    pub id: String,

    /// Body text
    pub text: String,

    /// Optional display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Optional category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,

    /// Editor content type
    #[serde(default)]
    pub content_type: ContentType,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Soft-delete timestamp (None = live)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,

    /// Host-side pin metadata
    #[serde(default)]
    pub pinned: bool,
}

/// Fallback category applied during ingestion when a note has none.
pub const UNCATEGORIZED: &str = "Uncategorized";

impl Note {
    /// Create a new note with an auto-generated UUID and the current time.
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            title: None,
            category: None,
            tags: Vec::new(),
            content_type: ContentType::Text,
            created_at: Utc::now(),
            deleted_at: None,
            pinned: false,
        }
    }

    /// Set the title (builder style)
    pub fn with_title(mut self, title: String) -> Self {
        self.title = Some(title);
        self
    }

    /// Set the category (builder style)
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// Set the tags (builder style)
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Set the content type (builder style)
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Set the creation timestamp (builder style)
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Whether this note has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// The note's category, or [`UNCATEGORIZED`] when none is set.
    ///
    /// Blank categories count as missing.
    pub fn category_or_default(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }

    /// Title when present, otherwise the first line of the body.
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => self.text.lines().next().unwrap_or(""),
        }
    }
}
