//! Filter Criteria
//!
//! `FilterCriteria` is a pure value object describing which part of the
//! graph should be visible. It is evaluated by the filter engine without
//! mutating the underlying graph, and it round-trips through the share
//! configuration, so every field serializes camelCase.

use crate::models::note::ContentType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Criteria for computing a visible subgraph.
///
/// All conditions are conjunctive: a node must satisfy every populated
/// field to survive. Empty collections and `None` bounds do not constrain.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive search over title, body, category and tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Selected categories (empty = all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,

    /// Selected tags (empty = all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Selected content types (empty = all)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub content_types: Vec<ContentType>,

    /// Keep notes created at or after this time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_after: Option<DateTime<Utc>>,

    /// Keep notes created at or before this time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_before: Option<DateTime<Utc>>,

    /// Minimum node degree
    #[serde(default)]
    pub min_degree: usize,

    /// Whether soft-deleted notes stay visible
    #[serde(default)]
    pub include_deleted: bool,
}

impl FilterCriteria {
    /// Create a new empty (match-everything) criteria set
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text
    pub fn with_search(mut self, search: String) -> Self {
        self.search = Some(search);
        self
    }

    /// Filter by categories
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Filter by tags
    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Filter by content types
    pub fn with_content_types(mut self, content_types: Vec<ContentType>) -> Self {
        self.content_types = content_types;
        self
    }

    /// Keep notes created at or after this time
    pub fn with_created_after(mut self, after: DateTime<Utc>) -> Self {
        self.created_after = Some(after);
        self
    }

    /// Keep notes created at or before this time
    pub fn with_created_before(mut self, before: DateTime<Utc>) -> Self {
        self.created_before = Some(before);
        self
    }

    /// Require a minimum node degree
    pub fn with_min_degree(mut self, min_degree: usize) -> Self {
        self.min_degree = min_degree;
        self
    }

    /// Keep soft-deleted notes visible
    pub fn with_include_deleted(mut self, include_deleted: bool) -> Self {
        self.include_deleted = include_deleted;
        self
    }

    /// Whether this criteria set constrains anything at all.
    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map_or(true, |s| s.trim().is_empty())
            && self.categories.is_empty()
            && self.tags.is_empty()
            && self.content_types.is_empty()
            && self.created_after.is_none()
            && self.created_before.is_none()
            && self.min_degree == 0
            && !self.include_deleted
    }
}
