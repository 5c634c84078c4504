//! Cluster Data Structures
//!
//! Clusters are derived groupings of graph nodes sharing a category or a
//! frequent tag. They feed the legend and, in radial mode, the anchor ring.
//! Cluster data is fully recomputed on every graph rebuild.

use serde::{Deserialize, Serialize};

/// Whether a cluster groups by category or by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClusterKind {
    Category,
    Tag,
}

/// A named, colored grouping of nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterInfo {
    /// Stable identifier ("category:Macro", "tag:fomc")
    pub id: String,

    /// Display name (the category or tag itself)
    pub name: String,

    /// Grouping kind
    pub kind: ClusterKind,

    /// Hex color assigned from the palette
    pub color: String,

    /// Number of member nodes
    pub member_count: usize,
}

impl ClusterInfo {
    /// Stable cluster id for a category name.
    pub fn category_id(name: &str) -> String {
        format!("category:{name}")
    }

    /// Stable cluster id for a tag name.
    pub fn tag_id(name: &str) -> String {
        format!("tag:{name}")
    }
}

/// Color palettes for cluster assignment.
///
/// Passed explicitly into analysis so independent graph instances never
/// interfere with each other's color cycling.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterPalette {
    /// Qualitative palette for category clusters, cycled by index
    pub category_colors: Vec<String>,

    /// Second distinct palette for tag clusters, cycled by index
    pub tag_colors: Vec<String>,
}

impl Default for ClusterPalette {
    fn default() -> Self {
        Self {
            category_colors: [
                "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2",
                "#7f7f7f", "#bcbd22", "#17becf",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            tag_colors: [
                "#8dd3c7", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5", "#bc80bd",
                "#ccebc5", "#ffed6f", "#bebada",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ClusterPalette {
    /// Color for the `index`-th category cluster, cycling past the end.
    pub fn category_color(&self, index: usize) -> &str {
        &self.category_colors[index % self.category_colors.len()]
    }

    /// Color for the `index`-th tag cluster, cycling past the end.
    pub fn tag_color(&self, index: usize) -> &str {
        &self.tag_colors[index % self.tag_colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles_past_ten() {
        let palette = ClusterPalette::default();
        assert_eq!(palette.category_color(0), palette.category_color(10));
        assert_eq!(palette.tag_color(3), palette.tag_color(13));
    }

    #[test]
    fn test_palettes_are_distinct() {
        let palette = ClusterPalette::default();
        assert_ne!(palette.category_colors, palette.tag_colors);
        assert_eq!(palette.category_colors.len(), 10);
        assert_eq!(palette.tag_colors.len(), 10);
    }

    #[test]
    fn test_cluster_ids_are_namespaced() {
        assert_eq!(ClusterInfo::category_id("Macro"), "category:Macro");
        assert_eq!(ClusterInfo::tag_id("fomc"), "tag:fomc");
    }
}
