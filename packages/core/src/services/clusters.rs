//! Cluster Analysis
//!
//! Derives the legend clusters from an ingested node set and stamps each
//! node with its category cluster id.
//!
//! Category clusters: one per distinct category, alphabetical, colors
//! cycled from the category palette by index. Tag clusters: tags carried by
//! at least two notes, ranked by descending frequency (name tiebreak), top
//! ten only, colored from the tag palette. The combined ordered list feeds
//! the legend and, in radial mode, the anchor ring.

use crate::models::{ClusterInfo, ClusterKind, ClusterPalette, GraphNode};
use std::collections::{BTreeMap, HashSet};

/// Maximum number of tag clusters in the legend.
pub const MAX_TAG_CLUSTERS: usize = 10;

/// Minimum note count for a tag to form a cluster.
pub const MIN_TAG_MEMBERS: usize = 2;

/// Derives legend clusters and assigns nodes to them.
pub struct ClusterAnalyzer;

impl ClusterAnalyzer {
    /// Analyze the node set, stamping category cluster ids onto nodes and
    /// returning the ordered legend (categories first, then tags).
    pub fn analyze(nodes: &mut [GraphNode], palette: &ClusterPalette) -> Vec<ClusterInfo> {
        let mut clusters = Self::category_clusters(nodes, palette);
        clusters.extend(Self::tag_clusters(nodes, palette));
        tracing::debug!("Cluster analysis produced {} clusters", clusters.len());
        clusters
    }

    fn category_clusters(nodes: &mut [GraphNode], palette: &ClusterPalette) -> Vec<ClusterInfo> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for node in nodes.iter() {
            *counts
                .entry(node.note.category_or_default().to_string())
                .or_insert(0) += 1;
        }

        let clusters: Vec<ClusterInfo> = counts
            .into_iter()
            .enumerate()
            .map(|(index, (name, member_count))| ClusterInfo {
                id: ClusterInfo::category_id(&name),
                color: palette.category_color(index).to_string(),
                name,
                kind: ClusterKind::Category,
                member_count,
            })
            .collect();

        for node in nodes.iter_mut() {
            node.cluster_id = Some(ClusterInfo::category_id(node.note.category_or_default()));
        }

        clusters
    }

    fn tag_clusters(nodes: &[GraphNode], palette: &ClusterPalette) -> Vec<ClusterInfo> {
        // Member counts are distinct notes, so a tag repeated on one note
        // counts once
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for node in nodes {
            let mut seen: HashSet<&str> = HashSet::new();
            for tag in &node.note.tags {
                if seen.insert(tag.as_str()) {
                    *counts.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts
            .into_iter()
            .filter(|&(_, count)| count >= MIN_TAG_MEMBERS)
            .collect();
        // Descending frequency; BTreeMap already ordered names for the tiebreak
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(MAX_TAG_CLUSTERS);

        ranked
            .into_iter()
            .enumerate()
            .map(|(index, (name, member_count))| ClusterInfo {
                id: ClusterInfo::tag_id(name),
                name: name.to_string(),
                kind: ClusterKind::Tag,
                color: palette.tag_color(index).to_string(),
                member_count,
            })
            .collect()
    }
}
