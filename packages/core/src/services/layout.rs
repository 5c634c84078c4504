//! Force-Directed Layout Engine
//!
//! A stepped physical simulation that positions graph nodes so related
//! notes converge. The host drives it cooperatively: one [`LayoutEngine::tick`]
//! per animation frame, control yielded between steps. No background
//! threads, no blocking anywhere.
//!
//! # Phase machine
//!
//! Idle → Running → (Dragging ⇄ Running) → Settled. A fresh engine is
//! built on every graph rebuild; the previous instance is simply dropped
//! and no longer stepped. Settled is reached when the decaying energy
//! scalar (alpha) falls below `alpha_min`.
//!
//! # Forces
//!
//! Per tick, summed per node then integrated with velocity damping:
//!
//! - **Link**: spring toward each edge's preferred distance, scaled by
//!   the edge strength
//! - **Charge**: pairwise 1/d² repulsion within a 300 px radius; per-node
//!   magnitude max(50, 100 - degree·10), so hubs repel less and stay
//!   central
//! - **Center**: weak pull toward the viewport center
//! - **Collision**: soft non-overlap with radius max(15, degree·3 + 10)
//! - **Radial anchor** (radial mode only): one composite force driven by a
//!   node → ring-target table built in the constructor
//!
//! # Two-phase endpoints
//!
//! The constructor resolves edge ids through an id → index table once;
//! every simulation step works on indices.

use crate::models::{ClusterKind, NoteGraph, ViewMode};
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Golden angle, for deterministic phyllotaxis seeding.
const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Simulation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPhase {
    /// Built but not started (or empty graph)
    Idle,
    /// Free integration in progress
    Running,
    /// A node is held by the pointer; alpha is kept elevated
    Dragging,
    /// Alpha dropped below the threshold; layout is stable
    Settled,
}

/// Tunable simulation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Viewport width in pixels
    pub width: f32,
    /// Viewport height in pixels
    pub height: f32,
    /// Settling threshold for alpha
    pub alpha_min: f32,
    /// Per-tick alpha interpolation rate
    pub alpha_decay: f32,
    /// Alpha target held while dragging
    pub drag_alpha_target: f32,
    /// Velocity retained per tick (damping multiplier)
    pub velocity_decay: f32,
    /// Link spring scale
    pub link_strength: f32,
    /// Center pull scale
    pub center_strength: f32,
    /// Repulsion interaction radius in pixels
    pub charge_max_distance: f32,
    /// Collision push scale
    pub collision_strength: f32,
    /// Radial anchor pull scale
    pub radial_strength: f32,
    /// Radius of the radial anchor ring in pixels
    pub radial_radius: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            alpha_min: 0.001,
            // Reaches alpha_min in roughly 300 ticks from alpha 1.0
            alpha_decay: 0.0228,
            drag_alpha_target: 0.3,
            velocity_decay: 0.6,
            link_strength: 0.1,
            center_strength: 0.05,
            charge_max_distance: 300.0,
            collision_strength: 0.7,
            radial_strength: 0.1,
            radial_radius: 150.0,
        }
    }
}

/// Per-node simulation record, rebuilt fresh on every graph rebuild.
///
/// Kept separate from the domain `GraphNode` so the engine never mutates
/// the note model and no identity leaks across rebuilds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// Position
    pub x: f32,
    /// Position
    pub y: f32,
    /// Velocity
    pub vx: f32,
    /// Velocity
    pub vy: f32,
    /// Pin: when set, position is held and integration is bypassed
    pub fx: Option<f32>,
    /// Pin: when set, position is held and integration is bypassed
    pub fy: Option<f32>,
}

/// An edge with endpoints resolved to node indices.
#[derive(Debug, Clone, Copy)]
struct ResolvedEdge {
    source: usize,
    target: usize,
    strength: f32,
    preferred_distance: f32,
}

/// The stepped force simulation.
pub struct LayoutEngine {
    config: LayoutConfig,
    phase: LayoutPhase,
    alpha: f32,
    alpha_target: f32,
    ids: Vec<String>,
    index: HashMap<String, usize>,
    states: Vec<LayoutState>,
    edges: Vec<ResolvedEdge>,
    /// Per-node repulsion magnitude, derived from degree
    charges: Vec<f32>,
    /// Per-node collision radius, derived from degree
    radii: Vec<f32>,
    /// Radial-mode ring target per node (None outside radial mode)
    anchors: Vec<Option<(f32, f32)>>,
    dragged: Option<usize>,
}

impl LayoutEngine {
    /// Build a fresh engine for a graph and view mode.
    ///
    /// Resolves edge endpoints to indices, derives per-node charge and
    /// collision radii from degrees, computes the radial anchor table when
    /// the mode asks for it, and seeds deterministic phyllotaxis positions
    /// around the viewport center. The engine starts Idle; call
    /// [`start`](Self::start) to begin running.
    pub fn new(graph: &NoteGraph, mode: ViewMode, config: LayoutConfig) -> Self {
        let index = graph.node_index();
        let ids: Vec<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();

        let center = (config.width / 2.0, config.height / 2.0);
        let mut states = Vec::with_capacity(graph.nodes.len());
        for i in 0..graph.nodes.len() {
            let radius = 10.0 * (i as f32).sqrt();
            let angle = i as f32 * GOLDEN_ANGLE;
            states.push(LayoutState {
                x: center.0 + radius * angle.cos(),
                y: center.1 + radius * angle.sin(),
                vx: 0.0,
                vy: 0.0,
                fx: None,
                fy: None,
            });
        }

        // Host-pinned notes hold their seeded position until released
        for (i, node) in graph.nodes.iter().enumerate() {
            if node.pinned {
                states[i].fx = Some(states[i].x);
                states[i].fy = Some(states[i].y);
            }
        }

        let charges: Vec<f32> = graph
            .nodes
            .iter()
            .map(|n| (100.0 - n.degree as f32 * 10.0).max(50.0))
            .collect();
        let radii: Vec<f32> = graph
            .nodes
            .iter()
            .map(|n| (n.degree as f32 * 3.0 + 10.0).max(15.0))
            .collect();

        let edges: Vec<ResolvedEdge> = graph
            .edges
            .iter()
            .filter_map(|e| {
                let source = *index.get(&e.source)?;
                let target = *index.get(&e.target)?;
                Some(ResolvedEdge {
                    source,
                    target,
                    strength: e.strength,
                    preferred_distance: e.preferred_distance,
                })
            })
            .collect();

        let anchors = Self::anchor_table(graph, mode, center, config.radial_radius);

        Self {
            config,
            phase: LayoutPhase::Idle,
            alpha: 1.0,
            alpha_target: 0.0,
            ids,
            index,
            states,
            edges,
            charges,
            radii,
            anchors,
            dragged: None,
        }
    }

    /// Node → ring-target lookup table for radial mode.
    ///
    /// Each category cluster gets a fixed angle (index · 2π / count) on a
    /// ring around the center; nodes are pulled toward their category's
    /// point. A single table replaces per-cluster force objects.
    fn anchor_table(
        graph: &NoteGraph,
        mode: ViewMode,
        center: (f32, f32),
        radius: f32,
    ) -> Vec<Option<(f32, f32)>> {
        if mode != ViewMode::Radial {
            return vec![None; graph.nodes.len()];
        }

        let category_clusters: Vec<&str> = graph
            .clusters
            .iter()
            .filter(|c| c.kind == ClusterKind::Category)
            .map(|c| c.id.as_str())
            .collect();
        if category_clusters.is_empty() {
            return vec![None; graph.nodes.len()];
        }

        let targets: HashMap<&str, (f32, f32)> = category_clusters
            .iter()
            .enumerate()
            .map(|(i, &id)| {
                let angle = i as f32 * TAU / category_clusters.len() as f32;
                (
                    id,
                    (
                        center.0 + radius * angle.cos(),
                        center.1 + radius * angle.sin(),
                    ),
                )
            })
            .collect();

        graph
            .nodes
            .iter()
            .map(|n| {
                n.cluster_id
                    .as_deref()
                    .and_then(|id| targets.get(id).copied())
            })
            .collect()
    }

    /// Current phase.
    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    /// Current energy scalar.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Number of simulated nodes.
    pub fn node_count(&self) -> usize {
        self.states.len()
    }

    /// Begin running. A graph with no nodes never starts; the caller
    /// shows its empty state instead.
    pub fn start(&mut self) {
        if self.states.is_empty() {
            tracing::debug!("Layout not started: empty graph");
            return;
        }
        if self.phase == LayoutPhase::Idle {
            self.alpha = 1.0;
            self.phase = LayoutPhase::Running;
        }
    }

    /// Advance the simulation by one step.
    ///
    /// Returns `true` while the simulation wants further ticks. Idle and
    /// Settled engines are no-ops.
    pub fn tick(&mut self) -> bool {
        match self.phase {
            LayoutPhase::Running | LayoutPhase::Dragging => {}
            LayoutPhase::Idle | LayoutPhase::Settled => return false,
        }

        self.apply_link_force();
        self.apply_charge_force();
        self.apply_center_force();
        self.apply_collision_force();
        self.apply_anchor_force();
        self.integrate();

        self.alpha += (self.alpha_target - self.alpha) * self.config.alpha_decay;
        if self.phase == LayoutPhase::Running && self.alpha < self.config.alpha_min {
            self.phase = LayoutPhase::Settled;
            tracing::debug!("Layout settled after alpha decay");
            return false;
        }
        true
    }

    /// Step until settled, bounded by `max_ticks`.
    pub fn settle(&mut self, max_ticks: usize) {
        for _ in 0..max_ticks {
            if !self.tick() {
                break;
            }
        }
    }

    /// Position of a node by id.
    pub fn position(&self, id: &str) -> Option<(f32, f32)> {
        let &i = self.index.get(id)?;
        Some((self.states[i].x, self.states[i].y))
    }

    /// All node positions, in graph node order.
    pub fn positions(&self) -> impl Iterator<Item = (&str, f32, f32)> + '_ {
        self.ids
            .iter()
            .zip(&self.states)
            .map(|(id, s)| (id.as_str(), s.x, s.y))
    }

    /// Simulation state of a node by id.
    pub fn state(&self, id: &str) -> Option<&LayoutState> {
        self.index.get(id).map(|&i| &self.states[i])
    }

    /// Whether the node's position is currently held fixed.
    pub fn is_pinned(&self, id: &str) -> bool {
        self.index
            .get(id)
            .map(|&i| self.states[i].fx.is_some())
            .unwrap_or(false)
    }

    /// Grab a node. Elevates alpha so neighbors keep responding while the
    /// pointer moves it. Unknown ids are logged no-ops.
    pub fn drag_start(&mut self, id: &str) {
        let Some(&i) = self.index.get(id) else {
            tracing::warn!("drag_start for unknown node {}", id);
            return;
        };
        self.dragged = Some(i);
        self.phase = LayoutPhase::Dragging;
        self.alpha_target = self.config.drag_alpha_target;
        self.alpha = self.alpha.max(self.config.drag_alpha_target);
    }

    /// Force-set the dragged node's position, bypassing integration.
    pub fn drag_move(&mut self, id: &str, x: f32, y: f32) {
        let Some(&i) = self.index.get(id) else {
            tracing::warn!("drag_move for unknown node {}", id);
            return;
        };
        if self.dragged != Some(i) {
            return;
        }
        let state = &mut self.states[i];
        state.x = x;
        state.y = y;
        state.vx = 0.0;
        state.vy = 0.0;
        state.fx = Some(x);
        state.fy = Some(y);
    }

    /// Release the dragged node. It resumes free integration unless it was
    /// explicitly pinned while held.
    pub fn drag_end(&mut self, id: &str, keep_pinned: bool) {
        let Some(&i) = self.index.get(id) else {
            tracing::warn!("drag_end for unknown node {}", id);
            return;
        };
        if self.dragged == Some(i) {
            self.dragged = None;
        }
        if !keep_pinned {
            self.states[i].fx = None;
            self.states[i].fy = None;
        }
        self.alpha_target = 0.0;
        if self.phase == LayoutPhase::Dragging {
            self.phase = LayoutPhase::Running;
        }
    }

    /// Toggle the explicit pin on a node (double-click gesture at the
    /// host). Pinning holds the current position; unpinning returns the
    /// node to free integration.
    pub fn toggle_pin(&mut self, id: &str) {
        let Some(&i) = self.index.get(id) else {
            tracing::warn!("toggle_pin for unknown node {}", id);
            return;
        };
        let state = &mut self.states[i];
        if state.fx.is_some() {
            state.fx = None;
            state.fy = None;
        } else {
            state.fx = Some(state.x);
            state.fy = Some(state.y);
        }
    }

    fn apply_link_force(&mut self) {
        let scale = self.config.link_strength * self.alpha;
        for edge in &self.edges {
            let (s, t) = (edge.source, edge.target);
            let dx = self.states[t].x - self.states[s].x;
            let dy = self.states[t].y - self.states[s].y;
            let dist = (dx * dx + dy * dy).sqrt().max(1e-3);

            let displacement = (dist - edge.preferred_distance) / dist * edge.strength * scale;
            let fx = dx * displacement * 0.5;
            let fy = dy * displacement * 0.5;

            self.states[s].vx += fx;
            self.states[s].vy += fy;
            self.states[t].vx -= fx;
            self.states[t].vy -= fy;
        }
    }

    fn apply_charge_force(&mut self) {
        let cutoff_sq = self.config.charge_max_distance * self.config.charge_max_distance;
        let n = self.states.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.states[i].x - self.states[j].x;
                let dy = self.states[i].y - self.states[j].y;
                let dist_sq = (dx * dx + dy * dy).max(1.0);
                if dist_sq > cutoff_sq {
                    continue;
                }
                let dist = dist_sq.sqrt();
                let (ux, uy) = (dx / dist, dy / dist);

                // Each node repels with its own magnitude; hubs push less
                let push_on_i = self.charges[j] * self.alpha / dist_sq;
                let push_on_j = self.charges[i] * self.alpha / dist_sq;
                self.states[i].vx += ux * push_on_i;
                self.states[i].vy += uy * push_on_i;
                self.states[j].vx -= ux * push_on_j;
                self.states[j].vy -= uy * push_on_j;
            }
        }
    }

    fn apply_center_force(&mut self) {
        let (cx, cy) = (self.config.width / 2.0, self.config.height / 2.0);
        let scale = self.config.center_strength * self.alpha;
        for state in &mut self.states {
            state.vx += (cx - state.x) * scale;
            state.vy += (cy - state.y) * scale;
        }
    }

    fn apply_collision_force(&mut self) {
        let n = self.states.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.states[i].x - self.states[j].x;
                let dy = self.states[i].y - self.states[j].y;
                let dist = (dx * dx + dy * dy).sqrt().max(1e-3);
                let min_dist = self.radii[i] + self.radii[j];
                if dist >= min_dist {
                    continue;
                }

                let overlap = (min_dist - dist) / dist * self.config.collision_strength * 0.5;
                let fx = dx * overlap;
                let fy = dy * overlap;
                self.states[i].vx += fx;
                self.states[i].vy += fy;
                self.states[j].vx -= fx;
                self.states[j].vy -= fy;
            }
        }
    }

    fn apply_anchor_force(&mut self) {
        let scale = self.config.radial_strength * self.alpha;
        for (state, anchor) in self.states.iter_mut().zip(&self.anchors) {
            if let Some((tx, ty)) = anchor {
                state.vx += (tx - state.x) * scale;
                state.vy += (ty - state.y) * scale;
            }
        }
    }

    fn integrate(&mut self) {
        for state in &mut self.states {
            if let (Some(fx), Some(fy)) = (state.fx, state.fy) {
                state.x = fx;
                state.y = fy;
                state.vx = 0.0;
                state.vy = 0.0;
                continue;
            }
            state.vx *= self.config.velocity_decay;
            state.vy *= self.config.velocity_decay;
            state.x += state.vx;
            state.y += state.vy;
        }
    }
}
