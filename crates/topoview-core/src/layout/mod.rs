//! Layout engine adapter.
//!
//! Translates a view mode into parameters for whatever physics engine a
//! binding uses. Physical mode pins every node on a layered grid; logical
//! mode pins nothing and hands the engine a looser set of forces.
//!
//! Hints are immutable values produced per render pass. User drags live in
//! a [`LayoutSession`], which overlays its manual pins onto a fresh plan
//! instead of mutating nodes in place.

pub mod force;

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::LayoutError;
use crate::geometry::Point;
use crate::graph::DisplayGraph;
use crate::view::ViewMode;

pub use force::{ForceSimulation, SimulationOptions};

/// Rows the physical grid divides the viewport height into.
const LAYER_ROWS: f64 = 5.0;

/// Drawable area the layout targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
        {
            Ok(())
        } else {
            Err(LayoutError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Per-node positioning hint. `pinned` hints always carry coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutHint {
    pub pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl LayoutHint {
    pub const FREE: Self = Self {
        pinned: false,
        x: None,
        y: None,
    };

    pub const fn pinned_at(p: Point) -> Self {
        Self {
            pinned: true,
            x: Some(p.x),
            y: Some(p.y),
        }
    }

    pub fn position(&self) -> Option<Point> {
        Some(Point::new(self.x?, self.y?))
    }
}

/// Forces handed to the physics engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceParams {
    pub link_distance: f64,
    pub link_strength: f64,
    pub charge: f64,
}

impl ForceParams {
    pub const fn for_mode(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Physical => Self {
                link_distance: 80.0,
                link_strength: 1.0,
                charge: -300.0,
            },
            ViewMode::Logical => Self {
                link_distance: 160.0,
                link_strength: 0.3,
                charge: -400.0,
            },
        }
    }
}

/// Output of [`compute_layout`]: one hint per node, keyed by id in graph
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub mode: ViewMode,
    pub hints: IndexMap<String, LayoutHint>,
    pub forces: ForceParams,
}

impl LayoutPlan {
    pub fn hint(&self, id: &str) -> Option<&LayoutHint> {
        self.hints.get(id)
    }

    pub fn pinned_count(&self) -> usize {
        self.hints.values().filter(|h| h.pinned).count()
    }
}

/// Compute positioning hints for every node in `graph`.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn compute_layout(graph: &DisplayGraph, mode: ViewMode, viewport: Viewport) -> LayoutPlan {
    let forces = ForceParams::for_mode(mode);
    let hints = match mode {
        ViewMode::Logical => graph
            .nodes()
            .iter()
            .map(|n| (n.id.clone(), LayoutHint::FREE))
            .collect(),
        ViewMode::Physical => {
            let mut rows: HashMap<u8, usize> = HashMap::new();
            for node in graph.nodes() {
                *rows.entry(node.effective_layer()).or_default() += 1;
            }

            // Layers from LAYER_ROWS down keep the row spacing and land on
            // or past the bottom edge.
            let below: usize = rows
                .iter()
                .filter(|(layer, _)| f64::from(**layer) >= LAYER_ROWS)
                .map(|(_, count)| count)
                .sum();
            if below > 0 {
                debug!(below, "physical layout placed nodes below the viewport");
            }

            let row_height = viewport.height / LAYER_ROWS;
            let mut placed: HashMap<u8, usize> = HashMap::new();
            graph
                .nodes()
                .iter()
                .map(|node| {
                    let layer = node.effective_layer();
                    let n = rows.get(&layer).copied().unwrap_or(1);
                    let i = placed.entry(layer).or_default();
                    let x = viewport.width / (n + 1) as f64 * (*i + 1) as f64;
                    let y = f64::from(layer) * row_height;
                    *i += 1;
                    (node.id.clone(), LayoutHint::pinned_at(Point::new(x, y)))
                })
                .collect()
        }
    };

    trace!(%mode, nodes = graph.len(), "layout plan computed");
    LayoutPlan {
        mode,
        hints,
        forces,
    }
}

/// Interaction state that outlives a single render pass.
///
/// Only physical mode keeps manual pins; releasing a drag in logical mode
/// returns the node to the simulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutSession {
    mode: ViewMode,
    manual_pins: IndexMap<String, Point>,
}

impl LayoutSession {
    pub fn new(mode: ViewMode) -> Self {
        Self {
            mode,
            manual_pins: IndexMap::new(),
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Switch view modes. Pins from the previous mode never carry over.
    pub fn set_mode(&mut self, mode: ViewMode) {
        if mode != self.mode {
            self.manual_pins.clear();
        }
        self.mode = mode;
    }

    /// Finish a drag of `id` at `point`.
    pub fn drag_release(&mut self, id: &str, point: Point) {
        match self.mode {
            ViewMode::Physical => {
                self.manual_pins.insert(id.to_owned(), point);
            }
            ViewMode::Logical => {
                self.manual_pins.shift_remove(id);
            }
        }
    }

    pub fn manual_pin(&self, id: &str) -> Option<Point> {
        self.manual_pins.get(id).copied()
    }

    pub fn clear_pins(&mut self) {
        self.manual_pins.clear();
    }

    /// Fresh plan for the current mode with manual pins layered on top.
    /// Pins for nodes no longer in the graph are ignored.
    pub fn plan(&self, graph: &DisplayGraph, viewport: Viewport) -> LayoutPlan {
        let mut plan = compute_layout(graph, self.mode, viewport);
        for (id, point) in &self.manual_pins {
            if let Some(hint) = plan.hints.get_mut(id) {
                *hint = LayoutHint::pinned_at(*point);
            }
        }
        plan
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{NetworkLink, NetworkNode, NodeType, TopologyData};

    fn graph() -> DisplayGraph {
        DisplayGraph::from_topology(&TopologyData::new(
            vec![
                NetworkNode::new("s1", "S1", NodeType::Switch).with_layer(1),
                NetworkNode::new("l1", "L1", NodeType::Switch).with_layer(2),
                NetworkNode::new("l2", "L2", NodeType::Switch).with_layer(2),
                NetworkNode::new("l3", "L3", NodeType::Switch).with_layer(2),
                NetworkNode::new("x", "X", NodeType::Host),
            ],
            vec![NetworkLink::new("s1-l1", "s1", "l1", 10_000)],
        ))
    }

    #[test]
    fn physical_pins_on_layered_grid() {
        let plan = compute_layout(&graph(), ViewMode::Physical, Viewport::new(800.0, 500.0));
        assert_eq!(plan.pinned_count(), 5);

        // Layer 1 row holds s1 and the layerless x.
        assert_eq!(plan.hint("s1").unwrap().position(), Some(Point::new(800.0 / 3.0, 100.0)));
        assert_eq!(
            plan.hint("x").unwrap().position(),
            Some(Point::new(800.0 / 3.0 * 2.0, 100.0))
        );
        assert_eq!(plan.hint("l1").unwrap().position(), Some(Point::new(200.0, 200.0)));
        assert_eq!(plan.hint("l3").unwrap().position(), Some(Point::new(600.0, 200.0)));
    }

    #[test]
    fn deep_layers_extend_past_the_viewport() {
        let g = DisplayGraph::from_topology(&TopologyData::new(
            vec![
                NetworkNode::new("core", "Core", NodeType::Router).with_layer(4),
                NetworkNode::new("edge", "Edge", NodeType::Switch).with_layer(5),
                NetworkNode::new("deep", "Deep", NodeType::Host).with_layer(7),
            ],
            vec![],
        ));
        let plan = compute_layout(&g, ViewMode::Physical, Viewport::new(800.0, 500.0));
        assert_eq!(plan.pinned_count(), 3);
        assert_eq!(plan.hint("core").unwrap().position(), Some(Point::new(400.0, 400.0)));
        assert_eq!(plan.hint("edge").unwrap().position(), Some(Point::new(400.0, 500.0)));
        assert_eq!(plan.hint("deep").unwrap().position(), Some(Point::new(400.0, 700.0)));
    }

    #[test]
    fn logical_plans_never_pin() {
        let plan = compute_layout(&graph(), ViewMode::Logical, Viewport::default());
        assert_eq!(plan.pinned_count(), 0);
        assert!(plan.hints.values().all(|h| h.position().is_none()));
        assert_eq!(plan.hints.len(), 5);
    }

    #[test]
    fn logical_forces_are_looser() {
        let physical = ForceParams::for_mode(ViewMode::Physical);
        let logical = ForceParams::for_mode(ViewMode::Logical);
        assert!(logical.link_distance > physical.link_distance);
        assert!(logical.link_strength < physical.link_strength);
    }

    #[test]
    fn drag_release_pins_only_in_physical_mode() {
        let g = graph();
        let mut session = LayoutSession::new(ViewMode::Physical);
        session.drag_release("l2", Point::new(10.0, 20.0));
        let plan = session.plan(&g, Viewport::default());
        assert_eq!(plan.hint("l2").unwrap().position(), Some(Point::new(10.0, 20.0)));

        session.set_mode(ViewMode::Logical);
        assert!(session.manual_pin("l2").is_none());
        session.drag_release("l2", Point::new(5.0, 5.0));
        assert!(session.manual_pin("l2").is_none());
        assert_eq!(session.plan(&g, Viewport::default()).pinned_count(), 0);
    }

    #[test]
    fn switching_modes_clears_pins() {
        let mut session = LayoutSession::new(ViewMode::Physical);
        session.drag_release("s1", Point::new(1.0, 1.0));
        session.set_mode(ViewMode::Physical);
        assert!(session.manual_pin("s1").is_some());
        session.set_mode(ViewMode::Logical);
        session.set_mode(ViewMode::Physical);
        assert!(session.manual_pin("s1").is_none());
    }

    #[test]
    fn stale_pins_are_ignored() {
        let mut session = LayoutSession::new(ViewMode::Physical);
        session.drag_release("gone", Point::new(1.0, 1.0));
        let plan = session.plan(&graph(), Viewport::default());
        assert!(plan.hint("gone").is_none());
    }

    #[test]
    fn viewport_validation() {
        assert!(Viewport::new(800.0, 600.0).validate().is_ok());
        assert!(Viewport::new(0.0, 600.0).validate().is_err());
        assert!(Viewport::new(f64::NAN, 600.0).validate().is_err());
    }
}
