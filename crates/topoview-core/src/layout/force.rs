// ── Force simulation ──
//
// Small deterministic solver for bindings without a physics engine.
// Free nodes start on a circle around the viewport center; every
// iteration applies pairwise repulsion (charge / d²), spring attraction
// toward the link distance, and a weak pull to the center. Pinned nodes
// never move.

use tracing::debug;

use super::{LayoutPlan, Viewport};
use crate::error::LayoutError;
use crate::geometry::Point;
use crate::graph::DisplayGraph;

/// Distances below this are clamped so close pairs get a bounded push.
const MIN_DISTANCE: f64 = 1.0;

/// Golden angle in radians, spreads tie-break directions around the circle.
const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Unit direction for a pair sitting on the same point. Depends only on
/// the pair's indices so runs stay deterministic.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn tie_break(i: usize, j: usize) -> (f64, f64) {
    let angle = GOLDEN_ANGLE * (i + j * (j + 1) / 2) as f64;
    (angle.cos(), angle.sin())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationOptions {
    pub iterations: usize,
    /// Velocity retained between iterations.
    pub damping: f64,
    pub center_strength: f64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            iterations: 300,
            damping: 0.85,
            center_strength: 0.01,
        }
    }
}

/// Positions indexed like [`DisplayGraph::nodes`].
#[derive(Debug, Clone)]
pub struct ForceSimulation {
    positions: Vec<Point>,
    velocities: Vec<Point>,
    pinned: Vec<bool>,
    options: SimulationOptions,
}

impl ForceSimulation {
    /// Seed positions from `plan`: pinned hints keep their coordinates,
    /// free nodes are spread evenly on a circle.
    #[allow(clippy::cast_precision_loss, clippy::as_conversions)]
    pub fn seed(graph: &DisplayGraph, plan: &LayoutPlan, viewport: Viewport) -> Self {
        let center = viewport.center();
        let radius = viewport.width.min(viewport.height) / 3.0;
        let count = graph.len().max(1) as f64;

        let mut positions = Vec::with_capacity(graph.len());
        let mut pinned = Vec::with_capacity(graph.len());
        for (i, node) in graph.nodes().iter().enumerate() {
            let fixed = plan
                .hint(&node.id)
                .filter(|h| h.pinned)
                .and_then(|h| h.position());
            if let Some(p) = fixed {
                positions.push(p);
                pinned.push(true);
            } else {
                let angle = std::f64::consts::TAU * i as f64 / count;
                positions.push(Point::new(
                    center.x + radius * angle.cos(),
                    center.y + radius * angle.sin(),
                ));
                pinned.push(false);
            }
        }

        Self {
            velocities: vec![Point::default(); positions.len()],
            positions,
            pinned,
            options: SimulationOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    /// Run the configured number of iterations.
    pub fn run(
        &mut self,
        graph: &DisplayGraph,
        plan: &LayoutPlan,
        viewport: Viewport,
    ) -> Result<(), LayoutError> {
        viewport.validate()?;
        let forces = plan.forces;
        let center = viewport.center();
        let n = self.positions.len();

        for iteration in 0..self.options.iterations {
            let mut delta = vec![Point::default(); n];

            // Repulsion between all pairs
            for i in 0..n {
                for j in (i + 1)..n {
                    let mut dx = self.positions[i].x - self.positions[j].x;
                    let mut dy = self.positions[i].y - self.positions[j].y;
                    if dx.hypot(dy) < f64::EPSILON {
                        (dx, dy) = tie_break(i, j);
                    }
                    let dist = dx.hypot(dy).max(MIN_DISTANCE);
                    // charge is negative for repulsion
                    let magnitude = -forces.charge / (dist * dist);
                    let (fx, fy) = (dx / dist * magnitude, dy / dist * magnitude);
                    delta[i].x += fx;
                    delta[i].y += fy;
                    delta[j].x -= fx;
                    delta[j].y -= fy;
                }
            }

            // Springs along edges
            for edge in graph.edges() {
                let (s, t) = (edge.source, edge.target);
                if s == t {
                    continue;
                }
                let dx = self.positions[t].x - self.positions[s].x;
                let dy = self.positions[t].y - self.positions[s].y;
                let dist = dx.hypot(dy).max(MIN_DISTANCE);
                let stretch = (dist - forces.link_distance) * forces.link_strength * 0.1;
                let (fx, fy) = (dx / dist * stretch, dy / dist * stretch);
                delta[s].x += fx;
                delta[s].y += fy;
                delta[t].x -= fx;
                delta[t].y -= fy;
            }

            for i in 0..n {
                if self.pinned[i] {
                    continue;
                }
                let p = &mut self.positions[i];
                let v = &mut self.velocities[i];
                v.x = (v.x + delta[i].x + (center.x - p.x) * self.options.center_strength)
                    * self.options.damping;
                v.y = (v.y + delta[i].y + (center.y - p.y) * self.options.center_strength)
                    * self.options.damping;
                p.x += v.x;
                p.y += v.y;

                if !p.is_finite() {
                    let node = graph.nodes().get(i).map(|n| n.id.clone()).unwrap_or_default();
                    return Err(LayoutError::Diverged { iteration, node });
                }
            }
        }

        debug!(
            nodes = n,
            iterations = self.options.iterations,
            "force simulation settled"
        );
        Ok(())
    }

    /// Seed, run, and return final positions keyed by node index.
    pub fn settle(
        graph: &DisplayGraph,
        plan: &LayoutPlan,
        viewport: Viewport,
    ) -> Result<Vec<Point>, LayoutError> {
        let mut sim = Self::seed(graph, plan, viewport);
        sim.run(graph, plan, viewport)?;
        Ok(sim.positions)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::model::{NetworkLink, NetworkNode, NodeType, TopologyData};
    use crate::view::ViewMode;

    fn triangle() -> DisplayGraph {
        DisplayGraph::from_topology(&TopologyData::new(
            vec![
                NetworkNode::new("a", "A", NodeType::Switch).with_layer(1),
                NetworkNode::new("b", "B", NodeType::Switch).with_layer(2),
                NetworkNode::new("c", "C", NodeType::Host).with_layer(2),
            ],
            vec![
                NetworkLink::new("ab", "a", "b", 1_000),
                NetworkLink::new("bc", "b", "c", 1_000),
                NetworkLink::new("ca", "c", "a", 1_000),
            ],
        ))
    }

    #[test]
    fn settles_deterministically() {
        let g = triangle();
        let vp = Viewport::default();
        let plan = compute_layout(&g, ViewMode::Logical, vp);
        let first = ForceSimulation::settle(&g, &plan, vp).unwrap();
        let second = ForceSimulation::settle(&g, &plan, vp).unwrap();
        assert_eq!(first, second);
        assert!(first.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn free_nodes_separate() {
        let g = triangle();
        let vp = Viewport::default();
        let plan = compute_layout(&g, ViewMode::Logical, vp);
        let pos = ForceSimulation::settle(&g, &plan, vp).unwrap();
        assert!(pos[0].distance_to(pos[1]) > 10.0);
        assert!(pos[1].distance_to(pos[2]) > 10.0);
    }

    #[test]
    fn pinned_nodes_stay_put() {
        let g = triangle();
        let vp = Viewport::default();
        let plan = compute_layout(&g, ViewMode::Physical, vp);
        let pos = ForceSimulation::settle(&g, &plan, vp).unwrap();
        for (node, p) in g.nodes().iter().zip(&pos) {
            assert_eq!(plan.hint(&node.id).unwrap().position(), Some(*p));
        }
    }

    #[test]
    fn coincident_nodes_are_pushed_apart() {
        let g = DisplayGraph::from_topology(&TopologyData::new(
            vec![
                NetworkNode::new("core", "Core", NodeType::Router),
                NetworkNode::new("edge", "Edge", NodeType::Switch),
                NetworkNode::new("host", "Host", NodeType::Host),
            ],
            vec![],
        ));
        let vp = Viewport::default();
        let plan = compute_layout(&g, ViewMode::Logical, vp);
        let center = vp.center();
        let mut sim = ForceSimulation::seed(&g, &plan, vp);
        sim.positions = vec![center; 3];
        sim.pinned = vec![true, false, false];
        sim.run(&g, &plan, vp).unwrap();

        let pos = sim.positions();
        assert_eq!(pos[0], center);
        assert!(pos[1].distance_to(center) > 10.0, "{pos:?}");
        assert!(pos[2].distance_to(center) > 10.0, "{pos:?}");
        assert!(pos[1].distance_to(pos[2]) > 10.0, "{pos:?}");
    }

    #[test]
    fn non_finite_forces_report_divergence() {
        let g = triangle();
        let vp = Viewport::default();
        let mut plan = compute_layout(&g, ViewMode::Logical, vp);
        plan.forces.charge = f64::NEG_INFINITY;
        let err = ForceSimulation::settle(&g, &plan, vp).unwrap_err();
        assert!(matches!(err, LayoutError::Diverged { iteration: 0, .. }));
    }

    #[test]
    fn rejects_empty_viewport() {
        let g = triangle();
        let plan = compute_layout(&g, ViewMode::Logical, Viewport::default());
        let err = ForceSimulation::settle(&g, &plan, Viewport::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidViewport { .. }));
    }
}
