//! Layout command handler.

use serde::Serialize;
use tabled::Tabled;
use tracing::warn;

use topoview_core::{
    DisplayGraph, ForceParams, ForceSimulation, LayoutPlan, ViewMode, Viewport, compute_layout,
    layout::SimulationOptions,
};

use crate::cli::{GlobalOpts, LayoutArgs};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

// ── Report ──────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct NodePosition {
    id: String,
    label: String,
    layer: u8,
    pinned: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
}

#[derive(Debug, Serialize)]
struct LayoutReport {
    mode: ViewMode,
    viewport: Viewport,
    forces: ForceParams,
    simulated: bool,
    nodes: Vec<NodePosition>,
}

#[derive(Tabled)]
struct PositionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Layer")]
    layer: u8,
    #[tabled(rename = "Pinned")]
    pinned: String,
    #[tabled(rename = "X")]
    x: String,
    #[tabled(rename = "Y")]
    y: String,
}

impl From<&NodePosition> for PositionRow {
    fn from(p: &NodePosition) -> Self {
        let coord = |v: Option<f64>| v.map_or_else(|| "─".into(), |v| format!("{v:.1}"));
        Self {
            id: p.id.clone(),
            label: p.label.clone(),
            layer: p.layer,
            pinned: if p.pinned { "yes".into() } else { "no".into() },
            x: coord(p.x),
            y: coord(p.y),
        }
    }
}

fn detail(report: &LayoutReport) -> String {
    let rows: Vec<PositionRow> = report.nodes.iter().map(PositionRow::from).collect();
    format!(
        "mode: {}  viewport: {}x{}  link distance: {}  link strength: {}  charge: {}{}\n{}",
        report.mode,
        report.viewport.width,
        report.viewport.height,
        report.forces.link_distance,
        report.forces.link_strength,
        report.forces.charge,
        if report.simulated { "  (simulated)" } else { "" },
        output::render_table(&rows)
    )
}

fn positions(graph: &DisplayGraph, plan: &LayoutPlan) -> Vec<NodePosition> {
    graph
        .nodes()
        .iter()
        .map(|n| {
            let hint = plan.hint(&n.id).copied().unwrap_or(topoview_core::LayoutHint::FREE);
            NodePosition {
                id: n.id.clone(),
                label: n.label.clone(),
                layer: n.effective_layer(),
                pinned: hint.pinned,
                x: hint.x,
                y: hint.y,
            }
        })
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(session: &Session, args: &LayoutArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let viewport = Viewport::new(args.width, args.height);
    viewport.validate().map_err(|e| CliError::Validation {
        field: "viewport".into(),
        reason: e.to_string(),
    })?;

    let graph = DisplayGraph::from_topology(&session.data);
    let plan = compute_layout(&graph, session.view, viewport);
    let mut nodes = positions(&graph, &plan);

    if args.simulate {
        let mut sim = ForceSimulation::seed(&graph, &plan, viewport).with_options(
            SimulationOptions {
                iterations: args.iterations,
                ..SimulationOptions::default()
            },
        );
        match sim.run(&graph, &plan, viewport) {
            Ok(()) => {
                for (node, p) in nodes.iter_mut().zip(sim.positions()) {
                    node.x = Some(p.x);
                    node.y = Some(p.y);
                }
            }
            // Keep the plan's hints; a diverged run has nothing better.
            Err(e) => warn!(error = %e, "force simulation failed"),
        }
    }

    let report = LayoutReport {
        mode: plan.mode,
        viewport,
        forces: plan.forces,
        simulated: args.simulate,
        nodes,
    };
    let out = output::render_single(&global.output, &report, detail, |r| {
        r.nodes
            .iter()
            .map(|n| match (n.x, n.y) {
                (Some(x), Some(y)) => format!("{} {x:.1} {y:.1}", n.id),
                _ => n.id.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
