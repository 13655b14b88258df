//! Visual attribute command handlers.

use serde::Serialize;
use tabled::Tabled;

use topoview_core::{DisplayGraph, LinkAttributes, NodeAttributes, resolve_all, visual::DashPattern};

use crate::cli::{AttrsArgs, AttrsCommand, GlobalOpts};
use crate::config::Session;
use crate::error::CliError;
use crate::output;

// ── Nodes ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct NodeEntry {
    id: String,
    #[serde(flatten)]
    attrs: NodeAttributes,
}

#[derive(Tabled)]
struct NodeRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Border")]
    border: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Shape")]
    shape: String,
}

// ── Links ───────────────────────────────────────────────────────────

#[derive(Serialize)]
struct LinkEntry {
    id: String,
    source: String,
    target: String,
    #[serde(flatten)]
    attrs: LinkAttributes,
}

#[derive(Tabled)]
struct LinkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Width")]
    width: String,
    #[tabled(rename = "Dash")]
    dash: String,
    #[tabled(rename = "Capacity")]
    label: String,
}

fn dash_text(dash: DashPattern) -> String {
    match dash {
        DashPattern::Solid => "solid".into(),
        DashPattern::Dashed { dash, gap } => format!("{dash}/{gap}"),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(session: &Session, args: &AttrsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let graph = DisplayGraph::from_topology(&session.data);
    let resolved = resolve_all(&graph, session.view, session.theme);
    let colored = output::should_color(&global.color);

    let out = match args.command {
        AttrsCommand::Nodes => {
            let entries: Vec<NodeEntry> = resolved
                .nodes
                .into_iter()
                .map(|(id, attrs)| NodeEntry { id, attrs })
                .collect();
            output::render_list(
                &global.output,
                &entries,
                |e| NodeRow {
                    id: e.id.clone(),
                    label: e.attrs.label.clone(),
                    color: output::swatch(e.attrs.color, colored),
                    border: output::swatch(e.attrs.border, colored),
                    size: format!("{}", e.attrs.size),
                    shape: e.attrs.shape.to_string(),
                },
                |e| e.id.clone(),
            )
        }
        AttrsCommand::Links => {
            let entries: Vec<LinkEntry> = graph
                .edges()
                .iter()
                .filter_map(|edge| {
                    let attrs = resolved.links.get(&edge.link.id)?.clone();
                    Some(LinkEntry {
                        id: edge.link.id.clone(),
                        source: edge.link.source.clone(),
                        target: edge.link.target.clone(),
                        attrs,
                    })
                })
                .collect();
            output::render_list(
                &global.output,
                &entries,
                |e| LinkRow {
                    id: e.id.clone(),
                    source: e.source.clone(),
                    target: e.target.clone(),
                    color: output::swatch(e.attrs.color, colored),
                    width: format!("{:.2}", e.attrs.width),
                    dash: dash_text(e.attrs.dash),
                    label: e.attrs.label.clone(),
                },
                |e| e.id.clone(),
            )
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
