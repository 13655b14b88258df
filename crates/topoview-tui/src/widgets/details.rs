//! Detail lines for the selection popup.

use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use topoview_core::{LinkStatus, NetworkLink, NetworkNode, NodeStatus, Scene, SelectionTarget, Theme};

use crate::theme;

fn row(theme: Theme, key: &str, value: impl Into<String>) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:<10}"), theme::muted(theme)),
        Span::styled(value.into(), theme::text(theme)),
    ])
}

fn status_row(theme: Theme, value: &str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<10}", "Status"), theme::muted(theme)),
        Span::styled(format!("● {value}"), Style::default().fg(color)),
    ])
}

pub fn node_status_color(status: NodeStatus) -> Color {
    match status {
        NodeStatus::Active => theme::OK_GREEN,
        NodeStatus::Warning => theme::WARN_AMBER,
        NodeStatus::Error => theme::ERROR_RED,
        NodeStatus::Inactive => Color::DarkGray,
    }
}

fn link_status_color(status: LinkStatus) -> Color {
    match status {
        LinkStatus::Active => theme::OK_GREEN,
        LinkStatus::Congested => theme::WARN_AMBER,
        LinkStatus::Down => theme::ERROR_RED,
    }
}

pub fn node_lines(node: &NetworkNode, theme: Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        row(theme, "Type", node.node_type.to_string()),
        status_row(theme, &node.status.to_string(), node_status_color(node.status)),
    ];
    if let Some(role) = node.role {
        lines.push(row(theme, "Role", role.to_string()));
    }
    lines.push(row(theme, "Layer", node.effective_layer().to_string()));
    if let Some(ip) = &node.ip {
        lines.push(row(theme, "IP", ip.clone()));
    }
    if let Some(mac) = &node.mac {
        lines.push(row(theme, "MAC", mac.clone()));
    }
    if let Some(vlan) = node.vlan {
        lines.push(row(theme, "VLAN", vlan.to_string()));
    }
    if let Some(bw) = node.display_bandwidth() {
        lines.push(row(theme, "Bandwidth", bw));
    }
    if let Some(cpu) = node.cpu {
        lines.push(row(theme, "CPU", format!("{cpu:.0}%")));
    }
    if let Some(mem) = node.memory {
        lines.push(row(theme, "Memory", format!("{mem:.0}%")));
    }
    if let Some(vni) = node.vxlan_vni {
        lines.push(row(theme, "VNI", vni.to_string()));
    }
    if let Some(vtep) = &node.vtep_ip {
        lines.push(row(theme, "VTEP", vtep.clone()));
    }
    lines
}

pub fn link_lines(link: &NetworkLink, capacity: &str, scene: &Scene) -> Vec<Line<'static>> {
    let theme = scene.theme;
    let end = |id: &str| {
        scene
            .graph
            .node(id)
            .map_or_else(|| id.to_owned(), |n| n.label.clone())
    };
    let mut lines = vec![
        row(theme, "From", end(&link.source)),
        row(theme, "To", end(&link.target)),
        row(theme, "Type", link.link_type.to_string()),
        status_row(theme, &link.status.to_string(), link_status_color(link.status)),
        row(theme, "Capacity", capacity.to_owned()),
        row(theme, "Util", format!("{:.0}%", link.utilization)),
    ];
    if let Some(latency) = link.latency {
        lines.push(row(theme, "Latency", format!("{latency:.1} ms")));
    }
    if let Some(loss) = link.packet_loss {
        lines.push(row(theme, "Loss", format!("{loss:.2}%")));
    }
    lines
}

/// Popup title and body for `target`, or `None` if it left the scene.
pub fn selection_details(
    scene: &Scene,
    target: &SelectionTarget,
) -> Option<(String, Vec<Line<'static>>)> {
    match target {
        SelectionTarget::Node(id) => {
            let node = scene.graph.node(id)?;
            let title = scene
                .attributes
                .nodes
                .get(id)
                .map_or_else(|| node.label.clone(), |a| a.label.clone());
            Some((title, node_lines(node, scene.theme)))
        }
        SelectionTarget::Link(id) => {
            let edge = scene.graph.edge(id)?;
            let capacity = scene
                .attributes
                .links
                .get(id)
                .map(|a| a.label.clone())
                .unwrap_or_default();
            Some((id.clone(), link_lines(&edge.link, &capacity, scene)))
        }
    }
}
