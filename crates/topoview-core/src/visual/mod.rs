//! Visual attribute resolution.
//!
//! Pure functions from `(node | link, view mode, theme)` to the colors,
//! sizes, shapes, dash patterns and labels every renderer draws with.
//! No function here holds state, so results are safe to memoize.

pub mod palette;

use indexmap::IndexMap;
use serde::Serialize;
use strum::Display;

use crate::graph::DisplayGraph;
use crate::model::{LinkStatus, LinkType, NetworkLink, NetworkNode, NodeRole, NodeType};
use crate::view::{Theme, ViewMode};

pub use palette::{Color, ThemePalette};

// ── Sizes ───────────────────────────────────────────────────────────

pub const SPINE_SIZE: f64 = 40.0;
pub const LEAF_SIZE: f64 = 32.0;
pub const CONTROLLER_SIZE: f64 = 30.0;
pub const DEFAULT_SIZE: f64 = 24.0;
pub const GROUP_SIZE: f64 = 18.0;

pub const MIN_LINK_WIDTH: f64 = 1.0;
pub const MAX_LINK_WIDTH: f64 = 6.0;

/// Outline drawn for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NodeShape {
    RoundRect,
    Hexagon,
    Circle,
    Square,
    Star,
    Diamond,
    Ellipse,
    Triangle,
}

/// Stroke pattern for a link. Lengths are in renderer units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "style", rename_all = "lowercase")]
pub enum DashPattern {
    Solid,
    Dashed { dash: f64, gap: f64 },
}

impl DashPattern {
    pub fn is_solid(&self) -> bool {
        matches!(self, Self::Solid)
    }
}

// ── Node resolvers ──────────────────────────────────────────────────

/// Fill color. Logical view colors VLAN members by VLAN; everything else
/// is colored by type.
pub fn resolve_node_color(node: &NetworkNode, view_mode: ViewMode, theme: Theme) -> Color {
    match (view_mode, node.vlan) {
        (ViewMode::Logical, Some(vlan)) => palette::vlan_color(vlan),
        _ => palette::type_color(node.node_type, theme),
    }
}

/// Border color from status alone; theme never shifts semantic colors.
pub fn resolve_node_border_color(node: &NetworkNode) -> Color {
    palette::node_status_color(node.status)
}

/// Rendered size. Role wins over type: spine > leaf > controller >
/// default > group.
pub fn resolve_node_size(node: &NetworkNode) -> f64 {
    match (node.role, node.node_type) {
        (Some(NodeRole::Spine), _) => SPINE_SIZE,
        (Some(NodeRole::Leaf), _) => LEAF_SIZE,
        (_, NodeType::Controller) => CONTROLLER_SIZE,
        (_, NodeType::Group) => GROUP_SIZE,
        _ => DEFAULT_SIZE,
    }
}

pub fn resolve_node_shape(node: &NetworkNode) -> NodeShape {
    match node.node_type {
        NodeType::Switch => match node.role {
            Some(NodeRole::Spine | NodeRole::Core) => NodeShape::Hexagon,
            _ => NodeShape::RoundRect,
        },
        NodeType::Router => NodeShape::Circle,
        NodeType::Host => NodeShape::Square,
        NodeType::Controller => NodeShape::Star,
        NodeType::Firewall => NodeShape::Diamond,
        NodeType::Group => NodeShape::Ellipse,
        NodeType::Vtep => NodeShape::Triangle,
    }
}

pub fn resolve_node_label(node: &NetworkNode, view_mode: ViewMode) -> String {
    match (view_mode, node.vlan) {
        (ViewMode::Logical, Some(vlan)) => format!("{} · VLAN {vlan}", node.label),
        _ => node.label.clone(),
    }
}

// ── Link resolvers ──────────────────────────────────────────────────

/// Stroke color. In logical view the source endpoint's VLAN overrides the
/// status color.
pub fn resolve_link_color(
    link: &NetworkLink,
    view_mode: ViewMode,
    source_vlan: Option<u16>,
) -> Color {
    match (view_mode, source_vlan) {
        (ViewMode::Logical, Some(vlan)) => palette::vlan_color(vlan),
        _ => palette::link_status_color(link.status),
    }
}

/// Stroke width on a log scale of capacity: 1G and below draw at the
/// minimum, each doubling adds one unit, capped at [`MAX_LINK_WIDTH`].
/// Down links always draw at the minimum.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
pub fn resolve_link_width(link: &NetworkLink) -> f64 {
    if link.status == LinkStatus::Down {
        return MIN_LINK_WIDTH;
    }
    let gbps = (link.bandwidth as f64 / 1000.0).max(1.0);
    (MIN_LINK_WIDTH + gbps.log2()).clamp(MIN_LINK_WIDTH, MAX_LINK_WIDTH)
}

pub fn resolve_link_dash(link: &NetworkLink) -> DashPattern {
    if link.status == LinkStatus::Down {
        return DashPattern::Dashed {
            dash: 4.0,
            gap: 4.0,
        };
    }
    match link.link_type {
        LinkType::Vxlan => DashPattern::Dashed {
            dash: 6.0,
            gap: 3.0,
        },
        LinkType::Wireless => DashPattern::Dashed {
            dash: 2.0,
            gap: 3.0,
        },
        LinkType::Ethernet | LinkType::Optical => DashPattern::Solid,
    }
}

/// Capacity label ladder: 40G, 10G, 1G, 100M, otherwise the raw Mbps.
pub fn bandwidth_label(bandwidth_mbps: u64) -> String {
    match bandwidth_mbps {
        n if n >= 40_000 => "40G".into(),
        n if n >= 10_000 => "10G".into(),
        n if n >= 1_000 => "1G".into(),
        n if n >= 100 => "100M".into(),
        n => format!("{n}M"),
    }
}

// ── Aggregates ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeAttributes {
    pub color: Color,
    pub border: Color,
    pub size: f64,
    pub shape: NodeShape,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkAttributes {
    pub color: Color,
    pub width: f64,
    pub dash: DashPattern,
    pub label: String,
}

pub fn resolve_node(node: &NetworkNode, view_mode: ViewMode, theme: Theme) -> NodeAttributes {
    NodeAttributes {
        color: resolve_node_color(node, view_mode, theme),
        border: resolve_node_border_color(node),
        size: resolve_node_size(node),
        shape: resolve_node_shape(node),
        label: resolve_node_label(node, view_mode),
    }
}

pub fn resolve_link(
    link: &NetworkLink,
    view_mode: ViewMode,
    source_vlan: Option<u16>,
) -> LinkAttributes {
    LinkAttributes {
        color: resolve_link_color(link, view_mode, source_vlan),
        width: resolve_link_width(link),
        dash: resolve_link_dash(link),
        label: bandwidth_label(link.bandwidth),
    }
}

/// Resolved attributes for a whole graph, keyed by id in graph order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolvedAttributes {
    pub nodes: IndexMap<String, NodeAttributes>,
    pub links: IndexMap<String, LinkAttributes>,
    pub palette: Option<ThemePalette>,
}

pub fn resolve_all(graph: &DisplayGraph, view_mode: ViewMode, theme: Theme) -> ResolvedAttributes {
    let nodes = graph
        .nodes()
        .iter()
        .map(|n| (n.id.clone(), resolve_node(n, view_mode, theme)))
        .collect();
    let links = graph
        .edges()
        .iter()
        .map(|e| {
            (
                e.link.id.clone(),
                resolve_link(&e.link, view_mode, graph.source_vlan(e)),
            )
        })
        .collect();

    ResolvedAttributes {
        nodes,
        links,
        palette: Some(ThemePalette::for_theme(theme)),
    }
}
