//! Renderer-agnostic topology model and the computations every network
//! topology view shares.
//!
//! This crate owns the domain model and the pure functions the CLI and
//! TUI bindings draw from:
//!
//! - **Model** ([`model`]): `NetworkNode`, `NetworkLink` and the
//!   `TopologyData` snapshot, with an [`integrity_report`](TopologyData::integrity_report).
//! - **[`DisplayGraph`]**: a snapshot with links resolved to node indices.
//! - **Visual attributes** ([`visual`]): color, size, shape, dash and label
//!   from `(element, ViewMode, Theme)`.
//! - **Trees** ([`tree`]): physical-layer and logical/VLAN hierarchies.
//! - **Layout** ([`layout`]): immutable per-node hints per view mode, plus a
//!   deterministic [`ForceSimulation`].
//! - **Popups** ([`popup`]) and the [`SelectionState`] that drives them.
//! - **[`TopologyRenderer`]**: the adapter contract backends implement.
//!
//! Every computation is synchronous and rebuilt from scratch on each call.
//! Bad data (duplicate ids, dangling links) is dropped and logged, never
//! returned as an error.

pub mod demo;
pub mod device;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod model;
pub mod popup;
pub mod refresh;
pub mod renderer;
pub mod selection;
pub mod source;
pub mod tree;
pub mod view;
pub mod visual;

// ── Primary re-exports ──────────────────────────────────────────────
pub use demo::demo_topology;
pub use device::{
    ConnectionParams, ConnectionTestResult, DeviceApi, DeviceError, InventoryDeviceApi, NewDevice,
    Protocol,
};
pub use error::{CoreError, LayoutError};
pub use geometry::{Point, Rect};
pub use graph::{DisplayEdge, DisplayGraph};
pub use layout::{
    ForceParams, ForceSimulation, LayoutHint, LayoutPlan, LayoutSession, Viewport, compute_layout,
};
pub use popup::{PopupDirection, PopupGeometry, PopupPlacement, compute_popup_position};
pub use refresh::RefreshInterval;
pub use renderer::{RenderError, Scene, SelectCallback, TopologyRenderer};
pub use selection::{InteractionEvent, Selection, SelectionState, SelectionTarget};
pub use source::{SourceFormat, load_topology, parse_topology, save_topology};
pub use tree::{TreeNode, build_logical_tree, build_physical_tree, build_tree};
pub use view::{Theme, ViewMode};
pub use visual::{
    Color, DashPattern, LinkAttributes, NodeAttributes, NodeShape, ResolvedAttributes,
    ThemePalette, bandwidth_label, resolve_all,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    IntegrityIssue, LinkEndpoint, LinkStatus, LinkType, NetworkLink, NetworkNode, NodeRole,
    NodeStatus, NodeType, TopologyData,
};
