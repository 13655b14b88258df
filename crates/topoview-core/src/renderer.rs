//! Renderer adapter contract.
//!
//! A [`Scene`] bundles everything a backend needs to draw one frame. It is
//! rebuilt from scratch whenever the snapshot, view mode, theme or
//! viewport changes. Backends implement [`TopologyRenderer`] and report
//! clicks through the registered [`SelectCallback`].

use thiserror::Error;

use crate::error::LayoutError;
use crate::graph::DisplayGraph;
use crate::layout::{LayoutPlan, Viewport, compute_layout};
use crate::model::TopologyData;
use crate::selection::SelectionTarget;
use crate::tree::{TreeNode, build_tree};
use crate::view::{Theme, ViewMode};
use crate::visual::{ResolvedAttributes, resolve_all};

/// Invoked by a renderer when the user selects a node or link.
pub type SelectCallback = Box<dyn FnMut(&SelectionTarget) + Send>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Nothing to render: topology is empty")]
    Empty,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("Backend failure: {message}")]
    Backend { message: String },
}

/// One frame's worth of derived data.
#[derive(Debug, Clone)]
pub struct Scene {
    pub view_mode: ViewMode,
    pub theme: Theme,
    pub viewport: Viewport,
    pub graph: DisplayGraph,
    pub attributes: ResolvedAttributes,
    pub layout: LayoutPlan,
    pub tree: Option<TreeNode>,
}

impl Scene {
    pub fn prepare(data: &TopologyData, view_mode: ViewMode, theme: Theme, viewport: Viewport) -> Self {
        let graph = DisplayGraph::from_topology(data);
        let attributes = resolve_all(&graph, view_mode, theme);
        let layout = compute_layout(&graph, view_mode, viewport);
        let tree = build_tree(data, view_mode);
        Self {
            view_mode,
            theme,
            viewport,
            graph,
            attributes,
            layout,
            tree,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }
}

/// Backend binding.
pub trait TopologyRenderer {
    fn render(&mut self, scene: &Scene) -> Result<(), RenderError>;

    fn on_select(&mut self, callback: SelectCallback);

    /// Short backend identifier.
    fn format(&self) -> &'static str;
}
