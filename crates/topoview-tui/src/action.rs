//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use topoview_core::{Scene, SelectionTarget, TopologyData};

use crate::screen::ScreenId;

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── View parameters ───────────────────────────────────────────
    ToggleView,
    ToggleTheme,
    CycleRefresh,
    Reload,

    // ── Data events (from the refresh task) ───────────────────────
    TopologyLoaded(Arc<TopologyData>),
    LoadFailed(String),
    /// A freshly prepared scene for the current data, view, theme and size.
    SceneReady(Arc<Scene>),

    // ── Selection ─────────────────────────────────────────────────
    Selected(SelectionTarget),
    SelectionCleared,
    /// Jump to the graph and select this node.
    FocusNode(String),
}
