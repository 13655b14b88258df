// ── Selection state machine ──
//
// At most one node or link is selected. Selecting replaces; any viewport
// motion or a click on empty canvas clears. A data refresh clears only
// when the selected element disappeared from the new snapshot.

use serde::Serialize;
use tracing::trace;

use crate::geometry::{Point, Rect};
use crate::model::TopologyData;
use crate::popup::{PopupGeometry, PopupPlacement, compute_popup_position};

/// What is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum SelectionTarget {
    Node(String),
    Link(String),
}

impl SelectionTarget {
    pub fn id(&self) -> &str {
        match self {
            Self::Node(id) | Self::Link(id) => id,
        }
    }

    fn exists_in(&self, data: &TopologyData) -> bool {
        match self {
            Self::Node(id) => data.node(id).is_some(),
            Self::Link(id) => data.link(id).is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub target: SelectionTarget,
    pub placement: PopupPlacement,
}

/// User or data events that affect the selection.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    SelectNode {
        id: String,
        anchor: Point,
        container: Rect,
    },
    SelectLink {
        id: String,
        anchor: Point,
        container: Rect,
    },
    Pan,
    Zoom,
    BackgroundClick,
    Deselect,
    DataRefreshed(TopologyData),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    current: Option<Selection>,
    geometry: PopupGeometry,
}

impl SelectionState {
    pub fn new(geometry: PopupGeometry) -> Self {
        Self {
            current: None,
            geometry,
        }
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    pub fn geometry(&self) -> &PopupGeometry {
        &self.geometry
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|s| s.target.id() == id)
    }

    /// Apply one event. Returns whether the selection changed.
    pub fn apply(&mut self, event: &InteractionEvent) -> bool {
        let before = self.current.clone();
        match event {
            InteractionEvent::SelectNode {
                id,
                anchor,
                container,
            } => self.select(SelectionTarget::Node(id.clone()), *anchor, *container),
            InteractionEvent::SelectLink {
                id,
                anchor,
                container,
            } => self.select(SelectionTarget::Link(id.clone()), *anchor, *container),
            InteractionEvent::Pan
            | InteractionEvent::Zoom
            | InteractionEvent::BackgroundClick
            | InteractionEvent::Deselect => self.current = None,
            InteractionEvent::DataRefreshed(data) => {
                if self
                    .current
                    .as_ref()
                    .is_some_and(|s| !s.target.exists_in(data))
                {
                    self.current = None;
                }
            }
        }
        let changed = before != self.current;
        if changed {
            trace!(selected = ?self.current.as_ref().map(|s| s.target.id()), "selection changed");
        }
        changed
    }

    fn select(&mut self, target: SelectionTarget, anchor: Point, container: Rect) {
        let placement = compute_popup_position(anchor, container, &self.geometry);
        self.current = Some(Selection { target, placement });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{NetworkLink, NetworkNode, NodeType};
    use crate::popup::PopupDirection;

    const CONTAINER: Rect = Rect::sized(800.0, 600.0);

    fn select_node(id: &str, y: f64) -> InteractionEvent {
        InteractionEvent::SelectNode {
            id: id.into(),
            anchor: Point::new(400.0, y),
            container: CONTAINER,
        }
    }

    #[test]
    fn new_selection_replaces_old() {
        let mut state = SelectionState::default();
        assert!(state.apply(&select_node("a", 500.0)));
        assert!(state.apply(&InteractionEvent::SelectLink {
            id: "l1".into(),
            anchor: Point::new(400.0, 50.0),
            container: CONTAINER,
        }));
        let sel = state.current().unwrap();
        assert_eq!(sel.target, SelectionTarget::Link("l1".into()));
        assert_eq!(sel.placement.direction, PopupDirection::Down);
        assert!(!state.is_selected("a"));
    }

    #[test]
    fn viewport_motion_and_background_clear() {
        for event in [
            InteractionEvent::Pan,
            InteractionEvent::Zoom,
            InteractionEvent::BackgroundClick,
            InteractionEvent::Deselect,
        ] {
            let mut state = SelectionState::default();
            state.apply(&select_node("a", 500.0));
            assert!(state.apply(&event));
            assert!(state.current().is_none());
            // Clearing an empty selection is not a change.
            assert!(!state.apply(&event));
        }
    }

    #[test]
    fn refresh_keeps_surviving_selection() {
        let mut state = SelectionState::default();
        state.apply(&select_node("a", 500.0));
        let data = TopologyData::new(
            vec![
                NetworkNode::new("a", "A", NodeType::Host),
                NetworkNode::new("b", "B", NodeType::Host),
            ],
            vec![NetworkLink::new("ab", "a", "b", 100)],
        );
        assert!(!state.apply(&InteractionEvent::DataRefreshed(data)));
        assert!(state.is_selected("a"));

        let data = TopologyData::new(vec![NetworkNode::new("b", "B", NodeType::Host)], vec![]);
        assert!(state.apply(&InteractionEvent::DataRefreshed(data)));
        assert!(state.current().is_none());
    }

    #[test]
    fn placement_uses_configured_geometry() {
        let mut state = SelectionState::new(PopupGeometry {
            width: 200.0,
            ..PopupGeometry::default()
        });
        state.apply(&InteractionEvent::SelectNode {
            id: "a".into(),
            anchor: Point::new(0.0, 500.0),
            container: CONTAINER,
        });
        assert_eq!(state.current().unwrap().placement.x, 120.0);
    }
}
