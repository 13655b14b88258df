//! Screen implementations. Each screen is a top-level Component.

pub mod graph;
pub mod inventory;
pub mod tree;

use topoview_core::PopupGeometry;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens(popup: PopupGeometry) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Graph, Box::new(graph::GraphScreen::new(popup))),
        (ScreenId::Tree, Box::new(tree::TreeScreen::new())),
        (
            ScreenId::Inventory,
            Box::new(inventory::InventoryScreen::new()),
        ),
    ]
}
