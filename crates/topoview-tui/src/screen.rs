//! Screen identifier enum.

use std::fmt;

/// Identifies each primary TUI screen, navigable by number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Graph, // 1
    Tree,      // 2
    Inventory, // 3
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 3] = [Self::Graph, Self::Tree, Self::Inventory];

    /// Numeric key (1-3) for this screen.
    pub fn number(self) -> u8 {
        match self {
            Self::Graph => 1,
            Self::Tree => 2,
            Self::Inventory => 3,
        }
    }

    /// Screen from a numeric key. Returns None for out-of-range.
    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        match self {
            Self::Graph => Self::Tree,
            Self::Tree => Self::Inventory,
            Self::Inventory => Self::Graph,
        }
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        match self {
            Self::Graph => Self::Inventory,
            Self::Tree => Self::Graph,
            Self::Inventory => Self::Tree,
        }
    }

    /// Short label for the tab bar.
    pub fn label(self) -> &'static str {
        match self {
            Self::Graph => "Graph",
            Self::Tree => "Tree",
            Self::Inventory => "Inventory",
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_round_trip_every_screen() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(4), None);
    }

    #[test]
    fn next_and_prev_wrap() {
        assert_eq!(ScreenId::Inventory.next(), ScreenId::Graph);
        assert_eq!(ScreenId::Graph.prev(), ScreenId::Inventory);
        for id in ScreenId::ALL {
            assert_eq!(id.next().prev(), id);
        }
    }
}
