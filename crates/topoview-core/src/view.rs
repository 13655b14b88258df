// ── View parameters ──
//
// Cross-cutting inputs threaded explicitly through resolvers, builders and
// layout. Neither is ever stored on an entity or read from ambient state.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How the same snapshot is interpreted.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    /// Wiring and layer hierarchy.
    #[default]
    Physical,
    /// VLAN / overlay segmentation, independent of wiring.
    Logical,
}

impl ViewMode {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Physical => Self::Logical,
            Self::Logical => Self::Physical,
        }
    }
}

/// Light or dark rendering variant.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn toggles_are_involutions() {
        assert_eq!(ViewMode::Physical.toggle(), ViewMode::Logical);
        assert_eq!(ViewMode::Logical.toggle().toggle(), ViewMode::Logical);
        assert_eq!(Theme::Dark.toggle(), Theme::Light);
    }

    #[test]
    fn parse_from_config_strings() {
        assert_eq!("logical".parse::<ViewMode>().unwrap(), ViewMode::Logical);
        assert_eq!("LIGHT".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sideways".parse::<ViewMode>().is_err());
    }
}
