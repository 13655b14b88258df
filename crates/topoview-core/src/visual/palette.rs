// ── Color tables ──
//
// Renderer-agnostic RGB values. Bindings convert to whatever their backend
// wants (CSS hex, ratatui `Color::Rgb`, …). Light variants are the 500
// shades of each hue, dark variants the brighter 400 shades.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::model::{LinkStatus, NodeStatus, NodeType};
use crate::view::Theme;

/// 24-bit RGB color. Serializes as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a string is not a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color '{0}', expected #rrggbb")]
pub struct ParseColorError(String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 {
            return Err(ParseColorError(s.to_owned()));
        }
        u32::from_str_radix(hex, 16)
            .map(Self::from_hex)
            .map_err(|_| ParseColorError(s.to_owned()))
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Semantic colors ─────────────────────────────────────────────────

pub const GREEN: Color = Color::from_hex(0x10b981);
pub const AMBER: Color = Color::from_hex(0xf59e0b);
pub const RED: Color = Color::from_hex(0xef4444);
pub const ORANGE: Color = Color::from_hex(0xf97316);
pub const GRAY: Color = Color::from_hex(0x6b7280);
pub const NEUTRAL_GRAY: Color = Color::from_hex(0x9ca3af);

/// Light/dark pair for one hue.
#[derive(Debug, Clone, Copy)]
struct Shades {
    light: Color,
    dark: Color,
}

impl Shades {
    const fn new(light: u32, dark: u32) -> Self {
        Self {
            light: Color::from_hex(light),
            dark: Color::from_hex(dark),
        }
    }

    fn pick(self, theme: Theme) -> Color {
        match theme {
            Theme::Light => self.light,
            Theme::Dark => self.dark,
        }
    }
}

/// Base color for a node type.
pub fn type_color(node_type: NodeType, theme: Theme) -> Color {
    let shades = match node_type {
        NodeType::Controller => Shades::new(0xf59e0b, 0xfbbf24), // amber
        NodeType::Switch => Shades::new(0x3b82f6, 0x60a5fa),     // blue
        NodeType::Router => Shades::new(0x8b5cf6, 0xa78bfa),     // purple
        NodeType::Host => Shades::new(0x10b981, 0x34d399),       // green
        NodeType::Group => Shades::new(0x6366f1, 0x818cf8),      // indigo
        NodeType::Firewall => Shades::new(0xf97316, 0xfb923c),   // orange
        NodeType::Vtep => Shades::new(0x06b6d4, 0x22d3ee),       // cyan
    };
    shades.pick(theme)
}

/// Semantic status color. Identical in both themes.
pub fn node_status_color(status: NodeStatus) -> Color {
    match status {
        NodeStatus::Active => GREEN,
        NodeStatus::Warning => AMBER,
        NodeStatus::Error => RED,
        NodeStatus::Inactive => GRAY,
    }
}

pub fn link_status_color(status: LinkStatus) -> Color {
    match status {
        LinkStatus::Active => GREEN,
        LinkStatus::Congested => ORANGE,
        LinkStatus::Down => RED,
    }
}

/// VLAN color. The hundreds digit selects the family (1 red, 2 orange,
/// 3 green, 4 purple); the family's base VLAN (`n00`) gets the base shade,
/// every other VLAN in the family the lighter companion. Anything outside
/// the four families is neutral gray.
pub fn vlan_color(vlan: u16) -> Color {
    let family = match vlan / 100 {
        1 => Shades::new(0xef4444, 0xf87171),
        2 => Shades::new(0xf97316, 0xfb923c),
        3 => Shades::new(0x10b981, 0x34d399),
        4 => Shades::new(0x8b5cf6, 0xa78bfa),
        _ => return NEUTRAL_GRAY,
    };
    if vlan % 100 == 0 {
        family.light
    } else {
        family.dark
    }
}

// ── Chrome ──────────────────────────────────────────────────────────

/// Background and text colors a renderer needs around the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemePalette {
    pub background: Color,
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub edge: Color,
    pub highlight: Color,
}

impl ThemePalette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                background: Color::from_hex(0xffffff),
                surface: Color::from_hex(0xf3f4f6),
                foreground: Color::from_hex(0x111827),
                muted: Color::from_hex(0x6b7280),
                edge: Color::from_hex(0x9ca3af),
                highlight: Color::from_hex(0x2563eb),
            },
            Theme::Dark => Self {
                background: Color::from_hex(0x111827),
                surface: Color::from_hex(0x1f2937),
                foreground: Color::from_hex(0xf9fafb),
                muted: Color::from_hex(0x9ca3af),
                edge: Color::from_hex(0x4b5563),
                highlight: Color::from_hex(0x60a5fa),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c: Color = "#3b82f6".parse().unwrap();
        assert_eq!(c, Color::rgb(0x3b, 0x82, 0xf6));
        assert_eq!(c.to_string(), "#3b82f6");
        assert!("#12345".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn vlan_families_share_hue() {
        assert_eq!(vlan_color(100), Color::from_hex(0xef4444));
        assert_eq!(vlan_color(101), Color::from_hex(0xf87171));
        assert_eq!(vlan_color(200), Color::from_hex(0xf97316));
        assert_eq!(vlan_color(301), Color::from_hex(0x34d399));
        assert_eq!(vlan_color(400), Color::from_hex(0x8b5cf6));
    }

    #[test]
    fn unmapped_vlans_are_neutral() {
        assert_eq!(vlan_color(1), NEUTRAL_GRAY);
        assert_eq!(vlan_color(500), NEUTRAL_GRAY);
        assert_eq!(vlan_color(4094), NEUTRAL_GRAY);
    }

    #[test]
    fn themes_pick_distinct_shades() {
        assert_ne!(
            type_color(NodeType::Switch, Theme::Light),
            type_color(NodeType::Switch, Theme::Dark)
        );
        assert_ne!(
            ThemePalette::for_theme(Theme::Light).background,
            ThemePalette::for_theme(Theme::Dark).background
        );
    }
}
