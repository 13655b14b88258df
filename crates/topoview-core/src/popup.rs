//! Popup placement.
//!
//! Given a click point and the container the graph is drawn in, decide
//! where a fixed-size detail popup goes so it stays on screen. The popup
//! is centered horizontally on the anchor and opens upward unless that
//! would cross the reserved band at the top of the container, in which
//! case it flips below the anchor.

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::geometry::{Point, Rect};

/// Popup box dimensions and spacing, in renderer units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopupGeometry {
    pub width: f64,
    pub height: f64,
    /// Minimum gap between the popup and the container's left/right edges.
    pub padding: f64,
    /// Gap between the anchor and the popup's bottom edge when opening up.
    pub margin: f64,
    /// Gap between the anchor and the popup's top edge when opening down.
    pub below_offset: f64,
    /// Band at the top of the container the popup must not cover.
    pub reserved_top: f64,
}

impl Default for PopupGeometry {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 300.0,
            padding: 20.0,
            margin: 40.0,
            below_offset: 50.0,
            reserved_top: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PopupDirection {
    Up,
    Down,
}

/// Transform anchor of the popup, relative to the container.
///
/// `x` is the horizontal center. `y` is the bottom edge when the popup
/// opens up and the top edge when it opens down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopupPlacement {
    pub x: f64,
    pub y: f64,
    pub direction: PopupDirection,
}

impl PopupPlacement {
    /// Top-left corner of the popup box.
    pub fn top_left(&self, geometry: &PopupGeometry) -> Point {
        let x = self.x - geometry.width / 2.0;
        let y = match self.direction {
            PopupDirection::Up => self.y - geometry.height,
            PopupDirection::Down => self.y,
        };
        Point::new(x, y)
    }

    /// The popup box as a container-local rectangle.
    pub fn bounds(&self, geometry: &PopupGeometry) -> Rect {
        let origin = self.top_left(geometry);
        Rect::new(origin.x, origin.y, geometry.width, geometry.height)
    }
}

/// Place a popup for a click at `anchor` (screen coordinates) inside
/// `container` (screen rectangle). The result is container-local.
pub fn compute_popup_position(
    anchor: Point,
    container: Rect,
    geometry: &PopupGeometry,
) -> PopupPlacement {
    let local = container.to_local(anchor);
    let half = geometry.width / 2.0;

    let min_x = geometry.padding + half;
    let max_x = container.width - geometry.padding - half;
    // A NaN bound fails the comparison and takes the centering branch.
    let x = if min_x <= max_x {
        local.x.clamp(min_x, max_x)
    } else {
        // Too wide for the container: center it and accept the overflow.
        container.width / 2.0
    };

    let (y, direction) = if local.y - geometry.height - geometry.margin < geometry.reserved_top {
        (local.y + geometry.below_offset, PopupDirection::Down)
    } else {
        (local.y - geometry.margin, PopupDirection::Up)
    };

    PopupPlacement { x, y, direction }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::sized(800.0, 600.0);

    fn place(x: f64, y: f64) -> PopupPlacement {
        compute_popup_position(Point::new(x, y), CONTAINER, &PopupGeometry::default())
    }

    #[test]
    fn never_crosses_the_side_padding() {
        for x in (0..=800).step_by(10) {
            let p = place(f64::from(x), 500.0);
            assert!(p.x - 160.0 >= 20.0, "left overflow at anchor {x}: {p:?}");
            assert!(p.x + 160.0 <= 780.0, "right overflow at anchor {x}: {p:?}");
        }
    }

    #[test]
    fn centers_on_anchor_when_room() {
        let p = place(400.0, 500.0);
        assert_eq!(p.x, 400.0);
        assert_eq!(p.y, 460.0);
        assert_eq!(p.direction, PopupDirection::Up);
    }

    #[test]
    fn flips_down_near_top() {
        let p = place(400.0, 100.0);
        assert_eq!(p.direction, PopupDirection::Down);
        assert_eq!(p.y, 150.0);

        // 340 - 300 - 40 == 0, not below the reserved band.
        assert_eq!(place(400.0, 340.0).direction, PopupDirection::Up);
        assert_eq!(place(400.0, 339.0).direction, PopupDirection::Down);
    }

    #[test]
    fn reserved_top_pushes_the_flip_lower() {
        let geometry = PopupGeometry {
            reserved_top: 64.0,
            ..PopupGeometry::default()
        };
        let p = compute_popup_position(Point::new(400.0, 380.0), CONTAINER, &geometry);
        assert_eq!(p.direction, PopupDirection::Down);
    }

    #[test]
    fn anchor_is_translated_into_container_space() {
        let container = Rect::new(100.0, 200.0, 800.0, 600.0);
        let p = compute_popup_position(
            Point::new(500.0, 700.0),
            container,
            &PopupGeometry::default(),
        );
        assert_eq!(p.x, 400.0);
        assert_eq!(p.y, 460.0);
    }

    #[test]
    fn oversized_popup_is_centered() {
        let p = compute_popup_position(
            Point::new(10.0, 500.0),
            Rect::sized(300.0, 600.0),
            &PopupGeometry::default(),
        );
        assert_eq!(p.x, 150.0);
    }

    #[test]
    fn non_finite_container_does_not_panic() {
        let g = PopupGeometry::default();
        let p = compute_popup_position(Point::new(10.0, 500.0), Rect::sized(f64::NAN, 600.0), &g);
        assert!(p.x.is_nan());
        assert_eq!(p.direction, PopupDirection::Up);

        let wide = compute_popup_position(
            Point::new(10.0, 500.0),
            Rect::sized(f64::INFINITY, 600.0),
            &g,
        );
        assert_eq!(wide.x, 180.0);
    }

    #[test]
    fn top_left_offsets_by_direction() {
        let g = PopupGeometry::default();
        let up = PopupPlacement {
            x: 400.0,
            y: 460.0,
            direction: PopupDirection::Up,
        };
        assert_eq!(up.top_left(&g), Point::new(240.0, 160.0));
        let down = PopupPlacement {
            direction: PopupDirection::Down,
            ..up
        };
        assert_eq!(down.top_left(&g), Point::new(240.0, 460.0));
    }
}
