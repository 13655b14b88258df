//! Pan/zoom camera mapping layout units to terminal cells and back.
//!
//! Layout coordinates grow right and down. The canvas y axis grows up, so
//! drawing negates y and the y bounds are `[-bottom, -top]`.

use ratatui::layout::Rect;
use topoview_core::geometry::Rect as Bounds;
use topoview_core::{Point, Viewport};

/// Layout units covered by one terminal cell. Cells are about twice as
/// tall as wide, which makes braille dots (2x4 per cell) square.
pub const CELL_WIDTH: f64 = 10.0;
pub const CELL_HEIGHT: f64 = 20.0;

const MIN_ZOOM: f64 = 0.25;
const MAX_ZOOM: f64 = 8.0;
const ZOOM_STEP: f64 = 1.25;
/// Fraction of the visible window one pan step moves.
const PAN_STEP: f64 = 0.1;

/// Viewport in layout units for a canvas of `area` cells.
pub fn viewport_for(area: Rect) -> Viewport {
    Viewport::new(
        f64::from(area.width.max(1)) * CELL_WIDTH,
        f64::from(area.height.max(1)) * CELL_HEIGHT,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    center: Point,
    zoom: f64,
}

impl Camera {
    /// Whole viewport in view, unzoomed.
    pub fn fit(viewport: Viewport) -> Self {
        Self {
            center: viewport.center(),
            zoom: 1.0,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Visible part of the layout plane.
    pub fn window(&self, viewport: Viewport) -> Bounds {
        let width = viewport.width / self.zoom;
        let height = viewport.height / self.zoom;
        Bounds::new(
            self.center.x - width / 2.0,
            self.center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Canvas `x_bounds` / `y_bounds` for the visible window.
    pub fn canvas_bounds(&self, viewport: Viewport) -> ([f64; 2], [f64; 2]) {
        let w = self.window(viewport);
        ([w.x, w.right()], [-w.bottom(), -w.y])
    }

    /// Move by `dx`/`dy` pan steps (positive is right/down).
    pub fn pan(&mut self, dx: f64, dy: f64, viewport: Viewport) {
        let w = self.window(viewport);
        self.center.x += dx * w.width * PAN_STEP;
        self.center.y += dy * w.height * PAN_STEP;
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Layout point under the center of terminal cell (`col`, `row`), or
    /// `None` outside `area`.
    pub fn cell_to_world(&self, viewport: Viewport, area: Rect, col: u16, row: u16) -> Option<Point> {
        if area.width == 0
            || area.height == 0
            || col < area.x
            || row < area.y
            || col >= area.right()
            || row >= area.bottom()
        {
            return None;
        }
        let w = self.window(viewport);
        let fx = (f64::from(col - area.x) + 0.5) / f64::from(area.width);
        let fy = (f64::from(row - area.y) + 0.5) / f64::from(area.height);
        Some(Point::new(w.x + fx * w.width, w.y + fy * w.height))
    }

    /// Layout point → on-screen position in the container's own units,
    /// `(0,0)` at the canvas's top-left and `viewport` at its bottom-right.
    pub fn world_to_view(&self, viewport: Viewport, p: Point) -> Point {
        let w = self.window(viewport);
        Point::new((p.x - w.x) * self.zoom, (p.y - w.y) * self.zoom)
    }

    /// Layout units that one terminal column spans at the current zoom.
    pub fn cell_span(&self) -> f64 {
        CELL_WIDTH / self.zoom
    }
}

/// Map a container-local box (view units) onto the cells of `area`,
/// clipped to `area`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn view_to_cells(bounds: Bounds, viewport: Viewport, area: Rect) -> Rect {
    let sx = f64::from(area.width) / viewport.width;
    let sy = f64::from(area.height) / viewport.height;
    let to_col = |x: f64| (x * sx).round().clamp(0.0, f64::from(area.width)) as u16;
    let to_row = |y: f64| (y * sy).round().clamp(0.0, f64::from(area.height)) as u16;

    let left = to_col(bounds.x);
    let top = to_row(bounds.y);
    let right = to_col(bounds.right());
    let bottom = to_row(bounds.bottom());
    Rect::new(
        area.x + left,
        area.y + top,
        right.saturating_sub(left),
        bottom.saturating_sub(top),
    )
}
