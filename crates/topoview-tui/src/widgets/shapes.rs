//! Canvas geometry for node outlines and link strokes, in layout units
//! (y grows down).

use std::f64::consts::{FRAC_PI_2, TAU};

use topoview_core::{DashPattern, NodeShape, Point};

/// Vertices used to approximate round outlines.
const ROUND_SEGMENTS: u32 = 24;
/// Layout units between parallel strokes of a wide link.
const STROKE_SPACING: f64 = 5.0;

fn regular(center: Point, rx: f64, ry: f64, sides: u32, start: f64) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let angle = start + TAU * f64::from(i) / f64::from(sides);
            Point::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}

/// Closed polygon approximating `shape` inside a circle of `radius`.
pub fn outline(shape: NodeShape, center: Point, radius: f64) -> Vec<Point> {
    let r = radius;
    match shape {
        NodeShape::Circle => regular(center, r, r, ROUND_SEGMENTS, 0.0),
        NodeShape::Ellipse => regular(center, r, r * 0.65, ROUND_SEGMENTS, 0.0),
        NodeShape::Hexagon => regular(center, r, r, 6, 0.0),
        NodeShape::Diamond => regular(center, r, r, 4, 0.0),
        // Point up: layout y grows down.
        NodeShape::Triangle => regular(center, r, r, 3, -FRAC_PI_2),
        NodeShape::Square => regular(center, r, r, 4, TAU / 8.0),
        NodeShape::Star => (0..10)
            .map(|i| {
                let angle = -FRAC_PI_2 + TAU * f64::from(i) / 10.0;
                let reach = if i % 2 == 0 { r } else { r * 0.45 };
                Point::new(center.x + reach * angle.cos(), center.y + reach * angle.sin())
            })
            .collect(),
        NodeShape::RoundRect => {
            let (hw, hh) = (r * 0.8, r * 0.55);
            let c = r * 0.2;
            let (x, y) = (center.x, center.y);
            vec![
                Point::new(x - hw + c, y - hh),
                Point::new(x + hw - c, y - hh),
                Point::new(x + hw, y - hh + c),
                Point::new(x + hw, y + hh - c),
                Point::new(x + hw - c, y + hh),
                Point::new(x - hw + c, y + hh),
                Point::new(x - hw, y + hh - c),
                Point::new(x - hw, y - hh + c),
            ]
        }
    }
}

/// Edges of a closed polygon.
pub fn edges(polygon: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(a, b)| (*a, *b))
}

/// Visible pieces of the stroke from `a` to `b`.
pub fn dash_segments(a: Point, b: Point, pattern: DashPattern) -> Vec<(Point, Point)> {
    let DashPattern::Dashed { dash, gap } = pattern else {
        return vec![(a, b)];
    };
    let length = a.distance_to(b);
    if length <= f64::EPSILON || dash <= 0.0 {
        return vec![(a, b)];
    }
    let at = |t: f64| Point::new(a.x + (b.x - a.x) * t / length, a.y + (b.y - a.y) * t / length);

    let mut out = Vec::new();
    let mut start = 0.0;
    while start < length {
        let end = (start + dash).min(length);
        out.push((at(start), at(end)));
        start = end + gap.max(0.0);
    }
    out
}

/// Perpendicular offsets of the parallel strokes drawn for a link of
/// `width`. Braille dots are coarse, so only wide links get a second line.
pub fn stroke_offsets(width: f64) -> &'static [f64] {
    if width >= 4.0 {
        &[-STROKE_SPACING / 2.0, STROKE_SPACING / 2.0]
    } else {
        &[0.0]
    }
}

/// Shift the segment `a`→`b` sideways by `offset`.
pub fn offset_segment(a: Point, b: Point, offset: f64) -> (Point, Point) {
    let length = a.distance_to(b);
    if offset.abs() <= f64::EPSILON || length <= f64::EPSILON {
        return (a, b);
    }
    let (nx, ny) = (-(b.y - a.y) / length * offset, (b.x - a.x) / length * offset);
    (
        Point::new(a.x + nx, a.y + ny),
        Point::new(b.x + nx, b.y + ny),
    )
}

/// Shortest distance from `p` to the segment `a`→`b`.
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len2 = dx * dx + dy * dy;
    if len2 <= f64::EPSILON {
        return p.distance_to(a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len2).clamp(0.0, 1.0);
    p.distance_to(Point::new(a.x + t * dx, a.y + t * dy))
}
