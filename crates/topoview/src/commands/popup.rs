//! Popup placement command handler.

use serde::Serialize;

use topoview_core::{PopupGeometry, PopupPlacement, Point, Rect, compute_popup_position};

use crate::cli::{GlobalOpts, PopupArgs};
use crate::error::CliError;
use crate::output;

#[derive(Serialize)]
struct PopupReport {
    anchor: Point,
    container: Rect,
    geometry: PopupGeometry,
    placement: PopupPlacement,
    bounds: Rect,
}

fn detail(r: &PopupReport) -> String {
    [
        format!("Anchor:     ({}, {})", r.anchor.x, r.anchor.y),
        format!(
            "Container:  {}x{} at ({}, {})",
            r.container.width, r.container.height, r.container.x, r.container.y
        ),
        format!("Direction:  {}", r.placement.direction),
        format!("Transform:  ({:.1}, {:.1})", r.placement.x, r.placement.y),
        format!(
            "Box:        {}x{} at ({:.1}, {:.1})",
            r.bounds.width, r.bounds.height, r.bounds.x, r.bounds.y
        ),
    ]
    .join("\n")
}

/// Popup geometry comes from the config file, so no topology is loaded.
pub fn handle(
    args: &PopupArgs,
    mut geometry: PopupGeometry,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    if let Some(reserved) = args.reserved_top {
        geometry.reserved_top = reserved;
    }
    let coords = [
        ("x", args.x),
        ("y", args.y),
        ("container-x", args.container_x),
        ("container-y", args.container_y),
        ("container-width", args.container_width),
        ("container-height", args.container_height),
        ("reserved-top", geometry.reserved_top),
    ];
    if let Some((field, _)) = coords.iter().find(|(_, v)| !v.is_finite()) {
        return Err(CliError::Validation {
            field: (*field).into(),
            reason: "must be a finite number".into(),
        });
    }
    if args.container_width <= 0.0 || args.container_height <= 0.0 {
        return Err(CliError::Validation {
            field: "container".into(),
            reason: "width and height must be positive".into(),
        });
    }

    let anchor = Point::new(args.x, args.y);
    let container = Rect::new(
        args.container_x,
        args.container_y,
        args.container_width,
        args.container_height,
    );
    let placement = compute_popup_position(anchor, container, &geometry);
    let report = PopupReport {
        anchor,
        container,
        geometry,
        placement,
        bounds: placement.bounds(&geometry),
    };

    let out = output::render_single(&global.output, &report, detail, |r| {
        format!(
            "{} {:.1} {:.1}",
            r.placement.direction, r.placement.x, r.placement.y
        )
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
