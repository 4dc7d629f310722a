//! Render stored shapes back to pixel paths.
//!
//! Editing starts from the outline the chart draws for the active shape.
//! Output is plot-relative, matching [`EditMode::Edit`].

use glam::DVec2;

use super::description::{Geometry, ShapeDescription};
use crate::coords::{CoordinateSpace, EditMode};
use crate::errors::PathError;
use crate::log::warn;
use crate::path::{EMPTY_PATH, decode_pixels, encode, fmt_num};
use crate::types::Corners;

/// Pixel path for `shape` in `space`.
///
/// Rectangles come out as `M H V H Z`, circles as two half-ellipse arcs,
/// lines as `M L`. Paths are re-mapped point by point.
///
/// Anchors that map to a non-finite pixel render as [`EMPTY_PATH`].
pub fn shape_path<S>(shape: &ShapeDescription, space: &S) -> Result<String, PathError>
where
    S: CoordinateSpace + ?Sized,
{
    let pixel = |x: f64, y: f64| space.to_pixel(DVec2::new(x, y), EditMode::Edit);
    let ends = |c: &Corners| (pixel(c.x0, c.y0), pixel(c.x1, c.y1));

    if let Some(corners) = shape.geometry.corners() {
        let (a, b) = ends(&corners);
        if !(a.is_finite() && b.is_finite()) {
            warn!(kind = shape.geometry.type_name(), "shape anchors map to non-finite pixels");
            return Ok(EMPTY_PATH.to_string());
        }
    }

    let path = match &shape.geometry {
        Geometry::Rect(c) => {
            let (a, b) = ends(c);
            format!(
                "M{},{}H{}V{}H{}Z",
                fmt_num(a.x),
                fmt_num(a.y),
                fmt_num(b.x),
                fmt_num(b.y),
                fmt_num(a.x)
            )
        }
        Geometry::Circle(c) => {
            let (a, b) = ends(c);
            let center = (a + b) * 0.5;
            let radii = ((b - a) * 0.5).abs();
            let (rx, ry) = (fmt_num(radii.x), fmt_num(radii.y));
            let right = fmt_num(center.x + radii.x);
            let left = fmt_num(center.x - radii.x);
            let cy = fmt_num(center.y);
            format!(
                "M{right},{cy}A{rx},{ry} 0 1,1 {left},{cy}A{rx},{ry} 0 0,1 {right},{cy}Z"
            )
        }
        Geometry::Line(c) => {
            let (a, b) = ends(c);
            format!(
                "M{},{}L{},{}",
                fmt_num(a.x),
                fmt_num(a.y),
                fmt_num(b.x),
                fmt_num(b.y)
            )
        }
        Geometry::Path { path } => {
            let data = decode_pixels(path)?;
            encode(&data.map_points(|p| space.to_pixel(p, EditMode::Edit)))
        }
    };
    Ok(path)
}
