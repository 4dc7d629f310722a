//! Ellipse construction from drag corners, and back.
//!
//! A drag starts at the ellipse center and ends on its 45° sample, so the
//! ellipse's half extents are the drag deltas scaled by √2.

use std::f64::consts::{FRAC_1_SQRT_2, PI, SQRT_2};

use glam::DVec2;

use super::defaults::CIRCLE_SIDES;
use crate::coords::EditMode;
use crate::path::{Cell, Command};
use crate::types::Corners;

/// Bounding box of the ellipse described by drag `corners`.
pub fn ellipse_bbox(corners: Corners) -> Corners {
    let center = corners.start();
    let half = (corners.end() - corners.start()) * SQRT_2;
    Corners::from_points(center - half, center + half)
}

/// Polygon sampled around `center` at `CIRCLE_SIDES` uniform angles.
///
/// Always `CIRCLE_SIDES + 1` entries: the close is stored even when every
/// sample coincides.
pub fn ellipse_cell(center: DVec2, radii: DVec2) -> Cell {
    let points: Vec<DVec2> = (0..CIRCLE_SIDES)
        .map(|k| {
            let angle = 2.0 * PI * k as f64 / CIRCLE_SIDES as f64;
            center + radii * DVec2::new(angle.cos(), angle.sin())
        })
        .collect();
    let mut cell = Cell::from_points(&points, false);
    cell.push(Command::close(points[0]));
    cell
}

/// Ellipse polygon for a drag from `corners.start()` to `corners.end()`.
///
/// A drag along one axis gives a circle whose radius is the nonzero radius
/// scaled by `1/√2`.
pub fn from_corners(corners: Corners) -> Cell {
    let bbox = ellipse_bbox(corners);
    let center = bbox.center();
    let mut radii = (bbox.end() - bbox.start()) * 0.5;

    if radii.x == 0.0 && radii.y != 0.0 {
        radii = DVec2::splat(radii.y * FRAC_1_SQRT_2);
    } else if radii.y == 0.0 && radii.x != 0.0 {
        radii = DVec2::splat(radii.x * FRAC_1_SQRT_2);
    }
    ellipse_cell(center, radii)
}

/// Drag corners of an ellipse polygon, or `None` when `cell` does not have
/// the ellipse vertex count.
///
/// A freshly drawn polygon still has its diagonal symmetry and is read from
/// the 45° sample. An edited one may not, so only the four cardinal samples
/// are trusted.
pub fn to_corners(cell: &Cell, mode: EditMode) -> Option<Corners> {
    const N: usize = CIRCLE_SIDES;
    if cell.len() != N + 1 {
        return None;
    }

    let (center, corner) = match mode {
        EditMode::Draw => {
            let center = (cell.endpoint(0)? + cell.endpoint(N / 2)?) * 0.5;
            (center, cell.endpoint(N / 8)?)
        }
        EditMode::Edit => {
            let right = cell.endpoint(0)?;
            let bottom = cell.endpoint(N / 4)?;
            let left = cell.endpoint(N / 2)?;
            let top = cell.endpoint(3 * N / 4)?;
            let center = DVec2::new((right.x + left.x) * 0.5, (bottom.y + top.y) * 0.5);
            let radii = DVec2::new((right.x - left.x) * 0.5, (bottom.y - top.y) * 0.5);
            (center, center + radii * FRAC_1_SQRT_2)
        }
    };
    Some(Corners::from_points(center, corner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::classify::is_ellipse;
    use crate::types::almost_eq;

    fn assert_corners_close(a: Corners, b: Corners) {
        for (x, y) in [(a.x0, b.x0), (a.y0, b.y0), (a.x1, b.x1), (a.y1, b.y1)] {
            assert!(almost_eq(x, y), "{a:?} != {b:?}");
        }
    }

    #[test]
    fn test_from_corners_is_ellipse() {
        let cell = from_corners(Corners::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(cell.len(), CIRCLE_SIDES + 1);
        assert!(is_ellipse(&cell));
    }

    #[test]
    fn test_perturbed_ellipse_rejected() {
        let cell = from_corners(Corners::new(0.0, 0.0, 10.0, 6.0));
        assert!(is_ellipse(&cell));
        let p = cell.endpoint(3).unwrap();
        let bent = cell.with_endpoint(3, p + DVec2::new(0.01, 0.0));
        assert!(!is_ellipse(&bent));
    }

    #[test]
    fn test_corner_inverse() {
        for corners in [
            Corners::new(0.0, 0.0, 10.0, 10.0),
            Corners::new(5.0, 2.0, 1.0, 7.5),
            Corners::new(-3.0, 4.0, 6.0, -1.0),
        ] {
            let cell = from_corners(corners);
            for mode in [EditMode::Draw, EditMode::Edit] {
                assert_corners_close(to_corners(&cell, mode).unwrap(), corners);
            }
        }
    }

    #[test]
    fn test_degenerate_drag_gives_circle() {
        let cell = from_corners(Corners::new(0.0, 0.0, 10.0, 0.0));
        assert!(is_ellipse(&cell));
        let bbox = ellipse_bbox(to_corners(&cell, EditMode::Draw).unwrap());
        assert!(almost_eq(bbox.x1 - bbox.x0, bbox.y1 - bbox.y0));
        assert!(almost_eq(bbox.x1 - bbox.x0, 20.0));
    }

    #[test]
    fn test_zero_drag_keeps_ellipse_entry_count() {
        let cell = from_corners(Corners::new(2.5, 7.5, 2.5, 7.5));
        assert_eq!(cell.len(), CIRCLE_SIDES + 1);
        assert!(cell.is_closed());
    }

    #[test]
    fn test_wrong_count_has_no_corners() {
        let cell = Cell::from_points(&[DVec2::ZERO, DVec2::X, DVec2::Y], true);
        assert_eq!(to_corners(&cell, EditMode::Draw), None);
    }

    #[test]
    fn test_ellipse_bbox() {
        let bbox = ellipse_bbox(Corners::new(10.0, 10.0, 12.0, 13.0));
        assert_corners_close(
            bbox,
            Corners::new(
                10.0 - 2.0 * SQRT_2,
                10.0 - 3.0 * SQRT_2,
                10.0 + 2.0 * SQRT_2,
                10.0 + 3.0 * SQRT_2,
            ),
        );
    }
}
