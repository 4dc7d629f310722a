//! Rectangle / ellipse recognition.

use super::defaults::CIRCLE_SIDES;
use crate::path::Cell;
use crate::types::almost_eq;

/// What a cell looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Rect,
    Ellipse,
    Path,
}

/// Rectangle test first, then ellipse, otherwise a generic path.
pub fn classify(cell: &Cell) -> Classification {
    if is_rectangle(cell) {
        Classification::Rect
    } else if is_ellipse(cell) {
        Classification::Ellipse
    } else {
        Classification::Path
    }
}

/// Axis-aligned rectangle: four corners plus a closing entry.
///
/// Opposite edges must match per axis within tolerance, and vertex 0 must
/// share an exact x with one of its neighbours, which rejects rotated quads.
pub fn is_rectangle(cell: &Cell) -> bool {
    if cell.len() != 5 {
        return false;
    }
    let (Some(p0), Some(p1), Some(p2), Some(p3)) = (
        cell.endpoint(0),
        cell.endpoint(1),
        cell.endpoint(2),
        cell.endpoint(3),
    ) else {
        return false;
    };
    if ![p0, p1, p2, p3].iter().all(|p| p.is_finite()) {
        return false;
    }

    let e01 = p1 - p0;
    let e32 = p2 - p3;
    let e03 = p3 - p0;
    let e12 = p2 - p1;
    let parallel = almost_eq(e01.x, e32.x)
        && almost_eq(e01.y, e32.y)
        && almost_eq(e03.x, e12.x)
        && almost_eq(e03.y, e12.y);
    if !parallel {
        return false;
    }

    #[allow(clippy::float_cmp)]
    let axis_aligned = p0.x == p1.x || p0.x == p3.x;
    axis_aligned && e01.length() > 0.0 && e03.length() > 0.0
}

/// Uniformly sampled axis-aligned ellipse.
///
/// Each diagonal must have the same length as its mirror across the
/// horizontal axis.
pub fn is_ellipse(cell: &Cell) -> bool {
    const N: usize = CIRCLE_SIDES;
    if cell.len() != N + 1 {
        return false;
    }

    let diagonal = |i: usize| -> Option<f64> {
        let a = cell.endpoint(i % N)?;
        let b = cell.endpoint((i + N / 2) % N)?;
        Some(a.distance(b))
    };

    (0..N).all(|i| {
        let k = (N - i) % N;
        match (diagonal(i), diagonal(k)) {
            (Some(d), Some(mirror)) => almost_eq(d, mirror),
            _ => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn quad(points: [(f64, f64); 4]) -> Cell {
        let points = points.map(|(x, y)| DVec2::new(x, y));
        Cell::from_points(&points, true)
    }

    #[test]
    fn test_axis_aligned_rectangle() {
        let cell = quad([(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        assert!(is_rectangle(&cell));
        assert_eq!(classify(&cell), Classification::Rect);
    }

    #[test]
    fn test_rectangle_other_winding() {
        let cell = quad([(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        assert!(is_rectangle(&cell));
    }

    #[test]
    fn test_rotated_rectangle_rejected() {
        let angle = 10f64.to_radians();
        let rot = DVec2::from_angle(angle);
        let corners = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
            .map(|(x, y)| rot.rotate(DVec2::new(x, y)));
        let cell = Cell::from_points(&corners, true);
        assert!(!is_rectangle(&cell));
        assert_eq!(classify(&cell), Classification::Path);
    }

    #[test]
    fn test_degenerate_rectangle_rejected() {
        let flat = quad([(0.0, 0.0), (0.0, 0.0), (10.0, 0.0), (10.0, 0.0)]);
        assert!(!is_rectangle(&flat));
        let nan = quad([(f64::NAN, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]);
        assert!(!is_rectangle(&nan));
    }

    #[test]
    fn test_parallelogram_rejected() {
        let cell = quad([(0.0, 0.0), (0.0, 10.0), (12.0, 10.0), (10.0, 0.0)]);
        assert!(!is_rectangle(&cell));
    }

    #[test]
    fn test_open_quad_rejected() {
        let points = [(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)]
            .map(|(x, y)| DVec2::new(x, y));
        assert!(!is_rectangle(&Cell::from_points(&points, false)));
    }
}
