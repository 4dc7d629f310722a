//! Vertex handles for the renderer.

use glam::DVec2;

use crate::path::{PolygonSet, VertexId};
use crate::shape::defaults::CIRCLE_SIDES;
use crate::shape::{Classification, classify};

/// Indicator drawn on a vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Rectangle corner
    Square,
    Circle,
}

/// Pointer cursor hint for a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    Move,
}

impl Cursor {
    /// Cursor for a point at fractions `fx` (left to right) and `fy_up`
    /// (bottom to top) of its shape's bounding box. Thirds pick the sector.
    ///
    /// Non-finite fractions, e.g. from a zero-height box, give `None`.
    pub fn from_fraction(fx: f64, fy_up: f64) -> Option<Self> {
        if !fx.is_finite() || !fy_up.is_finite() {
            return None;
        }
        let third = |f: f64| {
            if f < 1.0 / 3.0 {
                0
            } else if f > 2.0 / 3.0 {
                2
            } else {
                1
            }
        };
        let cursor = match (third(fx), third(fy_up)) {
            (0, 0) => Cursor::SouthWest,
            (1, 0) => Cursor::South,
            (2, 0) => Cursor::SouthEast,
            (0, 1) => Cursor::West,
            (2, 1) => Cursor::East,
            (0, 2) => Cursor::NorthWest,
            (1, 2) => Cursor::North,
            (2, 2) => Cursor::NorthEast,
            _ => Cursor::Move,
        };
        Some(cursor)
    }

    /// CSS cursor name
    pub fn css(self) -> &'static str {
        match self {
            Cursor::North => "n-resize",
            Cursor::NorthEast => "ne-resize",
            Cursor::East => "e-resize",
            Cursor::SouthEast => "se-resize",
            Cursor::South => "s-resize",
            Cursor::SouthWest => "sw-resize",
            Cursor::West => "w-resize",
            Cursor::NorthWest => "nw-resize",
            Cursor::Move => "move",
        }
    }
}

/// A draggable vertex as the renderer should draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexHandle {
    pub id: VertexId,
    /// Pixel position
    pub position: DVec2,
    pub marker: Marker,
    pub cursor: Option<Cursor>,
}

/// One handle per vertex. Ellipses only expose their four cardinal samples.
pub fn vertex_handles(polygons: &PolygonSet) -> Vec<VertexHandle> {
    let mut handles = Vec::new();
    for (cell_index, cell) in polygons.cells().iter().enumerate() {
        let kind = classify(cell);
        let bbox = cell.bbox();
        let marker = match kind {
            Classification::Rect => Marker::Square,
            Classification::Ellipse | Classification::Path => Marker::Circle,
        };

        for (vertex, position) in cell.vertices() {
            if kind == Classification::Ellipse && vertex % (CIRCLE_SIDES / 4) != 0 {
                continue;
            }
            // Pixel y grows downward.
            let frac = bbox.normalize(position);
            handles.push(VertexHandle {
                id: VertexId::new(cell_index, vertex),
                position,
                marker,
                cursor: Cursor::from_fraction(frac.x, 1.0 - frac.y),
            });
        }
    }
    handles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::decode_pixels;
    use crate::shape::from_corners;
    use crate::types::Corners;

    #[test]
    fn test_rect_handles() {
        let set = decode_pixels("M0,0L0,10L20,10L20,0Z").unwrap();
        let handles = vertex_handles(&set);
        assert_eq!(handles.len(), 4);
        assert!(handles.iter().all(|h| h.marker == Marker::Square));
        // (0,0) is the top-left corner on screen.
        assert_eq!(handles[0].cursor, Some(Cursor::NorthWest));
        assert_eq!(handles[2].cursor, Some(Cursor::SouthEast));
        assert_eq!(handles[2].cursor.map(Cursor::css), Some("se-resize"));
    }

    #[test]
    fn test_ellipse_cardinal_handles() {
        let set = PolygonSet::new(vec![from_corners(Corners::new(50.0, 50.0, 60.0, 55.0))]);
        let handles = vertex_handles(&set);
        let vertices: Vec<usize> = handles.iter().map(|h| h.id.vertex).collect();
        assert_eq!(vertices, vec![0, 8, 16, 24]);
        assert!(handles.iter().all(|h| h.marker == Marker::Circle));
        assert_eq!(handles[0].cursor, Some(Cursor::East));
    }

    #[test]
    fn test_flat_shape_has_no_cursor() {
        let set = decode_pixels("M0,5L10,5L20,5L30,5").unwrap();
        let handles = vertex_handles(&set);
        assert_eq!(handles.len(), 4);
        assert!(handles.iter().all(|h| h.cursor.is_none()));
    }

    #[test]
    fn test_center_is_move() {
        assert_eq!(Cursor::from_fraction(0.5, 0.5), Some(Cursor::Move));
        assert_eq!(Cursor::from_fraction(f64::NAN, 0.5), None);
    }
}
