//! Editing an outline with vertex and whole-shape drags.
//!
//! One [`OutlineSession`] lives for one edit of one outline. Each drag is
//! computed from the snapshot taken when the drag started, so moves never
//! accumulate rounding.

use glam::DVec2;

use super::handles::{VertexHandle, vertex_handles};
use crate::chart::ChartState;
use crate::coords::{CoordinateSpace, EditMode};
use crate::errors::PathError;
use crate::log::{debug, trace};
use crate::path::{Cell, PolygonSet, VertexId, decode_pixels, encode};
use crate::shape::defaults::CIRCLE_SIDES;
use crate::shape::{
    Classification, ShapeDescription, ShapeUpdate, classify, ellipse_cell, is_rectangle,
    shape_path,
};

/// What the current drag holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grab {
    Vertex(VertexId),
    /// The whole outline
    Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineSession {
    polygons: PolygonSet,
    snapshot: PolygonSet,
    grab: Option<Grab>,
    edit: EditMode,
    initial_path: String,
}

impl OutlineSession {
    pub fn new(polygons: PolygonSet, edit: EditMode) -> Self {
        let initial_path = encode(&polygons);
        OutlineSession {
            snapshot: polygons.clone(),
            polygons,
            grab: None,
            edit,
            initial_path,
        }
    }

    /// Session over a rendered outline path.
    pub fn from_path(path: &str, edit: EditMode) -> Result<Self, PathError> {
        let mut session = OutlineSession::new(decode_pixels(path)?, edit);
        session.initial_path = path.to_string();
        Ok(session)
    }

    /// Session for editing a stored shape, starting from its rendered outline.
    pub fn for_shape<S>(shape: &ShapeDescription, space: &S) -> Result<Self, PathError>
    where
        S: CoordinateSpace + ?Sized,
    {
        OutlineSession::from_path(&shape_path(shape, space)?, EditMode::Edit)
    }

    pub fn polygons(&self) -> &PolygonSet {
        &self.polygons
    }

    pub fn grab(&self) -> Option<Grab> {
        self.grab
    }

    pub fn edit_mode(&self) -> EditMode {
        self.edit
    }

    pub fn initial_path(&self) -> &str {
        &self.initial_path
    }

    /// Live outline path.
    pub fn path(&self) -> String {
        encode(&self.polygons)
    }

    pub fn prepare_vertex(&mut self, id: VertexId) {
        self.snapshot = self.polygons.clone();
        self.grab = Some(Grab::Vertex(id));
    }

    pub fn prepare_shape(&mut self) {
        self.snapshot = self.polygons.clone();
        self.grab = Some(Grab::Shape);
    }

    /// Apply a cumulative drag of `(dx, dy)` pixels and return the live path.
    pub fn drag(&mut self, dx: f64, dy: f64) -> String {
        let delta = DVec2::new(dx, dy);
        match self.grab {
            Some(Grab::Shape) => self.polygons = self.snapshot.translated(delta),
            Some(Grab::Vertex(id)) => self.polygons = self.drag_vertex(id, delta),
            None => {}
        }
        self.path()
    }

    fn drag_vertex(&self, id: VertexId, delta: DVec2) -> PolygonSet {
        let Some((cell, origin)) = self
            .snapshot
            .cell(id.cell)
            .and_then(|cell| cell.endpoint(id.vertex).map(|p| (cell, p)))
        else {
            return self.snapshot.clone();
        };
        let target = origin + delta;

        let moved = match classify(cell) {
            Classification::Rect => Some(drag_rect_corner(cell, origin, target)),
            Classification::Ellipse => drag_ellipse_cardinal(cell, id.vertex, target),
            Classification::Path => None,
        };
        match moved {
            Some(cell) => self.snapshot.with_cell(id.cell, cell),
            None => self.snapshot.with_vertex(id, target),
        }
    }

    /// Release the grab.
    pub fn done(&mut self) {
        self.grab = None;
        self.snapshot = self.polygons.clone();
    }

    /// Delete a vertex. Rectangles and ellipses keep their vertices, and no
    /// cell drops below four.
    pub fn double_click(&mut self, id: VertexId) -> bool {
        let Some(cell) = self.polygons.cell(id.cell) else {
            return false;
        };
        if classify(cell) != Classification::Path {
            debug!(cell = id.cell, "vertex delete refused on rect/ellipse");
            return false;
        }
        match self.polygons.without_vertex(id) {
            Some(polygons) => {
                self.polygons = polygons;
                self.snapshot = self.polygons.clone();
                true
            }
            None => {
                debug!(cell = id.cell, vertex = id.vertex, "vertex delete refused");
                false
            }
        }
    }

    pub fn handles(&self) -> Vec<VertexHandle> {
        vertex_handles(&self.polygons)
    }

    /// Commit the outline to `chart`.
    pub fn commit<S>(&self, chart: &ChartState, space: &S) -> ShapeUpdate
    where
        S: CoordinateSpace + ?Sized,
    {
        let path = self.path();
        trace!(path = %path, "committing session");
        match self.edit {
            EditMode::Edit => chart.commit_edit(&self.initial_path, &path, space),
            EditMode::Draw => chart.commit_path(&path, space, EditMode::Draw),
        }
    }
}

/// Move a rectangle corner, carrying the neighbours that share its x or y.
///
/// A result that is no longer a rectangle reverts to `cell`.
#[allow(clippy::float_cmp)]
fn drag_rect_corner(cell: &Cell, origin: DVec2, target: DVec2) -> Cell {
    let mut moved = cell.clone();
    for (i, p) in cell.vertices() {
        let mut q = p;
        if p.x == origin.x {
            q.x = target.x;
        }
        if p.y == origin.y {
            q.y = target.y;
        }
        moved = moved.with_endpoint(i, q);
    }
    if is_rectangle(&moved) {
        moved
    } else {
        debug!("rectangle drag reverted");
        cell.clone()
    }
}

/// Resize an ellipse from one of its cardinal samples about a fixed center.
fn drag_ellipse_cardinal(cell: &Cell, vertex: usize, target: DVec2) -> Option<Cell> {
    const N: usize = CIRCLE_SIDES;
    let right = cell.endpoint(0)?;
    let bottom = cell.endpoint(N / 4)?;
    let left = cell.endpoint(N / 2)?;
    let top = cell.endpoint(3 * N / 4)?;

    let center = DVec2::new((right.x + left.x) * 0.5, (bottom.y + top.y) * 0.5);
    let mut radii = DVec2::new((right.x - left.x) * 0.5, (bottom.y - top.y) * 0.5);
    match vertex {
        0 => radii.x = target.x - center.x,
        v if v == N / 2 => radii.x = center.x - target.x,
        v if v == N / 4 => radii.y = target.y - center.y,
        v if v == 3 * N / 4 => radii.y = center.y - target.y,
        _ => return None,
    }
    Some(ellipse_cell(center, radii))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{from_corners, is_ellipse};
    use crate::types::Corners;

    #[test]
    fn test_shape_drag_translates() {
        let mut session = OutlineSession::from_path("M0,0L10,0Q15,5 10,10Z", EditMode::Edit).unwrap();
        session.prepare_shape();
        session.drag(3.0, 0.0);
        let path = session.drag(5.0, 1.0);
        insta::assert_snapshot!(path, @"M5,1L15,1Q20,6,15,11Z");
        session.done();
        assert_eq!(session.grab(), None);
    }

    #[test]
    fn test_rect_corner_drag_keeps_rectangle() {
        let mut session = OutlineSession::from_path("M0,0L0,10L20,10L20,0Z", EditMode::Edit).unwrap();
        session.prepare_vertex(VertexId::new(0, 2));
        let path = session.drag(5.0, 5.0);
        assert_eq!(path, "M0,0L0,15L25,15L25,0Z");
        assert!(is_rectangle(&session.polygons().cells()[0]));
    }

    #[test]
    fn test_rect_drag_to_zero_width_reverts() {
        let mut session = OutlineSession::from_path("M0,0L0,10L20,10L20,0Z", EditMode::Edit).unwrap();
        session.prepare_vertex(VertexId::new(0, 2));
        let path = session.drag(-20.0, 0.0);
        assert_eq!(path, "M0,0L0,10L20,10L20,0Z");
    }

    #[test]
    fn test_rect_first_corner_drag() {
        let mut session = OutlineSession::from_path("M0,0L0,10L20,10L20,0Z", EditMode::Edit).unwrap();
        session.prepare_vertex(VertexId::new(0, 0));
        let path = session.drag(-2.0, -3.0);
        assert_eq!(path, "M-2,-3L-2,10L20,10L20,-3Z");
    }

    #[test]
    fn test_ellipse_cardinal_drag_stays_ellipse() {
        let cell = from_corners(Corners::new(100.0, 100.0, 110.0, 105.0));
        let mut session = OutlineSession::new(PolygonSet::new(vec![cell]), EditMode::Edit);
        session.prepare_vertex(VertexId::new(0, 0));
        session.drag(10.0, 0.0);
        assert!(is_ellipse(&session.polygons().cells()[0]));
    }

    #[test]
    fn test_path_vertex_drag_from_snapshot() {
        let mut session = OutlineSession::from_path("M0,0L10,0L12,8L5,12L-2,8Z", EditMode::Draw).unwrap();
        session.prepare_vertex(VertexId::new(0, 3));
        session.drag(1.0, 1.0);
        let path = session.drag(2.0, 0.0);
        assert_eq!(path, "M0,0L10,0L12,8L7,12L-2,8Z");
    }

    #[test]
    fn test_double_click_deletes_vertex() {
        let mut session = OutlineSession::from_path("M0,0L10,0L12,8L5,12L-2,8Z", EditMode::Draw).unwrap();
        assert!(session.double_click(VertexId::new(0, 2)));
        let path = session.path();
        assert_eq!(path, "M0,0L10,0L5,12L-2,8Z");
        assert!(!path.contains("12,8"));
        // Four vertices left: further deletes are refused.
        assert!(!session.double_click(VertexId::new(0, 1)));
    }

    #[test]
    fn test_double_click_refused_on_rectangle() {
        let mut session = OutlineSession::from_path("M0,0L0,10L20,10L20,0Z", EditMode::Edit).unwrap();
        assert!(!session.double_click(VertexId::new(0, 1)));
        assert_eq!(session.polygons().cells()[0].vertex_count(), 4);
    }

    #[test]
    fn test_drag_without_grab_is_noop() {
        let mut session = OutlineSession::from_path("M0,0L10,0L10,10Z", EditMode::Draw).unwrap();
        assert_eq!(session.drag(4.0, 4.0), "M0,0L10,0L10,10Z");
    }
}
