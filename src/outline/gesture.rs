//! Drawing a brand-new shape.

use glam::DVec2;

use crate::chart::ChartState;
use crate::coords::{CoordinateSpace, EditMode};
use crate::log::debug;
use crate::path::{Cell, PolygonSet, encode};
use crate::shape::{DrawMode, ShapeUpdate, from_corners};
use crate::types::Corners;

/// A press-and-drag that draws a fresh outline.
///
/// Coordinates are graph-relative pixels; committing goes through
/// [`EditMode::Draw`] so the plot offset is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawGesture {
    mode: DrawMode,
    start: DVec2,
    current: DVec2,
    /// Vertices laid down so far in path modes
    points: Vec<DVec2>,
}

impl DrawGesture {
    pub fn new(mode: DrawMode, start: DVec2) -> Self {
        DrawGesture {
            mode,
            start,
            current: start,
            points: vec![start],
        }
    }

    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Move to `start + (dx, dy)` and return the live outline path.
    ///
    /// Deltas are cumulative from the press. Path modes lay down a vertex
    /// per move.
    pub fn drag(&mut self, dx: f64, dy: f64) -> String {
        self.current = self.start + DVec2::new(dx, dy);
        if matches!(self.mode, DrawMode::OpenPath | DrawMode::ClosedPath) {
            self.points.push(self.current);
        }
        self.path()
    }

    pub fn outline(&self) -> PolygonSet {
        let cell = match self.mode {
            DrawMode::Line => Cell::from_points(&[self.start, self.current], false),
            DrawMode::Rect => rect_cell(self.start, self.current),
            DrawMode::Circle => from_corners(Corners::from_points(self.start, self.current)),
            DrawMode::OpenPath => Cell::from_points(&self.points, false),
            DrawMode::ClosedPath => Cell::from_points(&self.points, true),
        };
        PolygonSet::new(vec![cell])
    }

    pub fn path(&self) -> String {
        encode(&self.outline())
    }

    /// True until the pointer has moved away from the press point.
    pub fn is_degenerate(&self) -> bool {
        self.current == self.start && self.points.iter().all(|&p| p == self.start)
    }

    /// Commit the outline as new shapes.
    ///
    /// A press and release without movement leaves the shape list as is.
    pub fn finish<S>(&self, chart: &ChartState, space: &S) -> ShapeUpdate
    where
        S: CoordinateSpace + ?Sized,
    {
        if self.is_degenerate() {
            debug!(mode = ?self.mode, "empty gesture, nothing to commit");
            return ShapeUpdate {
                shapes: chart.shapes.clone(),
                updated_active_shape: false,
            };
        }
        let mut chart = chart.clone();
        chart.draw_mode = self.mode;
        chart.commit_path(&self.path(), space, EditMode::Draw)
    }
}

/// Axis-aligned rectangle with opposite corners `a` and `b`.
pub fn rect_cell(a: DVec2, b: DVec2) -> Cell {
    Cell::from_points(&[a, DVec2::new(a.x, b.y), b, DVec2::new(b.x, a.y)], true)
}
