//! Path builder for decoded path data.
//!
//! A state machine that turns absolute drawing instructions into cells,
//! tracking the current point and the start of the current sub-path.
//!
//! # Key Concepts
//!
//! - **current point**: where the last instruction ended; relative commands
//!   and horizontal/vertical lines are resolved against it
//! - **sub-path start**: set by every move; a close draws back to it
//! - **arcs**: flattened into `CIRCLE_SIDES / 2` lines sweeping half an
//!   ellipse whose center sits one radius to the left of the current point

use std::f64::consts::PI;

use glam::DVec2;

use super::command::Command;
use super::polygon::{Cell, PolygonSet};
use crate::shape::defaults::CIRCLE_SIDES;
use crate::types::TOLERANCE;

/// Builder for constructing a polygon set one instruction at a time.
///
/// # Example
///
/// ```ignore
/// let mut builder = PathBuilder::new();
/// builder.move_to(DVec2::new(0.0, 0.0));
/// builder.line_to(DVec2::new(10.0, 0.0));
/// builder.line_to(DVec2::new(10.0, 10.0));
/// builder.close();
///
/// let set = builder.build();
/// // one cell: M, L, L, Z(0,0)
/// ```
#[derive(Debug, Default)]
pub struct PathBuilder {
    cells: Vec<Cell>,
    current: DVec2,
    start: DVec2,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True until the first move.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn current(&self) -> DVec2 {
        self.current
    }

    fn push(&mut self, cmd: Command) {
        if let Some(end) = cmd.end() {
            self.current = end;
        }
        if let Some(cell) = self.cells.last_mut() {
            cell.push(cmd);
        }
    }

    /// Start a new cell at `p`.
    pub fn move_to(&mut self, p: DVec2) {
        self.cells.push(Cell::default());
        self.start = p;
        self.push(Command::move_to(p));
    }

    pub fn line_to(&mut self, p: DVec2) {
        self.push(Command::line_to(p));
    }

    /// Horizontal line keeping the current y.
    pub fn horizontal_to(&mut self, x: f64) {
        let y = self.current.y;
        self.line_to(DVec2::new(x, y));
    }

    /// Vertical line keeping the current x.
    pub fn vertical_to(&mut self, y: f64) {
        let x = self.current.x;
        self.line_to(DVec2::new(x, y));
    }

    pub fn quad_to(&mut self, ctrl: DVec2, end: DVec2) {
        self.push(Command::quad(end, ctrl));
    }

    pub fn smooth_to(&mut self, ctrl: DVec2, end: DVec2) {
        self.push(Command::smooth(end, ctrl));
    }

    pub fn cubic_to(&mut self, ctrl1: DVec2, ctrl2: DVec2, end: DVec2) {
        self.push(Command::cubic(end, ctrl1, ctrl2));
    }

    /// Approximate an arc by half an ellipse of `radii` around
    /// `(current.x - rx, current.y)`.
    ///
    /// Radii are negated when `large_arc` is false, which sweeps the other
    /// half. The rotation and sweep flags are ignored. The last sample snaps
    /// to `end` when within tolerance so a pair of arcs re-closes exactly.
    pub fn arc_to(&mut self, radii: DVec2, large_arc: bool, end: DVec2) {
        let radii = if large_arc { radii.abs() } else { -radii.abs() };
        let center = DVec2::new(self.current.x - radii.x, self.current.y);
        let steps = CIRCLE_SIDES / 2;

        for k in 1..=steps {
            let angle = PI * k as f64 / steps as f64;
            let mut p = center + radii * DVec2::new(angle.cos(), angle.sin());
            if k == steps && p.abs_diff_eq(end, TOLERANCE) {
                p = end;
            }
            self.line_to(p);
        }
    }

    /// Close the current sub-path.
    ///
    /// Only adds an entry when the current point is not already exactly at
    /// the sub-path start.
    pub fn close(&mut self) {
        if self.current != self.start {
            self.push(Command::close(self.start));
        }
        self.current = self.start;
    }

    /// Build and return the polygon set.
    pub fn build(self) -> PolygonSet {
        PolygonSet::new(self.cells)
    }
}
