//! Cells and polygon sets.
//!
//! A [`PolygonSet`] is an arena of [`Cell`]s addressed by [`VertexId`].
//! Every edit returns a new set; the snapshot a drag started from is never
//! touched.

use glam::DVec2;

use super::command::{Command, Letter};
use crate::types::BBox;

/// Smallest number of vertices a cell keeps after a vertex delete.
pub const MIN_VERTICES: usize = 4;

/// One contiguous sub-path: a move, its drawing commands and an optional
/// closing line.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    commands: Vec<Command>,
}

impl Cell {
    pub fn new(commands: Vec<Command>) -> Self {
        Cell { commands }
    }

    /// Polyline through `points`. When `closed`, a closing line back to the
    /// first point is added unless the last point already sits on it.
    pub fn from_points(points: &[DVec2], closed: bool) -> Self {
        let mut commands = Vec::with_capacity(points.len() + 1);
        let Some((&first, rest)) = points.split_first() else {
            return Cell::default();
        };
        commands.push(Command::move_to(first));
        commands.extend(rest.iter().map(|&p| Command::line_to(p)));
        if closed && points.last() != Some(&first) {
            commands.push(Command::close(first));
        }
        Cell { commands }
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub(crate) fn push(&mut self, cmd: Command) {
        self.commands.push(cmd);
    }

    /// Number of entries, close included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.commands.last().is_some_and(Command::is_close)
    }

    /// Endpoint of entry `i`, close included.
    pub fn endpoint(&self, i: usize) -> Option<DVec2> {
        self.commands.get(i).and_then(Command::end)
    }

    /// Entry index and endpoint of every vertex, skipping closes.
    pub fn vertices(&self) -> impl Iterator<Item = (usize, DVec2)> + '_ {
        self.commands
            .iter()
            .enumerate()
            .filter(|(_, cmd)| !cmd.is_close())
            .filter_map(|(i, cmd)| cmd.end().map(|p| (i, p)))
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices().count()
    }

    pub fn bbox(&self) -> BBox {
        self.vertices().map(|(_, p)| p).collect()
    }

    pub fn is_finite(&self) -> bool {
        self.commands.iter().all(Command::is_finite)
    }

    pub fn map_points(&self, f: impl Fn(DVec2) -> DVec2) -> Self {
        Cell {
            commands: self.commands.iter().map(|cmd| cmd.map_points(&f)).collect(),
        }
    }

    /// Move the endpoint of entry `i`. Moving the first vertex drags the
    /// stored close point with it.
    pub fn with_endpoint(&self, i: usize, p: DVec2) -> Self {
        let mut cell = self.clone();
        let moved = match self.commands.get(i) {
            Some(cmd) if !cmd.is_close() => cmd.with_end(p),
            _ => return cell,
        };
        cell.commands[i] = moved;
        if i == 0 {
            cell.sync_close();
        }
        cell
    }

    /// Remove vertex `i`, or `None` when the entry is a close or the cell
    /// would drop below [`MIN_VERTICES`].
    pub fn without_vertex(&self, i: usize) -> Option<Self> {
        let cmd = self.commands.get(i)?;
        if cmd.is_close() || self.vertex_count() <= MIN_VERTICES {
            return None;
        }
        let mut cell = self.clone();
        cell.commands.remove(i);
        if i == 0 {
            let next = cell.commands.first().and_then(Command::end)?;
            cell.commands[0] = Command::move_to(next);
            cell.sync_close();
        }
        Some(cell)
    }

    fn sync_close(&mut self) {
        let Some(start) = self.endpoint(0) else {
            return;
        };
        for cmd in self.commands.iter_mut().filter(|cmd| cmd.letter == Letter::Z) {
            *cmd = Command::close(start);
        }
    }
}

/// Address of one vertex in a polygon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId {
    pub cell: usize,
    /// Entry index within the cell
    pub vertex: usize,
}

impl VertexId {
    pub fn new(cell: usize, vertex: usize) -> Self {
        VertexId { cell, vertex }
    }
}

/// Ordered cells of one path string.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolygonSet {
    cells: Vec<Cell>,
}

impl PolygonSet {
    pub fn new(cells: Vec<Cell>) -> Self {
        PolygonSet { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, i: usize) -> Option<&Cell> {
        self.cells.get(i)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn vertex(&self, id: VertexId) -> Option<DVec2> {
        self.cells.get(id.cell)?.endpoint(id.vertex)
    }

    pub fn map_points(&self, f: impl Fn(DVec2) -> DVec2) -> Self {
        PolygonSet {
            cells: self.cells.iter().map(|cell| cell.map_points(&f)).collect(),
        }
    }

    /// Every point shifted by `delta`, control points included.
    pub fn translated(&self, delta: DVec2) -> Self {
        self.map_points(|p| p + delta)
    }

    /// The set with vertex `id` moved to `p`. Unknown ids leave it unchanged.
    pub fn with_vertex(&self, id: VertexId, p: DVec2) -> Self {
        match self.cells.get(id.cell) {
            Some(cell) => self.with_cell(id.cell, cell.with_endpoint(id.vertex, p)),
            None => self.clone(),
        }
    }

    /// The set with cell `i` replaced.
    pub fn with_cell(&self, i: usize, cell: Cell) -> Self {
        let mut set = self.clone();
        if let Some(slot) = set.cells.get_mut(i) {
            *slot = cell;
        }
        set
    }

    pub fn without_vertex(&self, id: VertexId) -> Option<Self> {
        let cell = self.cells.get(id.cell)?.without_vertex(id.vertex)?;
        Some(self.with_cell(id.cell, cell))
    }
}

impl FromIterator<Cell> for PolygonSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        PolygonSet {
            cells: iter.into_iter().collect(),
        }
    }
}
