//! Decode path strings into polygon sets and encode them back.

use glam::DVec2;

use super::command::Command;
use super::path_builder::PathBuilder;
use super::polygon::{Cell, PolygonSet};
use crate::coords::{CoordinateSpace, EditMode};
use crate::errors::{PathError, path_source};
use crate::log::{debug, warn};
use crate::parse::{RawCommand, tokenize};

/// Placeholder emitted for an empty polygon set.
pub const EMPTY_PATH: &str = "M0,0Z";

/// Decode `path` and map every point into data space.
pub fn decode<S>(path: &str, space: &S, mode: EditMode) -> Result<PolygonSet, PathError>
where
    S: CoordinateSpace + ?Sized,
{
    let pixels = decode_pixels(path)?;
    Ok(pixels.map_points(|p| space.to_data(p, mode)))
}

/// Decode `path` keeping its coordinates as written.
pub fn decode_pixels(path: &str) -> Result<PolygonSet, PathError> {
    let commands = tokenize(path)?;
    let mut builder = PathBuilder::new();

    for cmd in &commands {
        if builder.is_empty() && cmd.letter != 'M' {
            return Err(PathError::MissingMoveTo {
                src: path_source(path),
                span: cmd.span.into(),
            });
        }
        apply(&mut builder, cmd);
    }

    let set = builder.build();
    debug!(cells = set.len(), "decoded path");
    Ok(set)
}

fn apply(builder: &mut PathBuilder, cmd: &RawCommand) {
    let origin = if cmd.relative {
        builder.current()
    } else {
        DVec2::ZERO
    };
    let point = |i: usize| {
        let x = cmd.args.get(i).copied().unwrap_or_default();
        let y = cmd.args.get(i + 1).copied().unwrap_or_default();
        origin + DVec2::new(x, y)
    };
    let first = cmd.args.first().copied().unwrap_or_default();

    match cmd.letter {
        'M' => builder.move_to(point(0)),
        'L' | 'T' => builder.line_to(point(0)),
        'H' => builder.horizontal_to(origin.x + first),
        'V' => builder.vertical_to(origin.y + first),
        'Q' => builder.quad_to(point(0), point(2)),
        'S' => builder.smooth_to(point(0), point(2)),
        'C' => builder.cubic_to(point(0), point(2), point(4)),
        'A' => {
            let radii = DVec2::new(first, cmd.args.get(1).copied().unwrap_or_default());
            let large_arc = cmd.args.get(3).is_some_and(|&flag| flag != 0.0);
            builder.arc_to(radii, large_arc, point(5));
        }
        'Z' => builder.close(),
        _ => {}
    }
}

/// Encode a polygon set as path data.
///
/// Cells with non-finite coordinates are skipped. A set with nothing left to
/// write encodes as [`EMPTY_PATH`].
pub fn encode(set: &PolygonSet) -> String {
    let mut out = String::new();
    for cell in set.cells() {
        if !cell.is_finite() {
            warn!("skipping cell with non-finite coordinates");
            continue;
        }
        out.push_str(&encode_cell(cell));
    }

    if out.is_empty() {
        EMPTY_PATH.to_string()
    } else {
        out
    }
}

/// Encode one cell. Does not check finiteness.
pub fn encode_cell(cell: &Cell) -> String {
    cell.commands().iter().map(encode_command).collect()
}

fn encode_command(cmd: &Command) -> String {
    let coords = cmd
        .serialized_points()
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}{}", cmd.letter.as_char(), coords)
}

/// Shortest representation that parses back to the same value.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}
