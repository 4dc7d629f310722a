//! Shape path engine for interactive chart annotations.
//!
//! A user drags on a chart to draw or edit lines, rectangles, ellipses and
//! free-form paths. This crate converts between the SVG path strings the
//! renderer draws and an in-memory polygon model, maps pixels to chart data
//! coordinates, recognizes rectangles and ellipses, and turns a committed
//! outline into shape descriptions reconciled against the chart's list.

use pest_derive::Parser;

pub mod chart;
pub mod coords;
pub mod errors;
pub mod log;
pub mod outline;
pub mod parse;
pub mod path;
pub mod shape;
pub mod types;

pub use chart::ChartState;
pub use coords::{
    Axis, AxisSpace, CoordinateSpace, Domain, EditMode, Orientation, PaperSpace, PlotSize, Ref,
    Space,
};
pub use errors::PathError;
pub use outline::{Cursor, DrawGesture, Grab, Marker, OutlineSession, VertexHandle};
pub use path::{Cell, Command, Letter, PolygonSet, VertexId, decode, decode_pixels, encode};
pub use shape::{
    ActiveShape, Classification, DrawMode, DrawStyle, Geometry, ShapeDescription, ShapeUpdate,
    classify, from_corners, is_ellipse, is_rectangle, reconcile, shape_path, synthesize,
    to_corners,
};
pub use types::{Corners, NumericError};

#[derive(Parser)]
#[grammar = "path.pest"]
pub struct PathParser;
