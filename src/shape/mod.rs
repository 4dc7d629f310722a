//! Shape recognition, synthesis and rendering

pub mod classify;
pub mod defaults;
pub mod description;
pub mod ellipse;
pub mod render;
pub mod synth;

pub use classify::{Classification, classify, is_ellipse, is_rectangle};
pub use description::{DrawStyle, FillRule, Geometry, Layer, LineStyle, ShapeDescription};
pub use ellipse::{ellipse_bbox, ellipse_cell, from_corners, to_corners};
pub use render::shape_path;
pub use synth::{ActiveShape, DrawMode, ShapeUpdate, merge_geometry, reconcile, synthesize};
