//! Default drawing style and polygon resolution

/// Sides of the polygon approximating an ellipse. Must be divisible by 8.
pub const CIRCLE_SIDES: usize = 32;

pub const OPACITY: f64 = 1.0;
pub const FILL_COLOR: &str = "rgba(0,0,0,0)";
pub const LINE_COLOR: &str = "#444";
pub const LINE_WIDTH: f64 = 4.0;
pub const LINE_DASH: &str = "solid";

const _: () = assert!(CIRCLE_SIDES % 8 == 0);
