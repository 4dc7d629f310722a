//! Interactive outline control
//!
//! [`DrawGesture`] covers drawing a new shape, [`OutlineSession`] covers
//! editing an existing outline. Both produce live path strings for the
//! renderer and commit through [`ChartState`](crate::ChartState).

mod gesture;
mod handles;
mod session;

pub use gesture::{DrawGesture, rect_cell};
pub use handles::{Cursor, Marker, VertexHandle, vertex_handles};
pub use session::{Grab, OutlineSession};
