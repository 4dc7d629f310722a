//! Path model and codec
//!
//! Path strings decode into a [`PolygonSet`] of [`Cell`]s, each a run of
//! normalized [`Command`]s. Encoding writes the set back out.

mod codec;
mod command;
mod path_builder;
mod polygon;

pub use codec::{EMPTY_PATH, decode, decode_pixels, encode, encode_cell};
pub(crate) use codec::fmt_num;
pub use command::{Command, Letter};
pub use path_builder::PathBuilder;
pub use polygon::{Cell, MIN_VERTICES, PolygonSet, VertexId};
