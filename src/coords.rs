//! Pixel <-> data coordinate mapping.
//!
//! A gesture picks one [`Space`] up front: [`AxisSpace`] for shapes anchored
//! to a pair of data axes, [`PaperSpace`] for shapes anchored to the plot
//! area (optionally a sub-plot domain). Both implement [`CoordinateSpace`].

use std::fmt;

use enum_dispatch::enum_dispatch;
use glam::DVec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{NumericError, finite, positive_length};

/// Which frame incoming pixel coordinates are in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
    /// Committing a brand-new shape; pixels are relative to the whole graph
    /// and the plot offset is subtracted first.
    #[default]
    Draw,
    /// Editing the active shape; its rendered path is already plot-relative.
    Edit,
}

/// What a shape's coordinates are measured against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Ref {
    Paper,
    /// Axis id such as `x`, `y2`
    Axis(String),
}

impl fmt::Display for Ref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ref::Paper => f.write_str("paper"),
            Ref::Axis(id) => f.write_str(id),
        }
    }
}

impl From<&str> for Ref {
    fn from(s: &str) -> Self {
        match s {
            "paper" => Ref::Paper,
            id => Ref::Axis(id.to_string()),
        }
    }
}

impl Serialize for Ref {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ref {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Ref::from(s.as_str()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    /// Pixel 0 is the top of the range
    Vertical,
}

/// A linear data axis laid out along `length` pixels starting at `offset`.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    id: String,
    orientation: Orientation,
    range: [f64; 2],
    offset: f64,
    length: f64,
}

impl Axis {
    pub fn try_new(
        id: impl Into<String>,
        orientation: Orientation,
        range: [f64; 2],
        offset: f64,
        length: f64,
    ) -> Result<Self, NumericError> {
        let range = [finite(range[0])?, finite(range[1])?];
        // An empty range has no pixel position for any value.
        if range[0] == range[1] {
            return Err(NumericError::Zero);
        }
        Ok(Axis {
            id: id.into(),
            orientation,
            range,
            offset: finite(offset)?,
            length: positive_length(length)?,
        })
    }

    /// Horizontal axis.
    pub fn x(
        id: impl Into<String>,
        range: [f64; 2],
        offset: f64,
        length: f64,
    ) -> Result<Self, NumericError> {
        Axis::try_new(id, Orientation::Horizontal, range, offset, length)
    }

    /// Vertical axis.
    pub fn y(
        id: impl Into<String>,
        range: [f64; 2],
        offset: f64,
        length: f64,
    ) -> Result<Self, NumericError> {
        Axis::try_new(id, Orientation::Vertical, range, offset, length)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    /// Plot-relative pixel to data value.
    pub fn p2r(&self, px: f64) -> f64 {
        let [r0, r1] = self.range;
        let frac = px / self.length;
        match self.orientation {
            Orientation::Horizontal => r0 + frac * (r1 - r0),
            Orientation::Vertical => r1 - frac * (r1 - r0),
        }
    }

    /// Data value to plot-relative pixel.
    pub fn r2p(&self, value: f64) -> f64 {
        let [r0, r1] = self.range;
        let frac = match self.orientation {
            Orientation::Horizontal => (value - r0) / (r1 - r0),
            Orientation::Vertical => (r1 - value) / (r1 - r0),
        };
        frac * self.length
    }
}

/// Pixel size and top-left margin of the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotSize {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotSize {
    pub fn try_new(left: f64, top: f64, width: f64, height: f64) -> Result<Self, NumericError> {
        Ok(PlotSize {
            left: finite(left)?,
            top: finite(top)?,
            width: positive_length(width)?,
            height: positive_length(height)?,
        })
    }

    pub fn margin(&self) -> DVec2 {
        DVec2::new(self.left, self.top)
    }

    pub fn dimensions(&self) -> DVec2 {
        DVec2::new(self.width, self.height)
    }
}

/// A sub-plot's fractional rectangle within paper space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Conversion between pixels and a shape's data coordinates.
#[enum_dispatch]
pub trait CoordinateSpace {
    fn to_data(&self, pixel: DVec2, mode: EditMode) -> DVec2;
    fn to_pixel(&self, data: DVec2, mode: EditMode) -> DVec2;
    fn xref(&self) -> Ref;
    fn yref(&self) -> Ref;
}

/// Coordinates in units of an axis pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpace {
    pub x: Axis,
    pub y: Axis,
}

impl AxisSpace {
    pub fn new(x: Axis, y: Axis) -> Self {
        AxisSpace { x, y }
    }

    fn offset(&self, mode: EditMode) -> DVec2 {
        match mode {
            EditMode::Draw => DVec2::new(self.x.offset, self.y.offset),
            EditMode::Edit => DVec2::ZERO,
        }
    }
}

impl CoordinateSpace for AxisSpace {
    fn to_data(&self, pixel: DVec2, mode: EditMode) -> DVec2 {
        let p = pixel - self.offset(mode);
        DVec2::new(self.x.p2r(p.x), self.y.p2r(p.y))
    }

    fn to_pixel(&self, data: DVec2, mode: EditMode) -> DVec2 {
        DVec2::new(self.x.r2p(data.x), self.y.r2p(data.y)) + self.offset(mode)
    }

    fn xref(&self) -> Ref {
        Ref::Axis(self.x.id.clone())
    }

    fn yref(&self) -> Ref {
        Ref::Axis(self.y.id.clone())
    }
}

/// Coordinates as fractions of the plot area, or of a sub-plot domain.
#[derive(Debug, Clone, PartialEq)]
pub struct PaperSpace {
    pub size: PlotSize,
    pub domain: Option<Domain>,
}

impl PaperSpace {
    pub fn new(size: PlotSize) -> Self {
        PaperSpace { size, domain: None }
    }

    pub fn with_domain(size: PlotSize, domain: Domain) -> Self {
        PaperSpace {
            size,
            domain: Some(domain),
        }
    }

    fn offset(&self, mode: EditMode) -> DVec2 {
        match mode {
            EditMode::Draw => self.size.margin(),
            EditMode::Edit => DVec2::ZERO,
        }
    }
}

impl CoordinateSpace for PaperSpace {
    fn to_data(&self, pixel: DVec2, mode: EditMode) -> DVec2 {
        let frac = (pixel - self.offset(mode)) / self.size.dimensions();
        match self.domain {
            Some(d) => DVec2::new(d.x[0] + frac.x, d.y[1] - frac.y),
            None => DVec2::new(frac.x, 1.0 - frac.y),
        }
    }

    fn to_pixel(&self, data: DVec2, mode: EditMode) -> DVec2 {
        let frac = match self.domain {
            Some(d) => DVec2::new(data.x - d.x[0], d.y[1] - data.y),
            None => DVec2::new(data.x, 1.0 - data.y),
        };
        frac * self.size.dimensions() + self.offset(mode)
    }

    fn xref(&self) -> Ref {
        Ref::Paper
    }

    fn yref(&self) -> Ref {
        Ref::Paper
    }
}

/// The coordinate space chosen for one gesture.
#[enum_dispatch(CoordinateSpace)]
#[derive(Debug, Clone, PartialEq)]
pub enum Space {
    Axes(AxisSpace),
    Paper(PaperSpace),
}

impl Space {
    /// `(xref, yref)` for shapes drawn in this space.
    pub fn refs(&self) -> (Ref, Ref) {
        (self.xref(), self.yref())
    }
}
