//! Numeric primitives shared by the codec, classifier and mapper.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Absolute tolerance for geometric comparisons.
pub const TOLERANCE: f64 = 1e-6;

/// True when `a` and `b` differ by at most [`TOLERANCE`].
#[inline]
pub fn almost_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= TOLERANCE
}

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NumericError {
    /// Value is NaN
    #[error("value is NaN")]
    NaN,
    /// Value is infinite
    #[error("value is infinite")]
    Infinite,
    /// Value is zero when non-zero required
    #[error("value is zero")]
    Zero,
    /// Value is negative when positive required
    #[error("value is negative")]
    Negative,
}

/// Validate a pixel length (plot width, axis length).
pub(crate) fn positive_length(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Validate an offset or range endpoint (any finite value).
pub(crate) fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Two anchor points of a line, rectangle or ellipse.
///
/// For lines and rectangles these are the endpoints / opposite corners. For
/// ellipses they are either the drag corners (center and 45° point) or the
/// bounding box, depending on which side of `ellipse_bbox` they are on.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Corners {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Corners {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Corners { x0, y0, x1, y1 }
    }

    pub fn from_points(start: DVec2, end: DVec2) -> Self {
        Corners::new(start.x, start.y, end.x, end.y)
    }

    pub fn start(&self) -> DVec2 {
        DVec2::new(self.x0, self.y0)
    }

    pub fn end(&self) -> DVec2 {
        DVec2::new(self.x1, self.y1)
    }

    pub fn center(&self) -> DVec2 {
        (self.start() + self.end()) * 0.5
    }

    /// Check that all four values are finite
    pub fn is_finite(&self) -> bool {
        self.start().is_finite() && self.end().is_finite()
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BBox {
    pub min: DVec2,
    pub max: DVec2,
}

impl Default for BBox {
    fn default() -> Self {
        Self::new()
    }
}

impl BBox {
    /// Create an empty bounding box (will expand on first point)
    pub fn new() -> Self {
        BBox {
            min: DVec2::splat(f64::MAX),
            max: DVec2::splat(f64::MIN),
        }
    }

    /// Check if the bbox is empty (never expanded)
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Expand to include a point
    pub fn expand_point(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Position of `p` inside the box as fractions of width and height.
    ///
    /// Degenerate boxes give non-finite components; callers check.
    pub fn normalize(&self, p: DVec2) -> DVec2 {
        (p - self.min) / (self.max - self.min)
    }
}

impl FromIterator<DVec2> for BBox {
    fn from_iter<I: IntoIterator<Item = DVec2>>(iter: I) -> Self {
        let mut bbox = BBox::new();
        for p in iter {
            bbox.expand_point(p);
        }
        bbox
    }
}
