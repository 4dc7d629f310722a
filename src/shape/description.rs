//! Shape description records.
//!
//! These are the externally visible shapes: a type with its anchors plus
//! style. They serialize to the flat JSON the chart layout stores, e.g.
//! `{"type":"rect","x0":1.25,...,"xref":"x","line":{...}}`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::defaults;
use crate::coords::Ref;
use crate::types::Corners;

/// Shape type and anchors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Geometry {
    Line(Corners),
    Rect(Corners),
    /// Anchors are the ellipse's bounding box.
    Circle(Corners),
    Path { path: String },
}

impl Geometry {
    pub fn corners(&self) -> Option<Corners> {
        match self {
            Geometry::Line(c) | Geometry::Rect(c) | Geometry::Circle(c) => Some(*c),
            Geometry::Path { .. } => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Line(_) => "line",
            Geometry::Rect(_) => "rect",
            Geometry::Circle(_) => "circle",
            Geometry::Path { .. } => "path",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    #[default]
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    EvenOdd,
    NonZero,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: String,
}

impl Default for LineStyle {
    fn default() -> Self {
        LineStyle {
            color: defaults::LINE_COLOR.to_string(),
            width: defaults::LINE_WIDTH,
            dash: defaults::LINE_DASH.to_string(),
        }
    }
}

/// Style applied to newly drawn shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawStyle {
    pub layer: Layer,
    pub opacity: f64,
    pub fillcolor: String,
    pub fillrule: FillRule,
    pub line: LineStyle,
}

impl Default for DrawStyle {
    fn default() -> Self {
        DrawStyle {
            layer: Layer::default(),
            opacity: defaults::OPACITY,
            fillcolor: defaults::FILL_COLOR.to_string(),
            fillrule: FillRule::default(),
            line: LineStyle::default(),
        }
    }
}

/// One shape on the chart.
///
/// Keys the engine does not model (`visible`, `label`, ...) are kept in
/// `extra` and written back untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct ShapeDescription {
    #[serde(flatten)]
    pub geometry: Geometry,
    pub editable: bool,
    pub xref: Ref,
    pub yref: Ref,
    pub layer: Layer,
    pub opacity: f64,
    pub line: LineStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillrule: Option<FillRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Keys owned by [`ShapeDescription`]'s typed fields.
const MODELED_KEYS: &[&str] = &[
    "type", "x0", "y0", "x1", "y1", "path", "editable", "xref", "yref", "layer", "opacity",
    "line", "fillcolor", "fillrule", "name",
];

/// The typed part of a stored shape.
#[derive(Deserialize)]
struct ModeledFields {
    #[serde(flatten)]
    geometry: Geometry,
    #[serde(default)]
    editable: bool,
    xref: Ref,
    yref: Ref,
    #[serde(default)]
    layer: Layer,
    #[serde(default = "default_opacity")]
    opacity: f64,
    #[serde(default)]
    line: LineStyle,
    #[serde(default)]
    fillcolor: Option<String>,
    #[serde(default)]
    fillrule: Option<FillRule>,
    #[serde(default)]
    name: Option<String>,
}

impl TryFrom<Map<String, Value>> for ShapeDescription {
    type Error = serde_json::Error;

    fn try_from(mut input: Map<String, Value>) -> Result<Self, Self::Error> {
        let fields: ModeledFields = serde_json::from_value(Value::Object(input.clone()))?;
        input.retain(|key, _| !MODELED_KEYS.contains(&key.as_str()));
        Ok(ShapeDescription {
            geometry: fields.geometry,
            editable: fields.editable,
            xref: fields.xref,
            yref: fields.yref,
            layer: fields.layer,
            opacity: fields.opacity,
            line: fields.line,
            fillcolor: fields.fillcolor,
            fillrule: fields.fillrule,
            name: fields.name,
            extra: input,
        })
    }
}

fn default_opacity() -> f64 {
    defaults::OPACITY
}

impl ShapeDescription {
    /// A shape with `geometry` styled by `style`; fill is only set for
    /// closed kinds.
    pub fn styled(geometry: Geometry, style: &DrawStyle, refs: (Ref, Ref), closed: bool) -> Self {
        let (xref, yref) = refs;
        ShapeDescription {
            geometry,
            editable: true,
            xref,
            yref,
            layer: style.layer,
            opacity: style.opacity,
            line: style.line.clone(),
            fillcolor: closed.then(|| style.fillcolor.clone()),
            fillrule: closed.then_some(style.fillrule),
            name: None,
            extra: Map::new(),
        }
    }
}
