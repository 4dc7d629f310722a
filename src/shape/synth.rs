//! Shape synthesis and reconciliation
//!
//! Turns the cells of a committed outline into [`ShapeDescription`]s and
//! merges them into the chart's existing list.

use super::classify::{Classification, classify, is_ellipse, is_rectangle};
use super::description::{DrawStyle, Geometry, ShapeDescription};
use super::ellipse::{ellipse_bbox, to_corners};
use crate::coords::{EditMode, Ref};
use crate::log::{debug, trace};
use crate::path::{Cell, PolygonSet, encode_cell};
use crate::types::Corners;

/// What the user is drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawMode {
    Line,
    Rect,
    Circle,
    OpenPath,
    #[default]
    ClosedPath,
}

impl DrawMode {
    /// Mode for re-committing an existing shape.
    pub fn for_shape(shape: &ShapeDescription) -> Self {
        match &shape.geometry {
            Geometry::Line(_) => DrawMode::Line,
            Geometry::Rect(_) => DrawMode::Rect,
            Geometry::Circle(_) => DrawMode::Circle,
            Geometry::Path { path } if path.contains(['Z', 'z']) => DrawMode::ClosedPath,
            Geometry::Path { .. } => DrawMode::OpenPath,
        }
    }

    /// Whether shapes in this mode carry a fill.
    pub fn is_closed(self) -> bool {
        !matches!(self, DrawMode::Line | DrawMode::OpenPath)
    }
}

/// Build one shape description per non-empty cell of `polygons`.
///
/// `polygons` is in data space. `edit` selects how ellipse corners are read
/// back and keeps edited free-form paths from snapping to rect or circle.
pub fn synthesize(
    polygons: &PolygonSet,
    mode: DrawMode,
    style: &DrawStyle,
    refs: (Ref, Ref),
    edit: EditMode,
) -> Vec<ShapeDescription> {
    polygons
        .cells()
        .iter()
        .filter(|cell| !cell.is_empty())
        .filter_map(|cell| {
            let geometry = cell_geometry(cell, mode, edit)?;
            trace!(kind = geometry.type_name(), "synthesized shape");
            Some(ShapeDescription::styled(
                geometry,
                style,
                refs.clone(),
                mode.is_closed(),
            ))
        })
        .collect()
}

fn cell_geometry(cell: &Cell, mode: DrawMode, edit: EditMode) -> Option<Geometry> {
    let path = || Geometry::Path {
        path: encode_cell(cell),
    };

    let geometry = match mode {
        DrawMode::Line => {
            let mut vertices = cell.vertices().map(|(_, p)| p);
            let start = vertices.next()?;
            let end = vertices.next()?;
            Geometry::Line(Corners::from_points(start, end))
        }
        DrawMode::Rect if is_rectangle(cell) => rect_geometry(cell)?,
        // An edited circle keeps its kind; a fresh one must still be an ellipse.
        DrawMode::Circle if edit == EditMode::Edit || is_ellipse(cell) => {
            match to_corners(cell, edit) {
                Some(corners) => Geometry::Circle(ellipse_bbox(corners)),
                None => path(),
            }
        }
        DrawMode::ClosedPath if edit == EditMode::Draw => match classify(cell) {
            Classification::Rect => rect_geometry(cell)?,
            Classification::Ellipse => match to_corners(cell, edit) {
                Some(corners) => Geometry::Circle(ellipse_bbox(corners)),
                None => path(),
            },
            Classification::Path => path(),
        },
        DrawMode::Rect | DrawMode::Circle | DrawMode::ClosedPath | DrawMode::OpenPath => path(),
    };
    Some(geometry)
}

fn rect_geometry(cell: &Cell) -> Option<Geometry> {
    let a = cell.endpoint(0)?;
    let b = cell.endpoint(2)?;
    Some(Geometry::Rect(Corners::from_points(a, b)))
}

/// The shape being edited.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveShape {
    /// Index into the shape list
    pub index: usize,
    /// Geometry synthesized from the outline when editing began. When set,
    /// changes are detected against it instead of the stored record, so a
    /// render/decode cycle that drifts by rounding is not an edit.
    pub baseline: Option<Geometry>,
}

/// Result of committing an outline.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeUpdate {
    pub shapes: Vec<ShapeDescription>,
    /// True when the active shape's geometry was replaced
    pub updated_active_shape: bool,
}

/// Merge freshly synthesized shapes into `shapes`.
///
/// Without an active shape every synthesized record is appended. With one,
/// only its geometry is replaced, and only if the candidate differs exactly
/// from the baseline.
pub fn reconcile(
    shapes: &[ShapeDescription],
    synthesized: Vec<ShapeDescription>,
    active: Option<&ActiveShape>,
) -> ShapeUpdate {
    let mut out = shapes.to_vec();

    let Some((active, stored)) =
        active.and_then(|a| shapes.get(a.index).map(|stored| (a, stored)))
    else {
        debug!(added = synthesized.len(), "appending new shapes");
        out.extend(synthesized);
        return ShapeUpdate {
            shapes: out,
            updated_active_shape: false,
        };
    };

    let Some(candidate) = merge_geometry(&synthesized) else {
        return ShapeUpdate {
            shapes: out,
            updated_active_shape: false,
        };
    };

    let baseline = active.baseline.as_ref().unwrap_or(&stored.geometry);
    if candidate == *baseline {
        debug!(index = active.index, "active shape unchanged");
        return ShapeUpdate {
            shapes: out,
            updated_active_shape: false,
        };
    }

    debug!(index = active.index, "active shape geometry replaced");
    out[active.index].geometry = candidate;
    ShapeUpdate {
        shapes: out,
        updated_active_shape: true,
    }
}

/// Geometry standing for all of `synthesized`: the first record's, or for
/// paths every record's path concatenated.
pub fn merge_geometry(synthesized: &[ShapeDescription]) -> Option<Geometry> {
    let first = synthesized.first()?;
    match &first.geometry {
        Geometry::Path { .. } => {
            let path = synthesized
                .iter()
                .filter_map(|shape| match &shape.geometry {
                    Geometry::Path { path } => Some(path.as_str()),
                    _ => None,
                })
                .collect();
            Some(Geometry::Path { path })
        }
        geometry => Some(geometry.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::decode_pixels;
    use crate::shape::ellipse::from_corners;
    use glam::DVec2;

    fn refs() -> (Ref, Ref) {
        (Ref::Paper, Ref::Paper)
    }

    fn set(path: &str) -> PolygonSet {
        decode_pixels(path).unwrap()
    }

    fn shape(geometry: Geometry) -> ShapeDescription {
        ShapeDescription::styled(geometry, &DrawStyle::default(), refs(), true)
    }

    #[test]
    fn test_rect_mode() {
        let shapes = synthesize(
            &set("M1,1L1,3L4,3L4,1Z"),
            DrawMode::Rect,
            &DrawStyle::default(),
            refs(),
            EditMode::Draw,
        );
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].geometry, Geometry::Rect(Corners::new(1.0, 1.0, 4.0, 3.0)));
        assert!(shapes[0].editable);
        assert!(shapes[0].fillcolor.is_some());
    }

    #[test]
    fn test_rect_mode_falls_back_to_path() {
        let shapes = synthesize(
            &set("M0,0L0,3L5,4L4,0Z"),
            DrawMode::Rect,
            &DrawStyle::default(),
            refs(),
            EditMode::Draw,
        );
        insta::assert_snapshot!(
            serde_json::to_string(&shapes[0].geometry).unwrap(),
            @r#"{"type":"path","path":"M0,0L0,3L5,4L4,0Z"}"#
        );
    }

    #[test]
    fn test_line_mode_ignores_classification() {
        let shapes = synthesize(
            &set("M1,1L1,3L4,3L4,1Z"),
            DrawMode::Line,
            &DrawStyle::default(),
            refs(),
            EditMode::Draw,
        );
        assert_eq!(shapes[0].geometry, Geometry::Line(Corners::new(1.0, 1.0, 1.0, 3.0)));
        assert_eq!(shapes[0].fillcolor, None);
    }

    #[test]
    fn test_line_mode_skips_single_point() {
        let shapes = synthesize(
            &set("M1,1"),
            DrawMode::Line,
            &DrawStyle::default(),
            refs(),
            EditMode::Draw,
        );
        assert!(shapes.is_empty());
    }

    #[test]
    fn test_closed_path_classifies() {
        let ellipse = from_corners(Corners::new(5.0, 5.0, 6.0, 7.0));
        let polygons = PolygonSet::new(vec![
            ellipse,
            Cell::from_points(&[DVec2::ZERO, DVec2::X, DVec2::ONE], true),
        ]);
        let shapes = synthesize(
            &polygons,
            DrawMode::ClosedPath,
            &DrawStyle::default(),
            refs(),
            EditMode::Draw,
        );
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].geometry.type_name(), "circle");
        assert_eq!(shapes[1].geometry.type_name(), "path");
    }

    #[test]
    fn test_edited_closed_path_stays_path() {
        let shapes = synthesize(
            &set("M1,1L1,3L4,3L4,1Z"),
            DrawMode::ClosedPath,
            &DrawStyle::default(),
            refs(),
            EditMode::Edit,
        );
        assert_eq!(shapes[0].geometry.type_name(), "path");
    }

    #[test]
    fn test_for_shape() {
        let closed = shape(Geometry::Path {
            path: "M0,0L1,0L1,1Z".into(),
        });
        let open = shape(Geometry::Path {
            path: "M0,0L1,0".into(),
        });
        assert_eq!(DrawMode::for_shape(&closed), DrawMode::ClosedPath);
        assert_eq!(DrawMode::for_shape(&open), DrawMode::OpenPath);
        assert!(!DrawMode::OpenPath.is_closed());
    }

    #[test]
    fn test_reconcile_appends() {
        let existing = vec![shape(Geometry::Line(Corners::new(0.0, 0.0, 1.0, 1.0)))];
        let new = vec![shape(Geometry::Rect(Corners::new(0.0, 0.0, 2.0, 2.0)))];
        let update = reconcile(&existing, new, None);
        assert_eq!(update.shapes.len(), 2);
        assert_eq!(update.shapes[0], existing[0]);
        assert!(!update.updated_active_shape);
    }

    #[test]
    fn test_reconcile_unchanged() {
        let mut stored = shape(Geometry::Rect(Corners::new(0.0, 0.0, 2.0, 2.0)));
        stored.name = Some("keep me".into());
        let candidate = vec![shape(Geometry::Rect(Corners::new(0.0, 0.0, 2.0, 2.0)))];
        let active = ActiveShape {
            index: 0,
            baseline: None,
        };
        let update = reconcile(std::slice::from_ref(&stored), candidate, Some(&active));
        assert!(!update.updated_active_shape);
        assert_eq!(update.shapes, vec![stored]);
    }

    #[test]
    fn test_reconcile_replaces_geometry_only() {
        let mut stored = shape(Geometry::Rect(Corners::new(0.0, 0.0, 2.0, 2.0)));
        stored.name = Some("keep me".into());
        stored.opacity = 0.5;
        let candidate = vec![shape(Geometry::Rect(Corners::new(0.0, 0.0, 3.0, 2.0)))];
        let active = ActiveShape {
            index: 0,
            baseline: None,
        };
        let update = reconcile(&[stored], candidate, Some(&active));
        assert!(update.updated_active_shape);
        let shape = &update.shapes[0];
        assert_eq!(shape.geometry, Geometry::Rect(Corners::new(0.0, 0.0, 3.0, 2.0)));
        assert_eq!(shape.name.as_deref(), Some("keep me"));
        assert_eq!(shape.opacity, 0.5);
    }

    #[test]
    fn test_reconcile_against_baseline() {
        let stored = shape(Geometry::Path {
            path: "M0,0L1,0L1,1Z".into(),
        });
        // Re-derived geometry drifted, but matches what editing started from.
        let drifted = Geometry::Path {
            path: "M0,0L1.0000000000000002,0L1,1Z".into(),
        };
        let active = ActiveShape {
            index: 0,
            baseline: Some(drifted.clone()),
        };
        let update = reconcile(&[stored], vec![shape(drifted)], Some(&active));
        assert!(!update.updated_active_shape);
    }

    #[test]
    fn test_reconcile_concatenates_paths() {
        let stored = shape(Geometry::Path {
            path: "M0,0L1,0L1,1Z".into(),
        });
        let candidate = vec![
            shape(Geometry::Path {
                path: "M0,0L1,0L1,1Z".into(),
            }),
            shape(Geometry::Path {
                path: "M5,5L6,6".into(),
            }),
        ];
        let active = ActiveShape {
            index: 0,
            baseline: None,
        };
        let update = reconcile(&[stored], candidate, Some(&active));
        assert!(update.updated_active_shape);
        assert_eq!(
            update.shapes[0].geometry,
            Geometry::Path {
                path: "M0,0L1,0L1,1ZM5,5L6,6".into()
            }
        );
    }

    #[test]
    fn test_reconcile_out_of_range_appends() {
        let active = ActiveShape {
            index: 3,
            baseline: None,
        };
        let new = vec![shape(Geometry::Rect(Corners::new(0.0, 0.0, 2.0, 2.0)))];
        let update = reconcile(&[], new, Some(&active));
        assert_eq!(update.shapes.len(), 1);
        assert!(!update.updated_active_shape);
    }

    #[test]
    fn test_circle_mode_needs_ellipse_when_drawing() {
        let cell = from_corners(Corners::new(5.0, 5.0, 6.0, 7.0));
        let p = cell.endpoint(5).unwrap();
        let bent = PolygonSet::new(vec![cell.with_endpoint(5, p + DVec2::new(0.5, 0.0))]);

        let drawn = synthesize(
            &bent,
            DrawMode::Circle,
            &DrawStyle::default(),
            refs(),
            EditMode::Draw,
        );
        assert_eq!(drawn[0].geometry.type_name(), "path");

        let edited = synthesize(
            &bent,
            DrawMode::Circle,
            &DrawStyle::default(),
            refs(),
            EditMode::Edit,
        );
        assert_eq!(edited[0].geometry.type_name(), "circle");
    }
}
