//! Chart state seen by the shape engine.
//!
//! The engine reads the shape list, style and active shape from here and
//! hands back a new list; it never writes into the chart.

use crate::coords::{CoordinateSpace, EditMode, PaperSpace, PlotSize};
use crate::log::{debug, warn};
use crate::path::decode;
use crate::shape::{
    ActiveShape, DrawMode, DrawStyle, Geometry, ShapeDescription, ShapeUpdate, merge_geometry,
    reconcile, synthesize,
};

#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub shapes: Vec<ShapeDescription>,
    /// Style for newly drawn shapes
    pub style: DrawStyle,
    pub size: PlotSize,
    /// Index of the shape open for editing
    pub active_shape: Option<usize>,
    pub draw_mode: DrawMode,
}

impl ChartState {
    pub fn new(size: PlotSize) -> Self {
        ChartState {
            shapes: Vec::new(),
            style: DrawStyle::default(),
            size,
            active_shape: None,
            draw_mode: DrawMode::default(),
        }
    }

    /// Paper coordinates over this chart's plot area.
    pub fn paper_space(&self) -> PaperSpace {
        PaperSpace::new(self.size)
    }

    pub fn active(&self) -> Option<&ShapeDescription> {
        self.shapes.get(self.active_shape?)
    }

    /// Mode a commit is interpreted in: the active shape's own kind while
    /// editing, otherwise the chart's draw mode.
    pub fn commit_mode(&self, edit: EditMode) -> DrawMode {
        match (edit, self.active()) {
            (EditMode::Edit, Some(shape)) => DrawMode::for_shape(shape),
            _ => self.draw_mode,
        }
    }

    /// Decode, synthesize and reconcile a committed outline.
    ///
    /// A path that does not decode leaves the shape list unchanged.
    pub fn commit_path<S>(&self, path: &str, space: &S, edit: EditMode) -> ShapeUpdate
    where
        S: CoordinateSpace + ?Sized,
    {
        self.commit(path, space, edit, None)
    }

    /// Commit an edit of the active shape, detecting changes against the
    /// outline `initial` the edit started from.
    pub fn commit_edit<S>(&self, initial: &str, path: &str, space: &S) -> ShapeUpdate
    where
        S: CoordinateSpace + ?Sized,
    {
        let baseline = match decode(initial, space, EditMode::Edit) {
            Ok(polygons) => merge_geometry(&synthesize(
                &polygons,
                self.commit_mode(EditMode::Edit),
                &self.style,
                (space.xref(), space.yref()),
                EditMode::Edit,
            )),
            Err(_err) => {
                warn!(error = %_err, "initial outline does not decode");
                None
            }
        };
        self.commit(path, space, EditMode::Edit, baseline)
    }

    fn commit<S>(
        &self,
        path: &str,
        space: &S,
        edit: EditMode,
        baseline: Option<Geometry>,
    ) -> ShapeUpdate
    where
        S: CoordinateSpace + ?Sized,
    {
        let unchanged = || ShapeUpdate {
            shapes: self.shapes.clone(),
            updated_active_shape: false,
        };

        let polygons = match decode(path, space, edit) {
            Ok(polygons) => polygons,
            Err(_err) => {
                warn!(error = %_err, "committed path does not decode");
                return unchanged();
            }
        };

        let mode = self.commit_mode(edit);
        debug!(?mode, ?edit, cells = polygons.len(), "committing outline");
        let synthesized = synthesize(
            &polygons,
            mode,
            &self.style,
            (space.xref(), space.yref()),
            edit,
        );

        let active = match edit {
            EditMode::Edit => self.active_shape.map(|index| ActiveShape { index, baseline }),
            EditMode::Draw => None,
        };
        reconcile(&self.shapes, synthesized, active.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::{Axis, AxisSpace, Space};
    use crate::shape::shape_path;
    use crate::types::Corners;

    fn space() -> Space {
        Space::from(AxisSpace::new(
            Axis::x("x", [0.0, 10.0], 0.0, 400.0).unwrap(),
            Axis::y("y", [0.0, 10.0], 0.0, 400.0).unwrap(),
        ))
    }

    fn chart() -> ChartState {
        ChartState::new(PlotSize::try_new(0.0, 0.0, 400.0, 400.0).unwrap())
    }

    #[test]
    fn test_commit_new_rect() {
        let mut chart = chart();
        chart.draw_mode = DrawMode::Rect;
        let update = chart.commit_path("M0,0L0,40L40,40L40,0Z", &space(), EditMode::Draw);
        assert_eq!(update.shapes.len(), 1);
        assert_eq!(
            update.shapes[0].geometry,
            Geometry::Rect(Corners::new(0.0, 10.0, 1.0, 9.0))
        );
        assert!(chart.shapes.is_empty());
    }

    #[test]
    fn test_undecodable_commit_is_noop() {
        let mut chart = chart();
        chart.draw_mode = DrawMode::Rect;
        let update = chart.commit_path("L0,0", &space(), EditMode::Draw);
        assert!(update.shapes.is_empty());
        assert!(!update.updated_active_shape);
    }

    #[test]
    fn test_commit_edit_unchanged() {
        let mut chart = chart();
        chart.shapes = chart
            .commit_path(
                "M0,0L40,40L80,0L100,100Z",
                &space(),
                EditMode::Draw,
            )
            .shapes;
        chart.active_shape = Some(0);

        let active = chart.active().unwrap().clone();
        let initial = shape_path(&active, &space()).unwrap();
        let update = chart.commit_edit(&initial, &initial, &space());
        assert!(!update.updated_active_shape);
        assert_eq!(update.shapes, chart.shapes);
    }

    #[test]
    fn test_commit_edit_moves_line() {
        let mut chart = chart();
        chart.shapes = vec![ShapeDescription::styled(
            Geometry::Line(Corners::new(0.0, 10.0, 1.0, 9.0)),
            &chart.style,
            (space().xref(), space().yref()),
            false,
        )];
        chart.active_shape = Some(0);

        let initial = "M0,0L40,40";
        let update = chart.commit_edit(initial, "M0,0L80,40", &space());
        assert!(update.updated_active_shape);
        assert_eq!(
            update.shapes[0].geometry,
            Geometry::Line(Corners::new(0.0, 10.0, 2.0, 9.0))
        );
    }

    #[test]
    fn test_edit_keeps_unmodeled_keys() {
        let mut chart = chart();
        chart.shapes = vec![
            serde_json::from_str(
                r#"{"type":"line","x0":0,"y0":10,"x1":1,"y1":9,"xref":"x","yref":"y",
                    "editable":true,"showlegend":true,"legendgroup":"notes"}"#,
            )
            .unwrap(),
        ];
        chart.active_shape = Some(0);

        let update = chart.commit_edit("M0,0L40,40", "M0,0L80,40", &space());
        assert!(update.updated_active_shape);
        let json = serde_json::to_value(&update.shapes[0]).unwrap();
        assert_eq!(json["x1"], 2.0);
        assert_eq!(json["showlegend"], true);
        assert_eq!(json["legendgroup"], "notes");
    }

    #[test]
    fn test_paper_space_uses_plot_size() {
        let chart = ChartState::new(PlotSize::try_new(10.0, 20.0, 200.0, 100.0).unwrap());
        let paper = chart.paper_space();
        assert_eq!(paper.size, chart.size);

        let mut chart = chart;
        chart.draw_mode = DrawMode::Line;
        let update = chart.commit_path("M10,120L210,20", &paper, EditMode::Draw);
        assert_eq!(
            update.shapes[0].geometry,
            Geometry::Line(Corners::new(0.0, 0.0, 1.0, 1.0))
        );
    }
}
