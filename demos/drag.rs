//! Draw a rectangle, then edit it, printing the relayout payloads.
//!
//! Run with `RUST_LOG=drawshape=debug cargo run --example drag --features tracing`.

use drawshape::{
    Axis, AxisSpace, ChartState, DrawGesture, DrawMode, OutlineSession, PlotSize, Space, VertexId,
};
use glam::DVec2;
use miette::IntoDiagnostic;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let size = PlotSize::try_new(80.0, 100.0, 400.0, 300.0).into_diagnostic()?;
    let space = Space::from(AxisSpace::new(
        Axis::x("x", [0.0, 10.0], size.left, size.width).into_diagnostic()?,
        Axis::y("y", [-1.0, 1.0], size.top, size.height).into_diagnostic()?,
    ));
    let mut chart = ChartState::new(size);

    let mut gesture = DrawGesture::new(DrawMode::Rect, DVec2::new(130.0, 150.0));
    for step in 1..=4 {
        let live = gesture.drag(25.0 * f64::from(step), 20.0 * f64::from(step));
        println!("live outline: {live}");
    }
    let update = gesture.finish(&chart, &space);
    chart.shapes = update.shapes;
    println!(
        "drawn: {}",
        serde_json::to_string_pretty(&chart.shapes).into_diagnostic()?
    );

    chart.active_shape = Some(0);
    let mut session = OutlineSession::for_shape(&chart.shapes[0], &space)?;
    for handle in session.handles() {
        println!(
            "handle {:?} at {} cursor {}",
            handle.id,
            handle.position,
            handle.cursor.map_or("none", |c| c.css())
        );
    }
    session.prepare_vertex(VertexId::new(0, 2));
    println!("live outline: {}", session.drag(40.0, -10.0));
    session.done();

    let update = session.commit(&chart, &space);
    println!("updated: {}", update.updated_active_shape);
    println!(
        "edited: {}",
        serde_json::to_string_pretty(&update.shapes).into_diagnostic()?
    );
    Ok(())
}
