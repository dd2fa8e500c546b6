#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use pulse_chart::core::{Measurement, Viewport};
use pulse_chart::render::{CairoContextRenderer, CairoRenderer};
use pulse_chart::{ChartConfig, ChartError, ChartSession, SimpleChart};

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidViewport { .. }));
}

#[test]
fn cairo_renderer_draws_axis_and_series() {
    let renderer = CairoRenderer::new(400, 240).expect("renderer");
    let mut session = ChartSession::new(
        SimpleChart::new(renderer),
        ChartConfig::default(),
        Viewport::new(400, 240),
    )
    .expect("session");
    for value in [72, 88, 95, 81] {
        session
            .add_measurement(Measurement::now(value))
            .expect("append");
    }

    let stats = session.view().renderer().last_stats();
    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.lines_drawn, 6);
    assert_eq!(stats.polylines_drawn, 1);
    assert_eq!(stats.texts_drawn, 6);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut session = ChartSession::new(
        SimpleChart::new(CairoRenderer::new(300, 200).expect("renderer")),
        ChartConfig::default(),
        Viewport::new(300, 200),
    )
    .expect("session");
    session
        .add_measurement(Measurement::now(80))
        .expect("append");
    session
        .add_measurement(Measurement::now(90))
        .expect("append");
    let frame = session.view().last_frame().expect("frame").clone();

    let surface = ImageSurface::create(Format::ARgb32, 300, 200).expect("surface");
    let context = Context::new(&surface).expect("context");
    let renderer = session.view_mut().renderer_mut();
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().polylines_drawn, 1);
}
