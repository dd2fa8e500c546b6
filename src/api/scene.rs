use tracing::trace;

use crate::core::{Measurement, ScreenPoint, ValueRange, Viewport, fit_value_range, project_window};
use crate::error::{ChartError, ChartResult};
use crate::render::{CanvasLayerKind, LayeredRenderFrame};

use super::{AxisLayout, AxisRenderer, ChartConfig, ChartRasterizer};

/// Everything one render pass derives from the visible window.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub viewport: Viewport,
    /// Index of the first visible sample in the full series.
    pub start_index: usize,
    pub range: Option<ValueRange>,
    pub points: Vec<ScreenPoint>,
    pub axis: AxisLayout,
    pub layers: LayeredRenderFrame,
}

impl ChartScene {
    /// Whether the series layer carries a stroke.
    #[must_use]
    pub fn has_series(&self) -> bool {
        self.layers
            .layer(CanvasLayerKind::Series)
            .is_some_and(|layer| !layer.polylines.is_empty())
    }
}

/// Runs the full pass over a window: fit, project, lay out the axis and build
/// the series stroke.
///
/// The axis is always emitted. The series polyline needs at least two samples.
pub fn build_chart_scene(
    window: &[Measurement],
    start_index: usize,
    viewport: Viewport,
    config: &ChartConfig,
) -> ChartResult<ChartScene> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    let style = &config.style;
    let range = fit_value_range(window, config.range_defaults()?);
    let points = match range {
        Some(range) => project_window(window, range, viewport.width_f64(), viewport.height_f64()),
        None => Vec::new(),
    };

    let axis = AxisRenderer::layout(
        range,
        viewport,
        config.gridline_count,
        style.bottom_label_margin_px,
    );
    let mut layers = LayeredRenderFrame::new(viewport);
    AxisRenderer::append_primitives(&axis, &mut layers, style);
    if points.len() >= 2 {
        let polyline =
            ChartRasterizer::polyline(&points, style.series_stroke_width, style.series_color)?;
        layers.push_polyline(CanvasLayerKind::Series, polyline);
    }

    trace!(
        samples = window.len(),
        start_index,
        width = viewport.width,
        height = viewport.height,
        "built chart scene"
    );
    Ok(ChartScene {
        viewport,
        start_index,
        range,
        points,
        axis,
        layers,
    })
}
