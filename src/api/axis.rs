use smallvec::SmallVec;

use crate::core::{ValueRange, Viewport};
use crate::render::{
    CanvasLayerKind, LayeredRenderFrame, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};

use super::RenderStyle;

/// One value label on the left edge of the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLabel {
    pub value: f64,
    pub text: String,
    /// Top edge of the label box.
    pub y: f64,
}

/// Gridline rows and value labels of one render pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxisLayout {
    pub gridlines_y: SmallVec<[f64; 8]>,
    pub labels: SmallVec<[AxisLabel; 8]>,
}

/// Computes gridlines and value labels and emits them as layer primitives.
pub struct AxisRenderer;

impl AxisRenderer {
    /// Lays out `gridline_count + 1` evenly spaced gridlines from the top to the
    /// bottom edge. Labels are only produced when a range exists.
    #[must_use]
    pub fn layout(
        range: Option<ValueRange>,
        viewport: Viewport,
        gridline_count: usize,
        bottom_label_margin_px: f64,
    ) -> AxisLayout {
        let mut layout = AxisLayout::default();
        if gridline_count == 0 {
            return layout;
        }
        let height = viewport.height_f64();
        let step_y = height / gridline_count as f64;
        layout
            .gridlines_y
            .extend((0..=gridline_count).map(|row| row as f64 * step_y));

        let Some(range) = range else {
            return layout;
        };
        let step_value = range.buffered_span() / gridline_count as f64;
        layout.labels.extend((0..=gridline_count).map(|row| {
            let (value, y) = if row == 0 {
                (range.max_buffered, 0.0)
            } else if row == gridline_count {
                (range.min_buffered, height - bottom_label_margin_px)
            } else {
                (
                    range.max_buffered - row as f64 * step_value,
                    row as f64 * step_y,
                )
            };
            AxisLabel {
                value,
                text: format_axis_value(value),
                y,
            }
        }));
        layout
    }

    /// Appends the background fill plus gridline and label primitives.
    pub fn append_primitives(
        layout: &AxisLayout,
        layered: &mut LayeredRenderFrame,
        style: &RenderStyle,
    ) {
        let width = layered.viewport.width_f64();
        let height = layered.viewport.height_f64();

        layered.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(0.0, 0.0, width, height, style.background_color),
        );
        for y in &layout.gridlines_y {
            layered.push_line(
                CanvasLayerKind::Grid,
                LinePrimitive::new(0.0, *y, width, *y, style.gridline_width, style.gridline_color),
            );
        }
        for label in &layout.labels {
            layered.push_text(
                CanvasLayerKind::Axis,
                TextPrimitive::new(
                    label.text.clone(),
                    style.label_left_margin_px,
                    label.y,
                    style.label_font_size_px,
                    style.label_color,
                    TextHAlign::Left,
                ),
            );
        }
    }
}

/// Formats an axis value with one decimal place.
#[must_use]
pub fn format_axis_value(value: f64) -> String {
    format!("{value:.1}")
}

#[cfg(test)]
mod tests {
    use super::{AxisRenderer, format_axis_value};
    use crate::core::{Measurement, RangeDefaults, Viewport, fit_value_range};

    #[test]
    fn labels_step_down_from_buffered_max() {
        let window = [Measurement::now(85)];
        let range = fit_value_range(&window, RangeDefaults::default());
        let layout = AxisRenderer::layout(range, Viewport::new(300, 200), 5, 24.0);

        assert_eq!(layout.gridlines_y.len(), 6);
        assert_eq!(layout.gridlines_y[5], 200.0);
        let texts: Vec<&str> = layout.labels.iter().map(|label| label.text.as_str()).collect();
        assert_eq!(texts, ["103.0", "95.8", "88.6", "81.4", "74.2", "67.0"]);
        assert_eq!(layout.labels[2].y, 80.0);
        assert_eq!(layout.labels[5].y, 176.0);
    }

    #[test]
    fn missing_range_draws_gridlines_only() {
        let layout = AxisRenderer::layout(None, Viewport::new(100, 100), 5, 24.0);
        assert_eq!(layout.gridlines_y.len(), 6);
        assert!(layout.labels.is_empty());
    }

    #[test]
    fn axis_values_use_one_decimal() {
        assert_eq!(format_axis_value(67.0), "67.0");
        assert_eq!(format_axis_value(95.84), "95.8");
    }
}
