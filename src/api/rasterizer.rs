use crate::core::{ScreenPoint, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, PathPoint, PolylinePrimitive, RasterImage, RasterRenderer, RenderFrame, Renderer,
};

/// Turns projected samples into the series stroke.
pub struct ChartRasterizer;

impl ChartRasterizer {
    /// Builds an open polyline visiting `points` in order.
    ///
    /// Fewer than two points cannot form a segment and are rejected; callers
    /// are expected to check the window length first.
    pub fn polyline(
        points: &[ScreenPoint],
        stroke_width: f64,
        color: Color,
    ) -> ChartResult<PolylinePrimitive> {
        if points.len() < 2 {
            return Err(ChartError::InvalidData(format!(
                "series polyline needs at least two points, got {}",
                points.len()
            )));
        }
        let path = points
            .iter()
            .map(|point| PathPoint {
                x: point.x,
                y: point.y,
            })
            .collect();
        Ok(PolylinePrimitive::new(path, stroke_width, color))
    }

    /// Renders the series stroke into a transparent buffer of `viewport` size.
    pub fn rasterize(
        points: &[ScreenPoint],
        viewport: Viewport,
        stroke_width: f64,
        color: Color,
    ) -> ChartResult<RasterImage> {
        let polyline = Self::polyline(points, stroke_width, color)?;
        let mut renderer = RasterRenderer::new(viewport)?;
        renderer.render(&RenderFrame::new(viewport).with_polyline(polyline))?;
        Ok(renderer.into_image())
    }
}

#[cfg(test)]
mod tests {
    use super::ChartRasterizer;
    use crate::core::{ScreenPoint, Viewport};
    use crate::render::Color;

    fn point(x: f64, y: f64) -> ScreenPoint {
        ScreenPoint {
            x,
            y,
            source_value: 0,
        }
    }

    #[test]
    fn polyline_keeps_point_order() {
        let points = [point(0.0, 5.0), point(10.0, 1.0), point(20.0, 3.0)];
        let polyline =
            ChartRasterizer::polyline(&points, 2.0, Color::rgb(1.0, 0.0, 0.0)).expect("polyline");
        assert_eq!(polyline.segment_count(), 2);
        assert_eq!(polyline.points[0].y, 5.0);
        assert_eq!(polyline.points[2].x, 20.0);
    }

    #[test]
    fn single_point_is_rejected() {
        let result = ChartRasterizer::polyline(&[point(0.0, 0.0)], 2.0, Color::rgb(1.0, 0.0, 0.0));
        assert!(result.is_err());
    }

    #[test]
    fn rasterized_stroke_leaves_background_transparent() {
        let points = [point(0.0, 10.0), point(30.0, 10.0)];
        let image = ChartRasterizer::rasterize(
            &points,
            Viewport::new(40, 20),
            2.0,
            Color::rgb(1.0, 0.0, 0.0),
        )
        .expect("raster");
        assert_eq!(image.pixel(15, 10), Some([255, 0, 0, 255]));
        assert_eq!(image.pixel(35, 2), Some([0, 0, 0, 0]));
    }
}
