use std::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{Point, Primitive};
use embedded_graphics::primitives::{Line, Polyline, PrimitiveStyle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use embedded_graphics::Drawable;
use tracing::trace;

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, LinePrimitive, MAX_RASTER_DIMENSION_PX, PolylinePrimitive, RasterImage, RenderFrame,
    Renderer, TextHAlign, TextPrimitive,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterRenderStats {
    pub rects_drawn: usize,
    pub lines_drawn: usize,
    pub polylines_drawn: usize,
    pub texts_drawn: usize,
}

/// Pure-Rust renderer drawing frames into an owned [`RasterImage`].
///
/// The image follows the frame viewport, up to [`MAX_RASTER_DIMENSION_PX`] per
/// edge. Without a clear color the image starts transparent, which is what
/// cached layers need.
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    image: RasterImage,
    clear_color: Option<Color>,
    last_stats: RasterRenderStats,
}

impl RasterRenderer {
    pub fn new(viewport: Viewport) -> ChartResult<Self> {
        check_raster_viewport(viewport)?;
        Ok(Self {
            image: RasterImage::for_viewport(viewport),
            clear_color: None,
            last_stats: RasterRenderStats::default(),
        })
    }

    pub fn with_clear_color(mut self, color: Color) -> ChartResult<Self> {
        color.validate()?;
        self.clear_color = Some(color);
        Ok(self)
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "embedded-graphics"
    }

    #[must_use]
    pub fn image(&self) -> &RasterImage {
        &self.image
    }

    #[must_use]
    pub fn into_image(self) -> RasterImage {
        self.image
    }

    #[must_use]
    pub fn last_stats(&self) -> RasterRenderStats {
        self.last_stats
    }

    fn clear_color(&self) -> Color {
        self.clear_color
            .unwrap_or_else(|| Color::rgba(0.0, 0.0, 0.0, 0.0))
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        if self.image.viewport() != frame.viewport {
            check_raster_viewport(frame.viewport)?;
            self.image = RasterImage::for_viewport(frame.viewport);
        }
        self.image.clear(self.clear_color());

        let mut stats = RasterRenderStats::default();

        for rect in &frame.rects {
            self.image
                .fill_rect(rect.x, rect.y, rect.width, rect.height, rect.fill_color);
            stats.rects_drawn += 1;
        }
        for line in &frame.lines {
            draw_line(&mut self.image, line);
            stats.lines_drawn += 1;
        }
        for polyline in &frame.polylines {
            draw_polyline(&mut self.image, polyline);
            stats.polylines_drawn += 1;
        }
        for text in &frame.texts {
            draw_text(&mut self.image, text);
            stats.texts_drawn += 1;
        }

        trace!(
            width = frame.viewport.width,
            height = frame.viewport.height,
            lines = stats.lines_drawn,
            polylines = stats.polylines_drawn,
            texts = stats.texts_drawn,
            "rasterized frame"
        );
        self.last_stats = stats;
        Ok(())
    }

    fn clear(&mut self) {
        self.image.clear(self.clear_color());
        self.last_stats = RasterRenderStats::default();
    }
}

fn check_raster_viewport(viewport: Viewport) -> ChartResult<()> {
    if !viewport.is_valid()
        || viewport.width > MAX_RASTER_DIMENSION_PX
        || viewport.height > MAX_RASTER_DIMENSION_PX
    {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}

fn draw_line(image: &mut RasterImage, line: &LinePrimitive) {
    let (color, alpha) = split_color(line.color);
    let style = PrimitiveStyle::with_stroke(color, stroke_px(line.stroke_width));
    let shape = Line::new(to_point(line.x1, line.y1), to_point(line.x2, line.y2));
    infallible(shape.into_styled(style).draw(&mut image.blend_target(alpha)));
}

fn draw_polyline(image: &mut RasterImage, polyline: &PolylinePrimitive) {
    let (color, alpha) = split_color(polyline.color);
    let vertices: Vec<Point> = polyline
        .points
        .iter()
        .map(|point| to_point(point.x, point.y))
        .collect();
    let style = PrimitiveStyle::with_stroke(color, stroke_px(polyline.stroke_width));
    infallible(
        Polyline::new(&vertices)
            .into_styled(style)
            .draw(&mut image.blend_target(alpha)),
    );
}

fn draw_text(image: &mut RasterImage, text: &TextPrimitive) {
    let (color, alpha) = split_color(text.color);
    let character_style = MonoTextStyle::new(font_for_size(text.font_size_px), color);
    let alignment = match text.h_align {
        TextHAlign::Left => Alignment::Left,
        TextHAlign::Center => Alignment::Center,
        TextHAlign::Right => Alignment::Right,
    };
    let text_style = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    let drawable = Text::with_text_style(
        &text.text,
        to_point(text.x, text.y),
        character_style,
        text_style,
    );
    infallible(drawable.draw(&mut image.blend_target(alpha)));
}

/// Closest bundled mono font to the requested pixel height.
fn font_for_size(font_size_px: f64) -> &'static MonoFont<'static> {
    if font_size_px < 12.0 {
        &FONT_6X10
    } else if font_size_px < 17.0 {
        &FONT_7X13
    } else {
        &FONT_10X20
    }
}

fn split_color(color: Color) -> (Rgb888, u8) {
    let [red, green, blue, alpha] = color.to_rgba8();
    (Rgb888::new(red, green, blue), alpha)
}

fn stroke_px(stroke_width: f64) -> u32 {
    stroke_width.round().max(1.0) as u32
}

fn to_point(x: f64, y: f64) -> Point {
    Point::new(x.round() as i32, y.round() as i32)
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::RasterRenderer;
    use crate::core::Viewport;
    use crate::error::ChartError;
    use crate::render::{
        MAX_RASTER_DIMENSION_PX,
        Color, LinePrimitive, PathPoint, PolylinePrimitive, RectPrimitive, RenderFrame, Renderer,
        TextHAlign, TextPrimitive,
    };

    #[test]
    fn draws_background_line_and_label() {
        let viewport = Viewport::new(40, 30);
        let frame = RenderFrame::new(viewport)
            .with_rect(RectPrimitive::new(
                0.0,
                0.0,
                40.0,
                30.0,
                Color::from_rgba8(0xAD, 0xD8, 0xE6, 0xFF),
            ))
            .with_line(LinePrimitive::new(
                0.0,
                10.0,
                40.0,
                10.0,
                1.0,
                Color::rgb(0.0, 0.0, 0.0),
            ))
            .with_text(TextPrimitive::new(
                "80.0",
                1.0,
                12.0,
                10.0,
                Color::rgb(0.0, 0.0, 0.0),
                TextHAlign::Left,
            ));

        let mut renderer = RasterRenderer::new(viewport).expect("renderer");
        renderer.render(&frame).expect("render");

        let image = renderer.image();
        assert_eq!(image.pixel(39, 29), Some([0xAD, 0xD8, 0xE6, 0xFF]));
        assert_eq!(image.pixel(20, 10), Some([0, 0, 0, 0xFF]));
        assert_eq!(renderer.last_stats().texts_drawn, 1);
    }

    #[test]
    fn transparent_renderer_only_paints_stroke_pixels() {
        let viewport = Viewport::new(20, 20);
        let frame = RenderFrame::new(viewport).with_polyline(PolylinePrimitive::new(
            vec![PathPoint { x: 0.0, y: 0.0 }, PathPoint { x: 19.0, y: 19.0 }],
            2.0,
            Color::rgb(1.0, 0.0, 0.0),
        ));

        let mut renderer = RasterRenderer::new(viewport).expect("renderer");
        renderer.render(&frame).expect("render");

        let painted = renderer.image().painted_pixel_count();
        assert!(painted >= 20);
        assert!(painted < 400);
        assert_eq!(renderer.image().pixel(19, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn invalid_viewport_is_rejected() {
        assert!(RasterRenderer::new(Viewport::new(0, 10)).is_err());
    }

    #[test]
    fn oversized_viewport_is_rejected_without_allocating() {
        assert!(RasterRenderer::new(Viewport::new(100_000, 100_000)).is_err());
        assert!(RasterRenderer::new(Viewport::new(MAX_RASTER_DIMENSION_PX, 1)).is_ok());

        let mut renderer = RasterRenderer::new(Viewport::new(10, 10)).expect("renderer");
        let err = renderer
            .render(&RenderFrame::new(Viewport::new(MAX_RASTER_DIMENSION_PX + 1, 10)))
            .expect_err("oversized frame must fail");
        assert!(matches!(err, ChartError::InvalidViewport { .. }));
        assert_eq!(renderer.image().viewport(), Viewport::new(10, 10));
    }

    #[test]
    fn clear_restores_clear_color() {
        let viewport = Viewport::new(8, 8);
        let background = Color::from_rgba8(0xAD, 0xD8, 0xE6, 0xFF);
        let mut renderer = RasterRenderer::new(viewport)
            .expect("renderer")
            .with_clear_color(background)
            .expect("clear color");
        let frame = RenderFrame::new(viewport).with_line(LinePrimitive::new(
            0.0,
            4.0,
            8.0,
            4.0,
            1.0,
            Color::rgb(1.0, 0.0, 0.0),
        ));
        renderer.render(&frame).expect("render");
        assert_eq!(renderer.image().pixel(3, 4), Some([255, 0, 0, 255]));
        assert_eq!(renderer.image().pixel(3, 0), Some([0xAD, 0xD8, 0xE6, 0xFF]));

        renderer.clear();
        assert!(
            renderer
                .image()
                .pixels()
                .iter()
                .all(|pixel| *pixel == [0xAD, 0xD8, 0xE6, 0xFF])
        );
    }
}
