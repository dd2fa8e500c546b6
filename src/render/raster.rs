use std::convert::Infallible;

use embedded_graphics::Pixel;
use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Size};

use crate::core::Viewport;
use crate::render::Color;

/// Largest raster edge, in pixels, a renderer will allocate.
pub const MAX_RASTER_DIMENSION_PX: u32 = 16_384;

/// Source rectangle, in raster pixels, sampled when compositing a cached layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Straight-alpha RGBA8 pixel buffer.
///
/// Layers are rasterized into these once per data or resize event; pointer
/// moves only crop and blit them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl RasterImage {
    /// Creates a fully transparent image.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0, 0]; width as usize * height as usize],
        }
    }

    #[must_use]
    pub fn for_viewport(viewport: Viewport) -> Self {
        Self::new(viewport.width, viewport.height)
    }

    #[must_use]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut image = Self::new(width, height);
        image.clear(color);
        image
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    #[must_use]
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Counts pixels with any coverage.
    #[must_use]
    pub fn painted_pixel_count(&self) -> usize {
        self.pixels.iter().filter(|pixel| pixel[3] > 0).count()
    }

    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        self.pixels.fill(rgba);
    }

    /// Blends one pixel over the current content. Out-of-bounds writes are dropped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if x < 0 || y < 0 {
            return;
        }
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if let Some(index) = self.index(x, y) {
            self.pixels[index] = blend_over(rgba, self.pixels[index]);
        }
    }

    pub fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, color: Color) {
        let rgba = color.to_rgba8();
        let x0 = x.round().max(0.0) as i64;
        let y0 = y.round().max(0.0) as i64;
        let x1 = (x + width).round().min(f64::from(self.width)) as i64;
        let y1 = (y + height).round().min(f64::from(self.height)) as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend_pixel(px, py, rgba);
            }
        }
    }

    /// Replaces size and content with `source`, keeping the allocation.
    pub fn copy_from(&mut self, source: &RasterImage) {
        self.width = source.width;
        self.height = source.height;
        self.pixels.clear();
        self.pixels.extend_from_slice(&source.pixels);
    }

    /// Stretches `region` of `source` over this whole image with nearest
    /// neighbour sampling and blends it over the current content.
    pub fn draw_scaled_region(&mut self, source: &RasterImage, region: SourceRect) {
        if region.is_empty() || source.width == 0 || source.height == 0 {
            return;
        }
        let scale_x = region.width / f64::from(self.width.max(1));
        let scale_y = region.height / f64::from(self.height.max(1));
        let max_x = f64::from(source.width - 1);
        let max_y = f64::from(source.height - 1);

        for dy in 0..self.height {
            let sy = (region.y + (f64::from(dy) + 0.5) * scale_y)
                .floor()
                .clamp(0.0, max_y) as u32;
            for dx in 0..self.width {
                let sx = (region.x + (f64::from(dx) + 0.5) * scale_x)
                    .floor()
                    .clamp(0.0, max_x) as u32;
                let src = source.pixels[(sy * source.width + sx) as usize];
                let index = (dy * self.width + dx) as usize;
                self.pixels[index] = blend_over(src, self.pixels[index]);
            }
        }
    }

    /// Drawing surface for `embedded-graphics` primitives painted with `alpha`.
    pub fn blend_target(&mut self, alpha: u8) -> BlendTarget<'_> {
        BlendTarget { image: self, alpha }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }
}

/// Adapter that lets `embedded-graphics` paint translucent strokes and text.
pub struct BlendTarget<'a> {
    image: &'a mut RasterImage,
    alpha: u8,
}

impl OriginDimensions for BlendTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.image.width, self.image.height)
    }
}

impl DrawTarget for BlendTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.image.blend_pixel(
                i64::from(point.x),
                i64::from(point.y),
                [color.r(), color.g(), color.b(), self.alpha],
            );
        }
        Ok(())
    }
}

fn blend_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    match src[3] {
        0 => dst,
        255 => src,
        _ => {
            let sa = f32::from(src[3]) / 255.0;
            let da = f32::from(dst[3]) / 255.0;
            let out_a = sa + da * (1.0 - sa);
            let channel = |s: u8, d: u8| {
                let value = (f32::from(s) * sa + f32::from(d) * da * (1.0 - sa)) / out_a;
                value.round().clamp(0.0, 255.0) as u8
            };
            [
                channel(src[0], dst[0]),
                channel(src[1], dst[1]),
                channel(src[2], dst[2]),
                (out_a * 255.0).round() as u8,
            ]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{RasterImage, SourceRect};
    use crate::render::Color;

    #[test]
    fn half_transparent_black_darkens_white() {
        let mut image = RasterImage::filled(2, 2, Color::rgb(1.0, 1.0, 1.0));
        image.blend_pixel(0, 0, [0, 0, 0, 0x80]);
        let pixel = image.pixel(0, 0).expect("pixel");
        assert_eq!(pixel[3], 255);
        assert!(pixel[0] > 120 && pixel[0] < 135);
        assert_eq!(image.pixel(1, 1), Some([255, 255, 255, 255]));
    }

    #[test]
    fn scaled_region_stretches_left_half() {
        let mut source = RasterImage::new(4, 1);
        source.fill_rect(0.0, 0.0, 2.0, 1.0, Color::rgb(1.0, 0.0, 0.0));
        source.fill_rect(2.0, 0.0, 2.0, 1.0, Color::rgb(0.0, 0.0, 1.0));

        let mut target = RasterImage::new(4, 1);
        target.draw_scaled_region(&source, SourceRect::new(0.0, 0.0, 2.0, 1.0));
        assert!(
            target
                .pixels()
                .iter()
                .all(|pixel| *pixel == [255, 0, 0, 255])
        );
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut image = RasterImage::new(3, 3);
        image.blend_pixel(-1, 0, [1, 2, 3, 255]);
        image.blend_pixel(3, 3, [1, 2, 3, 255]);
        assert_eq!(image.painted_pixel_count(), 0);
    }
}
