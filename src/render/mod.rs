mod frame;
mod layer_stack;
mod layered_frame;
mod null_renderer;
mod primitives;
mod raster;
mod raster_renderer;

pub use frame::RenderFrame;
pub use layer_stack::{
    BACKGROUND_RASTER_LAYERS, CanvasLayerKind, DATA_RASTER_LAYERS, LayerStack,
};
pub use layered_frame::{LayerPrimitives, LayeredRenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, PathPoint, PolylinePrimitive, RectPrimitive, TextHAlign, TextPrimitive,
};
pub use raster::{BlendTarget, MAX_RASTER_DIMENSION_PX, RasterImage, SourceRect};
pub use raster_renderer::{RasterRenderStats, RasterRenderer};

use crate::error::ChartResult;

/// Contract implemented by any rendering backend.
///
/// Backends receive a fully materialized `RenderFrame`, so drawing code never
/// sees measurements, ranges or viewport gestures.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;

    /// Blanks whatever the last frame left on the surface.
    fn clear(&mut self) {}
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
