use tracing::{debug, trace};

use crate::error::ChartResult;
use crate::interaction::{
    GestureState, GestureThresholds, ViewportChange, ViewportController, ViewportState,
};
use crate::render::{
    BACKGROUND_RASTER_LAYERS, DATA_RASTER_LAYERS, RasterImage, RasterRenderer, Renderer,
};

use super::{ChartConfig, ChartScene, ChartView, RenderStyle};

/// Rasters produced by one cached render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterLayers {
    /// Background fill, gridlines and labels. Never panned or zoomed.
    pub background: RasterImage,
    /// Series stroke on a transparent canvas. `None` with fewer than two samples.
    pub data: Option<RasterImage>,
}

/// Cached view: layers are rasterized once per pass and pointer gestures only
/// crop and stretch the data raster over the background.
#[derive(Debug, Clone)]
pub struct CachedChart {
    layers: Option<RasterLayers>,
    viewport: ViewportController,
}

impl Default for CachedChart {
    fn default() -> Self {
        Self::new(GestureThresholds::default(), 5)
    }
}

impl CachedChart {
    #[must_use]
    pub fn new(thresholds: GestureThresholds, min_zoom_factor: i32) -> Self {
        Self {
            layers: None,
            viewport: ViewportController::new(thresholds, min_zoom_factor),
        }
    }

    #[must_use]
    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.gesture_thresholds(), config.min_zoom_factor)
    }

    #[must_use]
    pub fn layers(&self) -> Option<&RasterLayers> {
        self.layers.as_ref()
    }

    #[must_use]
    pub fn viewport_controller(&self) -> &ViewportController {
        &self.viewport
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.viewport.state()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        if self.layers.is_some() {
            self.viewport.pointer_down(x, y);
        }
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ViewportChange {
        self.viewport.pointer_move(x, y)
    }

    pub fn pointer_up(&mut self) -> ViewportChange {
        self.viewport.pointer_up()
    }

    pub fn pointer_cancel(&mut self) -> ViewportChange {
        self.viewport.pointer_cancel()
    }

    pub fn pointer_exit(&mut self) -> ViewportChange {
        self.viewport.pointer_exit()
    }

    pub fn capture_lost(&mut self) -> ViewportChange {
        self.viewport.capture_lost()
    }

    /// Composites the cached layers into a new canvas-sized image.
    #[must_use]
    pub fn compose(&self) -> Option<RasterImage> {
        let layers = self.layers.as_ref()?;
        let mut canvas = layers.background.clone();
        if let Some(data) = &layers.data {
            canvas.draw_scaled_region(data, self.viewport.crop_rect());
        }
        Some(canvas)
    }

    /// Composites into a caller-owned buffer, reusing its allocation.
    /// Returns `false` when nothing is cached.
    pub fn compose_into(&self, target: &mut RasterImage) -> bool {
        let Some(layers) = self.layers.as_ref() else {
            return false;
        };
        target.copy_from(&layers.background);
        if let Some(data) = &layers.data {
            target.draw_scaled_region(data, self.viewport.crop_rect());
        }
        true
    }
}

impl ChartView for CachedChart {
    type Prepared = RasterLayers;

    fn prepare(scene: &ChartScene, _style: &RenderStyle) -> ChartResult<RasterLayers> {
        let mut background = RasterRenderer::new(scene.viewport)?;
        background.render(&scene.layers.flatten_layers(&BACKGROUND_RASTER_LAYERS))?;

        let data = if scene.has_series() {
            let mut data = RasterRenderer::new(scene.viewport)?;
            data.render(&scene.layers.flatten_layers(&DATA_RASTER_LAYERS))?;
            Some(data.into_image())
        } else {
            None
        };

        trace!(
            width = scene.viewport.width,
            height = scene.viewport.height,
            has_data = data.is_some(),
            "rasterized cached layers"
        );
        Ok(RasterLayers {
            background: background.into_image(),
            data,
        })
    }

    fn present(&mut self, prepared: RasterLayers) -> ChartResult<()> {
        let (width, height) = (prepared.background.width(), prepared.background.height());
        if self.viewport.gesture() != GestureState::Idle {
            debug!("new raster dropped in-flight gesture");
        }
        self.viewport.set_raster_size(width, height);
        self.layers = Some(prepared);
        Ok(())
    }

    fn clear(&mut self) {
        self.layers = None;
        self.viewport.set_raster_size(0, 0);
    }

    fn viewport_snapshot(&self) -> Option<ViewportState> {
        Some(self.viewport.state())
    }
}

#[cfg(test)]
mod tests {
    use super::CachedChart;
    use crate::render::RasterImage;

    #[test]
    fn empty_cache_composes_nothing() {
        let chart = CachedChart::default();
        assert!(chart.compose().is_none());
        let mut target = RasterImage::new(1, 1);
        assert!(!chart.compose_into(&mut target));
    }
}
