use tracing::trace;

use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

use super::{ChartScene, ChartView, RenderStyle};

/// Immediate-mode view: every pass hands the whole flattened frame to a renderer.
#[derive(Debug)]
pub struct SimpleChart<R: Renderer> {
    renderer: R,
    last_frame: Option<RenderFrame>,
}

impl<R: Renderer> SimpleChart<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            last_frame: None,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Frame of the last presented pass, `None` after a clear.
    #[must_use]
    pub fn last_frame(&self) -> Option<&RenderFrame> {
        self.last_frame.as_ref()
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}

impl<R: Renderer> ChartView for SimpleChart<R> {
    type Prepared = RenderFrame;

    fn prepare(scene: &ChartScene, _style: &RenderStyle) -> ChartResult<RenderFrame> {
        let frame = scene.layers.flatten();
        frame.validate()?;
        Ok(frame)
    }

    fn present(&mut self, prepared: RenderFrame) -> ChartResult<()> {
        self.renderer.render(&prepared)?;
        trace!(
            lines = prepared.lines.len(),
            polylines = prepared.polylines.len(),
            texts = prepared.texts.len(),
            "presented immediate frame"
        );
        self.last_frame = Some(prepared);
        Ok(())
    }

    fn clear(&mut self) {
        self.renderer.clear();
        self.last_frame = None;
    }
}
