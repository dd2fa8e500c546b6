use std::marker::PhantomData;

use crate::core::{Measurement, ValueRange, Viewport};
use crate::error::ChartResult;

use super::{ChartConfig, ChartView, build_chart_scene};

/// Owned snapshot of everything one render pass reads.
///
/// It is `Send`, so hosts may run it on a worker thread and hand the output
/// back to the session that produced it.
pub struct RenderJob<V: ChartView> {
    generation: u64,
    window: Vec<Measurement>,
    start_index: usize,
    viewport: Viewport,
    config: ChartConfig,
    view: PhantomData<fn() -> V>,
}

/// Prepared view content tagged with the generation it was built from.
#[derive(Debug)]
pub struct RenderOutput<P> {
    pub generation: u64,
    pub start_index: usize,
    pub sample_count: usize,
    pub range: Option<ValueRange>,
    pub prepared: P,
}

impl<V: ChartView> RenderJob<V> {
    pub(super) fn new(
        generation: u64,
        window: Vec<Measurement>,
        start_index: usize,
        viewport: Viewport,
        config: ChartConfig,
    ) -> Self {
        Self {
            generation,
            window,
            start_index,
            viewport,
            config,
            view: PhantomData,
        }
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn window(&self) -> &[Measurement] {
        &self.window
    }

    /// Builds the scene and prepares it for the view. Pure.
    pub fn run(self) -> ChartResult<RenderOutput<V::Prepared>> {
        let scene = build_chart_scene(&self.window, self.start_index, self.viewport, &self.config)?;
        let prepared = V::prepare(&scene, &self.config.style)?;
        Ok(RenderOutput {
            generation: self.generation,
            start_index: self.start_index,
            sample_count: self.window.len(),
            range: scene.range,
            prepared,
        })
    }
}
