use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{
    Measurement, MeasurementSeries, ValueRange, Viewport, VisibleWindow, clamp_window_size,
    zoom_step,
};
use crate::error::ChartResult;
use crate::extensions::{SessionContext, SessionEvent, SessionObserver, SubscriptionId};
use crate::interaction::{ViewportChange, ViewportState};
use crate::render::RasterImage;

use super::{
    CachedChart, ChartConfig, ChartView, FeedMessage, FeedReceiver, RenderJob, RenderOutput,
    ScheduledTask, SessionSnapshot, encode_values, parse_measurements,
};

/// What the last applied render pass showed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSummary {
    pub generation: u64,
    pub start_index: usize,
    pub sample_count: usize,
    pub range: Option<ValueRange>,
}

/// Owner of the measurement series and the visible window.
///
/// Every data change bumps a generation counter and runs a full render pass:
/// range fit, projection, axis layout and series stroke. Window size changes
/// are debounced; the host drives the debounce through [`ChartSession::tick`].
pub struct ChartSession<V: ChartView> {
    config: ChartConfig,
    series: MeasurementSeries,
    window_size: usize,
    viewport: Viewport,
    view: V,
    generation: u64,
    save_enabled: bool,
    debounce: ScheduledTask,
    observers: IndexMap<SubscriptionId, Box<dyn SessionObserver>>,
    next_subscription_id: u64,
    last_render: Option<RenderSummary>,
}

impl<V: ChartView> ChartSession<V> {
    pub fn new(view: V, config: ChartConfig, viewport: Viewport) -> ChartResult<Self> {
        config.validate()?;
        let window_size = clamp_window_size(config.visible_window_size, config.min_visible_points);
        debug!(
            window_size,
            width = viewport.width,
            height = viewport.height,
            "create chart session"
        );
        Ok(Self {
            config,
            series: MeasurementSeries::new(),
            window_size,
            viewport,
            view,
            generation: 0,
            save_enabled: false,
            debounce: ScheduledTask::once(Duration::from_millis(config.zoom_debounce_ms)),
            observers: IndexMap::new(),
            next_subscription_id: 1,
            last_render: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    #[must_use]
    pub fn series(&self) -> &MeasurementSeries {
        &self.series
    }

    #[must_use]
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    #[must_use]
    pub fn visible_window(&self) -> VisibleWindow<'_> {
        self.series.window(self.window_size)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn last_render(&self) -> Option<RenderSummary> {
        self.last_render
    }

    /// Range of the last applied render pass.
    #[must_use]
    pub fn last_range(&self) -> Option<ValueRange> {
        self.last_render.and_then(|render| render.range)
    }

    /// Saving is offered once the series no longer fits the window.
    #[must_use]
    pub fn is_save_enabled(&self) -> bool {
        self.save_enabled
    }

    #[must_use]
    pub fn is_zoom_in_enabled(&self) -> bool {
        self.window_size > self.config.min_visible_points
    }

    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Appends one measurement and re-renders.
    pub fn add_measurement(&mut self, measurement: Measurement) -> ChartResult<()> {
        self.series.push(measurement);
        self.bump_generation();
        trace!(
            value = measurement.value(),
            count = self.series.len(),
            "append measurement"
        );
        self.emit(SessionEvent::MeasurementAppended {
            value: measurement.value(),
            series_len: self.series.len(),
        });
        self.refresh_save_enabled();
        self.render_now().map(|_| ())
    }

    /// Drops every measurement, clears the view and redraws the empty chart.
    pub fn reset_data(&mut self) -> ChartResult<()> {
        self.series.clear();
        self.bump_generation();
        self.debounce.cancel();
        debug!("reset chart data");
        self.emit(SessionEvent::DataReset);
        self.refresh_save_enabled();
        self.clear_view()
    }

    pub fn set_visible_window_size(&mut self, requested: usize) {
        self.set_visible_window_size_at(requested, Instant::now());
    }

    /// Clamps `requested` to the floor and schedules a debounced re-render.
    pub fn set_visible_window_size_at(&mut self, requested: usize, now: Instant) {
        let window_size = clamp_window_size(requested, self.config.min_visible_points);
        if window_size != self.window_size {
            debug!(
                from = self.window_size,
                to = window_size,
                requested,
                "visible window size changed"
            );
            self.window_size = window_size;
            self.emit(SessionEvent::WindowSizeChanged { window_size });
            self.refresh_save_enabled();
        }
        self.bump_generation();
        if self.debounce.schedule(now) {
            trace!("replaced pending window render");
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom_in_at(Instant::now());
    }

    /// Shows fewer samples: 5 less, or a tenth less above 100 samples.
    pub fn zoom_in_at(&mut self, now: Instant) {
        let target = self
            .window_size
            .saturating_sub(zoom_step(self.window_size))
            .min(self.series.len());
        self.set_visible_window_size_at(target, now);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_out_at(Instant::now());
    }

    /// Shows more samples, never more than the series holds.
    pub fn zoom_out_at(&mut self, now: Instant) {
        let target = self
            .window_size
            .saturating_add(zoom_step(self.window_size))
            .min(self.series.len());
        self.set_visible_window_size_at(target, now);
    }

    pub fn show_all(&mut self) {
        self.show_all_at(Instant::now());
    }

    pub fn show_all_at(&mut self, now: Instant) {
        self.set_visible_window_size_at(self.series.len(), now);
    }

    /// Fires a due debounced render. Returns `true` when a pass was applied.
    pub fn tick(&mut self, now: Instant) -> ChartResult<bool> {
        if !self.debounce.poll(now) {
            return Ok(false);
        }
        trace!(window_size = self.window_size, "debounced render due");
        self.render_now()
    }

    /// Adopts a new canvas size. A zero-area size is inert and clears the view.
    pub fn resize(&mut self, width: u32, height: u32) -> ChartResult<()> {
        self.viewport = Viewport::new(width, height);
        self.bump_generation();
        if !self.viewport.is_valid() {
            debug!(width, height, "zero-area resize, clearing view");
        }
        self.render_now().map(|_| ())
    }

    /// Comma-joined values of the visible window, `None` when there is no data.
    #[must_use]
    pub fn data_string(&self) -> Option<String> {
        encode_values(self.visible_window().samples)
    }

    /// Replaces the series with the values in `text`, stamped with `loaded_at`.
    /// Returns the number of samples loaded.
    pub fn load_data_string(&mut self, text: &str, loaded_at: DateTime<Utc>) -> ChartResult<usize> {
        self.series = parse_measurements(text, loaded_at).into_iter().collect();
        let series_len = self.series.len();
        self.bump_generation();
        self.debounce.cancel();
        debug!(series_len, "loaded data string");
        self.emit(SessionEvent::DataLoaded { series_len });
        self.refresh_save_enabled();
        if series_len == 0 {
            self.clear_view()?;
            return Ok(0);
        }
        self.render_now()?;
        Ok(series_len)
    }

    /// Snapshot of the current state for an off-thread render pass. `None`
    /// while the viewport has no area.
    #[must_use]
    pub fn render_job(&self) -> Option<RenderJob<V>> {
        if !self.viewport.is_valid() {
            return None;
        }
        let window = self.visible_window();
        Some(RenderJob::new(
            self.generation,
            window.samples.to_vec(),
            window.start_index,
            self.viewport,
            self.config,
        ))
    }

    /// Presents a finished pass. Outputs from an older generation are dropped
    /// and `Ok(false)` is returned.
    pub fn apply_render(&mut self, output: RenderOutput<V::Prepared>) -> ChartResult<bool> {
        if output.generation != self.generation {
            debug!(
                output_generation = output.generation,
                current_generation = self.generation,
                "discarding stale render output"
            );
            return Ok(false);
        }
        self.view.present(output.prepared)?;
        self.debounce.cancel();
        self.last_render = Some(RenderSummary {
            generation: output.generation,
            start_index: output.start_index,
            sample_count: output.sample_count,
            range: output.range,
        });
        self.emit(SessionEvent::Rendered {
            generation: output.generation,
            start_index: output.start_index,
            sample_count: output.sample_count,
        });
        Ok(true)
    }

    /// Builds and presents a pass on the calling thread. On a zero-area
    /// viewport the view is cleared instead and `Ok(false)` is returned.
    pub fn render_now(&mut self) -> ChartResult<bool> {
        let Some(job) = self.render_job() else {
            trace!("skipping render on zero-area viewport");
            self.view.clear();
            self.last_render = None;
            return Ok(false);
        };
        let output = job.run()?;
        self.apply_render(output)
    }

    pub fn subscribe(&mut self, observer: Box<dyn SessionObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.observers.insert(id, observer);
        id
    }

    /// Returns `true` when an observer was removed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.shift_remove(&id).is_some()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn handle_feed_message(&mut self, message: FeedMessage) -> ChartResult<()> {
        match message {
            FeedMessage::Measurement(measurement) => self.add_measurement(measurement),
            FeedMessage::ConnectionChanged { connected, error } => {
                if let Some(error) = &error {
                    warn!(connected, error = %error, "measurement source reported an error");
                } else {
                    debug!(connected, "measurement source connection changed");
                }
                self.emit(SessionEvent::ConnectionChanged { connected, error });
                Ok(())
            }
        }
    }

    /// Applies every queued feed message in arrival order. Returns how many
    /// messages were handled.
    pub fn drain_feed(&mut self, receiver: &FeedReceiver) -> ChartResult<usize> {
        let mut handled = 0;
        for message in receiver.drain() {
            self.handle_feed_message(message)?;
            handled += 1;
        }
        Ok(handled)
    }

    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        let window = self.visible_window();
        SessionSnapshot {
            viewport: self.viewport,
            series_len: self.series.len(),
            window_size: self.window_size,
            start_index: window.start_index,
            visible_values: window.samples.iter().map(|sample| sample.value()).collect(),
            save_enabled: self.save_enabled,
            zoom_in_enabled: self.is_zoom_in_enabled(),
            generation: self.generation,
            range: self.last_range(),
            viewport_state: self.view.viewport_snapshot(),
        }
    }

    /// Blanks the view, then draws the gridlines of an empty window when the
    /// viewport has an area.
    fn clear_view(&mut self) -> ChartResult<()> {
        self.view.clear();
        self.last_render = None;
        self.render_now().map(|_| ())
    }

    fn bump_generation(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    fn refresh_save_enabled(&mut self) {
        let enabled = self.window_size < self.series.len();
        if enabled != self.save_enabled {
            self.save_enabled = enabled;
            self.emit(SessionEvent::SaveAvailabilityChanged { enabled });
        }
    }

    fn context(&self) -> SessionContext {
        SessionContext {
            viewport: self.viewport,
            series_len: self.series.len(),
            window_size: self.window_size,
            save_enabled: self.save_enabled,
            generation: self.generation,
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        let context = self.context();
        for observer in self.observers.values_mut() {
            observer.on_event(&event, context);
        }
    }
}

impl ChartSession<CachedChart> {
    /// Session with a cached view configured from `config`.
    pub fn cached(config: ChartConfig, viewport: Viewport) -> ChartResult<Self> {
        Self::new(CachedChart::from_config(&config), config, viewport)
    }

    #[must_use]
    pub fn viewport_state(&self) -> ViewportState {
        self.view.viewport_state()
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.view.pointer_down(x, y);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ViewportChange {
        self.view.pointer_move(x, y)
    }

    pub fn pointer_up(&mut self) -> ViewportChange {
        self.view.pointer_up()
    }

    pub fn pointer_cancel(&mut self) -> ViewportChange {
        self.view.pointer_cancel()
    }

    pub fn pointer_exit(&mut self) -> ViewportChange {
        self.view.pointer_exit()
    }

    pub fn capture_lost(&mut self) -> ViewportChange {
        self.view.capture_lost()
    }

    #[must_use]
    pub fn compose(&self) -> Option<RasterImage> {
        self.view.compose()
    }

    pub fn compose_into(&self, target: &mut RasterImage) -> bool {
        self.view.compose_into(target)
    }
}
