use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::SourceRect;

/// Zoom factor of a fully visible raster, in percent.
pub const FULL_ZOOM_FACTOR: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer is down but has not yet moved past a threshold.
    Determining,
    PanningHorizontal,
    ZoomingVertical,
}

impl GestureState {
    #[must_use]
    pub fn is_locked(self) -> bool {
        matches!(self, Self::PanningHorizontal | Self::ZoomingVertical)
    }
}

/// Pixel distances a drag must exceed before it locks to one direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureThresholds {
    pub pan_px: f64,
    pub zoom_px: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            pan_px: 30.0,
            zoom_px: 10.0,
        }
    }
}

/// Pan/zoom state over the cached data raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Percentage of the raster width shown, in `[min_zoom_factor, 100]`.
    pub zoom_factor: i32,
    /// Left edge of the visible slice, in raster pixels.
    pub pan_offset_x: f64,
    pub gesture: GestureState,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            zoom_factor: FULL_ZOOM_FACTOR,
            pan_offset_x: 0.0,
            gesture: GestureState::Idle,
        }
    }
}

/// Outcome of feeding one pointer event to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportChange {
    /// Nothing visible changed.
    Unchanged,
    /// The drag locked to a direction; the crop is unchanged.
    DirectionLocked(GestureState),
    Panned,
    Zoomed,
    /// The gesture ended.
    Released,
}

impl ViewportChange {
    /// Whether the host should re-composite the cached layers.
    #[must_use]
    pub fn needs_compose(self) -> bool {
        matches!(self, Self::Panned | Self::Zoomed)
    }
}

/// Gesture state machine that turns pointer drags into a crop of the data raster.
///
/// Horizontal drags pan; vertical drags change how much of the raster width is
/// visible. The visible slice is always stretched over the full canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    state: ViewportState,
    thresholds: GestureThresholds,
    min_zoom_factor: i32,
    anchor_x: f64,
    anchor_y: f64,
    raster_width: f64,
    raster_height: f64,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(GestureThresholds::default(), 5)
    }
}

impl ViewportController {
    #[must_use]
    pub fn new(thresholds: GestureThresholds, min_zoom_factor: i32) -> Self {
        Self {
            state: ViewportState::default(),
            thresholds,
            min_zoom_factor: min_zoom_factor.clamp(1, FULL_ZOOM_FACTOR),
            anchor_x: 0.0,
            anchor_y: 0.0,
            raster_width: 0.0,
            raster_height: 0.0,
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    #[must_use]
    pub fn zoom_factor(&self) -> i32 {
        self.state.zoom_factor
    }

    #[must_use]
    pub fn pan_offset_x(&self) -> f64 {
        self.state.pan_offset_x
    }

    #[must_use]
    pub fn gesture(&self) -> GestureState {
        self.state.gesture
    }

    #[must_use]
    pub fn min_zoom_factor(&self) -> i32 {
        self.min_zoom_factor
    }

    #[must_use]
    pub fn raster_size(&self) -> (f64, f64) {
        (self.raster_width, self.raster_height)
    }

    /// Adopts a freshly produced raster. Any in-flight gesture is dropped.
    pub fn set_raster_size(&mut self, width: u32, height: u32) {
        self.raster_width = f64::from(width);
        self.raster_height = f64::from(height);
        self.reset();
    }

    pub fn reset(&mut self) {
        self.state = ViewportState::default();
    }

    /// Width of the visible slice in raster pixels.
    #[must_use]
    pub fn visible_width(&self) -> f64 {
        self.raster_width * f64::from(self.state.zoom_factor) / f64::from(FULL_ZOOM_FACTOR)
    }

    #[must_use]
    pub fn max_pan_offset(&self) -> f64 {
        (self.raster_width - self.visible_width()).max(0.0)
    }

    /// Region of the data raster that covers the canvas.
    #[must_use]
    pub fn crop_rect(&self) -> SourceRect {
        SourceRect::new(
            self.state.pan_offset_x,
            0.0,
            self.visible_width(),
            self.raster_height,
        )
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.state.gesture = GestureState::Determining;
        self.anchor_x = x;
        self.anchor_y = y;
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> ViewportChange {
        let dx = self.anchor_x - x;
        let dy = self.anchor_y - y;

        match self.state.gesture {
            GestureState::Idle => ViewportChange::Unchanged,
            GestureState::Determining => {
                let locked = if dx.abs() > self.thresholds.pan_px {
                    GestureState::PanningHorizontal
                } else if dy.abs() > self.thresholds.zoom_px {
                    GestureState::ZoomingVertical
                } else {
                    return ViewportChange::Unchanged;
                };
                self.state.gesture = locked;
                self.anchor_x = x;
                self.anchor_y = y;
                debug!(gesture = ?locked, dx, dy, "viewport gesture locked");
                ViewportChange::DirectionLocked(locked)
            }
            GestureState::PanningHorizontal => {
                self.anchor_x = x;
                self.anchor_y = y;
                self.apply_pan(dx);
                ViewportChange::Panned
            }
            GestureState::ZoomingVertical => {
                self.anchor_x = x;
                self.anchor_y = y;
                self.apply_zoom(dy);
                ViewportChange::Zoomed
            }
        }
    }

    pub fn pointer_up(&mut self) -> ViewportChange {
        self.end_gesture()
    }

    pub fn pointer_cancel(&mut self) -> ViewportChange {
        self.end_gesture()
    }

    pub fn pointer_exit(&mut self) -> ViewportChange {
        self.end_gesture()
    }

    pub fn capture_lost(&mut self) -> ViewportChange {
        self.end_gesture()
    }

    /// Shifts the visible slice by `dx` raster pixels.
    pub fn apply_pan(&mut self, dx: f64) {
        if !dx.is_finite() {
            return;
        }
        self.state.pan_offset_x = (self.state.pan_offset_x + dx).clamp(0.0, self.max_pan_offset());
    }

    /// Changes the zoom factor by half of `dy`, truncated toward zero.
    pub fn apply_zoom(&mut self, dy: f64) {
        if !dy.is_finite() {
            return;
        }
        let step = (dy / 2.0) as i32;
        self.state.zoom_factor = self
            .state
            .zoom_factor
            .saturating_add(step)
            .clamp(self.min_zoom_factor, FULL_ZOOM_FACTOR);
        self.apply_pan(0.0);
    }

    fn end_gesture(&mut self) -> ViewportChange {
        if self.state.gesture == GestureState::Idle {
            return ViewportChange::Unchanged;
        }
        self.state.gesture = GestureState::Idle;
        ViewportChange::Released
    }
}

#[cfg(test)]
mod tests {
    use super::{GestureState, ViewportChange, ViewportController};

    fn controller() -> ViewportController {
        let mut controller = ViewportController::default();
        controller.set_raster_size(400, 200);
        controller
    }

    #[test]
    fn small_moves_stay_undetermined() {
        let mut controller = controller();
        controller.pointer_down(100.0, 100.0);
        assert_eq!(
            controller.pointer_move(120.0, 95.0),
            ViewportChange::Unchanged
        );
        assert_eq!(controller.gesture(), GestureState::Determining);
    }

    #[test]
    fn horizontal_threshold_wins_over_vertical() {
        let mut controller = controller();
        controller.pointer_down(100.0, 100.0);
        let change = controller.pointer_move(60.0, 50.0);
        assert_eq!(
            change,
            ViewportChange::DirectionLocked(GestureState::PanningHorizontal)
        );
        assert_eq!(controller.pan_offset_x(), 0.0);
    }

    #[test]
    fn release_returns_to_idle_and_ignores_moves() {
        let mut controller = controller();
        controller.pointer_down(0.0, 0.0);
        assert_eq!(controller.pointer_exit(), ViewportChange::Released);
        assert_eq!(controller.pointer_move(500.0, 500.0), ViewportChange::Unchanged);
        assert_eq!(controller.pointer_up(), ViewportChange::Unchanged);
    }

    #[test]
    fn pan_is_clamped_after_zoom_out() {
        let mut controller = controller();
        controller.apply_zoom(-100.0);
        assert_eq!(controller.zoom_factor(), 50);
        controller.apply_pan(1000.0);
        assert_eq!(controller.pan_offset_x(), 200.0);

        controller.apply_zoom(100.0);
        assert_eq!(controller.zoom_factor(), 100);
        assert_eq!(controller.pan_offset_x(), 0.0);
    }
}
