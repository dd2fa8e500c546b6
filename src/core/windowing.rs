/// Floor for the number of samples a chart window may show.
pub const MIN_VISIBLE_POINTS: usize = 10;

/// Index of the first sample of the trailing window of `window_size` samples.
#[must_use]
pub fn window_start_index(series_len: usize, window_size: usize) -> usize {
    series_len.saturating_sub(window_size)
}

/// Clamps a requested window size to `floor`.
#[must_use]
pub fn clamp_window_size(requested: usize, floor: usize) -> usize {
    requested.max(floor)
}

/// Step used by the zoom buttons: 5 samples, or a tenth of the window once it
/// grows past 100 samples.
#[must_use]
pub fn zoom_step(window_size: usize) -> usize {
    if window_size > 100 {
        window_size / 10
    } else {
        5
    }
}
