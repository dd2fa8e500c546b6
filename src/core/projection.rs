use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{Measurement, ValueRange};

/// One projected sample in pixel space.
///
/// `source_value` keeps the original reading so hover labels can show it
/// without going back to the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub source_value: u16,
}

/// Maps a window into screen space.
///
/// Samples are spaced `width / n` apart starting at `x = 0`. The Y axis is
/// anchored on the unbuffered maximum and scaled by the unbuffered span, so the
/// fitted `[min, max]` band fills the full height. A zero span maps every
/// sample onto the top edge.
///
/// The function is deterministic and side-effect free so the cached and the
/// immediate views consume the exact same geometry.
#[must_use]
pub fn project_window(
    window: &[Measurement],
    range: ValueRange,
    width: f64,
    height: f64,
) -> Vec<ScreenPoint> {
    if window.is_empty() {
        return Vec::new();
    }

    let tick = width / window.len() as f64;
    let span = range.span();

    window
        .iter()
        .enumerate()
        .map(|(position, sample)| {
            let value = f64::from(sample.value());
            let y = if span > 0.0 {
                ((range.max - value) / span) * height
            } else {
                0.0
            };
            ScreenPoint {
                x: position as f64 * tick,
                y,
                source_value: sample.value(),
            }
        })
        .collect()
}

/// Returns the projected sample closest to pixel column `x`.
#[must_use]
pub fn nearest_point(points: &[ScreenPoint], x: f64) -> Option<ScreenPoint> {
    if !x.is_finite() {
        return None;
    }
    points
        .iter()
        .copied()
        .min_by_key(|point| OrderedFloat((point.x - x).abs()))
}

#[cfg(test)]
mod tests {
    use super::{nearest_point, project_window};
    use crate::core::{Measurement, RangeDefaults, fit_value_range};
    use approx::assert_relative_eq;

    #[test]
    fn projection_spaces_points_by_tick() {
        let window: Vec<Measurement> = [70u16, 85, 100, 85]
            .iter()
            .map(|value| Measurement::now(*value))
            .collect();
        let range = fit_value_range(&window, RangeDefaults::default()).expect("range");

        let points = project_window(&window, range, 400.0, 300.0);
        assert_eq!(points.len(), 4);
        assert_relative_eq!(points[0].x, 0.0);
        assert_relative_eq!(points[1].x, 100.0);
        assert_relative_eq!(points[3].x, 300.0);
        assert_relative_eq!(points[0].y, 300.0);
        assert_relative_eq!(points[1].y, 150.0);
        assert_relative_eq!(points[2].y, 0.0);
        assert_eq!(points[2].source_value, 100);
    }

    #[test]
    fn nearest_point_picks_closest_column() {
        let window: Vec<Measurement> = [72u16, 75, 80, 78]
            .iter()
            .map(|value| Measurement::now(*value))
            .collect();
        let range = fit_value_range(&window, RangeDefaults::default()).expect("range");
        let points = project_window(&window, range, 100.0, 50.0);

        let hit = nearest_point(&points, 52.0).expect("hit");
        assert_eq!(hit.source_value, 80);
        assert!(nearest_point(&[], 10.0).is_none());
    }
}
