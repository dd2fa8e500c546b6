use approx::relative_eq;
use pulse_chart::core::{
    MIN_VISIBLE_POINTS, Measurement, MeasurementSeries, RangeDefaults, clamp_window_size,
    fit_value_range, project_window,
};
use proptest::prelude::*;

fn to_samples(values: &[u16]) -> Vec<Measurement> {
    values.iter().copied().map(Measurement::now).collect()
}

proptest! {
    #[test]
    fn fitted_range_covers_window_and_default_band(
        values in proptest::collection::vec(0u16..400, 1..200)
    ) {
        let window = to_samples(&values);
        let range = fit_value_range(&window, RangeDefaults::default()).expect("non-empty window");

        for value in &values {
            prop_assert!(f64::from(*value) >= range.min);
            prop_assert!(f64::from(*value) <= range.max);
        }
        prop_assert!(range.min <= 70.0);
        prop_assert!(range.max >= 100.0);
        prop_assert!(range.min_buffered <= range.min);
        prop_assert!(range.max_buffered >= range.max);
        prop_assert!(range.min_buffered >= 0.0);
    }

    #[test]
    fn fitting_and_projection_are_idempotent(
        values in proptest::collection::vec(any::<u16>(), 1..120),
        width in 1u32..2000,
        height in 1u32..1200,
    ) {
        let window = to_samples(&values);
        let first = fit_value_range(&window, RangeDefaults::default());
        let second = fit_value_range(&window, RangeDefaults::default());
        prop_assert_eq!(first, second);

        let range = first.expect("non-empty window");
        let width = f64::from(width);
        let height = f64::from(height);
        let projected = project_window(&window, range, width, height);
        let reprojected = project_window(&window, range, width, height);
        prop_assert_eq!(projected, reprojected);
    }

    #[test]
    fn projected_points_are_evenly_spaced_inside_canvas(
        values in proptest::collection::vec(0u16..300, 1..150),
        width in 1u32..2000,
        height in 1u32..1200,
    ) {
        let window = to_samples(&values);
        let range = fit_value_range(&window, RangeDefaults::default()).expect("non-empty window");
        let width = f64::from(width);
        let height = f64::from(height);
        let points = project_window(&window, range, width, height);

        prop_assert_eq!(points.len(), values.len());
        let tick = width / values.len() as f64;
        for (index, point) in points.iter().enumerate() {
            prop_assert!(relative_eq!(point.x, index as f64 * tick, max_relative = 1e-9));
            prop_assert!(point.y >= -1e-9 && point.y <= height + 1e-9);
            prop_assert_eq!(point.source_value, values[index]);
        }
    }

    #[test]
    fn window_never_exceeds_requested_size(
        len in 0usize..300,
        requested in 0usize..400,
    ) {
        let series: MeasurementSeries = (0..len).map(|i| Measurement::now(i as u16)).collect();
        let size = clamp_window_size(requested, MIN_VISIBLE_POINTS);
        let window = series.window(size);

        prop_assert!(size >= MIN_VISIBLE_POINTS);
        prop_assert_eq!(window.len(), len.min(size));
        prop_assert_eq!(window.start_index + window.len(), len);
    }
}
