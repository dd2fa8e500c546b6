use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One heart-rate reading as delivered by the transport or the simulator.
///
/// Measurements are immutable once built; the series only ever appends them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    value: u16,
    timestamp: DateTime<Utc>,
}

impl Measurement {
    #[must_use]
    pub const fn new(value: u16, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }

    /// Builds a measurement stamped with the current wall-clock time.
    #[must_use]
    pub fn now(value: u16) -> Self {
        Self::new(value, Utc::now())
    }

    #[must_use]
    pub const fn value(self) -> u16 {
        self.value
    }

    #[must_use]
    pub const fn timestamp(self) -> DateTime<Utc> {
        self.timestamp
    }
}

/// Append-only measurement history owned by a chart session.
///
/// Insertion order is treated as chronological order. Timestamps coming from
/// the source are not re-sorted or checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeasurementSeries {
    samples: Vec<Measurement>,
}

/// Trailing slice of a series selected for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleWindow<'a> {
    pub start_index: usize,
    pub samples: &'a [Measurement],
}

impl VisibleWindow<'_> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl MeasurementSeries {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, measurement: Measurement) {
        self.samples.push(measurement);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Measurement] {
        &self.samples
    }

    #[must_use]
    pub fn last(&self) -> Option<Measurement> {
        self.samples.last().copied()
    }

    /// Returns the most recent `size` samples.
    #[must_use]
    pub fn window(&self, size: usize) -> VisibleWindow<'_> {
        let start_index = super::window_start_index(self.samples.len(), size);
        VisibleWindow {
            start_index,
            samples: &self.samples[start_index..],
        }
    }
}

impl FromIterator<Measurement> for MeasurementSeries {
    fn from_iter<I: IntoIterator<Item = Measurement>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Measurement, MeasurementSeries};
    use chrono::{TimeZone, Utc};

    #[test]
    fn window_keeps_trailing_samples_in_arrival_order() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let series: MeasurementSeries = (0..12u16)
            .map(|value| Measurement::new(value, base))
            .collect();

        let window = series.window(5);
        assert_eq!(window.start_index, 7);
        let values: Vec<u16> = window.samples.iter().map(|m| m.value()).collect();
        assert_eq!(values, vec![7, 8, 9, 10, 11]);
    }

    #[test]
    fn window_larger_than_series_starts_at_zero() {
        let mut series = MeasurementSeries::new();
        series.push(Measurement::now(80));
        let window = series.window(60);
        assert_eq!(window.start_index, 0);
        assert_eq!(window.len(), 1);
    }
}
