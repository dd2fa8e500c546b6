use serde::{Deserialize, Serialize};

use crate::core::Measurement;
use crate::error::{ChartError, ChartResult};

/// Pad applied on both sides when the fitted span collapses to zero.
pub const FLAT_RANGE_BUFFER: f64 = 2.0;
/// Pad ratio applied to a non-empty span.
pub const RANGE_BUFFER_RATIO: f64 = 0.1;

/// Band the chart always shows, even when every sample sits inside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeDefaults {
    pub default_min: f64,
    pub default_max: f64,
}

impl Default for RangeDefaults {
    fn default() -> Self {
        Self {
            default_min: 70.0,
            default_max: 100.0,
        }
    }
}

impl RangeDefaults {
    pub fn new(default_min: f64, default_max: f64) -> ChartResult<Self> {
        Self {
            default_min,
            default_max,
        }
        .validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.default_min.is_finite() || !self.default_max.is_finite() {
            return Err(ChartError::InvalidConfig(
                "default value band must be finite".to_owned(),
            ));
        }
        if self.default_min < 0.0 || self.default_min > self.default_max {
            return Err(ChartError::InvalidConfig(
                "default value band must satisfy 0 <= min <= max".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Display value range of one render pass.
///
/// `min`/`max` are the fitted bounds; the buffered pair is what the axis
/// labels show. The buffered minimum never drops below zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
    pub min_buffered: f64,
    pub max_buffered: f64,
}

impl ValueRange {
    #[must_use]
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn buffered_span(self) -> f64 {
        self.max_buffered - self.min_buffered
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Fits the display range of a window.
///
/// The range is always recomputed from scratch; windows are tens of samples so
/// a single linear scan is cheap. Returns `None` for an empty window, which
/// callers treat as "nothing to draw yet".
#[must_use]
pub fn fit_value_range(window: &[Measurement], defaults: RangeDefaults) -> Option<ValueRange> {
    let (mut min, mut max) = window
        .iter()
        .map(|sample| f64::from(sample.value()))
        .fold(None, |acc: Option<(f64, f64)>, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })?;

    if min > defaults.default_min {
        min = defaults.default_min;
    }
    if max < defaults.default_max {
        max = defaults.default_max;
    }

    let diff = max - min;
    let buffer = if diff > 0.0 {
        diff * RANGE_BUFFER_RATIO
    } else {
        FLAT_RANGE_BUFFER
    };

    Some(ValueRange {
        min,
        max,
        min_buffered: (min - buffer).max(0.0),
        max_buffered: max + buffer,
    })
}
