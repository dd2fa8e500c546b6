use serde::{Deserialize, Serialize};

use crate::core::{MIN_VISIBLE_POINTS, RangeDefaults};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{FULL_ZOOM_FACTOR, GestureThresholds};
use crate::render::Color;

/// Colors, strokes and label placement shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderStyle {
    #[serde(default = "default_background_color")]
    pub background_color: Color,
    #[serde(default = "default_gridline_color")]
    pub gridline_color: Color,
    #[serde(default = "default_gridline_width")]
    pub gridline_width: f64,
    #[serde(default = "default_label_color")]
    pub label_color: Color,
    #[serde(default = "default_label_font_size_px")]
    pub label_font_size_px: f64,
    /// Left inset of the value labels.
    #[serde(default = "default_label_left_margin_px")]
    pub label_left_margin_px: f64,
    /// Distance of the bottom label's top edge from the canvas bottom.
    #[serde(default = "default_bottom_label_margin_px")]
    pub bottom_label_margin_px: f64,
    #[serde(default = "default_series_color")]
    pub series_color: Color,
    #[serde(default = "default_series_stroke_width")]
    pub series_stroke_width: f64,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: default_background_color(),
            gridline_color: default_gridline_color(),
            gridline_width: default_gridline_width(),
            label_color: default_label_color(),
            label_font_size_px: default_label_font_size_px(),
            label_left_margin_px: default_label_left_margin_px(),
            bottom_label_margin_px: default_bottom_label_margin_px(),
            series_color: default_series_color(),
            series_stroke_width: default_series_stroke_width(),
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.gridline_color,
            self.label_color,
            self.series_color,
        ] {
            color
                .validate()
                .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        }
        for (name, value) in [
            ("gridline_width", self.gridline_width),
            ("label_font_size_px", self.label_font_size_px),
            ("series_stroke_width", self.series_stroke_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("label_left_margin_px", self.label_left_margin_px),
            ("bottom_label_margin_px", self.bottom_label_margin_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

/// Session bootstrap configuration.
///
/// Serializable so hosts can keep chart tuning next to their own settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_visible_window_size")]
    pub visible_window_size: usize,
    #[serde(default = "default_min_visible_points")]
    pub min_visible_points: usize,
    #[serde(default = "default_min_value")]
    pub default_min_value: f64,
    #[serde(default = "default_max_value")]
    pub default_max_value: f64,
    #[serde(default = "default_gridline_count")]
    pub gridline_count: usize,
    #[serde(default = "default_min_zoom_factor")]
    pub min_zoom_factor: i32,
    #[serde(default = "default_pan_threshold_px")]
    pub pan_threshold_px: f64,
    #[serde(default = "default_zoom_threshold_px")]
    pub zoom_threshold_px: f64,
    #[serde(default = "default_zoom_debounce_ms")]
    pub zoom_debounce_ms: u64,
    #[serde(default)]
    pub style: RenderStyle,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            visible_window_size: default_visible_window_size(),
            min_visible_points: default_min_visible_points(),
            default_min_value: default_min_value(),
            default_max_value: default_max_value(),
            gridline_count: default_gridline_count(),
            min_zoom_factor: default_min_zoom_factor(),
            pan_threshold_px: default_pan_threshold_px(),
            zoom_threshold_px: default_zoom_threshold_px(),
            zoom_debounce_ms: default_zoom_debounce_ms(),
            style: RenderStyle::default(),
        }
    }
}

impl ChartConfig {
    #[must_use]
    pub fn with_visible_window_size(mut self, size: usize) -> Self {
        self.visible_window_size = size;
        self
    }

    #[must_use]
    pub fn with_default_band(mut self, min: f64, max: f64) -> Self {
        self.default_min_value = min;
        self.default_max_value = max;
        self
    }

    #[must_use]
    pub fn with_zoom_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.zoom_debounce_ms = debounce_ms;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.min_visible_points == 0 {
            return Err(ChartError::InvalidConfig(
                "`min_visible_points` must be > 0".to_owned(),
            ));
        }
        self.range_defaults()
            .map_err(|err| ChartError::InvalidConfig(err.to_string()))?;
        if self.gridline_count == 0 {
            return Err(ChartError::InvalidConfig(
                "`gridline_count` must be > 0".to_owned(),
            ));
        }
        if !(1..=FULL_ZOOM_FACTOR).contains(&self.min_zoom_factor) {
            return Err(ChartError::InvalidConfig(format!(
                "`min_zoom_factor` must be in 1..={FULL_ZOOM_FACTOR}"
            )));
        }
        for (name, value) in [
            ("pan_threshold_px", self.pan_threshold_px),
            ("zoom_threshold_px", self.zoom_threshold_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        self.style.validate()
    }

    pub fn range_defaults(&self) -> ChartResult<RangeDefaults> {
        RangeDefaults::new(self.default_min_value, self.default_max_value)
    }

    #[must_use]
    pub fn gesture_thresholds(&self) -> GestureThresholds {
        GestureThresholds {
            pan_px: self.pan_threshold_px,
            zoom_px: self.zoom_threshold_px,
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to serialize config: {e}")))
    }

    /// Parses and validates a config. Missing fields take their defaults.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidConfig(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }
}

fn default_visible_window_size() -> usize {
    60
}

fn default_min_visible_points() -> usize {
    MIN_VISIBLE_POINTS
}

fn default_min_value() -> f64 {
    70.0
}

fn default_max_value() -> f64 {
    100.0
}

fn default_gridline_count() -> usize {
    5
}

fn default_min_zoom_factor() -> i32 {
    5
}

fn default_pan_threshold_px() -> f64 {
    30.0
}

fn default_zoom_threshold_px() -> f64 {
    10.0
}

fn default_zoom_debounce_ms() -> u64 {
    300
}

fn default_background_color() -> Color {
    Color::from_rgba8(0xAD, 0xD8, 0xE6, 0xFF)
}

fn default_gridline_color() -> Color {
    Color::from_rgba8(0x00, 0x00, 0x00, 0x55)
}

fn default_gridline_width() -> f64 {
    1.0
}

fn default_label_color() -> Color {
    Color::rgb(0.0, 0.0, 0.0)
}

fn default_label_font_size_px() -> f64 {
    10.0
}

fn default_label_left_margin_px() -> f64 {
    9.0
}

fn default_bottom_label_margin_px() -> f64 {
    24.0
}

fn default_series_color() -> Color {
    Color::rgb(1.0, 0.0, 0.0)
}

fn default_series_stroke_width() -> f64 {
    2.0
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            ChartConfig::from_json_str(r#"{ "visible_window_size": 120 }"#).expect("config");
        assert_eq!(config.visible_window_size, 120);
        assert_eq!(config.gridline_count, 5);
        assert_eq!(config.zoom_debounce_ms, 300);
        assert_eq!(config.style.label_left_margin_px, 9.0);
    }

    #[test]
    fn zero_gridlines_are_rejected() {
        assert!(ChartConfig::from_json_str(r#"{ "gridline_count": 0 }"#).is_err());
    }

    #[test]
    fn zoom_floor_outside_percent_range_is_rejected() {
        let config = ChartConfig {
            min_zoom_factor: 0,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
