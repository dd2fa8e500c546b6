//! pulse-chart: streaming heart-rate chart core.
//!
//! A session keeps an append-only measurement series, fits a padded value
//! range over a trailing window, projects it to pixels and hands the result to
//! a view. `SimpleChart` redraws a frame through any `Renderer`;
//! `CachedChart` keeps rasterized layers and answers pan/zoom gestures by
//! cropping them.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{CachedChart, ChartConfig, ChartSession, SimpleChart};
pub use crate::core::{Measurement, MeasurementSeries, Viewport};
pub use error::{ChartError, ChartResult};
