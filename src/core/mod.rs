pub mod measurement;
pub mod projection;
pub mod range;
pub mod types;
pub mod windowing;

pub use measurement::{Measurement, MeasurementSeries, VisibleWindow};
pub use projection::{ScreenPoint, nearest_point, project_window};
pub use range::{RangeDefaults, ValueRange, fit_value_range};
pub use types::Viewport;
pub use windowing::{MIN_VISIBLE_POINTS, clamp_window_size, window_start_index, zoom_step};
