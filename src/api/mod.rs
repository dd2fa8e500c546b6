mod axis;
mod cached_chart;
mod config;
mod feed;
mod rasterizer;
mod render_job;
mod scene;
mod scheduled_task;
mod session;
pub mod session_format;
mod simple_chart;
mod snapshot;
mod view;

pub use axis::{AxisLabel, AxisLayout, AxisRenderer, format_axis_value};
pub use cached_chart::{CachedChart, RasterLayers};
pub use config::{ChartConfig, RenderStyle};
pub use feed::{FeedMessage, FeedReceiver, FeedSender, feed_channel};
pub use rasterizer::ChartRasterizer;
pub use render_job::{RenderJob, RenderOutput};
pub use scene::{ChartScene, build_chart_scene};
pub use scheduled_task::{ScheduledTask, TaskMode};
pub use session::{ChartSession, RenderSummary};
pub use session_format::{encode_values, parse_measurements, parse_values};
pub use simple_chart::SimpleChart;
pub use snapshot::{SESSION_SNAPSHOT_JSON_SCHEMA_V1, SessionSnapshot, SessionSnapshotJsonContractV1};
pub use view::ChartView;
