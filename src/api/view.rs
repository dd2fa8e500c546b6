use crate::error::ChartResult;
use crate::interaction::ViewportState;

use super::{ChartScene, RenderStyle};

/// Presentation strategy of a chart session.
///
/// `prepare` is pure and may run on a worker thread; its output is handed back
/// to the owner thread and swapped in whole by `present`.
pub trait ChartView {
    type Prepared: Send + 'static;

    fn prepare(scene: &ChartScene, style: &RenderStyle) -> ChartResult<Self::Prepared>;

    fn present(&mut self, prepared: Self::Prepared) -> ChartResult<()>;

    /// Drops whatever is currently shown.
    fn clear(&mut self);

    /// Pan/zoom state, for views that have one.
    fn viewport_snapshot(&self) -> Option<ViewportState> {
        None
    }
}
