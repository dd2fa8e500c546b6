use serde::{Deserialize, Serialize};

use crate::core::Viewport;

/// Handle returned by `ChartSession::subscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(pub u64);

/// Read-only session state passed alongside every event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub viewport: Viewport,
    pub series_len: usize,
    pub window_size: usize,
    pub save_enabled: bool,
    pub generation: u64,
}

/// Event stream exposed to session observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    MeasurementAppended { value: u16, series_len: usize },
    DataReset,
    DataLoaded { series_len: usize },
    WindowSizeChanged { window_size: usize },
    SaveAvailabilityChanged { enabled: bool },
    Rendered {
        generation: u64,
        start_index: usize,
        sample_count: usize,
    },
    ConnectionChanged {
        connected: bool,
        error: Option<String>,
    },
}

/// Hook for host code that reacts to session changes.
///
/// Observers read state through the context; they cannot reach into the
/// session while it dispatches.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent, context: SessionContext);
}

impl<F> SessionObserver for F
where
    F: FnMut(&SessionEvent, SessionContext),
{
    fn on_event(&mut self, event: &SessionEvent, context: SessionContext) {
        self(event, context);
    }
}
