//! Host-facing hooks around the session: observers and the simulated source.

pub mod observers;
pub mod simulator;

pub use observers::{SessionContext, SessionEvent, SessionObserver, SubscriptionId};
pub use simulator::{SIMULATOR_PERIOD, SimulatedSignal, SimulatorSource};
