use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::api::{FeedSender, ScheduledTask};
use crate::core::Measurement;
use crate::error::{ChartError, ChartResult};

/// Interval between simulated readings.
pub const SIMULATOR_PERIOD: Duration = Duration::from_secs(1);

/// Triangle wave bouncing between `min` and `max` in `step` increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedSignal {
    max: u16,
    min: u16,
    step: u16,
    current: u16,
    rising: bool,
}

impl Default for SimulatedSignal {
    fn default() -> Self {
        Self {
            max: 120,
            min: 80,
            step: 2,
            current: 90,
            rising: true,
        }
    }
}

impl SimulatedSignal {
    pub fn new(max: u16, min: u16, step: u16, start: u16, rising: bool) -> ChartResult<Self> {
        if min > max {
            return Err(ChartError::InvalidConfig(
                "simulator min must be <= max".to_owned(),
            ));
        }
        if step == 0 {
            return Err(ChartError::InvalidConfig(
                "simulator step must be > 0".to_owned(),
            ));
        }
        Ok(Self {
            max,
            min,
            step,
            current: start,
            rising,
        })
    }

    #[must_use]
    pub fn current(&self) -> u16 {
        self.current
    }

    #[must_use]
    pub fn is_rising(&self) -> bool {
        self.rising
    }

    /// Advances one step and returns the new value. Crossing a bound clamps
    /// to it and flips the direction.
    pub fn next_value(&mut self) -> u16 {
        self.current = if self.rising {
            match self.current.checked_add(self.step) {
                Some(next) if next <= self.max => next,
                _ => {
                    self.rising = false;
                    self.max
                }
            }
        } else {
            match self.current.checked_sub(self.step) {
                Some(next) if next >= self.min => next,
                _ => {
                    self.rising = true;
                    self.min
                }
            }
        };
        self.current
    }
}

/// Feeds a [`SimulatedSignal`] into a session feed once per period.
///
/// Timing is host-driven: call [`SimulatorSource::poll`] from the owner loop.
#[derive(Debug)]
pub struct SimulatorSource {
    signal: SimulatedSignal,
    timer: ScheduledTask,
    sender: FeedSender,
}

impl SimulatorSource {
    #[must_use]
    pub fn new(signal: SimulatedSignal, sender: FeedSender) -> Self {
        Self {
            signal,
            timer: ScheduledTask::periodic(SIMULATOR_PERIOD),
            sender,
        }
    }

    #[must_use]
    pub fn signal(&self) -> SimulatedSignal {
        self.signal
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.is_pending()
    }

    /// Reports the source as connected and arms the periodic timer.
    pub fn start(&mut self, now: Instant) -> bool {
        debug!(signal = ?self.signal, "start simulator");
        self.timer.schedule(now);
        self.sender.send_connection(true, None)
    }

    pub fn stop(&mut self) -> bool {
        if !self.timer.cancel() {
            return false;
        }
        debug!("stop simulator");
        self.sender.send_connection(false, None)
    }

    /// Emits one reading when the period elapsed. Returns the value sent.
    /// A closed feed stops the simulator.
    pub fn poll(&mut self, now: Instant) -> Option<u16> {
        if !self.timer.poll(now) {
            return None;
        }
        let value = self.signal.next_value();
        if !self.sender.send_measurement(Measurement::now(value)) {
            debug!("simulator feed closed");
            self.timer.cancel();
            return None;
        }
        trace!(value, "simulated measurement");
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::SimulatedSignal;

    #[test]
    fn signal_bounces_between_bounds() {
        let mut signal = SimulatedSignal::new(10, 4, 3, 8, true).expect("signal");
        let values: Vec<u16> = (0..6).map(|_| signal.next_value()).collect();
        assert_eq!(values, vec![10, 7, 4, 4, 7, 10]);
    }

    #[test]
    fn falling_below_zero_clamps_to_min() {
        let mut signal = SimulatedSignal::new(5, 0, 4, 2, false).expect("signal");
        assert_eq!(signal.next_value(), 0);
        assert!(signal.is_rising());
        assert_eq!(signal.next_value(), 4);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(SimulatedSignal::new(80, 120, 2, 90, true).is_err());
        assert!(SimulatedSignal::new(120, 80, 0, 90, true).is_err());
    }
}
