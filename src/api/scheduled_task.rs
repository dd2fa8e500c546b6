use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    /// Fires once after the delay, then goes idle.
    Once,
    /// Fires every period until cancelled.
    Periodic,
}

/// Host-driven timer with at most one pending firing.
///
/// Nothing runs in the background: the owner calls [`ScheduledTask::poll`]
/// with the current instant and acts when it returns `true`. Scheduling again
/// cancels and replaces the pending firing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledTask {
    mode: TaskMode,
    interval: Duration,
    due_at: Option<Instant>,
}

impl ScheduledTask {
    #[must_use]
    pub fn once(delay: Duration) -> Self {
        Self {
            mode: TaskMode::Once,
            interval: delay,
            due_at: None,
        }
    }

    #[must_use]
    pub fn periodic(period: Duration) -> Self {
        Self {
            mode: TaskMode::Periodic,
            interval: period,
            due_at: None,
        }
    }

    #[must_use]
    pub fn mode(&self) -> TaskMode {
        self.mode
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn due_at(&self) -> Option<Instant> {
        self.due_at
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.due_at.is_some()
    }

    /// Arms the timer to fire `interval` after `now`. Returns `true` when a
    /// pending firing was replaced.
    pub fn schedule(&mut self, now: Instant) -> bool {
        self.due_at.replace(now + self.interval).is_some()
    }

    /// Returns `true` when a pending firing was dropped.
    pub fn cancel(&mut self) -> bool {
        self.due_at.take().is_some()
    }

    /// Fires at most once per call.
    ///
    /// A periodic task that fell behind by more than a period skips the
    /// missed firings instead of bursting.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due_at) = self.due_at else {
            return false;
        };
        if now < due_at {
            return false;
        }
        self.due_at = match self.mode {
            TaskMode::Once => None,
            TaskMode::Periodic => {
                let next = due_at + self.interval;
                Some(if next <= now { now + self.interval } else { next })
            }
        };
        true
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::ScheduledTask;

    #[test]
    fn rescheduling_replaces_pending_firing() {
        let start = Instant::now();
        let mut task = ScheduledTask::once(Duration::from_millis(300));
        assert!(!task.schedule(start));
        assert!(task.schedule(start + Duration::from_millis(200)));

        assert!(!task.poll(start + Duration::from_millis(350)));
        assert!(task.poll(start + Duration::from_millis(500)));
        assert!(!task.poll(start + Duration::from_millis(900)));
    }

    #[test]
    fn periodic_task_keeps_cadence() {
        let start = Instant::now();
        let mut task = ScheduledTask::periodic(Duration::from_secs(1));
        task.schedule(start);

        assert!(!task.poll(start + Duration::from_millis(999)));
        assert!(task.poll(start + Duration::from_millis(1000)));
        assert!(!task.poll(start + Duration::from_millis(1500)));
        assert!(task.poll(start + Duration::from_millis(2100)));
        assert_eq!(task.due_at(), Some(start + Duration::from_secs(3)));
    }

    #[test]
    fn cancel_reports_pending_state() {
        let mut task = ScheduledTask::once(Duration::from_millis(10));
        assert!(!task.cancel());
        task.schedule(Instant::now());
        assert!(task.cancel());
        assert!(!task.is_pending());
    }
}
