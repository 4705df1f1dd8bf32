use std::time::{Duration, Instant};

/// Fixed-interval tick source. Holds at most one deadline, so re-arming
/// replaces rather than stacks.
pub struct TickTimer {
    period: Duration,
    deadline: Option<Instant>,
}

impl TickTimer {
    pub fn new(period: Duration) -> Self {
        TickTimer { period, deadline: None }
    }

    pub fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn time_until(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now))
    }

    // A late check fires a single tick and schedules the next a full period out
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                let next = deadline + self.period;
                self.deadline = Some(if next > now { next } else { now + self.period });
                true
            }
            _ => false,
        }
    }
}
