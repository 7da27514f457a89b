use std::thread::sleep;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Blocks until the next tick boundary.
    fn wait_for_tick(&mut self);
}

/// Sleeps to a fixed cadence. A tick that overruns reschedules from now
/// rather than firing a burst of catch-up ticks.
pub struct FixedRateClock {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl FixedRateClock {
    pub fn new(interval: Duration) -> Self {
        FixedRateClock { interval, next_tick: None }
    }
}

impl Clock for FixedRateClock {
    fn wait_for_tick(&mut self) {
        let now = Instant::now();

        let deadline = match self.next_tick {
            Some(deadline) if deadline > now => {
                sleep(deadline - now);
                deadline
            }
            Some(_) | None => now,
        };

        self.next_tick = Some(deadline + self.interval);
    }
}
