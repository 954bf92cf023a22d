//! Tick pacing

use std::thread;
use std::time::{Duration, Instant};

/// Paces the game loop
pub trait TickScheduler {
    /// Block until `interval` has passed since the previous tick
    fn wait_until_next_tick(&mut self, interval: Duration);
}

/// Wall-clock scheduler; sleeps to a rolling deadline
#[derive(Debug, Default)]
pub struct SleepScheduler {
    next_deadline: Option<Instant>,
}

impl SleepScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickScheduler for SleepScheduler {
    fn wait_until_next_tick(&mut self, interval: Duration) {
        let now = Instant::now();
        let deadline = self.next_deadline.unwrap_or(now) + interval;
        if deadline > now {
            thread::sleep(deadline - now);
            self.next_deadline = Some(deadline);
        } else {
            // Fell behind (stall, prompt): resync instead of bursting ticks
            self.next_deadline = Some(now);
        }
    }
}

/// Deterministic clock for tests: advances instantly
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    pub ticks: u64,
    pub elapsed: Duration,
}

impl TickScheduler for ManualClock {
    fn wait_until_next_tick(&mut self, interval: Duration) {
        self.ticks += 1;
        self.elapsed += interval;
    }
}

/// Tick interval for a tick rate
pub fn tick_interval(fps: u32) -> Duration {
    Duration::from_millis(1000 / u64::from(fps.max(1)))
}
