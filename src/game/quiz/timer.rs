use std::time::Duration;

/// Per-question countdown, owned by the quiz session. The timer only runs
/// between an explicit `start` and either expiry or `cancel`, so its lifetime
/// is tied to state transitions rather than to whoever happens to tick it.
#[derive(Clone, Debug, Default)]
pub struct CountdownTimer {
    time_limit: Duration,
    time_elapsed: Duration,
    running: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TimerTick {
    Idle,
    Running,
    SecondElapsed(u64),
    Expired,
}

impl CountdownTimer {
    pub fn start(&mut self, time_limit: Duration) {
        self.time_limit = time_limit;
        self.time_elapsed = Duration::default();
        self.running = true;
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Seconds left on the clock, rounded up so a freshly started timer reads
    /// as its full limit.
    pub fn seconds_remaining(&self) -> u64 {
        let remaining = self
            .time_limit
            .checked_sub(self.time_elapsed)
            .unwrap_or_default();
        if remaining.subsec_nanos() > 0 {
            remaining.as_secs() + 1
        } else {
            remaining.as_secs()
        }
    }

    pub fn tick(&mut self, dt: Duration) -> TimerTick {
        if !self.running {
            return TimerTick::Idle;
        }
        let seconds_before = self.seconds_remaining();
        self.time_elapsed += dt;
        if self.time_elapsed >= self.time_limit {
            self.running = false;
            return TimerTick::Expired;
        }
        let seconds_after = self.seconds_remaining();
        if seconds_after < seconds_before {
            TimerTick::SecondElapsed(seconds_after)
        } else {
            TimerTick::Running
        }
    }
}
