use std::time::Duration;

/// Fixed-cadence tick scheduler fed with wall-clock frame times.
///
/// Consuming a tick subtracts the interval instead of zeroing the
/// accumulator, so fractional leftovers carry into the next tick.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickAccumulator {
    elapsed: Duration,
}

impl TickAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the time that passed since the previous frame.
    pub fn accumulate(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    /// Takes one tick out of the accumulator when at least `interval` has
    /// built up. Returns whether a tick is due.
    pub fn consume(&mut self, interval: Duration) -> bool {
        if self.elapsed < interval {
            return false;
        }

        self.elapsed -= interval;
        true
    }

    /// Drops any accumulated time, e.g. when a new game starts.
    pub fn clear(&mut self) {
        self.elapsed = Duration::ZERO;
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
