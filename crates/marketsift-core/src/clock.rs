use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Monotonic time source injected into the cache so TTL behavior can be
/// driven in tests without sleeping.
pub trait Clock: Send + Sync {
    /// Monotonic elapsed time since an arbitrary fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock for tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().expect("clock lock is not poisoned");
        *now += by;
    }

    pub fn set(&self, to: Duration) {
        let mut now = self.now.lock().expect("clock lock is not poisoned");
        *now = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().expect("clock lock is not poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_on_demand() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);

        clock.advance(Duration::from_secs(299));
        assert_eq!(clock.now(), Duration::from_secs(299));

        clock.advance(Duration::from_secs(2));
        assert_eq!(clock.now(), Duration::from_secs(301));
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }
}
