//! Time source used for expiration arithmetic

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::{Arc, Mutex, PoisonError};

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually controlled time for tests
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Clock fixed at a unix timestamp; out-of-range values fall back to the epoch
    pub fn at_timestamp(secs: i64) -> Self {
        let now = Utc
            .timestamp_opt(secs, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        Self::new(now)
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = *now + by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::at_timestamp(1_000);
        assert_eq!(clock.now().timestamp(), 1_000);

        clock.advance(Duration::minutes(5));
        assert_eq!(clock.now().timestamp(), 1_300);

        clock.set(Utc.timestamp_opt(42, 0).unwrap());
        assert_eq!(clock.now().timestamp(), 42);
    }

    #[test]
    fn test_shared_clock_sees_updates() {
        let clock = Arc::new(FixedClock::at_timestamp(0));
        let shared: Arc<FixedClock> = Arc::clone(&clock);

        clock.advance(Duration::seconds(10));
        assert_eq!(Clock::now(&shared).timestamp(), 10);
    }
}
