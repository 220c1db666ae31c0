//! Time source for everything that depends on the current Unix timestamp.
//! Instructions never read the system time directly: the manager asks its
//! [`Clock`] once per call and passes the timestamp down, so rate limit math
//! can be unit tested with [`ManualClock`] and no global state.

use std::{
    sync::{
        atomic::{AtomicI64, Ordering},
        Arc,
    },
    time::{SystemTime, UNIX_EPOCH},
};

pub type UnixTimestamp = i64;

pub trait Clock {
    fn unix_timestamp(&self) -> UnixTimestamp;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_timestamp(&self) -> UnixTimestamp {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to. Clones share the same time, so a test
/// can keep a handle while the manager owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(now: UnixTimestamp) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(now)),
        }
    }

    pub fn set(&self, now: UnixTimestamp) {
        self.now.store(now, Ordering::SeqCst);
    }

    pub fn advance(&self, seconds: i64) {
        self.now.fetch_add(seconds, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn unix_timestamp(&self) -> UnixTimestamp {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_is_shared() {
        let clock = ManualClock::new(100);
        let handle = clock.clone();
        handle.advance(50);
        assert_eq!(clock.unix_timestamp(), 150);
        handle.set(7);
        assert_eq!(clock.unix_timestamp(), 7);
    }

    #[test]
    fn test_system_clock_is_after_epoch() {
        assert!(SystemClock.unix_timestamp() > 1_600_000_000);
    }
}
