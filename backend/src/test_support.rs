//! Test utilities shared by unit tests (in `src/`) and integration tests (in
//! `tests/`).

use std::sync::Mutex;

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// Clock that stays put until advanced.
///
/// # Examples
/// ```
/// use backend::test_support::MutableClock;
/// use chrono::{TimeDelta, TimeZone, Utc};
/// use mockable::Clock;
///
/// let start = Utc.with_ymd_and_hms(2026, 1, 20, 9, 0, 0).single().expect("timestamp");
/// let clock = MutableClock::new(start);
/// clock.advance(TimeDelta::hours(2));
/// assert_eq!(clock.utc(), start + TimeDelta::hours(2));
/// ```
#[derive(Debug)]
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Freeze time at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Move the clock forward.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}
