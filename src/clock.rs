//! Time sources for [`Generator`](crate::Generator).

use chrono::{DateTime, Utc};

/// Something that can tell the current time.
///
/// Implemented for closures, so a test can hand in `|| fixed_instant`.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock, in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> DateTime<Utc>,
{
    fn now(&self) -> DateTime<Utc> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_and_closure_clocks() {
        let at = Utc.with_ymd_and_hms(2019, 6, 3, 20, 34, 58).unwrap();
        assert_eq!(FixedClock(at).now(), at);
        assert_eq!((move || at).now(), at);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }
}
