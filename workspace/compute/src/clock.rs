//! Calendar source for picking the current fiscal quarter.

use chrono::{Local, NaiveDate};
use common::Quarter;
use std::fmt::Debug;

/// Supplies "today" to the comparison flow.
pub trait Clock: Send + Sync + Debug {
    fn today(&self) -> NaiveDate;
}

/// Host clock. Uses the local calendar date, no timezone adjustment.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.today
    }
}

/// Quarter the clock's current date falls in.
pub fn current_quarter(clock: &dyn Clock) -> Quarter {
    Quarter::from_date(clock.today())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_quarter() {
        let cases = [
            (NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(), Quarter::Q1),
            (NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), Quarter::Q2),
            (NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(), Quarter::Q3),
            (NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(), Quarter::Q4),
        ];

        for (date, expected) in cases {
            let clock = FixedClock::new(date);
            assert_eq!(current_quarter(&clock), expected, "date {}", date);
        }
    }

    #[test]
    fn test_system_clock_matches_local_date() {
        let clock = SystemClock;
        let quarter = current_quarter(&clock);
        assert_eq!(quarter, Quarter::from_date(Local::now().date_naive()));
    }
}
