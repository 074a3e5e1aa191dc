//! The n-th (or n-th from last) occurrence of a weekday within a month.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar::{self, MAX_WEEKS_IN_MONTH};
use crate::error::{Result, ScheduleError};

/// Matches e.g. "the second Monday" (`ordinal = 2`) or "the last Friday"
/// (`ordinal = -1`) of every month.
///
/// Week positions are counted in seven-day blocks from the first day of the
/// month for positive ordinals, and from the last day for negative ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayInMonth {
    weekday: Weekday,
    ordinal: i32,
}

impl DayInMonth {
    /// # Errors
    /// Returns [`ScheduleError::Validation`] unless `ordinal` is in
    /// `-5..=-1` or `1..=5`.
    pub fn new(weekday: Weekday, ordinal: i32) -> Result<Self> {
        if ordinal == 0 || !(-MAX_WEEKS_IN_MONTH..=MAX_WEEKS_IN_MONTH).contains(&ordinal) {
            return Err(ScheduleError::Validation(format!(
                "ordinal={ordinal} is not in [-5, 5] excluding 0"
            )));
        }
        Ok(Self { weekday, ordinal })
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        date.weekday() == self.weekday && self.week_matches(date)
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn week_matches(&self, date: NaiveDate) -> bool {
        if self.ordinal > 0 {
            calendar::week_of_month_from_start(date) == self.ordinal.unsigned_abs()
        } else {
            calendar::week_of_month_from_end(date) == self.ordinal.unsigned_abs()
        }
    }
}

impl fmt::Display for DayInMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{} of month", self.weekday, self.ordinal)
    }
}
