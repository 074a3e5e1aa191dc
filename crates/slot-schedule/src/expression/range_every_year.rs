//! Yearly recurring month or month/day ranges, e.g. "June through September"
//! or "March 12th to July 20th".

use std::fmt;

use chrono::{Datelike, Month, NaiveDate};

use crate::calendar::MonthDay;
use crate::error::{Result, ScheduleError};

/// Matches every date inside a month (and optionally day) window, every year.
///
/// A bound day of `0` means the whole month at that end of the range.
///
/// Months compare numerically: a range whose end month comes before its start
/// month (e.g. November to February) does not wrap across the year end and
/// only matches the two boundary months.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RangeEveryYear {
    start_month: Month,
    end_month: Month,
    start_day: u32,
    end_day: u32,
}

impl RangeEveryYear {
    /// Build a range with explicit bound days (`0` = unbounded).
    ///
    /// # Errors
    /// Returns [`ScheduleError::Validation`] if either day is greater than 31.
    pub fn new(start_month: Month, end_month: Month, start_day: u32, end_day: u32) -> Result<Self> {
        for (label, day) in [("start_day", start_day), ("end_day", end_day)] {
            if day > 31 {
                return Err(ScheduleError::Validation(format!(
                    "{label}={day} is not in 0..=31"
                )));
            }
        }
        Ok(Self {
            start_month,
            end_month,
            start_day,
            end_day,
        })
    }

    /// Whole months from `start_month` through `end_month`.
    pub fn months(start_month: Month, end_month: Month) -> Self {
        Self {
            start_month,
            end_month,
            start_day: 0,
            end_day: 0,
        }
    }

    /// Every day of a single month.
    pub fn month(month: Month) -> Self {
        Self::months(month, month)
    }

    /// From `start` through `end`, both days inclusive.
    pub fn days(start: MonthDay, end: MonthDay) -> Self {
        Self {
            start_month: start.month(),
            end_month: end.month(),
            start_day: start.day(),
            end_day: end.day(),
        }
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        if self.start_month == self.end_month {
            self.start_month_includes(date) && self.end_month_includes(date)
        } else {
            self.months_between_include(date)
                || self.start_month_includes(date)
                || self.end_month_includes(date)
        }
    }

    pub fn start_month(&self) -> Month {
        self.start_month
    }

    pub fn end_month(&self) -> Month {
        self.end_month
    }

    pub fn start_day(&self) -> u32 {
        self.start_day
    }

    pub fn end_day(&self) -> u32 {
        self.end_day
    }

    fn months_between_include(&self, date: NaiveDate) -> bool {
        let month = date.month();
        month > self.start_month.number_from_month() && month < self.end_month.number_from_month()
    }

    fn start_month_includes(&self, date: NaiveDate) -> bool {
        date.month() == self.start_month.number_from_month()
            && (self.start_day == 0 || date.day() >= self.start_day)
    }

    fn end_month_includes(&self, date: NaiveDate) -> bool {
        date.month() == self.end_month.number_from_month()
            && (self.end_day == 0 || date.day() <= self.end_day)
    }
}

fn write_bound(f: &mut fmt::Formatter<'_>, month: Month, day: u32) -> fmt::Result {
    if day == 0 {
        write!(f, "{}", month.name())
    } else {
        write!(f, "{} {}", month.name(), day)
    }
}

impl fmt::Display for RangeEveryYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("every year ")?;
        if self.start_month == self.end_month && self.start_day == 0 && self.end_day == 0 {
            return write!(f, "in {}", self.start_month.name());
        }
        write_bound(f, self.start_month, self.start_day)?;
        f.write_str(" to ")?;
        write_bound(f, self.end_month, self.end_day)
    }
}
