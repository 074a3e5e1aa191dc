//! Calendar arithmetic shared by the temporal expressions.
//!
//! Everything here works on proleptic Gregorian `NaiveDate`s: there is no
//! timezone or instant semantics anywhere in this crate.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, Weekday};

use crate::error::{Result, ScheduleError};

/// Number of days in a week.
pub const DAYS_IN_WEEK: u32 = 7;

/// Largest number of (partial) weeks any month spans.
pub const MAX_WEEKS_IN_MONTH: i32 = 5;

/// A leap year, used to check whether a month/day pair can ever exist.
const LEAP_REFERENCE_YEAR: i32 = 2000;

/// A day of a month without a year, e.g. "September 1st".
///
/// February 29th is a valid `MonthDay`; February 30th is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthDay {
    month: Month,
    day: u32,
}

impl MonthDay {
    /// Build a `MonthDay`, rejecting days that do not exist in `month` in any year.
    ///
    /// # Errors
    /// Returns [`ScheduleError::Range`] when `day` is outside 1..=31 or past
    /// the last day of `month` in a leap year.
    pub fn new(month: Month, day: u32) -> Result<Self> {
        if !(1..=31).contains(&day) {
            return Err(ScheduleError::Range(format!(
                "day of month {day} is not in 1..=31"
            )));
        }
        let max = days_in_month(LEAP_REFERENCE_YEAR, month.number_from_month());
        if day > max {
            return Err(ScheduleError::Range(format!(
                "day of month {day} does not exist in {}",
                month.name()
            )));
        }
        Ok(Self { month, day })
    }

    /// Build a `MonthDay` from a numeric month (1-12) and day.
    ///
    /// # Errors
    /// Returns [`ScheduleError::Range`] when either number is out of domain.
    pub fn from_numbers(month: u32, day: u32) -> Result<Self> {
        Self::new(month_from_number(month)?, day)
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{:02}-{:02}", self.month.number_from_month(), self.day)
    }
}

/// Parses the `"MM-DD"` shape used by schedule configuration documents.
impl FromStr for MonthDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split('-').collect();
        if parts.len() != 2 {
            return Err(ScheduleError::Format(format!(
                "expected MM-DD, got {s:?}"
            )));
        }

        let month: u32 = parts[0]
            .trim()
            .parse()
            .map_err(|_| ScheduleError::Format(format!("invalid month in {s:?}")))?;
        let day: u32 = parts[1]
            .trim()
            .parse()
            .map_err(|_| ScheduleError::Format(format!("invalid day in {s:?}")))?;

        if !(1..=12).contains(&month) {
            return Err(ScheduleError::Range(format!(
                "month value {month} is not in 1..=12"
            )));
        }
        if !(1..=31).contains(&day) {
            return Err(ScheduleError::Range(format!(
                "day of month {day} is not in 1..=31"
            )));
        }

        Self::from_numbers(month, day)
    }
}

/// Convert a 1-based month number into a [`Month`].
///
/// # Errors
/// Returns [`ScheduleError::Range`] when `month` is outside 1..=12.
pub fn month_from_number(month: u32) -> Result<Month> {
    u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or_else(|| ScheduleError::Range(format!("month value {month} is not in 1..=12")))
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Day number of the last day in `date`'s month.
pub fn last_day_of_month(date: NaiveDate) -> u32 {
    days_in_month(date.year(), date.month())
}

/// 1-based week of the month counted from the first day: days 1-7 are week 1,
/// 8-14 week 2, and so on.
pub fn week_of_month_from_start(date: NaiveDate) -> u32 {
    (date.day() - 1) / DAYS_IN_WEEK + 1
}

/// 1-based week of the month counted backwards from the last day: the final
/// seven days are week 1, the seven before that week 2, and so on.
pub fn week_of_month_from_end(date: NaiveDate) -> u32 {
    let days_remaining = last_day_of_month(date) - date.day();
    days_remaining / DAYS_IN_WEEK + 1
}

/// Whole weeks from `from` to `to`, truncated toward zero. Negative when `to`
/// is earlier than `from`.
pub fn weeks_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_weeks()
}

/// Parse a weekday name such as `MONDAY`, `Monday` or `mon`.
///
/// # Errors
/// Returns [`ScheduleError::Validation`] for an unrecognised name.
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    let weekday = match name.trim().to_ascii_uppercase().as_str() {
        "MONDAY" | "MON" => Weekday::Mon,
        "TUESDAY" | "TUE" => Weekday::Tue,
        "WEDNESDAY" | "WED" => Weekday::Wed,
        "THURSDAY" | "THU" => Weekday::Thu,
        "FRIDAY" | "FRI" => Weekday::Fri,
        "SATURDAY" | "SAT" => Weekday::Sat,
        "SUNDAY" | "SUN" => Weekday::Sun,
        _ => {
            return Err(ScheduleError::Validation(format!(
                "unknown day of week {name:?}"
            )))
        }
    };
    Ok(weekday)
}

/// Parse a month name such as `JANUARY`, `January` or `jan`.
///
/// # Errors
/// Returns [`ScheduleError::Validation`] for an unrecognised name.
pub fn parse_month(name: &str) -> Result<Month> {
    let month = match name.trim().to_ascii_uppercase().as_str() {
        "JANUARY" | "JAN" => Month::January,
        "FEBRUARY" | "FEB" => Month::February,
        "MARCH" | "MAR" => Month::March,
        "APRIL" | "APR" => Month::April,
        "MAY" => Month::May,
        "JUNE" | "JUN" => Month::June,
        "JULY" | "JUL" => Month::July,
        "AUGUST" | "AUG" => Month::August,
        "SEPTEMBER" | "SEP" => Month::September,
        "OCTOBER" | "OCT" => Month::October,
        "NOVEMBER" | "NOV" => Month::November,
        "DECEMBER" | "DEC" => Month::December,
        _ => {
            return Err(ScheduleError::Validation(format!(
                "unknown month {name:?}"
            )))
        }
    };
    Ok(month)
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
///
/// # Errors
/// Returns [`ScheduleError::Format`] if the string is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| ScheduleError::Format(format!("invalid date {s:?}: {e}")))
}
