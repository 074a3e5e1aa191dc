//! # slot-schedule
//!
//! Composable temporal expressions and capacity schedules over calendar dates.
//!
//! A [`Schedule`] is an ordered list of [`ScheduleElement`]s, each pairing a
//! [`TemporalExpression`] ("the second Monday of every month", "June through
//! September", "every other Saturday", and unions/intersections/differences
//! of those) with a number of bookable slots. Schedules answer whether they
//! occur on a date, how many slots a date offers, and where the next or
//! previous occurrence is.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::{Month, NaiveDate, Weekday};
//! use slot_schedule::{DayInMonth, Intersection, RangeEveryYear, Schedule, ScheduleElement};
//!
//! // Second Monday of every month, January through June.
//! let rule = Intersection::new([
//!     slot_schedule::TemporalExpression::from(DayInMonth::new(Weekday::Mon, 2).unwrap()),
//!     RangeEveryYear::months(Month::January, Month::June).into(),
//! ])
//! .unwrap();
//! let schedule = Schedule::new([ScheduleElement::new(rule, 20)]);
//!
//! let date = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
//! assert_eq!(
//!     schedule.next_occurrence(date),
//!     NaiveDate::from_ymd_opt(2024, 1, 8)
//! );
//! ```
//!
//! ## Modules
//!
//! - [`expression`] — the temporal expression algebra
//! - [`schedule`] — schedules, capacity lookup, occurrence search
//! - [`config`] — JSON configuration documents → schedules
//! - [`calendar`] — shared calendar arithmetic and name parsing
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod error;
pub mod expression;
pub mod schedule;

pub use calendar::MonthDay;
pub use config::{parse_schedule, ScheduleConfig};
pub use error::{Result, ScheduleError};
pub use expression::{
    DayInMonth, DayInWeek, Difference, Intersection, RangeEveryYear, TemporalExpression, Union,
};
pub use schedule::{FutureDates, PastDates, Schedule, ScheduleElement};
