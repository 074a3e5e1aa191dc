//! Weekly recurrences: every Monday, or every N-th week counted from a
//! reference date.

use std::fmt;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calendar;
use crate::error::{Result, ScheduleError};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Cadence {
    EveryWeek(Weekday),
    EveryNthWeek { ordinal: u32, reference: NaiveDate },
}

/// Matches a weekday either every week or every `ordinal` weeks.
///
/// In every-N-th-week mode the weekday is the reference date's weekday and a
/// date matches when its whole-week distance from the reference (in either
/// direction) is a multiple of `ordinal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DayInWeek {
    cadence: Cadence,
}

impl DayInWeek {
    /// Every week on `weekday`.
    pub fn every(weekday: Weekday) -> Self {
        Self {
            cadence: Cadence::EveryWeek(weekday),
        }
    }

    /// Every `ordinal` weeks, on the weekday of `reference`.
    ///
    /// # Errors
    /// Returns [`ScheduleError::Validation`] if `ordinal` is zero.
    pub fn every_nth(ordinal: u32, reference: NaiveDate) -> Result<Self> {
        if ordinal < 1 {
            return Err(ScheduleError::Validation(
                "'ordinal' must be >= 1".to_string(),
            ));
        }
        Ok(Self {
            cadence: Cadence::EveryNthWeek { ordinal, reference },
        })
    }

    /// Build from loosely-typed parts, as found in configuration documents.
    ///
    /// Exactly one mode must be populated: either `weekday` alone (with
    /// `ordinal == 0`), or `reference` with `ordinal >= 1` and no weekday.
    ///
    /// # Errors
    /// Returns [`ScheduleError::Validation`] for any other combination.
    pub fn from_parts(
        weekday: Option<Weekday>,
        ordinal: u32,
        reference: Option<NaiveDate>,
    ) -> Result<Self> {
        match (weekday, ordinal, reference) {
            (Some(weekday), 0, None) => Ok(Self::every(weekday)),
            (None, ordinal, Some(reference)) if ordinal >= 1 => Self::every_nth(ordinal, reference),
            _ => Err(ScheduleError::Validation(
                "day in week needs either a day of week (without ordinal or reference date), \
                 or a reference date with ordinal >= 1 (without day of week)"
                    .to_string(),
            )),
        }
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        match self.cadence {
            Cadence::EveryWeek(weekday) => date.weekday() == weekday,
            Cadence::EveryNthWeek { ordinal, reference } => {
                date.weekday() == reference.weekday()
                    && calendar::weeks_between(reference, date).rem_euclid(i64::from(ordinal)) == 0
            }
        }
    }

    /// The weekday this expression matches on.
    pub fn weekday(&self) -> Weekday {
        match self.cadence {
            Cadence::EveryWeek(weekday) => weekday,
            Cadence::EveryNthWeek { reference, .. } => reference.weekday(),
        }
    }

    /// Week interval; `1` in every-week mode.
    pub fn ordinal(&self) -> u32 {
        match self.cadence {
            Cadence::EveryWeek(_) => 1,
            Cadence::EveryNthWeek { ordinal, .. } => ordinal,
        }
    }

    pub fn reference_date(&self) -> Option<NaiveDate> {
        match self.cadence {
            Cadence::EveryWeek(_) => None,
            Cadence::EveryNthWeek { reference, .. } => Some(reference),
        }
    }
}

impl fmt::Display for DayInWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cadence {
            Cadence::EveryWeek(weekday) => write!(f, "every {weekday}"),
            Cadence::EveryNthWeek { ordinal, reference } => write!(
                f,
                "every {ordinal} weeks on {} from {reference}",
                reference.weekday()
            ),
        }
    }
}
