//! Schedules -- ordered lists of capacity-bearing temporal expressions, and
//! the occurrence queries that run over them.
//!
//! All searches are day-by-day scans. `next_occurrence` / `previous_occurrence`
//! only stop at a match or at the edge of the representable date range, so a
//! schedule that never matches scans for a long time before giving up; use
//! the `*_within` variants when the caller needs a tighter bound.

use std::fmt;
use std::iter::{self, FusedIterator};

use chrono::NaiveDate;

use crate::error::{Result, ScheduleError};
use crate::expression::TemporalExpression;

/// `start`, `start + 1`, ... up to and including `NaiveDate::MAX`.
fn days_forward(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    iter::successors(Some(start), NaiveDate::succ_opt)
}

/// `start`, `start - 1`, ... down to and including `NaiveDate::MIN`.
fn days_backward(start: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    iter::successors(Some(start), NaiveDate::pred_opt)
}

/// One rule of a schedule: a recurrence plus the capacity it offers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleElement {
    expression: TemporalExpression,
    slots: u32,
}

impl ScheduleElement {
    pub fn new(expression: impl Into<TemporalExpression>, slots: u32) -> Self {
        Self {
            expression: expression.into(),
            slots,
        }
    }

    /// Build from a signed slot count, as read from configuration documents.
    ///
    /// # Errors
    /// Returns [`ScheduleError::Validation`] if `slots` is negative or does
    /// not fit in a `u32`.
    pub fn try_new(expression: impl Into<TemporalExpression>, slots: i64) -> Result<Self> {
        if slots < 0 {
            return Err(ScheduleError::Validation(format!(
                "slots cannot be negative (got {slots})"
            )));
        }
        let slots = u32::try_from(slots)
            .map_err(|_| ScheduleError::Validation(format!("slots={slots} is too large")))?;
        Ok(Self::new(expression, slots))
    }

    pub fn is_occurring(&self, date: NaiveDate) -> bool {
        self.expression.includes(date)
    }

    /// Capacity of this element. Independent of date: callers check
    /// [`is_occurring`](Self::is_occurring) first.
    pub fn slots(&self) -> u32 {
        self.slots
    }

    pub fn expression(&self) -> &TemporalExpression {
        &self.expression
    }
}

impl fmt::Display for ScheduleElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {} slots", self.expression, self.slots)
    }
}

/// An ordered, immutable set of [`ScheduleElement`]s.
///
/// Element order matters: [`slots`](Self::slots) reports the capacity of the
/// first element that matches a date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Schedule {
    elements: Vec<ScheduleElement>,
}

impl Schedule {
    /// Build a schedule from an owned copy of `elements`. An empty schedule
    /// is valid and never occurs.
    pub fn new(elements: impl IntoIterator<Item = ScheduleElement>) -> Self {
        Self {
            elements: elements.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn elements(&self) -> &[ScheduleElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn is_occurring(&self, date: NaiveDate) -> bool {
        self.elements.iter().any(|e| e.is_occurring(date))
    }

    /// The first element, in schedule order, that occurs on `date`.
    pub fn matching_element(&self, date: NaiveDate) -> Option<&ScheduleElement> {
        self.elements.iter().find(|e| e.is_occurring(date))
    }

    /// Capacity on `date`: the slots of the first matching element, or 0.
    ///
    /// Later matching elements are ignored; capacities are never summed.
    pub fn slots(&self, date: NaiveDate) -> u32 {
        self.matching_element(date).map_or(0, ScheduleElement::slots)
    }

    /// All dates in `start..=end` on which the schedule occurs, in order.
    ///
    /// Returns an empty list when `start > end`.
    #[tracing::instrument(level = "debug", skip(self), fields(elements = self.elements.len()))]
    pub fn dates_in_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let dates: Vec<NaiveDate> = days_forward(start)
            .take_while(|date| *date <= end)
            .filter(|date| self.is_occurring(*date))
            .collect();
        tracing::debug!(count = dates.len(), "range scan complete");
        dates
    }

    /// The first date on or after `date` on which the schedule occurs.
    ///
    /// Scans forward one day at a time. Returns `None` only when the scan
    /// runs off the end of the supported date range, which is what eventually
    /// happens for an unsatisfiable schedule. An empty schedule returns `None`
    /// without scanning.
    pub fn next_occurrence(&self, date: NaiveDate) -> Option<NaiveDate> {
        if self.is_empty() {
            return None;
        }
        let found = days_forward(date).find(|d| self.is_occurring(*d));
        if found.is_none() {
            tracing::debug!(%date, "forward scan reached the end of the date range");
        }
        found
    }

    /// The last date on or before `date` on which the schedule occurs.
    ///
    /// Mirror image of [`next_occurrence`](Self::next_occurrence).
    pub fn previous_occurrence(&self, date: NaiveDate) -> Option<NaiveDate> {
        if self.is_empty() {
            return None;
        }
        let found = days_backward(date).find(|d| self.is_occurring(*d));
        if found.is_none() {
            tracing::debug!(%date, "backward scan reached the start of the date range");
        }
        found
    }

    /// Like [`next_occurrence`](Self::next_occurrence), but inspects at most
    /// `date` and the `max_days` days after it.
    pub fn next_occurrence_within(&self, date: NaiveDate, max_days: u32) -> Option<NaiveDate> {
        days_forward(date)
            .take(max_days as usize + 1)
            .find(|d| self.is_occurring(*d))
    }

    /// Like [`previous_occurrence`](Self::previous_occurrence), but inspects
    /// at most `date` and the `max_days` days before it.
    pub fn previous_occurrence_within(&self, date: NaiveDate, max_days: u32) -> Option<NaiveDate> {
        days_backward(date)
            .take(max_days as usize + 1)
            .find(|d| self.is_occurring(*d))
    }

    /// Lazy, ascending sequence of occurrences starting at `start` (inclusive).
    ///
    /// The sequence is unbounded; bound it with `take`/`take_while`.
    pub fn future_dates(&self, start: NaiveDate) -> FutureDates<'_> {
        FutureDates {
            schedule: self,
            cursor: Some(start),
        }
    }

    /// Lazy, descending sequence of occurrences starting at `start` (inclusive).
    ///
    /// The sequence is unbounded; bound it with `take`/`take_while`.
    pub fn past_dates(&self, start: NaiveDate) -> PastDates<'_> {
        PastDates {
            schedule: self,
            cursor: Some(start),
        }
    }
}

impl FromIterator<ScheduleElement> for Schedule {
    fn from_iter<I: IntoIterator<Item = ScheduleElement>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }
        f.write_str("]")
    }
}

/// Iterator returned by [`Schedule::future_dates`].
#[derive(Debug, Clone)]
pub struct FutureDates<'a> {
    schedule: &'a Schedule,
    cursor: Option<NaiveDate>,
}

impl Iterator for FutureDates<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let found = self.schedule.next_occurrence(self.cursor?);
        self.cursor = found.and_then(|d| d.succ_opt());
        tracing::trace!(?found, "future occurrence");
        found
    }
}

impl FusedIterator for FutureDates<'_> {}

/// Iterator returned by [`Schedule::past_dates`].
#[derive(Debug, Clone)]
pub struct PastDates<'a> {
    schedule: &'a Schedule,
    cursor: Option<NaiveDate>,
}

impl Iterator for PastDates<'_> {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let found = self.schedule.previous_occurrence(self.cursor?);
        self.cursor = found.and_then(|d| d.pred_opt());
        tracing::trace!(?found, "past occurrence");
        found
    }
}

impl FusedIterator for PastDates<'_> {}
