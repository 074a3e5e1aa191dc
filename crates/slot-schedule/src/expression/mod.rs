//! Temporal expressions -- immutable predicates over calendar dates.
//!
//! Leaf expressions describe simple recurrences ([`RangeEveryYear`],
//! [`DayInMonth`], [`DayInWeek`]); [`Union`], [`Intersection`] and
//! [`Difference`] compose them into arbitrarily nested trees. Every tree is an
//! owned value: composing always produces a new expression.

mod composite;
mod day_in_month;
mod day_in_week;
mod range_every_year;

use std::fmt;

use chrono::NaiveDate;

pub use composite::{Composite, Difference, Intersection, Union};
pub use day_in_month::DayInMonth;
pub use day_in_week::DayInWeek;
pub use range_every_year::RangeEveryYear;

/// A predicate answering "does this recurrence include `date`?".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemporalExpression {
    RangeEveryYear(RangeEveryYear),
    DayInMonth(DayInMonth),
    DayInWeek(DayInWeek),
    Difference(Difference),
    Union(Union),
    Intersection(Intersection),
}

impl TemporalExpression {
    pub fn includes(&self, date: NaiveDate) -> bool {
        match self {
            Self::RangeEveryYear(e) => e.includes(date),
            Self::DayInMonth(e) => e.includes(date),
            Self::DayInWeek(e) => e.includes(date),
            Self::Difference(e) => e.includes(date),
            Self::Union(e) => e.includes(date),
            Self::Intersection(e) => e.includes(date),
        }
    }

    /// `self` or `other`.
    pub fn or(self, other: impl Into<TemporalExpression>) -> Self {
        Self::Union(Union::pair(self, other.into()))
    }

    /// `self` and `other`.
    pub fn and(self, other: impl Into<TemporalExpression>) -> Self {
        Self::Intersection(Intersection::pair(self, other.into()))
    }

    /// `self` but not `other`.
    pub fn except(self, other: impl Into<TemporalExpression>) -> Self {
        Self::Difference(Difference::new(self, other))
    }
}

impl fmt::Display for TemporalExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RangeEveryYear(e) => fmt::Display::fmt(e, f),
            Self::DayInMonth(e) => fmt::Display::fmt(e, f),
            Self::DayInWeek(e) => fmt::Display::fmt(e, f),
            Self::Difference(e) => fmt::Display::fmt(e, f),
            Self::Union(e) => fmt::Display::fmt(e, f),
            Self::Intersection(e) => fmt::Display::fmt(e, f),
        }
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for TemporalExpression {
                fn from(e: $variant) -> Self {
                    Self::$variant(e)
                }
            }
        )*
    };
}

impl_from_variant!(RangeEveryYear, DayInMonth, DayInWeek, Difference, Union, Intersection);
