//! Boolean combinators over sub-expressions: union, intersection, difference.

use std::fmt;

use chrono::NaiveDate;

use super::TemporalExpression;
use crate::error::{Result, ScheduleError};

/// A non-empty, ordered, owned list of sub-expressions.
///
/// Shared by [`Union`] and [`Intersection`]; the two differ only in how they
/// fold the results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Composite {
    expressions: Vec<TemporalExpression>,
}

impl Composite {
    fn collect<I, E>(expressions: I, kind: &str) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<TemporalExpression>,
    {
        let expressions: Vec<TemporalExpression> =
            expressions.into_iter().map(Into::into).collect();
        if expressions.is_empty() {
            return Err(ScheduleError::Validation(format!(
                "{kind} needs at least one expression"
            )));
        }
        Ok(Self { expressions })
    }

    fn pair(first: TemporalExpression, second: TemporalExpression) -> Self {
        Self {
            expressions: vec![first, second],
        }
    }

    pub fn expressions(&self) -> &[TemporalExpression] {
        &self.expressions
    }

    /// Number of sub-expressions; at least one.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    fn write_joined(&self, f: &mut fmt::Formatter<'_>, separator: &str) -> fmt::Result {
        f.write_str("(")?;
        for (i, expression) in self.expressions.iter().enumerate() {
            if i > 0 {
                f.write_str(separator)?;
            }
            write!(f, "{expression}")?;
        }
        f.write_str(")")
    }
}

/// Matches when any sub-expression matches. Evaluation stops at the first match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Union(Composite);

impl Union {
    /// # Errors
    /// Returns [`ScheduleError::Validation`] if `expressions` is empty.
    pub fn new<I, E>(expressions: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<TemporalExpression>,
    {
        Composite::collect(expressions, "union").map(Self)
    }

    pub(crate) fn pair(first: TemporalExpression, second: TemporalExpression) -> Self {
        Self(Composite::pair(first, second))
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        self.0.expressions.iter().any(|e| e.includes(date))
    }

    pub fn composite(&self) -> &Composite {
        &self.0
    }
}

impl fmt::Display for Union {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_joined(f, " | ")
    }
}

/// Matches when every sub-expression matches. Evaluation stops at the first
/// non-match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Intersection(Composite);

impl Intersection {
    /// # Errors
    /// Returns [`ScheduleError::Validation`] if `expressions` is empty.
    pub fn new<I, E>(expressions: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<TemporalExpression>,
    {
        Composite::collect(expressions, "intersection").map(Self)
    }

    pub(crate) fn pair(first: TemporalExpression, second: TemporalExpression) -> Self {
        Self(Composite::pair(first, second))
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        self.0.expressions.iter().all(|e| e.includes(date))
    }

    pub fn composite(&self) -> &Composite {
        &self.0
    }
}

impl fmt::Display for Intersection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_joined(f, " & ")
    }
}

/// Matches dates included by one expression and not excluded by another,
/// e.g. "every Monday except public holidays".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Difference {
    included: Box<TemporalExpression>,
    excluded: Box<TemporalExpression>,
}

impl Difference {
    pub fn new(
        included: impl Into<TemporalExpression>,
        excluded: impl Into<TemporalExpression>,
    ) -> Self {
        Self {
            included: Box::new(included.into()),
            excluded: Box::new(excluded.into()),
        }
    }

    pub fn includes(&self, date: NaiveDate) -> bool {
        self.included.includes(date) && !self.excluded.includes(date)
    }

    pub fn included(&self) -> &TemporalExpression {
        &self.included
    }

    pub fn excluded(&self) -> &TemporalExpression {
        &self.excluded
    }
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} - {})", self.included, self.excluded)
    }
}
