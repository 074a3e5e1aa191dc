//! Schedule configuration documents -- JSON → expression trees.
//!
//! A document holds a `schedule` array. Each entry carries a `slots` capacity
//! and a recurrence node discriminated by `type`:
//!
//! ```json
//! {
//!   "schedule": [
//!     {
//!       "slots": 100,
//!       "type": "RANGE_EVERY_YEAR",
//!       "of": "START_MONTH_TO_END_MONTH",
//!       "startMonth": "JANUARY",
//!       "endMonth": "MARCH"
//!     }
//!   ]
//! }
//! ```
//!
//! Node types: `RANGE_EVERY_YEAR` (`of` = `START_DAY_TO_END_DAY` with
//! `startDate`/`endDate` as `"MM-DD"`, or `START_MONTH_TO_END_MONTH` with
//! `startMonth`/`endMonth` names), `DAY_IN_MONTH` (`day`, `ordinal`),
//! `DAY_IN_WEEK` (`day`, or `ordinal` + `referenceDate` as `"YYYY-MM-DD"`),
//! `DIFFERENCE` (`includedDate`, `excludedDate`), and `UNION` /
//! `INTERSECTION` (`expressions`).
//!
//! # Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use slot_schedule::config::parse_schedule;
//!
//! let json = r#"{"schedule":[{"slots":4,"type":"DAY_IN_WEEK","day":"SATURDAY"}]}"#;
//! let schedule = parse_schedule(json).unwrap();
//! let saturday = NaiveDate::from_ymd_opt(2023, 8, 12).unwrap();
//! assert_eq!(schedule.slots(saturday), 4);
//! ```

use serde::Deserialize;

use crate::calendar::{self, MonthDay};
use crate::error::{Result, ScheduleError};
use crate::expression::{
    DayInMonth, DayInWeek, Difference, Intersection, RangeEveryYear, TemporalExpression, Union,
};
use crate::schedule::{Schedule, ScheduleElement};

/// Discriminator of an [`ExpressionNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpressionType {
    RangeEveryYear,
    DayInMonth,
    DayInWeek,
    Difference,
    Union,
    Intersection,
    #[serde(other)]
    Unknown,
}

/// Which pair of bounds a `RANGE_EVERY_YEAR` node uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeBounds {
    StartDayToEndDay,
    StartMonthToEndMonth,
    #[serde(other)]
    Unknown,
}

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub schedule: Option<Vec<ScheduleEntry>>,
}

/// One `schedule` entry: a capacity plus the recurrence it applies to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScheduleEntry {
    #[serde(default)]
    pub slots: Option<i64>,
    #[serde(flatten)]
    pub expression: ExpressionNode,
}

/// A recurrence node as it appears in the document. Which fields are
/// required depends on `type`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionNode {
    #[serde(rename = "type", default)]
    pub kind: Option<ExpressionType>,
    #[serde(default)]
    pub of: Option<RangeBounds>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub start_month: Option<String>,
    #[serde(default)]
    pub end_month: Option<String>,
    #[serde(default)]
    pub day: Option<String>,
    #[serde(default)]
    pub ordinal: Option<i64>,
    #[serde(default)]
    pub reference_date: Option<String>,
    #[serde(default)]
    pub included_date: Option<Box<ExpressionNode>>,
    #[serde(default)]
    pub excluded_date: Option<Box<ExpressionNode>>,
    #[serde(default)]
    pub expressions: Option<Vec<ExpressionNode>>,
}

impl ScheduleConfig {
    /// Deserialize a configuration document.
    ///
    /// # Errors
    /// Returns [`ScheduleError::Json`] if `json` is not a well-formed document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl TryFrom<ScheduleConfig> for Schedule {
    type Error = ScheduleError;

    fn try_from(config: ScheduleConfig) -> Result<Self> {
        parse_elements(&config).map(Schedule::new)
    }
}

/// Parse a JSON configuration document straight into a [`Schedule`].
///
/// # Errors
/// Returns [`ScheduleError::Json`] for malformed JSON, and the construction
/// errors described on [`parse_elements`] otherwise.
#[tracing::instrument(skip(json), fields(json_len = json.len()))]
pub fn parse_schedule(json: &str) -> Result<Schedule> {
    tracing::debug!("Parsing schedule configuration");
    let config = ScheduleConfig::from_json(json)?;
    let schedule = Schedule::try_from(config)?;
    tracing::debug!(elements = schedule.len(), "Schedule configuration parsed");
    Ok(schedule)
}

/// Convert every entry of `config` into a [`ScheduleElement`], in order.
///
/// # Errors
/// - [`ScheduleError::Validation`] when `schedule` or a required field is
///   missing, or a value is rejected by an expression constructor.
/// - [`ScheduleError::UndefinedExpression`] for a missing/unknown `type` or `of`.
/// - [`ScheduleError::Format`] / [`ScheduleError::Range`] for bad date strings.
pub fn parse_elements(config: &ScheduleConfig) -> Result<Vec<ScheduleElement>> {
    let entries = config
        .schedule
        .as_ref()
        .ok_or_else(|| ScheduleError::Validation("schedule not defined".to_string()))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let slots = entry.slots.ok_or_else(|| {
                ScheduleError::Validation(format!("slots not defined for schedule entry {index}"))
            })?;
            let expression = entry.expression.to_expression()?;
            tracing::trace!(index, slots, %expression, "Parsed schedule entry");
            ScheduleElement::try_new(expression, slots)
        })
        .collect()
}

impl ExpressionNode {
    /// Build the expression tree rooted at this node.
    ///
    /// # Errors
    /// See [`parse_elements`].
    pub fn to_expression(&self) -> Result<TemporalExpression> {
        let kind = self.kind.ok_or_else(|| {
            ScheduleError::UndefinedExpression("missing expression type".to_string())
        })?;

        let expression: TemporalExpression = match kind {
            ExpressionType::RangeEveryYear => self.range_every_year()?.into(),
            ExpressionType::DayInMonth => self.day_in_month()?.into(),
            ExpressionType::DayInWeek => self.day_in_week()?.into(),
            ExpressionType::Difference => self.difference()?.into(),
            ExpressionType::Union => Union::new(self.sub_expressions("UNION")?)?.into(),
            ExpressionType::Intersection => {
                Intersection::new(self.sub_expressions("INTERSECTION")?)?.into()
            }
            ExpressionType::Unknown => {
                return Err(ScheduleError::UndefinedExpression(
                    "unknown expression type".to_string(),
                ))
            }
        };
        Ok(expression)
    }

    fn range_every_year(&self) -> Result<RangeEveryYear> {
        let of = self.of.ok_or_else(|| {
            ScheduleError::UndefinedExpression("RANGE_EVERY_YEAR must specify \"of\"".to_string())
        })?;

        match of {
            RangeBounds::StartDayToEndDay => {
                let start: MonthDay = required(&self.start_date, "startDate")?.parse()?;
                let end: MonthDay = required(&self.end_date, "endDate")?.parse()?;
                Ok(RangeEveryYear::days(start, end))
            }
            RangeBounds::StartMonthToEndMonth => {
                let start = calendar::parse_month(required(&self.start_month, "startMonth")?)?;
                let end = calendar::parse_month(required(&self.end_month, "endMonth")?)?;
                Ok(RangeEveryYear::months(start, end))
            }
            RangeBounds::Unknown => Err(ScheduleError::UndefinedExpression(
                "unknown RANGE_EVERY_YEAR bounds".to_string(),
            )),
        }
    }

    fn day_in_month(&self) -> Result<DayInMonth> {
        let weekday = calendar::parse_weekday(self.required_day()?)?;
        let ordinal = self.ordinal.ok_or_else(|| {
            ScheduleError::Validation("ordinal is required for DAY_IN_MONTH".to_string())
        })?;
        let ordinal = i32::try_from(ordinal)
            .map_err(|_| ScheduleError::Validation(format!("ordinal={ordinal} is out of range")))?;
        DayInMonth::new(weekday, ordinal)
    }

    fn day_in_week(&self) -> Result<DayInWeek> {
        match (self.day.as_deref(), self.reference_date.as_deref()) {
            (None, None) => Err(day_not_provided()),
            // A plain weekly rule; any ordinal alongside `day` is ignored.
            (Some(day), None) => Ok(DayInWeek::every(calendar::parse_weekday(day)?)),
            (Some(_), Some(_)) => Err(ScheduleError::Validation(
                "DAY_IN_WEEK takes either day or referenceDate, not both".to_string(),
            )),
            (None, Some(reference)) => {
                let reference = calendar::parse_date(reference)?;
                let ordinal = match self.ordinal {
                    None => 0,
                    Some(n) => u32::try_from(n).map_err(|_| {
                        ScheduleError::Validation(format!("ordinal={n} must be >= 1"))
                    })?,
                };
                DayInWeek::from_parts(None, ordinal, Some(reference))
            }
        }
    }

    fn difference(&self) -> Result<Difference> {
        let included = self.included_date.as_deref().ok_or_else(|| {
            ScheduleError::Validation("includedDate is required for DIFFERENCE".to_string())
        })?;
        let excluded = self.excluded_date.as_deref().ok_or_else(|| {
            ScheduleError::Validation("excludedDate is required for DIFFERENCE".to_string())
        })?;
        Ok(Difference::new(
            included.to_expression()?,
            excluded.to_expression()?,
        ))
    }

    fn sub_expressions(&self, kind: &str) -> Result<Vec<TemporalExpression>> {
        self.expressions
            .as_ref()
            .ok_or_else(|| {
                ScheduleError::Validation(format!("expressions are required for {kind}"))
            })?
            .iter()
            .map(ExpressionNode::to_expression)
            .collect()
    }

    fn required_day(&self) -> Result<&str> {
        self.day.as_deref().ok_or_else(day_not_provided)
    }
}

fn day_not_provided() -> ScheduleError {
    ScheduleError::Validation("day property not provided".to_string())
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str> {
    field
        .as_deref()
        .ok_or_else(|| ScheduleError::Validation(format!("{name} is required")))
}
