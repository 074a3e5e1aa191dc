//! Error types for schedule construction and configuration parsing.

use thiserror::Error;

/// Errors raised while building expressions, schedules, or parsing a
/// schedule configuration document.
///
/// Queries against a built [`Schedule`](crate::Schedule) never fail; every
/// variant here is a construction-time error.
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// A constructor argument is missing, out of range, or conflicting.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A date string does not have the expected shape (e.g. "MM-DD").
    #[error("Invalid date format: {0}")]
    Format(String),

    /// A numeric month or day is outside its calendar domain.
    #[error("Value out of range: {0}")]
    Range(String),

    /// An expression discriminator (`type` or `of`) is missing or unknown.
    #[error("Temporal expression is not defined: {0}")]
    UndefinedExpression(String),

    /// The configuration document is not valid JSON for the expected shape.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
