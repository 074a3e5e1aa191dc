//! Tests for weekly and every-N-th-week expressions.

use chrono::{Duration, NaiveDate, Weekday};
use slot_schedule::{DayInWeek, ScheduleError, TemporalExpression, Union};

// ── Fixtures ────────────────────────────────────────────────────────────────

fn sat() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 12).unwrap()
}

fn sun() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 13).unwrap()
}

fn mon() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 14).unwrap()
}

fn thu() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 8, 17).unwrap()
}

fn weeks(n: i64) -> Duration {
    Duration::weeks(n)
}

// ── Every week ──────────────────────────────────────────────────────────────

#[test]
fn every_week_matches_its_weekday() {
    assert!(DayInWeek::every(Weekday::Sat).includes(sat()));
    assert!(DayInWeek::every(Weekday::Sun).includes(sun()));
    assert!(DayInWeek::every(Weekday::Sat).includes(sat() + weeks(52)));
}

#[test]
fn every_week_rejects_other_weekdays() {
    assert!(!DayInWeek::every(Weekday::Sat).includes(sun()));
    assert!(!DayInWeek::every(Weekday::Sun).includes(sat()));
}

#[test]
fn weekly_days_combine_in_a_union() {
    let mon_and_thu = Union::new([DayInWeek::every(Weekday::Mon), DayInWeek::every(Weekday::Thu)])
        .unwrap();

    assert!(mon_and_thu.includes(mon()));
    assert!(mon_and_thu.includes(thu()));
    assert!(mon_and_thu.includes(mon() - weeks(1)));
    assert!(mon_and_thu.includes(thu() - weeks(1)));
    assert!(mon_and_thu.includes(mon() + weeks(1)));
    assert!(!mon_and_thu.includes(sat()));
    assert!(!mon_and_thu.includes(sun()));
}

// ── Every N-th week ─────────────────────────────────────────────────────────

#[test]
fn every_second_monday_matches_in_both_directions() {
    let fortnightly = DayInWeek::every_nth(2, mon()).unwrap();

    for n in [0, 2, 4, 12, -2, -4, -12] {
        assert!(fortnightly.includes(mon() + weeks(n)), "offset {n} weeks");
    }
}

#[test]
fn every_second_monday_skips_odd_weeks_and_other_days() {
    let fortnightly = DayInWeek::every_nth(2, mon()).unwrap();

    for n in [1, 3, 11, -1, -3, -11] {
        assert!(!fortnightly.includes(mon() + weeks(n)), "offset {n} weeks");
    }
    assert!(!fortnightly.includes(sat()));
    assert!(!fortnightly.includes(sun()));
    assert!(!fortnightly.includes(thu()));
}

#[test]
fn every_third_week_handles_negative_distances() {
    let every_third = DayInWeek::every_nth(3, thu()).unwrap();

    assert!(every_third.includes(thu() - weeks(3)));
    assert!(every_third.includes(thu() - weeks(30)));
    assert!(!every_third.includes(thu() - weeks(4)));
    assert!(!every_third.includes(thu() - weeks(5)));
}

#[test]
fn ordinal_one_is_every_week_from_reference() {
    let weekly = DayInWeek::every_nth(1, sat()).unwrap();
    assert!(weekly.includes(sat() + weeks(7)));
    assert!(weekly.includes(sat() - weeks(100)));
    assert!(!weekly.includes(sun()));
}

// ── Validation ──────────────────────────────────────────────────────────────

#[test]
fn zero_ordinal_is_rejected() {
    let err = DayInWeek::every_nth(0, sat()).unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
}

#[test]
fn conflicting_modes_are_rejected() {
    let err = DayInWeek::from_parts(Some(Weekday::Mon), 2, Some(mon())).unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));

    let err = DayInWeek::from_parts(None, 0, None).unwrap_err();
    assert!(matches!(err, ScheduleError::Validation(_)));
}

#[test]
fn equality_distinguishes_modes() {
    assert_eq!(DayInWeek::every(Weekday::Mon), DayInWeek::every(Weekday::Mon));
    assert_ne!(
        TemporalExpression::from(DayInWeek::every(Weekday::Mon)),
        TemporalExpression::from(DayInWeek::every_nth(1, mon()).unwrap())
    );
}
