//! Property-based tests for expressions and schedule searches using proptest.
//!
//! These check invariants that hold for any well-formed expression, not just
//! the fixed calendars used in the example-driven test files.

use chrono::{Datelike, Duration, Month, NaiveDate, Weekday};
use proptest::prelude::*;
use slot_schedule::{
    DayInMonth, DayInWeek, Intersection, RangeEveryYear, Schedule, ScheduleElement,
    TemporalExpression, Union,
};

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn arb_weekday() -> impl Strategy<Value = Weekday> {
    (0u8..7).prop_map(|n| Weekday::try_from(n).unwrap())
}

fn arb_month() -> impl Strategy<Value = Month> {
    (1u8..=12).prop_map(|n| Month::try_from(n).unwrap())
}

fn arb_ordinal() -> impl Strategy<Value = i32> {
    prop_oneof![-5i32..=-1, 1i32..=5]
}

/// A date in 2000-2040. Day is capped at 28 to avoid invalid month/day combos.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..=2040, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// A leaf expression that matches at least once every year.
fn arb_leaf() -> impl Strategy<Value = TemporalExpression> {
    prop_oneof![
        (arb_weekday(), arb_ordinal())
            .prop_map(|(w, n)| DayInMonth::new(w, n).unwrap().into()),
        arb_weekday().prop_map(|w| DayInWeek::every(w).into()),
        (arb_weekday(), 1u32..=4, arb_date()).prop_map(|(w, n, reference)| {
            // Align the reference onto the chosen weekday.
            let offset = (7 + w.num_days_from_monday() as i64
                - reference.weekday().num_days_from_monday() as i64)
                % 7;
            DayInWeek::every_nth(n, reference + Duration::days(offset))
                .unwrap()
                .into()
        }),
        (arb_month(), arb_month()).prop_map(|(a, b)| {
            let (start, end) = if a.number_from_month() <= b.number_from_month() {
                (a, b)
            } else {
                (b, a)
            };
            RangeEveryYear::months(start, end).into()
        }),
    ]
}

fn arb_leaves() -> impl Strategy<Value = Vec<TemporalExpression>> {
    prop::collection::vec(arb_leaf(), 1..=4)
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: DAY_IN_MONTH only ever matches its own weekday
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn day_in_month_matches_only_its_weekday(
        weekday in arb_weekday(),
        ordinal in arb_ordinal(),
        date in arb_date(),
    ) {
        let expr = DayInMonth::new(weekday, ordinal).unwrap();
        if expr.includes(date) {
            prop_assert_eq!(date.weekday(), weekday);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 2: A fixed ordinal matches at most once per month
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn day_in_month_matches_at_most_once_per_month(
        weekday in arb_weekday(),
        ordinal in arb_ordinal(),
        date in arb_date(),
    ) {
        let expr = DayInMonth::new(weekday, ordinal).unwrap();
        let first = date.with_day(1).unwrap();
        let hits = first
            .iter_days()
            .take_while(|d| d.month() == first.month())
            .filter(|d| expr.includes(*d))
            .count();
        prop_assert!(hits <= 1, "{} matched {} times in {}", expr, hits, first);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Composite results do not depend on member order
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn composites_ignore_member_order(leaves in arb_leaves(), date in arb_date()) {
        let mut reversed = leaves.clone();
        reversed.reverse();

        let union = Union::new(leaves.clone()).unwrap();
        let union_rev = Union::new(reversed.clone()).unwrap();
        prop_assert_eq!(union.includes(date), union_rev.includes(date));

        let intersection = Intersection::new(leaves.clone()).unwrap();
        let intersection_rev = Intersection::new(reversed).unwrap();
        prop_assert_eq!(intersection.includes(date), intersection_rev.includes(date));

        prop_assert_eq!(union.includes(date), leaves.iter().any(|e| e.includes(date)));
        prop_assert_eq!(intersection.includes(date), leaves.iter().all(|e| e.includes(date)));
    }
}

// ---------------------------------------------------------------------------
// Property 4: Difference is "left and not right"
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn difference_is_left_and_not_right(
        left in arb_leaf(),
        right in arb_leaf(),
        date in arb_date(),
    ) {
        let expected = left.includes(date) && !right.includes(date);
        let difference = left.except(right);
        prop_assert_eq!(difference.includes(date), expected);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Future dates are strictly increasing matches
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn future_dates_strictly_increase(leaves in arb_leaves(), start in arb_date()) {
        let schedule: Schedule = leaves
            .into_iter()
            .map(|e| ScheduleElement::new(e, 1))
            .collect();
        let dates: Vec<NaiveDate> = schedule.future_dates(start).take(12).collect();

        prop_assert_eq!(dates.len(), 12);
        prop_assert!(dates[0] >= start);
        for window in dates.windows(2) {
            prop_assert!(window[0] < window[1], "{} !< {}", window[0], window[1]);
        }
        for d in &dates {
            prop_assert!(schedule.is_occurring(*d));
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Past dates are strictly decreasing matches
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn past_dates_strictly_decrease(leaves in arb_leaves(), start in arb_date()) {
        let schedule: Schedule = leaves
            .into_iter()
            .map(|e| ScheduleElement::new(e, 1))
            .collect();
        let dates: Vec<NaiveDate> = schedule.past_dates(start).take(12).collect();

        prop_assert_eq!(dates.len(), 12);
        prop_assert!(dates[0] <= start);
        for window in dates.windows(2) {
            prop_assert!(window[0] > window[1], "{} !> {}", window[0], window[1]);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 7: Lazy sequences agree with range queries and are resumable
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn future_dates_agree_with_dates_in_range(leaf in arb_leaf(), start in arb_date()) {
        let schedule = Schedule::new([ScheduleElement::new(leaf, 1)]);
        let end = start + Duration::days(120);

        let from_iter: Vec<NaiveDate> = schedule
            .future_dates(start)
            .take_while(|d| *d <= end)
            .collect();
        prop_assert_eq!(from_iter, schedule.dates_in_range(start, end));
    }

    #[test]
    fn take_then_continue_equals_take_more(
        leaf in arb_leaf(),
        start in arb_date(),
        n in 1usize..10,
    ) {
        let schedule = Schedule::new([ScheduleElement::new(leaf, 1)]);

        let mut iter = schedule.future_dates(start);
        let mut resumed: Vec<NaiveDate> = iter.by_ref().take(n).collect();
        resumed.extend(iter.next());

        let direct: Vec<NaiveDate> = schedule.future_dates(start).take(n + 1).collect();
        prop_assert_eq!(resumed, direct);
    }
}

// ---------------------------------------------------------------------------
// Property 8: Capacity comes from the first matching element
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn slots_come_from_first_match(
        leaves in arb_leaves(),
        date in arb_date(),
    ) {
        let schedule: Schedule = leaves
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, e)| ScheduleElement::new(e, i as u32 + 10))
            .collect();

        let expected = leaves
            .iter()
            .position(|e| e.includes(date))
            .map_or(0, |i| i as u32 + 10);
        prop_assert_eq!(schedule.slots(date), expected);
        prop_assert_eq!(schedule.is_occurring(date), expected != 0);
    }
}
