//! Integration tests for the holiday calendar and due-date schedules.
//!
//! Easter dates are checked against the published Gregorian table; the
//! remaining properties are exercised with proptest over a wide date range.

use consorcio_core::calendars::{easter_sunday, BrazilCalendar, Calendar, HolidaySet};
use consorcio_core::schedule::{generate_schedule, DueDateSchedule};
use consorcio_core::types::{days_in_month, Date};
use proptest::prelude::*;
use proptest::test_runner::Config;

// ============================================================================
// Reference data
// ============================================================================

/// Published Easter Sunday dates (year, month, day).
const EASTER_REFERENCE: [(i32, u32, u32); 31] = [
    (2000, 4, 23),
    (2001, 4, 15),
    (2002, 3, 31),
    (2003, 4, 20),
    (2004, 4, 11),
    (2005, 3, 27),
    (2006, 4, 16),
    (2007, 4, 8),
    (2008, 3, 23),
    (2009, 4, 12),
    (2010, 4, 4),
    (2011, 4, 24),
    (2012, 4, 8),
    (2013, 3, 31),
    (2014, 4, 20),
    (2015, 4, 5),
    (2016, 3, 27),
    (2017, 4, 16),
    (2018, 4, 1),
    (2019, 4, 21),
    (2020, 4, 12),
    (2021, 4, 4),
    (2022, 4, 17),
    (2023, 4, 9),
    (2024, 3, 31),
    (2025, 4, 20),
    (2026, 4, 5),
    (2027, 3, 28),
    (2028, 4, 16),
    (2029, 4, 1),
    (2030, 4, 21),
];

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

#[test]
fn easter_matches_reference_table() {
    for (year, month, day) in EASTER_REFERENCE {
        assert_eq!(easter_sunday(year), Some(date(year, month, day)), "Easter {year}");
    }
}

#[test]
fn good_friday_and_corpus_christi_2026() {
    // Easter 2026-04-05
    let holidays = HolidaySet::for_year(2026);
    assert!(holidays.contains(4, 3));
    assert!(holidays.contains(6, 4));
    assert!(holidays.contains(2, 16));
    assert!(holidays.contains(2, 17));

    assert!(BrazilCalendar.is_holiday(date(2026, 4, 3)));
    assert!(BrazilCalendar.is_holiday(date(2026, 6, 4)));
    // Wednesday 2026-06-03 is an ordinary weekday
    assert!(!BrazilCalendar.is_holiday(date(2026, 6, 3)));
}

#[test]
fn good_friday_rolls_to_monday() {
    // Good Friday 2024-03-29 followed by a weekend
    let next = BrazilCalendar.next_business_day(date(2024, 3, 29));
    assert_eq!(next, date(2024, 4, 1));
}

#[test]
fn schedule_clamps_then_rolls() {
    // Contract in August 2025, due day 31:
    // Sep 30 (Tue), Oct 31 (Fri), Nov 30 (Sun -> Dec 1 Mon), Dec 31 (Wed)
    let dues = generate_schedule(&BrazilCalendar, date(2025, 8, 12), 31, 4).unwrap();
    assert_eq!(
        dues,
        vec![
            date(2025, 9, 30),
            date(2025, 10, 31),
            date(2025, 12, 1),
            date(2025, 12, 31),
        ]
    );
}

#[test]
fn schedule_over_carnival() {
    // 2026-02-16 is Carnival Monday, 2026-02-17 Carnival Tuesday
    let dues = generate_schedule(&BrazilCalendar, date(2026, 1, 5), 16, 1).unwrap();
    assert_eq!(dues, vec![date(2026, 2, 18)]);
}

// ============================================================================
// Properties
// ============================================================================

fn any_date() -> impl Strategy<Value = Date> {
    (1990_i32..2100, 0_i64..365).prop_map(|(year, offset)| date(year, 1, 1).add_days(offset))
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn next_business_day_is_business_day(d in any_date()) {
        let next = BrazilCalendar.next_business_day(d);
        prop_assert!(next >= d);
        prop_assert!(BrazilCalendar.is_business_day(next));
        prop_assert!(d.days_between(&next) <= 5);
    }

    #[test]
    fn business_days_are_fixed_points(d in any_date()) {
        prop_assume!(BrazilCalendar.is_business_day(d));
        prop_assert_eq!(BrazilCalendar.next_business_day(d), d);
    }

    #[test]
    fn next_business_day_is_idempotent(d in any_date()) {
        let once = BrazilCalendar.next_business_day(d);
        prop_assert_eq!(BrazilCalendar.next_business_day(once), once);
    }

    #[test]
    fn holidays_match_year_set(d in any_date()) {
        let set = HolidaySet::for_year(d.year());
        prop_assert_eq!(BrazilCalendar.is_holiday(d), set.contains(d.month(), d.day()));
    }

    #[test]
    fn schedule_is_monotonic(
        contract in any_date(),
        due_day in 1_u32..=31,
        term in 0_u32..=60,
    ) {
        let schedule = DueDateSchedule::generate(&BrazilCalendar, contract, due_day, term).unwrap();
        prop_assert_eq!(schedule.len(), term as usize);

        for entry in schedule.entries() {
            prop_assert!(entry.due_date >= entry.unadjusted);
            let expected_day = due_day.min(days_in_month(entry.unadjusted.year(), entry.unadjusted.month()));
            prop_assert_eq!(entry.unadjusted.day(), expected_day);
        }
        for pair in schedule.entries().windows(2) {
            prop_assert!(pair[1].unadjusted > pair[0].unadjusted);
            prop_assert!(pair[1].due_date >= pair[0].due_date);
        }
        prop_assert!(schedule.coincident_dates().is_empty());
    }
}
