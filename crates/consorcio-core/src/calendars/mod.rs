//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait and date rolling helpers
//! - The Brazilian national calendar with Easter-derived movable holidays
//! - Business day adjustment conventions

mod brazil;
mod conventions;
mod easter;

pub use brazil::{BrazilCalendar, HolidaySet, FIXED_HOLIDAYS};
pub use conventions::BusinessDayConvention;
pub use easter::easter_sunday;

use crate::types::Date;

/// Upper bound on consecutive non-business days any supported calendar can
/// produce. Rolling loops stop after this many steps.
pub const MAX_ROLL_DAYS: u32 = 14;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays.
/// Implementations must be pure functions of the date: no wall clock, no
/// mutable state.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a holiday (weekends excluded).
    fn is_holiday(&self, date: Date) -> bool;

    /// Returns true if the date is neither a weekend day nor a holiday.
    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Returns the date itself if it is a business day, otherwise the first
    /// business day after it.
    fn next_business_day(&self, date: Date) -> Date {
        conventions::following(date, self)
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        conventions::preceding(date, self)
    }

    /// Advances a date by a number of business days.
    ///
    /// Each step rolls at most [`MAX_ROLL_DAYS`]; if a step finds no business
    /// day the date reached so far is returned.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let step: i64 = if days >= 0 { 1 } else { -1 };

        for _ in 0..days.unsigned_abs() {
            let candidate = result.add_days(step);
            let rolled = if step > 0 {
                conventions::following(candidate, self)
            } else {
                conventions::preceding(candidate, self)
            };
            if !self.is_business_day(rolled) {
                return rolled;
            }
            result = rolled;
        }

        result
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A simple weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_holiday(&self, _date: Date) -> bool {
        false
    }
}
