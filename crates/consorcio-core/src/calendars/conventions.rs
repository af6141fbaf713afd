//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};

use super::{Calendar, MAX_ROLL_DAYS};
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day. Installment due dates use [`Following`].
///
/// [`Following`]: BusinessDayConvention::Following
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
        };
        write!(f, "{name}")
    }
}

/// Adjusts a date according to the given business day convention.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,
        BusinessDayConvention::Following => following(date, calendar),
        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() != date.month() {
                preceding(date, calendar)
            } else {
                adjusted
            }
        }
        BusinessDayConvention::Preceding => preceding(date, calendar),
    }
}

/// Returns the first business day on or after the given date.
pub(crate) fn following<C: Calendar + ?Sized>(date: Date, calendar: &C) -> Date {
    roll(date, 1, calendar)
}

/// Returns the last business day on or before the given date.
pub(crate) fn preceding<C: Calendar + ?Sized>(date: Date, calendar: &C) -> Date {
    roll(date, -1, calendar)
}

fn roll<C: Calendar + ?Sized>(date: Date, step: i64, calendar: &C) -> Date {
    let mut current = date;
    for _ in 0..MAX_ROLL_DAYS {
        if calendar.is_business_day(current) {
            return current;
        }
        current = current.add_days(step);
    }

    if !calendar.is_business_day(current) {
        tracing::warn!(
            calendar = calendar.name(),
            start = %date,
            stopped_at = %current,
            "No business day found within roll bound"
        );
    }
    current
}
