//! Brazilian national holiday calendar.
//!
//! Eight fixed holidays plus four movable ones derived from Easter Sunday:
//!
//! | Holiday | Rule |
//! |---|---|
//! | Confraternização Universal | Jan 1 |
//! | Carnival Monday | Easter - 48 |
//! | Carnival Tuesday | Easter - 47 |
//! | Good Friday | Easter - 2 |
//! | Tiradentes | Apr 21 |
//! | Labour Day | May 1 |
//! | Corpus Christi | Easter + 60 |
//! | Independence Day | Sep 7 |
//! | Nossa Senhora Aparecida | Oct 12 |
//! | All Souls' Day | Nov 2 |
//! | Republic Day | Nov 15 |
//! | Christmas | Dec 25 |

use std::collections::BTreeSet;

use super::{easter_sunday, Calendar};
use crate::types::Date;

/// Fixed national holidays as (month, day), valid for every year.
pub const FIXED_HOLIDAYS: [(u32, u32); 8] = [
    (1, 1),
    (4, 21),
    (5, 1),
    (9, 7),
    (10, 12),
    (11, 2),
    (11, 15),
    (12, 25),
];

/// Offsets in days from Easter Sunday of the movable holidays:
/// Carnival Monday, Carnival Tuesday, Good Friday, Corpus Christi.
const EASTER_OFFSETS: [i64; 4] = [-48, -47, -2, 60];

/// The holidays of one calendar year as (month, day) pairs.
///
/// Derived on demand from the year alone; never mutated after construction.
///
/// # Example
///
/// ```rust
/// use consorcio_core::calendars::HolidaySet;
///
/// let holidays = HolidaySet::for_year(2024);
/// assert!(holidays.contains(3, 29)); // Good Friday
/// assert!(holidays.contains(5, 30)); // Corpus Christi
/// assert_eq!(holidays.len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    year: i32,
    days: BTreeSet<(u32, u32)>,
}

impl HolidaySet {
    /// Computes the holiday set for `year`.
    #[must_use]
    pub fn for_year(year: i32) -> Self {
        let movable = easter_sunday(year).into_iter().flat_map(|easter| {
            EASTER_OFFSETS.iter().map(move |&offset| {
                let date = easter.add_days(offset);
                (date.month(), date.day())
            })
        });

        let days = FIXED_HOLIDAYS.iter().copied().chain(movable).collect();
        Self { year, days }
    }

    /// The year this set belongs to.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Returns true if (month, day) is a holiday in this year.
    #[must_use]
    pub fn contains(&self, month: u32, day: u32) -> bool {
        self.days.contains(&(month, day))
    }

    /// Number of distinct holiday dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The holidays as dates, in calendar order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.days
            .iter()
            .filter_map(move |&(month, day)| Date::from_ymd(self.year, month, day).ok())
    }
}

/// Brazilian national (settlement) calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrazilCalendar;

impl BrazilCalendar {
    /// Returns true if the date is one of the fixed holidays.
    #[must_use]
    pub fn is_fixed_holiday(date: Date) -> bool {
        FIXED_HOLIDAYS.contains(&(date.month(), date.day()))
    }
}

impl Calendar for BrazilCalendar {
    fn name(&self) -> &'static str {
        "Brazil (National)"
    }

    fn is_holiday(&self, date: Date) -> bool {
        if Self::is_fixed_holiday(date) {
            return true;
        }
        easter_sunday(date.year())
            .is_some_and(|easter| EASTER_OFFSETS.contains(&easter.days_between(&date)))
    }
}
