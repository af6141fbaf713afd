//! Gregorian Easter computation.

use crate::types::Date;

/// Calculates Easter Sunday for a given year.
///
/// Anonymous Gregorian algorithm (Meeus/Jones/Butcher), integer arithmetic
/// only. Returns `None` if the year is outside the range chrono can
/// represent.
///
/// # Example
///
/// ```rust
/// use consorcio_core::calendars::easter_sunday;
/// use consorcio_core::types::Date;
///
/// assert_eq!(easter_sunday(2025), Date::from_ymd(2025, 4, 20).ok());
/// assert_eq!(easter_sunday(i32::MAX), None);
/// ```
#[must_use]
pub fn easter_sunday(year: i32) -> Option<Date> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    chrono::NaiveDate::from_ymd_opt(year, month as u32, day as u32).map(Date::from)
}
