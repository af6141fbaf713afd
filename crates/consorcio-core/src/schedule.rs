//! Monthly due-date schedule generation.
//!
//! Installment `i` (1-based) falls `i` months after the contract month, on the
//! requested day of month clamped to the length of that month, rolled forward
//! to the next business day.

use serde::{Deserialize, Serialize};

use crate::calendars::Calendar;
use crate::error::{ConsorcioError, ConsorcioResult};
use crate::types::Date;

/// A single installment due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DueDate {
    /// 1-based installment number.
    pub installment: u32,
    /// Calendar date after month shifting and day clamping.
    pub unadjusted: Date,
    /// Business-day-resolved due date.
    pub due_date: Date,
}

impl DueDate {
    /// Returns true if the due date had to be rolled forward.
    #[must_use]
    pub fn was_rolled(&self) -> bool {
        self.due_date != self.unadjusted
    }
}

/// The ordered due dates of a contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DueDateSchedule {
    entries: Vec<DueDate>,
}

impl DueDateSchedule {
    /// Generates the schedule for `term_count` installments.
    ///
    /// # Errors
    ///
    /// Returns `ConsorcioError::InvalidDueDay` if `due_day` is not in 1..=31,
    /// or `ConsorcioError::InvalidDate` if a due date falls outside the
    /// representable range.
    pub fn generate<C: Calendar + ?Sized>(
        calendar: &C,
        contract_date: Date,
        due_day: u32,
        term_count: u32,
    ) -> ConsorcioResult<Self> {
        if !(1..=31).contains(&due_day) {
            return Err(ConsorcioError::InvalidDueDay { day: due_day });
        }

        let mut entries = Vec::with_capacity(term_count as usize);
        for installment in 1..=term_count {
            let unadjusted = Date::clamped(
                contract_date.year(),
                contract_date.month(),
                installment as i32,
                due_day,
            )?;
            entries.push(DueDate {
                installment,
                unadjusted,
                due_date: calendar.next_business_day(unadjusted),
            });
        }

        let schedule = Self { entries };
        for (first, second) in schedule.coincident_dates() {
            tracing::warn!(
                first,
                second,
                contract_date = %contract_date,
                due_day,
                "Installments resolve to the same due date"
            );
        }
        Ok(schedule)
    }

    /// The entries in installment order.
    #[must_use]
    pub fn entries(&self) -> &[DueDate] {
        &self.entries
    }

    /// The resolved due dates in installment order.
    #[must_use]
    pub fn due_dates(&self) -> Vec<Date> {
        self.entries.iter().map(|e| e.due_date).collect()
    }

    /// Number of installments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the schedule has no installments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Due date of a 1-based installment number.
    #[must_use]
    pub fn due_date(&self, installment: u32) -> Option<Date> {
        let index = installment.checked_sub(1)? as usize;
        self.entries.get(index).map(|e| e.due_date)
    }

    /// Pairs of consecutive installments whose resolved due dates are not
    /// strictly increasing.
    ///
    /// Empty for every schedule built on a real calendar; a non-empty result
    /// is a data-quality signal.
    #[must_use]
    pub fn coincident_dates(&self) -> Vec<(u32, u32)> {
        self.entries
            .windows(2)
            .filter(|pair| pair[1].due_date <= pair[0].due_date)
            .map(|pair| (pair[0].installment, pair[1].installment))
            .collect()
    }
}

/// Generates the resolved due dates of `term_count` monthly installments.
///
/// A `term_count` of zero yields an empty sequence.
///
/// # Example
///
/// ```rust
/// use consorcio_core::calendars::BrazilCalendar;
/// use consorcio_core::schedule::generate_schedule;
/// use consorcio_core::types::Date;
///
/// let contract = Date::from_ymd(2025, 3, 15).unwrap();
/// let dues = generate_schedule(&BrazilCalendar, contract, 21, 2).unwrap();
///
/// // 2025-04-21 is Tiradentes, so the first installment moves to the 22nd
/// assert_eq!(dues[0], Date::from_ymd(2025, 4, 22).unwrap());
/// assert_eq!(dues[1], Date::from_ymd(2025, 5, 21).unwrap());
/// ```
pub fn generate_schedule<C: Calendar + ?Sized>(
    calendar: &C,
    contract_date: Date,
    due_day: u32,
    term_count: u32,
) -> ConsorcioResult<Vec<Date>> {
    DueDateSchedule::generate(calendar, contract_date, due_day, term_count)
        .map(|schedule| schedule.due_dates())
}
