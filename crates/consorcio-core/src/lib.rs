//! # Consorcio Core
//!
//! Core types, calendars, and schedule generation for the Consorcio
//! consortium installment engine.
//!
//! This crate provides the foundational building blocks used throughout Consorcio:
//!
//! - **Types**: `Date`, monetary rounding, `Percent`, and the supported `TermClass` set
//! - **Business Day Calendars**: Brazilian national holidays, including the
//!   Easter-derived movable feasts
//! - **Schedules**: Monthly due-date generation with month-end clamping and
//!   business-day resolution
//!
//! ## Design Philosophy
//!
//! - **Deterministic**: Nothing here reads the wall clock; every result is a pure
//!   function of its arguments
//! - **Fixed-Point Money**: `rust_decimal::Decimal` everywhere, never binary floats
//! - **Explicit Over Implicit**: Unsupported term classes are rejected, not clamped
//!
//! ## Example
//!
//! ```rust
//! use consorcio_core::prelude::*;
//!
//! let contract = Date::from_ymd(2025, 1, 10).unwrap();
//! let dues = generate_schedule(&BrazilCalendar, contract, 31, 3).unwrap();
//!
//! // 2025-02-28 is a Friday, 2025-03-31 a Monday, 2025-04-30 a Wednesday
//! assert_eq!(dues[0], Date::from_ymd(2025, 2, 28).unwrap());
//! assert_eq!(dues[1], Date::from_ymd(2025, 3, 31).unwrap());
//! assert_eq!(dues[2], Date::from_ymd(2025, 4, 30).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]

pub mod calendars;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        easter_sunday, BrazilCalendar, BusinessDayConvention, Calendar, HolidaySet,
        WeekendCalendar,
    };
    pub use crate::error::{ConsorcioError, ConsorcioResult};
    pub use crate::schedule::{generate_schedule, DueDate, DueDateSchedule};
    pub use crate::types::{round_money, Date, Percent, TermClass, CENT};
}

// Re-export commonly used types at crate root
pub use error::{ConsorcioError, ConsorcioResult};
pub use types::{Date, Percent, TermClass};
