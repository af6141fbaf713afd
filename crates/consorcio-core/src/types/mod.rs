//! Domain types for the Consorcio engine.

mod date;
mod money;
mod term;

pub use date::{days_in_month, Date};
pub use money::{round_money, Percent, CENT, MONEY_SCALE};
pub use term::{TermClass, FIRST_TIER_INSTALLMENTS};
