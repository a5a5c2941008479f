//! Holiday reference data.
//!
//! This module contains the [`Holiday`] type, one entry of the static
//! calendar that drives holiday pay.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A recognised holiday and the premium paid for working on it.
///
/// # Example
///
/// ```
/// use care_payroll_engine::models::Holiday;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
///     name: "Independence Day".to_string(),
///     pay_multiplier: Decimal::new(15, 1),
/// };
/// assert_eq!(holiday.rate_for(Decimal::from(20)), Some(Decimal::from(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The calendar date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday (e.g., "Christmas Day").
    pub name: String,
    /// Premium factor applied to the base rate (at least 1.0).
    pub pay_multiplier: Decimal,
}

impl Holiday {
    /// The holiday rate for a given base rate, or `None` if it overflows.
    pub fn rate_for(&self, base_rate: Decimal) -> Option<Decimal> {
        base_rate.checked_mul(self.pay_multiplier)
    }
}
