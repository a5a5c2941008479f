//! Holiday calendar lookup.
//!
//! The calendar is built once from the configured holiday table and then
//! only read, so one instance is shared across concurrent calculations.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;

/// An immutable date → holiday lookup.
///
/// # Example
///
/// ```
/// use care_payroll_engine::calculation::HolidayCalendar;
/// use care_payroll_engine::models::Holiday;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let calendar = HolidayCalendar::new(vec![Holiday {
///     date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
///     name: "Christmas Day".to_string(),
///     pay_multiplier: Decimal::from(2),
/// }])
/// .unwrap();
///
/// assert!(calendar.lookup(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()).is_some());
/// assert!(calendar.lookup(NaiveDate::from_ymd_opt(2024, 12, 26).unwrap()).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    by_date: BTreeMap<NaiveDate, Holiday>,
}

impl HolidayCalendar {
    /// Builds a calendar, rejecting duplicate dates and multipliers below 1.0.
    pub fn new(holidays: Vec<Holiday>) -> EngineResult<Self> {
        let mut by_date: BTreeMap<NaiveDate, Holiday> = BTreeMap::new();

        for holiday in holidays {
            if holiday.pay_multiplier < Decimal::ONE {
                return Err(EngineError::InvalidConfig {
                    field: format!("holidays[{}].pay_multiplier", holiday.date),
                    message: format!("must be at least 1.0, got {}", holiday.pay_multiplier),
                });
            }
            if let Some(existing) = by_date.get(&holiday.date) {
                return Err(EngineError::InvalidConfig {
                    field: format!("holidays[{}]", holiday.date),
                    message: format!(
                        "'{}' and '{}' share the same date",
                        existing.name, holiday.name
                    ),
                });
            }
            by_date.insert(holiday.date, holiday);
        }

        Ok(Self { by_date })
    }

    /// Returns the holiday on `date`, if any. Day granularity only.
    pub fn lookup(&self, date: NaiveDate) -> Option<&Holiday> {
        self.by_date.get(&date)
    }

    /// Number of configured holidays.
    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    /// Returns true when no holidays are configured.
    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn holiday(date: &str, name: &str, multiplier: &str) -> Holiday {
        Holiday {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            name: name.to_string(),
            pay_multiplier: dec(multiplier),
        }
    }

    #[test]
    fn test_lookup_exact_date() {
        let calendar = HolidayCalendar::new(vec![
            holiday("2024-07-04", "Independence Day", "1.5"),
            holiday("2024-12-25", "Christmas Day", "2.0"),
        ])
        .unwrap();

        let found = calendar
            .lookup(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap())
            .unwrap();
        assert_eq!(found.name, "Independence Day");
        assert_eq!(found.pay_multiplier, dec("1.5"));
        assert_eq!(calendar.len(), 2);
    }

    #[test]
    fn test_lookup_misses_neighbouring_days() {
        let calendar =
            HolidayCalendar::new(vec![holiday("2024-07-04", "Independence Day", "1.5")]).unwrap();

        assert!(calendar.lookup(NaiveDate::from_ymd_opt(2024, 7, 3).unwrap()).is_none());
        assert!(calendar.lookup(NaiveDate::from_ymd_opt(2024, 7, 5).unwrap()).is_none());
        assert!(calendar.lookup(NaiveDate::from_ymd_opt(2025, 7, 4).unwrap()).is_none());
    }

    #[test]
    fn test_multiplier_below_one_is_rejected() {
        let result = HolidayCalendar::new(vec![holiday("2024-07-04", "Independence Day", "0.9")]);

        match result {
            Err(EngineError::InvalidConfig { field, .. }) => {
                assert!(field.contains("pay_multiplier"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_multiplier_of_exactly_one_is_allowed() {
        let calendar =
            HolidayCalendar::new(vec![holiday("2024-10-14", "Observance", "1.0")]).unwrap();
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn test_duplicate_date_is_rejected() {
        let result = HolidayCalendar::new(vec![
            holiday("2024-12-25", "Christmas Day", "2.0"),
            holiday("2024-12-25", "Christmas (observed)", "1.5"),
        ]);

        match result {
            Err(EngineError::InvalidConfig { message, .. }) => {
                assert!(message.contains("Christmas Day"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_calendar() {
        let calendar = HolidayCalendar::default();
        assert!(calendar.is_empty());
        assert!(calendar.lookup(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).is_none());
    }
}
