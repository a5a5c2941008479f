//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::Holiday;

/// Rate defaults and multipliers used by the calculator.
///
/// Every field has a named default, so a test can override one value and
/// keep the rest.
///
/// # Example
///
/// ```
/// use care_payroll_engine::config::PayrollSettings;
/// use rust_decimal::Decimal;
///
/// let settings = PayrollSettings::default();
/// assert_eq!(settings.default_regular_rate, Decimal::from(15));
/// assert_eq!(settings.default_overtime_multiplier, Decimal::new(15, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollSettings {
    /// Hourly rate used when neither the work log nor the member sets one.
    pub default_regular_rate: Decimal,
    /// Overtime rate as a multiple of the base rate, when the member has no
    /// standing overtime rate.
    pub default_overtime_multiplier: Decimal,
    /// Multiplier that marks a shadow day and is applied to its hours.
    pub shadow_day_multiplier: Decimal,
    /// Multiplier applied when a shadow day falls on a holiday.
    pub shadow_holiday_multiplier: Decimal,
}

impl Default for PayrollSettings {
    fn default() -> Self {
        Self {
            default_regular_rate: Decimal::from(15),
            default_overtime_multiplier: Decimal::new(15, 1),
            shadow_day_multiplier: Decimal::new(5, 1),
            shadow_holiday_multiplier: Decimal::new(75, 2),
        }
    }
}

impl PayrollSettings {
    /// Checks that every rate and multiplier is usable.
    pub fn validate(&self) -> EngineResult<()> {
        let checks = [
            ("default_regular_rate", self.default_regular_rate),
            (
                "default_overtime_multiplier",
                self.default_overtime_multiplier,
            ),
            ("shadow_day_multiplier", self.shadow_day_multiplier),
            ("shadow_holiday_multiplier", self.shadow_holiday_multiplier),
        ];

        for (field, value) in checks {
            if value < Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    field: field.to_string(),
                    message: format!("must not be negative, got {}", value),
                });
            }
        }

        if self.shadow_day_multiplier == Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: "shadow_day_multiplier".to_string(),
                message: "must differ from the standard multiplier 1.0".to_string(),
            });
        }

        Ok(())
    }
}

/// Presentation settings for rendered receipts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptSettings {
    /// Symbol prefixed to every amount.
    pub currency_symbol: String,
    /// Name printed as the issuer of every receipt.
    pub issuer: String,
}

impl Default for ReceiptSettings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            issuer: "Care Payroll".to_string(),
        }
    }
}

/// Layout of `payroll.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PayrollConfigFile {
    /// Calculator settings.
    pub payroll: PayrollSettings,
    /// Receipt settings.
    pub receipts: ReceiptSettings,
}

/// Layout of `holidays.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HolidaysConfigFile {
    /// One entry per calendar date.
    #[serde(default)]
    pub holidays: Vec<Holiday>,
}

/// The complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    settings: PayrollSettings,
    receipts: ReceiptSettings,
    holidays: Vec<Holiday>,
}

impl EngineConfig {
    /// Creates a configuration from its component parts, holidays sorted by date.
    pub fn new(settings: PayrollSettings, receipts: ReceiptSettings, holidays: Vec<Holiday>) -> Self {
        let mut holidays = holidays;
        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        Self {
            settings,
            receipts,
            holidays,
        }
    }

    /// Returns the calculator settings.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns the receipt settings.
    pub fn receipts(&self) -> &ReceiptSettings {
        &self.receipts
    }

    /// Returns the holiday table, oldest first.
    pub fn holidays(&self) -> &[Holiday] {
        &self.holidays
    }
}
