//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! settings and the holiday calendar from YAML files.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::calculation::HolidayCalendar;
use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, HolidaysConfigFile, PayrollConfigFile};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── payroll.yaml   # Rate defaults, multipliers, receipt settings
/// └── holidays.yaml  # Holiday calendar
/// ```
///
/// # Example
///
/// ```no_run
/// use care_payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("{} holidays loaded", loader.config().holidays().len());
/// # Ok::<(), care_payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    calendar: Arc<HolidayCalendar>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails if either file is missing or unparsable, if a setting is
    /// negative, or if the holiday table holds a duplicate date or a
    /// multiplier below 1.0.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let payroll = Self::load_yaml::<PayrollConfigFile>(&path.join("payroll.yaml"))?;
        let holidays = Self::load_yaml::<HolidaysConfigFile>(&path.join("holidays.yaml"))?;

        let config = EngineConfig::new(payroll.payroll, payroll.receipts, holidays.holidays);
        let loader = Self::from_config(config)?;

        info!(
            path = %path.display(),
            holidays = loader.config.holidays().len(),
            "Loaded payroll configuration"
        );
        Ok(loader)
    }

    /// Validates an in-memory configuration and builds its calendar.
    pub fn from_config(config: EngineConfig) -> EngineResult<Self> {
        config.settings().validate()?;
        let calendar = HolidayCalendar::new(config.holidays().to_vec())?;
        Ok(Self {
            config,
            calendar: Arc::new(calendar),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the shared, read-only holiday calendar.
    pub fn calendar(&self) -> Arc<HolidayCalendar> {
        Arc::clone(&self.calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/default"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().settings().default_regular_rate, dec("15"));
        assert_eq!(loader.config().receipts().currency_symbol, "$");
        assert!(!loader.config().holidays().is_empty());
    }

    #[test]
    fn test_loaded_calendar_knows_independence_day() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let calendar = loader.calendar();

        let holiday = calendar
            .lookup(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap())
            .expect("July 4th should be configured");
        assert_eq!(holiday.pay_multiplier, dec("1.5"));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("payroll.yaml"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_default_config_has_empty_calendar() {
        let loader = ConfigLoader::from_config(EngineConfig::default()).unwrap();
        assert!(loader.calendar().is_empty());
    }
}
