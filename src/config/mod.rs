//! Configuration loading and management for the care payroll engine.
//!
//! This module loads the calculator settings, receipt settings and holiday
//! calendar from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use care_payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Overtime multiplier: {}", config.config().settings().default_overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, HolidaysConfigFile, PayrollConfigFile, PayrollSettings, ReceiptSettings,
};
