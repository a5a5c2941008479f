//! Calculation logic for the care payroll engine.
//!
//! This module turns a work log into a categorised payroll calculation:
//! holiday lookup, day detection, rate resolution with the tier precedence
//! holiday > weekend > shadow day > regular, and expense totals.

mod day_detection;
mod holiday_calendar;
mod payroll_calculator;
mod rate_resolver;

pub use day_detection::{DayType, get_day_type};
pub use holiday_calendar::HolidayCalendar;
pub use payroll_calculator::{PayrollCalculation, PayrollCalculator};
pub use rate_resolver::{RateResolver, ResolvedRates, StandingRates, TierDecision};
