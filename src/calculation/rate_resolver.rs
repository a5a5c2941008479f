//! Rate resolution.
//!
//! This module decides which hourly rates apply to a work log and which
//! single rate tier consumes its hours. Tiers are tested in a fixed order
//! and the first match wins:
//!
//! 1. Holiday (shadow days on a holiday use the stacked shadow-holiday multiplier)
//! 2. Weekend, unless it is a shadow day
//! 3. Shadow day
//! 4. Regular

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, CareTeamMember, Holiday, HourCategory, WorkLog};

use super::day_detection::{DayType, get_day_type};

/// A caregiver's standing rates, either of which may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRates {
    /// Standing hourly rate.
    pub regular_rate: Option<Decimal>,
    /// Standing overtime rate.
    pub overtime_rate: Option<Decimal>,
}

impl From<&CareTeamMember> for StandingRates {
    fn from(member: &CareTeamMember) -> Self {
        Self {
            regular_rate: member.regular_rate,
            overtime_rate: member.overtime_rate,
        }
    }
}

/// The base and overtime rates in force for one work log.
#[derive(Debug, Clone)]
pub struct ResolvedRates {
    /// Hourly base rate.
    pub base_rate: Decimal,
    /// Hourly overtime rate.
    pub overtime_rate: Decimal,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// The tier chosen for a work log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierDecision {
    /// The category that receives all of the log's hours.
    pub category: HourCategory,
    /// The hourly rate paid for that category.
    pub rate: Decimal,
    /// Multiplier reported for the log.
    pub effective_multiplier: Decimal,
    /// Rate reported for the log.
    pub effective_rate: Decimal,
    /// Whether the log carried the shadow-day sentinel.
    pub is_shadow_day: bool,
    /// The day type of the work date.
    pub day_type: DayType,
}

/// Resolves rates and tiers against a set of [`PayrollSettings`].
#[derive(Debug, Clone, Default)]
pub struct RateResolver {
    settings: PayrollSettings,
}

impl RateResolver {
    /// Creates a resolver with the given settings.
    pub fn new(settings: PayrollSettings) -> Self {
        Self { settings }
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &PayrollSettings {
        &self.settings
    }

    /// Returns true when the log's multiplier equals the shadow-day sentinel.
    pub fn is_shadow_day(&self, work_log: &WorkLog) -> bool {
        work_log.rate_multiplier == self.settings.shadow_day_multiplier
    }

    /// Determines the base and overtime rates for a work log.
    ///
    /// The base rate is the first of: the work log's override, the member's
    /// standing rate, the configured default. The overtime rate is the
    /// member's standing overtime rate or the base rate times the default
    /// overtime multiplier.
    ///
    /// # Example
    ///
    /// ```
    /// use care_payroll_engine::calculation::{RateResolver, StandingRates};
    /// use care_payroll_engine::config::PayrollSettings;
    /// use care_payroll_engine::models::NewWorkLog;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let log = NewWorkLog {
    ///     care_team_member_id: Uuid::new_v4(),
    ///     care_plan_id: Uuid::new_v4(),
    ///     shift_id: None,
    ///     start_time: NaiveDateTime::parse_from_str("2024-07-06 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2024-07-06 15:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     base_rate: None,
    ///     rate_multiplier: Decimal::ONE,
    ///     notes: None,
    /// }
    /// .into_work_log();
    ///
    /// let resolver = RateResolver::new(PayrollSettings::default());
    /// let rates = resolver.resolve_rates(&log, &StandingRates::default(), 1).unwrap();
    /// assert_eq!(rates.base_rate, Decimal::from(15));
    /// assert_eq!(rates.overtime_rate, Decimal::new(225, 1));
    /// ```
    pub fn resolve_rates(
        &self,
        work_log: &WorkLog,
        standing: &StandingRates,
        step_number: u32,
    ) -> EngineResult<ResolvedRates> {
        let (base_rate, source) = match (work_log.base_rate, standing.regular_rate) {
            (Some(rate), _) => (rate, "work_log_override"),
            (None, Some(rate)) => (rate, "standing_rate"),
            (None, None) => (self.settings.default_regular_rate, "default"),
        };

        if base_rate < Decimal::ZERO {
            return Err(EngineError::calculation(format!(
                "work log {} resolved a negative base rate {}",
                work_log.id, base_rate
            )));
        }

        let (overtime_rate, overtime_source) = match standing.overtime_rate {
            Some(rate) => (rate, "standing_rate"),
            None => (
                scaled(base_rate, self.settings.default_overtime_multiplier, work_log)?,
                "default_multiplier",
            ),
        };

        let audit_step = AuditStep {
            step_number,
            rule_id: "rate_lookup".to_string(),
            rule_name: "Rate Lookup".to_string(),
            input: serde_json::json!({
                "work_log_base_rate": work_log.base_rate.map(|r| r.to_string()),
                "standing_regular_rate": standing.regular_rate.map(|r| r.to_string()),
                "standing_overtime_rate": standing.overtime_rate.map(|r| r.to_string()),
            }),
            output: serde_json::json!({
                "base_rate": base_rate.normalize().to_string(),
                "base_rate_source": source,
                "overtime_rate": overtime_rate.normalize().to_string(),
                "overtime_rate_source": overtime_source,
            }),
            reasoning: format!(
                "Base rate ${} from {}; overtime rate ${} from {}",
                base_rate.normalize(),
                source,
                overtime_rate.normalize(),
                overtime_source
            ),
        };

        Ok(ResolvedRates {
            base_rate,
            overtime_rate,
            audit_step,
        })
    }

    /// Chooses the single tier that consumes all of the log's hours.
    pub fn decide_tier(
        &self,
        work_log: &WorkLog,
        holiday: Option<&Holiday>,
        rates: &ResolvedRates,
    ) -> EngineResult<TierDecision> {
        let is_shadow_day = self.is_shadow_day(work_log);
        let day_type = get_day_type(work_log.work_date());
        let base = rates.base_rate;

        if let Some(holiday) = holiday {
            let (multiplier, rate) = if is_shadow_day {
                let stacked = self.settings.shadow_holiday_multiplier;
                (stacked, scaled(base, stacked, work_log)?)
            } else {
                let rate = holiday.rate_for(base).ok_or_else(|| overflow(work_log))?;
                (holiday.pay_multiplier, rate)
            };
            return Ok(TierDecision {
                category: HourCategory::Holiday,
                rate,
                effective_multiplier: multiplier,
                effective_rate: rate,
                is_shadow_day,
                day_type,
            });
        }

        if day_type.is_weekend() && !is_shadow_day {
            // Weekend hours are paid at overtime but reported at the base rate.
            return Ok(TierDecision {
                category: HourCategory::Overtime,
                rate: rates.overtime_rate,
                effective_multiplier: Decimal::ONE,
                effective_rate: base,
                is_shadow_day,
                day_type,
            });
        }

        if is_shadow_day {
            let multiplier = self.settings.shadow_day_multiplier;
            let rate = scaled(base, multiplier, work_log)?;
            return Ok(TierDecision {
                category: HourCategory::Shadow,
                rate,
                effective_multiplier: multiplier,
                effective_rate: rate,
                is_shadow_day,
                day_type,
            });
        }

        Ok(TierDecision {
            category: HourCategory::Regular,
            rate: base,
            effective_multiplier: Decimal::ONE,
            effective_rate: base,
            is_shadow_day,
            day_type,
        })
    }
}

fn overflow(work_log: &WorkLog) -> EngineError {
    EngineError::calculation(format!(
        "work log {} has a rate too large to calculate",
        work_log.id
    ))
}

fn scaled(rate: Decimal, multiplier: Decimal, work_log: &WorkLog) -> EngineResult<Decimal> {
    rate.checked_mul(multiplier).ok_or_else(|| overflow(work_log))
}
