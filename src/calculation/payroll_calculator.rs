//! Payroll calculation for a single work log.
//!
//! [`PayrollCalculator`] composes the [`HolidayCalendar`] and the
//! [`RateResolver`] to sort a work log's hours into exactly one category,
//! price them, and add the attached expenses. Amounts keep full decimal
//! precision; rounding happens only when a receipt is rendered.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::config::PayrollSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AuditStep, Holiday, HourCategory, PaymentStatus, PayrollEntry, WorkLog, WorkLogExpense,
    expense_total,
};

use super::holiday_calendar::HolidayCalendar;
use super::rate_resolver::{RateResolver, StandingRates};

/// The full result of calculating one work log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollCalculation {
    /// The work log this calculation is for.
    pub work_log_id: Uuid,
    /// Elapsed hours of the work log.
    pub total_hours: Decimal,
    /// Hours at the regular rate.
    pub regular_hours: Decimal,
    /// Hours at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours at the holiday rate.
    pub holiday_hours: Decimal,
    /// Hours at the shadow-day rate.
    pub shadow_hours: Decimal,
    /// The base rate.
    pub regular_rate: Decimal,
    /// The overtime rate.
    pub overtime_rate: Decimal,
    /// The holiday rate, zero unless the work date is a holiday.
    pub holiday_rate: Decimal,
    /// The shadow-day rate, zero unless the log is a non-holiday shadow day.
    pub shadow_rate: Decimal,
    /// The rate reported for the log.
    pub effective_rate: Decimal,
    /// The multiplier reported for the log.
    pub effective_multiplier: Decimal,
    /// The category that received the hours.
    pub category: HourCategory,
    /// The holiday the work date matched, if any.
    pub holiday: Option<Holiday>,
    /// Sum of attached expenses.
    pub expense_total: Decimal,
    /// Hours × rate across categories.
    pub labor_total: Decimal,
    /// Labor plus expenses.
    pub total_amount: Decimal,
    /// The decisions taken, in order.
    pub audit_trace: Vec<AuditStep>,
}

impl PayrollCalculation {
    /// Returns true when the work date matched a holiday.
    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }

    /// The hourly rate of the category that received the hours.
    pub fn applied_rate(&self) -> Decimal {
        match self.category {
            HourCategory::Regular => self.regular_rate,
            HourCategory::Overtime => self.overtime_rate,
            HourCategory::Holiday => self.holiday_rate,
            HourCategory::Shadow => self.shadow_rate,
        }
    }

    /// Builds the pending payroll entry that records this calculation.
    pub fn to_entry(&self, work_log: &WorkLog, created_at: DateTime<Utc>) -> PayrollEntry {
        PayrollEntry {
            id: Uuid::new_v4(),
            work_log_id: work_log.id,
            care_team_member_id: work_log.care_team_member_id,
            care_plan_id: work_log.care_plan_id,
            work_start: work_log.start_time,
            work_end: work_log.end_time,
            regular_hours: self.regular_hours,
            overtime_hours: self.overtime_hours,
            holiday_hours: self.holiday_hours,
            shadow_hours: self.shadow_hours,
            regular_rate: self.regular_rate,
            overtime_rate: self.overtime_rate,
            holiday_rate: self.holiday_rate,
            shadow_rate: self.shadow_rate,
            expense_total: self.expense_total,
            total_amount: self.total_amount,
            payment_status: PaymentStatus::Pending,
            payment_date: None,
            created_at,
        }
    }
}

/// Turns work logs into categorised, priced calculations.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use care_payroll_engine::calculation::{HolidayCalendar, PayrollCalculator, StandingRates};
/// use care_payroll_engine::config::PayrollSettings;
/// use care_payroll_engine::models::{Holiday, NewWorkLog};
/// use chrono::{NaiveDate, NaiveDateTime};
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let calendar = HolidayCalendar::new(vec![Holiday {
///     date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
///     name: "Independence Day".to_string(),
///     pay_multiplier: Decimal::new(15, 1),
/// }])
/// .unwrap();
/// let calculator = PayrollCalculator::new(Arc::new(calendar), PayrollSettings::default());
///
/// let log = NewWorkLog {
///     care_team_member_id: Uuid::new_v4(),
///     care_plan_id: Uuid::new_v4(),
///     shift_id: None,
///     start_time: NaiveDateTime::parse_from_str("2024-07-04 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     end_time: NaiveDateTime::parse_from_str("2024-07-04 16:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
///     base_rate: Some(Decimal::from(20)),
///     rate_multiplier: Decimal::ONE,
///     notes: None,
/// }
/// .into_work_log();
///
/// let calculation = calculator.compute(&log, &StandingRates::default(), &[]).unwrap();
/// assert_eq!(calculation.holiday_hours, Decimal::from(8));
/// assert_eq!(calculation.holiday_rate, Decimal::from(30));
/// assert_eq!(calculation.total_amount, Decimal::from(240));
/// ```
#[derive(Debug, Clone)]
pub struct PayrollCalculator {
    calendar: Arc<HolidayCalendar>,
    resolver: RateResolver,
}

impl PayrollCalculator {
    /// Creates a calculator over a shared calendar.
    pub fn new(calendar: Arc<HolidayCalendar>, settings: PayrollSettings) -> Self {
        Self {
            calendar,
            resolver: RateResolver::new(settings),
        }
    }

    /// Returns the calendar in use.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Returns the settings in use.
    pub fn settings(&self) -> &PayrollSettings {
        self.resolver.settings()
    }

    /// Rejects work logs that cannot be priced.
    pub fn validate(&self, work_log: &WorkLog) -> EngineResult<()> {
        if work_log.end_time <= work_log.start_time {
            return Err(EngineError::calculation(format!(
                "work log {} ends at {} which is not after its start {}",
                work_log.id, work_log.end_time, work_log.start_time
            )));
        }
        if work_log.rate_multiplier < Decimal::ZERO {
            return Err(EngineError::calculation(format!(
                "work log {} has negative rate multiplier {}",
                work_log.id, work_log.rate_multiplier
            )));
        }
        Ok(())
    }

    /// Calculates one work log.
    ///
    /// All elapsed hours go to exactly one category, so the category hours
    /// always sum to the elapsed hours. Expenses are summed regardless of
    /// their review status.
    pub fn compute(
        &self,
        work_log: &WorkLog,
        standing: &StandingRates,
        expenses: &[WorkLogExpense],
    ) -> EngineResult<PayrollCalculation> {
        self.validate(work_log)?;

        let mut audit_trace = Vec::with_capacity(5);
        let mut step_number: u32 = 1;

        let total_hours = work_log.elapsed_hours();
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "elapsed_hours".to_string(),
            rule_name: "Elapsed Hours".to_string(),
            input: serde_json::json!({
                "start_time": work_log.start_time.to_string(),
                "end_time": work_log.end_time.to_string(),
            }),
            output: serde_json::json!({ "total_hours": total_hours.normalize().to_string() }),
            reasoning: format!(
                "{} hours between start and end, no break deduction",
                total_hours.normalize()
            ),
        });
        step_number += 1;

        let work_date = work_log.work_date();
        let holiday = self.calendar.lookup(work_date);
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "holiday_lookup".to_string(),
            rule_name: "Holiday Lookup".to_string(),
            input: serde_json::json!({ "work_date": work_date.to_string() }),
            output: serde_json::json!({
                "is_holiday": holiday.is_some(),
                "holiday": holiday.map(|h| h.name.clone()),
                "pay_multiplier": holiday.map(|h| h.pay_multiplier.normalize().to_string()),
            }),
            reasoning: match holiday {
                Some(h) => format!("{} is {}", work_date, h.name),
                None => format!("{} is not a configured holiday", work_date),
            },
        });
        step_number += 1;

        let rates = self.resolver.resolve_rates(work_log, standing, step_number)?;
        audit_trace.push(rates.audit_step.clone());
        step_number += 1;

        let decision = self.resolver.decide_tier(work_log, holiday, &rates)?;
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "rate_tier".to_string(),
            rule_name: "Rate Tier".to_string(),
            input: serde_json::json!({
                "day_type": decision.day_type,
                "is_holiday": holiday.is_some(),
                "is_shadow_day": decision.is_shadow_day,
                "rate_multiplier": work_log.rate_multiplier.normalize().to_string(),
            }),
            output: serde_json::json!({
                "category": decision.category,
                "rate": decision.rate.normalize().to_string(),
                "effective_multiplier": decision.effective_multiplier.normalize().to_string(),
            }),
            reasoning: format!(
                "All {} hours as {} at ${}",
                total_hours.normalize(),
                decision.category.label().to_lowercase(),
                decision.rate.normalize()
            ),
        });
        step_number += 1;

        let expense_total = expense_total(expenses).ok_or_else(|| {
            EngineError::calculation(format!(
                "expenses for work log {} sum past the representable range",
                work_log.id
            ))
        })?;
        audit_trace.push(AuditStep {
            step_number,
            rule_id: "expense_total".to_string(),
            rule_name: "Expense Total".to_string(),
            input: serde_json::json!({ "expense_count": expenses.len() }),
            output: serde_json::json!({ "expense_total": expense_total.normalize().to_string() }),
            reasoning: format!(
                "{} expenses totalling ${}, regardless of review status",
                expenses.len(),
                expense_total.normalize()
            ),
        });

        let hours_in = |category: HourCategory| {
            if decision.category == category {
                total_hours
            } else {
                Decimal::ZERO
            }
        };
        let rate_if = |category: HourCategory| {
            if decision.category == category {
                decision.rate
            } else {
                Decimal::ZERO
            }
        };

        let labor_total = total_hours.checked_mul(decision.rate).ok_or_else(|| {
            EngineError::calculation(format!(
                "labor for work log {} is too large to calculate",
                work_log.id
            ))
        })?;
        let total_amount = labor_total.checked_add(expense_total).ok_or_else(|| {
            EngineError::calculation(format!(
                "total for work log {} is too large to calculate",
                work_log.id
            ))
        })?;

        debug!(
            work_log_id = %work_log.id,
            category = ?decision.category,
            total_hours = %total_hours,
            total_amount = %total_amount,
            "Calculated work log"
        );

        Ok(PayrollCalculation {
            work_log_id: work_log.id,
            total_hours,
            regular_hours: hours_in(HourCategory::Regular),
            overtime_hours: hours_in(HourCategory::Overtime),
            holiday_hours: hours_in(HourCategory::Holiday),
            shadow_hours: hours_in(HourCategory::Shadow),
            regular_rate: rates.base_rate,
            overtime_rate: rates.overtime_rate,
            holiday_rate: rate_if(HourCategory::Holiday),
            shadow_rate: rate_if(HourCategory::Shadow),
            effective_rate: decision.effective_rate,
            effective_multiplier: decision.effective_multiplier,
            category: decision.category,
            holiday: holiday.cloned(),
            expense_total,
            labor_total,
            total_amount,
            audit_trace,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseCategory, ExpenseStatus, NewExpense, NewWorkLog};
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    fn make_log(
        start: NaiveDateTime,
        end: NaiveDateTime,
        base_rate: Option<&str>,
        multiplier: &str,
    ) -> WorkLog {
        NewWorkLog {
            care_team_member_id: Uuid::new_v4(),
            care_plan_id: Uuid::new_v4(),
            shift_id: None,
            start_time: start,
            end_time: end,
            base_rate: base_rate.map(dec),
            rate_multiplier: dec(multiplier),
            notes: None,
        }
        .into_work_log()
    }

    fn create_calculator() -> PayrollCalculator {
        let calendar = HolidayCalendar::new(vec![
            Holiday {
                date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
                name: "Independence Day".to_string(),
                pay_multiplier: dec("1.5"),
            },
            Holiday {
                date: NaiveDate::from_ymd_opt(2024, 12, 25).unwrap(),
                name: "Christmas Day".to_string(),
                pay_multiplier: dec("2.0"),
            },
        ])
        .unwrap();
        PayrollCalculator::new(Arc::new(calendar), PayrollSettings::default())
    }

    fn expense(work_log_id: Uuid, amount: &str, status: ExpenseStatus) -> WorkLogExpense {
        let mut expense = NewExpense {
            category: ExpenseCategory::Transportation,
            amount: dec(amount),
            description: "Mileage".to_string(),
        }
        .into_expense(work_log_id);
        expense.status = status;
        expense
    }

    /// Holiday, 8h at $20 with a 1.5 multiplier.
    #[test]
    fn test_holiday_eight_hours() {
        let log = make_log(
            make_datetime("2024-07-04", "08:00:00"),
            make_datetime("2024-07-04", "16:00:00"),
            Some("20"),
            "1.0",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert_eq!(result.holiday_hours, dec("8"));
        assert_eq!(result.holiday_rate, dec("30"));
        assert_eq!(result.total_amount, dec("240"));
        assert_eq!(result.effective_multiplier, dec("1.5"));
        assert_eq!(result.effective_rate, dec("30"));
        assert!(result.is_holiday());
    }

    /// Shadow day on a holiday stacks to 0.75.
    #[test]
    fn test_shadow_day_on_holiday() {
        let log = make_log(
            make_datetime("2024-07-04", "08:00:00"),
            make_datetime("2024-07-04", "16:00:00"),
            Some("20"),
            "0.5",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert_eq!(result.effective_multiplier, dec("0.75"));
        assert_eq!(result.holiday_hours, dec("8"));
        assert_eq!(result.shadow_hours, Decimal::ZERO);
        assert_eq!(result.holiday_rate, dec("15"));
        assert_eq!(result.total_amount, dec("120"));
    }

    /// Non-holiday Saturday, 6h at $15.
    #[test]
    fn test_saturday_is_all_overtime() {
        let log = make_log(
            make_datetime("2024-07-06", "09:00:00"),
            make_datetime("2024-07-06", "15:00:00"),
            Some("15"),
            "1.0",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert_eq!(result.overtime_hours, dec("6"));
        assert_eq!(result.overtime_rate, dec("22.5"));
        assert_eq!(result.total_amount, dec("135"));
        assert_eq!(result.regular_hours, Decimal::ZERO);
        assert_eq!(result.effective_rate, dec("15"));
    }

    #[test]
    fn test_weekday_shadow_day_is_half_rate() {
        let log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "13:00:00"),
            Some("18"),
            "0.5",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert_eq!(result.shadow_hours, dec("4"));
        assert_eq!(result.shadow_rate, dec("9"));
        assert_eq!(result.effective_rate, dec("9"));
        assert_eq!(result.total_amount, dec("36"));
        assert_eq!(result.holiday_rate, Decimal::ZERO);
    }

    #[test]
    fn test_weekday_is_regular_at_base_rate() {
        let log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "16:30:00"),
            None,
            "1.0",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert_eq!(result.regular_hours, dec("7.5"));
        assert_eq!(result.regular_rate, dec("15"));
        assert_eq!(result.total_amount, dec("112.5"));
    }

    #[test]
    fn test_non_sentinel_multiplier_does_not_scale_pay() {
        let log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "17:00:00"),
            Some("15"),
            "1.25",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert_eq!(result.regular_hours, dec("8"));
        assert_eq!(result.total_amount, dec("120"));
    }

    #[test]
    fn test_holiday_matches_on_start_date_only() {
        // Starts Christmas Eve night, ends on Christmas morning
        let log = make_log(
            make_datetime("2024-12-24", "22:00:00"),
            make_datetime("2024-12-25", "06:00:00"),
            Some("20"),
            "1.0",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert!(!result.is_holiday());
        assert_eq!(result.regular_hours, dec("8"));
    }

    #[test]
    fn test_holiday_matches_regardless_of_start_time() {
        let log = make_log(
            make_datetime("2024-12-25", "23:00:00"),
            make_datetime("2024-12-26", "03:00:00"),
            Some("20"),
            "1.0",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert_eq!(result.holiday_hours, dec("4"));
        assert_eq!(result.holiday_rate, dec("40"));
    }

    #[test]
    fn test_expenses_added_regardless_of_status() {
        let log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "17:00:00"),
            Some("15"),
            "1.0",
        );
        let expenses = vec![
            expense(log.id, "10.50", ExpenseStatus::Approved),
            expense(log.id, "4.25", ExpenseStatus::Rejected),
            expense(log.id, "0.25", ExpenseStatus::Pending),
        ];

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &expenses)
            .unwrap();

        assert_eq!(result.expense_total, dec("15"));
        assert_eq!(result.labor_total, dec("120"));
        assert_eq!(result.total_amount, dec("135"));
    }

    #[test]
    fn test_end_before_start_is_a_calculation_error() {
        let log = make_log(
            make_datetime("2024-07-09", "17:00:00"),
            make_datetime("2024-07-09", "09:00:00"),
            None,
            "1.0",
        );

        let result = create_calculator().compute(&log, &StandingRates::default(), &[]);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_zero_length_interval_is_a_calculation_error() {
        let at = make_datetime("2024-07-09", "09:00:00");
        let log = make_log(at, at, None, "1.0");

        let result = create_calculator().compute(&log, &StandingRates::default(), &[]);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_negative_multiplier_is_a_calculation_error() {
        let log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "10:00:00"),
            None,
            "-1",
        );

        let result = create_calculator().compute(&log, &StandingRates::default(), &[]);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_labor_overflow_is_a_calculation_error() {
        let mut log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "17:00:00"),
            None,
            "1.0",
        );
        log.base_rate = Some(Decimal::MAX / Decimal::from(2));

        let result = create_calculator().compute(&log, &StandingRates::default(), &[]);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_expense_overflow_is_a_calculation_error() {
        let log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "10:00:00"),
            Some("20"),
            "1.0",
        );
        let max = Decimal::MAX.to_string();
        let expenses = vec![
            expense(log.id, &max, ExpenseStatus::Pending),
            expense(log.id, &max, ExpenseStatus::Approved),
        ];

        let result = create_calculator().compute(&log, &StandingRates::default(), &expenses);
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_full_precision_is_kept() {
        // 20 minutes at $17.33: 1/3 h, amount not rounded
        let log = make_log(
            make_datetime("2024-07-09", "09:00:00"),
            make_datetime("2024-07-09", "09:20:00"),
            Some("17.33"),
            "1.0",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        assert!(result.total_amount.scale() > 2);
        assert_eq!(result.total_amount.round_dp(2), dec("5.78"));
    }

    #[test]
    fn test_audit_trace_records_each_rule() {
        let log = make_log(
            make_datetime("2024-07-04", "08:00:00"),
            make_datetime("2024-07-04", "16:00:00"),
            Some("20"),
            "1.0",
        );

        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        let rule_ids: Vec<&str> = result
            .audit_trace
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec!["elapsed_hours", "holiday_lookup", "rate_lookup", "rate_tier", "expense_total"]
        );
        let numbers: Vec<u32> = result.audit_trace.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert_eq!(result.audit_trace[1].output["holiday"], "Independence Day");
    }

    #[test]
    fn test_to_entry_copies_calculation() {
        let log = make_log(
            make_datetime("2024-07-06", "09:00:00"),
            make_datetime("2024-07-06", "15:00:00"),
            Some("15"),
            "1.0",
        );
        let result = create_calculator()
            .compute(&log, &StandingRates::default(), &[])
            .unwrap();

        let entry = result.to_entry(&log, Utc::now());
        assert_eq!(entry.work_log_id, log.id);
        assert_eq!(entry.care_plan_id, log.care_plan_id);
        assert_eq!(entry.work_start, log.start_time);
        assert_eq!(entry.overtime_hours, dec("6"));
        assert_eq!(entry.total_amount, dec("135"));
        assert_eq!(entry.payment_status, PaymentStatus::Pending);
        assert!(entry.payment_date.is_none());
        assert_eq!(entry.labor_total() + entry.expense_total, entry.total_amount);
    }

    proptest! {
        #[test]
        fn prop_hours_are_conserved_in_one_category(
            day_offset in 0i64..730,
            start_minute in 0i64..1440,
            duration_minutes in 1i64..2000,
            shadow in any::<bool>(),
            base_cents in 0i64..10_000,
        ) {
            let start = make_datetime("2024-01-01", "00:00:00")
                + Duration::days(day_offset)
                + Duration::minutes(start_minute);
            let end = start + Duration::minutes(duration_minutes);
            let base = Decimal::new(base_cents, 2).to_string();
            let log = make_log(start, end, Some(base.as_str()), if shadow { "0.5" } else { "1.0" });

            let result = create_calculator()
                .compute(&log, &StandingRates::default(), &[])
                .unwrap();

            let categories = [
                result.regular_hours,
                result.overtime_hours,
                result.holiday_hours,
                result.shadow_hours,
            ];
            let sum: Decimal = categories.iter().copied().sum();
            let non_zero = categories.iter().filter(|h| !h.is_zero()).count();

            prop_assert_eq!(sum, log.elapsed_hours());
            prop_assert_eq!(non_zero, 1);
            prop_assert_eq!(
                result.total_amount,
                result.total_hours * result.applied_rate() + result.expense_total
            );
        }
    }
}
