//! Work log creation and review.
//!
//! Approval is the one operation that writes twice: the work log moves to
//! approved and a payroll entry is created. The store has no transactions,
//! so the status change is a conditional update and a failed entry insert
//! is followed by a conditional revert back to pending.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::calculation::{PayrollCalculation, PayrollCalculator, StandingRates};
use crate::error::{EngineError, EngineResult, RecordKind};
use crate::models::{
    ExpenseStatus, NewExpense, NewWorkLog, PayrollEntry, WorkLog, WorkLogExpense, WorkLogStatus,
};
use crate::ports::PayrollStore;

/// Drives work logs and their expenses through review.
pub struct WorkLogLifecycle<S: PayrollStore> {
    store: Arc<S>,
    calculator: PayrollCalculator,
}

impl<S: PayrollStore> WorkLogLifecycle<S> {
    /// Creates a lifecycle over a store and calculator.
    pub fn new(store: Arc<S>, calculator: PayrollCalculator) -> Self {
        Self { store, calculator }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Returns the calculator in use.
    pub fn calculator(&self) -> &PayrollCalculator {
        &self.calculator
    }

    /// Validates and records a new pending work log.
    pub async fn log_time(&self, new_log: NewWorkLog) -> EngineResult<WorkLog> {
        let work_log = new_log.into_work_log();
        self.calculator.validate(&work_log)?;
        if let Some(rate) = work_log.base_rate.filter(|r| *r < Decimal::ZERO) {
            return Err(EngineError::calculation(format!(
                "work log {} has negative base rate {}",
                work_log.id, rate
            )));
        }

        let created = self.store.create_work_log(work_log).await?;
        info!(
            work_log_id = %created.id,
            care_team_member_id = %created.care_team_member_id,
            hours = %created.elapsed_hours(),
            "Work log recorded"
        );
        Ok(created)
    }

    /// Approves a pending work log and records its payroll entry.
    ///
    /// Fails with [`EngineError::InvalidState`] if the log is not pending,
    /// including when a concurrent approval got there first. If the entry
    /// cannot be stored, the log is put back to pending before the error is
    /// returned.
    pub async fn approve(&self, id: Uuid) -> EngineResult<PayrollEntry> {
        let work_log = self.load_work_log(id).await?;
        if work_log.status != WorkLogStatus::Pending {
            return Err(EngineError::invalid_state(
                RecordKind::WorkLog,
                id,
                WorkLogStatus::Pending,
                work_log.status,
            ));
        }

        let calculation = self.calculate(&work_log).await?;

        let won = self
            .store
            .update_work_log_status(id, WorkLogStatus::Pending, WorkLogStatus::Approved, None)
            .await?;
        if !won {
            let actual = self.current_status(id).await;
            warn!(work_log_id = %id, actual = %actual, "Lost approval race");
            return Err(EngineError::invalid_state(
                RecordKind::WorkLog,
                id,
                WorkLogStatus::Pending,
                actual,
            ));
        }

        let entry = calculation.to_entry(&work_log, Utc::now());
        match self.store.create_payroll_entry(entry).await {
            Ok(entry) => {
                info!(
                    work_log_id = %id,
                    payroll_entry_id = %entry.id,
                    total_amount = %entry.total_amount,
                    "Work log approved"
                );
                Ok(entry)
            }
            Err(cause) => {
                warn!(
                    work_log_id = %id,
                    error = %cause,
                    "Payroll entry creation failed, reverting work log to pending"
                );
                match self
                    .store
                    .update_work_log_status(id, WorkLogStatus::Approved, WorkLogStatus::Pending, None)
                    .await
                {
                    Ok(true) => Err(EngineError::Persistence(cause)),
                    Ok(false) => {
                        // Someone else moved the log after our approval.
                        error!(work_log_id = %id, "Revert found work log no longer approved");
                        Err(EngineError::Persistence(cause))
                    }
                    Err(rollback) => {
                        error!(
                            work_log_id = %id,
                            error = %cause,
                            rollback_error = %rollback,
                            "Revert failed after payroll entry creation failure"
                        );
                        Err(EngineError::RollbackFailed {
                            work_log_id: id,
                            cause,
                            rollback,
                        })
                    }
                }
            }
        }
    }

    /// Rejects a pending work log with an optional reviewer note.
    pub async fn reject(&self, id: Uuid, reason: Option<&str>) -> EngineResult<WorkLog> {
        let mut work_log = self.load_work_log(id).await?;
        if work_log.status != WorkLogStatus::Pending {
            return Err(EngineError::invalid_state(
                RecordKind::WorkLog,
                id,
                WorkLogStatus::Pending,
                work_log.status,
            ));
        }

        let won = self
            .store
            .update_work_log_status(id, WorkLogStatus::Pending, WorkLogStatus::Rejected, reason)
            .await?;
        if !won {
            let actual = self.current_status(id).await;
            return Err(EngineError::invalid_state(
                RecordKind::WorkLog,
                id,
                WorkLogStatus::Pending,
                actual,
            ));
        }

        info!(work_log_id = %id, reason = ?reason, "Work log rejected");
        work_log.status = WorkLogStatus::Rejected;
        work_log.review_note = reason.map(str::to_string);
        Ok(work_log)
    }

    /// Attaches a pending expense to a work log.
    pub async fn record_expense(
        &self,
        work_log_id: Uuid,
        new_expense: NewExpense,
    ) -> EngineResult<WorkLogExpense> {
        self.load_work_log(work_log_id).await?;
        if new_expense.amount < Decimal::ZERO {
            return Err(EngineError::calculation(format!(
                "expense amount {} for work log {} is negative",
                new_expense.amount, work_log_id
            )));
        }

        let expense = self
            .store
            .create_expense(new_expense.into_expense(work_log_id))
            .await?;
        info!(
            work_log_id = %work_log_id,
            expense_id = %expense.id,
            amount = %expense.amount,
            "Expense recorded"
        );
        Ok(expense)
    }

    /// Approves or rejects a pending expense.
    ///
    /// The decision has no effect on the work log's calculated expense total.
    pub async fn review_expense(
        &self,
        expense_id: Uuid,
        decision: ExpenseStatus,
    ) -> EngineResult<WorkLogExpense> {
        if decision == ExpenseStatus::Pending {
            return Err(EngineError::calculation(
                "an expense review must approve or reject",
            ));
        }

        let mut expense = self
            .store
            .get_expense(expense_id)
            .await?
            .ok_or(EngineError::NotFound {
                kind: RecordKind::Expense,
                id: expense_id,
            })?;
        if expense.status != ExpenseStatus::Pending {
            return Err(EngineError::invalid_state(
                RecordKind::Expense,
                expense_id,
                ExpenseStatus::Pending,
                expense.status,
            ));
        }

        let won = self
            .store
            .update_expense_status(expense_id, ExpenseStatus::Pending, decision)
            .await?;
        if !won {
            let actual = match self.store.get_expense(expense_id).await {
                Ok(Some(current)) => current.status.to_string(),
                _ => "unknown".to_string(),
            };
            return Err(EngineError::invalid_state(
                RecordKind::Expense,
                expense_id,
                ExpenseStatus::Pending,
                actual,
            ));
        }

        info!(expense_id = %expense_id, decision = %decision, "Expense reviewed");
        expense.status = decision;
        Ok(expense)
    }

    /// Calculates a work log without writing anything.
    pub async fn preview(&self, id: Uuid) -> EngineResult<PayrollCalculation> {
        let work_log = self.load_work_log(id).await?;
        self.calculate(&work_log).await
    }

    async fn load_work_log(&self, id: Uuid) -> EngineResult<WorkLog> {
        self.store
            .get_work_log(id)
            .await?
            .ok_or(EngineError::NotFound {
                kind: RecordKind::WorkLog,
                id,
            })
    }

    async fn calculate(&self, work_log: &WorkLog) -> EngineResult<PayrollCalculation> {
        let standing = match self
            .store
            .get_care_team_member(work_log.care_team_member_id)
            .await?
        {
            Some(member) => StandingRates::from(&member),
            None => {
                warn!(
                    work_log_id = %work_log.id,
                    care_team_member_id = %work_log.care_team_member_id,
                    "No care team member record, using default rates"
                );
                StandingRates::default()
            }
        };

        let expenses = match self.store.list_expenses(work_log.id).await {
            Ok(expenses) => expenses,
            Err(err) => {
                warn!(
                    work_log_id = %work_log.id,
                    error = %err,
                    "Could not list expenses, calculating with no expenses"
                );
                Vec::new()
            }
        };

        let calculation = self.calculator.compute(work_log, &standing, &expenses)?;
        debug!(
            work_log_id = %work_log.id,
            steps = calculation.audit_trace.len(),
            "Work log calculated"
        );
        Ok(calculation)
    }

    async fn current_status(&self, id: Uuid) -> String {
        match self.store.get_work_log(id).await {
            Ok(Some(current)) => current.status.to_string(),
            Ok(None) => "missing".to_string(),
            Err(_) => "unknown".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::HolidayCalendar;
    use crate::config::PayrollSettings;
    use crate::models::{CareTeamMember, ExpenseCategory, Holiday, PaymentStatus};
    use crate::ports::InMemoryPayrollStore;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&format!("{} {}", date_str, time_str), "%Y-%m-%d %H:%M:%S")
            .unwrap()
    }

    async fn setup() -> (WorkLogLifecycle<InMemoryPayrollStore>, CareTeamMember) {
        let calendar = HolidayCalendar::new(vec![Holiday {
            date: NaiveDate::from_ymd_opt(2024, 7, 4).unwrap(),
            name: "Independence Day".to_string(),
            pay_multiplier: dec("1.5"),
        }])
        .unwrap();
        let store = Arc::new(InMemoryPayrollStore::new());
        let member = CareTeamMember {
            id: Uuid::new_v4(),
            display_name: "Grace Okafor".to_string(),
            regular_rate: Some(dec("18")),
            overtime_rate: None,
        };
        store.put_care_team_member(member.clone()).await;

        let calculator = PayrollCalculator::new(Arc::new(calendar), PayrollSettings::default());
        (WorkLogLifecycle::new(store, calculator), member)
    }

    fn new_log(member: &CareTeamMember, date: &str, base_rate: Option<&str>) -> NewWorkLog {
        NewWorkLog {
            care_team_member_id: member.id,
            care_plan_id: Uuid::new_v4(),
            shift_id: None,
            start_time: make_datetime(date, "08:00:00"),
            end_time: make_datetime(date, "16:00:00"),
            base_rate: base_rate.map(dec),
            rate_multiplier: Decimal::ONE,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_log_time_records_pending_log() {
        let (lifecycle, member) = setup().await;

        let log = lifecycle
            .log_time(new_log(&member, "2024-07-09", None))
            .await
            .unwrap();

        assert_eq!(log.status, WorkLogStatus::Pending);
        let stored = lifecycle.store().get_work_log(log.id).await.unwrap();
        assert_eq!(stored, Some(log));
    }

    #[tokio::test]
    async fn test_log_time_rejects_inverted_interval() {
        let (lifecycle, member) = setup().await;
        let mut input = new_log(&member, "2024-07-09", None);
        input.end_time = make_datetime("2024-07-09", "07:00:00");

        let result = lifecycle.log_time(input).await;
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[tokio::test]
    async fn test_log_time_rejects_negative_base_rate() {
        let (lifecycle, member) = setup().await;

        let result = lifecycle
            .log_time(new_log(&member, "2024-07-09", Some("-1")))
            .await;
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[tokio::test]
    async fn test_approve_creates_one_pending_entry() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-09", None))
            .await
            .unwrap();

        let entry = lifecycle.approve(log.id).await.unwrap();

        // Standing rate 18, 8 weekday hours
        assert_eq!(entry.regular_hours, dec("8"));
        assert_eq!(entry.total_amount, dec("144"));
        assert_eq!(entry.payment_status, PaymentStatus::Pending);

        let stored = lifecycle.store().get_work_log(log.id).await.unwrap().unwrap();
        assert_eq!(stored.status, WorkLogStatus::Approved);
        assert_eq!(lifecycle.store().payroll_entry_count(log.id).await, 1);
    }

    #[tokio::test]
    async fn test_approve_twice_is_invalid_state() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-04", Some("20")))
            .await
            .unwrap();

        lifecycle.approve(log.id).await.unwrap();
        let second = lifecycle.approve(log.id).await;

        match second {
            Err(EngineError::InvalidState { actual, .. }) => assert_eq!(actual, "approved"),
            other => panic!("Expected InvalidState, got {:?}", other),
        }
        assert_eq!(lifecycle.store().payroll_entry_count(log.id).await, 1);
    }

    #[tokio::test]
    async fn test_approve_missing_log_is_not_found() {
        let (lifecycle, _) = setup().await;

        let result = lifecycle.approve(Uuid::new_v4()).await;
        assert!(matches!(
            result,
            Err(EngineError::NotFound {
                kind: RecordKind::WorkLog,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_approve_with_unknown_member_uses_default_rate() {
        let (lifecycle, _) = setup().await;
        let stranger = CareTeamMember {
            id: Uuid::new_v4(),
            display_name: "Unregistered".to_string(),
            regular_rate: None,
            overtime_rate: None,
        };
        let log = lifecycle
            .log_time(new_log(&stranger, "2024-07-09", None))
            .await
            .unwrap();

        let entry = lifecycle.approve(log.id).await.unwrap();

        // Default $15, 8 weekday hours
        assert_eq!(entry.regular_rate, dec("15"));
        assert_eq!(entry.total_amount, dec("120"));
        let stored = lifecycle.store().get_work_log(log.id).await.unwrap().unwrap();
        assert_eq!(stored.status, WorkLogStatus::Approved);
    }

    #[tokio::test]
    async fn test_approve_overflowing_rate_leaves_log_pending() {
        let (lifecycle, member) = setup().await;
        let mut input = new_log(&member, "2024-07-09", None);
        input.base_rate = Some(Decimal::MAX / Decimal::from(2));
        let log = lifecycle.log_time(input).await.unwrap();

        let result = lifecycle.approve(log.id).await;
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));

        let stored = lifecycle.store().get_work_log(log.id).await.unwrap().unwrap();
        assert_eq!(stored.status, WorkLogStatus::Pending);
        assert_eq!(lifecycle.store().payroll_entry_count(log.id).await, 0);
    }

    #[tokio::test]
    async fn test_reject_records_note() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-09", None))
            .await
            .unwrap();

        let rejected = lifecycle
            .reject(log.id, Some("Shift was cancelled"))
            .await
            .unwrap();

        assert_eq!(rejected.status, WorkLogStatus::Rejected);
        let stored = lifecycle.store().get_work_log(log.id).await.unwrap().unwrap();
        assert_eq!(stored.review_note.as_deref(), Some("Shift was cancelled"));
        assert!(lifecycle.approve(log.id).await.is_err());
    }

    #[tokio::test]
    async fn test_reject_after_approve_is_invalid_state() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-09", None))
            .await
            .unwrap();
        lifecycle.approve(log.id).await.unwrap();

        let result = lifecycle.reject(log.id, None).await;
        assert!(matches!(result, Err(EngineError::InvalidState { .. })));
    }

    #[tokio::test]
    async fn test_expenses_count_regardless_of_review() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-09", None))
            .await
            .unwrap();

        let fuel = lifecycle
            .record_expense(
                log.id,
                NewExpense {
                    category: ExpenseCategory::Transportation,
                    amount: dec("12.40"),
                    description: "Fuel".to_string(),
                },
            )
            .await
            .unwrap();
        lifecycle
            .record_expense(
                log.id,
                NewExpense {
                    category: ExpenseCategory::Food,
                    amount: dec("7.60"),
                    description: "Lunch".to_string(),
                },
            )
            .await
            .unwrap();

        let reviewed = lifecycle
            .review_expense(fuel.id, ExpenseStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(reviewed.status, ExpenseStatus::Rejected);

        let entry = lifecycle.approve(log.id).await.unwrap();
        assert_eq!(entry.expense_total, dec("20"));
        assert_eq!(entry.total_amount, dec("164"));
    }

    #[tokio::test]
    async fn test_record_expense_rejects_negative_amount() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-09", None))
            .await
            .unwrap();

        let result = lifecycle
            .record_expense(
                log.id,
                NewExpense {
                    category: ExpenseCategory::Other,
                    amount: dec("-3"),
                    description: String::new(),
                },
            )
            .await;
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[tokio::test]
    async fn test_record_expense_for_missing_log_is_not_found() {
        let (lifecycle, _) = setup().await;

        let result = lifecycle
            .record_expense(
                Uuid::new_v4(),
                NewExpense {
                    category: ExpenseCategory::Other,
                    amount: dec("3"),
                    description: String::new(),
                },
            )
            .await;
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_review_expense_twice_is_invalid_state() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-09", None))
            .await
            .unwrap();
        let expense = lifecycle
            .record_expense(
                log.id,
                NewExpense {
                    category: ExpenseCategory::MedicalSupplies,
                    amount: dec("9.99"),
                    description: "Gloves".to_string(),
                },
            )
            .await
            .unwrap();

        lifecycle
            .review_expense(expense.id, ExpenseStatus::Approved)
            .await
            .unwrap();
        let again = lifecycle
            .review_expense(expense.id, ExpenseStatus::Rejected)
            .await;

        assert!(matches!(
            again,
            Err(EngineError::InvalidState {
                kind: RecordKind::Expense,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_preview_writes_nothing() {
        let (lifecycle, member) = setup().await;
        let log = lifecycle
            .log_time(new_log(&member, "2024-07-04", Some("20")))
            .await
            .unwrap();

        let calculation = lifecycle.preview(log.id).await.unwrap();

        assert_eq!(calculation.total_amount, dec("240"));
        let stored = lifecycle.store().get_work_log(log.id).await.unwrap().unwrap();
        assert_eq!(stored.status, WorkLogStatus::Pending);
        assert_eq!(lifecycle.store().payroll_entry_count(log.id).await, 0);
    }
}
