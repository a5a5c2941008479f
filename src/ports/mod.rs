//! Persistence port consumed by the engine.
//!
//! The engine never talks to a database directly. It codes against the
//! [`PayrollStore`] trait; the hosting service supplies an implementation.
//! Status changes are conditional updates: the store applies them only when
//! the record is still in the `from` state and reports whether it did, which
//! is what keeps two concurrent approvals from both succeeding.

mod in_memory;
mod rows;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    CareTeamMember, ExpenseStatus, PaymentStatus, PayrollEntry, WorkLog, WorkLogExpense,
    WorkLogStatus,
};

pub use in_memory::InMemoryPayrollStore;
pub use rows::ExpenseRow;

/// Failures reported by a persistence backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// The backend rejected or failed the call.
    #[error("backend error: {0}")]
    Backend(String),

    /// A stored value could not be decoded into the engine's types.
    #[error("cannot decode field '{field}': {message}")]
    Decode {
        /// The offending column.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// A record with the same id already exists.
    #[error("duplicate record: {0}")]
    Duplicate(Uuid),
}

/// Result type for persistence calls.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage operations the engine needs.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    /// Loads a work log.
    async fn get_work_log(&self, id: Uuid) -> PersistenceResult<Option<WorkLog>>;

    /// Inserts a new work log.
    async fn create_work_log(&self, work_log: WorkLog) -> PersistenceResult<WorkLog>;

    /// Moves a work log from `from` to `to`, recording `note` when given.
    ///
    /// Returns `false` without writing when the log is missing or no longer
    /// in `from`.
    async fn update_work_log_status(
        &self,
        id: Uuid,
        from: WorkLogStatus,
        to: WorkLogStatus,
        note: Option<&str>,
    ) -> PersistenceResult<bool>;

    /// Lists the expenses attached to a work log.
    async fn list_expenses(&self, work_log_id: Uuid) -> PersistenceResult<Vec<WorkLogExpense>>;

    /// Loads a single expense.
    async fn get_expense(&self, id: Uuid) -> PersistenceResult<Option<WorkLogExpense>>;

    /// Inserts a new expense.
    async fn create_expense(&self, expense: WorkLogExpense) -> PersistenceResult<WorkLogExpense>;

    /// Conditionally moves an expense between review states.
    async fn update_expense_status(
        &self,
        id: Uuid,
        from: ExpenseStatus,
        to: ExpenseStatus,
    ) -> PersistenceResult<bool>;

    /// Loads a care team member.
    async fn get_care_team_member(&self, id: Uuid) -> PersistenceResult<Option<CareTeamMember>>;

    /// Inserts a payroll entry.
    async fn create_payroll_entry(&self, entry: PayrollEntry) -> PersistenceResult<PayrollEntry>;

    /// Loads a payroll entry.
    async fn get_payroll_entry(&self, id: Uuid) -> PersistenceResult<Option<PayrollEntry>>;

    /// Conditionally moves a payroll entry between payment states, setting
    /// the payment date when given.
    async fn update_payroll_payment_status(
        &self,
        id: Uuid,
        from: PaymentStatus,
        to: PaymentStatus,
        payment_date: Option<DateTime<Utc>>,
    ) -> PersistenceResult<bool>;

    /// Lists the payroll entries of a care plan, oldest work first.
    async fn list_payroll_entries(&self, care_plan_id: Uuid)
    -> PersistenceResult<Vec<PayrollEntry>>;
}
