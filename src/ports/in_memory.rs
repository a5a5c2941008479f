//! In-memory implementation of the [`PayrollStore`] port.
//!
//! Backs tests and local development without a database. All tables live
//! behind one lock, so every conditional update is a single atomic
//! check-and-set.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    CareTeamMember, ExpenseStatus, PaymentStatus, PayrollEntry, WorkLog, WorkLogExpense,
    WorkLogStatus,
};

use super::{ExpenseRow, PayrollStore, PersistenceError, PersistenceResult};

#[derive(Debug, Default)]
struct Tables {
    work_logs: HashMap<Uuid, WorkLog>,
    // Insertion order is the listing order.
    expenses: Vec<WorkLogExpense>,
    members: HashMap<Uuid, CareTeamMember>,
    payroll_entries: HashMap<Uuid, PayrollEntry>,
}

/// A [`PayrollStore`] that keeps everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryPayrollStore {
    inner: RwLock<Tables>,
}

impl InMemoryPayrollStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a care team member, replacing any previous record.
    pub async fn put_care_team_member(&self, member: CareTeamMember) {
        let mut tables = self.inner.write().await;
        tables.members.insert(member.id, member);
    }

    /// Imports a loosely-typed expense row, coercing it at the boundary.
    pub async fn import_expense_row(&self, row: ExpenseRow) -> PersistenceResult<WorkLogExpense> {
        let expense = WorkLogExpense::try_from(row)?;
        self.create_expense(expense).await
    }

    /// Number of payroll entries recorded for a work log.
    pub async fn payroll_entry_count(&self, work_log_id: Uuid) -> usize {
        let tables = self.inner.read().await;
        tables
            .payroll_entries
            .values()
            .filter(|e| e.work_log_id == work_log_id)
            .count()
    }
}

#[async_trait]
impl PayrollStore for InMemoryPayrollStore {
    async fn get_work_log(&self, id: Uuid) -> PersistenceResult<Option<WorkLog>> {
        let tables = self.inner.read().await;
        Ok(tables.work_logs.get(&id).cloned())
    }

    async fn create_work_log(&self, work_log: WorkLog) -> PersistenceResult<WorkLog> {
        let mut tables = self.inner.write().await;
        if tables.work_logs.contains_key(&work_log.id) {
            return Err(PersistenceError::Duplicate(work_log.id));
        }
        tables.work_logs.insert(work_log.id, work_log.clone());
        Ok(work_log)
    }

    async fn update_work_log_status(
        &self,
        id: Uuid,
        from: WorkLogStatus,
        to: WorkLogStatus,
        note: Option<&str>,
    ) -> PersistenceResult<bool> {
        let mut tables = self.inner.write().await;
        match tables.work_logs.get_mut(&id) {
            Some(log) if log.status == from => {
                log.status = to;
                if let Some(note) = note {
                    log.review_note = Some(note.to_string());
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_expenses(&self, work_log_id: Uuid) -> PersistenceResult<Vec<WorkLogExpense>> {
        let tables = self.inner.read().await;
        Ok(tables
            .expenses
            .iter()
            .filter(|e| e.work_log_id == work_log_id)
            .cloned()
            .collect())
    }

    async fn get_expense(&self, id: Uuid) -> PersistenceResult<Option<WorkLogExpense>> {
        let tables = self.inner.read().await;
        Ok(tables.expenses.iter().find(|e| e.id == id).cloned())
    }

    async fn create_expense(&self, expense: WorkLogExpense) -> PersistenceResult<WorkLogExpense> {
        let mut tables = self.inner.write().await;
        if tables.expenses.iter().any(|e| e.id == expense.id) {
            return Err(PersistenceError::Duplicate(expense.id));
        }
        tables.expenses.push(expense.clone());
        Ok(expense)
    }

    async fn update_expense_status(
        &self,
        id: Uuid,
        from: ExpenseStatus,
        to: ExpenseStatus,
    ) -> PersistenceResult<bool> {
        let mut tables = self.inner.write().await;
        match tables.expenses.iter_mut().find(|e| e.id == id) {
            Some(expense) if expense.status == from => {
                expense.status = to;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn get_care_team_member(&self, id: Uuid) -> PersistenceResult<Option<CareTeamMember>> {
        let tables = self.inner.read().await;
        Ok(tables.members.get(&id).cloned())
    }

    async fn create_payroll_entry(&self, entry: PayrollEntry) -> PersistenceResult<PayrollEntry> {
        let mut tables = self.inner.write().await;
        if tables.payroll_entries.contains_key(&entry.id) {
            return Err(PersistenceError::Duplicate(entry.id));
        }
        tables.payroll_entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn get_payroll_entry(&self, id: Uuid) -> PersistenceResult<Option<PayrollEntry>> {
        let tables = self.inner.read().await;
        Ok(tables.payroll_entries.get(&id).cloned())
    }

    async fn update_payroll_payment_status(
        &self,
        id: Uuid,
        from: PaymentStatus,
        to: PaymentStatus,
        payment_date: Option<DateTime<Utc>>,
    ) -> PersistenceResult<bool> {
        let mut tables = self.inner.write().await;
        match tables.payroll_entries.get_mut(&id) {
            Some(entry) if entry.payment_status == from => {
                entry.payment_status = to;
                if payment_date.is_some() {
                    entry.payment_date = payment_date;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list_payroll_entries(
        &self,
        care_plan_id: Uuid,
    ) -> PersistenceResult<Vec<PayrollEntry>> {
        let tables = self.inner.read().await;
        let mut entries: Vec<PayrollEntry> = tables
            .payroll_entries
            .values()
            .filter(|e| e.care_plan_id == care_plan_id)
            .cloned()
            .collect();
        entries.sort_by(|a, b| a.work_start.cmp(&b.work_start).then(a.id.cmp(&b.id)));
        Ok(entries)
    }
}
