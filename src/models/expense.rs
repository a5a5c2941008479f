//! Work log expense model.
//!
//! Expenses are out-of-pocket costs a caregiver attaches to a work log.
//! They carry their own review status, but the payroll calculation adds
//! every attached expense regardless of that status.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What an expense was spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Medical supplies bought for the care recipient.
    MedicalSupplies,
    /// Food and groceries.
    Food,
    /// Travel, fuel, fares.
    Transportation,
    /// Anything else.
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseCategory::MedicalSupplies => write!(f, "medical_supplies"),
            ExpenseCategory::Food => write!(f, "food"),
            ExpenseCategory::Transportation => write!(f, "transportation"),
            ExpenseCategory::Other => write!(f, "other"),
        }
    }
}

/// Review state of a single expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    /// Awaiting review.
    Pending,
    /// Accepted by a reviewer.
    Approved,
    /// Declined by a reviewer.
    Rejected,
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpenseStatus::Pending => write!(f, "pending"),
            ExpenseStatus::Approved => write!(f, "approved"),
            ExpenseStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// An expense attached to a work log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkLogExpense {
    /// Unique identifier for the expense.
    pub id: Uuid,
    /// The work log the expense belongs to.
    pub work_log_id: Uuid,
    /// Spending category.
    pub category: ExpenseCategory,
    /// Amount in currency units.
    pub amount: Decimal,
    /// What was purchased.
    pub description: String,
    /// Review state.
    pub status: ExpenseStatus,
}

/// Input for attaching a new expense to a work log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExpense {
    /// Spending category.
    pub category: ExpenseCategory,
    /// Amount in currency units.
    pub amount: Decimal,
    /// What was purchased.
    #[serde(default)]
    pub description: String,
}

impl NewExpense {
    /// Materialises a pending expense for the given work log.
    pub fn into_expense(self, work_log_id: Uuid) -> WorkLogExpense {
        WorkLogExpense {
            id: Uuid::new_v4(),
            work_log_id,
            category: self.category,
            amount: self.amount,
            description: self.description,
            status: ExpenseStatus::Pending,
        }
    }
}

/// Sums expense amounts regardless of their review status.
///
/// Returns `None` if the sum overflows.
pub fn expense_total(expenses: &[WorkLogExpense]) -> Option<Decimal> {
    expenses
        .iter()
        .try_fold(Decimal::ZERO, |total, e| total.checked_add(e.amount))
}
