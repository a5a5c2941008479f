//! Core data models for the care payroll engine.
//!
//! This module contains all the domain records exchanged with the
//! persistence port and passed through the calculator.

mod audit;
mod care_team_member;
mod expense;
mod holiday;
mod payroll_entry;
mod work_log;

pub use audit::AuditStep;
pub use care_team_member::CareTeamMember;
pub use expense::{ExpenseCategory, ExpenseStatus, NewExpense, WorkLogExpense, expense_total};
pub use holiday::Holiday;
pub use payroll_entry::{HourCategory, PaymentStatus, PayrollEntry};
pub use work_log::{NewWorkLog, ScheduledShift, WorkLog, WorkLogStatus};
