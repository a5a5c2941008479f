//! Payroll entry model.
//!
//! A [`PayrollEntry`] is the categorised monetary result of exactly one
//! approved work log. It is created once and afterwards only its payment
//! status moves forward.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Payment state of a payroll entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created, awaiting payment approval.
    Pending,
    /// Cleared for payment.
    Approved,
    /// Paid out. Terminal.
    Paid,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Approved => write!(f, "approved"),
            PaymentStatus::Paid => write!(f, "paid"),
        }
    }
}

/// The mutually exclusive buckets worked hours are sorted into.
///
/// # Example
///
/// ```
/// use care_payroll_engine::models::HourCategory;
///
/// assert_eq!(HourCategory::Holiday.label(), "Holiday hours");
/// assert_eq!(HourCategory::ALL.len(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HourCategory {
    /// Ordinary weekday hours at the base rate.
    Regular,
    /// Weekend hours at the overtime rate.
    Overtime,
    /// Hours on a calendar holiday.
    Holiday,
    /// Training/orientation hours at the shadow-day rate.
    Shadow,
}

impl HourCategory {
    /// Every category, in receipt order.
    pub const ALL: [HourCategory; 4] = [
        HourCategory::Regular,
        HourCategory::Overtime,
        HourCategory::Holiday,
        HourCategory::Shadow,
    ];

    /// Human-readable line item label.
    pub fn label(self) -> &'static str {
        match self {
            HourCategory::Regular => "Regular hours",
            HourCategory::Overtime => "Overtime hours",
            HourCategory::Holiday => "Holiday hours",
            HourCategory::Shadow => "Shadow day hours",
        }
    }
}

/// The computed monetary result of one approved work log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollEntry {
    /// Unique identifier for the entry.
    pub id: Uuid,
    /// The approved work log this entry was computed from.
    pub work_log_id: Uuid,
    /// The care team member being paid.
    pub care_team_member_id: Uuid,
    /// The care plan the work belongs to.
    pub care_plan_id: Uuid,
    /// Start of the worked interval, copied from the work log.
    pub work_start: NaiveDateTime,
    /// End of the worked interval, copied from the work log.
    pub work_end: NaiveDateTime,
    /// Hours paid at the regular rate.
    pub regular_hours: Decimal,
    /// Hours paid at the overtime rate.
    pub overtime_hours: Decimal,
    /// Hours paid at the holiday rate.
    pub holiday_hours: Decimal,
    /// Hours paid at the shadow-day rate.
    pub shadow_hours: Decimal,
    /// Regular hourly rate.
    pub regular_rate: Decimal,
    /// Overtime hourly rate.
    pub overtime_rate: Decimal,
    /// Holiday hourly rate (zero when the work was not on a holiday).
    pub holiday_rate: Decimal,
    /// Shadow-day hourly rate (zero when the work was not a shadow day).
    pub shadow_rate: Decimal,
    /// Sum of attached expenses.
    pub expense_total: Decimal,
    /// Sum of hours × rate across categories plus expenses.
    pub total_amount: Decimal,
    /// Payment state.
    pub payment_status: PaymentStatus,
    /// Set when the entry is paid.
    #[serde(default)]
    pub payment_date: Option<DateTime<Utc>>,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl PayrollEntry {
    /// Hours recorded in a category.
    pub fn hours_for(&self, category: HourCategory) -> Decimal {
        match category {
            HourCategory::Regular => self.regular_hours,
            HourCategory::Overtime => self.overtime_hours,
            HourCategory::Holiday => self.holiday_hours,
            HourCategory::Shadow => self.shadow_hours,
        }
    }

    /// Hourly rate for a category.
    pub fn rate_for(&self, category: HourCategory) -> Decimal {
        match category {
            HourCategory::Regular => self.regular_rate,
            HourCategory::Overtime => self.overtime_rate,
            HourCategory::Holiday => self.holiday_rate,
            HourCategory::Shadow => self.shadow_rate,
        }
    }

    /// Full-precision amount earned in a category.
    pub fn amount_for(&self, category: HourCategory) -> Decimal {
        self.hours_for(category) * self.rate_for(category)
    }

    /// Hours across all categories.
    pub fn total_hours(&self) -> Decimal {
        HourCategory::ALL.iter().map(|c| self.hours_for(*c)).sum()
    }

    /// Earnings before expenses.
    pub fn labor_total(&self) -> Decimal {
        HourCategory::ALL.iter().map(|c| self.amount_for(*c)).sum()
    }

    /// Returns true once the entry has been paid.
    pub fn is_paid(&self) -> bool {
        self.payment_status == PaymentStatus::Paid
    }
}
