//! Work log model and related types.
//!
//! A [`WorkLog`] is one recorded interval of caregiving work. It starts out
//! pending and is decided exactly once, either approved (which produces a
//! payroll entry) or rejected.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a work log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkLogStatus {
    /// Recorded and awaiting a decision.
    Pending,
    /// Approved; a payroll entry exists for it.
    Approved,
    /// Rejected; never paid.
    Rejected,
}

impl WorkLogStatus {
    /// Returns true once the log has been approved or rejected.
    pub fn is_decided(self) -> bool {
        self != WorkLogStatus::Pending
    }
}

impl fmt::Display for WorkLogStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkLogStatus::Pending => write!(f, "pending"),
            WorkLogStatus::Approved => write!(f, "approved"),
            WorkLogStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A recorded interval of caregiving work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkLog {
    /// Unique identifier for the work log.
    pub id: Uuid,
    /// The care team member who did the work.
    pub care_team_member_id: Uuid,
    /// The care plan (engagement) the work belongs to.
    pub care_plan_id: Uuid,
    /// The scheduled shift this log was derived from, if any.
    #[serde(default)]
    pub shift_id: Option<Uuid>,
    /// Start of the worked interval (caregiver wall-clock time).
    pub start_time: NaiveDateTime,
    /// End of the worked interval (caregiver wall-clock time).
    pub end_time: NaiveDateTime,
    /// Optional override of the member's standing hourly rate.
    #[serde(default)]
    pub base_rate: Option<Decimal>,
    /// Rate multiplier; `0.5` marks a shadow day.
    pub rate_multiplier: Decimal,
    /// Current lifecycle state.
    pub status: WorkLogStatus,
    /// Free-text notes entered with the log.
    #[serde(default)]
    pub notes: Option<String>,
    /// Reviewer note recorded when the log was decided.
    #[serde(default)]
    pub review_note: Option<String>,
    /// When the log was recorded.
    pub created_at: DateTime<Utc>,
}

impl WorkLog {
    /// Elapsed wall-clock hours between start and end, floored at zero.
    ///
    /// No break deduction is applied.
    ///
    /// # Examples
    ///
    /// ```
    /// use care_payroll_engine::models::{NewWorkLog, WorkLog};
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let log = NewWorkLog {
    ///     care_team_member_id: Uuid::new_v4(),
    ///     care_plan_id: Uuid::new_v4(),
    ///     shift_id: None,
    ///     start_time: NaiveDateTime::parse_from_str("2024-07-04 08:00:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     end_time: NaiveDateTime::parse_from_str("2024-07-04 16:30:00", "%Y-%m-%d %H:%M:%S").unwrap(),
    ///     base_rate: None,
    ///     rate_multiplier: Decimal::ONE,
    ///     notes: None,
    /// }
    /// .into_work_log();
    /// assert_eq!(log.elapsed_hours(), Decimal::new(85, 1));
    /// ```
    pub fn elapsed_hours(&self) -> Decimal {
        let millis = (self.end_time - self.start_time).num_milliseconds();
        if millis <= 0 {
            return Decimal::ZERO;
        }
        Decimal::from(millis) / Decimal::from(3_600_000)
    }

    /// The calendar date the work is attributed to (the start date).
    pub fn work_date(&self) -> NaiveDate {
        self.start_time.date()
    }
}

/// Input for recording a new work log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkLog {
    /// The care team member who did the work.
    pub care_team_member_id: Uuid,
    /// The care plan the work belongs to.
    pub care_plan_id: Uuid,
    /// The originating scheduled shift, if any.
    #[serde(default)]
    pub shift_id: Option<Uuid>,
    /// Start of the worked interval.
    pub start_time: NaiveDateTime,
    /// End of the worked interval.
    pub end_time: NaiveDateTime,
    /// Optional hourly rate override.
    #[serde(default)]
    pub base_rate: Option<Decimal>,
    /// Rate multiplier (defaults to 1.0).
    #[serde(default = "default_rate_multiplier")]
    pub rate_multiplier: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_rate_multiplier() -> Decimal {
    Decimal::ONE
}

impl NewWorkLog {
    /// Derives a work log input from a scheduled shift, covering its full
    /// scheduled interval at the standard multiplier.
    pub fn from_shift(shift: &ScheduledShift) -> Self {
        Self {
            care_team_member_id: shift.care_team_member_id,
            care_plan_id: shift.care_plan_id,
            shift_id: Some(shift.id),
            start_time: shift.start_time,
            end_time: shift.end_time,
            base_rate: None,
            rate_multiplier: Decimal::ONE,
            notes: None,
        }
    }

    /// Materialises a pending [`WorkLog`] with a fresh id.
    pub fn into_work_log(self) -> WorkLog {
        WorkLog {
            id: Uuid::new_v4(),
            care_team_member_id: self.care_team_member_id,
            care_plan_id: self.care_plan_id,
            shift_id: self.shift_id,
            start_time: self.start_time,
            end_time: self.end_time,
            base_rate: self.base_rate,
            rate_multiplier: self.rate_multiplier,
            status: WorkLogStatus::Pending,
            notes: self.notes,
            review_note: None,
            created_at: Utc::now(),
        }
    }
}

/// A shift on the care plan schedule that work can be logged against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledShift {
    /// Unique identifier for the shift.
    pub id: Uuid,
    /// The care team member assigned to the shift.
    pub care_team_member_id: Uuid,
    /// The care plan the shift belongs to.
    pub care_plan_id: Uuid,
    /// Scheduled start.
    pub start_time: NaiveDateTime,
    /// Scheduled end.
    pub end_time: NaiveDateTime,
}
