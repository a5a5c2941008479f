//! Care team member model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A caregiver whose work is logged and paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTeamMember {
    /// Unique identifier for the member.
    pub id: Uuid,
    /// Name shown on receipts.
    pub display_name: String,
    /// Standing hourly rate, if one has been agreed.
    #[serde(default)]
    pub regular_rate: Option<Decimal>,
    /// Standing overtime rate, if one has been agreed.
    #[serde(default)]
    pub overtime_rate: Option<Decimal>,
}
