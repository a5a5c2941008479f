//! Audit records for payroll calculations.
//!
//! Every rule the calculator applies to a work log is recorded as an
//! [`AuditStep`], so a reviewer can see why hours landed in a category.

use serde::{Deserialize, Serialize};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
///
/// # Example
///
/// ```
/// use care_payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "elapsed_hours".to_string(),
///     rule_name: "Elapsed Hours".to_string(),
///     input: serde_json::json!({ "start_time": "2024-07-04T08:00:00" }),
///     output: serde_json::json!({ "total_hours": "8" }),
///     reasoning: "8 hours between start and end".to_string(),
/// };
/// assert_eq!(step.rule_id, "elapsed_hours");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
