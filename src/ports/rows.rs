//! Row mappings at the persistence boundary.
//!
//! Some backends hand expense amounts back as text. They are coerced to
//! [`Decimal`] here, once, so nothing past the port sees a string amount.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{ExpenseCategory, ExpenseStatus, WorkLogExpense};

use super::PersistenceError;

/// An expense as stored by a loosely-typed backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// Expense id.
    pub id: Uuid,
    /// Owning work log id.
    pub work_log_id: Uuid,
    /// Category name, e.g. `"medical_supplies"`.
    pub category: String,
    /// Amount as text, e.g. `"12.50"`.
    pub amount: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Status name, e.g. `"pending"`.
    pub status: String,
}

fn decode_error(field: &str, message: impl Into<String>) -> PersistenceError {
    PersistenceError::Decode {
        field: field.to_string(),
        message: message.into(),
    }
}

/// Decodes a snake_case enum name with the type's own serde names.
fn parse_name<T: DeserializeOwned>(field: &str, value: &str) -> Result<T, PersistenceError> {
    serde_json::from_value(Value::String(value.trim().to_string()))
        .map_err(|e| decode_error(field, format!("'{}': {}", value, e)))
}

impl TryFrom<ExpenseRow> for WorkLogExpense {
    type Error = PersistenceError;

    fn try_from(row: ExpenseRow) -> Result<Self, Self::Error> {
        let amount = Decimal::from_str(row.amount.trim())
            .map_err(|e| decode_error("amount", format!("'{}': {}", row.amount, e)))?;

        Ok(Self {
            id: row.id,
            work_log_id: row.work_log_id,
            category: parse_name("category", &row.category)?,
            amount,
            description: row.description.unwrap_or_default(),
            status: parse_name("status", &row.status)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category: &str, amount: &str, status: &str) -> ExpenseRow {
        ExpenseRow {
            id: Uuid::new_v4(),
            work_log_id: Uuid::new_v4(),
            category: category.to_string(),
            amount: amount.to_string(),
            description: None,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_valid_row_maps_to_expense() {
        let expense = WorkLogExpense::try_from(row("medical_supplies", "19.99", "approved")).unwrap();
        assert_eq!(expense.category, ExpenseCategory::MedicalSupplies);
        assert_eq!(expense.amount, Decimal::new(1999, 2));
        assert_eq!(expense.status, ExpenseStatus::Approved);
        assert_eq!(expense.description, "");
    }

    #[test]
    fn test_names_match_serialized_enums() {
        let categories = [
            ExpenseCategory::MedicalSupplies,
            ExpenseCategory::Food,
            ExpenseCategory::Transportation,
            ExpenseCategory::Other,
        ];
        for category in categories {
            let name = serde_json::to_value(category).unwrap();
            let name = name.as_str().unwrap();
            let expense = WorkLogExpense::try_from(row(name, "1", " rejected ")).unwrap();
            assert_eq!(expense.category, category);
            assert_eq!(expense.status, ExpenseStatus::Rejected);
        }
    }

    #[test]
    fn test_non_numeric_amount_is_a_decode_error() {
        let result = WorkLogExpense::try_from(row("food", "twelve", "pending"));
        match result {
            Err(PersistenceError::Decode { field, .. }) => assert_eq!(field, "amount"),
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_category_is_a_decode_error() {
        let result = WorkLogExpense::try_from(row("lodging", "10", "pending"));
        match result {
            Err(PersistenceError::Decode { field, message }) => {
                assert_eq!(field, "category");
                assert!(message.contains("lodging"));
            }
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_status_is_a_decode_error() {
        let result = WorkLogExpense::try_from(row("other", "10", "void"));
        assert!(matches!(
            result,
            Err(PersistenceError::Decode { ref field, .. }) if field == "status"
        ));
    }
}
