//! Error types for the care payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine surfaces to its caller.

use std::fmt;

use thiserror::Error;
use uuid::Uuid;

use crate::ports::PersistenceError;

/// The kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A recorded work interval.
    WorkLog,
    /// An expense attached to a work log.
    Expense,
    /// The computed payroll result of an approved work log.
    PayrollEntry,
    /// The caregiver who performed the work.
    CareTeamMember,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::WorkLog => write!(f, "Work log"),
            RecordKind::Expense => write!(f, "Expense"),
            RecordKind::PayrollEntry => write!(f, "Payroll entry"),
            RecordKind::CareTeamMember => write!(f, "Care team member"),
        }
    }
}

/// The main error type for the care payroll engine.
///
/// # Example
///
/// ```
/// use care_payroll_engine::error::{EngineError, RecordKind};
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// let error = EngineError::NotFound { kind: RecordKind::WorkLog, id };
/// assert_eq!(
///     error.to_string(),
///     "Work log not found: 00000000-0000-0000-0000-000000000000"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced record does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// The kind of record that was looked up.
        kind: RecordKind,
        /// The id that was not found.
        id: Uuid,
    },

    /// The record is not in the state the operation requires.
    #[error("{kind} {id} is {actual}, expected {expected}")]
    InvalidState {
        /// The kind of record.
        kind: RecordKind,
        /// The record id.
        id: Uuid,
        /// The state the operation requires.
        expected: String,
        /// The state the record is actually in.
        actual: String,
    },

    /// Work log data could not be turned into a payroll calculation.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },

    /// The persistence collaborator failed.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceError),

    /// Payroll entry creation failed and the work log could not be reverted.
    #[error(
        "Work log {work_log_id} left approved without a payroll entry: {cause}; revert failed: {rollback}"
    )]
    RollbackFailed {
        /// The work log whose approval could not be undone.
        work_log_id: Uuid,
        /// The failure that triggered the revert.
        cause: PersistenceError,
        /// The failure of the revert itself.
        rollback: PersistenceError,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The document writer could not produce output.
    #[error("Document error: {message}")]
    Document {
        /// A description of the writer failure.
        message: String,
    },
}

impl EngineError {
    /// Builds an [`EngineError::CalculationError`] from any message.
    pub fn calculation(message: impl Into<String>) -> Self {
        EngineError::CalculationError {
            message: message.into(),
        }
    }

    /// Builds an [`EngineError::InvalidState`] from status values.
    pub fn invalid_state(
        kind: RecordKind,
        id: Uuid,
        expected: impl fmt::Display,
        actual: impl fmt::Display,
    ) -> Self {
        EngineError::InvalidState {
            kind,
            id,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
