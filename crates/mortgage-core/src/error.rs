use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which schedule an indexed lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleKind {
    Monthly,
    Yearly,
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::Monthly => write!(f, "monthly"),
            ScheduleKind::Yearly => write!(f, "yearly"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MortgageError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Index out of range: {schedule} row {index} requested, schedule has {len} rows")]
    IndexOutOfRange {
        schedule: ScheduleKind,
        index: usize,
        len: usize,
    },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Calculation error: {0}")]
    CalculationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MortgageError {
    fn from(e: serde_json::Error) -> Self {
        MortgageError::SerializationError(e.to_string())
    }
}
