//! Error types for scenario validation and assumption loading

use thiserror::Error;

/// Errors surfaced by the bridge engine
///
/// Calculation itself never fails once a request has been validated:
/// out-of-table ages and a breakeven search without a crossing are handled
/// by policy (qx = 1.0 and a sentinel age), not by error.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Assumption load error: {0}")]
    AssumptionLoad(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl BridgeError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        BridgeError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending request field, if this is a validation error
    pub fn field(&self) -> Option<&str> {
        match self {
            BridgeError::InvalidInput { field, .. } => Some(field),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
