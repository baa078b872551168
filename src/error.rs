// ⚠️ Compliance errors
// One error type for the core rules and the store adapters.

use thiserror::Error;

/// Errors surfaced by compliance, banking and pooling operations
#[derive(Debug, Error)]
pub enum ComplianceError {
    /// A banking or application amount is <= 0
    #[error("Amount must be positive (got {0:.2})")]
    InvalidAmount(f64),

    /// Attempted to bank from a CB that is not a surplus
    #[error("Cannot bank: Compliance Balance is not positive ({0:.2})")]
    NotPositiveBalance(f64),

    #[error("Cannot {operation} {requested:.2}: only {available:.2} available")]
    ExceedsAvailable {
        operation: &'static str,
        requested: f64,
        available: f64,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    /// Every violated pool rule, not just the first
    #[error("Pool validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A record with the same identity already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ComplianceError {
    pub fn not_found(what: impl Into<String>) -> Self {
        ComplianceError::NotFound(what.into())
    }

    /// True for the rule violations a caller can fix by changing its request
    pub fn is_rule_violation(&self) -> bool {
        matches!(
            self,
            ComplianceError::InvalidAmount(_)
                | ComplianceError::NotPositiveBalance(_)
                | ComplianceError::ExceedsAvailable { .. }
                | ComplianceError::ValidationFailed(_)
                | ComplianceError::DivisionByZero(_)
                | ComplianceError::InvalidInput(_)
        )
    }
}

/// Result type for compliance operations
pub type Result<T> = std::result::Result<T, ComplianceError>;
