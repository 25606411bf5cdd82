//! Error types for circuit-ledger.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    #[error("invalid component value {0}: must be a positive number")]
    InvalidValue(f64),

    #[error("invalid analysis frequency {0} Hz: must be a positive number")]
    InvalidFrequency(f64),

    #[error("invalid value expression {text:?}: {reason}")]
    InvalidExpression { text: String, reason: String },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
