//! Error types for sizing inputs.

use thiserror::Error;

/// Result type for sizing operations.
pub type SizingResult<T> = Result<T, SizingError>;

/// Errors raised when parsing user-facing sizing selections.
///
/// The solver itself never fails: bad numbers fall back to defaults or to
/// the idle outcome.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SizingError {
    #[error("Unknown backup policy: {text}")]
    UnknownPolicy { text: String },

    #[error("Unit capacity {tons} TR is not in the catalog")]
    UnknownUnit { tons: f64 },
}
