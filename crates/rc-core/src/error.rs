//! Errors raised by the numeric guards in [`crate::numeric`].

use thiserror::Error;

pub type RcResult<T> = Result<T, RcError>;

/// A configured quantity failed a range check.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RcError {
    #[error("{what} must be a finite number, got {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must not be negative, got {value}")]
    Negative { what: &'static str, value: f64 },

    #[error("{what} must be greater than zero, got {value}")]
    NotPositive { what: &'static str, value: f64 },
}
