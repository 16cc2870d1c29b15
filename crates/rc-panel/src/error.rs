//! Error types for the capacity panel service.

use thiserror::Error;

/// Result type for panel operations.
pub type PanelResult<T> = Result<T, PanelError>;

/// Errors surfaced by the panel.
///
/// Missing constants, missing loads and unparseable user entries are not
/// errors; they default or leave the room idle. What remains is adapter
/// misuse and broken invariants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PanelError {
    #[error("Invalid panel configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("Unknown room: {room}")]
    UnknownRoom { room: String },

    #[error("Invariant violated: {what}")]
    Invariant { what: String },

    #[error(transparent)]
    Core(#[from] rc_core::RcError),
}
