//! rc-core: stable foundation for refcap.
//!
//! Contains:
//! - units (uom power type + refrigeration-ton conversion)
//! - numeric (Real + tolerances + lenient parsing of external readings)
//! - ids (room identifiers)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{RcError, RcResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
