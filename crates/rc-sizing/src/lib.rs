//! Refrigeration capacity sizing for a single room.
//!
//! Everything in this crate is a pure function of its inputs:
//!
//! - [`resolver`] picks the best available thermal-load reading
//! - [`solver`] turns load, safety factor, unit size and backup policy into
//!   a unit count and spare margin
//! - [`display`] formats a solve outcome into named output slots
//!
//! The stateful side (room bootstrap, two-surface backup synchronization,
//! timers) lives in `rc-panel`.

pub mod backup;
pub mod catalog;
pub mod display;
pub mod error;
pub mod resolver;
pub mod solver;

pub use backup::BackupPolicy;
pub use catalog::UnitCapacity;
pub use display::{DisplaySlots, OutputSlot, PLACEHOLDER};
pub use error::{SizingError, SizingResult};
pub use resolver::{LoadReading, LoadReadings, LoadSource, ResolvedLoad, resolve, resolve_tons};
pub use solver::{CapacitySolution, SolveInput, SolveOutcome, solve};
