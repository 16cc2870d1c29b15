//! Capacity panel service for refcap.
//!
//! Wraps the pure sizing functions of `rc-sizing` with the stateful pieces a
//! room's capacity panel needs:
//!
//! - a bootstrap state machine that waits, with bounded retries, for the
//!   safety-factor constant and a first thermal load reading
//! - a synchronizer that keeps the backup policy identical on the capacity
//!   panel and the climatization form without notification loops
//! - a cooperative timer queue in place of wall-clock timers
//!
//! # Design Principles
//!
//! - **Injected collaborators**: constants, loads, output slots and surfaces
//!   are reached through the traits in [`ports`], never through globals
//! - **Single-threaded**: the host drives time with [`CapacityPanel::advance_by`]
//! - **Rooms are independent**: no room reads or writes another room's state

pub mod config;
pub mod error;
pub mod init;
pub mod memory;
pub mod panel;
pub mod ports;
pub mod scheduler;
pub mod state;
pub mod surface;
pub mod sync;

pub use config::PanelConfig;
pub use error::{PanelError, PanelResult};
pub use memory::{InMemoryLoads, MemoryHost, SlotBoard, StaticConstants, SurfaceBoard};
pub use panel::CapacityPanel;
pub use ports::{BackupSurfaces, ConstantsProvider, PanelHost, SolutionSink, ThermalLoadSource};
pub use scheduler::Scheduler;
pub use state::{InitPhase, LoadWait, RoomCapacityState, RoomSnapshot};
pub use surface::{MutedSurface, Surface, SurfaceChange, apply_without_notify};
