//! Adapter traits for the host application.
//!
//! The panel never reaches for global state. Constants, load readings,
//! output slots and the two backup controls are all reached through these
//! traits, bundled as [`PanelHost`].

use crate::surface::{Surface, SurfaceChange};
use rc_core::RoomId;
use rc_sizing::{BackupPolicy, LoadReading, LoadReadings, SolveOutcome};

/// Read-only engineering constants.
pub trait ConstantsProvider {
    /// `None` while the constant has not been published.
    fn get_constant(&self, name: &str) -> Option<f64>;
}

/// Per-room thermal load readings as published upstream.
pub trait ThermalLoadSource {
    fn approx_load(&self, room: &RoomId) -> Option<LoadReading>;
    fn exact_load(&self, room: &RoomId) -> Option<LoadReading>;
    fn total_watts(&self, room: &RoomId) -> Option<LoadReading>;

    /// All three readings at once.
    fn readings(&self, room: &RoomId) -> LoadReadings {
        LoadReadings {
            approx_tons: self.approx_load(room),
            exact_tons: self.exact_load(room),
            total_watts: self.total_watts(room),
        }
    }
}

/// Receives every solve outcome. Writes are total: one call per solve.
pub trait SolutionSink {
    fn write_solution(&mut self, room: &RoomId, outcome: &SolveOutcome);

    /// Drop anything held for a removed room.
    fn forget_room(&mut self, _room: &RoomId) {}
}

/// The two independently editable backup-policy controls of a room.
pub trait BackupSurfaces {
    /// Value currently shown by a surface, `None` if it has never been set.
    fn backup_policy(&self, room: &RoomId, surface: Surface) -> Option<BackupPolicy>;

    /// Write a value. Emits a change notification unless notifications are
    /// disabled for that surface.
    fn set_backup_policy(&mut self, room: &RoomId, surface: Surface, policy: BackupPolicy);

    fn notifications_enabled(&self, room: &RoomId, surface: Surface) -> bool;

    fn set_notifications_enabled(&mut self, room: &RoomId, surface: Surface, enabled: bool);

    /// Change notifications emitted since the last call.
    fn take_changes(&mut self) -> Vec<SurfaceChange>;
}

/// Everything the panel needs from its host.
pub trait PanelHost: ConstantsProvider + ThermalLoadSource + SolutionSink + BackupSurfaces {}

impl<T> PanelHost for T where T: ConstantsProvider + ThermalLoadSource + SolutionSink + BackupSurfaces {}
