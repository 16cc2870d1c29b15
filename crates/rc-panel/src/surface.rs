//! The two backup-policy surfaces and the apply-without-notify primitive.

use crate::ports::BackupSurfaces;
use rc_core::RoomId;
use rc_sizing::BackupPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a backup-policy control lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    /// Selector inside the capacity panel.
    CapacityPanel,
    /// Selector inside the room's climatization form.
    ClimatizationForm,
}

impl Surface {
    pub const BOTH: [Surface; 2] = [Self::CapacityPanel, Self::ClimatizationForm];

    pub fn sibling(self) -> Self {
        match self {
            Self::CapacityPanel => Self::ClimatizationForm,
            Self::ClimatizationForm => Self::CapacityPanel,
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityPanel => f.write_str("capacity_panel"),
            Self::ClimatizationForm => f.write_str("climatization_form"),
        }
    }
}

/// A change notification emitted by one surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceChange {
    pub room: RoomId,
    pub surface: Surface,
    pub policy: BackupPolicy,
}

/// Notifications for one surface stay off for the guard's lifetime.
///
/// The previous setting comes back on drop, including during unwinding.
pub struct MutedSurface<'a, S: BackupSurfaces + ?Sized> {
    surfaces: &'a mut S,
    room: &'a RoomId,
    surface: Surface,
    was_enabled: bool,
}

impl<'a, S: BackupSurfaces + ?Sized> MutedSurface<'a, S> {
    pub fn new(surfaces: &'a mut S, room: &'a RoomId, surface: Surface) -> Self {
        let was_enabled = surfaces.notifications_enabled(room, surface);
        surfaces.set_notifications_enabled(room, surface, false);
        Self {
            surfaces,
            room,
            surface,
            was_enabled,
        }
    }

    pub fn set(&mut self, policy: BackupPolicy) {
        self.surfaces
            .set_backup_policy(self.room, self.surface, policy);
    }
}

impl<S: BackupSurfaces + ?Sized> Drop for MutedSurface<'_, S> {
    fn drop(&mut self) {
        self.surfaces
            .set_notifications_enabled(self.room, self.surface, self.was_enabled);
    }
}

/// Write `policy` to one surface without it emitting a change notification.
pub fn apply_without_notify<S: BackupSurfaces + ?Sized>(
    surfaces: &mut S,
    room: &RoomId,
    surface: Surface,
    policy: BackupPolicy,
) {
    let mut muted = MutedSurface::new(surfaces, room, surface);
    muted.set(policy);
}
