//! In-memory host adapters.
//!
//! Used by the CLI scenario runner and by tests. Each piece implements one
//! port; [`MemoryHost`] bundles them into a [`PanelHost`](crate::PanelHost).

use crate::ports::{BackupSurfaces, ConstantsProvider, SolutionSink, ThermalLoadSource};
use crate::surface::{Surface, SurfaceChange};
use rc_core::RoomId;
use rc_sizing::{BackupPolicy, DisplaySlots, LoadReading, LoadReadings, SolveOutcome};
use std::collections::BTreeMap;

/// Constants map. Entries can be published after construction to model a
/// provider that becomes ready late.
#[derive(Debug, Clone, Default)]
pub struct StaticConstants {
    values: BTreeMap<String, f64>,
}

impl StaticConstants {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.publish(name, value);
        self
    }

    pub fn publish(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }
}

impl ConstantsProvider for StaticConstants {
    fn get_constant(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

impl FromIterator<(String, f64)> for StaticConstants {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Latest published load readings per room.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLoads {
    rooms: BTreeMap<RoomId, LoadReadings>,
}

impl InMemoryLoads {
    pub fn publish(&mut self, room: RoomId, readings: LoadReadings) {
        self.rooms.insert(room, readings);
    }

    pub fn clear(&mut self, room: &RoomId) {
        self.rooms.remove(room);
    }
}

impl ThermalLoadSource for InMemoryLoads {
    fn approx_load(&self, room: &RoomId) -> Option<LoadReading> {
        self.rooms.get(room)?.approx_tons.clone()
    }

    fn exact_load(&self, room: &RoomId) -> Option<LoadReading> {
        self.rooms.get(room)?.exact_tons.clone()
    }

    fn total_watts(&self, room: &RoomId) -> Option<LoadReading> {
        self.rooms.get(room)?.total_watts.clone()
    }
}

/// Display updater: renders each outcome into the room's output slots.
#[derive(Debug, Clone, Default)]
pub struct SlotBoard {
    slots: BTreeMap<RoomId, DisplaySlots>,
    writes: u64,
}

impl SlotBoard {
    pub fn slots(&self, room: &RoomId) -> Option<&DisplaySlots> {
        self.slots.get(room)
    }

    /// Total number of writes received.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl SolutionSink for SlotBoard {
    fn write_solution(&mut self, room: &RoomId, outcome: &SolveOutcome) {
        self.slots.insert(room.clone(), DisplaySlots::render(outcome));
        self.writes += 1;
    }

    fn forget_room(&mut self, room: &RoomId) {
        self.slots.remove(room);
    }
}

#[derive(Debug, Clone, Copy)]
struct SelectState {
    value: Option<BackupPolicy>,
    notify: bool,
}

impl Default for SelectState {
    fn default() -> Self {
        Self {
            value: None,
            notify: true,
        }
    }
}

/// Backup selectors for every room, with an outbox of emitted change
/// notifications.
#[derive(Debug, Clone, Default)]
pub struct SurfaceBoard {
    selects: BTreeMap<(RoomId, Surface), SelectState>,
    outbox: Vec<SurfaceChange>,
    writes: Vec<SurfaceChange>,
}

impl SurfaceBoard {
    /// Every write received, notified or not, oldest first.
    pub fn write_log(&self) -> &[SurfaceChange] {
        &self.writes
    }

    pub fn forget_room(&mut self, room: &RoomId) {
        self.selects.retain(|(r, _), _| r != room);
        self.outbox.retain(|c| &c.room != room);
    }
}

impl BackupSurfaces for SurfaceBoard {
    fn backup_policy(&self, room: &RoomId, surface: Surface) -> Option<BackupPolicy> {
        self.selects.get(&(room.clone(), surface))?.value
    }

    fn set_backup_policy(&mut self, room: &RoomId, surface: Surface, policy: BackupPolicy) {
        let state = self.selects.entry((room.clone(), surface)).or_default();
        state.value = Some(policy);
        let change = SurfaceChange {
            room: room.clone(),
            surface,
            policy,
        };
        if state.notify {
            self.outbox.push(change.clone());
        }
        self.writes.push(change);
    }

    fn notifications_enabled(&self, room: &RoomId, surface: Surface) -> bool {
        self.selects
            .get(&(room.clone(), surface))
            .is_none_or(|s| s.notify)
    }

    fn set_notifications_enabled(&mut self, room: &RoomId, surface: Surface, enabled: bool) {
        self.selects.entry((room.clone(), surface)).or_default().notify = enabled;
    }

    fn take_changes(&mut self) -> Vec<SurfaceChange> {
        std::mem::take(&mut self.outbox)
    }
}

/// All in-memory adapters in one host.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    pub constants: StaticConstants,
    pub loads: InMemoryLoads,
    pub board: SlotBoard,
    pub surfaces: SurfaceBoard,
}

impl MemoryHost {
    pub fn new(constants: StaticConstants) -> Self {
        Self {
            constants,
            ..Self::default()
        }
    }
}

impl ConstantsProvider for MemoryHost {
    fn get_constant(&self, name: &str) -> Option<f64> {
        self.constants.get_constant(name)
    }
}

impl ThermalLoadSource for MemoryHost {
    fn approx_load(&self, room: &RoomId) -> Option<LoadReading> {
        self.loads.approx_load(room)
    }

    fn exact_load(&self, room: &RoomId) -> Option<LoadReading> {
        self.loads.exact_load(room)
    }

    fn total_watts(&self, room: &RoomId) -> Option<LoadReading> {
        self.loads.total_watts(room)
    }
}

impl SolutionSink for MemoryHost {
    fn write_solution(&mut self, room: &RoomId, outcome: &SolveOutcome) {
        self.board.write_solution(room, outcome);
    }

    fn forget_room(&mut self, room: &RoomId) {
        self.board.forget_room(room);
        self.surfaces.forget_room(room);
    }
}

impl BackupSurfaces for MemoryHost {
    fn backup_policy(&self, room: &RoomId, surface: Surface) -> Option<BackupPolicy> {
        self.surfaces.backup_policy(room, surface)
    }

    fn set_backup_policy(&mut self, room: &RoomId, surface: Surface, policy: BackupPolicy) {
        self.surfaces.set_backup_policy(room, surface, policy);
    }

    fn notifications_enabled(&self, room: &RoomId, surface: Surface) -> bool {
        self.surfaces.notifications_enabled(room, surface)
    }

    fn set_notifications_enabled(&mut self, room: &RoomId, surface: Surface, enabled: bool) {
        self.surfaces.set_notifications_enabled(room, surface, enabled);
    }

    fn take_changes(&mut self) -> Vec<SurfaceChange> {
        self.surfaces.take_changes()
    }
}
