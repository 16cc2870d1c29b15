//! Per-room capacity state.

use crate::surface::Surface;
use rc_core::RoomId;
use rc_sizing::{BackupPolicy, DisplaySlots, SolveInput, SolveOutcome};
use serde::{Deserialize, Serialize};

/// Bootstrap phase of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InitPhase {
    Unscheduled,
    /// Waiting out the initial delay.
    Scheduled,
    /// Constants poll `attempt` ran and found nothing; the next one is queued.
    Polling { attempt: u32 },
    Initialized,
}

impl InitPhase {
    pub fn is_initialized(self) -> bool {
        matches!(self, Self::Initialized)
    }
}

/// Progress of the post-seed wait for a thermal load reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadWait {
    #[default]
    NotStarted,
    Waiting,
    /// A positive load was read from the source.
    Resolved,
    /// A load was entered by hand before the source produced one.
    Manual,
    /// Budget spent without a reading; the room waits for manual entry.
    Exhausted,
}

/// Everything the panel keeps for one room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomCapacityState {
    pub room_id: RoomId,
    pub phase: InitPhase,
    /// Constants polls made so far.
    pub attempts: u32,
    /// Load polls made so far.
    pub load_attempts: u32,
    pub load_wait: LoadWait,
    /// Safety factor in percent; `None` until seeded or entered.
    pub safety_factor_percent: Option<f64>,
    /// Selected unit size in TR; `None` until seeded or selected.
    pub unit_capacity: Option<f64>,
    pub backup_policy: BackupPolicy,
    /// Estimated load in TR; `None` while blank.
    pub estimated_load: Option<f64>,
    /// Sibling surface waiting for a debounced mirror write.
    pub pending_sync: Option<Surface>,
    pub last_outcome: Option<SolveOutcome>,
}

impl RoomCapacityState {
    pub fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            phase: InitPhase::Unscheduled,
            attempts: 0,
            load_attempts: 0,
            load_wait: LoadWait::NotStarted,
            safety_factor_percent: None,
            unit_capacity: None,
            backup_policy: BackupPolicy::default(),
            estimated_load: None,
            pending_sync: None,
            last_outcome: None,
        }
    }

    /// Solver input read fresh from the current state.
    pub fn solve_input(&self) -> SolveInput {
        SolveInput {
            estimated_load: self.estimated_load,
            safety_factor_percent: self.safety_factor_percent.unwrap_or(f64::NAN),
            unit_capacity: self.unit_capacity.unwrap_or(f64::NAN),
            backup_policy: self.backup_policy,
        }
    }

    pub fn snapshot(&self) -> RoomSnapshot {
        let outcome = self.last_outcome;
        RoomSnapshot {
            room_id: self.room_id.clone(),
            phase: self.phase,
            attempts: self.attempts,
            load_attempts: self.load_attempts,
            load_wait: self.load_wait,
            safety_factor_percent: self.safety_factor_percent,
            unit_capacity: self.unit_capacity,
            backup_policy: self.backup_policy,
            estimated_load: self.estimated_load,
            slots: outcome.as_ref().map(DisplaySlots::render).unwrap_or_default(),
            outcome,
        }
    }
}

/// Serializable view of a room for reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub room_id: RoomId,
    pub phase: InitPhase,
    pub attempts: u32,
    pub load_attempts: u32,
    pub load_wait: LoadWait,
    pub safety_factor_percent: Option<f64>,
    pub unit_capacity: Option<f64>,
    pub backup_policy: BackupPolicy,
    pub estimated_load: Option<f64>,
    pub outcome: Option<SolveOutcome>,
    pub slots: DisplaySlots,
}
