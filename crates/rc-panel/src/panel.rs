//! Capacity panel service: one entry point for every room.
//!
//! Owns the per-room state, the timer queue and the host adapters. Hosts
//! feed it edits and surface notifications and advance its clock; outcomes
//! flow out through [`SolutionSink`](crate::SolutionSink).

use crate::config::PanelConfig;
use crate::error::{PanelError, PanelResult};
use crate::init::{self, ConstantsPoll, LoadPoll, SafetySource, ScheduleOutcome};
use crate::ports::PanelHost;
use crate::scheduler::Scheduler;
use crate::state::{RoomCapacityState, RoomSnapshot};
use crate::surface::Surface;
use crate::sync::{self, SyncPlan};
use rc_core::{RoomId, parse_lenient};
use rc_sizing::{BackupPolicy, SolveOutcome, UnitCapacity, solve};
use std::collections::BTreeMap;

/// Notification rounds tolerated in one pump before the surfaces are
/// considered to be feeding back into each other.
const MAX_PUMP_ROUNDS: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
enum PanelTask {
    PollConstants(RoomId),
    PollLoad(RoomId),
    MirrorBackup(RoomId),
}

impl PanelTask {
    fn room(&self) -> &RoomId {
        match self {
            Self::PollConstants(room) | Self::PollLoad(room) | Self::MirrorBackup(room) => room,
        }
    }
}

pub struct CapacityPanel<H> {
    config: PanelConfig,
    host: H,
    rooms: BTreeMap<RoomId, RoomCapacityState>,
    scheduler: Scheduler<PanelTask>,
}

impl<H: PanelHost> CapacityPanel<H> {
    pub fn new(config: PanelConfig, host: H) -> PanelResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            host,
            rooms: BTreeMap::new(),
            scheduler: Scheduler::new(),
        })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn room(&self, room: &RoomId) -> Option<&RoomCapacityState> {
        self.rooms.get(room)
    }

    pub fn room_ids(&self) -> impl Iterator<Item = &RoomId> {
        self.rooms.keys()
    }

    pub fn snapshot(&self, room: &RoomId) -> Option<RoomSnapshot> {
        self.rooms.get(room).map(RoomCapacityState::snapshot)
    }

    pub fn snapshots(&self) -> Vec<RoomSnapshot> {
        self.rooms.values().map(RoomCapacityState::snapshot).collect()
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Start bootstrapping a room. Returns `false` if it was already
    /// scheduled or initialized.
    pub fn schedule_init(&mut self, room: &RoomId) -> bool {
        let state = room_entry(&mut self.rooms, room);
        match init::schedule(state, &self.config) {
            ScheduleOutcome::Scheduled { delay_ms } => {
                tracing::debug!(%room, delay_ms, "init scheduled");
                self.scheduler
                    .schedule_in(delay_ms, PanelTask::PollConstants(room.clone()));
                true
            }
            ScheduleOutcome::AlreadyScheduled => false,
        }
    }

    /// Discard a room and cancel its pending timers. Returns `false` for an
    /// unknown room.
    pub fn on_room_removed(&mut self, room: &RoomId) -> bool {
        let existed = self.rooms.remove(room).is_some();
        self.scheduler.retain(|task| task.room() != room);
        self.host.forget_room(room);
        if existed {
            tracing::debug!(%room, "room removed");
        }
        existed
    }

    // ---------------------------------------------------------------------
    // Parameters
    // ---------------------------------------------------------------------

    pub fn safety_factor(&self, room: &RoomId) -> Option<f64> {
        self.rooms.get(room).and_then(|s| s.safety_factor_percent)
    }

    pub fn set_safety_factor(&mut self, room: &RoomId, percent: f64) {
        room_entry(&mut self.rooms, room).safety_factor_percent = Some(percent);
        self.refresh(room);
    }

    /// Unparseable text is kept as "not a number" and sizes as 0 %.
    pub fn set_safety_factor_text(&mut self, room: &RoomId, text: &str) {
        self.set_safety_factor(room, parse_lenient(text).unwrap_or(f64::NAN));
    }

    pub fn unit_capacity(&self, room: &RoomId) -> Option<f64> {
        self.rooms.get(room).and_then(|s| s.unit_capacity)
    }

    pub fn set_unit_capacity(&mut self, room: &RoomId, tons: f64) {
        if UnitCapacity::from_tons(tons).is_err() {
            tracing::warn!(%room, tons, "unit capacity outside the catalog");
        }
        room_entry(&mut self.rooms, room).unit_capacity = Some(tons);
        self.refresh(room);
    }

    pub fn select_unit(&mut self, room: &RoomId, unit: UnitCapacity) {
        self.set_unit_capacity(room, unit.tons());
    }

    /// Unparseable text is kept as "not a number" and sizes as 1 TR.
    pub fn set_unit_capacity_text(&mut self, room: &RoomId, text: &str) {
        self.set_unit_capacity(room, parse_lenient(text).unwrap_or(f64::NAN));
    }

    pub fn estimated_load(&self, room: &RoomId) -> Option<f64> {
        self.rooms.get(room).and_then(|s| s.estimated_load)
    }

    /// `None` blanks the load and returns the room to the idle display.
    pub fn set_estimated_load(&mut self, room: &RoomId, tons: Option<f64>) {
        room_entry(&mut self.rooms, room).estimated_load = tons;
        self.refresh(room);
    }

    pub fn set_estimated_load_text(&mut self, room: &RoomId, text: &str) {
        self.set_estimated_load(room, parse_lenient(text));
    }

    // ---------------------------------------------------------------------
    // Backup policy
    // ---------------------------------------------------------------------

    /// Value shown by one surface.
    pub fn backup_policy(&self, room: &RoomId, surface: Surface) -> Option<BackupPolicy> {
        self.host.backup_policy(room, surface)
    }

    /// A user picks a policy on one surface. The surface's own change
    /// notification drives the synchronization.
    pub fn select_backup(
        &mut self,
        room: &RoomId,
        surface: Surface,
        policy: BackupPolicy,
    ) -> PanelResult<()> {
        self.host.set_backup_policy(room, surface, policy);
        self.pump()?;
        Ok(())
    }

    /// Entry point for a change notification from either surface.
    pub fn on_backup_changed(&mut self, room: &RoomId, surface: Surface, policy: BackupPolicy) {
        let state = room_entry(&mut self.rooms, room);
        match sync::on_surface_change(state, &self.config, surface, policy) {
            SyncPlan::MirrorNow { .. } => {
                sync::mirror_pending(state, &mut self.host);
                if state.phase.is_initialized() {
                    solve_state(state, &mut self.host);
                }
            }
            SyncPlan::MirrorLater { target, delay_ms } => {
                tracing::trace!(%room, %target, delay_ms, "mirror queued");
                self.scheduler
                    .schedule_in(delay_ms, PanelTask::MirrorBackup(room.clone()));
            }
            SyncPlan::AlreadyQueued => {}
        }
    }

    /// Deliver queued surface notifications until none are left.
    pub fn pump(&mut self) -> PanelResult<usize> {
        let mut handled = 0;
        for _ in 0..MAX_PUMP_ROUNDS {
            let changes = self.host.take_changes();
            if changes.is_empty() {
                return Ok(handled);
            }
            for change in changes {
                self.on_backup_changed(&change.room, change.surface, change.policy);
                handled += 1;
            }
        }
        Err(PanelError::Invariant {
            what: format!("backup surfaces still notifying after {MAX_PUMP_ROUNDS} rounds"),
        })
    }

    pub fn check_backup_consistency(&self, room: &RoomId) -> PanelResult<()> {
        let state = self.rooms.get(room).ok_or_else(|| PanelError::UnknownRoom {
            room: room.to_string(),
        })?;
        sync::check_consistency(state, &self.host)
    }

    // ---------------------------------------------------------------------
    // Solving
    // ---------------------------------------------------------------------

    /// Solve a room now, whatever its phase, and write the outcome.
    pub fn solve(&mut self, room: &RoomId) -> PanelResult<SolveOutcome> {
        let state = self
            .rooms
            .get_mut(room)
            .ok_or_else(|| PanelError::UnknownRoom {
                room: room.to_string(),
            })?;
        Ok(solve_state(state, &mut self.host))
    }

    /// Re-solve after an edit, once the room has bootstrapped.
    fn refresh(&mut self, room: &RoomId) {
        if let Some(state) = self.rooms.get_mut(room) {
            if state.phase.is_initialized() {
                solve_state(state, &mut self.host);
            } else {
                tracing::trace!(%room, phase = ?state.phase, "edit stored, room not initialized");
            }
        }
    }

    // ---------------------------------------------------------------------
    // Clock
    // ---------------------------------------------------------------------

    /// Move the clock forward, running every task that falls due.
    pub fn advance_by(&mut self, ms: u64) -> PanelResult<usize> {
        let until = self.scheduler.now_ms().saturating_add(ms);
        let mut ran = 0;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run_task(task);
            self.pump()?;
            ran += 1;
        }
        self.scheduler.advance_to(until);
        Ok(ran)
    }

    /// Run until no timer is pending. Terminates because every timer chain
    /// is bounded by an attempt budget.
    pub fn run_until_idle(&mut self) -> PanelResult<usize> {
        let mut ran = 0;
        while let Some(due) = self.scheduler.next_due() {
            let wait = due.saturating_sub(self.now_ms());
            ran += self.advance_by(wait)?;
        }
        Ok(ran)
    }

    fn run_task(&mut self, task: PanelTask) {
        let room = task.room().clone();
        let Some(state) = self.rooms.get_mut(&room) else {
            return;
        };

        match task {
            PanelTask::PollConstants(_) => {
                match init::poll_constants(state, &self.config, &self.host) {
                    ConstantsPoll::Retry { delay_ms } => {
                        tracing::debug!(%room, attempt = state.attempts, "constants not ready");
                        self.scheduler
                            .schedule_in(delay_ms, PanelTask::PollConstants(room));
                    }
                    ConstantsPoll::Seeded {
                        safety_factor_percent,
                        source,
                        delay_ms,
                    } => {
                        if source == SafetySource::Fallback {
                            tracing::warn!(
                                %room,
                                attempts = state.attempts,
                                safety_factor_percent,
                                "safety factor constant never published, using fallback"
                            );
                        }
                        sync::align_surfaces(state, &mut self.host);
                        tracing::info!(%room, safety_factor_percent, ?source, "room initialized");
                        solve_state(state, &mut self.host);
                        self.scheduler
                            .schedule_in(delay_ms, PanelTask::PollLoad(room));
                    }
                    ConstantsPoll::Stale => {}
                }
            }
            PanelTask::PollLoad(_) => match init::poll_load(state, &self.config, &self.host) {
                LoadPoll::Found { tons } => {
                    tracing::info!(%room, tons, "thermal load resolved");
                    solve_state(state, &mut self.host);
                }
                LoadPoll::Retry { delay_ms } => {
                    self.scheduler
                        .schedule_in(delay_ms, PanelTask::PollLoad(room));
                }
                LoadPoll::Exhausted => {
                    tracing::warn!(
                        %room,
                        attempts = state.load_attempts,
                        "no thermal load published, awaiting manual entry"
                    );
                }
                LoadPoll::Manual => {
                    tracing::debug!(%room, "load entered by hand, wait ended");
                }
                LoadPoll::Stale => {}
            },
            PanelTask::MirrorBackup(_) => {
                if sync::mirror_pending(state, &mut self.host).is_some()
                    && state.phase.is_initialized()
                {
                    solve_state(state, &mut self.host);
                }
            }
        }
    }
}

fn room_entry<'a>(
    rooms: &'a mut BTreeMap<RoomId, RoomCapacityState>,
    room: &RoomId,
) -> &'a mut RoomCapacityState {
    rooms
        .entry(room.clone())
        .or_insert_with(|| RoomCapacityState::new(room.clone()))
}

fn solve_state<H: PanelHost + ?Sized>(state: &mut RoomCapacityState, host: &mut H) -> SolveOutcome {
    let outcome = solve(&state.solve_input());
    host.write_solution(&state.room_id, &outcome);
    state.last_outcome = Some(outcome);
    outcome
}

impl<H> std::fmt::Debug for CapacityPanel<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapacityPanel")
            .field("now_ms", &self.scheduler.now_ms())
            .field("rooms", &self.rooms.len())
            .field("pending_tasks", &self.scheduler.len())
            .finish()
    }
}
