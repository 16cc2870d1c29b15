//! Room initialization state machine.
//!
//! ```text
//! Unscheduled -> Scheduled -> Polling(1..N) -> Initialized
//! ```
//!
//! Each poll looks for the safety-factor constant. Once it is published, or
//! the attempt budget is spent, defaults are seeded and the room is
//! initialized. A second bounded wait then looks for a positive thermal load.
//! Running out of either budget is not an error: the room falls back to the
//! configured safety factor, or stays blank until a load is typed in.
//! Values typed in before seeding are kept.
//!
//! The functions here only mutate room state and report what should happen
//! next; the panel owns timers and solving.

use crate::config::PanelConfig;
use crate::ports::{ConstantsProvider, ThermalLoadSource};
use crate::state::{InitPhase, LoadWait, RoomCapacityState};
use rc_sizing::resolve;

/// Outcome of `schedule_init` for one room.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// First poll should run after `delay_ms`.
    Scheduled { delay_ms: u64 },
    /// Already scheduled or initialized.
    AlreadyScheduled,
}

/// Where the safety factor in effect after seeding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetySource {
    Constant,
    Fallback,
    /// Typed in before the room was seeded.
    Entered,
}

/// Outcome of one constants poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantsPoll {
    /// Constant missing, poll again after `delay_ms`.
    Retry { delay_ms: u64 },
    /// Defaults seeded; start waiting for a load after `delay_ms`.
    Seeded {
        safety_factor_percent: f64,
        source: SafetySource,
        delay_ms: u64,
    },
    /// Poll arrived for a room that is not polling.
    Stale,
}

/// Outcome of one load poll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadPoll {
    /// Positive load written into the room; solve now.
    Found { tons: f64 },
    Retry { delay_ms: u64 },
    /// Budget spent, room stays blank.
    Exhausted,
    /// A load was entered by hand meanwhile; stop waiting.
    Manual,
    Stale,
}

pub fn schedule(state: &mut RoomCapacityState, config: &PanelConfig) -> ScheduleOutcome {
    if state.phase != InitPhase::Unscheduled {
        return ScheduleOutcome::AlreadyScheduled;
    }
    state.phase = InitPhase::Scheduled;
    ScheduleOutcome::Scheduled {
        delay_ms: config.init_delay_ms,
    }
}

pub fn poll_constants<C: ConstantsProvider + ?Sized>(
    state: &mut RoomCapacityState,
    config: &PanelConfig,
    constants: &C,
) -> ConstantsPoll {
    if !matches!(state.phase, InitPhase::Scheduled | InitPhase::Polling { .. }) {
        return ConstantsPoll::Stale;
    }

    state.attempts += 1;
    let published = constants
        .get_constant(&config.safety_factor_constant)
        .filter(|v| v.is_finite());

    if published.is_none() && state.attempts < config.max_attempts {
        state.phase = InitPhase::Polling {
            attempt: state.attempts,
        };
        return ConstantsPoll::Retry {
            delay_ms: config.poll_interval_ms,
        };
    }

    let (safety, source) = match (state.safety_factor_percent, published) {
        (Some(entered), _) => (entered, SafetySource::Entered),
        (None, Some(constant)) => (constant, SafetySource::Constant),
        (None, None) => (config.fallback_safety_factor_percent, SafetySource::Fallback),
    };
    state.safety_factor_percent = Some(safety);
    if state.unit_capacity.is_none() {
        state.unit_capacity = Some(config.default_unit_capacity_tr);
    }
    state.phase = InitPhase::Initialized;
    state.load_wait = LoadWait::Waiting;

    ConstantsPoll::Seeded {
        safety_factor_percent: safety,
        source,
        delay_ms: config.load_poll_delay_ms,
    }
}

pub fn poll_load<L: ThermalLoadSource + ?Sized>(
    state: &mut RoomCapacityState,
    config: &PanelConfig,
    loads: &L,
) -> LoadPoll {
    if !state.phase.is_initialized() || state.load_wait != LoadWait::Waiting {
        return LoadPoll::Stale;
    }
    if state.estimated_load.is_some_and(|v| v > 0.0) {
        state.load_wait = LoadWait::Manual;
        return LoadPoll::Manual;
    }

    state.load_attempts += 1;
    if let Some(resolved) = resolve(&loads.readings(&state.room_id)) {
        state.estimated_load = Some(resolved.tons);
        state.load_wait = LoadWait::Resolved;
        return LoadPoll::Found {
            tons: resolved.tons,
        };
    }

    if state.load_attempts >= config.load_attempt_budget() {
        state.load_wait = LoadWait::Exhausted;
        return LoadPoll::Exhausted;
    }
    LoadPoll::Retry {
        delay_ms: config.load_poll_delay_ms,
    }
}
