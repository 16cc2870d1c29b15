//! Backup-policy synchronization between the capacity panel and the
//! climatization form.
//!
//! A change on either surface updates the room state, then the new value is
//! mirrored onto the sibling surface with its notifications muted, so the
//! mirror write cannot bounce back as a fresh change.

use crate::config::PanelConfig;
use crate::error::{PanelError, PanelResult};
use crate::ports::BackupSurfaces;
use crate::state::RoomCapacityState;
use crate::surface::{Surface, apply_without_notify};
use rc_sizing::BackupPolicy;

/// What to do after a surface reported a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPlan {
    /// Mirror onto `target` right away.
    MirrorNow { target: Surface },
    /// Queue a mirror onto `target` after `delay_ms`.
    MirrorLater { target: Surface, delay_ms: u64 },
    /// A mirror is already queued; it will carry the latest value.
    AlreadyQueued,
}

/// Record a change reported by `surface`.
pub fn on_surface_change(
    state: &mut RoomCapacityState,
    config: &PanelConfig,
    surface: Surface,
    policy: BackupPolicy,
) -> SyncPlan {
    if state.backup_policy != policy {
        tracing::debug!(
            room = %state.room_id,
            %surface,
            from = %state.backup_policy,
            to = %policy,
            "backup policy changed"
        );
        state.backup_policy = policy;
    }

    let target = surface.sibling();
    let was_queued = state.pending_sync.replace(target).is_some();
    if config.sync_debounce_ms == 0 {
        SyncPlan::MirrorNow { target }
    } else if was_queued {
        SyncPlan::AlreadyQueued
    } else {
        SyncPlan::MirrorLater {
            target,
            delay_ms: config.sync_debounce_ms,
        }
    }
}

/// Write the room's current policy onto the surface waiting for it.
///
/// Returns the surface written, `None` if nothing was pending.
pub fn mirror_pending<S: BackupSurfaces + ?Sized>(
    state: &mut RoomCapacityState,
    surfaces: &mut S,
) -> Option<Surface> {
    let target = state.pending_sync.take()?;
    let policy = state.backup_policy;
    if surfaces.backup_policy(&state.room_id, target) != Some(policy) {
        apply_without_notify(surfaces, &state.room_id, target, policy);
    }
    Some(target)
}

/// Bring both surfaces in line when a room is seeded.
///
/// A value already shown by the capacity panel wins, then one shown by the
/// climatization form, then the room's current policy.
pub fn align_surfaces<S: BackupSurfaces + ?Sized>(state: &mut RoomCapacityState, surfaces: &mut S) {
    let shown = Surface::BOTH
        .into_iter()
        .find_map(|surface| surfaces.backup_policy(&state.room_id, surface));
    if let Some(policy) = shown {
        state.backup_policy = policy;
    }
    state.pending_sync = None;
    for surface in Surface::BOTH {
        if surfaces.backup_policy(&state.room_id, surface) != Some(state.backup_policy) {
            apply_without_notify(surfaces, &state.room_id, surface, state.backup_policy);
        }
    }
}

/// Check that both surfaces agree with the room. A room with a mirror still
/// queued has not settled and passes.
pub fn check_consistency<S: BackupSurfaces + ?Sized>(
    state: &RoomCapacityState,
    surfaces: &S,
) -> PanelResult<()> {
    if state.pending_sync.is_some() {
        return Ok(());
    }
    let panel = surfaces.backup_policy(&state.room_id, Surface::CapacityPanel);
    let form = surfaces.backup_policy(&state.room_id, Surface::ClimatizationForm);
    match (panel, form) {
        (None, None) => Ok(()),
        (Some(a), Some(b)) if a == b && a == state.backup_policy => Ok(()),
        _ => Err(PanelError::Invariant {
            what: format!(
                "backup surfaces disagree for room {}: panel={:?} form={:?} state={}",
                state.room_id, panel, form, state.backup_policy
            ),
        }),
    }
}
