//! Scenario replay.
//!
//! A project's timeline is replayed against a [`CapacityPanel`] backed by
//! the in-memory host. Events fire in file order at their scheduled time;
//! panel timers due in between run first.

use std::path::Path;

use rc_core::RoomId;
use rc_panel::{CapacityPanel, MemoryHost, RoomSnapshot, StaticConstants, Surface};
use rc_project::schema::{FieldEntry, Project, RoomDef, TimelineEvent};
use serde::Serialize;

use crate::error::AppResult;
use crate::project_service;

/// Options for replaying a scenario.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop the clock here. `None` runs until no timer is pending.
    pub until_ms: Option<u64>,
    pub max_attempts: Option<u32>,
    pub sync_debounce_ms: Option<u64>,
}

/// End state of a replay.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub project: String,
    pub ended_at_ms: u64,
    pub events_applied: usize,
    pub rooms: Vec<RoomSnapshot>,
    /// One line per room whose surfaces disagree at the end.
    pub inconsistencies: Vec<String>,
}

pub fn run_project_file(path: &Path, options: &RunOptions) -> AppResult<RunReport> {
    let project = project_service::load_project(path)?;
    run_project(&project, options)
}

pub fn run_project(project: &Project, options: &RunOptions) -> AppResult<RunReport> {
    let mut config = project.panel_config();
    if let Some(max_attempts) = options.max_attempts {
        config.max_attempts = max_attempts;
    }
    if let Some(debounce) = options.sync_debounce_ms {
        config.sync_debounce_ms = debounce;
    }

    let constants: StaticConstants = project
        .constants
        .iter()
        .map(|(name, value)| (name.clone(), *value))
        .collect();
    let mut host = MemoryHost::new(constants);
    for room in &project.rooms {
        let id = RoomId::new(room.id.as_str());
        if !room.readings.is_empty() {
            host.loads.publish(id.clone(), room.readings.clone());
        }
        if let Some(policy) = room.backup {
            rc_panel::apply_without_notify(&mut host, &id, Surface::CapacityPanel, policy);
        }
    }

    let mut panel = CapacityPanel::new(config, host)?;
    for room in &project.rooms {
        seed_room(&mut panel, room);
    }

    tracing::info!(
        project = %project.name,
        rooms = project.rooms.len(),
        events = project.timeline.len(),
        "replay started"
    );

    let mut events_applied = 0;
    for entry in &project.timeline {
        if options.until_ms.is_some_and(|until| entry.at_ms > until) {
            break;
        }
        let wait = entry.at_ms.saturating_sub(panel.now_ms());
        panel.advance_by(wait)?;
        apply_event(&mut panel, &entry.event)?;
        events_applied += 1;
    }

    match options.until_ms {
        Some(until) => {
            let wait = until.saturating_sub(panel.now_ms());
            panel.advance_by(wait)?;
        }
        None => {
            panel.run_until_idle()?;
        }
    }

    let room_ids: Vec<RoomId> = panel.room_ids().cloned().collect();
    let mut inconsistencies = Vec::new();
    for room in &room_ids {
        if let Err(err) = panel.check_backup_consistency(room) {
            tracing::warn!(%room, %err, "backup surfaces disagree");
            inconsistencies.push(format!("{room}: {err}"));
        }
    }

    tracing::info!(ended_at_ms = panel.now_ms(), events_applied, "replay finished");

    Ok(RunReport {
        project: project.name.clone(),
        ended_at_ms: panel.now_ms(),
        events_applied,
        rooms: panel.snapshots(),
        inconsistencies,
    })
}

fn seed_room(panel: &mut CapacityPanel<MemoryHost>, room: &RoomDef) {
    let id = RoomId::new(room.id.as_str());
    if let Some(tons) = room.unit_capacity_tr {
        panel.set_unit_capacity(&id, tons);
    }
    if let Some(load) = &room.estimated_load {
        set_estimated_load(panel, &id, load);
    }
    panel.schedule_init(&id);
}

fn set_estimated_load(panel: &mut CapacityPanel<MemoryHost>, room: &RoomId, value: &FieldEntry) {
    match value {
        FieldEntry::Number(tons) => panel.set_estimated_load(room, Some(*tons)),
        FieldEntry::Text(text) => panel.set_estimated_load_text(room, text),
    }
}

fn apply_event(panel: &mut CapacityPanel<MemoryHost>, event: &TimelineEvent) -> AppResult<()> {
    tracing::debug!(at_ms = panel.now_ms(), ?event, "timeline event");
    match event {
        TimelineEvent::PublishConstant { name, value } => {
            panel.host_mut().constants.publish(name.clone(), *value);
        }
        TimelineEvent::PublishLoad { room, readings } => {
            panel
                .host_mut()
                .loads
                .publish(RoomId::new(room.as_str()), readings.clone());
        }
        TimelineEvent::SetSafetyFactor { room, value } => {
            let id = RoomId::new(room.as_str());
            match value {
                FieldEntry::Number(percent) => panel.set_safety_factor(&id, *percent),
                FieldEntry::Text(text) => panel.set_safety_factor_text(&id, text),
            }
        }
        TimelineEvent::SetUnitCapacity { room, value } => {
            let id = RoomId::new(room.as_str());
            match value {
                FieldEntry::Number(tons) => panel.set_unit_capacity(&id, *tons),
                FieldEntry::Text(text) => panel.set_unit_capacity_text(&id, text),
            }
        }
        TimelineEvent::SetEstimatedLoad { room, value } => {
            set_estimated_load(panel, &RoomId::new(room.as_str()), value);
        }
        TimelineEvent::SetBackup {
            room,
            surface,
            policy,
        } => {
            panel.select_backup(&RoomId::new(room.as_str()), *surface, *policy)?;
        }
        TimelineEvent::RemoveRoom { room } => {
            let id = RoomId::new(room.as_str());
            panel.on_room_removed(&id);
            panel.host_mut().loads.clear(&id);
        }
    }
    Ok(())
}
