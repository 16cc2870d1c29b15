//! Schema migration framework.

use crate::ProjectError;
use crate::schema::Project;

pub const LATEST_VERSION: u32 = 2;

pub fn migrate_to_latest(mut project: Project) -> Result<Project, ProjectError> {
    while project.version < LATEST_VERSION {
        project = migrate_one_version(project)?;
    }
    Ok(project)
}

fn migrate_one_version(project: Project) -> Result<Project, ProjectError> {
    match project.version {
        1 => migrate_v1_to_v2(project),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

/// Version 1 kept the three readings as flat room keys.
fn migrate_v1_to_v2(mut project: Project) -> Result<Project, ProjectError> {
    for room in &mut project.rooms {
        if let Some(r) = room.approx_tons.take() {
            room.readings.approx_tons.get_or_insert(r);
        }
        if let Some(r) = room.exact_tons.take() {
            room.readings.exact_tons.get_or_insert(r);
        }
        if let Some(r) = room.total_watts.take() {
            room.readings.total_watts.get_or_insert(r);
        }
    }

    project.version = 2;
    Ok(project)
}
