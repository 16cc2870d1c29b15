//! Project validation logic.

use crate::schema::{Project, RoomDef, TimelineEvent};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if let Some(panel) = &project.panel {
        panel
            .validate()
            .map_err(|err| ValidationError::InvalidValue {
                field: "panel".to_string(),
                value: format!("{panel:?}"),
                reason: err.to_string(),
            })?;
    }

    for (name, value) in &project.constants {
        if !value.is_finite() {
            return Err(ValidationError::InvalidValue {
                field: format!("constants.{name}"),
                value: value.to_string(),
                reason: "must be finite".to_string(),
            });
        }
    }

    let mut room_ids = HashSet::new();
    for room in &project.rooms {
        if !room_ids.insert(room.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: room.id.clone(),
                context: "rooms".to_string(),
            });
        }
        validate_room(room)?;
    }

    let mut last_at = 0;
    for entry in &project.timeline {
        if entry.at_ms < last_at {
            return Err(ValidationError::InvalidValue {
                field: "timeline.at_ms".to_string(),
                value: entry.at_ms.to_string(),
                reason: format!("timeline must be sorted, previous entry at {last_at}"),
            });
        }
        last_at = entry.at_ms;

        if let Some(room) = entry.event.room() {
            if !room_ids.contains(room) {
                return Err(ValidationError::MissingReference {
                    id: room.to_string(),
                    context: "timeline room".to_string(),
                });
            }
        }

        if let TimelineEvent::PublishConstant { name, value } = &entry.event {
            if !value.is_finite() {
                return Err(ValidationError::InvalidValue {
                    field: format!("timeline.publish_constant.{name}"),
                    value: value.to_string(),
                    reason: "must be finite".to_string(),
                });
            }
        }
    }

    Ok(())
}

fn validate_room(room: &RoomDef) -> Result<(), ValidationError> {
    if room.id.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "room.id".to_string(),
            value: room.id.clone(),
            reason: "must not be empty".to_string(),
        });
    }
    if room.approx_tons.is_some() || room.exact_tons.is_some() || room.total_watts.is_some() {
        return Err(ValidationError::InvalidValue {
            field: format!("rooms.{}", room.id),
            value: "flat reading key".to_string(),
            reason: "readings belong under `readings`".to_string(),
        });
    }
    if let Some(tons) = room.unit_capacity_tr {
        if !(tons.is_finite() && tons > 0.0) {
            return Err(ValidationError::InvalidValue {
                field: format!("rooms.{}.unit_capacity_tr", room.id),
                value: tons.to_string(),
                reason: "must be positive".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{RoomDef, TimelineEntry};

    fn project_with_rooms(ids: &[&str]) -> Project {
        let mut project = Project::new("p");
        project.rooms = ids.iter().map(|id| RoomDef::new(*id)).collect();
        project
    }

    #[test]
    fn duplicate_room_ids_rejected() {
        let project = project_with_rooms(&["a", "a"]);
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn timeline_must_reference_known_rooms() {
        let mut project = project_with_rooms(&["a"]);
        project.timeline.push(TimelineEntry {
            at_ms: 10,
            event: TimelineEvent::RemoveRoom { room: "b".into() },
        });
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::MissingReference { .. })
        ));
    }

    #[test]
    fn timeline_must_be_sorted() {
        let mut project = project_with_rooms(&["a"]);
        for at_ms in [20, 10] {
            project.timeline.push(TimelineEntry {
                at_ms,
                event: TimelineEvent::PublishConstant {
                    name: "X".into(),
                    value: 1.0,
                },
            });
        }
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn bad_unit_capacity_rejected() {
        let mut project = project_with_rooms(&["a"]);
        project.rooms[0].unit_capacity_tr = Some(0.0);
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn flat_readings_rejected_after_migration() {
        let mut project = project_with_rooms(&["a"]);
        project.rooms[0].exact_tons = Some(rc_sizing::LoadReading::Value(1.0));
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn invalid_panel_config_rejected() {
        let mut project = project_with_rooms(&["a"]);
        project.panel = Some(rc_panel::PanelConfig {
            max_attempts: 0,
            ..rc_panel::PanelConfig::default()
        });
        assert!(validate_project(&project).is_err());
    }

    #[test]
    fn future_version_rejected() {
        let mut project = Project::new("p");
        project.version = 99;
        assert!(matches!(
            validate_project(&project),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }
}
