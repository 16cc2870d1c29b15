//! Project loading, saving, validation, and introspection.

use std::path::Path;

use rc_project::schema::{Project, RoomDef};

use crate::error::{AppError, AppResult};

/// Summary of a room for listing.
#[derive(Debug, Clone)]
pub struct RoomSummary {
    pub id: String,
    pub name: String,
    pub has_readings: bool,
    pub timeline_events: usize,
}

/// Load, migrate and validate a project from a YAML or JSON file.
pub fn load_project(path: &Path) -> AppResult<Project> {
    let project = rc_project::load(path)?;
    tracing::debug!(path = %path.display(), rooms = project.rooms.len(), "project loaded");
    Ok(project)
}

pub fn save_project(path: &Path, project: &Project) -> AppResult<()> {
    rc_project::save(path, project)?;
    Ok(())
}

pub fn validate_project(project: &Project) -> AppResult<()> {
    rc_project::validate_project(project).map_err(|e| AppError::Validation(e.to_string()))
}

pub fn list_rooms(project: &Project) -> Vec<RoomSummary> {
    project
        .rooms
        .iter()
        .map(|room| RoomSummary {
            id: room.id.clone(),
            name: room.name.clone(),
            has_readings: !room.readings.is_empty(),
            timeline_events: project
                .timeline
                .iter()
                .filter(|e| e.event.room() == Some(room.id.as_str()))
                .count(),
        })
        .collect()
}

pub fn get_room<'a>(project: &'a Project, room_id: &str) -> AppResult<&'a RoomDef> {
    project
        .room(room_id)
        .ok_or_else(|| AppError::RoomNotFound(room_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rc_project::schema::{TimelineEntry, TimelineEvent};

    #[test]
    fn unknown_extension_rejected() {
        let err = load_project(Path::new("scenario.toml")).unwrap_err();
        assert!(matches!(err, AppError::Project(_)));
    }

    #[test]
    fn summaries_count_room_events() {
        let mut project = Project::new("p");
        project.rooms.push(RoomDef::new("a"));
        project.rooms.push(RoomDef::new("b"));
        project.timeline.push(TimelineEntry {
            at_ms: 5,
            event: TimelineEvent::RemoveRoom { room: "b".into() },
        });

        let rooms = list_rooms(&project);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].timeline_events, 0);
        assert_eq!(rooms[1].timeline_events, 1);
        assert!(!rooms[1].has_readings);
        assert!(matches!(
            get_room(&project, "c"),
            Err(AppError::RoomNotFound(_))
        ));
    }
}
