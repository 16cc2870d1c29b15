use rc_panel::Surface;
use rc_project::*;
use rc_sizing::{BackupPolicy, LoadReading, LoadReadings};

fn sample_project() -> Project {
    let mut project = Project::new("Office block");
    project
        .constants
        .insert("DEFAULT_SAFETY_FACTOR_PERCENT".to_string(), 10.0);

    let mut server = RoomDef::new("server");
    server.name = "Server room".to_string();
    server.readings.approx_tons = Some(LoadReading::Value(9.3));
    server.unit_capacity_tr = Some(5.0);
    server.backup = Some(BackupPolicy::NPlus1);
    project.rooms.push(server);

    let mut lobby = RoomDef::new("lobby");
    lobby.estimated_load = Some(FieldEntry::Text("2,5".to_string()));
    project.rooms.push(lobby);

    project.timeline = vec![
        TimelineEntry {
            at_ms: 400,
            event: TimelineEvent::PublishLoad {
                room: "lobby".into(),
                readings: LoadReadings {
                    total_watts: Some(LoadReading::Value(7034.0)),
                    ..LoadReadings::default()
                },
            },
        },
        TimelineEntry {
            at_ms: 900,
            event: TimelineEvent::SetBackup {
                room: "server".into(),
                surface: Surface::ClimatizationForm,
                policy: BackupPolicy::NPlus2,
            },
        },
    ];
    project
}

#[test]
fn yaml_roundtrip() {
    let project = sample_project();
    let path = std::env::temp_dir().join("rc_project_roundtrip.yaml");

    save_yaml(&path, &project).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(project, loaded);

    std::fs::remove_file(&path).ok();
}

#[test]
fn json_roundtrip() {
    let project = sample_project();
    let path = std::env::temp_dir().join("rc_project_roundtrip.json");

    save_json(&path, &project).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(project, loaded);

    std::fs::remove_file(&path).ok();
}

#[test]
fn timeline_yaml_layout() {
    let yaml = r#"
version: 2
name: Late constants
rooms:
  - id: r1
    readings:
      exact_tons: "4,0"
timeline:
  - at_ms: 250
    type: publish_constant
    name: DEFAULT_SAFETY_FACTOR_PERCENT
    value: 15
  - at_ms: 300
    type: set_backup
    room: r1
    surface: capacity_panel
    policy: N+1
  - at_ms: 300
    type: set_safety_factor
    room: r1
    value: "12.5"
"#;
    let project = from_yaml_str(yaml).unwrap();
    assert_eq!(project.timeline.len(), 3);
    assert_eq!(
        project.timeline[0].event,
        TimelineEvent::PublishConstant {
            name: "DEFAULT_SAFETY_FACTOR_PERCENT".into(),
            value: 15.0
        }
    );
    assert_eq!(
        project.rooms[0].readings.exact_tons,
        Some(LoadReading::Text("4,0".into()))
    );
    assert_eq!(project.timeline[2].event.room(), Some("r1"));
}

#[test]
fn version_one_file_is_migrated_on_load() {
    let yaml = r#"
version: 1
name: Legacy
rooms:
  - id: r1
    approx_tons: 9.3
    total_watts: 32708.1
"#;
    let project = from_yaml_str(yaml).unwrap();
    assert_eq!(project.version, LATEST_VERSION);
    let room = project.room("r1").unwrap();
    assert_eq!(room.readings.approx_tons, Some(LoadReading::Value(9.3)));
    assert_eq!(room.readings.total_watts, Some(LoadReading::Value(32708.1)));
    assert!(room.approx_tons.is_none());
}

#[test]
fn panel_section_overrides_defaults() {
    let yaml = r#"
version: 2
name: Tuned
panel:
  max_attempts: 3
  sync_debounce_ms: 50
"#;
    let project = from_yaml_str(yaml).unwrap();
    let config = project.panel_config();
    assert_eq!(config.max_attempts, 3);
    assert_eq!(config.sync_debounce_ms, 50);
    assert_eq!(config.init_delay_ms, 100);
}

#[test]
fn unknown_timeline_room_fails_load() {
    let yaml = r#"
version: 2
name: Broken
rooms:
  - id: r1
timeline:
  - at_ms: 10
    type: remove_room
    room: r2
"#;
    assert!(matches!(
        from_yaml_str(yaml),
        Err(ProjectError::Validation(ValidationError::MissingReference { .. }))
    ));
}
