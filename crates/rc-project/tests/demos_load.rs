use std::path::Path;

#[test]
fn demos_load_and_validate() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/projects");
    let demos = [
        "01_server_room.yaml",
        "02_late_constants.yaml",
        "03_legacy_v1.yaml",
    ];

    for name in demos {
        let path = root.join(name);
        let project = rc_project::load_yaml(&path)
            .unwrap_or_else(|e| panic!("Failed to load {}: {}", name, e));
        assert_eq!(project.version, rc_project::LATEST_VERSION);
        rc_project::validate_project(&project)
            .unwrap_or_else(|e| panic!("Failed to validate {}: {}", name, e));
    }
}
