//! rc-project: scenario file format and validation.
//!
//! A project describes a set of rooms, the engineering constants available
//! at start-up, optional panel timing overrides and a timeline of external
//! events to replay against the capacity panel. Files are YAML or JSON,
//! chosen by extension; older layouts are migrated on load.

pub mod migrate;
pub mod schema;
pub mod validate;

pub use migrate::{LATEST_VERSION, migrate_to_latest};
pub use schema::*;
pub use validate::{ValidationError, validate_project};

use std::path::{Path, PathBuf};

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Migration error: {what}")]
    Migration { what: String },

    #[error("Unsupported project file extension: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// On-disk encoding of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFormat {
    Yaml,
    Json,
}

impl ProjectFormat {
    pub fn from_path(path: &Path) -> ProjectResult<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            _ => Err(ProjectError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Load a project, picking the format from the file extension.
pub fn load(path: &Path) -> ProjectResult<Project> {
    match ProjectFormat::from_path(path)? {
        ProjectFormat::Yaml => load_yaml(path),
        ProjectFormat::Json => load_json(path),
    }
}

pub fn save(path: &Path, project: &Project) -> ProjectResult<()> {
    match ProjectFormat::from_path(path)? {
        ProjectFormat::Yaml => save_yaml(path, project),
        ProjectFormat::Json => save_json(path, project),
    }
}

pub fn load_yaml(path: &Path) -> ProjectResult<Project> {
    from_yaml_str(&std::fs::read_to_string(path)?)
}

pub fn load_json(path: &Path) -> ProjectResult<Project> {
    from_json_str(&std::fs::read_to_string(path)?)
}

pub fn from_yaml_str(content: &str) -> ProjectResult<Project> {
    finish_load(serde_yaml::from_str(content)?)
}

pub fn from_json_str(content: &str) -> ProjectResult<Project> {
    finish_load(serde_json::from_str(content)?)
}

fn finish_load(project: Project) -> ProjectResult<Project> {
    let project = migrate_to_latest(project)?;
    validate_project(&project)?;
    Ok(project)
}

pub fn save_yaml(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, serde_yaml::to_string(project)?)?;
    Ok(())
}

pub fn save_json(path: &Path, project: &Project) -> ProjectResult<()> {
    validate_project(project)?;
    std::fs::write(path, serde_json::to_string_pretty(project)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            ProjectFormat::from_path(Path::new("a/b.yml")).unwrap(),
            ProjectFormat::Yaml
        );
        assert_eq!(
            ProjectFormat::from_path(Path::new("b.json")).unwrap(),
            ProjectFormat::Json
        );
        assert!(matches!(
            ProjectFormat::from_path(Path::new("b.toml")),
            Err(ProjectError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn json_text_is_migrated_and_validated() {
        let json = r#"{"version": 1, "name": "j", "rooms": [{"id": "r", "approx_tons": 3}]}"#;
        let project = from_json_str(json).unwrap();
        assert_eq!(project.version, LATEST_VERSION);
        assert!(project.rooms[0].approx_tons.is_none());
    }
}
