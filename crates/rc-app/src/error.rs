//! Error types for the rc-app service layer.

/// Application error type shared by every frontend.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Project error: {0}")]
    Project(String),

    #[error("Project validation failed: {0}")]
    Validation(String),

    #[error("Room not found: {0}")]
    RoomNotFound(String),

    #[error("Panel error: {0}")]
    Panel(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rc-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<rc_project::ProjectError> for AppError {
    fn from(err: rc_project::ProjectError) -> Self {
        match err {
            rc_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<rc_panel::PanelError> for AppError {
    fn from(err: rc_panel::PanelError) -> Self {
        AppError::Panel(err.to_string())
    }
}

impl From<rc_sizing::SizingError> for AppError {
    fn from(err: rc_sizing::SizingError) -> Self {
        AppError::InvalidInput(err.to_string())
    }
}
