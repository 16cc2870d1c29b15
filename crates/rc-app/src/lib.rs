//! Shared application service layer for refcap.
//!
//! Frontends go through this crate to load scenario files, replay them
//! against the capacity panel and size a single room on demand.

pub mod error;
pub mod project_service;
pub mod run_service;
pub mod solve_service;

pub use error::{AppError, AppResult};
pub use project_service::{
    RoomSummary, get_room, list_rooms, load_project, save_project, validate_project,
};
pub use run_service::{RunOptions, RunReport, run_project, run_project_file};
pub use solve_service::{QuickSolve, QuickSolveRequest, quick_solve};
