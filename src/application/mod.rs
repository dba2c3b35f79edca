// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between the webview (Tauri) and the playback controller
// - Commands forward input to the controller handle and return snapshots
// - Errors cross the boundary as serialized ErrorResponse values

pub mod commands;
pub mod error_handling;
pub mod state;

pub use commands::*;
pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
