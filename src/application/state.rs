// src/application/state.rs

use std::sync::Arc;

use crate::integrations::WebviewSurface;
use crate::services::ControllerHandle;

/// Application state managed by Tauri.
/// The controller itself runs on its own task; commands only hold a handle.
pub struct AppState {
    pub player: ControllerHandle,
    pub surface: Arc<WebviewSurface>,
}
