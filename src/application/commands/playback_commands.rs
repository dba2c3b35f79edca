// src/application/commands/playback_commands.rs

use tauri::State;

use crate::application::error_handling::ToErrorResponse;
use crate::application::state::AppState;
use crate::domain::{FocusContext, SessionHandle, ShortcutAction};
use crate::events::SurfaceEvent;
use crate::services::{PlayerSnapshot, PointerInput, SessionSnapshot, TransportAction};

#[tauri::command]
pub async fn load_session(state: State<'_, AppState>, handle: String) -> Result<SessionSnapshot, String> {
    state
        .player
        .load(SessionHandle::new(handle))
        .await
        .to_error_response()
}

#[tauri::command]
pub async fn leave_session(state: State<'_, AppState>) -> Result<(), String> {
    state.player.leave().await.to_error_response()
}

#[tauri::command]
pub async fn player_snapshot(state: State<'_, AppState>) -> Result<PlayerSnapshot, String> {
    state.player.snapshot().await.to_error_response()
}

#[tauri::command]
pub async fn transport(state: State<'_, AppState>, action: TransportAction) -> Result<(), String> {
    state.player.transport(action).await.to_error_response()
}

#[tauri::command]
pub async fn select_track(state: State<'_, AppState>, locator: String) -> Result<bool, String> {
    state.player.select_track(locator).await.to_error_response()
}

#[tauri::command]
pub async fn pointer_input(state: State<'_, AppState>, input: PointerInput) -> Result<(), String> {
    state.player.pointer(input).await.to_error_response()
}

#[tauri::command]
pub async fn key_pressed(
    state: State<'_, AppState>,
    key: String,
) -> Result<Option<ShortcutAction>, String> {
    state.player.key_pressed(key).await.to_error_response()
}

#[tauri::command]
pub async fn set_focus(state: State<'_, AppState>, focus: FocusContext) -> Result<(), String> {
    state.player.set_focus(focus).await.to_error_response()
}

/// Events reported by the frontend's media element.
#[tauri::command]
pub fn surface_event(state: State<'_, AppState>, event: SurfaceEvent) {
    state.surface.dispatch(&event);
}
