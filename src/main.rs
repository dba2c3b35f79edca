// src/main.rs

#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]

use std::sync::Arc;

use anyhow::Context;
use log::{error, info};
use tauri::{Manager, WindowEvent};

use kisara::application::commands::*;
use kisara::application::state::AppState;
use kisara::config::PlayerConfig;
use kisara::integrations::{HttpBackend, TauriHostWindow, WebviewSurface};
use kisara::services::{ControllerHandle, PlaybackController};

const COMMAND_QUEUE_CAPACITY: usize = 64;

fn main() -> anyhow::Result<()> {
    // 1. LOGGING
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn,kisara=debug"))
        .init();

    // 2. CONFIGURATION
    let config = match PlayerConfig::default_path() {
        Some(path) => PlayerConfig::load_or_default(&path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => PlayerConfig::default(),
    };
    let backend = Arc::new(HttpBackend::new(&config.backend)?);
    info!("Using backend at {}", config.backend.base_url);

    // 3. TAURI BOOTSTRAP
    tauri::Builder::default()
        .setup(move |app| {
            let window = app
                .get_webview_window("main")
                .context("main window is not configured")?;
            let surface = Arc::new(WebviewSurface::new(app.handle().clone()));
            let host = Arc::new(TauriHostWindow::new(window));

            let controller = PlaybackController::new(config, backend, surface.clone(), host);
            let (player, commands) = ControllerHandle::channel(COMMAND_QUEUE_CAPACITY);
            tauri::async_runtime::spawn(controller.run(commands));

            app.manage(AppState { player, surface });
            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::CloseRequested { api, .. } = event {
                // The window goes away only after the final progress flush.
                api.prevent_close();
                let window = window.clone();
                let player = window.state::<AppState>().player.clone();
                tauri::async_runtime::spawn(async move {
                    if let Err(e) = player.close_requested().await {
                        error!("Close flush failed: {}", e);
                    }
                    if let Err(e) = window.destroy() {
                        error!("Failed to destroy window: {}", e);
                    }
                });
            }
        })
        .invoke_handler(tauri::generate_handler![
            load_session,
            leave_session,
            player_snapshot,
            transport,
            select_track,
            pointer_input,
            key_pressed,
            set_focus,
            surface_event,
        ])
        .run(tauri::generate_context!())
        .context("error while running kisara")?;

    Ok(())
}
