// src/integrations/webview.rs
//
// Media surface and host window backed by the Tauri webview.
//
// The <video> element lives in the frontend. Commands travel to it as
// `player://command` events; what the element reports comes back through
// the `surface_event` command and is published on the surface's bus.

use log::warn;
use serde::Serialize;
use tauri::{AppHandle, Emitter, WebviewWindow};

use crate::error::{PlayerError, PlayerResult};
use crate::events::{EventBus, Subscription, SurfaceEvent};

use super::media::{HostWindow, MediaSurface, SurfaceHandler};

pub const SURFACE_COMMAND_EVENT: &str = "player://command";

/// Instruction for the frontend's media element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SurfaceCommand {
    Attach { source: String },
    Detach,
    Play,
    Pause,
    SetPosition { position_secs: f64 },
    SetVolume { volume: f64 },
    SetMuted { muted: bool },
    SetSubtitleTrack { locator: Option<String> },
    RequestFullscreen { active: bool },
}

pub struct WebviewSurface {
    app: AppHandle,
    events: EventBus<SurfaceEvent>,
}

impl WebviewSurface {
    pub fn new(app: AppHandle) -> Self {
        Self {
            app,
            events: EventBus::new(),
        }
    }

    /// Publishes an event reported by the frontend's media element.
    pub fn dispatch(&self, event: &SurfaceEvent) {
        self.events.emit(event);
    }

    fn send(&self, command: SurfaceCommand) -> PlayerResult<()> {
        self.app
            .emit(SURFACE_COMMAND_EVENT, command)
            .map_err(|e| PlayerError::Surface(e.to_string()))
    }
}

impl MediaSurface for WebviewSurface {
    fn attach(&self, source: &str) -> PlayerResult<()> {
        self.send(SurfaceCommand::Attach {
            source: source.to_string(),
        })
    }

    fn detach(&self) {
        if let Err(e) = self.send(SurfaceCommand::Detach) {
            warn!("Failed to detach webview surface: {}", e);
        }
    }

    fn play(&self) -> PlayerResult<()> {
        self.send(SurfaceCommand::Play)
    }

    fn pause(&self) -> PlayerResult<()> {
        self.send(SurfaceCommand::Pause)
    }

    fn set_position(&self, position_secs: f64) -> PlayerResult<()> {
        self.send(SurfaceCommand::SetPosition { position_secs })
    }

    fn set_volume(&self, volume: f64) -> PlayerResult<()> {
        self.send(SurfaceCommand::SetVolume { volume })
    }

    fn set_muted(&self, muted: bool) -> PlayerResult<()> {
        self.send(SurfaceCommand::SetMuted { muted })
    }

    fn set_subtitle_track(&self, locator: Option<&str>) -> PlayerResult<()> {
        self.send(SurfaceCommand::SetSubtitleTrack {
            locator: locator.map(str::to_string),
        })
    }

    fn request_fullscreen(&self, active: bool) -> PlayerResult<()> {
        self.send(SurfaceCommand::RequestFullscreen { active })
    }

    fn subscribe(&self, handler: SurfaceHandler) -> Subscription {
        self.events.subscribe(handler)
    }
}

pub struct TauriHostWindow {
    window: WebviewWindow,
}

impl TauriHostWindow {
    pub fn new(window: WebviewWindow) -> Self {
        Self { window }
    }
}

impl HostWindow for TauriHostWindow {
    fn set_fullscreen(&self, active: bool) -> PlayerResult<()> {
        self.window
            .set_fullscreen(active)
            .map_err(|e| PlayerError::Host(e.to_string()))
    }
}
