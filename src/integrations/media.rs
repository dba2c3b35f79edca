// src/integrations/media.rs
//
// The native media surface and the host window, as traits.
//
// Implementations forward commands to whatever actually renders video
// (a webview <video> element in the desktop shell) and publish what the
// element reports on their event bus.

use crate::error::PlayerResult;
use crate::events::{SurfaceEvent, Subscription};

pub type SurfaceHandler = Box<dyn Fn(&SurfaceEvent) + Send + Sync>;

pub trait MediaSurface: Send + Sync {
    /// Points the surface at a new source. Called once per session.
    fn attach(&self, source: &str) -> PlayerResult<()>;

    /// Stops and unloads the current source.
    fn detach(&self);

    fn play(&self) -> PlayerResult<()>;

    fn pause(&self) -> PlayerResult<()>;

    fn set_position(&self, position_secs: f64) -> PlayerResult<()>;

    fn set_volume(&self, volume: f64) -> PlayerResult<()>;

    fn set_muted(&self, muted: bool) -> PlayerResult<()>;

    fn set_subtitle_track(&self, locator: Option<&str>) -> PlayerResult<()>;

    /// Asks the display element to enter or leave fullscreen. The outcome
    /// arrives later as `SurfaceEvent::FullscreenChange`.
    fn request_fullscreen(&self, active: bool) -> PlayerResult<()>;

    fn subscribe(&self, handler: SurfaceHandler) -> Subscription;
}

/// Window chrome of the host application
#[cfg_attr(test, mockall::automock)]
pub trait HostWindow: Send + Sync {
    fn set_fullscreen(&self, active: bool) -> PlayerResult<()>;
}
