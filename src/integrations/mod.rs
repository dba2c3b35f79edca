// src/integrations/mod.rs
//
// External collaborators of the player.

pub mod backend;
pub mod http;
pub mod media;

#[cfg(feature = "desktop")]
pub mod webview;

pub use backend::{AnimeInfo, EpisodeInfo, PlayInfo, PlaybackBackend, ProgressUpdate};
pub use http::HttpBackend;
pub use media::{HostWindow, MediaSurface, SurfaceHandler};

#[cfg(feature = "desktop")]
pub use webview::{SurfaceCommand, TauriHostWindow, WebviewSurface, SURFACE_COMMAND_EVENT};
