// src/services/mod.rs
//
// Services Module - the playback session components and the controller
// that owns them.

pub mod fullscreen_coordinator;
pub mod media_controller;
pub mod overlay_controller;
pub mod playback_controller;
pub mod playback_info_loader;
pub mod progress_reporter;
pub mod shortcut_dispatcher;
pub mod track_selector;
pub mod view_state;

#[cfg(test)]
pub(crate) mod test_support;


pub use fullscreen_coordinator::FullscreenCoordinator;
pub use media_controller::{MediaElementController, SurfaceLease};
pub use overlay_controller::OverlayVisibilityController;
pub use playback_controller::{
    ControllerCommand,
    ControllerHandle,
    ControllerInput,
    PlaybackController,
    PointerInput,
    TransportAction,
};
pub use playback_info_loader::PlaybackInfoLoader;
pub use progress_reporter::{persist_best_effort, ProgressReporter, ProgressWrite};
pub use shortcut_dispatcher::ShortcutDispatcher;
pub use track_selector::TrackSelector;
pub use view_state::{PlayerSnapshot, SessionSnapshot, TrackView, ViewState};
