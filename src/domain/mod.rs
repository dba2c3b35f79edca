// src/domain/mod.rs
//
// Domain root: the pure state of a play session.
//
// Nothing in here performs IO or owns a collaborator. The services layer
// feeds inputs in and carries out the effects that come back out.

pub mod fullscreen;
pub mod overlay;
pub mod session;
pub mod shortcut;

pub use fullscreen::{FullscreenEffect, FullscreenMachine, FullscreenState};
pub use overlay::{OverlayInput, OverlayMachine, OverlayState};
pub use session::{
    clamp_seek_target, resume_target, validate_selection, EpisodeId, PlaySession, PlaybackState,
    SessionHandle, SessionId, SessionSeed, SubtitleTrack,
};
pub use shortcut::{FocusContext, ShortcutAction, ShortcutKey};
