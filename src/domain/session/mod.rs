pub mod entity;
pub mod invariants;

pub use entity::{
    EpisodeId, PlaySession, PlaybackState, SessionHandle, SessionId, SessionSeed, SubtitleTrack,
};
pub use invariants::{clamp_seek_target, resume_target, validate_selection};
