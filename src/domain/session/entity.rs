use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one play session.
///
/// A fresh id is minted every time a handle is loaded, even when the same
/// handle is loaded twice, so inputs tagged with an old id can be told apart
/// from inputs of the session that replaced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference (torrent id) the backend resolves into playable content
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionHandle(String);

impl SessionHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Backend identifier of the episode progress is recorded against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EpisodeId(pub i64);

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable subtitle track, identified by its locator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubtitleTrack {
    locator: String,
}

impl SubtitleTrack {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
        }
    }

    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Human readable label: the file name without directory or extension.
    pub fn label(&self) -> &str {
        let name = self
            .locator
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.locator);
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }
}

/// Everything needed to start playing one episode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSeed {
    pub video_source: String,
    pub subtitle_tracks: Vec<SubtitleTrack>,
    pub episode_id: EpisodeId,
    pub anime_title: String,
    pub episode_label: String,
    pub resume_position_secs: f64,
}

impl SessionSeed {
    pub fn display_title(&self) -> String {
        format!("{} {}", self.anime_title, self.episode_label)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Loading,
    Paused,
    Playing,
    Ended,
    Error,
}

/// The live, per-episode part of a play session.
///
/// Position, duration, track selection, overlay and persistence bookkeeping
/// are owned by the components that mutate them; this holds the rest.
#[derive(Debug, Clone)]
pub struct PlaySession {
    pub id: SessionId,
    pub handle: SessionHandle,
    pub seed: SessionSeed,
    pub playback_state: PlaybackState,
    /// Set until the first `CanPlay` triggers the resume seek
    pub resume_pending: bool,
    pub last_error: Option<String>,
}

impl PlaySession {
    pub fn new(handle: SessionHandle, seed: SessionSeed) -> Self {
        Self {
            id: SessionId::new(),
            handle,
            seed,
            playback_state: PlaybackState::Loading,
            resume_pending: true,
            last_error: None,
        }
    }
}
