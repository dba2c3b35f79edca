// src/error/types.rs
use serde::Serialize;
use thiserror::Error;

/// Failure to turn a session handle into playable session data.
///
/// Surfaced to the view as a blocking error state. Never retried by the
/// controller; the user decides whether to load again.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum SessionResolutionError {
    #[error("Play session not found: {0}")]
    NotFound(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error(transparent)]
    Resolution(#[from] SessionResolutionError),

    #[error("Invalid subtitle track: {0}")]
    InvalidTrack(String),

    #[error("Progress persistence failed: {0}")]
    Persistence(String),

    #[error("Media decode error: {0}")]
    MediaDecode(String),

    #[error("No active play session")]
    NoActiveSession,

    #[error("Load of {0} was superseded")]
    LoadSuperseded(String),

    #[error("Playback controller has stopped")]
    ControllerStopped,

    #[error("Media surface error: {0}")]
    Surface(String),

    #[error("Host window error: {0}")]
    Host(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Serialize for PlayerError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<reqwest::Error> for PlayerError {
    fn from(err: reqwest::Error) -> Self {
        PlayerError::Persistence(err.to_string())
    }
}

pub type PlayerResult<T> = Result<T, PlayerError>;
