// src/integrations/backend.rs
//
// The remote media backend, as seen by the player.
//
// Only two calls matter during playback: resolving a handle into play info,
// and recording how far the user got. Everything else the backend does
// (search, torrents, settings) never passes through here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{EpisodeId, SessionHandle, SessionSeed, SubtitleTrack};
use crate::error::{PlayerResult, SessionResolutionError};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlaybackBackend: Send + Sync {
    async fn resolve_play_session(
        &self,
        handle: &SessionHandle,
    ) -> Result<PlayInfo, SessionResolutionError>;

    /// Records the watch position in whole seconds. Best effort.
    async fn persist_progress(&self, episode_id: EpisodeId, position_secs: u32) -> PlayerResult<()>;
}

/// Play info as the backend serves it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayInfo {
    pub video: String,
    #[serde(default)]
    pub subtitles: Vec<String>,
    pub ep: EpisodeInfo,
    pub anime: AnimeInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeInfo {
    pub id: i64,
    /// Number within the season, when the episode has one
    pub ep: Option<i32>,
    /// Absolute ordering number, used when `ep` is missing
    pub sort: i32,
    #[serde(default)]
    pub name_cn: String,
    /// Last recorded position in seconds
    #[serde(default)]
    pub progress: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimeInfo {
    pub name_cn: String,
}

/// Request body of the progress call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub ep_id: i64,
    pub progress: u32,
}

impl EpisodeInfo {
    pub fn label(&self) -> String {
        let number = self.ep.unwrap_or(self.sort);
        format!("EP {} {}", number, self.name_cn).trim_end().to_string()
    }
}

impl PlayInfo {
    pub fn into_seed(self) -> SessionSeed {
        let episode_label = self.ep.label();
        SessionSeed {
            video_source: self.video,
            subtitle_tracks: self.subtitles.into_iter().map(SubtitleTrack::new).collect(),
            episode_id: EpisodeId(self.ep.id),
            anime_title: self.anime.name_cn,
            episode_label,
            resume_position_secs: self.ep.progress.max(0) as f64,
        }
    }
}
