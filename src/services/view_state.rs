// src/services/view_state.rs
//
// What the playback view renders, as plain serializable data.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{EpisodeId, FullscreenState, OverlayState, PlaybackState, SessionHandle, SessionId, SubtitleTrack};
use crate::error::SessionResolutionError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "error", rename_all = "snake_case")]
pub enum ViewState {
    Idle,
    Loading,
    Ready,
    /// Resolution failed; blocks the view until the user loads again
    Failed(SessionResolutionError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackView {
    pub locator: String,
    pub label: String,
}

impl From<&SubtitleTrack> for TrackView {
    fn from(track: &SubtitleTrack) -> Self {
        Self {
            locator: track.locator().to_string(),
            label: track.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub handle: SessionHandle,
    pub episode_id: EpisodeId,
    pub title: String,
    pub video_source: String,
    pub tracks: Vec<TrackView>,
    pub selected_track: Option<String>,
    pub position_secs: f64,
    pub duration_secs: Option<f64>,
    pub playback_state: PlaybackState,
    pub last_error: Option<String>,
    pub overlay: OverlayState,
    pub controls_visible: bool,
    pub last_persisted_position: Option<u32>,
    pub last_persisted_at: Option<DateTime<Utc>>,
}

/// Controller-wide state plus the active session, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSnapshot {
    pub view: ViewState,
    pub fullscreen: FullscreenState,
    pub volume: f64,
    pub muted: bool,
    /// Muted, or volume at zero
    pub effectively_muted: bool,
    pub session: Option<SessionSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_state_serialization() {
        assert_eq!(serde_json::to_value(ViewState::Loading).unwrap()["status"], "loading");

        let failed = ViewState::Failed(SessionResolutionError::NotFound("abc".to_string()));
        let json = serde_json::to_value(failed).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"]["kind"], "NotFound");
        assert_eq!(json["error"]["detail"], "abc");
    }

    #[test]
    fn test_track_view_carries_label() {
        let view = TrackView::from(&SubtitleTrack::new("/subs/ep1.sc.ass"));
        assert_eq!(view.label, "ep1.sc");
        assert_eq!(view.locator, "/subs/ep1.sc.ass");
    }
}
