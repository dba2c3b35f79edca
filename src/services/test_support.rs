// src/services/test_support.rs
//
// In-memory collaborators shared by the service tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{EpisodeId, SessionHandle};
use crate::error::{PlayerError, PlayerResult, SessionResolutionError};
use crate::events::{EventBus, Subscription, SurfaceEvent};
use crate::integrations::{AnimeInfo, EpisodeInfo, HostWindow, MediaSurface, PlayInfo, PlaybackBackend, SurfaceHandler};

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Attach(String),
    Detach,
    Play,
    Pause,
    SetPosition(f64),
    SetVolume(f64),
    SetMuted(bool),
    SetSubtitleTrack(Option<String>),
    RequestFullscreen(bool),
}

/// Records every command and lets tests inject element events.
#[derive(Default)]
pub struct FakeSurface {
    calls: Mutex<Vec<SurfaceCall>>,
    events: EventBus<SurfaceEvent>,
    fail_fullscreen: AtomicBool,
}

impl FakeSurface {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Emits `event` as if the native element reported it.
    pub fn emit(&self, event: SurfaceEvent) {
        self.events.emit(&event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    pub fn fail_next_fullscreen_request(&self) {
        self.fail_fullscreen.store(true, Ordering::SeqCst);
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MediaSurface for FakeSurface {
    fn attach(&self, source: &str) -> PlayerResult<()> {
        self.record(SurfaceCall::Attach(source.to_string()));
        Ok(())
    }

    fn detach(&self) {
        self.record(SurfaceCall::Detach);
    }

    fn play(&self) -> PlayerResult<()> {
        self.record(SurfaceCall::Play);
        Ok(())
    }

    fn pause(&self) -> PlayerResult<()> {
        self.record(SurfaceCall::Pause);
        Ok(())
    }

    fn set_position(&self, position_secs: f64) -> PlayerResult<()> {
        self.record(SurfaceCall::SetPosition(position_secs));
        Ok(())
    }

    fn set_volume(&self, volume: f64) -> PlayerResult<()> {
        self.record(SurfaceCall::SetVolume(volume));
        Ok(())
    }

    fn set_muted(&self, muted: bool) -> PlayerResult<()> {
        self.record(SurfaceCall::SetMuted(muted));
        Ok(())
    }

    fn set_subtitle_track(&self, locator: Option<&str>) -> PlayerResult<()> {
        self.record(SurfaceCall::SetSubtitleTrack(locator.map(str::to_string)));
        Ok(())
    }

    fn request_fullscreen(&self, active: bool) -> PlayerResult<()> {
        if self.fail_fullscreen.swap(false, Ordering::SeqCst) {
            return Err(PlayerError::Surface("fullscreen request denied".to_string()));
        }
        self.record(SurfaceCall::RequestFullscreen(active));
        Ok(())
    }

    fn subscribe(&self, handler: SurfaceHandler) -> Subscription {
        self.events.subscribe(handler)
    }
}

/// Backend serving canned play info and recording progress writes.
#[derive(Default)]
pub struct RecordingBackend {
    sessions: Mutex<HashMap<String, PlayInfo>>,
    delays: Mutex<HashMap<String, Duration>>,
    persisted: Mutex<Vec<(EpisodeId, u32)>>,
    unavailable: AtomicBool,
    fail_persist: AtomicBool,
}

impl RecordingBackend {
    pub fn with_session(self, handle: &str, info: PlayInfo) -> Self {
        self.sessions.lock().unwrap().insert(handle.to_string(), info);
        self
    }

    /// Makes resolving `handle` take `delay` (in tokio time).
    pub fn with_delay(self, handle: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(handle.to_string(), delay);
        self
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn set_fail_persist(&self, fail: bool) {
        self.fail_persist.store(fail, Ordering::SeqCst);
    }

    pub fn persisted(&self) -> Vec<(EpisodeId, u32)> {
        self.persisted.lock().unwrap().clone()
    }

    pub fn persisted_for(&self, episode_id: EpisodeId) -> Vec<u32> {
        self.persisted()
            .into_iter()
            .filter(|(id, _)| *id == episode_id)
            .map(|(_, position)| position)
            .collect()
    }
}

#[async_trait]
impl PlaybackBackend for RecordingBackend {
    async fn resolve_play_session(
        &self,
        handle: &SessionHandle,
    ) -> Result<PlayInfo, SessionResolutionError> {
        let delay = self.delays.lock().unwrap().get(handle.as_str()).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SessionResolutionError::BackendUnavailable(
                "connection refused".to_string(),
            ));
        }
        self.sessions
            .lock()
            .unwrap()
            .get(handle.as_str())
            .cloned()
            .ok_or_else(|| SessionResolutionError::NotFound(handle.to_string()))
    }

    async fn persist_progress(&self, episode_id: EpisodeId, position_secs: u32) -> PlayerResult<()> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(PlayerError::Persistence("503 Service Unavailable".to_string()));
        }
        self.persisted.lock().unwrap().push((episode_id, position_secs));
        Ok(())
    }
}

/// Host window that records fullscreen notifications.
#[derive(Default)]
pub struct RecordingHost {
    notifications: Mutex<Vec<bool>>,
}

impl RecordingHost {
    pub fn notifications(&self) -> Vec<bool> {
        self.notifications.lock().unwrap().clone()
    }
}

impl HostWindow for RecordingHost {
    fn set_fullscreen(&self, active: bool) -> PlayerResult<()> {
        self.notifications.lock().unwrap().push(active);
        Ok(())
    }
}

pub fn play_info(episode_id: i64, progress: i64, subtitles: &[&str]) -> PlayInfo {
    PlayInfo {
        video: format!("/downloads/ep{}.mkv", episode_id),
        subtitles: subtitles.iter().map(|s| s.to_string()).collect(),
        ep: EpisodeInfo {
            id: episode_id,
            ep: Some(episode_id as i32),
            sort: episode_id as i32,
            name_cn: String::new(),
            progress,
        },
        anime: AnimeInfo {
            name_cn: "Frieren".to_string(),
        },
    }
}
