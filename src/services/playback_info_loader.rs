// src/services/playback_info_loader.rs
//
// Resolves a session handle into the data needed to start playing.
// A plain request: no caching, no retries. The caller decides what to do
// with a failure.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::{SessionHandle, SessionSeed};
use crate::error::SessionResolutionError;
use crate::integrations::PlaybackBackend;

#[derive(Clone)]
pub struct PlaybackInfoLoader {
    backend: Arc<dyn PlaybackBackend>,
}

impl PlaybackInfoLoader {
    pub fn new(backend: Arc<dyn PlaybackBackend>) -> Self {
        Self { backend }
    }

    pub async fn load(&self, handle: &SessionHandle) -> Result<SessionSeed, SessionResolutionError> {
        let info = self
            .backend
            .resolve_play_session(handle)
            .await
            .inspect_err(|e| warn!("Failed to resolve play session {}: {}", handle, e))?;

        let seed = info.into_seed();
        info!(
            "Resolved play session {} -> episode {} ({} subtitle tracks)",
            handle,
            seed.episode_id,
            seed.subtitle_tracks.len()
        );
        Ok(seed)
    }
}
