// src/integrations/http.rs
//
// HTTP client for the media backend.
//
// GET  {base}/play/{handle}  -> PlayInfo
// POST {base}/progress       <- ProgressUpdate

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode, Url};

use super::backend::{PlayInfo, PlaybackBackend, ProgressUpdate};
use crate::config::BackendConfig;
use crate::domain::{EpisodeId, SessionHandle};
use crate::error::{PlayerError, PlayerResult, SessionResolutionError};

pub struct HttpBackend {
    base_url: Url,
    http_client: Client,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> PlayerResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            PlayerError::Config(format!("invalid backend url '{}': {}", config.base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(PlayerError::Config(format!(
                "backend url '{}' cannot be a base",
                config.base_url
            )));
        }

        let http_client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| PlayerError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[async_trait]
impl PlaybackBackend for HttpBackend {
    async fn resolve_play_session(
        &self,
        handle: &SessionHandle,
    ) -> Result<PlayInfo, SessionResolutionError> {
        let url = self.endpoint(&["play", handle.as_str()]);
        debug!("Resolving play session {} via {}", handle, url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| SessionResolutionError::BackendUnavailable(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(SessionResolutionError::NotFound(handle.to_string())),
            status if !status.is_success() => Err(SessionResolutionError::BackendUnavailable(
                format!("backend answered {}", status),
            )),
            _ => response.json::<PlayInfo>().await.map_err(|e| {
                SessionResolutionError::BackendUnavailable(format!("malformed play info: {}", e))
            }),
        }
    }

    async fn persist_progress(&self, episode_id: EpisodeId, position_secs: u32) -> PlayerResult<()> {
        let body = ProgressUpdate {
            ep_id: episode_id.0,
            progress: position_secs,
        };

        self.http_client
            .post(self.endpoint(&["progress"]))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
