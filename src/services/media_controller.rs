// src/services/media_controller.rs
//
// Command/query surface over the native media element.
//
// Keeps the last reported position and duration so queries never go back
// to the surface, and republishes raw surface events as the normalized
// `MediaEvent` stream.

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

use crate::domain::clamp_seek_target;
use crate::error::PlayerResult;
use crate::events::{EventBus, MediaEvent, Subscription, SurfaceEvent};
use crate::integrations::MediaSurface;

/// Exclusive hold on the media surface for one session.
///
/// Dropping the lease detaches the surface.
#[must_use = "dropping a SurfaceLease detaches the media surface"]
pub struct SurfaceLease {
    surface: Arc<dyn MediaSurface>,
    source: String,
}

impl SurfaceLease {
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl Drop for SurfaceLease {
    fn drop(&mut self) {
        debug!("Detaching media surface from {}", self.source);
        self.surface.detach();
    }
}

impl fmt::Debug for SurfaceLease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceLease").field("source", &self.source).finish()
    }
}

pub struct MediaElementController {
    surface: Arc<dyn MediaSurface>,
    events: EventBus<MediaEvent>,
    position: f64,
    duration: Option<f64>,
    paused: bool,
    volume: f64,
    muted: bool,
}

impl MediaElementController {
    pub fn new(surface: Arc<dyn MediaSurface>) -> Self {
        Self {
            surface,
            events: EventBus::new(),
            position: 0.0,
            duration: None,
            paused: true,
            volume: 1.0,
            muted: false,
        }
    }

    pub fn surface(&self) -> &Arc<dyn MediaSurface> {
        &self.surface
    }

    /// Loads `source` and re-applies the view's volume and mute settings.
    pub fn attach(&mut self, source: &str) -> PlayerResult<SurfaceLease> {
        self.position = 0.0;
        self.duration = None;
        self.paused = true;

        self.surface.attach(source)?;
        let lease = SurfaceLease {
            surface: Arc::clone(&self.surface),
            source: source.to_string(),
        };
        self.surface.set_volume(self.volume)?;
        self.surface.set_muted(self.muted)?;
        Ok(lease)
    }

    pub fn play(&self) -> PlayerResult<()> {
        self.surface.play()
    }

    pub fn pause(&self) -> PlayerResult<()> {
        self.surface.pause()
    }

    pub fn toggle_play(&self) -> PlayerResult<()> {
        if self.paused {
            self.play()
        } else {
            self.pause()
        }
    }

    /// Seeks to `position`, clamped into `[0, duration]`. Returns the
    /// position actually requested.
    pub fn seek(&mut self, position: f64) -> PlayerResult<f64> {
        let target = clamp_seek_target(position, self.duration);
        self.surface.set_position(target)?;
        self.position = target;
        Ok(target)
    }

    pub fn seek_relative(&mut self, delta: f64) -> PlayerResult<f64> {
        self.seek(self.position + delta)
    }

    pub fn set_volume(&mut self, volume: f64) -> PlayerResult<()> {
        if volume.is_nan() {
            warn!("Ignoring NaN volume");
            return Ok(());
        }
        let volume = volume.clamp(0.0, 1.0);
        self.surface.set_volume(volume)?;
        self.volume = volume;
        Ok(())
    }

    pub fn set_muted(&mut self, muted: bool) -> PlayerResult<()> {
        self.surface.set_muted(muted)?;
        self.muted = muted;
        Ok(())
    }

    pub fn toggle_mute(&mut self) -> PlayerResult<()> {
        self.set_muted(!self.muted)
    }

    pub fn current_position(&self) -> f64 {
        self.position
    }

    pub fn current_duration(&self) -> Option<f64> {
        self.duration
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Muted, or turned all the way down.
    pub fn is_effectively_muted(&self) -> bool {
        self.muted || self.volume == 0.0
    }

    /// Subscribes to the normalized event stream.
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&MediaEvent) + Send + Sync + 'static,
    {
        self.events.subscribe(handler)
    }

    /// Folds a raw surface event into the cached state and publishes its
    /// normalized form.
    pub fn ingest(&mut self, raw: &SurfaceEvent) -> Option<MediaEvent> {
        let event = MediaEvent::normalize(raw)?;
        match &event {
            MediaEvent::Playing => self.paused = false,
            MediaEvent::Paused | MediaEvent::Ended | MediaEvent::Error(_) => self.paused = true,
            MediaEvent::TimeUpdate(position) => {
                self.position = clamp_seek_target(*position, self.duration);
            }
            MediaEvent::DurationKnown(duration) => {
                self.duration = Some(*duration);
                self.position = self.position.min(*duration);
            }
            MediaEvent::CanPlay => {}
        }
        self.events.emit(&event);
        Some(event)
    }
}
