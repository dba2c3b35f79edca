// events/types.rs
//
// Events crossing the media surface boundary.
//
// `SurfaceEvent` is what the native element reports, named after the DOM
// events it mirrors. `MediaEvent` is the normalized stream the rest of the
// player consumes.

use serde::{Deserialize, Serialize};

/// Raw notification from the native media surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SurfaceEvent {
    Play,
    Playing,
    Pause,
    Ended,
    TimeUpdate {
        #[serde(rename = "currentTime")]
        current_time: f64,
    },
    /// `null` while the element does not know its duration yet
    DurationChange { duration: Option<f64> },
    LoadedMetadata { duration: Option<f64> },
    CanPlay,
    Error { message: String },
    /// The display element entered or left fullscreen (app- or OS-initiated)
    FullscreenChange { active: bool },
}

/// Normalized media event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum MediaEvent {
    Playing,
    Paused,
    Ended,
    TimeUpdate(f64),
    DurationKnown(f64),
    CanPlay,
    Error(String),
}

impl MediaEvent {
    /// Maps a raw surface event onto the normalized stream.
    ///
    /// Returns `None` for events that carry no media meaning (fullscreen
    /// changes) or no usable value (unknown durations, non-finite times).
    pub fn normalize(raw: &SurfaceEvent) -> Option<Self> {
        match raw {
            SurfaceEvent::Play | SurfaceEvent::Playing => Some(MediaEvent::Playing),
            SurfaceEvent::Pause => Some(MediaEvent::Paused),
            SurfaceEvent::Ended => Some(MediaEvent::Ended),
            SurfaceEvent::TimeUpdate { current_time } if current_time.is_finite() => {
                Some(MediaEvent::TimeUpdate(current_time.max(0.0)))
            }
            SurfaceEvent::TimeUpdate { .. } => None,
            SurfaceEvent::DurationChange { duration } | SurfaceEvent::LoadedMetadata { duration } => {
                duration
                    .filter(|d| d.is_finite() && *d > 0.0)
                    .map(MediaEvent::DurationKnown)
            }
            SurfaceEvent::CanPlay => Some(MediaEvent::CanPlay),
            SurfaceEvent::Error { message } => Some(MediaEvent::Error(message.clone())),
            SurfaceEvent::FullscreenChange { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_play_and_playing_both_normalize_to_playing() {
        assert_eq!(MediaEvent::normalize(&SurfaceEvent::Play), Some(MediaEvent::Playing));
        assert_eq!(MediaEvent::normalize(&SurfaceEvent::Playing), Some(MediaEvent::Playing));
        assert_eq!(MediaEvent::normalize(&SurfaceEvent::Pause), Some(MediaEvent::Paused));
        assert_eq!(MediaEvent::normalize(&SurfaceEvent::Ended), Some(MediaEvent::Ended));
    }

    #[test]
    fn test_unknown_durations_are_dropped() {
        assert_eq!(
            MediaEvent::normalize(&SurfaceEvent::LoadedMetadata { duration: Some(1500.0) }),
            Some(MediaEvent::DurationKnown(1500.0))
        );
        assert_eq!(MediaEvent::normalize(&SurfaceEvent::DurationChange { duration: None }), None);
        assert_eq!(
            MediaEvent::normalize(&SurfaceEvent::DurationChange { duration: Some(f64::INFINITY) }),
            None
        );
        assert_eq!(
            MediaEvent::normalize(&SurfaceEvent::TimeUpdate { current_time: f64::NAN }),
            None
        );
    }

    #[test]
    fn test_fullscreen_change_is_not_media() {
        assert_eq!(MediaEvent::normalize(&SurfaceEvent::FullscreenChange { active: true }), None);
    }

    #[test]
    fn test_surface_event_wire_names() {
        let event: SurfaceEvent =
            serde_json::from_str(r#"{"type":"timeupdate","currentTime":12.5}"#).unwrap();
        assert_eq!(event, SurfaceEvent::TimeUpdate { current_time: 12.5 });

        let event: SurfaceEvent =
            serde_json::from_str(r#"{"type":"loadedmetadata","duration":null}"#).unwrap();
        assert_eq!(event, SurfaceEvent::LoadedMetadata { duration: None });

        let event: SurfaceEvent =
            serde_json::from_str(r#"{"type":"fullscreenchange","active":false}"#).unwrap();
        assert_eq!(event, SurfaceEvent::FullscreenChange { active: false });
    }
}
