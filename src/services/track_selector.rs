// src/services/track_selector.rs

use log::debug;

use crate::domain::{validate_selection, SubtitleTrack};
use crate::error::PlayerResult;

/// Subtitle tracks of the active session and which one is shown.
///
/// Selection never touches transport: switching tracks keeps the position
/// and play/pause state of the media element as they are.
#[derive(Debug, Clone, Default)]
pub struct TrackSelector {
    tracks: Vec<SubtitleTrack>,
    selected: Option<SubtitleTrack>,
}

impl TrackSelector {
    /// Starts with the first track selected, if there is one.
    pub fn new(tracks: Vec<SubtitleTrack>) -> Self {
        let selected = tracks.first().cloned();
        Self { tracks, selected }
    }

    pub fn list(&self) -> &[SubtitleTrack] {
        &self.tracks
    }

    pub fn selected(&self) -> Option<&SubtitleTrack> {
        self.selected.as_ref()
    }

    /// Selects the track with `locator`.
    ///
    /// Returns `Ok(true)` if the selection changed, `Ok(false)` when it was
    /// already selected. Unknown locators leave the selection untouched.
    pub fn select(&mut self, locator: &str) -> PlayerResult<bool> {
        let track = SubtitleTrack::new(locator);
        validate_selection(&self.tracks, Some(&track))?;

        if self.selected.as_ref() == Some(&track) {
            return Ok(false);
        }
        debug!("Subtitle track -> {}", track.label());
        self.selected = Some(track);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;

    fn tracks() -> Vec<SubtitleTrack> {
        vec![
            SubtitleTrack::new("/subs/ep1.sc.ass"),
            SubtitleTrack::new("/subs/ep1.tc.ass"),
        ]
    }

    #[test]
    fn test_first_track_selected_initially() {
        let selector = TrackSelector::new(tracks());
        assert_eq!(selector.selected().map(|t| t.locator()), Some("/subs/ep1.sc.ass"));
        assert_eq!(selector.list().len(), 2);
    }

    #[test]
    fn test_no_tracks_means_no_selection() {
        let selector = TrackSelector::new(vec![]);
        assert!(selector.selected().is_none());
        assert!(selector.list().is_empty());
    }

    #[test]
    fn test_select_changes_once() {
        let mut selector = TrackSelector::new(tracks());
        assert!(selector.select("/subs/ep1.tc.ass").unwrap());
        assert!(!selector.select("/subs/ep1.tc.ass").unwrap());
        assert_eq!(selector.selected().map(|t| t.label()), Some("ep1.tc"));
    }

    #[test]
    fn test_unknown_track_rejected_and_selection_kept() {
        let mut selector = TrackSelector::new(tracks());
        let err = selector.select("/subs/other.ass").unwrap_err();
        assert!(matches!(err, PlayerError::InvalidTrack(ref l) if l == "/subs/other.ass"));
        assert_eq!(selector.selected().map(|t| t.locator()), Some("/subs/ep1.sc.ass"));
    }
}
