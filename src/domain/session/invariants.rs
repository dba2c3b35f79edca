use super::entity::SubtitleTrack;
use crate::error::{PlayerError, PlayerResult};

/// Clamps a seek target into `[0, duration]`.
///
/// With an unknown duration only the lower bound applies. A NaN target
/// clamps to 0.
pub fn clamp_seek_target(target: f64, duration: Option<f64>) -> f64 {
    let lower = if target.is_nan() { 0.0 } else { target.max(0.0) };
    match duration {
        Some(d) if d.is_finite() && d >= 0.0 => lower.min(d),
        _ => lower,
    }
}

/// Where a resumed session starts: `max(0, resume - rewind)`.
pub fn resume_target(resume_position_secs: f64, rewind_secs: f64) -> f64 {
    if !resume_position_secs.is_finite() {
        return 0.0;
    }
    (resume_position_secs - rewind_secs).max(0.0)
}

/// The selected track is either absent or one of the session's tracks.
pub fn validate_selection(
    tracks: &[SubtitleTrack],
    selected: Option<&SubtitleTrack>,
) -> PlayerResult<()> {
    match selected {
        None => Ok(()),
        Some(track) if tracks.contains(track) => Ok(()),
        Some(track) => Err(PlayerError::InvalidTrack(track.locator().to_string())),
    }
}
