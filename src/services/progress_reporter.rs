// src/services/progress_reporter.rs
//
// Throttled persistence of the playback position.
//
// The reporter only decides *when* a write is due and what it carries.
// Sending is done by the caller through `persist_best_effort`, which never
// fails: a lost write is superseded by the next throttled one or by the
// final flush.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use tokio::time::Instant;

use crate::domain::EpisodeId;
use crate::integrations::PlaybackBackend;

/// One progress write, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressWrite {
    pub episode_id: EpisodeId,
    pub position_secs: u32,
}

impl ProgressWrite {
    fn new(episode_id: EpisodeId, position: f64) -> Self {
        let position_secs = if position.is_finite() && position > 0.0 {
            position.floor().min(u32::MAX as f64) as u32
        } else {
            0
        };
        Self {
            episode_id,
            position_secs,
        }
    }
}

#[derive(Debug)]
pub struct ProgressReporter {
    episode_id: EpisodeId,
    throttle: Duration,
    last_position: f64,
    last_persist_at: Option<Instant>,
    last_persisted_position: Option<u32>,
    last_persisted_wall: Option<DateTime<Utc>>,
    finished: bool,
}

impl ProgressReporter {
    pub fn new(episode_id: EpisodeId, throttle: Duration) -> Self {
        Self {
            episode_id,
            throttle,
            last_position: 0.0,
            last_persist_at: None,
            last_persisted_position: None,
            last_persisted_wall: None,
            finished: false,
        }
    }

    pub fn episode_id(&self) -> EpisodeId {
        self.episode_id
    }

    /// Records a `TimeUpdate`. Returns a write when the throttle window has
    /// elapsed since the last one (or no write happened yet).
    pub fn on_time_update(&mut self, position: f64, now: Instant) -> Option<ProgressWrite> {
        if self.finished {
            return None;
        }
        self.last_position = position;

        let due = match self.last_persist_at {
            Some(at) => now.saturating_duration_since(at) >= self.throttle,
            None => true,
        };
        if !due {
            return None;
        }
        Some(self.record(position, now))
    }

    /// The unconditional write issued at teardown. Returns `None` after the
    /// first call.
    ///
    /// `position` is the media element's last known position; a non-finite
    /// value falls back to the last `TimeUpdate` seen.
    pub fn final_flush(&mut self, position: f64, now: Instant) -> Option<ProgressWrite> {
        if self.finished {
            return None;
        }
        let position = if position.is_finite() {
            position
        } else {
            self.last_position
        };
        let write = self.record(position, now);
        self.finished = true;
        debug!(
            "Final progress flush for episode {}: {}s",
            self.episode_id, write.position_secs
        );
        Some(write)
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn last_persisted_position(&self) -> Option<u32> {
        self.last_persisted_position
    }

    pub fn last_persisted_at(&self) -> Option<DateTime<Utc>> {
        self.last_persisted_wall
    }

    fn record(&mut self, position: f64, now: Instant) -> ProgressWrite {
        let write = ProgressWrite::new(self.episode_id, position);
        self.last_persist_at = Some(now);
        self.last_persisted_position = Some(write.position_secs);
        self.last_persisted_wall = Some(Utc::now());
        write
    }
}

/// Sends `write`, logging and swallowing any failure. Returns whether the
/// backend accepted it.
pub async fn persist_best_effort(backend: Arc<dyn PlaybackBackend>, write: ProgressWrite) -> bool {
    match backend
        .persist_progress(write.episode_id, write.position_secs)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            warn!(
                "Failed to persist progress {}s for episode {}: {}",
                write.position_secs, write.episode_id, e
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlayerError;
    use crate::integrations::backend::MockPlaybackBackend;
    use mockall::predicate::eq;

    const THROTTLE: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_update_is_written() {
        let mut reporter = ProgressReporter::new(EpisodeId(3), THROTTLE);
        let write = reporter.on_time_update(12.9, Instant::now()).unwrap();
        assert_eq!(write, ProgressWrite { episode_id: EpisodeId(3), position_secs: 12 });
        assert_eq!(reporter.last_persisted_position(), Some(12));
        assert!(reporter.last_persisted_at().is_some());
    }

    #[test]
    fn test_burst_within_window_yields_one_write() {
        let mut reporter = ProgressReporter::new(EpisodeId(3), THROTTLE);
        let start = Instant::now();
        let writes = (0..20)
            .filter_map(|i| {
                let now = start + Duration::from_millis(i * 10);
                reporter.on_time_update(100.0 + i as f64 * 0.01, now)
            })
            .count();
        assert_eq!(writes, 1);
    }

    #[test]
    fn test_write_due_exactly_at_throttle() {
        let mut reporter = ProgressReporter::new(EpisodeId(3), THROTTLE);
        let start = Instant::now();
        assert!(reporter.on_time_update(1.0, start).is_some());
        assert!(reporter.on_time_update(1.2, start + Duration::from_millis(499)).is_none());
        assert!(reporter.on_time_update(1.5, start + THROTTLE).is_some());
    }

    #[test]
    fn test_final_flush_bypasses_throttle_once() {
        let mut reporter = ProgressReporter::new(EpisodeId(3), THROTTLE);
        let start = Instant::now();
        reporter.on_time_update(40.0, start);
        reporter.on_time_update(40.2, start + Duration::from_millis(100));

        let flush = reporter.final_flush(40.3, start + Duration::from_millis(150));
        assert_eq!(flush.map(|w| w.position_secs), Some(40));
        assert!(reporter.final_flush(41.0, start + Duration::from_secs(5)).is_none());
        assert!(reporter.on_time_update(42.0, start + Duration::from_secs(10)).is_none());
        assert!(reporter.is_finished());
    }

    #[test]
    fn test_final_flush_falls_back_to_last_update() {
        let mut reporter = ProgressReporter::new(EpisodeId(3), THROTTLE);
        reporter.on_time_update(77.7, Instant::now());
        let flush = reporter.final_flush(f64::NAN, Instant::now()).unwrap();
        assert_eq!(flush.position_secs, 77);
    }

    #[tokio::test]
    async fn test_persist_failure_is_swallowed() {
        let mut backend = MockPlaybackBackend::new();
        backend
            .expect_persist_progress()
            .with(eq(EpisodeId(3)), eq(40))
            .times(1)
            .returning(|_, _| Err(PlayerError::Persistence("503".to_string())));

        let ok = persist_best_effort(
            Arc::new(backend),
            ProgressWrite { episode_id: EpisodeId(3), position_secs: 40 },
        )
        .await;
        assert!(!ok);
    }
}
