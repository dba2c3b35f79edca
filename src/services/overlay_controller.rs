// src/services/overlay_controller.rs

use log::debug;
use tokio::time::Instant;

use crate::config::PlayerConfig;
use crate::domain::{OverlayInput, OverlayMachine, OverlayState};

/// Drives the overlay machine from pointer input, fullscreen changes and
/// the clock.
#[derive(Debug, Clone)]
pub struct OverlayVisibilityController {
    machine: OverlayMachine,
}

impl OverlayVisibilityController {
    pub fn new(config: &PlayerConfig) -> Self {
        Self {
            machine: OverlayMachine::new(config.overlay_hide_delay(), config.pointer_move_threshold_px),
        }
    }

    pub fn state(&self) -> OverlayState {
        self.machine.state()
    }

    pub fn controls_visible(&self) -> bool {
        self.machine.controls_visible()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.machine.hide_deadline()
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, now: Instant) -> OverlayState {
        self.apply(OverlayInput::PointerMoved { x, y }, now)
    }

    pub fn pointer_entered(&mut self, now: Instant) -> OverlayState {
        self.apply(OverlayInput::PointerEntered, now)
    }

    pub fn pointer_left(&mut self, now: Instant) -> OverlayState {
        self.apply(OverlayInput::PointerLeft, now)
    }

    pub fn fullscreen_changed(&mut self, active: bool, now: Instant) -> OverlayState {
        let input = if active {
            OverlayInput::FullscreenEntered
        } else {
            OverlayInput::FullscreenExited
        };
        self.apply(input, now)
    }

    /// Fires the hide timer when due.
    pub fn poll(&mut self, now: Instant) -> bool {
        let changed = self.machine.poll(now);
        if changed {
            debug!("Overlay hidden after idle timeout");
        }
        changed
    }

    fn apply(&mut self, input: OverlayInput, now: Instant) -> OverlayState {
        let before = self.machine.state();
        let after = self.machine.apply(input, now);
        if before != after {
            debug!("Overlay {:?} -> {:?} on {:?}", before, after, input);
        }
        after
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn fullscreen_controller(now: Instant) -> OverlayVisibilityController {
        let mut overlay = OverlayVisibilityController::new(&PlayerConfig::default());
        overlay.fullscreen_changed(true, now);
        overlay
    }

    #[test]
    fn test_idle_pointer_hides_after_delay() {
        let start = Instant::now();
        let mut overlay = fullscreen_controller(start);
        assert_eq!(overlay.pointer_moved(10.0, 10.0, start), OverlayState::Visible);
        assert_eq!(overlay.next_deadline(), Some(start + Duration::from_millis(5000)));

        assert!(!overlay.poll(start + Duration::from_millis(4999)));
        assert!(overlay.poll(start + Duration::from_millis(5000)));
        assert_eq!(overlay.state(), OverlayState::Hidden);
    }

    #[test]
    fn test_small_jitter_does_not_restart_timer() {
        let start = Instant::now();
        let mut overlay = fullscreen_controller(start);
        overlay.pointer_moved(10.0, 10.0, start);
        overlay.pointer_moved(12.0, 13.0, start + Duration::from_millis(3000));
        assert_eq!(overlay.next_deadline(), Some(start + Duration::from_millis(5000)));
    }

    #[test]
    fn test_ignored_while_windowed() {
        let mut overlay = OverlayVisibilityController::new(&PlayerConfig::default());
        let now = Instant::now();
        assert_eq!(overlay.pointer_moved(0.0, 0.0, now), OverlayState::Hidden);
        assert_eq!(overlay.pointer_entered(now), OverlayState::Hidden);
        assert!(!overlay.controls_visible());
        assert_eq!(overlay.next_deadline(), None);
    }

    #[test]
    fn test_exit_clears_pin() {
        let now = Instant::now();
        let mut overlay = fullscreen_controller(now);
        overlay.pointer_entered(now);
        assert_eq!(overlay.state(), OverlayState::Pinned);
        assert_eq!(overlay.fullscreen_changed(false, now), OverlayState::Hidden);
        assert_eq!(overlay.next_deadline(), None);
    }
}
