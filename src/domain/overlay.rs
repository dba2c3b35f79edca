// src/domain/overlay.rs
//
// Visibility of the fullscreen transport controls.
//
// Every (state, input) pair has an explicit row in `apply`. The hide timer
// is a deadline owned by the machine: restarting it overwrites the deadline,
// cancelling it clears the deadline, so a stale timer cannot fire.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayState {
    Hidden,
    Visible,
    /// Pointer is over the control region
    Pinned,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayInput {
    PointerMoved { x: f64, y: f64 },
    PointerEntered,
    PointerLeft,
    HideTimerElapsed,
    FullscreenEntered,
    FullscreenExited,
}

#[derive(Debug, Clone)]
pub struct OverlayMachine {
    state: OverlayState,
    fullscreen: bool,
    hide_deadline: Option<Instant>,
    /// Position of the last movement that counted as activity
    anchor: Option<(f64, f64)>,
    hide_delay: Duration,
    move_threshold: f64,
}

impl OverlayMachine {
    pub fn new(hide_delay: Duration, move_threshold: f64) -> Self {
        Self {
            state: OverlayState::Hidden,
            fullscreen: false,
            hide_deadline: None,
            anchor: None,
            hide_delay,
            move_threshold,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_deadline
    }

    pub fn controls_visible(&self) -> bool {
        self.fullscreen && self.state != OverlayState::Hidden
    }

    pub fn apply(&mut self, input: OverlayInput, now: Instant) -> OverlayState {
        use OverlayInput::*;
        use OverlayState::*;

        // Outside fullscreen only the entry transition matters.
        if !self.fullscreen {
            if input == FullscreenEntered {
                self.fullscreen = true;
                self.anchor = None;
                self.hide();
            }
            return self.state;
        }

        match (self.state, input) {
            (_, FullscreenEntered) => {}
            (_, FullscreenExited) => {
                self.fullscreen = false;
                self.hide();
            }
            (Pinned, PointerMoved { x, y }) => self.anchor = Some((x, y)),
            (Hidden | Visible, PointerMoved { x, y }) => {
                if self.exceeds_threshold(x, y) {
                    self.anchor = Some((x, y));
                    self.show(now);
                }
            }
            (_, PointerEntered) => {
                self.state = Pinned;
                self.hide_deadline = None;
            }
            (_, PointerLeft) => self.show(now),
            (Visible, HideTimerElapsed) => self.hide(),
            (Hidden | Pinned, HideTimerElapsed) => self.hide_deadline = None,
        }
        self.state
    }

    /// Fires the hide timer if its deadline has passed. Returns true when the
    /// state changed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.hide_deadline {
            Some(deadline) if deadline <= now => {
                let before = self.state;
                self.apply(OverlayInput::HideTimerElapsed, now);
                before != self.state
            }
            _ => false,
        }
    }

    fn show(&mut self, now: Instant) {
        self.state = OverlayState::Visible;
        self.hide_deadline = Some(now + self.hide_delay);
    }

    fn hide(&mut self) {
        self.state = OverlayState::Hidden;
        self.hide_deadline = None;
    }

    fn exceeds_threshold(&self, x: f64, y: f64) -> bool {
        match self.anchor {
            Some((ax, ay)) => {
                let dx = x - ax;
                let dy = y - ay;
                (dx * dx + dy * dy).sqrt() > self.move_threshold
            }
            None => true,
        }
    }
}
