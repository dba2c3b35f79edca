// src/domain/fullscreen.rs
//
// Reconciles user fullscreen requests with what the display actually does.
//
// A request only asks the display to change; the state itself moves when the
// display (or the OS, out of band) reports the change. That single observed
// transition is what notifies the host window.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FullscreenState {
    Windowed,
    Fullscreen,
}

impl FullscreenState {
    pub fn from_active(active: bool) -> Self {
        if active {
            FullscreenState::Fullscreen
        } else {
            FullscreenState::Windowed
        }
    }

    pub fn is_fullscreen(self) -> bool {
        self == FullscreenState::Fullscreen
    }

    pub fn toggled(self) -> Self {
        match self {
            FullscreenState::Windowed => FullscreenState::Fullscreen,
            FullscreenState::Fullscreen => FullscreenState::Windowed,
        }
    }
}

/// Side effect the caller must perform after a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenEffect {
    /// Ask the display surface to enter or leave fullscreen
    RequestDisplay(FullscreenState),
    /// Tell the host window chrome about the new state
    NotifyHost(FullscreenState),
}

#[derive(Debug, Clone)]
pub struct FullscreenMachine {
    state: FullscreenState,
    pending: Option<FullscreenState>,
}

impl Default for FullscreenMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl FullscreenMachine {
    pub fn new() -> Self {
        Self {
            state: FullscreenState::Windowed,
            pending: None,
        }
    }

    pub fn state(&self) -> FullscreenState {
        self.state
    }

    pub fn pending(&self) -> Option<FullscreenState> {
        self.pending
    }

    /// State the display is heading to: the pending request if any.
    fn target(&self) -> FullscreenState {
        self.pending.unwrap_or(self.state)
    }

    pub fn request(&mut self, target: FullscreenState) -> Option<FullscreenEffect> {
        if self.target() == target {
            return None;
        }
        self.pending = Some(target);
        Some(FullscreenEffect::RequestDisplay(target))
    }

    pub fn toggle(&mut self) -> Option<FullscreenEffect> {
        self.request(self.target().toggled())
    }

    /// The display refused or failed the last request.
    pub fn request_failed(&mut self) {
        self.pending = None;
    }

    /// A fullscreen-change notification from the display or the OS.
    pub fn observe(&mut self, actual: FullscreenState) -> Option<FullscreenEffect> {
        self.pending = None;
        if self.state == actual {
            return None;
        }
        self.state = actual;
        Some(FullscreenEffect::NotifyHost(actual))
    }
}
