// src/domain/shortcut.rs

use serde::{Deserialize, Serialize};

/// Keys bound on the playback view, named after `KeyboardEvent.key`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutKey {
    Space,
    F,
    ArrowLeft,
    ArrowRight,
}

impl ShortcutKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            " " => Some(ShortcutKey::Space),
            "f" => Some(ShortcutKey::F),
            "ArrowLeft" => Some(ShortcutKey::ArrowLeft),
            "ArrowRight" => Some(ShortcutKey::ArrowRight),
            _ => None,
        }
    }

    pub fn action(self, seek_step_secs: f64) -> ShortcutAction {
        match self {
            ShortcutKey::Space => ShortcutAction::TogglePlay,
            ShortcutKey::F => ShortcutAction::ToggleFullscreen,
            ShortcutKey::ArrowLeft => ShortcutAction::SeekRelative(-seek_step_secs),
            ShortcutKey::ArrowRight => ShortcutAction::SeekRelative(seek_step_secs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "delta", rename_all = "snake_case")]
pub enum ShortcutAction {
    TogglePlay,
    ToggleFullscreen,
    SeekRelative(f64),
}

/// Where keyboard focus currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusContext {
    /// The playback view is the active view of the window
    pub view_active: bool,
    /// A text field somewhere in the window has focus
    pub text_input_focused: bool,
}

impl FocusContext {
    pub fn accepts_shortcuts(&self) -> bool {
        self.view_active && !self.text_input_focused
    }
}
