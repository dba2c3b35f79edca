// src/services/shortcut_dispatcher.rs

use log::debug;

use crate::domain::{FocusContext, ShortcutAction, ShortcutKey};

/// Translates key presses into player actions while the playback view owns
/// the keyboard.
#[derive(Debug, Clone)]
pub struct ShortcutDispatcher {
    focus: FocusContext,
    seek_step_secs: f64,
}

impl ShortcutDispatcher {
    pub fn new(seek_step_secs: f64) -> Self {
        Self {
            focus: FocusContext::default(),
            seek_step_secs,
        }
    }

    pub fn focus(&self) -> FocusContext {
        self.focus
    }

    pub fn set_focus(&mut self, focus: FocusContext) {
        self.focus = focus;
    }

    /// Maps `key` (a `KeyboardEvent.key` value) to an action. Returns `None`
    /// for unbound keys, when no session is active, or when focus is
    /// elsewhere.
    pub fn dispatch(&self, key: &str, session_active: bool) -> Option<ShortcutAction> {
        if !session_active || !self.focus.accepts_shortcuts() {
            return None;
        }
        let action = ShortcutKey::from_key(key)?.action(self.seek_step_secs);
        debug!("Shortcut {:?} -> {:?}", key, action);
        Some(action)
    }
}
