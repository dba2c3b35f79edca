// src/config/mod.rs
//
// Player configuration.
//
// Every field has a default so a partial (or missing) file is valid.
// Tunables are stored in plain numbers and exposed as Durations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, PlayerResult};

const CONFIG_DIR_NAME: &str = "kisara";
const CONFIG_FILE_NAME: &str = "player.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:7878".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Minimum interval between two throttled progress writes.
    pub progress_throttle_ms: u64,
    /// Idle time before fullscreen controls hide.
    pub overlay_hide_ms: u64,
    /// Pointer travel (in px) that counts as activity.
    pub pointer_move_threshold_px: f64,
    /// How far before the saved position playback resumes.
    pub resume_rewind_secs: f64,
    /// Step used by the arrow-key shortcuts.
    pub seek_step_secs: f64,
    /// Upper bound on waiting for the final progress write.
    pub final_persist_timeout_ms: u64,
    /// Start playing once the resume seek is issued.
    pub autoplay: bool,
    pub backend: BackendConfig,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            progress_throttle_ms: 500,
            overlay_hide_ms: 5000,
            pointer_move_threshold_px: 5.0,
            resume_rewind_secs: 5.0,
            seek_step_secs: 10.0,
            final_persist_timeout_ms: 2000,
            autoplay: true,
            backend: BackendConfig::default(),
        }
    }
}

impl PlayerConfig {
    /// `<config dir>/kisara/player.json`, when the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn load(path: &Path) -> PlayerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: PlayerConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`PlayerConfig::load`], but a missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> PlayerResult<Self> {
        match std::fs::read_to_string(path) {
            Ok(raw) => {
                let config: PlayerConfig = serde_json::from_str(&raw)?;
                config.validate()?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No player config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn validate(&self) -> PlayerResult<()> {
        if self.progress_throttle_ms == 0 {
            return Err(PlayerError::Config(
                "progress_throttle_ms must be greater than zero".to_string(),
            ));
        }
        if self.overlay_hide_ms == 0 {
            return Err(PlayerError::Config(
                "overlay_hide_ms must be greater than zero".to_string(),
            ));
        }
        if !self.pointer_move_threshold_px.is_finite() || self.pointer_move_threshold_px < 0.0 {
            return Err(PlayerError::Config(
                "pointer_move_threshold_px must be a non-negative number".to_string(),
            ));
        }
        if !self.resume_rewind_secs.is_finite() || self.resume_rewind_secs < 0.0 {
            return Err(PlayerError::Config(
                "resume_rewind_secs must be a non-negative number".to_string(),
            ));
        }
        if !self.seek_step_secs.is_finite() || self.seek_step_secs <= 0.0 {
            return Err(PlayerError::Config(
                "seek_step_secs must be a positive number".to_string(),
            ));
        }
        reqwest::Url::parse(&self.backend.base_url).map_err(|e| {
            PlayerError::Config(format!("invalid backend url '{}': {}", self.backend.base_url, e))
        })?;
        Ok(())
    }

    pub fn progress_throttle(&self) -> Duration {
        Duration::from_millis(self.progress_throttle_ms)
    }

    pub fn overlay_hide_delay(&self) -> Duration {
        Duration::from_millis(self.overlay_hide_ms)
    }

    pub fn final_persist_timeout(&self) -> Duration {
        Duration::from_millis(self.final_persist_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.progress_throttle(), Duration::from_millis(500));
        assert_eq!(config.overlay_hide_delay(), Duration::from_millis(5000));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "overlay_hide_ms": 3000, "backend": {{ "base_url": "http://media.lan:9000" }} }}"#).unwrap();

        let config = PlayerConfig::load(file.path()).unwrap();
        assert_eq!(config.overlay_hide_ms, 3000);
        assert_eq!(config.progress_throttle_ms, 500);
        assert_eq!(config.backend.base_url, "http://media.lan:9000");
        assert_eq!(config.backend.request_timeout_ms, 10_000);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PlayerConfig::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, PlayerConfig::default());
    }

    #[test]
    fn test_load_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PlayerConfig::load(&dir.path().join("absent.json"));
        assert!(matches!(result, Err(PlayerError::Io(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let result = PlayerConfig::load_or_default(file.path());
        assert!(matches!(result, Err(PlayerError::Serialization(_))));
    }

    #[test]
    fn test_zero_throttle_rejected() {
        let config = PlayerConfig {
            progress_throttle_ms: 0,
            ..PlayerConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlayerError::Config(_))));
    }

    #[test]
    fn test_bad_backend_url_rejected() {
        let config = PlayerConfig {
            backend: BackendConfig {
                base_url: "not a url".to_string(),
                ..BackendConfig::default()
            },
            ..PlayerConfig::default()
        };
        assert!(matches!(config.validate(), Err(PlayerError::Config(_))));
    }
}
