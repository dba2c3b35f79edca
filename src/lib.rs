// src/lib.rs
// Kisara - playback session controller for the anime desktop shell
//
// Architecture:
// - Domain: pure state machines and session data, no IO
// - Events: typed bus with scoped subscriptions, raw and normalized media events
// - Integrations: the backend, the media surface and the host window as traits
// - Services: the session components and the controller that owns them
// - Application: Tauri commands over the controller (feature "desktop")

// ============================================================================
// CORE
// ============================================================================

pub mod config;
pub mod domain;
pub mod error;
pub mod events;
pub mod integrations;
pub mod services;

// ============================================================================
// DESKTOP SHELL
// ============================================================================

#[cfg(feature = "desktop")]
pub mod application;

// ============================================================================
// PUBLIC API - Configuration
// ============================================================================

pub use config::{BackendConfig, PlayerConfig};

// ============================================================================
// PUBLIC API - Domain
// ============================================================================

pub use domain::{
    EpisodeId,
    FocusContext,
    FullscreenState,
    OverlayState,
    PlaybackState,
    SessionHandle,
    SessionId,
    SessionSeed,
    ShortcutAction,
    SubtitleTrack,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{PlayerError, PlayerResult, SessionResolutionError};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{EventBus, MediaEvent, Subscription, SurfaceEvent};

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{HostWindow, HttpBackend, MediaSurface, PlayInfo, PlaybackBackend};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ControllerHandle,
    PlaybackController,
    PlayerSnapshot,
    PointerInput,
    SessionSnapshot,
    TransportAction,
    ViewState,
};
