// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps player errors → user-facing responses
// - Provides consistent error format for UI
// - Logs what the UI does not get to see

use log::error;
use serde::{Deserialize, Serialize};

use crate::error::{PlayerError, SessionResolutionError};

/// Standard error response for UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Play session does not exist
    NotFound,

    /// Backend could not be reached or answered badly
    BackendUnavailable,

    /// Input rejected (unknown track, no session, bad config)
    Validation,

    /// Media surface, host window or persistence trouble
    Playback,

    /// Other/unknown error
    Internal,
}

impl ErrorResponse {
    pub fn from_player_error(error: PlayerError) -> Self {
        match error {
            PlayerError::Resolution(SessionResolutionError::NotFound(handle)) => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: "Play session not found".to_string(),
                details: Some(handle),
            },

            PlayerError::Resolution(SessionResolutionError::BackendUnavailable(reason)) => Self {
                success: false,
                error_type: ErrorType::BackendUnavailable,
                message: "Backend unavailable".to_string(),
                details: Some(reason),
            },

            e @ (PlayerError::InvalidTrack(_)
            | PlayerError::NoActiveSession
            | PlayerError::LoadSuperseded(_)
            | PlayerError::Config(_)) => Self::validation(e.to_string()),

            e @ (PlayerError::MediaDecode(_)
            | PlayerError::Surface(_)
            | PlayerError::Host(_)
            | PlayerError::Persistence(_)) => Self {
                success: false,
                error_type: ErrorType::Playback,
                message: e.to_string(),
                details: None,
            },

            e @ (PlayerError::ControllerStopped
            | PlayerError::Io(_)
            | PlayerError::Serialization(_)) => {
                error!("Internal player error: {:?}", e);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Internal error".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }
        }
    }

    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, PlayerError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_player_error(e);
            serde_json::to_string(&error_response).unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}
