//! Error types for the playback core

use serde::{Deserialize, Serialize};

use crate::event::EventKind;
use crate::player::PlaybackState;

/// Errors raised by the playback core and its collaborators
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlaybackError {
    /// Duration or fps of a loaded animation cannot drive a clock
    #[error("Invalid session: {reason} (duration={duration}s, fps={fps})")]
    InvalidSession {
        duration: f64,
        fps: f64,
        reason: String,
    },

    /// The rendering backend could not parse or acquire the animation
    #[error("Load error: {reason}")]
    LoadError { reason: String },

    /// The rendering backend failed during seek or render
    #[error("Render fault: {reason}")]
    RenderFault { reason: String },

    /// A registered listener failed while an event was dispatched
    #[error("Listener fault while dispatching '{kind}': {reason}")]
    ListenerFault { kind: EventKind, reason: String },

    /// The requested operation is not allowed in the current state
    #[error("Invalid transition: {operation} while {current}")]
    InvalidTransition {
        current: PlaybackState,
        operation: String,
    },

    /// The loaded file type has no timeline
    #[error("Not animated: '{file_type}' content has no timeline")]
    NotAnimated { file_type: String },

    /// A progress fraction outside [0, 1] or not finite
    #[error("Invalid fraction: {fraction}")]
    InvalidFraction { fraction: f64 },

    /// Player configuration could not be read or is inconsistent
    #[error("Config error: {reason}")]
    Config { reason: String },
}

impl PlaybackError {
    /// Create a load error
    pub fn load(reason: impl Into<String>) -> Self {
        Self::LoadError {
            reason: reason.into(),
        }
    }

    /// Create a render fault
    pub fn render(reason: impl Into<String>) -> Self {
        Self::RenderFault {
            reason: reason.into(),
        }
    }

    /// Check if the player can keep going after this error
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ListenerFault { .. }
                | Self::InvalidTransition { .. }
                | Self::NotAnimated { .. }
                | Self::InvalidFraction { .. }
        )
    }

    /// Get error category for logging and `error` event payloads
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidSession { .. } => "session",
            Self::LoadError { .. } => "load",
            Self::RenderFault { .. } => "render",
            Self::ListenerFault { .. } => "listener",
            Self::InvalidTransition { .. } | Self::NotAnimated { .. } => "player",
            Self::InvalidFraction { .. } => "validation",
            Self::Config { .. } => "config",
        }
    }
}

impl From<serde_json::Error> for PlaybackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config {
            reason: err.to_string(),
        }
    }
}
