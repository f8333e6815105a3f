use serde::{Deserialize, Serialize};

/// Lifecycle state of a player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    /// Nothing loaded
    #[default]
    Idle,
    /// Backend is loading content
    Loading,
    /// Player is playing
    Playing,
    /// Player is paused
    Paused,
    /// Content loaded, not playing
    Stopped,
    /// Suspended, remembers the state to restore
    Frozen,
    /// Player encountered an error
    Errored,
}

impl PlaybackState {
    /// Get the name of this playback state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
            Self::Frozen => "frozen",
            Self::Errored => "errored",
        }
    }

    /// Check if the player is actively playing
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Check if the player can start or resume playback
    #[inline]
    pub fn can_play(&self) -> bool {
        matches!(self, Self::Stopped | Self::Paused)
    }

    /// Check if the player can be paused
    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Check if the player can be stopped
    #[inline]
    pub fn can_stop(&self) -> bool {
        matches!(self, Self::Playing | Self::Paused)
    }

    /// Check if the player can be frozen
    #[inline]
    pub fn can_freeze(&self) -> bool {
        !matches!(self, Self::Errored | Self::Frozen)
    }
}

impl std::fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for PlaybackState {
    fn from(s: &str) -> Self {
        match s {
            "loading" => Self::Loading,
            "playing" => Self::Playing,
            "paused" => Self::Paused,
            "stopped" => Self::Stopped,
            "frozen" => Self::Frozen,
            "errored" | "error" => Self::Errored,
            _ => Self::Idle,
        }
    }
}
