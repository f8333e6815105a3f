//! Player configuration.

use serde::{Deserialize, Serialize};

use crate::clock::LoopMode;
use crate::error::PlaybackError;
use crate::render::{Color, FileType};

fn default_rate() -> f64 {
    1.0
}

fn default_width() -> u32 {
    300
}

fn default_height() -> u32 {
    300
}

/// Settings a player starts with. Every field has a default, so a partial JSON
/// object is enough.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Playback rate; negative plays backwards
    #[serde(default = "default_rate")]
    pub rate: f64,
    pub loop_mode: LoopMode,
    /// Plays before stopping in loop/bounce mode (`None` = forever)
    pub loop_count: Option<u32>,
    /// Start playing as soon as a load succeeds
    pub autoplay: bool,
    pub background: Color,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    /// Content type passed to the backend on load
    pub file_type: FileType,
    /// Seconds to hold the boundary frame between loop/bounce passes
    pub intermission: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            loop_mode: LoopMode::None,
            loop_count: None,
            autoplay: false,
            background: Color::TRANSPARENT,
            width: default_width(),
            height: default_height(),
            file_type: FileType::Json,
            intermission: 0.0,
        }
    }
}

impl PlayerConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, PlaybackError> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlaybackError> {
        if !self.rate.is_finite() {
            return Err(PlaybackError::Config {
                reason: format!("rate must be finite, got {}", self.rate),
            });
        }
        if self.loop_count == Some(0) {
            return Err(PlaybackError::Config {
                reason: "loop_count must be at least 1".to_string(),
            });
        }
        if !(self.intermission.is_finite() && self.intermission >= 0.0) {
            return Err(PlaybackError::Config {
                reason: format!("intermission must be >= 0 seconds, got {}", self.intermission),
            });
        }
        if self.width == 0 || self.height == 0 {
            return Err(PlaybackError::Config {
                reason: format!("surface size {}x{} is empty", self.width, self.height),
            });
        }
        Ok(())
    }

    /// Boundaries a repeating mode crosses before it stops, if limited
    pub fn boundary_limit(&self) -> Option<u64> {
        let count = u64::from(self.loop_count?);
        match self.loop_mode {
            LoopMode::None => None,
            LoopMode::Loop => Some(count),
            LoopMode::Bounce => Some(count * 2),
        }
    }
}
