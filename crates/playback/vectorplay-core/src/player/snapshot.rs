use serde::{Deserialize, Serialize};

use crate::clock::LoopMode;
use crate::ids::PlayerId;
use crate::player::playback_state::PlaybackState;
use crate::render::{Color, FileType};

/// Point-in-time view of a player, for hosts that mirror it into UI attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub player: PlayerId,
    pub state: PlaybackState,
    /// State restored by `unfreeze`, while frozen
    pub frozen_from: Option<PlaybackState>,
    pub fraction: f64,
    pub current_frame: u32,
    pub total_frames: u32,
    pub rate: f64,
    pub loop_mode: LoopMode,
    pub loop_count: Option<u32>,
    /// Boundaries crossed since play started
    pub loops_completed: u64,
    pub background: Color,
    pub file_type: FileType,
    pub width: u32,
    pub height: u32,
    pub visible: bool,
    pub is_loaded: bool,
}

impl PlayerSnapshot {
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state == PlaybackState::Paused
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state == PlaybackState::Stopped
    }

    #[inline]
    pub fn is_frozen(&self) -> bool {
        self.state == PlaybackState::Frozen
    }
}
