//! Event types and listener handles for player notifications

use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::ids::PlayerId;
use crate::player::PlaybackState;

/// Kinds of player events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Animation loaded and first frame rendered
    Load,
    /// Playback started or resumed
    Play,
    /// Playback paused
    Pause,
    /// Playback stopped
    Stop,
    /// End of the timeline reached (once per boundary in loop/bounce)
    Complete,
    /// A new frame was drawn
    Frame,
    /// Loading or rendering failed
    Error,
    /// Playback suspended without losing position
    Freeze,
    /// Playback restored after a freeze
    Unfreeze,
}

impl EventKind {
    /// Every kind, in declaration order
    pub const ALL: [EventKind; 9] = [
        Self::Load,
        Self::Play,
        Self::Pause,
        Self::Stop,
        Self::Complete,
        Self::Frame,
        Self::Error,
        Self::Freeze,
        Self::Unfreeze,
    ];

    /// Get the name of this event kind
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Stop => "stop",
            Self::Complete => "complete",
            Self::Frame => "frame",
            Self::Error => "error",
            Self::Freeze => "freeze",
            Self::Unfreeze => "unfreeze",
        }
    }

    /// Check if this is a lifecycle transition event
    #[inline]
    pub fn is_transition(&self) -> bool {
        !matches!(self, Self::Frame | Self::Error)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown event kind '{s}'"))
    }
}

/// Kind-specific event data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    None,
    Load {
        duration: f64,
        fps: f64,
        total_frames: u32,
    },
    Frame {
        fraction: f64,
        frame: u32,
    },
    Complete {
        fraction: f64,
        /// Boundaries crossed since play started
        loops: u64,
    },
    Freeze {
        prior: PlaybackState,
    },
    Unfreeze {
        restored: PlaybackState,
    },
    Error {
        category: String,
        message: String,
    },
}

/// A dispatched player event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerEvent {
    pub kind: EventKind,
    pub player: PlayerId,
    /// Time source reading when the event was raised (seconds)
    pub timestamp: f64,
    pub payload: EventPayload,
}

impl PlayerEvent {
    /// Create an event without payload
    pub fn new(kind: EventKind, player: PlayerId, timestamp: f64) -> Self {
        Self {
            kind,
            player,
            timestamp,
            payload: EventPayload::None,
        }
    }

    #[inline]
    pub fn with_payload(mut self, payload: EventPayload) -> Self {
        self.payload = payload;
        self
    }

    /// Create a load event
    pub fn load(
        player: PlayerId,
        timestamp: f64,
        duration: f64,
        fps: f64,
        total_frames: u32,
    ) -> Self {
        Self::new(EventKind::Load, player, timestamp).with_payload(EventPayload::Load {
            duration,
            fps,
            total_frames,
        })
    }

    /// Create a frame event
    pub fn frame(player: PlayerId, timestamp: f64, fraction: f64, frame: u32) -> Self {
        Self::new(EventKind::Frame, player, timestamp)
            .with_payload(EventPayload::Frame { fraction, frame })
    }

    /// Create a completion milestone
    pub fn complete(player: PlayerId, timestamp: f64, fraction: f64, loops: u64) -> Self {
        Self::new(EventKind::Complete, player, timestamp)
            .with_payload(EventPayload::Complete { fraction, loops })
    }

    /// Create an error event from a playback error
    pub fn error(player: PlayerId, timestamp: f64, error: &crate::PlaybackError) -> Self {
        Self::new(EventKind::Error, player, timestamp).with_payload(EventPayload::Error {
            category: error.category().to_string(),
            message: error.to_string(),
        })
    }

    /// Fraction carried by frame/complete events
    pub fn fraction(&self) -> Option<f64> {
        match self.payload {
            EventPayload::Frame { fraction, .. } | EventPayload::Complete { fraction, .. } => {
                Some(fraction)
            }
            _ => None,
        }
    }

    /// Error message carried by error events
    pub fn error_message(&self) -> Option<&str> {
        match &self.payload {
            EventPayload::Error { message, .. } => Some(message),
            _ => None,
        }
    }
}

type ListenerFn = dyn Fn(&PlayerEvent) -> anyhow::Result<()>;

/// Shared handle to an event callback.
///
/// Clones of a handle are the same listener: registering a clone twice for one
/// kind keeps a single entry, and any clone can be used to remove it.
#[derive(Clone)]
pub struct Listener {
    inner: Rc<ListenerFn>,
}

impl Listener {
    /// Wrap a fallible callback. An `Err` is reported as a listener fault.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&PlayerEvent) -> anyhow::Result<()> + 'static,
    {
        Self {
            inner: Rc::new(callback),
        }
    }

    /// Wrap a callback that cannot fail
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&PlayerEvent) + 'static,
    {
        Self::new(move |event| {
            callback(event);
            Ok(())
        })
    }

    /// Identity of the underlying callback allocation
    #[inline]
    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.inner) as *const () as usize
    }

    #[inline]
    pub(crate) fn call(&self, event: &PlayerEvent) -> anyhow::Result<()> {
        (self.inner)(event)
    }
}

impl PartialEq for Listener {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Listener {}

impl std::fmt::Debug for Listener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listener")
            .field("key", &format_args!("{:#x}", self.key()))
            .finish()
    }
}
