//! Vectorplay Core
//!
//! Playback orchestration for vector animation players: a per-kind event bus,
//! a host-driven time source, the time-to-progress clock, the damage-based
//! render gate and the player state machine that ties them together.
//! Rasterization is provided by the host through the traits in [`render`].

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod event_bus;
pub mod gate;
pub mod ids;
pub mod player;
pub mod render;
pub mod surface;
pub mod time;

// Re-export common types for convenience
pub use clock::{LoopMode, PlaybackClock, Progress, Session};
pub use config::PlayerConfig;
pub use error::PlaybackError;
pub use event::{EventKind, EventPayload, Listener, PlayerEvent};
pub use event_bus::EventBus;
pub use gate::{DamageRect, GateDecision, RenderGate, SkipReason};
pub use ids::PlayerId;
pub use player::{PlaybackState, PlayerSnapshot, PlayerStateMachine, TickOutcome};
pub use render::{
    AnimationBackend, AnimationSource, Color, DrawContext, FileType, Rect, RenderableAnimation,
    Surface,
};
pub use surface::{BufferSurface, PixelBuffer};
pub use time::{ManualTimeSource, MonotonicReader, SystemTimeSource, TickHandle, TimeSource};

/// Playback result type
pub type Result<T> = core::result::Result<T, PlaybackError>;
