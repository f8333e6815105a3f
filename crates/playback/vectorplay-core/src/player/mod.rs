//! Player lifecycle: state enum, snapshot, and the state machine driving ticks

pub mod playback_state;
pub mod snapshot;
pub mod state_machine;

pub use playback_state::*;
pub use snapshot::*;
pub use state_machine::*;
