//! Time-to-progress mapping for one loaded animation.
//!
//! The clock is a pure function of the session and a wall-clock reading. It
//! works on the *played distance*: how many timeline lengths have been covered
//! since the session started, always non-negative. Loop policies fold that
//! distance into a fraction, and a negative rate reflects the result (`1 - f`).

use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// What happens when the timeline end is reached
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Play once and stop at the end
    #[default]
    None,
    /// Wrap back to the start
    Loop,
    /// Reverse direction at each end
    Bounce,
}

impl LoopMode {
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Loop => "loop",
            Self::Bounce => "bounce",
        }
    }

    /// Check if this mode keeps playing past the timeline end
    #[inline]
    pub fn repeats(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Timing parameters of one playback session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    start_wall_time: f64,
    duration: f64,
    fps: f64,
    rate: f64,
    loop_mode: LoopMode,
    /// Distance already covered at `start_wall_time`
    origin: f64,
}

impl Session {
    /// Create a session starting at `start_wall_time`.
    /// Fails with `InvalidSession` unless duration and fps are finite and positive.
    pub fn new(start_wall_time: f64, duration: f64, fps: f64) -> Result<Self, PlaybackError> {
        if !(duration.is_finite() && duration > 0.0) {
            return Err(PlaybackError::InvalidSession {
                duration,
                fps,
                reason: "duration must be a positive number of seconds".to_string(),
            });
        }
        if !(fps.is_finite() && fps > 0.0) {
            return Err(PlaybackError::InvalidSession {
                duration,
                fps,
                reason: "fps must be positive".to_string(),
            });
        }
        Ok(Self {
            start_wall_time,
            duration,
            fps,
            rate: 1.0,
            loop_mode: LoopMode::None,
            origin: 0.0,
        })
    }

    #[inline]
    pub fn with_rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    #[inline]
    pub fn with_loop_mode(mut self, loop_mode: LoopMode) -> Self {
        self.loop_mode = loop_mode;
        self
    }

    #[inline]
    pub fn start_wall_time(&self) -> f64 {
        self.start_wall_time
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    #[inline]
    pub fn fps(&self) -> f64 {
        self.fps
    }

    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    #[inline]
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    #[inline]
    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// Check if the fraction runs from 1 towards 0
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.rate < 0.0
    }
}

/// Result of sampling the clock
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    /// Position on the timeline in [0, 1]
    pub fraction: f64,
    /// Timeline boundaries crossed since the session origin
    pub cycle: u64,
    /// `cycle` moved past the caller's previous cycle
    pub completed: bool,
    /// Played distance in timeline lengths
    pub distance: f64,
}

/// Maps wall-clock time to progress for one session
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaybackClock {
    session: Session,
}

impl PlaybackClock {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    #[inline]
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Played distance at `now`; time before the session start counts as zero
    pub fn distance(&self, now: f64) -> f64 {
        let elapsed = (now - self.session.start_wall_time).max(0.0);
        self.session.origin + elapsed * self.session.rate.abs() / self.session.duration
    }

    /// Fold a played distance into a fraction under the session's loop mode
    pub fn fraction_at(&self, distance: f64) -> f64 {
        let forward = match self.session.loop_mode {
            LoopMode::None => distance.clamp(0.0, 1.0),
            LoopMode::Loop => distance - distance.floor(),
            LoopMode::Bounce => {
                let k = distance.floor();
                let frac = distance - k;
                if k % 2.0 == 0.0 {
                    frac
                } else {
                    1.0 - frac
                }
            }
        };
        if self.session.is_reversed() {
            1.0 - forward
        } else {
            forward
        }
    }

    /// Boundaries crossed at `distance`. `none` mode has a single boundary.
    pub fn cycle_at(&self, distance: f64) -> u64 {
        match self.session.loop_mode {
            LoopMode::None => u64::from(distance >= 1.0),
            LoopMode::Loop | LoopMode::Bounce => distance.max(0.0).floor() as u64,
        }
    }

    /// Sample the clock at `now`, reporting completion relative to `previous_cycle`
    pub fn progress(&self, now: f64, previous_cycle: u64) -> Progress {
        let distance = self.distance(now);
        let cycle = self.cycle_at(distance);
        Progress {
            fraction: self.fraction_at(distance),
            cycle,
            completed: cycle > previous_cycle,
            distance,
        }
    }

    /// Distance within the first cycle that shows `fraction`
    pub fn distance_for(&self, fraction: f64) -> f64 {
        if self.session.is_reversed() {
            1.0 - fraction
        } else {
            fraction
        }
    }

    /// Restart counting from `now`, with `distance` already covered
    pub fn rebase(&mut self, now: f64, distance: f64) {
        self.session.start_wall_time = now;
        self.session.origin = distance.max(0.0);
    }

    /// Move the start forward by an interval during which time must not count
    pub fn shift(&mut self, seconds: f64) {
        if seconds > 0.0 {
            self.session.start_wall_time += seconds;
        }
    }

    /// Change the rate at `now` without moving the displayed fraction.
    /// Flipping direction restarts cycle counting from the current position.
    pub fn set_rate(&mut self, now: f64, rate: f64) {
        let distance = self.distance(now);
        if (rate < 0.0) == self.session.is_reversed() {
            self.session.rate = rate;
            self.rebase(now, distance);
        } else {
            let fraction = self.fraction_at(distance);
            self.session.rate = rate;
            let restart = self.distance_for(fraction);
            self.rebase(now, restart);
        }
    }

    /// Change the loop mode at `now`, keeping the displayed fraction
    pub fn set_loop_mode(&mut self, now: f64, loop_mode: LoopMode) {
        let fraction = self.fraction_at(self.distance(now));
        self.session.loop_mode = loop_mode;
        let restart = self.distance_for(fraction);
        self.rebase(now, restart);
    }

    /// Frame index shown at `fraction`
    #[inline]
    pub fn frame_index(&self, fraction: f64) -> u32 {
        (fraction * self.session.duration * self.session.fps).floor().max(0.0) as u32
    }

    /// Frame count of the timeline
    #[inline]
    pub fn total_frames(&self) -> u32 {
        (self.session.duration * self.session.fps).round() as u32
    }
}
