//! The player: lifecycle state, the active clock, and the tick body.
//!
//! Ticks are host driven. Every operation that leaves `playing` cancels the
//! pending tick before it changes state, and a new tick is only requested at
//! the end of a tick that left the player playing.

use log::{debug, error, trace, warn};

use crate::clock::{LoopMode, PlaybackClock, Session};
use crate::config::PlayerConfig;
use crate::error::PlaybackError;
use crate::event::{EventKind, EventPayload, Listener, PlayerEvent};
use crate::event_bus::EventBus;
use crate::gate::{GateDecision, RenderGate, SkipReason};
use crate::ids::PlayerId;
use crate::player::playback_state::PlaybackState;
use crate::player::snapshot::PlayerSnapshot;
use crate::render::{AnimationBackend, AnimationSource, Color, RenderableAnimation, Surface};
use crate::time::{MonotonicReader, TickHandle, TimeSource};

/// What a call to [`PlayerStateMachine::tick`] did
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// Not the pending tick; nothing happened
    Stale,
    Drawn { fraction: f64 },
    Skipped { fraction: f64, reason: SkipReason },
    /// Playback reached its end and the player stopped
    Finished { fraction: f64 },
    /// The renderer failed and the player is errored
    Faulted,
}

/// Timeline of the loaded animation
#[derive(Copy, Clone, Debug)]
struct Timing {
    duration: f64,
    fps: f64,
}

impl Timing {
    fn frame_index(&self, fraction: f64) -> u32 {
        (fraction * self.duration * self.fps).floor().max(0.0) as u32
    }

    fn total_frames(&self) -> u32 {
        (self.duration * self.fps).round() as u32
    }
}

/// One animation player instance
pub struct PlayerStateMachine {
    id: PlayerId,
    config: PlayerConfig,
    state: PlaybackState,
    bus: EventBus,
    backend: Box<dyn AnimationBackend>,
    surface: Box<dyn Surface>,
    time: Box<dyn TimeSource>,
    reader: MonotonicReader,
    handle: Option<Box<dyn RenderableAnimation>>,
    /// `None` for static content
    timing: Option<Timing>,
    clock: Option<PlaybackClock>,
    gate: RenderGate,
    /// Position the handle was last seeked to
    fraction: f64,
    /// Fraction the gate compares against; `None` until something was shown
    shown: Option<f64>,
    /// Clock cycle already accounted for
    cycle: u64,
    /// Completion milestones since play started
    loops: u64,
    pending: Option<TickHandle>,
    /// Wall time an intermission between passes ends
    hold_until: Option<f64>,
    frozen_from: Option<PlaybackState>,
    frozen_at: Option<f64>,
    frozen_by_visibility: bool,
    visible: bool,
    disposed: bool,
}

impl PlayerStateMachine {
    /// Create an idle player. Fails if `config` does not validate.
    pub fn new(
        config: PlayerConfig,
        backend: Box<dyn AnimationBackend>,
        surface: Box<dyn Surface>,
        time: Box<dyn TimeSource>,
    ) -> Result<Self, PlaybackError> {
        config.validate()?;
        Ok(Self {
            id: PlayerId::new(),
            config,
            state: PlaybackState::Idle,
            bus: EventBus::new(),
            backend,
            surface,
            time,
            reader: MonotonicReader::new(),
            handle: None,
            timing: None,
            clock: None,
            gate: RenderGate::new(),
            fraction: 0.0,
            shown: None,
            cycle: 0,
            loops: 0,
            pending: None,
            hold_until: None,
            frozen_from: None,
            frozen_at: None,
            frozen_by_visibility: false,
            visible: true,
            disposed: false,
        })
    }

    #[inline]
    pub fn id(&self) -> PlayerId {
        self.id
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    /// Handle to the player's event bus
    #[inline]
    pub fn events(&self) -> EventBus {
        self.bus.clone()
    }

    /// Tick the player is waiting for, if any
    #[inline]
    pub fn pending_tick(&self) -> Option<TickHandle> {
        self.pending
    }

    /// Current progress fraction
    #[inline]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn current_frame(&self) -> u32 {
        self.timing.map_or(0, |t| t.frame_index(self.fraction))
    }

    /// Frame count of the loaded content; static content counts as one frame
    pub fn total_frames(&self) -> u32 {
        match (&self.handle, self.timing) {
            (_, Some(timing)) => timing.total_frames(),
            (Some(_), None) => 1,
            (None, None) => 0,
        }
    }

    #[inline]
    pub fn is_loaded(&self) -> bool {
        self.handle.is_some()
    }

    /// Draw statistics of the render gate
    #[inline]
    pub fn gate(&self) -> &RenderGate {
        &self.gate
    }

    pub fn add_event_listener(&self, kind: EventKind, listener: &Listener) {
        self.bus.on(kind, listener);
    }

    /// Remove `listener`, or all listeners of `kind` when `None`
    pub fn remove_event_listener(&self, kind: EventKind, listener: Option<&Listener>) {
        self.bus.off(kind, listener);
    }

    /// Load new content, replacing whatever was loaded.
    ///
    /// Failures do not surface as `Err`: the player becomes errored, an
    /// `error` event is emitted and `false` is returned.
    pub fn load(&mut self, source: AnimationSource) -> bool {
        if self.disposed {
            warn!("player {}: load after dispose ignored", self.id);
            return false;
        }
        self.cancel_pending();
        self.release_handle();
        self.frozen_from = None;
        self.frozen_at = None;
        self.frozen_by_visibility = false;
        self.set_state(PlaybackState::Loading);

        let file_type = self.config.file_type;
        debug!(
            "player {}: loading {} as {}",
            self.id,
            source.describe(),
            file_type.name()
        );
        let loaded = self
            .backend
            .load(&source, file_type, self.config.width, self.config.height);
        let mut handle = match loaded {
            Ok(handle) => handle,
            Err(err) => {
                self.fail(err);
                return false;
            }
        };

        let timing = if file_type.is_animated() {
            match Self::validate_timing(handle.as_ref()) {
                Ok(timing) => Some(timing),
                Err(err) => {
                    handle.dispose();
                    self.fail(err);
                    return false;
                }
            }
        } else {
            None
        };

        let (duration, fps) = (handle.duration(), handle.fps());
        self.handle = Some(handle);
        self.timing = timing;

        let first = match self.present(0.0) {
            Ok(decision) => decision,
            Err(err) => {
                self.release_handle();
                self.fail(err);
                return false;
            }
        };
        self.set_state(PlaybackState::Stopped);

        let now = self.now();
        let total_frames = self.total_frames();
        self.emit(PlayerEvent::load(self.id, now, duration, fps, total_frames));
        if first.should_draw() {
            self.emit_frame(0.0);
        }

        if self.config.autoplay && file_type.is_animated() {
            if let Err(err) = self.play() {
                warn!("player {}: autoplay failed: {err}", self.id);
            }
        }
        true
    }

    /// Dispose the loaded content and return to idle. Listeners stay registered.
    pub fn unload(&mut self) {
        self.cancel_pending();
        self.release_handle();
        self.frozen_from = None;
        self.frozen_at = None;
        self.frozen_by_visibility = false;
        self.set_state(PlaybackState::Idle);
    }

    /// Start or resume playback
    pub fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.state.can_play() {
            return Err(self.reject("play"));
        }
        let timing = match self.timing {
            Some(timing) => timing,
            None => {
                return Err(PlaybackError::NotAnimated {
                    file_type: self.config.file_type.name().to_string(),
                })
            }
        };

        let now = self.now();
        let resuming = self.state == PlaybackState::Paused;
        match self.clock.as_mut() {
            Some(clock) if resuming => {
                let origin = clock.session().origin();
                clock.rebase(now, origin);
            }
            _ => {
                let session = Session::new(now, timing.duration, timing.fps)?
                    .with_rate(self.config.rate)
                    .with_loop_mode(self.config.loop_mode);
                let mut clock = PlaybackClock::new(session);
                let mut origin = clock.distance_for(self.fraction);
                if origin >= 1.0 {
                    origin = 0.0;
                }
                clock.rebase(now, origin);
                self.cycle = clock.cycle_at(origin);
                self.loops = 0;
                self.clock = Some(clock);
            }
        }

        self.set_state(PlaybackState::Playing);
        self.emit(PlayerEvent::new(EventKind::Play, self.id, now));
        self.schedule();
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        if !self.state.can_pause() {
            return Err(self.reject("pause"));
        }
        self.cancel_pending();
        self.hold_until = None;
        let now = self.now();
        if let Some(clock) = self.clock.as_mut() {
            let distance = clock.distance(now);
            clock.rebase(now, distance);
        }
        self.set_state(PlaybackState::Paused);
        self.emit(PlayerEvent::new(EventKind::Pause, self.id, now));
        Ok(())
    }

    /// Stop playback and show the first frame again
    pub fn stop(&mut self) -> Result<(), PlaybackError> {
        if !self.state.can_stop() {
            return Err(self.reject("stop"));
        }
        self.cancel_pending();
        self.clock = None;
        self.hold_until = None;
        self.cycle = 0;
        self.set_state(PlaybackState::Stopped);
        let now = self.now();
        self.emit(PlayerEvent::new(EventKind::Stop, self.id, now));
        if let Err(err) = self.show(0.0) {
            self.fail(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Suspend the player, remembering its state
    pub fn freeze(&mut self) -> Result<(), PlaybackError> {
        if !self.state.can_freeze() {
            return Err(self.reject("freeze"));
        }
        self.cancel_pending();
        let now = self.now();
        let prior = self.state;
        self.frozen_from = Some(prior);
        self.frozen_at = Some(now);
        self.set_state(PlaybackState::Frozen);
        self.emit(
            PlayerEvent::new(EventKind::Freeze, self.id, now)
                .with_payload(EventPayload::Freeze { prior }),
        );
        Ok(())
    }

    /// Restore the state active before `freeze`. The frozen interval does not count as played time.
    pub fn unfreeze(&mut self) -> Result<(), PlaybackError> {
        if self.state != PlaybackState::Frozen {
            return Err(self.reject("unfreeze"));
        }
        let now = self.now();
        let restored = self.frozen_from.take().unwrap_or(PlaybackState::Stopped);
        if let Some(at) = self.frozen_at.take() {
            let gap = (now - at).max(0.0);
            if let Some(clock) = self.clock.as_mut() {
                clock.shift(gap);
            }
            if let Some(until) = self.hold_until.as_mut() {
                *until += gap;
            }
        }
        self.frozen_by_visibility = false;
        self.set_state(restored);
        self.emit(
            PlayerEvent::new(EventKind::Unfreeze, self.id, now)
                .with_payload(EventPayload::Unfreeze { restored }),
        );
        if restored == PlaybackState::Playing {
            self.schedule();
        }
        Ok(())
    }

    /// Jump to `fraction` in [0, 1] and show it through the render gate
    pub fn seek_to(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        if !(fraction.is_finite() && (0.0..=1.0).contains(&fraction)) {
            return Err(PlaybackError::InvalidFraction { fraction });
        }
        if !matches!(
            self.state,
            PlaybackState::Playing | PlaybackState::Paused | PlaybackState::Stopped
        ) {
            return Err(self.reject("seek"));
        }
        if self.timing.is_none() {
            return Err(PlaybackError::NotAnimated {
                file_type: self.config.file_type.name().to_string(),
            });
        }

        let now = self.now();
        let at = self.clock_time(now);
        self.hold_until = None;
        if let Some(clock) = self.clock.as_mut() {
            // A scrub during the return pass of bounce keeps playing backwards
            let descending = clock.session().loop_mode() == LoopMode::Bounce
                && clock.cycle_at(clock.distance(at)) % 2 == 1;
            let distance = clock.distance_for(fraction);
            let (distance, cycle) = if descending {
                (2.0 - distance, 1)
            } else {
                (distance, 0)
            };
            clock.rebase(at, distance);
            self.cycle = cycle;
        }
        if let Err(err) = self.show(fraction) {
            self.fail(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Change the playback rate; negative plays backwards
    pub fn set_rate(&mut self, rate: f64) -> Result<(), PlaybackError> {
        if !rate.is_finite() {
            return Err(PlaybackError::Config {
                reason: format!("rate must be finite, got {rate}"),
            });
        }
        let flips = (rate < 0.0) != (self.config.rate < 0.0);
        self.config.rate = rate;
        self.hold_until = None;
        let now = self.now();
        let at = self.clock_time(now);
        if let Some(clock) = self.clock.as_mut() {
            clock.set_rate(at, rate);
            if flips {
                self.cycle = clock.cycle_at(clock.session().origin());
            }
        }
        Ok(())
    }

    pub fn set_loop_mode(&mut self, loop_mode: LoopMode) {
        self.config.loop_mode = loop_mode;
        self.hold_until = None;
        let now = self.now();
        let at = self.clock_time(now);
        if let Some(clock) = self.clock.as_mut() {
            clock.set_loop_mode(at, loop_mode);
            self.cycle = clock.cycle_at(clock.session().origin());
        }
    }

    /// Limit plays in loop/bounce mode; `None` repeats forever
    pub fn set_loop_count(&mut self, loop_count: Option<u32>) -> Result<(), PlaybackError> {
        if loop_count == Some(0) {
            return Err(PlaybackError::Config {
                reason: "loop_count must be at least 1".to_string(),
            });
        }
        self.config.loop_count = loop_count;
        Ok(())
    }

    /// Pause between loop/bounce passes, in seconds
    pub fn set_intermission(&mut self, seconds: f64) -> Result<(), PlaybackError> {
        if !(seconds.is_finite() && seconds >= 0.0) {
            return Err(PlaybackError::Config {
                reason: format!("intermission must be >= 0 seconds, got {seconds}"),
            });
        }
        self.config.intermission = seconds;
        Ok(())
    }

    /// Hiding a playing player freezes it; showing it again undoes that freeze
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;
        if !visible && self.state == PlaybackState::Playing {
            if self.freeze().is_ok() {
                self.frozen_by_visibility = true;
            }
        } else if visible && self.state == PlaybackState::Frozen && self.frozen_by_visibility {
            if let Err(err) = self.unfreeze() {
                warn!("player {}: unfreeze on show failed: {err}", self.id);
            }
        }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Resize the surface. A player that is not playing redraws right away.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), PlaybackError> {
        if width == 0 || height == 0 {
            return Err(PlaybackError::Config {
                reason: format!("surface size {width}x{height} is empty"),
            });
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.resize(width, height);
        self.redraw_if_idle()
    }

    /// Change the clear color. A player that is not playing redraws right away.
    pub fn set_background(&mut self, color: Color) -> Result<(), PlaybackError> {
        self.config.background = color;
        self.redraw_if_idle()
    }

    /// Serializable view of the player
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            player: self.id,
            state: self.state,
            frozen_from: self.frozen_from,
            fraction: self.fraction,
            current_frame: self.current_frame(),
            total_frames: self.total_frames(),
            rate: self.config.rate,
            loop_mode: self.config.loop_mode,
            loop_count: self.config.loop_count,
            loops_completed: self.loops,
            background: self.config.background,
            file_type: self.config.file_type,
            width: self.config.width,
            height: self.config.height,
            visible: self.visible,
            is_loaded: self.is_loaded(),
        }
    }

    /// Tear the player down: cancel ticks, dispose content, drop every listener
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.unload();
        self.bus.clear();
        self.disposed = true;
        debug!("player {}: disposed", self.id);
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Run the tick body for `handle`. Only the pending tick does anything.
    pub fn tick(&mut self, handle: TickHandle) -> TickOutcome {
        if self.pending != Some(handle) || self.state != PlaybackState::Playing {
            warn!("player {}: stale tick {:?} ignored", self.id, handle);
            return TickOutcome::Stale;
        }
        self.pending = None;

        let now = self.now();
        if let Some(until) = self.hold_until {
            if now < until {
                trace!("player {}: holding until {until:.4}s", self.id);
                self.gate.skip_unchanged();
                self.schedule();
                return TickOutcome::Skipped {
                    fraction: self.fraction,
                    reason: SkipReason::Unchanged,
                };
            }
            self.hold_until = None;
        }

        let Some(progress) = self.clock.as_ref().map(|c| c.progress(now, self.cycle)) else {
            warn!("player {}: playing without a clock", self.id);
            return TickOutcome::Stale;
        };
        trace!(
            "player {}: tick at {now:.4}s -> fraction {:.4} (cycle {})",
            self.id,
            progress.fraction,
            progress.cycle
        );

        let mut finished = false;
        // Cycle whose boundary frame is shown instead of the clock's fraction
        let mut boundary = None;
        if progress.completed {
            self.loops += progress.cycle - self.cycle;
            self.cycle = progress.cycle;
            let limit = match self.config.loop_mode {
                // The single boundary of a one-shot play always ends it
                LoopMode::None => Some(self.loops),
                LoopMode::Loop | LoopMode::Bounce => self.config.boundary_limit(),
            };
            if let Some(limit) = limit.filter(|limit| self.loops >= *limit) {
                let overshoot = self.loops - limit;
                self.loops = limit;
                boundary = Some(progress.cycle.saturating_sub(overshoot));
                finished = true;
            } else if self.config.intermission > 0.0 {
                boundary = Some(progress.cycle);
            }
        }

        let fraction = match (boundary, self.clock.as_mut()) {
            (Some(cycle), Some(clock)) => {
                let frame = Self::terminal_fraction(clock, cycle);
                if !finished {
                    let resume = now + self.config.intermission;
                    clock.rebase(resume, cycle as f64);
                    self.hold_until = Some(resume);
                }
                frame
            }
            _ => progress.fraction,
        };
        let decision = match self.show(fraction) {
            Ok(decision) => decision,
            Err(err) => {
                self.fail(err);
                return TickOutcome::Faulted;
            }
        };

        if progress.completed {
            self.emit(PlayerEvent::complete(self.id, now, fraction, self.loops));
        }
        if finished {
            self.clock = None;
            self.set_state(PlaybackState::Stopped);
            self.emit(PlayerEvent::new(EventKind::Stop, self.id, now));
            return TickOutcome::Finished { fraction };
        }

        self.schedule();
        match decision {
            GateDecision::Draw => TickOutcome::Drawn { fraction },
            GateDecision::Skip(reason) => TickOutcome::Skipped { fraction, reason },
        }
    }

    fn validate_timing(handle: &dyn RenderableAnimation) -> Result<Timing, PlaybackError> {
        let (duration, fps) = (handle.duration(), handle.fps());
        let session = Session::new(0.0, duration, fps)?;
        let timing = Timing {
            duration: session.duration(),
            fps: session.fps(),
        };
        if timing.total_frames() < 1 {
            return Err(PlaybackError::InvalidSession {
                duration,
                fps,
                reason: "animation has fewer than one frame".to_string(),
            });
        }
        Ok(timing)
    }

    /// Frame shown at the end of cycle `boundaries`: where playback stops or holds
    fn terminal_fraction(clock: &PlaybackClock, boundaries: u64) -> f64 {
        let session = clock.session();
        let forward = match session.loop_mode() {
            LoopMode::Bounce if boundaries % 2 == 0 => 0.0,
            _ => 1.0,
        };
        if session.is_reversed() {
            1.0 - forward
        } else {
            forward
        }
    }

    /// Wall time the clock should be evaluated at. Paused clocks are parked at
    /// their start; a clock frozen while playing stops at the freeze time.
    fn clock_time(&self, now: f64) -> f64 {
        let Some(clock) = self.clock.as_ref() else {
            return now;
        };
        match (self.state, self.frozen_from, self.frozen_at) {
            (PlaybackState::Playing, _, _) => now,
            (PlaybackState::Frozen, Some(PlaybackState::Playing), Some(at)) => at,
            _ => clock.session().start_wall_time(),
        }
    }

    /// Like [`present`](Self::present), then emit `frame` when something was drawn
    fn show(&mut self, fraction: f64) -> Result<GateDecision, PlaybackError> {
        let decision = self.present(fraction)?;
        if decision.should_draw() {
            self.emit_frame(fraction);
        }
        Ok(decision)
    }

    /// Seek the handle to `fraction` and draw it if the gate allows
    fn present(&mut self, fraction: f64) -> Result<GateDecision, PlaybackError> {
        if !RenderGate::fraction_changed(self.shown, fraction) {
            return Ok(self.gate.skip_unchanged());
        }
        let Some(handle) = self.handle.as_mut() else {
            return Ok(self.gate.skip_unchanged());
        };
        let damage = handle.seek(fraction)?;
        let decision = self.gate.decide(self.shown, fraction, damage);
        self.fraction = fraction;
        self.shown = Some(fraction);
        if decision.should_draw() {
            self.draw()?;
        }
        Ok(decision)
    }

    fn emit_frame(&mut self, fraction: f64) {
        let now = self.now();
        let frame = self.current_frame();
        self.emit(PlayerEvent::frame(self.id, now, fraction, frame));
    }

    /// Clear, render and present the handle's current position
    fn draw(&mut self) -> Result<(), PlaybackError> {
        let Some(handle) = self.handle.as_mut() else {
            return Ok(());
        };
        let bounds = self.surface.bounds();
        self.surface.clear(self.config.background)?;
        handle.render(self.surface.context()?, bounds)?;
        self.surface.present()
    }

    fn redraw_if_idle(&mut self) -> Result<(), PlaybackError> {
        if self.state == PlaybackState::Playing || self.handle.is_none() {
            return Ok(());
        }
        let fraction = self.fraction;
        let result = match self.handle.as_mut() {
            Some(handle) => handle.seek(fraction).map(|_| ()),
            None => Ok(()),
        };
        if let Err(err) = result.and_then(|()| self.draw()) {
            self.fail(err.clone());
            return Err(err);
        }
        Ok(())
    }

    /// Enter `errored` and report `err` to listeners
    fn fail(&mut self, err: PlaybackError) {
        error!("player {}: {err}", self.id);
        self.cancel_pending();
        self.clock = None;
        self.hold_until = None;
        self.set_state(PlaybackState::Errored);
        let now = self.now();
        self.emit(PlayerEvent::error(self.id, now, &err));
    }

    fn reject(&self, operation: &str) -> PlaybackError {
        warn!(
            "player {}: {operation} rejected while {}",
            self.id, self.state
        );
        PlaybackError::InvalidTransition {
            current: self.state,
            operation: operation.to_string(),
        }
    }

    fn set_state(&mut self, next: PlaybackState) {
        if self.state != next {
            debug!("player {}: {} -> {}", self.id, self.state, next);
            self.state = next;
        }
    }

    fn release_handle(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.dispose();
        }
        self.timing = None;
        self.clock = None;
        self.hold_until = None;
        self.gate.reset();
        self.fraction = 0.0;
        self.shown = None;
        self.cycle = 0;
        self.loops = 0;
    }

    fn schedule(&mut self) {
        self.cancel_pending();
        self.pending = Some(self.time.schedule_next_tick());
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.time.cancel_tick(handle);
        }
    }

    #[inline]
    fn now(&mut self) -> f64 {
        self.reader.read(self.time.as_ref())
    }

    #[inline]
    fn emit(&self, event: PlayerEvent) {
        self.bus.emit(&event);
    }
}

impl Drop for PlayerStateMachine {
    fn drop(&mut self) {
        self.cancel_pending();
        if let Some(mut handle) = self.handle.take() {
            handle.dispose();
        }
    }
}

impl std::fmt::Debug for PlayerStateMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerStateMachine")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("fraction", &self.fraction)
            .field("pending", &self.pending)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
