/**
 * Wall-clock reading and tick scheduling.
 * The player never sleeps or spins on its own: it asks a TimeSource for a tick,
 * and the host calls `tick(handle)` back at the next refresh opportunity.
 */
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant};

use log::warn;
use serde::{Deserialize, Serialize};

/// Cancellation handle for one scheduled tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TickHandle(pub u64);

/// Source of timestamps and next-refresh scheduling
pub trait TimeSource {
    /// Current time in seconds. Implementations should not go backwards; readers
    /// clamp with [`MonotonicReader`] anyway.
    fn now(&self) -> f64;

    /// Request a tick at the next refresh opportunity
    fn schedule_next_tick(&self) -> TickHandle;

    /// Cancel a scheduled tick. Cancelling twice, or after it fired, is harmless.
    fn cancel_tick(&self, handle: TickHandle);
}

impl<T: TimeSource + ?Sized> TimeSource for Rc<T> {
    #[inline]
    fn now(&self) -> f64 {
        (**self).now()
    }

    #[inline]
    fn schedule_next_tick(&self) -> TickHandle {
        (**self).schedule_next_tick()
    }

    #[inline]
    fn cancel_tick(&self, handle: TickHandle) {
        (**self).cancel_tick(handle)
    }
}

/// Clamps a time source to non-decreasing readings
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicReader {
    last: Option<f64>,
}

impl MonotonicReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `source`, holding the previous value if the clock regressed
    pub fn read(&mut self, source: &dyn TimeSource) -> f64 {
        let raw = source.now();
        let now = match self.last {
            Some(last) if raw < last || raw.is_nan() => {
                warn!("time source regressed from {last:.6}s to {raw:.6}s, clamping");
                last
            }
            _ => raw,
        };
        self.last = Some(now);
        now
    }

    /// Last value handed out
    #[inline]
    pub fn last(&self) -> Option<f64> {
        self.last
    }
}

/// Deterministic time source driven by hand.
///
/// Time only moves through [`set`](Self::set) / [`advance`](Self::advance) and
/// ticks only fire through [`fire_next`](Self::fire_next).
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now: Cell<f64>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<TickHandle>>,
    cancelled: Cell<u64>,
}

impl ManualTimeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(seconds: f64) -> Self {
        let source = Self::default();
        source.now.set(seconds);
        source
    }

    /// Jump to an absolute time. Going backwards is allowed, to exercise clamping.
    pub fn set(&self, seconds: f64) {
        self.now.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.now.set(self.now.get() + seconds);
    }

    /// Ticks requested and not yet fired or cancelled, oldest first
    pub fn pending_ticks(&self) -> Vec<TickHandle> {
        self.pending.borrow().clone()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.borrow().is_empty()
    }

    /// Pop the oldest pending tick, as a display refresh would
    pub fn fire_next(&self) -> Option<TickHandle> {
        let mut pending = self.pending.borrow_mut();
        if pending.is_empty() {
            None
        } else {
            Some(pending.remove(0))
        }
    }

    /// Number of cancellations that removed a pending tick
    pub fn cancelled_count(&self) -> u64 {
        self.cancelled.get()
    }
}

impl TimeSource for ManualTimeSource {
    fn now(&self) -> f64 {
        self.now.get()
    }

    fn schedule_next_tick(&self) -> TickHandle {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        let handle = TickHandle(id);
        self.pending.borrow_mut().push(handle);
        handle
    }

    fn cancel_tick(&self, handle: TickHandle) {
        let mut pending = self.pending.borrow_mut();
        if let Some(pos) = pending.iter().position(|h| *h == handle) {
            pending.remove(pos);
            self.cancelled.set(self.cancelled.get() + 1);
        }
    }
}

/// Default refresh interval for [`SystemTimeSource`] (60 Hz)
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Time source backed by `std::time::Instant`.
///
/// Scheduling records a deadline one refresh interval ahead; the host polls
/// [`due_ticks`](Self::due_ticks) from its own loop.
#[derive(Debug)]
pub struct SystemTimeSource {
    origin: Instant,
    interval: Duration,
    next_id: Cell<u64>,
    deadlines: RefCell<BTreeMap<TickHandle, f64>>,
}

impl SystemTimeSource {
    pub fn new() -> Self {
        Self::with_interval(DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            origin: Instant::now(),
            interval,
            next_id: Cell::new(0),
            deadlines: RefCell::new(BTreeMap::new()),
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Earliest deadline among scheduled ticks, in seconds since creation
    pub fn next_deadline(&self) -> Option<f64> {
        self.deadlines
            .borrow()
            .values()
            .copied()
            .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.min(d))))
    }

    /// Remove and return every tick whose deadline has passed, oldest first
    pub fn due_ticks(&self) -> Vec<TickHandle> {
        let now = self.now();
        let mut deadlines = self.deadlines.borrow_mut();
        let due: Vec<TickHandle> = deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(handle, _)| *handle)
            .collect();
        for handle in &due {
            deadlines.remove(handle);
        }
        due
    }
}

impl Default for SystemTimeSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }

    fn schedule_next_tick(&self) -> TickHandle {
        let id = self.next_id.get();
        self.next_id.set(id.wrapping_add(1));
        let handle = TickHandle(id);
        let deadline = self.now() + self.interval.as_secs_f64();
        self.deadlines.borrow_mut().insert(handle, deadline);
        handle
    }

    fn cancel_tick(&self, handle: TickHandle) {
        self.deadlines.borrow_mut().remove(&handle);
    }
}
