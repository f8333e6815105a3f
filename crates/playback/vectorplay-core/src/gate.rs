//! Draw-or-skip decision for each tick and scrub.

use log::trace;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of what a seek changed, as reported by the renderer.
/// `(x0, y0)` is the lower-left corner and `(x1, y1)` the upper-right.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DamageRect {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl DamageRect {
    pub const EMPTY: DamageRect = DamageRect {
        x0: 0.0,
        y0: 0.0,
        x1: 0.0,
        y1: 0.0,
    };

    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Damage covering a whole `width` x `height` surface
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f32, height as f32)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Positive width and positive height
    #[inline]
    pub fn has_area(&self) -> bool {
        self.x1 > self.x0 && self.y1 > self.y0
    }
}

/// Why a draw was skipped
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Fraction did not move
    Unchanged,
    /// Seek reported a zero-area damage rectangle
    NoDamage,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GateDecision {
    Draw,
    Skip(SkipReason),
}

impl GateDecision {
    #[inline]
    pub fn should_draw(&self) -> bool {
        matches!(self, Self::Draw)
    }
}

/// Decides whether a new fraction needs rasterizing
#[derive(Clone, Debug, Default)]
pub struct RenderGate {
    last_damage: Option<DamageRect>,
    draws: u64,
    skips: u64,
}

impl RenderGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap pre-check: a trial seek is only worth doing when the fraction moved.
    /// `previous` is `None` before anything was shown.
    #[inline]
    pub fn fraction_changed(previous: Option<f64>, new: f64) -> bool {
        previous != Some(new)
    }

    /// Skip unless the fraction changed and the damage has positive area
    pub fn decide(&mut self, previous: Option<f64>, new: f64, damage: DamageRect) -> GateDecision {
        let decision = if !Self::fraction_changed(previous, new) {
            self.last_damage = None;
            GateDecision::Skip(SkipReason::Unchanged)
        } else {
            self.last_damage = Some(damage);
            if damage.has_area() {
                GateDecision::Draw
            } else {
                GateDecision::Skip(SkipReason::NoDamage)
            }
        };
        self.record(decision);
        trace!("gate {previous:?} -> {new}: {decision:?}");
        decision
    }

    /// Record a skip decided without a trial seek
    pub fn skip_unchanged(&mut self) -> GateDecision {
        let decision = GateDecision::Skip(SkipReason::Unchanged);
        self.last_damage = None;
        self.record(decision);
        decision
    }

    /// Damage seen by the latest decision; `None` is the no-damage marker
    #[inline]
    pub fn last_damage(&self) -> Option<DamageRect> {
        self.last_damage
    }

    #[inline]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    #[inline]
    pub fn skips(&self) -> u64 {
        self.skips
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn record(&mut self, decision: GateDecision) {
        match decision {
            GateDecision::Draw => self.draws += 1,
            GateDecision::Skip(_) => self.skips += 1,
        }
    }
}
