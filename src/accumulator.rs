// Path-dependent state: frame-to-frame scroll delta and the shared wheel rotation.

use serde::Serialize;

use crate::types::ScrollProgress;

/// Previous-frame progress for one consumer. Must be sampled every frame,
/// gated or not, so the first gated frame does not see a stale jump.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaTracker {
    previous: Option<f32>,
}

impl DeltaTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the last sample. The first sample after construction or reset is zero.
    pub fn sample(&mut self, progress: ScrollProgress) -> f32 {
        let current = progress.value();
        let delta = self.previous.map_or(0.0, |prev| current - prev);
        self.previous = Some(current);
        delta
    }

    pub fn reset(&mut self) {
        self.previous = None;
    }
}

/// Rotation accumulated from scroll deltas.
///
/// One instance lives in the scene root. The wheel advances it through `&mut`;
/// the orbit carousel reads it through `&` in the same frame, so both always agree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RotationAccumulator {
    value: f32,
}

impl RotationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// `value += delta * gain` while the gate is open; no-op otherwise.
    pub fn advance(&mut self, delta: f32, gain: f32, gate_active: bool) -> f32 {
        if gate_active {
            self.value += delta * gain;
        }
        self.value
    }

    /// Additive rotation independent of scroll (idle spin).
    pub fn spin(&mut self, amount: f32) {
        self.value += amount;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_applies_gain_while_gated() {
        let mut rotation = RotationAccumulator::new();
        let mut tracker = DeltaTracker::new();
        tracker.sample(ScrollProgress::new(0.80));
        let delta = tracker.sample(ScrollProgress::new(0.82));
        rotation.advance(delta, 15.0, true);
        assert!((rotation.value() - 0.3).abs() < 1e-5);
    }

    #[test]
    fn closed_gate_holds_value() {
        let mut rotation = RotationAccumulator::new();
        rotation.advance(0.5, 15.0, false);
        assert_eq!(rotation.value(), 0.0);
    }

    #[test]
    fn tracker_updates_while_gate_closed() {
        let mut rotation = RotationAccumulator::new();
        let mut tracker = DeltaTracker::new();
        // Scroll a long way with the gate closed.
        for p in [0.1, 0.4, 0.7, 0.80] {
            let delta = tracker.sample(ScrollProgress::new(p));
            rotation.advance(delta, 15.0, p > 0.8);
        }
        // First gated frame only sees its own small delta.
        let delta = tracker.sample(ScrollProgress::new(0.81));
        rotation.advance(delta, 15.0, true);
        assert!((rotation.value() - 0.15).abs() < 1e-4);
    }

    #[test]
    fn first_sample_is_zero() {
        let mut tracker = DeltaTracker::new();
        assert_eq!(tracker.sample(ScrollProgress::new(0.9)), 0.0);
        tracker.reset();
        assert_eq!(tracker.sample(ScrollProgress::new(0.2)), 0.0);
    }

    #[test]
    fn scrolling_back_unwinds() {
        let mut rotation = RotationAccumulator::new();
        let mut tracker = DeltaTracker::new();
        for p in [0.85, 0.95, 0.85] {
            let delta = tracker.sample(ScrollProgress::new(p));
            rotation.advance(delta, 15.0, true);
        }
        assert!(rotation.value().abs() < 1e-5);
    }
}
