// Segment mapping: global scroll progress -> clamped local progress for one effect window.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A window on the [0, 1] scroll axis with an optional stagger delay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentRange {
    pub start: f32,
    pub end: f32,
    /// Fraction of the window skipped before this element starts moving.
    #[serde(default)]
    pub delay: f32,
}

impl SegmentRange {
    pub const fn new(start: f32, end: f32) -> Self {
        SegmentRange {
            start,
            end,
            delay: 0.0,
        }
    }

    pub const fn with_delay(self, delay: f32) -> Self {
        SegmentRange { delay, ..self }
    }

    /// Reject windows that would divide by zero (or worse) in the frame loop.
    pub fn validate(&self, name: &str) -> Result<(), EngineError> {
        if !self.start.is_finite() || !self.end.is_finite() || self.start >= self.end {
            return Err(EngineError::InvalidSegment {
                name: name.to_string(),
                start: self.start,
                end: self.end,
            });
        }
        validate_delay(self.delay, name)
    }

    pub fn length(&self) -> f32 {
        self.end - self.start
    }

    /// Inclusive on both ends.
    pub fn contains(&self, progress: f32) -> bool {
        progress >= self.start && progress <= self.end
    }

    /// Progress through the window, ignoring delay.
    pub fn raw_progress(&self, progress: f32) -> f32 {
        ((progress - self.start) / self.length()).clamp(0.0, 1.0)
    }

    /// Progress through the window after the stagger delay is applied.
    pub fn local_progress(&self, progress: f32) -> f32 {
        stagger(self.raw_progress(progress), self.delay)
    }
}

pub(crate) fn validate_delay(delay: f32, name: &str) -> Result<(), EngineError> {
    if !(0.0..1.0).contains(&delay) {
        return Err(EngineError::InvalidDelay {
            name: name.to_string(),
            delay,
        });
    }
    Ok(())
}

/// Re-map already-clamped progress so it starts at `delay` but still ends at 1.
///
/// Elements with a larger delay start later and catch up, all arriving together.
pub fn stagger(raw: f32, delay: f32) -> f32 {
    if delay <= 0.0 {
        return raw;
    }
    ((raw - delay) / (1.0 - delay)).clamp(0.0, 1.0)
}

/// Free-function form of [`SegmentRange::local_progress`].
pub fn local_progress(progress: f32, start: f32, end: f32, delay: f32) -> f32 {
    SegmentRange::new(start, end)
        .with_delay(delay)
        .local_progress(progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn endpoints_map_to_zero_and_one() {
        let seg = SegmentRange::new(0.40, 0.75);
        assert_eq!(seg.local_progress(0.40), 0.0);
        assert_eq!(seg.local_progress(0.75), 1.0);
        assert_eq!(seg.local_progress(0.10), 0.0);
        assert_eq!(seg.local_progress(0.95), 1.0);
    }

    #[test]
    fn delayed_element_starts_late_and_finishes_together() {
        let seg = SegmentRange::new(0.40, 0.75).with_delay(0.1);
        assert_eq!(seg.local_progress(0.40), 0.0);
        // raw < delay -> still at zero
        assert_eq!(seg.local_progress(0.43), 0.0);
        assert_eq!(seg.local_progress(0.75), 1.0);

        // Fade-in saturates where delayed progress reaches one half.
        // raw = 0.1 + 0.5 * 0.9 = 0.55 -> progress = 0.40 + 0.55 * 0.35
        let half = 0.40 + 0.55 * 0.35;
        assert!((seg.local_progress(half) - 0.5).abs() < 1e-5);
    }

    #[test]
    fn zero_length_rejected() {
        let err = SegmentRange::new(0.5, 0.5).validate("flash").unwrap_err();
        assert!(matches!(err, EngineError::InvalidSegment { .. }));
        assert!(SegmentRange::new(0.6, 0.5).validate("backwards").is_err());
        assert!(SegmentRange::new(f32::NAN, 0.5).validate("nan").is_err());
    }

    #[test]
    fn delay_of_one_rejected() {
        let err = SegmentRange::new(0.0, 1.0)
            .with_delay(1.0)
            .validate("cloud")
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidDelay { .. }));
        assert!(SegmentRange::new(0.0, 1.0).with_delay(-0.1).validate("cloud").is_err());
    }

    #[test]
    fn delay_defaults_when_missing_from_json() {
        let seg: SegmentRange = serde_json::from_str(r#"{"start":0.1,"end":0.2}"#).unwrap();
        assert_eq!(seg.delay, 0.0);
    }

    #[test]
    fn just_past_end_stays_clamped() {
        let seg = SegmentRange::new(0.40, 0.75);
        let v = seg.local_progress(0.75 + f32::EPSILON);
        assert_eq!(v, 1.0);
        assert!(!v.is_nan());
    }

    proptest! {
        #[test]
        fn local_progress_is_bounded(
            progress in 0.0f32..=1.0f32,
            start in 0.0f32..0.99f32,
            len in 0.001f32..1.0f32,
            delay in 0.0f32..0.999f32,
        ) {
            let v = local_progress(progress, start, start + len, delay);
            prop_assert!(!v.is_nan());
            prop_assert!((0.0..=1.0).contains(&v), "got {}", v);
        }

        #[test]
        fn local_progress_is_monotonic(
            a in 0.0f32..=1.0f32,
            b in 0.0f32..=1.0f32,
            delay in 0.0f32..0.9f32,
        ) {
            let seg = SegmentRange::new(0.2, 0.8).with_delay(delay);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(seg.local_progress(lo) <= seg.local_progress(hi));
        }
    }
}
