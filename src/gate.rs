// Visibility gates and the per-section phase they imply.
// Gates are pure functions of scroll progress; only the phase tracker remembers anything.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::segment::SegmentRange;

/// Boolean visibility derived from scroll progress.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VisibilityGate {
    /// Enter-and-stay: open while `progress > threshold`.
    After { threshold: f32 },
    /// Transient: open while `start <= progress <= end`.
    Within { start: f32, end: f32 },
}

impl VisibilityGate {
    pub const fn after(threshold: f32) -> Self {
        VisibilityGate::After { threshold }
    }

    pub const fn within(start: f32, end: f32) -> Self {
        VisibilityGate::Within { start, end }
    }

    pub fn is_visible(&self, progress: f32) -> bool {
        match *self {
            VisibilityGate::After { threshold } => progress > threshold,
            VisibilityGate::Within { start, end } => progress >= start && progress <= end,
        }
    }

    pub fn validate(&self, name: &str) -> Result<(), EngineError> {
        match *self {
            VisibilityGate::After { threshold } if !threshold.is_finite() => Err(
                EngineError::InvalidConfig(format!("gate '{}' has non-finite threshold", name)),
            ),
            VisibilityGate::Within { start, end } => SegmentRange::new(start, end).validate(name),
            _ => Ok(()),
        }
    }
}

/// Where a section sits in its Hidden -> Entering -> Active -> Exiting -> Hidden cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SectionPhase {
    #[default]
    Hidden,
    Entering,
    Active,
    Exiting,
}

/// A gated section with optional entrance and exit windows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub gate: VisibilityGate,
    pub entrance: Option<SegmentRange>,
    pub exit: Option<SegmentRange>,
}

impl Section {
    pub fn new(gate: VisibilityGate) -> Self {
        Section {
            gate,
            entrance: None,
            exit: None,
        }
    }

    pub fn with_entrance(mut self, entrance: SegmentRange) -> Self {
        self.entrance = Some(entrance);
        self
    }

    pub fn with_exit(mut self, exit: SegmentRange) -> Self {
        self.exit = Some(exit);
        self
    }

    pub fn phase_at(&self, progress: f32) -> SectionPhase {
        if !self.gate.is_visible(progress) {
            return SectionPhase::Hidden;
        }
        if let Some(exit) = self.exit {
            if progress > exit.start {
                return SectionPhase::Exiting;
            }
        }
        match self.entrance {
            Some(entrance) if entrance.raw_progress(progress) < 1.0 => SectionPhase::Entering,
            _ => SectionPhase::Active,
        }
    }
}

/// Remembers the last observed phase so transitions can be reported once.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTracker {
    last: SectionPhase,
}

impl PhaseTracker {
    /// Record `phase`; returns the previous phase if it changed.
    pub fn observe(&mut self, phase: SectionPhase) -> Option<SectionPhase> {
        if phase == self.last {
            return None;
        }
        let previous = self.last;
        self.last = phase;
        Some(previous)
    }

    pub fn current(&self) -> SectionPhase {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = SectionPhase::Hidden;
    }
}
