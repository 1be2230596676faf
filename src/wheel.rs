// Prayer wheel: spins with scroll once the monastery is reached.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::accumulator::{DeltaTracker, RotationAccumulator};
use crate::error::EngineError;
use crate::gate::VisibilityGate;
use crate::types::{FrameContext, NodeState};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelSettings {
    pub gate: VisibilityGate,
    /// Radians per unit of scroll progress. Negative reverses the spin.
    pub gain: f32,
    /// Radians per second added while the gate is open, independent of scroll.
    pub idle_spin: f32,
    pub position: Vec3,
    pub scale: f32,
}

impl Default for WheelSettings {
    fn default() -> Self {
        WheelSettings {
            gate: VisibilityGate::after(0.80),
            gain: 15.0,
            idle_spin: 0.0,
            position: Vec3::new(0.0, -6.0, -5.0),
            scale: 0.012,
        }
    }
}

impl WheelSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.gate.validate("wheel.gate")?;
        if !self.gain.is_finite() || !self.idle_spin.is_finite() {
            return Err(EngineError::InvalidConfig(
                "wheel.gain and wheel.idle_spin must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WheelState {
    pub node: NodeState,
    pub spinning: bool,
}

pub struct PrayerWheel {
    settings: WheelSettings,
    tracker: DeltaTracker,
}

impl PrayerWheel {
    pub fn new(settings: WheelSettings) -> Self {
        PrayerWheel {
            settings,
            tracker: DeltaTracker::new(),
        }
    }

    /// Advance the shared rotation and report the wheel transform.
    pub fn update(&mut self, ctx: &FrameContext, rotation: &mut RotationAccumulator) -> WheelState {
        let delta = self.tracker.sample(ctx.progress);
        let spinning = self.settings.gate.is_visible(ctx.p());

        rotation.advance(delta, self.settings.gain, spinning);
        if spinning && self.settings.idle_spin != 0.0 {
            rotation.spin(ctx.delta_time * self.settings.idle_spin);
        }

        let mut node =
            NodeState::at(self.settings.position).with_scale(Vec3::splat(self.settings.scale));
        node.rotation.y = rotation.value();

        WheelState { node, spinning }
    }

    pub fn reset(&mut self) {
        self.tracker.reset();
    }
}
