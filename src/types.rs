// Strong typing over raw floats: scroll progress, per-frame context, and node output state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Normalized scroll progress. Always finite and within [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Default)]
pub struct ScrollProgress(f32);

impl ScrollProgress {
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return ScrollProgress(0.0);
        }
        ScrollProgress(value.clamp(0.0, 1.0))
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Raw per-frame input from the render loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct FrameInput {
    pub scroll_progress: f32,
    /// Seconds since the previous frame.
    #[serde(default)]
    pub delta_time: f32,
    /// Seconds since the scene mounted.
    #[serde(default)]
    pub elapsed_time: f32,
}

impl FrameInput {
    pub fn new(scroll_progress: f32, delta_time: f32, elapsed_time: f32) -> Self {
        FrameInput {
            scroll_progress,
            delta_time,
            elapsed_time,
        }
    }
}

/// Validated frame context handed to every component's update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub progress: ScrollProgress,
    pub delta_time: f32,
    pub elapsed_time: f32,
    /// The host sent progress outside [0, 1] (or NaN) this frame.
    pub clamped: bool,
}

impl FrameContext {
    pub fn from_input(input: FrameInput) -> Self {
        let raw = input.scroll_progress;
        FrameContext {
            progress: ScrollProgress::new(raw),
            clamped: !(raw.is_finite() && (0.0..=1.0).contains(&raw)),
            delta_time: finite_non_negative(input.delta_time),
            elapsed_time: finite_non_negative(input.elapsed_time),
        }
    }

    /// Shorthand for the progress scalar.
    pub fn p(&self) -> f32 {
        self.progress.value()
    }
}

fn finite_non_negative(v: f32) -> f32 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Transform, opacity and visibility written into one scene-graph node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeState {
    pub position: Vec3,
    /// Euler angles, radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub opacity: f32,
    pub visible: bool,
}

impl NodeState {
    pub fn at(position: Vec3) -> Self {
        NodeState {
            position,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            opacity: 1.0,
            visible: true,
        }
    }
}

/// Camera placement for the frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub position: Vec3,
    pub look_at: Vec3,
}

impl CameraState {
    pub fn new(position: Vec3, look_at: Vec3) -> Self {
        CameraState { position, look_at }
    }

    /// Flat `[px, py, pz, lx, ly, lz]` for typed-array transfer.
    pub fn to_array(&self) -> [f32; 6] {
        [
            self.position.x,
            self.position.y,
            self.position.z,
            self.look_at.x,
            self.look_at.y,
            self.look_at.z,
        ]
    }
}
