// Monastery interior: the group rises into place after the clouds, the room goes dark,
// and the camera swings round to face the carousel.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::flicker::{default_candles, CandleLight, CandleSettings};
use crate::gate::VisibilityGate;
use crate::resolve::{damp_vec3, lerp};
use crate::segment::SegmentRange;
use crate::types::{CameraState, FrameContext};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonasterySettings {
    pub gate: VisibilityGate,
    pub entrance: SegmentRange,
    pub scale_from: f32,
    pub y_from: f32,
    /// Entrance progress past which the page background switches to `background`.
    pub dark_after: f32,
    pub background: String,
    /// Floor and back wall.
    pub panels_gate: VisibilityGate,
    pub camera_gate: VisibilityGate,
    pub camera_position: Vec3,
    pub camera_look_at: Vec3,
    pub camera_follow: f32,
    pub candles: Vec<CandleSettings>,
    pub footer_gate: VisibilityGate,
}

impl Default for MonasterySettings {
    fn default() -> Self {
        MonasterySettings {
            gate: VisibilityGate::after(0.75),
            entrance: SegmentRange::new(0.75, 0.82),
            scale_from: 0.8,
            y_from: -5.0,
            dark_after: 0.5,
            background: "#030201".to_string(),
            panels_gate: VisibilityGate::after(0.75),
            camera_gate: VisibilityGate::after(0.84),
            camera_position: Vec3::new(0.0, 0.0, 10.0),
            camera_look_at: Vec3::ZERO,
            camera_follow: 0.05,
            candles: default_candles(),
            footer_gate: VisibilityGate::after(0.85),
        }
    }
}

impl MonasterySettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.gate.validate("monastery.gate")?;
        self.entrance.validate("monastery.entrance")?;
        self.panels_gate.validate("monastery.panels_gate")?;
        self.camera_gate.validate("monastery.camera_gate")?;
        self.footer_gate.validate("monastery.footer_gate")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandleState {
    pub position: Vec3,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonasteryState {
    pub visible: bool,
    pub entrance_progress: f32,
    pub position_y: f32,
    pub scale: f32,
    /// Background colour to apply, once the entrance is half done.
    pub background: Option<String>,
    pub panels_visible: bool,
    pub candles: Vec<CandleState>,
    pub footer_hint_visible: bool,
}

pub struct Monastery {
    settings: MonasterySettings,
    candles: Vec<CandleLight>,
}

impl Monastery {
    pub fn new(settings: MonasterySettings) -> Self {
        let candles = candle_lights(&settings.candles);
        Monastery { settings, candles }
    }

    /// Reseed the candles so flicker replays as on a fresh mount.
    pub fn reset(&mut self) {
        self.candles = candle_lights(&self.settings.candles);
    }

    pub fn update(&mut self, ctx: &FrameContext, camera: &mut CameraState) -> MonasteryState {
        let s = &self.settings;
        let p = ctx.p();
        let visible = s.gate.is_visible(p);

        // Rest values while hidden: small and sunk, ready to rise again.
        let entrance_progress = if visible {
            s.entrance.raw_progress(p)
        } else {
            0.0
        };

        if visible && s.camera_gate.is_visible(p) {
            camera.position = damp_vec3(
                camera.position,
                s.camera_position,
                s.camera_follow,
                ctx.delta_time,
            );
            camera.look_at = s.camera_look_at;
        }

        let background =
            (visible && entrance_progress > s.dark_after).then(|| s.background.clone());
        let elapsed = ctx.elapsed_time;
        let candles = self
            .candles
            .iter_mut()
            .map(|candle| CandleState {
                position: candle.position(),
                intensity: candle.intensity(elapsed),
            })
            .collect();

        MonasteryState {
            visible,
            entrance_progress,
            position_y: lerp(s.y_from, 0.0, entrance_progress),
            scale: lerp(s.scale_from, 1.0, entrance_progress),
            background,
            panels_visible: s.panels_gate.is_visible(p),
            candles,
            footer_hint_visible: visible && s.footer_gate.is_visible(p),
        }
    }
}

fn candle_lights(candles: &[CandleSettings]) -> Vec<CandleLight> {
    candles
        .iter()
        .enumerate()
        .map(|(i, c)| CandleLight::new(*c, 0x5eed_0000 + i as u64))
        .collect()
}
