// Cloud transition: staggered cloud sprites slide in from both sides and past centre,
// followed by a white flash that covers the cut into the monastery.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::easing::{ease_in_out_cubic, EasingType};
use crate::error::EngineError;
use crate::gate::VisibilityGate;
use crate::resolve::fade_in;
use crate::segment::{stagger, validate_delay, SegmentRange};
use crate::types::{FrameContext, NodeState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction of travel toward the centre.
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// Which of the two cloud textures a sprite uses; resolved by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudTexture {
    Cloud1,
    Cloud2,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CloudLayer {
    pub texture: CloudTexture,
    pub side: Side,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub scale: f32,
    pub opacity: f32,
    #[serde(default)]
    pub delay: f32,
}

impl CloudLayer {
    fn new(
        texture: CloudTexture,
        side: Side,
        [x, y, z]: [f32; 3],
        scale: f32,
        opacity: f32,
        delay: f32,
    ) -> Self {
        CloudLayer {
            texture,
            side,
            x,
            y,
            z,
            scale,
            opacity,
            delay,
        }
    }

    fn rest(&self) -> NodeState {
        NodeState::at(Vec3::new(self.x, self.y, self.z))
            .with_scale(Vec3::new(self.scale, self.scale * 0.6, 1.0))
            .with_opacity(0.0)
    }
}

fn default_layers() -> Vec<CloudLayer> {
    use CloudTexture::*;
    use Side::*;
    vec![
        // back
        CloudLayer::new(Cloud1, Left, [-180.0, 10.0, -20.0], 120.0, 0.4, 0.0),
        CloudLayer::new(Cloud2, Right, [180.0, -15.0, -15.0], 130.0, 0.35, 0.05),
        // mid-back
        CloudLayer::new(Cloud2, Left, [-160.0, -20.0, 0.0], 100.0, 0.5, 0.1),
        CloudLayer::new(Cloud1, Right, [170.0, 25.0, 5.0], 110.0, 0.45, 0.08),
        // middle
        CloudLayer::new(Cloud1, Left, [-150.0, 5.0, 20.0], 90.0, 0.65, 0.15),
        CloudLayer::new(Cloud2, Right, [155.0, -10.0, 25.0], 95.0, 0.6, 0.12),
        CloudLayer::new(Cloud2, Left, [-145.0, -25.0, 30.0], 85.0, 0.55, 0.18),
        CloudLayer::new(Cloud1, Right, [150.0, 20.0, 35.0], 88.0, 0.58, 0.2),
        // front
        CloudLayer::new(Cloud1, Left, [-130.0, 0.0, 50.0], 80.0, 0.8, 0.22),
        CloudLayer::new(Cloud2, Right, [135.0, -5.0, 55.0], 82.0, 0.75, 0.25),
        CloudLayer::new(Cloud2, Left, [-125.0, 15.0, 60.0], 75.0, 0.85, 0.28),
        CloudLayer::new(Cloud1, Right, [130.0, -15.0, 65.0], 78.0, 0.82, 0.3),
        // foremost
        CloudLayer::new(Cloud1, Left, [-110.0, -8.0, 75.0], 70.0, 0.9, 0.32),
        CloudLayer::new(Cloud2, Right, [115.0, 8.0, 80.0], 72.0, 0.88, 0.35),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashSettings {
    pub rise: SegmentRange,
    pub fall: SegmentRange,
    pub position: Vec3,
}

impl Default for FlashSettings {
    fn default() -> Self {
        FlashSettings {
            rise: SegmentRange::new(0.70, 0.78),
            fall: SegmentRange::new(0.78, 0.88),
            position: Vec3::new(0.0, 0.0, 100.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudSettings {
    pub gate: VisibilityGate,
    /// Window over which undelayed travel runs from 0 to 1.
    pub travel: SegmentRange,
    /// Distance past centre each cloud travels.
    pub overshoot: f32,
    /// Opacity reaches its target after `1 / fade_speed` of the travel.
    pub fade_speed: f32,
    pub easing: EasingType,
    pub layers: Vec<CloudLayer>,
    pub flash: FlashSettings,
}

impl Default for CloudSettings {
    fn default() -> Self {
        CloudSettings {
            gate: VisibilityGate::within(0.40, 0.87),
            travel: SegmentRange::new(0.40, 0.75),
            overshoot: 40.0,
            fade_speed: 2.0,
            easing: EasingType::EaseOutQuad,
            layers: default_layers(),
            flash: FlashSettings::default(),
        }
    }
}

impl CloudSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.gate.validate("clouds.gate")?;
        self.travel.validate("clouds.travel")?;
        self.flash.rise.validate("clouds.flash.rise")?;
        self.flash.fall.validate("clouds.flash.fall")?;
        for (i, layer) in self.layers.iter().enumerate() {
            validate_delay(layer.delay, &format!("clouds.layers[{}]", i))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CloudState {
    pub visible: bool,
    pub layers: Vec<NodeState>,
    pub flash: NodeState,
}

pub struct CloudTransition {
    settings: CloudSettings,
    layers: Vec<NodeState>,
    flash: NodeState,
}

impl CloudTransition {
    pub fn new(settings: CloudSettings) -> Self {
        let layers = settings
            .layers
            .iter()
            .map(|layer| layer.rest().hidden())
            .collect();
        let flash = NodeState::at(settings.flash.position).with_opacity(0.0).hidden();
        CloudTransition {
            settings,
            layers,
            flash,
        }
    }

    pub fn update(&mut self, ctx: &FrameContext) -> CloudState {
        let p = ctx.p();
        let visible = self.settings.gate.is_visible(p);

        if visible {
            let raw = self.settings.travel.raw_progress(p);
            for (layer, node) in self.settings.layers.iter().zip(self.layers.iter_mut()) {
                let delayed = stagger(raw, layer.delay);
                let eased = self.settings.easing.apply(delayed);
                let travel = layer.x.abs() + self.settings.overshoot;
                node.position.x = layer.x + travel * eased * layer.side.direction();
                node.opacity = fade_in(layer.opacity, delayed, self.settings.fade_speed);
                node.visible = true;
            }
        } else {
            self.reset_layers();
        }

        self.update_flash(p);

        CloudState {
            visible,
            layers: self.layers.clone(),
            flash: self.flash,
        }
    }

    fn update_flash(&mut self, p: f32) {
        let (rise, fall) = (self.settings.flash.rise, self.settings.flash.fall);
        if rise.contains(p) {
            self.flash.opacity = ease_in_out_cubic(rise.raw_progress(p));
            self.flash.visible = true;
        } else if p > fall.start && p <= fall.end {
            self.flash.opacity = (1.0 - ease_in_out_cubic(fall.raw_progress(p))).max(0.0);
            self.flash.visible = self.flash.opacity > 0.0;
        } else {
            self.flash.opacity = 0.0;
            self.flash.visible = false;
        }
    }

    /// Back to the slide-in start so re-entry replays from the edges.
    fn reset_layers(&mut self) {
        for (layer, node) in self.settings.layers.iter().zip(self.layers.iter_mut()) {
            *node = layer.rest().hidden();
        }
    }

    pub fn reset(&mut self) {
        self.reset_layers();
        self.flash = NodeState::at(self.settings.flash.position)
            .with_opacity(0.0)
            .hidden();
    }
}
