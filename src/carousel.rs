// Project carousels around the prayer wheel.
//
// The orbit carousel places cards on a ring whose angle is the wheel's accumulated
// rotation, so wheel and ring turn together. The card strip slides a row of cards
// sideways across the final section of the page.

use std::f32::consts::TAU;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::accumulator::RotationAccumulator;
use crate::error::EngineError;
use crate::gate::VisibilityGate;
use crate::resolve::{damp, lerp};
use crate::segment::SegmentRange;
use crate::types::FrameContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSettings {
    pub gate: VisibilityGate,
    pub center: Vec3,
    pub radius: f32,
    /// Cards less frontal than this do not take pointer input.
    pub interactive_threshold: f32,
    pub back_opacity: f32,
    pub back_scale: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        OrbitSettings {
            gate: VisibilityGate::after(0.85),
            center: Vec3::new(0.0, -6.0, 0.0),
            radius: 6.0,
            interactive_threshold: 0.3,
            back_opacity: 0.4,
            back_scale: 0.7,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StripSettings {
    pub gate: VisibilityGate,
    pub travel: SegmentRange,
    pub card_gap: f32,
    /// Card width as a fraction of the viewport width, capped at `max_card_width`.
    pub width_fraction: f32,
    pub max_card_width: f32,
    /// Height / width.
    pub aspect: f32,
    pub card_z: f32,
    pub follow: f32,
}

impl Default for StripSettings {
    fn default() -> Self {
        StripSettings {
            gate: VisibilityGate::after(0.82),
            travel: SegmentRange::new(0.82, 1.0),
            card_gap: 0.3,
            width_fraction: 0.3,
            max_card_width: 2.5,
            aspect: 1.3,
            card_z: 2.0,
            follow: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSettings {
    pub orbit: OrbitSettings,
    pub strip: StripSettings,
}

impl CarouselSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.orbit.gate.validate("carousel.orbit.gate")?;
        self.strip.gate.validate("carousel.strip.gate")?;
        self.strip.travel.validate("carousel.strip.travel")?;
        positive("carousel.orbit.radius", self.orbit.radius)?;
        positive("carousel.strip.width_fraction", self.strip.width_fraction)?;
        positive("carousel.strip.max_card_width", self.strip.max_card_width)?;
        positive("carousel.strip.aspect", self.strip.aspect)?;
        let gap = self.strip.card_gap;
        if !(gap.is_finite() && gap >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "carousel.strip.card_gap must be non-negative, got {}",
                gap
            )));
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<(), EngineError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::InvalidConfig(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitCardState {
    pub index: usize,
    pub position: Vec3,
    /// 1 facing the camera, 0 directly behind the wheel.
    pub frontness: f32,
    pub opacity: f32,
    pub scale: f32,
    pub interactive: bool,
    pub visible: bool,
}

/// Cards on a ring driven by the shared wheel rotation.
pub struct OrbitCarousel {
    settings: OrbitSettings,
    count: usize,
}

impl OrbitCarousel {
    pub fn new(settings: OrbitSettings, count: usize) -> Self {
        OrbitCarousel { settings, count }
    }

    pub fn update(
        &self,
        ctx: &FrameContext,
        rotation: &RotationAccumulator,
    ) -> Vec<OrbitCardState> {
        let s = &self.settings;
        let visible = s.gate.is_visible(ctx.p());

        (0..self.count)
            .map(|index| {
                let angle = index as f32 / self.count as f32 * TAU + rotation.value();
                let (sin, cos) = angle.sin_cos();
                let frontness = (cos + 1.0) / 2.0;
                OrbitCardState {
                    index,
                    position: s.center + Vec3::new(cos * s.radius, 0.0, sin * s.radius),
                    frontness,
                    opacity: lerp(s.back_opacity, 1.0, frontness),
                    scale: lerp(s.back_scale, 1.0, frontness),
                    interactive: visible && frontness > s.interactive_threshold,
                    visible,
                }
            })
            .collect()
    }
}

/// Card geometry derived from the viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StripLayout {
    pub card_width: f32,
    pub card_height: f32,
    pub card_spacing: f32,
}

impl StripLayout {
    pub fn for_viewport(settings: &StripSettings, viewport_width: f32) -> Self {
        let card_width = (viewport_width * settings.width_fraction).min(settings.max_card_width);
        StripLayout {
            card_width,
            card_height: card_width * settings.aspect,
            card_spacing: card_width + settings.card_gap,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StripState {
    pub active: bool,
    pub offset_x: f32,
    pub layout: StripLayout,
    /// Card centres in strip-local space.
    pub cards: Vec<Vec3>,
}

/// A row of cards that slides left as the page scrolls down.
pub struct CardStrip {
    settings: StripSettings,
    layout: StripLayout,
    count: usize,
    offset_x: f32,
}

impl CardStrip {
    pub fn new(settings: StripSettings, count: usize, viewport_width: f32) -> Self {
        let layout = StripLayout::for_viewport(&settings, viewport_width);
        CardStrip {
            settings,
            layout,
            count,
            offset_x: 0.0,
        }
    }

    pub fn resize(&mut self, viewport_width: f32) {
        self.layout = StripLayout::for_viewport(&self.settings, viewport_width);
    }

    /// Offset the strip is heading for at `progress`.
    pub fn target_offset(&self, progress: f32) -> f32 {
        let local = self.settings.travel.raw_progress(progress);
        let total_width = self.layout.card_spacing * self.count.saturating_sub(1) as f32;
        -local * total_width
    }

    pub fn update(&mut self, ctx: &FrameContext) -> StripState {
        let active = self.settings.gate.is_visible(ctx.p());
        if active {
            let target = self.target_offset(ctx.p());
            self.offset_x = damp(self.offset_x, target, self.settings.follow, ctx.delta_time);
        } else {
            self.offset_x = 0.0;
        }

        let cards = (0..self.count)
            .map(|i| Vec3::new(i as f32 * self.layout.card_spacing, 0.0, self.settings.card_z))
            .collect();

        StripState {
            active,
            offset_x: self.offset_x,
            layout: self.layout,
            cards,
        }
    }

    pub fn reset(&mut self) {
        self.offset_x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameInput;

    fn ctx(p: f32) -> FrameContext {
        FrameContext::from_input(FrameInput::new(p, 1.0 / 60.0, 0.0))
    }

    #[test]
    fn orbit_front_card_is_brightest() {
        let orbit = OrbitCarousel::new(OrbitSettings::default(), 4);
        let cards = orbit.update(&ctx(0.9), &RotationAccumulator::new());
        assert_eq!(cards.len(), 4);

        let front = &cards[0];
        assert!((front.frontness - 1.0).abs() < 1e-6);
        assert!((front.opacity - 1.0).abs() < 1e-6);
        assert!((front.position.x - 6.0).abs() < 1e-5);
        assert!(front.interactive);

        let back = &cards[2];
        assert!(back.frontness < 1e-6);
        assert!((back.opacity - 0.4).abs() < 1e-5);
        assert!((back.scale - 0.7).abs() < 1e-5);
        assert!(!back.interactive);
    }

    #[test]
    fn orbit_follows_shared_rotation() {
        let orbit = OrbitCarousel::new(OrbitSettings::default(), 4);
        let mut rotation = RotationAccumulator::new();
        rotation.advance(std::f32::consts::PI / 15.0, 15.0, true);
        let cards = orbit.update(&ctx(0.9), &rotation);
        // Half a turn: card 2 is now in front.
        assert!((cards[2].frontness - 1.0).abs() < 1e-5);
        assert!(cards[0].frontness < 1e-5);
    }

    #[test]
    fn orbit_hidden_before_gate() {
        let orbit = OrbitCarousel::new(OrbitSettings::default(), 4);
        let cards = orbit.update(&ctx(0.84), &RotationAccumulator::new());
        assert!(cards.iter().all(|c| !c.visible && !c.interactive));
    }

    #[test]
    fn strip_layout_caps_card_width() {
        let s = StripSettings::default();
        let narrow = StripLayout::for_viewport(&s, 5.0);
        assert!((narrow.card_width - 1.5).abs() < 1e-6);
        assert!((narrow.card_spacing - 1.8).abs() < 1e-6);
        let wide = StripLayout::for_viewport(&s, 20.0);
        assert_eq!(wide.card_width, 2.5);
        assert!((wide.card_height - 3.25).abs() < 1e-6);
    }

    #[test]
    fn strip_target_spans_all_cards() {
        let strip = CardStrip::new(StripSettings::default(), 4, 20.0);
        assert_eq!(strip.target_offset(0.82), 0.0);
        assert!((strip.target_offset(1.0) + 2.8 * 3.0).abs() < 1e-4);
    }

    #[test]
    fn strip_eases_toward_target_and_resets() {
        let mut strip = CardStrip::new(StripSettings::default(), 4, 20.0);
        let first = strip.update(&ctx(1.0));
        assert!(first.active);
        assert!(first.offset_x < 0.0 && first.offset_x > strip.target_offset(1.0));

        for _ in 0..300 {
            strip.update(&ctx(1.0));
        }
        let settled = strip.update(&ctx(1.0));
        assert!((settled.offset_x - strip.target_offset(1.0)).abs() < 1e-3);

        let closed = strip.update(&ctx(0.5));
        assert!(!closed.active);
        assert_eq!(closed.offset_x, 0.0);
    }

    #[test]
    fn resize_changes_spacing() {
        let mut strip = CardStrip::new(StripSettings::default(), 4, 20.0);
        strip.resize(5.0);
        let state = strip.update(&ctx(0.9));
        assert!((state.cards[1].x - 1.8).abs() < 1e-5);
        assert_eq!(state.cards[0].z, 2.0);
    }

    #[test]
    fn rejects_degenerate_card_geometry() {
        assert!(CarouselSettings::default().validate().is_ok());

        let mut settings = CarouselSettings::default();
        settings.strip.width_fraction = -0.3;
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("width_fraction"));

        let mut settings = CarouselSettings::default();
        settings.strip.aspect = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = CarouselSettings::default();
        settings.strip.card_gap = -1.0;
        assert!(settings.validate().is_err());

        let mut settings = CarouselSettings::default();
        settings.strip.card_gap = 0.0;
        settings.orbit.radius = f32::NAN;
        assert!(settings.validate().is_err());
    }
}
