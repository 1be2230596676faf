// Prayer-flag curtains: two HTML panels that part and fade as the hero scrolls away.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::resolve::lerp;
use crate::segment::SegmentRange;
use crate::types::FrameContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurtainSettings {
    /// Window over which the panels slide outward.
    pub slide: SegmentRange,
    /// Window over which both panels fade out.
    pub fade: SegmentRange,
    /// Horizontal travel, in percent of the panel width.
    pub travel_percent: f32,
}

impl Default for CurtainSettings {
    fn default() -> Self {
        CurtainSettings {
            slide: SegmentRange::new(0.0, 0.15),
            fade: SegmentRange::new(0.0, 0.12),
            travel_percent: 100.0,
        }
    }
}

impl CurtainSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.slide.validate("curtains.slide")?;
        self.fade.validate("curtains.fade")
    }
}

/// CSS-space output for the two curtain panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurtainState {
    pub left_offset_percent: f32,
    pub right_offset_percent: f32,
    pub opacity: f32,
    pub visible: bool,
}

pub struct PrayerFlagCurtains {
    settings: CurtainSettings,
}

impl PrayerFlagCurtains {
    pub fn new(settings: CurtainSettings) -> Self {
        PrayerFlagCurtains { settings }
    }

    pub fn update(&self, ctx: &FrameContext) -> CurtainState {
        let slide = self.settings.slide.local_progress(ctx.p());
        let fade = self.settings.fade.local_progress(ctx.p());
        let travel = self.settings.travel_percent;
        let opacity = lerp(1.0, 0.0, fade);

        CurtainState {
            left_offset_percent: lerp(0.0, -travel, slide),
            right_offset_percent: lerp(0.0, travel, slide),
            opacity,
            visible: opacity > 0.0,
        }
    }
}
