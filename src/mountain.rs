// Mountain group visibility. Stays up through the descent and drops out while the clouds close.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::segment::SegmentRange;
use crate::types::FrameContext;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MountainSettings {
    pub fade: SegmentRange,
    /// Fade progress at which the group is switched off.
    pub hide_at: f32,
}

impl Default for MountainSettings {
    fn default() -> Self {
        MountainSettings {
            fade: SegmentRange::new(0.60, 0.75),
            hide_at: 0.95,
        }
    }
}

impl MountainSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        self.fade.validate("mountain.fade")?;
        if !(0.0..=1.0).contains(&self.hide_at) {
            return Err(EngineError::InvalidConfig(format!(
                "mountain.hide_at {} outside [0, 1]",
                self.hide_at
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MountainState {
    pub visible: bool,
    /// 0 before the fade window, 1 after; hosts may drive material opacity from it.
    pub fade_progress: f32,
}

pub struct Mountain {
    settings: MountainSettings,
}

impl Mountain {
    pub fn new(settings: MountainSettings) -> Self {
        Mountain { settings }
    }

    pub fn update(&self, ctx: &FrameContext) -> MountainState {
        let p = ctx.p();
        let fade = &self.settings.fade;
        let fade_progress = fade.raw_progress(p);

        let visible = if p >= fade.end {
            false
        } else if p > fade.start {
            fade_progress < self.settings.hide_at
        } else {
            true
        };

        MountainState {
            visible,
            fade_progress,
        }
    }
}
