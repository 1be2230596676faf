// Engine configuration passed from JS. Every section defaults to the page's own tuning,
// so `{}` is a complete config.

use serde::{Deserialize, Serialize};

use crate::camera_rig::CameraRigSettings;
use crate::carousel::CarouselSettings;
use crate::chapters::ChapterMap;
use crate::clouds::CloudSettings;
use crate::content::{default_projects, Project};
use crate::curtains::CurtainSettings;
use crate::error::EngineError;
use crate::monastery::MonasterySettings;
use crate::mountain::MountainSettings;
use crate::wheel::WheelSettings;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub chapters: ChapterMap,
    pub curtains: CurtainSettings,
    pub camera: CameraRigSettings,
    pub mountain: MountainSettings,
    pub clouds: CloudSettings,
    pub monastery: MonasterySettings,
    pub wheel: WheelSettings,
    pub carousel: CarouselSettings,
    pub projects: Vec<Project>,
    /// Visible world-space width at the carousel, used for card sizing.
    pub viewport_width: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            chapters: ChapterMap::default(),
            curtains: CurtainSettings::default(),
            camera: CameraRigSettings::default(),
            mountain: MountainSettings::default(),
            clouds: CloudSettings::default(),
            monastery: MonasterySettings::default(),
            wheel: WheelSettings::default(),
            carousel: CarouselSettings::default(),
            projects: default_projects(),
            viewport_width: 8.0,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject anything that would misbehave inside the frame loop.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.chapters.validate()?;
        self.curtains.validate()?;
        self.camera.validate()?;
        self.mountain.validate()?;
        self.clouds.validate()?;
        self.monastery.validate()?;
        self.wheel.validate()?;
        self.carousel.validate()?;
        if !(self.viewport_width.is_finite() && self.viewport_width > 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "viewport_width must be positive, got {}",
                self.viewport_width
            )));
        }
        Ok(())
    }
}
