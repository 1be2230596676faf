// scroll_engine: scroll-progress animation engine for the mountain-to-monastery page.
// The page's render loop samples scroll once per frame and hands it here; every transform,
// opacity and visibility flag it writes back comes out of this crate. JS is plumbing.

mod accumulator;
mod camera_rig;
mod carousel;
mod chapters;
mod clouds;
mod config;
mod content;
mod curtains;
mod easing;
mod error;
mod flicker;
mod gate;
mod monastery;
mod mountain;
mod resolve;
mod scene;
mod segment;
mod types;
mod wheel;

use wasm_bindgen::prelude::*;

pub use accumulator::{DeltaTracker, RotationAccumulator};
pub use camera_rig::{CameraPose, CameraRig, CameraRigSettings};
pub use carousel::{
    CardStrip, CarouselSettings, OrbitCardState, OrbitCarousel, OrbitSettings, StripLayout,
    StripSettings, StripState,
};
pub use chapters::{Chapter, ChapterMap, ChapterStart};
pub use clouds::{
    CloudLayer, CloudSettings, CloudState, CloudTexture, CloudTransition, FlashSettings, Side,
};
pub use config::EngineConfig;
pub use content::{default_projects, Project};
pub use curtains::{CurtainSettings, CurtainState, PrayerFlagCurtains};
pub use easing::{ease_in_out_cubic, ease_in_quad, ease_out_quad, EasingType};
pub use error::EngineError;
pub use flicker::{flicker, CandleLight, CandleSettings};
pub use gate::{PhaseTracker, Section, SectionPhase, VisibilityGate};
pub use monastery::{CandleState, Monastery, MonasterySettings, MonasteryState};
pub use mountain::{Mountain, MountainSettings, MountainState};
pub use resolve::{damp, damp_vec3, fade_in, follow_alpha, lerp, lerp_vec3};
pub use scene::{FrameOutput, SceneRoot};
pub use segment::{local_progress, stagger, SegmentRange};
pub use types::*;
pub use wheel::{PrayerWheel, WheelSettings, WheelState};

/// Install panic and logging hooks for the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    console_log::init_with_level(log::Level::Info).ok();
}

fn to_js(err: EngineError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Main engine interface exposed to JavaScript.
/// One `update` call per frame; results come back as a single JSON document.
#[wasm_bindgen]
pub struct Engine {
    scene: SceneRoot,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<Engine, JsValue> {
        let config = EngineConfig::from_json(config_json).map_err(to_js)?;
        let scene = SceneRoot::new(config).map_err(to_js)?;
        Ok(Engine { scene })
    }

    /// Run one frame and return the `FrameOutput` as JSON.
    pub fn update(
        &mut self,
        scroll_progress: f32,
        delta_time: f32,
        elapsed_time: f32,
    ) -> Result<String, JsValue> {
        let output = self
            .scene
            .update(FrameInput::new(scroll_progress, delta_time, elapsed_time));
        serde_json::to_string(&output).map_err(|e| to_js(e.into()))
    }

    /// Camera for the last frame as `[px, py, pz, lx, ly, lz]`, without a JSON round trip.
    pub fn camera_buffer(&self) -> js_sys::Float32Array {
        let camera = self.scene.camera().to_array();
        js_sys::Float32Array::from(&camera[..])
    }

    /// Current shared wheel rotation, radians.
    pub fn rotation(&self) -> f32 {
        self.scene.rotation()
    }

    /// Recompute viewport-dependent layout.
    pub fn resize(&mut self, viewport_width: f32) {
        self.scene.resize(viewport_width);
    }

    /// Project content as JSON.
    pub fn projects(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.scene.projects()).map_err(|e| to_js(e.into()))
    }

    /// Drop all per-frame state, as on unmount and remount.
    pub fn reset(&mut self) {
        self.scene.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_creation_works() {
        let engine = Engine::new(r#"{"viewport_width":10.0}"#);
        assert!(engine.is_ok());
    }

    #[test]
    fn engine_runs_frames() {
        let mut engine = Engine::new("{}").unwrap();
        let json = engine.update(0.45, 1.0 / 60.0, 0.5).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["chapter"], "cloud_transition");
        assert_eq!(value["clouds"]["visible"], true);

        engine.update(0.80, 1.0 / 60.0, 0.52).unwrap();
        engine.update(0.82, 1.0 / 60.0, 0.54).unwrap();
        assert!((engine.rotation() - 0.3).abs() < 1e-4);

        engine.reset();
        assert_eq!(engine.rotation(), 0.0);
    }

    #[test]
    fn engine_lists_projects() {
        let engine = Engine::new("{}").unwrap();
        let projects: Vec<Project> = serde_json::from_str(&engine.projects().unwrap()).unwrap();
        assert_eq!(projects.len(), 4);
        assert_eq!(projects[0].title, "Mountain Explorer");
    }
}
