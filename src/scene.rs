// Scene composition root. Owns every visual component, the camera, and the one piece of
// shared mutable state (wheel rotation), and runs them in mount order once per frame.

use serde::Serialize;

use crate::accumulator::RotationAccumulator;
use crate::camera_rig::CameraRig;
use crate::carousel::{CardStrip, OrbitCardState, OrbitCarousel, StripState};
use crate::chapters::{Chapter, ChapterMap};
use crate::clouds::{CloudState, CloudTransition};
use crate::config::EngineConfig;
use crate::content::Project;
use crate::curtains::{CurtainState, PrayerFlagCurtains};
use crate::error::EngineError;
use crate::gate::{PhaseTracker, Section, SectionPhase, VisibilityGate};
use crate::monastery::{Monastery, MonasteryState};
use crate::mountain::{Mountain, MountainState};
use crate::segment::SegmentRange;
use crate::types::{CameraState, FrameContext, FrameInput, ScrollProgress};
use crate::wheel::{PrayerWheel, WheelState};

/// Everything the host writes into the scene graph and DOM for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutput {
    pub progress: ScrollProgress,
    pub chapter: Chapter,
    pub curtains: CurtainState,
    pub camera: CameraState,
    pub mountain: MountainState,
    pub clouds: CloudState,
    pub monastery: MonasteryState,
    pub wheel: WheelState,
    pub orbit_cards: Vec<OrbitCardState>,
    pub strip: StripState,
}

/// Phase bookkeeping for the sections worth logging.
struct SectionLog {
    name: &'static str,
    section: Section,
    tracker: PhaseTracker,
}

impl SectionLog {
    fn new(name: &'static str, section: Section) -> Self {
        SectionLog {
            name,
            section,
            tracker: PhaseTracker::default(),
        }
    }

    fn observe(&mut self, progress: f32) {
        let phase = self.section.phase_at(progress);
        if let Some(previous) = self.tracker.observe(phase) {
            log::debug!("{}: {:?} -> {:?} at {:.3}", self.name, previous, phase, progress);
        }
    }
}

pub struct SceneRoot {
    chapters: ChapterMap,
    curtains: PrayerFlagCurtains,
    camera_rig: CameraRig,
    mountain: Mountain,
    clouds: CloudTransition,
    monastery: Monastery,
    wheel: PrayerWheel,
    orbit: OrbitCarousel,
    strip: CardStrip,
    projects: Vec<Project>,
    initial_camera: CameraState,
    camera: CameraState,
    rotation: RotationAccumulator,
    chapter: Option<Chapter>,
    clamping: bool,
    sections: Vec<SectionLog>,
}

impl SceneRoot {
    /// Validate `config` and mount the scene.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;

        let EngineConfig {
            chapters,
            curtains,
            camera,
            mountain,
            clouds,
            monastery,
            wheel,
            carousel,
            projects,
            viewport_width,
        } = config;

        let mut cloud_section = Section::new(clouds.gate).with_entrance(clouds.travel);
        if let VisibilityGate::Within { end, .. } = clouds.gate {
            cloud_section = cloud_section.with_exit(SegmentRange::new(clouds.travel.end, end));
        }

        let sections = vec![
            SectionLog::new("clouds", cloud_section),
            SectionLog::new(
                "monastery",
                Section::new(monastery.gate).with_entrance(monastery.entrance),
            ),
            SectionLog::new(
                "carousel",
                Section::new(carousel.strip.gate).with_entrance(carousel.strip.travel),
            ),
        ];

        let count = projects.len();
        let initial_camera = camera.initial_camera();

        log::info!(
            "scene mounted: {} cloud layers, {} projects, {} chapters",
            clouds.layers.len(),
            count,
            chapters.starts().len()
        );

        Ok(SceneRoot {
            chapters,
            curtains: PrayerFlagCurtains::new(curtains),
            camera_rig: CameraRig::new(camera),
            mountain: Mountain::new(mountain),
            clouds: CloudTransition::new(clouds),
            monastery: Monastery::new(monastery),
            wheel: PrayerWheel::new(wheel),
            orbit: OrbitCarousel::new(carousel.orbit, count),
            strip: CardStrip::new(carousel.strip, count, viewport_width),
            projects,
            initial_camera,
            camera: initial_camera,
            rotation: RotationAccumulator::new(),
            chapter: None,
            clamping: false,
            sections,
        })
    }

    /// Run one frame.
    pub fn update(&mut self, input: FrameInput) -> FrameOutput {
        let ctx = FrameContext::from_input(input);
        let p = ctx.p();

        if ctx.clamped != self.clamping {
            if ctx.clamped {
                log::warn!("scroll progress {} outside [0, 1]; clamping", input.scroll_progress);
            } else {
                log::debug!("scroll progress back in range at {:.3}", p);
            }
            self.clamping = ctx.clamped;
        }

        let chapter = self.chapters.chapter_at(p);
        if self.chapter != Some(chapter) {
            log::debug!("chapter {:?} at {:.3}", chapter, p);
            self.chapter = Some(chapter);
        }
        for section in &mut self.sections {
            section.observe(p);
        }

        let curtains = self.curtains.update(&ctx);
        self.camera_rig.update(&ctx, &mut self.camera);
        let mountain = self.mountain.update(&ctx);
        let clouds = self.clouds.update(&ctx);
        let monastery = self.monastery.update(&ctx, &mut self.camera);
        // Wheel writes the rotation, orbit reads it in the same frame.
        let wheel = self.wheel.update(&ctx, &mut self.rotation);
        let orbit_cards = self.orbit.update(&ctx, &self.rotation);
        let strip = self.strip.update(&ctx);

        FrameOutput {
            progress: ctx.progress,
            chapter,
            curtains,
            camera: self.camera,
            mountain,
            clouds,
            monastery,
            wheel,
            orbit_cards,
            strip,
        }
    }

    pub fn resize(&mut self, viewport_width: f32) {
        if viewport_width.is_finite() && viewport_width > 0.0 {
            self.strip.resize(viewport_width);
        } else {
            log::warn!("ignoring resize to viewport width {}", viewport_width);
        }
    }

    /// Back to mount-time state.
    pub fn reset(&mut self) {
        self.camera = self.initial_camera;
        self.rotation.reset();
        self.wheel.reset();
        self.clouds.reset();
        self.strip.reset();
        self.monastery.reset();
        self.chapter = None;
        self.clamping = false;
        for section in &mut self.sections {
            section.tracker.reset();
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn camera(&self) -> CameraState {
        self.camera
    }

    pub fn rotation(&self) -> f32 {
        self.rotation.value()
    }

    /// Whether the last frame's progress had to be clamped.
    pub fn is_clamping(&self) -> bool {
        self.clamping
    }

    pub fn section_phase(&self, name: &str) -> Option<SectionPhase> {
        self.sections
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.tracker.current())
    }
}
