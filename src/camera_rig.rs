// Mountain descent camera. Two eased legs (peak -> mid -> base) across the first
// 80% of the page; the camera position follows the leg target with a damped lerp.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::easing::EasingType;
use crate::error::EngineError;
use crate::resolve::{damp_vec3, lerp_vec3};
use crate::segment::SegmentRange;
use crate::types::{CameraState, FrameContext};

/// One keyframe of the descent: where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraRigSettings {
    /// Camera placement before the first frame.
    pub initial: CameraPose,
    pub start: CameraPose,
    pub mid: CameraPose,
    pub end: CameraPose,
    /// The rig drives the camera while progress is at or below this value.
    pub active_until: f32,
    /// Fraction of the descent spent on the first leg.
    pub split: f32,
    pub first_leg_easing: EasingType,
    pub second_leg_easing: EasingType,
    /// Share of the remaining distance closed per 60 Hz frame.
    pub follow: f32,
}

impl Default for CameraRigSettings {
    fn default() -> Self {
        CameraRigSettings {
            initial: CameraPose {
                position: Vec3::new(80.0, -80.0, 280.0),
                look_at: Vec3::new(200.0, -150.0, -500.0),
            },
            start: CameraPose {
                position: Vec3::new(80.0, -75.0, 30.0),
                look_at: Vec3::new(200.0, -150.0, -500.0),
            },
            mid: CameraPose {
                position: Vec3::new(50.0, -180.0, 180.0),
                look_at: Vec3::new(200.0, -280.0, -500.0),
            },
            end: CameraPose {
                position: Vec3::new(20.0, -290.0, 550.0),
                look_at: Vec3::new(200.0, -300.0, -500.0),
            },
            active_until: 0.80,
            split: 0.4,
            first_leg_easing: EasingType::EaseInQuad,
            second_leg_easing: EasingType::EaseOutQuad,
            follow: 0.06,
        }
    }
}

impl CameraRigSettings {
    pub fn validate(&self) -> Result<(), EngineError> {
        SegmentRange::new(0.0, self.active_until).validate("camera.active_until")?;
        SegmentRange::new(0.0, self.split).validate("camera.split")?;
        SegmentRange::new(self.split, 1.0).validate("camera.split")
    }

    pub fn initial_camera(&self) -> CameraState {
        CameraState::new(self.initial.position, self.initial.look_at)
    }
}

pub struct CameraRig {
    settings: CameraRigSettings,
    descent: SegmentRange,
    first_leg: SegmentRange,
    second_leg: SegmentRange,
}

impl CameraRig {
    pub fn new(settings: CameraRigSettings) -> Self {
        CameraRig {
            descent: SegmentRange::new(0.0, settings.active_until),
            first_leg: SegmentRange::new(0.0, settings.split),
            second_leg: SegmentRange::new(settings.split, 1.0),
            settings,
        }
    }

    pub fn is_active(&self, progress: f32) -> bool {
        progress <= self.settings.active_until
    }

    /// Pose the camera is heading for at `progress`. Pure.
    pub fn target_at(&self, progress: f32) -> CameraPose {
        let s = &self.settings;
        let n = self.descent.raw_progress(progress);

        let (from, to, t) = if n < s.split {
            let t = s.first_leg_easing.apply(self.first_leg.raw_progress(n));
            (s.start, s.mid, t)
        } else {
            let t = s.second_leg_easing.apply(self.second_leg.raw_progress(n));
            (s.mid, s.end, t)
        };

        CameraPose {
            position: lerp_vec3(from.position, to.position, t),
            look_at: lerp_vec3(from.look_at, to.look_at, t),
        }
    }

    /// Move `camera` toward this frame's target. Leaves it untouched past the descent.
    pub fn update(&self, ctx: &FrameContext, camera: &mut CameraState) {
        if !self.is_active(ctx.p()) {
            return;
        }
        let target = self.target_at(ctx.p());
        camera.position = damp_vec3(
            camera.position,
            target.position,
            self.settings.follow,
            ctx.delta_time,
        );
        camera.look_at = target.look_at;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameInput;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn targets_hit_keyframes() {
        let rig = CameraRig::new(CameraRigSettings::default());
        let s = CameraRigSettings::default();

        assert!(close(rig.target_at(0.0).position, s.start.position));
        // n = 0.4 exactly is the start of the second leg.
        assert!(close(rig.target_at(0.32).position, s.mid.position));
        assert!(close(rig.target_at(0.80).position, s.end.position));
        assert!(close(rig.target_at(0.80).look_at, s.end.look_at));
    }

    #[test]
    fn first_leg_eases_in() {
        let rig = CameraRig::new(CameraRigSettings::default());
        let s = CameraRigSettings::default();
        // n = 0.2 -> t = 0.5 -> eased 0.25
        let pose = rig.target_at(0.16);
        let expected = lerp_vec3(s.start.position, s.mid.position, 0.25);
        assert!(close(pose.position, expected));
    }

    #[test]
    fn camera_follows_and_freezes_past_descent() {
        let rig = CameraRig::new(CameraRigSettings::default());
        let mut camera = CameraRigSettings::default().initial_camera();
        let before = camera.position;

        rig.update(
            &FrameContext::from_input(FrameInput::new(0.5, 1.0 / 60.0, 0.0)),
            &mut camera,
        );
        assert_ne!(camera.position, before);
        let target = rig.target_at(0.5);
        assert!(close(camera.look_at, target.look_at));
        // Only part of the way there.
        assert!((camera.position - target.position).length() > 1.0);

        let frozen = camera;
        rig.update(
            &FrameContext::from_input(FrameInput::new(0.9, 1.0 / 60.0, 0.0)),
            &mut camera,
        );
        assert_eq!(camera, frozen);
    }

    #[test]
    fn converges_when_scroll_rests() {
        let rig = CameraRig::new(CameraRigSettings::default());
        let mut camera = CameraRigSettings::default().initial_camera();
        let ctx = FrameContext::from_input(FrameInput::new(0.6, 1.0 / 60.0, 0.0));
        for _ in 0..600 {
            rig.update(&ctx, &mut camera);
        }
        assert!(close(camera.position, rig.target_at(0.6).position));
    }
}
