// Visual parameter resolution: interpolation between endpoints, fade-in, and damped follow.

use glam::Vec3;

/// Reference frame rate the per-frame follow factors were tuned at.
const REFERENCE_FPS: f32 = 60.0;

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Opacity that reaches `target` after `1 / speed` of the travel.
pub fn fade_in(target: f32, progress: f32, speed: f32) -> f32 {
    (target * (progress * speed).min(1.0)).clamp(0.0, 1.0)
}

/// Blend factor for a follow that moves `factor` of the remaining gap per 60 Hz frame.
///
/// At exactly 1/60 s this equals `factor`, so tuning carries over from fixed-step code.
pub fn follow_alpha(factor: f32, delta_time: f32) -> f32 {
    if delta_time <= 0.0 {
        return 0.0;
    }
    let factor = factor.clamp(0.0, 1.0);
    1.0 - (1.0 - factor).powf(delta_time * REFERENCE_FPS)
}

pub fn damp(current: f32, target: f32, factor: f32, delta_time: f32) -> f32 {
    lerp(current, target, follow_alpha(factor, delta_time))
}

pub fn damp_vec3(current: Vec3, target: Vec3, factor: f32, delta_time: f32) -> Vec3 {
    lerp_vec3(current, target, follow_alpha(factor, delta_time))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(-5.0, 0.0, 0.0), -5.0);
        assert_eq!(lerp(-5.0, 0.0, 1.0), 0.0);
        assert!((lerp(0.8, 1.0, 0.5) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn lerp_vec3_midpoint() {
        let mid = lerp_vec3(Vec3::new(80.0, -75.0, 30.0), Vec3::new(50.0, -180.0, 180.0), 0.5);
        assert!((mid - Vec3::new(65.0, -127.5, 105.0)).length() < 1e-4);
    }

    #[test]
    fn fade_in_saturates_at_half_travel() {
        assert_eq!(fade_in(0.8, 0.0, 2.0), 0.0);
        assert!((fade_in(0.8, 0.25, 2.0) - 0.4).abs() < 1e-6);
        assert_eq!(fade_in(0.8, 0.5, 2.0), 0.8);
        assert_eq!(fade_in(0.8, 1.0, 2.0), 0.8);
    }

    #[test]
    fn fade_in_clamps_overbright_targets() {
        assert_eq!(fade_in(1.5, 1.0, 2.0), 1.0);
    }

    #[test]
    fn follow_matches_fixed_step_at_sixty_hz() {
        assert!((follow_alpha(0.06, 1.0 / 60.0) - 0.06).abs() < 1e-5);
        assert!((damp(0.0, 10.0, 0.1, 1.0 / 60.0) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn follow_is_frame_rate_independent() {
        let mut at_60 = 0.0;
        for _ in 0..60 {
            at_60 = damp(at_60, 1.0, 0.05, 1.0 / 60.0);
        }
        let mut at_120 = 0.0;
        for _ in 0..120 {
            at_120 = damp(at_120, 1.0, 0.05, 1.0 / 120.0);
        }
        assert!((at_60 - at_120).abs() < 1e-3);
    }

    #[test]
    fn zero_delta_holds_position() {
        assert_eq!(damp(3.0, 10.0, 0.5, 0.0), 3.0);
    }

    proptest! {
        #[test]
        fn lerp_is_pure(a in -500.0f32..500.0, b in -500.0f32..500.0, t in 0.0f32..=1.0) {
            prop_assert_eq!(lerp(a, b, t), lerp(a, b, t));
            let lo = a.min(b) - 1e-3;
            let hi = a.max(b) + 1e-3;
            let v = lerp(a, b, t);
            prop_assert!(v >= lo && v <= hi);
        }

        #[test]
        fn fade_in_is_unit_bounded(target in 0.0f32..=1.0, p in 0.0f32..=1.0) {
            let v = fade_in(target, p, 2.0);
            prop_assert!((0.0..=target).contains(&v));
        }
    }
}
