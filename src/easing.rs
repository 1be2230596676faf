// Easing curves. Pure functions over [0, 1]; callers clamp before easing.

use serde::{Deserialize, Serialize};

pub fn ease_in_quad(t: f32) -> f32 {
    t * t
}

pub fn ease_out_quad(t: f32) -> f32 {
    1.0 - (1.0 - t) * (1.0 - t)
}

pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Named easing curve, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    #[default]
    Linear,
    EaseInQuad,
    EaseOutQuad,
    EaseInOutCubic,
}

impl EasingType {
    pub fn apply(self, t: f32) -> f32 {
        match self {
            EasingType::Linear => t,
            EasingType::EaseInQuad => ease_in_quad(t),
            EasingType::EaseOutQuad => ease_out_quad(t),
            EasingType::EaseInOutCubic => ease_in_out_cubic(t),
        }
    }
}
