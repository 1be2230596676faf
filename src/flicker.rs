// Candle flicker: the only effect driven by wall-clock time instead of scroll.

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleSettings {
    pub position: Vec3,
    pub intensity: f32,
}

pub(crate) fn default_candles() -> Vec<CandleSettings> {
    vec![
        CandleSettings {
            position: Vec3::new(-8.0, -4.0, 5.0),
            intensity: 1.5,
        },
        CandleSettings {
            position: Vec3::new(8.0, -4.0, 5.0),
            intensity: 1.5,
        },
        CandleSettings {
            position: Vec3::new(0.0, -4.0, -8.0),
            intensity: 1.0,
        },
    ]
}

/// A point light whose intensity wobbles around a fixed base.
pub struct CandleLight {
    settings: CandleSettings,
    rng: SmallRng,
}

impl CandleLight {
    pub fn new(settings: CandleSettings, seed: u64) -> Self {
        CandleLight {
            settings,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.settings.position
    }

    /// `base + sin(10e)·0.1 + sin(15e)·0.05 + noise·0.05` for elapsed seconds `e`.
    pub fn intensity(&mut self, elapsed: f32) -> f32 {
        let noise: f32 = self.rng.gen();
        self.settings.intensity + flicker(elapsed, noise)
    }
}

/// Additive flicker term; `noise` in [0, 1).
pub fn flicker(elapsed: f32, noise: f32) -> f32 {
    (elapsed * 10.0).sin() * 0.1 + (elapsed * 15.0).sin() * 0.05 + noise * 0.05
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flicker_is_bounded() {
        for i in 0..1000 {
            let e = i as f32 * 0.013;
            let f = flicker(e, 0.999);
            assert!((-0.15..=0.2).contains(&f), "flicker({}) = {}", e, f);
        }
    }

    #[test]
    fn intensity_wobbles_around_base() {
        let mut candle = CandleLight::new(default_candles()[0], 7);
        let samples: Vec<f32> = (0..120).map(|i| candle.intensity(i as f32 / 60.0)).collect();
        assert!(samples.iter().all(|&v| (1.35..=1.7).contains(&v)));
        let distinct = samples.windows(2).filter(|w| w[0] != w[1]).count();
        assert!(distinct > 100);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = CandleLight::new(default_candles()[2], 42);
        let mut b = CandleLight::new(default_candles()[2], 42);
        for i in 0..10 {
            let e = i as f32 * 0.1;
            assert_eq!(a.intensity(e), b.intensity(e));
        }
    }
}
