// extensions/easing.rs
//
// Easing curves for timed progress and exponential smoothing for chased values.
// No dependencies on the scene, just math.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Easing function applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Constant velocity (no easing).
    Linear,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start and end. Used for ship flights.
    #[default]
    CubicInOut,
    /// Sine wave easing (smooth).
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t` in [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// One step of exponential smoothing: `value += (target - value) * k`.
///
/// Applied once per frame with a fixed factor, so the rate follows the
/// display refresh rate rather than wall time.
#[inline]
pub fn approach(value: f32, target: f32, k: f32) -> f32 {
    value + (target - value) * k
}

/// Vec2 variant of [`approach`].
#[inline]
pub fn approach_vec2(value: Vec2, target: Vec2, k: f32) -> Vec2 {
    value + (target - value) * k
}
