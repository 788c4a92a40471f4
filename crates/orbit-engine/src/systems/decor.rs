//! Planet decoration: asteroid belts, idle wobble and halo pulse.
//!
//! Belts are generated once per target name and memoized, so revisiting a
//! room continues the same belt where it left off.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::rng::Rng;
use crate::renderer::instance::BeltInstance;

/// Shape of an asteroid belt, radii in multiples of the planet radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltSpec {
    pub count: usize,
    pub inner: f32,
    pub outer: f32,
    /// Rotation of the belt ellipse in radians.
    pub tilt: f32,
}

impl Default for BeltSpec {
    fn default() -> Self {
        Self {
            count: 120,
            inner: 1.6,
            outer: 2.1,
            tilt: -0.22,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeltPoint {
    pub angle: f32,
    /// Semi-major axis in pixels.
    pub radius: f32,
    /// Semi-minor axis in pixels.
    pub minor: f32,
    pub size: f32,
    pub shade: f32,
    /// Radians per frame.
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Belt {
    pub tilt: f32,
    pub points: Vec<BeltPoint>,
}

impl Belt {
    const SEED_SALT: u32 = 9137;
    const FLATTEN: f32 = 0.52;

    /// Deterministic belt for a planet of `radius` named with seed `name_seed`.
    pub fn generate(spec: &BeltSpec, radius: f32, name_seed: u32) -> Self {
        let mut rng = Rng::new((name_seed ^ Self::SEED_SALT) as u64);
        let count = spec.count.max(1);
        let points = (0..spec.count)
            .map(|i| {
                let angle = (i as f32 / count as f32) * std::f32::consts::TAU + rng.next_f32() * 0.5;
                let r = radius * rng.range(spec.inner, spec.outer);
                BeltPoint {
                    angle,
                    radius: r,
                    minor: r * Self::FLATTEN,
                    size: rng.range(0.6, 2.0),
                    shade: rng.range(0.6, 1.0),
                    speed: rng.range(0.0006, 0.0012),
                }
            })
            .collect();
        Self { tilt: spec.tilt, points }
    }

    /// Move every point one frame along its orbit.
    pub fn advance(&mut self) {
        for p in &mut self.points {
            p.angle += p.speed;
        }
    }

    /// Append the points around `center` to `out`.
    pub fn write_instances(&self, center: Vec2, out: &mut Vec<BeltInstance>) {
        let rot = Vec2::from_angle(self.tilt);
        out.extend(self.points.iter().map(|p| {
            let local = Vec2::new(p.angle.cos() * p.radius, p.angle.sin() * p.minor);
            let pos = center + rot.rotate(local);
            BeltInstance {
                x: pos.x,
                y: pos.y,
                size: p.size,
                alpha: 0.75 * p.shade,
            }
        }));
    }
}

/// Sum of the name's character codes.
pub fn name_seed(name: &str) -> u32 {
    name.chars().fold(0u32, |acc, c| acc.wrapping_add(c as u32))
}

/// Slow idle wobble so planets never sit perfectly still.
pub fn jitter(name_seed: u32, radius: f32, now_ms: f64) -> Vec2 {
    let t = (now_ms * 0.001) as f32;
    let amp = (radius * 0.08).clamp(1.2, 6.0);
    let seed = name_seed as f32;
    Vec2::new(
        (t * 0.6 + seed * 0.01).cos() * amp,
        (t * 0.7 + seed * 0.02).sin() * amp,
    )
}

/// Halo brightness factor, oscillating in [0.76, 1.0].
pub fn halo_pulse(radius: f32, now_ms: f64) -> f32 {
    0.88 + ((now_ms * 0.001) as f32 + radius * 0.03).sin() * 0.12
}

/// Belts memoized by normalized target name, shared across rooms.
#[derive(Debug, Default)]
pub struct DecorCache {
    belts: HashMap<String, Belt>,
}

impl DecorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The belt for `key`, generated on first use.
    pub fn belt(&mut self, key: &str, spec: &BeltSpec, radius: f32, name_seed: u32) -> &mut Belt {
        self.belts
            .entry(key.to_string())
            .or_insert_with(|| Belt::generate(spec, radius, name_seed))
    }

    pub fn len(&self) -> usize {
        self.belts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.belts.is_empty()
    }
}
