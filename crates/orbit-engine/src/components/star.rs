use glam::Vec2;

use crate::core::rng::Rng;

/// One star of the fixed pool. Position is relative to the screen centre.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub pos: Vec2,
    /// Resting brightness the twinkle schedule varies around.
    pub base: f32,
    pub alpha: f32,
    pub target_alpha: f32,
    /// Next scheduled twinkle change.
    pub next_twinkle_ms: f64,
    /// End of the current bright flash, if one is running.
    pub flash_until_ms: Option<f64>,
}

impl Star {
    pub const FLASH_MS: f64 = 800.0;
    pub const FLASH_RADIUS: f32 = 1.6;
    pub const DOT_RADIUS: f32 = 1.1;

    /// New star anywhere in a plane twice the viewport size.
    pub fn spawn(rng: &mut Rng, size: Vec2, now_ms: f64) -> Self {
        Self {
            pos: Vec2::new(
                (rng.next_f32() - 0.5) * size.x * 2.0,
                (rng.next_f32() - 0.5) * size.y * 2.0,
            ),
            base: rng.range(0.15, 0.5),
            alpha: 0.0,
            target_alpha: 0.0,
            next_twinkle_ms: now_ms + Self::twinkle_gap(rng),
            flash_until_ms: None,
        }
    }

    /// 0.5 to 2 seconds between scheduled twinkles.
    pub fn twinkle_gap(rng: &mut Rng) -> f64 {
        500.0 + rng.next_f32() as f64 * 1500.0
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_until_ms.is_some()
    }

    pub fn radius(&self) -> f32 {
        if self.is_flashing() {
            Self::FLASH_RADIUS
        } else {
            Self::DOT_RADIUS
        }
    }
}

/// Short-lived streak entering from a screen edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Meteor {
    /// Screen-space position.
    pub pos: Vec2,
    /// Pixels per frame.
    pub vel: Vec2,
    pub age: u32,
    pub max_age: f32,
    pub len: f32,
}

impl Meteor {
    const EDGE_MARGIN: f32 = 20.0;
    const CULL_MARGIN: f32 = 120.0;

    pub fn spawn(rng: &mut Rng, size: Vec2) -> Self {
        let speed = rng.range(3.5, 5.7);
        let drift = rng.range(-0.6, 0.6);
        let (pos, vel) = match rng.next_int(4) {
            0 => (
                Vec2::new(rng.next_f32() * size.x, -Self::EDGE_MARGIN),
                Vec2::new(drift, speed),
            ),
            1 => (
                Vec2::new(size.x + Self::EDGE_MARGIN, rng.next_f32() * size.y),
                Vec2::new(-speed, drift),
            ),
            2 => (
                Vec2::new(rng.next_f32() * size.x, size.y + Self::EDGE_MARGIN),
                Vec2::new(drift, -speed),
            ),
            _ => (
                Vec2::new(-Self::EDGE_MARGIN, rng.next_f32() * size.y),
                Vec2::new(speed, drift),
            ),
        };
        Self {
            pos,
            vel,
            age: 0,
            max_age: rng.range(120.0, 220.0),
            len: rng.range(40.0, 100.0),
        }
    }

    /// Advance one frame. Returns false when expired or well off screen.
    pub fn tick(&mut self, size: Vec2) -> bool {
        self.pos += self.vel;
        self.age += 1;
        let m = Self::CULL_MARGIN;
        (self.age as f32) <= self.max_age
            && self.pos.x >= -m
            && self.pos.y >= -m
            && self.pos.x <= size.x + m
            && self.pos.y <= size.y + m
    }

    pub fn tail(&self) -> Vec2 {
        self.pos - self.vel * (self.len / 10.0)
    }

    pub fn alpha(&self) -> f32 {
        (1.0 - self.age as f32 / self.max_age).max(0.0)
    }
}
