//! Starfield simulator: idle twinkle below the streak threshold, radial warp
//! streaks above it, plus the occasional meteor.

use glam::Vec2;

use crate::api::config::StarConfig;
use crate::components::star::{Meteor, Star};
use crate::core::rng::Rng;
use crate::extensions::easing::approach;
use crate::renderer::instance::StarInstance;

/// Rendering mode derived from the current speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarMode {
    Twinkle,
    Streak,
}

/// Per-frame inputs of [`Starfield::advance`].
#[derive(Debug, Clone, Copy)]
pub struct StarStep {
    /// Viewport size in pixels.
    pub size: Vec2,
    /// Latest pointer position in screen pixels.
    pub pointer: Vec2,
    pub now_ms: f64,
}

pub struct Starfield {
    config: StarConfig,
    stars: Vec<Star>,
    meteors: Vec<Meteor>,
    speed: f32,
    target_speed: f32,
    star_instances: Vec<StarInstance>,
    meteor_instances: Vec<StarInstance>,
}

impl Starfield {
    const FLASH_CHANCE: f32 = 0.002;
    const TWINKLE_EASE: f32 = 0.05;
    const TWINKLE_SPREAD: f32 = 0.07;
    const TWINKLE_RANGE: f32 = 0.15;
    const PARALLAX_FAST: f32 = 0.0006;
    const PARALLAX_SLOW: f32 = 0.00008;
    const PARALLAX_SCALE: f32 = 40.0;
    const PARALLAX_SWITCH_SPEED: f32 = 0.02;

    pub fn new(config: &StarConfig, size: Vec2, rng: &mut Rng, now_ms: f64) -> Self {
        let stars = (0..config.count)
            .map(|_| Star::spawn(rng, size, now_ms))
            .collect();
        Self {
            config: config.clone(),
            stars,
            meteors: Vec::with_capacity(config.meteor_max),
            speed: config.idle_speed,
            target_speed: config.idle_speed,
            star_instances: Vec::with_capacity(config.count),
            meteor_instances: Vec::with_capacity(config.meteor_max),
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn target_speed(&self) -> f32 {
        self.target_speed
    }

    pub fn set_target_speed(&mut self, speed: f32) {
        self.target_speed = speed.max(0.0);
    }

    /// Raise the target speed to at least `speed`.
    pub fn raise_target_speed(&mut self, speed: f32) {
        self.target_speed = self.target_speed.max(speed);
    }

    pub fn mode(&self) -> StarMode {
        if self.speed < self.config.streak_threshold {
            StarMode::Twinkle
        } else {
            StarMode::Streak
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn meteors(&self) -> &[Meteor] {
        &self.meteors
    }

    pub fn star_instances(&self) -> &[StarInstance] {
        &self.star_instances
    }

    pub fn meteor_instances(&self) -> &[StarInstance] {
        &self.meteor_instances
    }

    /// Advance one frame and rebuild the instance buffers.
    pub fn advance(&mut self, step: StarStep, rng: &mut Rng) {
        self.speed = approach(self.speed, self.target_speed, self.config.smoothing);

        let center = step.size * 0.5;
        let factor = if self.speed > Self::PARALLAX_SWITCH_SPEED {
            Self::PARALLAX_FAST
        } else {
            Self::PARALLAX_SLOW
        };
        let parallax = (step.pointer - center) * factor * Self::PARALLAX_SCALE;

        self.star_instances.clear();
        match self.mode() {
            StarMode::Twinkle => self.twinkle(center, parallax, step.now_ms, rng),
            StarMode::Streak => self.streak(step.size, center, parallax, step.now_ms, rng),
        }
        self.advance_meteors(step.size, rng);
    }

    fn twinkle(&mut self, center: Vec2, parallax: Vec2, now_ms: f64, rng: &mut Rng) {
        for s in &mut self.stars {
            if s.flash_until_ms.is_none() && rng.chance(Self::FLASH_CHANCE) {
                s.flash_until_ms = Some(now_ms + Star::FLASH_MS);
                s.target_alpha = 1.0;
            }
            if let Some(end) = s.flash_until_ms {
                if now_ms >= end {
                    s.flash_until_ms = None;
                    s.target_alpha = s.base;
                }
            }
            if s.flash_until_ms.is_none() && now_ms >= s.next_twinkle_ms {
                s.next_twinkle_ms = now_ms + Star::twinkle_gap(rng);
                let jittered = s.base + rng.next_f32() * Self::TWINKLE_RANGE - Self::TWINKLE_SPREAD;
                s.target_alpha = jittered.clamp(0.05, 0.7);
            }
            s.alpha = approach(s.alpha, s.target_alpha, Self::TWINKLE_EASE);

            let p = center + s.pos + parallax;
            self.star_instances.push(StarInstance {
                x: p.x,
                y: p.y,
                tail_x: p.x,
                tail_y: p.y,
                alpha: s.alpha.clamp(0.0, 1.0),
                width: 0.0,
                radius: s.radius(),
                kind: StarInstance::KIND_DOT,
            });
        }
    }

    fn streak(&mut self, size: Vec2, center: Vec2, parallax: Vec2, now_ms: f64, rng: &mut Rng) {
        let speed = self.speed;
        let len = (2.0 + speed * 900.0).min(18.0);
        let brightness = (0.3 + speed * 40.0).min(1.0);
        let width = (speed * 40.0).max(1.0);
        let limit_sq = size.length_squared();
        let fade_radius = (size.min_element() * 0.5).max(1.0);

        for s in &mut self.stars {
            s.pos += s.pos * speed + parallax;
            if s.pos.length_squared() > limit_sq {
                *s = Star::spawn(rng, size, now_ms);
            }
            let head = center + s.pos;
            let tail = head - s.pos * speed * len;
            // Centre fade.
            let fade = (s.pos.length() / fade_radius).clamp(0.15, 1.0);
            self.star_instances.push(StarInstance {
                x: head.x,
                y: head.y,
                tail_x: tail.x,
                tail_y: tail.y,
                alpha: brightness * fade,
                width,
                radius: 0.0,
                kind: StarInstance::KIND_STREAK,
            });
        }
    }

    fn advance_meteors(&mut self, size: Vec2, rng: &mut Rng) {
        if self.meteors.len() < self.config.meteor_max && rng.chance(self.config.meteor_probability) {
            self.meteors.push(Meteor::spawn(rng, size));
        }
        self.meteors.retain_mut(|m| m.tick(size));

        self.meteor_instances.clear();
        for m in &self.meteors {
            let tail = m.tail();
            let alpha = m.alpha();
            self.meteor_instances.push(StarInstance {
                x: m.pos.x,
                y: m.pos.y,
                tail_x: tail.x,
                tail_y: tail.y,
                alpha: 0.55 * alpha,
                width: (1.8 * alpha).max(1.0),
                radius: 0.0,
                kind: StarInstance::KIND_METEOR,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(config: &StarConfig, rng: &mut Rng) -> Starfield {
        Starfield::new(config, Vec2::new(800.0, 600.0), rng, 0.0)
    }

    fn step(now_ms: f64) -> StarStep {
        StarStep {
            size: Vec2::new(800.0, 600.0),
            pointer: Vec2::new(400.0, 300.0),
            now_ms,
        }
    }

    #[test]
    fn pool_is_fixed_size() {
        let mut rng = Rng::new(1);
        let config = StarConfig { count: 50, ..StarConfig::default() };
        let mut f = field(&config, &mut rng);
        f.set_target_speed(0.28);
        for i in 0..200 {
            f.advance(step(i as f64 * 16.0), &mut rng);
            assert_eq!(f.stars().len(), 50);
            assert_eq!(f.star_instances().len(), 50);
        }
    }

    #[test]
    fn speed_eases_toward_target() {
        let mut rng = Rng::new(2);
        let mut f = field(&StarConfig::default(), &mut rng);
        f.set_target_speed(0.28);
        f.advance(step(0.0), &mut rng);
        assert!((f.speed() - 0.28 * 0.06).abs() < 1e-6);
        assert_eq!(f.mode(), StarMode::Streak);
    }

    #[test]
    fn idle_field_twinkles() {
        let mut rng = Rng::new(3);
        let mut f = field(&StarConfig::default(), &mut rng);
        for i in 0..120 {
            f.advance(step(i as f64 * 16.0), &mut rng);
        }
        assert_eq!(f.mode(), StarMode::Twinkle);
        for inst in f.star_instances() {
            assert_eq!(inst.kind, StarInstance::KIND_DOT);
            assert!((0.0..=1.0).contains(&inst.alpha));
            assert!(inst.radius == Star::DOT_RADIUS || inst.radius == Star::FLASH_RADIUS);
        }
        // Scheduled targets never leave the clamp band unless flashing.
        for s in f.stars().iter().filter(|s| !s.is_flashing()) {
            assert!(s.target_alpha == 0.0 || s.target_alpha == s.base || (0.05..=0.7).contains(&s.target_alpha));
        }
    }

    #[test]
    fn streaking_stars_stay_within_diagonal() {
        let mut rng = Rng::new(4);
        let mut f = field(&StarConfig::default(), &mut rng);
        f.set_target_speed(0.28);
        let limit = Vec2::new(800.0, 600.0).length();
        for i in 0..300 {
            f.advance(step(i as f64 * 16.0), &mut rng);
            for s in f.stars() {
                assert!(s.pos.length() <= limit + 1e-3);
            }
        }
        let inst = f.star_instances()[0];
        assert_eq!(inst.kind, StarInstance::KIND_STREAK);
        assert!(inst.width >= 1.0);
    }

    #[test]
    fn raise_never_lowers() {
        let mut rng = Rng::new(5);
        let mut f = field(&StarConfig::default(), &mut rng);
        f.set_target_speed(0.28);
        f.raise_target_speed(0.08);
        assert_eq!(f.target_speed(), 0.28);
        f.set_target_speed(0.006);
        f.raise_target_speed(0.08);
        assert_eq!(f.target_speed(), 0.08);
    }

    #[test]
    fn meteors_respect_cap_and_switch() {
        let mut rng = Rng::new(6);
        let always = StarConfig { meteor_probability: 1.0, meteor_max: 1, ..StarConfig::default() };
        let mut f = field(&always, &mut rng);
        for i in 0..30 {
            f.advance(step(i as f64 * 16.0), &mut rng);
            assert!(f.meteors().len() <= 1);
        }
        assert_eq!(f.meteor_instances().len(), f.meteors().len());

        let never = StarConfig { meteor_probability: 0.0, ..StarConfig::default() };
        let mut g = field(&never, &mut rng);
        for i in 0..500 {
            g.advance(step(i as f64 * 16.0), &mut rng);
        }
        assert!(g.meteors().is_empty());
    }
}
