//! Idle-triggered flights that mimic a user click.

use glam::Vec2;

use crate::api::config::AutopilotConfig;
use crate::components::target::Target;
use crate::core::rng::Rng;
use crate::core::viewport::Viewport;

/// Destination chosen by the autopilot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutopilotPlan {
    /// Index into the active room.
    pub index: usize,
    /// Point just outside the target, in scene pixels.
    pub point: Vec2,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    config: AutopilotConfig,
    last_input_ms: f64,
    locked: bool,
}

impl Autopilot {
    pub fn new(config: &AutopilotConfig, now_ms: f64) -> Self {
        Self {
            config: config.clone(),
            last_input_ms: now_ms,
            locked: false,
        }
    }

    /// Genuine user input: restart the idle timer and release the lock.
    pub fn note_input(&mut self, now_ms: f64) {
        self.last_input_ms = now_ms;
        self.locked = false;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn idle_ms(&self, now_ms: f64) -> f64 {
        now_ms - self.last_input_ms
    }

    /// Pick a destination if the autopilot is due. `gate_open` must be false
    /// while the ship or camera is in transit.
    pub fn check(
        &mut self,
        now_ms: f64,
        gate_open: bool,
        targets: &[Target],
        viewport: &Viewport,
        rng: &mut Rng,
    ) -> Option<AutopilotPlan> {
        let threshold = self.config.idle_ms?;
        if !gate_open || self.locked || targets.is_empty() {
            return None;
        }
        if self.idle_ms(now_ms) < threshold {
            return None;
        }

        let index = rng.next_int(targets.len() as u32) as usize;
        let target = &targets[index];
        let angle = rng.angle();
        let offset = target.radius * rng.range(self.config.offset_min, self.config.offset_max);
        let point = target.center(viewport) + Vec2::from_angle(angle) * offset;

        self.locked = true;
        log::info!("autopilot: heading for '{}'", target.name);
        Some(AutopilotPlan { index, point })
    }
}
