//! Hover and click detection against the active room.

use glam::Vec2;

use crate::components::target::Target;
use crate::core::viewport::Viewport;

/// Extra reach granted to hover checks, in pixels.
pub const HOVER_TOLERANCE: f32 = 6.0;

/// Interaction stays off until the zoom is this close to 1.
pub const NEUTRAL_ZOOM_TOLERANCE: f32 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitMode {
    /// `distance <= radius`.
    Click,
    /// `distance <= radius + HOVER_TOLERANCE`.
    Hover,
}

impl HitMode {
    fn reach(self, radius: f32) -> f32 {
        match self {
            HitMode::Click => radius,
            HitMode::Hover => radius + HOVER_TOLERANCE,
        }
    }
}

/// Index of the first target (registry order) under `point`.
/// Overlaps resolve to the earliest target, not the topmost one drawn.
pub fn find_hit(targets: &[Target], viewport: &Viewport, point: Vec2, mode: HitMode) -> Option<usize> {
    targets
        .iter()
        .position(|t| t.center(viewport).distance(point) <= mode.reach(t.radius))
}

/// Snapshot of everything that can suppress interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InteractionGate {
    pub stage_ready: bool,
    pub camera_busy: bool,
    pub zoom: f32,
    pub ship_moving: bool,
}

impl InteractionGate {
    /// True when hover, click and the autopilot may act.
    pub fn is_open(&self) -> bool {
        self.stage_ready
            && !self.camera_busy
            && !self.ship_moving
            && (self.zoom - 1.0).abs() <= NEUTRAL_ZOOM_TOLERANCE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::target::{Color, Palette};
    use crate::core::viewport::Percent;

    fn target(name: &str, x: f32, y: f32, r: f32) -> Target {
        let c = Color::WHITE;
        let palette = Palette { id: 0, base: c, shade: c, highlight: c, glow: c, ring: None };
        Target::new(name, Percent::new(x, y), r, palette)
    }

    fn vp() -> Viewport {
        Viewport::new(1000.0, 1000.0)
    }

    #[test]
    fn click_boundary() {
        // Centre (500, 500), radius 40.
        let targets = vec![target("a", 50.0, 50.0, 40.0)];
        let at = |d: f32| Vec2::new(500.0 + d, 500.0);
        assert_eq!(find_hit(&targets, &vp(), at(39.0), HitMode::Click), Some(0));
        assert_eq!(find_hit(&targets, &vp(), at(40.0), HitMode::Click), Some(0));
        assert_eq!(find_hit(&targets, &vp(), at(41.0), HitMode::Click), None);
    }

    #[test]
    fn hover_tolerance_boundary() {
        let targets = vec![target("a", 50.0, 50.0, 40.0)];
        let at = |d: f32| Vec2::new(500.0, 500.0 + d);
        assert_eq!(find_hit(&targets, &vp(), at(39.0), HitMode::Hover), Some(0));
        assert_eq!(find_hit(&targets, &vp(), at(45.0), HitMode::Hover), Some(0));
        assert_eq!(find_hit(&targets, &vp(), at(46.0), HitMode::Hover), Some(0));
        assert_eq!(find_hit(&targets, &vp(), at(47.0), HitMode::Hover), None);
    }

    #[test]
    fn overlap_resolves_in_registry_order() {
        let targets = vec![target("first", 50.0, 50.0, 40.0), target("second", 52.0, 50.0, 40.0)];
        assert_eq!(find_hit(&targets, &vp(), Vec2::new(510.0, 500.0), HitMode::Click), Some(0));
    }

    #[test]
    fn hit_uses_current_viewport() {
        let targets = vec![target("a", 50.0, 50.0, 10.0)];
        let small = Viewport::new(200.0, 200.0);
        assert_eq!(find_hit(&targets, &small, Vec2::new(100.0, 100.0), HitMode::Click), Some(0));
        assert_eq!(find_hit(&targets, &vp(), Vec2::new(100.0, 100.0), HitMode::Click), None);
    }

    #[test]
    fn gate_closes_for_any_transit() {
        let open = InteractionGate { stage_ready: true, camera_busy: false, zoom: 1.0, ship_moving: false };
        assert!(open.is_open());
        assert!(!InteractionGate { camera_busy: true, ..open }.is_open());
        assert!(!InteractionGate { ship_moving: true, ..open }.is_open());
        assert!(!InteractionGate { zoom: 1.03, ..open }.is_open());
        assert!(InteractionGate { zoom: 1.015, ..open }.is_open());
        assert!(!InteractionGate { stage_ready: false, ..open }.is_open());
    }
}
