//! Coordinate spaces: percent-of-viewport placement, pixel viewport, and the
//! camera's zoom-around-center composite transform.
//!
//! Hit-testing and frame building both go through these helpers, so a target
//! is always projected with the current viewport size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Position expressed as a percentage of the viewport (0..100 per axis).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Percent {
    pub x: f32,
    pub y: f32,
}

impl Percent {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Pixel-space viewport (CSS pixels) plus device pixel ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self::with_dpr(width, height, 1.0)
    }

    /// Dimensions are floored to whole pixels and the ratio is never below 1.
    pub fn with_dpr(width: f32, height: f32, dpr: f32) -> Self {
        Self {
            width: width.max(0.0).floor(),
            height: height.max(0.0).floor(),
            dpr: if dpr.is_finite() { dpr.max(1.0) } else { 1.0 },
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.size() * 0.5
    }

    /// `pixel = percent / 100 * dimension`.
    pub fn to_px(&self, p: Percent) -> Vec2 {
        Vec2::new(p.x / 100.0 * self.width, p.y / 100.0 * self.height)
    }

    /// Pixel position as a 0..1 fraction of the viewport.
    pub fn normalize(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            if self.width > 0.0 { px.x / self.width } else { 0.0 },
            if self.height > 0.0 { px.y / self.height } else { 0.0 },
        )
    }

    /// Apply a resize. Returns true when anything changed.
    pub fn resize(&mut self, width: f32, height: f32, dpr: f32) -> bool {
        let next = Self::with_dpr(width, height, dpr);
        let changed = next != *self;
        *self = next;
        changed
    }

    /// Backing-store size for a canvas at this ratio.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.dpr).floor() as u32,
            (self.height * self.dpr).floor() as u32,
        )
    }
}

/// Translate to center, scale by zoom, translate back minus pan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub center: Vec2,
    pub pan: Vec2,
    pub zoom: f32,
}

impl ViewTransform {
    /// Scene → screen.
    pub fn apply(&self, world: Vec2) -> Vec2 {
        self.center + (world - self.center - self.pan) * self.zoom
    }

    /// Screen → scene.
    pub fn inverse(&self, screen: Vec2) -> Vec2 {
        let zoom = if self.zoom.abs() > f32::EPSILON { self.zoom } else { 1.0 };
        (screen - self.center) / zoom + self.center + self.pan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_projects_with_current_size() {
        let vp = Viewport::new(1000.0, 800.0);
        assert_eq!(vp.to_px(Percent::new(18.0, 26.0)), Vec2::new(180.0, 208.0));
    }

    #[test]
    fn reprojection_is_idempotent() {
        let vp = Viewport::new(1366.0, 768.0);
        let p = Percent::new(47.0, 42.0);
        assert_eq!(vp.to_px(p), vp.to_px(p));
    }

    #[test]
    fn resize_changes_projection() {
        let mut vp = Viewport::new(1000.0, 800.0);
        let p = Percent::new(50.0, 50.0);
        let before = vp.to_px(p);
        assert!(vp.resize(500.0, 400.0, 2.0));
        assert_eq!(vp.to_px(p), before * 0.5);
        assert_eq!(vp.backing_size(), (1000, 800));
        assert!(!vp.resize(500.0, 400.0, 2.0));
    }

    #[test]
    fn dpr_never_below_one() {
        assert_eq!(Viewport::with_dpr(10.0, 10.0, 0.5).dpr, 1.0);
        assert_eq!(Viewport::with_dpr(10.0, 10.0, f32::NAN).dpr, 1.0);
    }

    #[test]
    fn transform_round_trips() {
        let t = ViewTransform {
            center: Vec2::new(400.0, 300.0),
            pan: Vec2::new(-120.0, 35.0),
            zoom: 1.85,
        };
        let world = Vec2::new(210.0, 97.0);
        let back = t.inverse(t.apply(world));
        assert!((back - world).length() < 1e-3);
    }

    #[test]
    fn zoom_targets_panned_point_at_center() {
        // Flying to a point pans by (point - center); that point then lands on screen center.
        let center = Vec2::new(400.0, 300.0);
        let point = Vec2::new(100.0, 500.0);
        let t = ViewTransform {
            center,
            pan: point - center,
            zoom: 1.85,
        };
        assert!((t.apply(point) - center).length() < 1e-4);
    }
}
