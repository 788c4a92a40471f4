// extensions/curve.rs
//
// Cubic Bézier evaluation for curved flight paths.

use glam::Vec2;

/// Cubic Bézier segment `p0 → p3` with control points `p1`, `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub p1: Vec2,
    pub p2: Vec2,
    pub p3: Vec2,
}

impl CubicBezier {
    pub fn new(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Single-bulge arc between two points.
    ///
    /// Both controls sit on the midpoint pushed along the left-hand
    /// perpendicular by `distance * height_factor`. Coincident endpoints give
    /// a degenerate (straight) curve.
    pub fn arc(from: Vec2, to: Vec2, height_factor: f32) -> Self {
        let delta = to - from;
        let dist = delta.length();
        let mid = (from + to) * 0.5;
        let normal = if dist > f32::EPSILON {
            Vec2::new(-delta.y / dist, delta.x / dist)
        } else {
            Vec2::ZERO
        };
        let ctrl = mid + normal * dist * height_factor;
        Self::new(from, ctrl, ctrl, to)
    }

    /// Position at parameter `t` in [0, 1].
    pub fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }

    /// First derivative at `t`.
    pub fn tangent(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        (self.p1 - self.p0) * (3.0 * u * u)
            + (self.p2 - self.p1) * (6.0 * u * t)
            + (self.p3 - self.p2) * (3.0 * t * t)
    }

    /// Tangent direction in degrees (`atan2(dy, dx)`), or None where the
    /// derivative vanishes.
    pub fn heading_deg(&self, t: f32) -> Option<f32> {
        let d = self.tangent(t);
        if d.length_squared() <= f32::EPSILON {
            None
        } else {
            Some(d.y.atan2(d.x).to_degrees())
        }
    }

    /// True if `p` lies inside the axis-aligned bounds of the control points.
    pub fn hull_contains(&self, p: Vec2) -> bool {
        let min = self.p0.min(self.p1).min(self.p2).min(self.p3);
        let max = self.p0.max(self.p1).max(self.p2).max(self.p3);
        p.x >= min.x && p.x <= max.x && p.y >= min.y && p.y <= max.y
    }
}
