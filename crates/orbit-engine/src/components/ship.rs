use glam::Vec2;

/// The ship's pose in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    pub heading_deg: f32,
    /// Perspective scale: 1 in orbit, shrinking toward the landed scale.
    pub scale: f32,
    pub engine_on: bool,
}

impl Ship {
    pub fn parked(pos: Vec2, heading_deg: f32) -> Self {
        Self {
            pos,
            heading_deg,
            scale: 1.0,
            engine_on: false,
        }
    }

    /// Turn toward a screen point without moving.
    pub fn aim_at(&mut self, point: Vec2) {
        let d = point - self.pos;
        if d.length_squared() > f32::EPSILON {
            self.heading_deg = d.y.atan2(d.x).to_degrees();
        }
    }
}
