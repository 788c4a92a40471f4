use bytemuck::{Pod, Zeroable};

/// Per-star record written to the shared buffer for the page's 2D renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
///
/// Dots use `x, y, radius`; streaks and meteors draw a line from `x, y` to
/// `tail_x, tail_y` with `width`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarInstance {
    /// Head position in screen pixels.
    pub x: f32,
    pub y: f32,
    pub tail_x: f32,
    pub tail_y: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
    /// Line width for streaks and meteors.
    pub width: f32,
    /// Dot radius for twinkling stars.
    pub radius: f32,
    /// See the `KIND_*` constants.
    pub kind: f32,
}

impl StarInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_DOT: f32 = 0.0;
    pub const KIND_STREAK: f32 = 1.0;
    pub const KIND_METEOR: f32 = 2.0;
}

/// Per-target record: 12 floats = 48 bytes stride.
/// Positions are scene pixels; the page applies the camera transform from
/// the frame header.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct TargetInstance {
    /// Drawn centre, idle wobble included.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// 1.0 when this target is the hover candidate.
    pub hovered: f32,
    /// Halo pulse factor (about 0.76 to 1.0).
    pub pulse: f32,
    pub palette: f32,
    /// Texture slot id in the texture cache.
    pub texture_id: f32,
    /// 0 = pending, 1 = image loaded, 2 = procedural fallback.
    pub texture_state: f32,
    pub ring_tilt: f32,
    pub has_ring: f32,
    /// First belt point of this target in the belt section.
    pub belt_start: f32,
    pub belt_count: f32,
}

impl TargetInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Asteroid belt point: 4 floats = 16 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BeltInstance {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub alpha: f32,
}

impl BeltInstance {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}
