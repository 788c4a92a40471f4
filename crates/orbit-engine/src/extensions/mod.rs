// extensions/mod.rs
//
// Pure math helpers shared by the simulation systems.

pub mod curve;
pub mod easing;

pub use curve::CubicBezier;
pub use easing::{approach, approach_vec2, Easing};
