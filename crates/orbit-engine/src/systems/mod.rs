pub mod autopilot;
pub mod decor;
pub mod flight;
pub mod hit;
pub mod registry;
pub mod starfield;
pub mod warp;
