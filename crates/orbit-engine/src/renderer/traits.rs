//! Contract for the decorative ship renderer.
//!
//! The page may host a 3D ship on its own canvas. The core drives it through
//! [`ShipRenderer`]; the renderer is an enhancement only. When it fails, the
//! link drops it and navigation carries on without a visible ship.

use std::error::Error;
use std::fmt;

use crate::components::ship::Ship;
use crate::core::viewport::Viewport;

/// Ship placement as handed to the renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipPose {
    /// Position as a 0..1 fraction of the viewport.
    pub x: f32,
    pub y: f32,
    pub heading_deg: f32,
    /// Only set when the scale changed (in flight or on landing).
    pub scale: Option<f32>,
}

impl ShipPose {
    pub fn from_ship(ship: &Ship, viewport: &Viewport, angle_offset_deg: f32, with_scale: bool) -> Self {
        let n = viewport.normalize(ship.pos);
        Self {
            x: n.x,
            y: n.y,
            heading_deg: ship.heading_deg + angle_offset_deg,
            scale: with_scale.then_some(ship.scale),
        }
    }
}

/// Failure reported by a ship renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipRendererError(pub String);

impl fmt::Display for ShipRendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ship renderer: {}", self.0)
    }
}

impl Error for ShipRendererError {}

/// External ship renderer.
///
/// # Example Implementation
///
/// ```ignore
/// struct LoggingShip;
///
/// impl ShipRenderer for LoggingShip {
///     fn place(&mut self, pose: ShipPose) -> Result<(), ShipRendererError> {
///         log::trace!("ship at {:.3},{:.3}", pose.x, pose.y);
///         Ok(())
///     }
///
///     fn set_engine(&mut self, on: bool) -> Result<(), ShipRendererError> {
///         log::trace!("engine {}", on);
///         Ok(())
///     }
/// }
/// ```
pub trait ShipRenderer {
    /// Move the ship. Called after every position or heading change.
    fn place(&mut self, pose: ShipPose) -> Result<(), ShipRendererError>;

    /// Toggle the propulsion effect.
    fn set_engine(&mut self, on: bool) -> Result<(), ShipRendererError>;
}

/// Optional, self-disabling connection to a [`ShipRenderer`].
#[derive(Default)]
pub struct ShipLink {
    renderer: Option<Box<dyn ShipRenderer>>,
}

impl ShipLink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, renderer: Box<dyn ShipRenderer>) {
        self.renderer = Some(renderer);
    }

    pub fn is_attached(&self) -> bool {
        self.renderer.is_some()
    }

    pub fn place(&mut self, pose: ShipPose) {
        self.call(|r| r.place(pose));
    }

    pub fn set_engine(&mut self, on: bool) {
        self.call(|r| r.set_engine(on));
    }

    fn call(&mut self, f: impl FnOnce(&mut dyn ShipRenderer) -> Result<(), ShipRendererError>) {
        let Some(renderer) = self.renderer.as_deref_mut() else {
            return;
        };
        if let Err(err) = f(renderer) {
            log::warn!("{}; continuing without the ship renderer", err);
            self.renderer = None;
        }
    }
}

impl fmt::Debug for ShipLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShipLink")
            .field("attached", &self.is_attached())
            .finish()
    }
}
