//! Interactive targets ("planets") and the rooms that group them.

use std::fmt;

use glam::Vec2;

use crate::api::action::{Action, ActionContext};
use crate::api::types::WarpTheme;
use crate::core::viewport::{Percent, Viewport};
use crate::systems::decor::BeltSpec;

/// RGBA colour, components in 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque colour from RGB u8 values.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

/// Visual theme of a planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// Index the page uses to look up its own copy of the palette.
    pub id: u32,
    pub base: Color,
    pub shade: Color,
    pub highlight: Color,
    pub glow: Color,
    /// Decorative ring colour, if the palette has a ring.
    pub ring: Option<Color>,
}

/// A clickable planet bound to an activation callback.
pub struct Target {
    pub name: String,
    pub label: String,
    /// Centre in percent of the viewport. Re-projected on every use.
    pub pos: Percent,
    pub radius: f32,
    pub palette: Palette,
    pub warp: Option<WarpTheme>,
    pub belt: Option<BeltSpec>,
    action: Option<Action>,
}

impl Target {
    pub const RING_TILT: f32 = -0.22;

    pub fn new(name: impl Into<String>, pos: Percent, radius: f32, palette: Palette) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            pos,
            radius,
            palette,
            warp: None,
            belt: None,
            action: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_warp(mut self, theme: WarpTheme) -> Self {
        self.warp = Some(theme);
        self
    }

    pub fn with_belt(mut self, belt: BeltSpec) -> Self {
        self.belt = Some(belt);
        self
    }

    pub fn with_action(mut self, action: impl FnMut(&mut ActionContext) + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    /// Pixel centre for the given viewport.
    pub fn center(&self, viewport: &Viewport) -> Vec2 {
        viewport.to_px(self.pos)
    }

    pub fn warp_theme(&self) -> WarpTheme {
        self.warp.unwrap_or_default()
    }

    pub fn has_ring(&self) -> bool {
        self.palette.ring.is_some()
    }

    /// Run the activation callback. Targets without one do nothing.
    pub fn activate(&mut self, ctx: &mut ActionContext) {
        if let Some(action) = self.action.as_mut() {
            action(ctx);
        }
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("pos", &self.pos)
            .field("radius", &self.radius)
            .field("palette", &self.palette.id)
            .field("warp", &self.warp)
            .field("belt", &self.belt)
            .field("has_action", &self.action.is_some())
            .finish()
    }
}

/// Ordered group of targets. Exactly one room is active at a time.
#[derive(Debug, Default)]
pub struct Room {
    pub targets: Vec<Target>,
}

impl Room {
    pub fn new(targets: Vec<Target>) -> Self {
        Self { targets }
    }
}
