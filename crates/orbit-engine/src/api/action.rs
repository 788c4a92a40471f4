//! Activation callbacks and the requests they may make.
//!
//! Callbacks never touch the scene directly. They receive an
//! [`ActionContext`], record what they want (a room switch, a panel, a raw
//! event) and the scene applies it after the callback returns.

use std::fmt;

use crate::api::types::{EventKind, SceneEvent, TargetRef};

/// Side effects requested by an activation callback.
#[derive(Debug, Default)]
pub struct ActionContext {
    events: Vec<SceneEvent>,
    room_request: Option<usize>,
    palette: Option<usize>,
}

impl ActionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a target activation; panels opened from it carry the
    /// target's palette so the page can tint the landing background.
    pub fn for_palette(palette: usize) -> Self {
        Self {
            palette: Some(palette),
            ..Self::default()
        }
    }

    /// Ask the scene to make `room` active. The last request wins.
    pub fn switch_room(&mut self, room: usize) {
        self.room_request = Some(room);
    }

    /// Ask the page to open content panel `panel`.
    pub fn open_panel(&mut self, panel: u32) {
        let palette = self.palette.map_or(-1.0, |p| p as f32);
        self.events
            .push(SceneEvent::new(EventKind::OpenPanel, panel as f32, palette, 0.0));
    }

    pub fn room_request(&self) -> Option<usize> {
        self.room_request
    }

    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    /// Split into the recorded events and the room request.
    pub fn into_parts(self) -> (Vec<SceneEvent>, Option<usize>) {
        (self.events, self.room_request)
    }
}

/// A target's activation callback. Invoked once per completed arrival.
pub type Action = Box<dyn FnMut(&mut ActionContext)>;

/// What runs once a flight's camera hold has elapsed.
pub enum Arrival {
    /// Run the activation callback of a registered target.
    Activate(TargetRef),
    /// Run a one-off callback.
    Callback(Box<dyn FnOnce(&mut ActionContext)>),
    /// Arrive without side effects.
    Nothing,
}

impl Arrival {
    pub fn callback(f: impl FnOnce(&mut ActionContext) + 'static) -> Self {
        Arrival::Callback(Box::new(f))
    }

    pub fn target(&self) -> Option<TargetRef> {
        match self {
            Arrival::Activate(target) => Some(*target),
            _ => None,
        }
    }
}

impl fmt::Debug for Arrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arrival::Activate(target) => f.debug_tuple("Activate").field(target).finish(),
            Arrival::Callback(_) => f.write_str("Callback(..)"),
            Arrival::Nothing => f.write_str("Nothing"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_room_request_wins() {
        let mut ctx = ActionContext::new();
        ctx.switch_room(1);
        ctx.switch_room(0);
        assert_eq!(ctx.room_request(), Some(0));
    }

    #[test]
    fn open_panel_carries_palette() {
        let mut ctx = ActionContext::for_palette(3);
        ctx.open_panel(2);
        let ev = ctx.events()[0];
        assert!(ev.is(EventKind::OpenPanel));
        assert_eq!(ev.a, 2.0);
        assert_eq!(ev.b, 3.0);

        let mut bare = ActionContext::new();
        bare.open_panel(1);
        assert_eq!(bare.events()[0].b, -1.0);
    }

    #[test]
    fn arrival_debug_hides_closures() {
        let a = Arrival::callback(|_| {});
        assert_eq!(format!("{:?}", a), "Callback(..)");
        let b = Arrival::Activate(TargetRef::new(0, 2));
        assert_eq!(b.target(), Some(TargetRef::new(0, 2)));
    }
}
