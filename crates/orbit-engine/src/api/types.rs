use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Stable handle to a target: room index plus position within the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub room: usize,
    pub index: usize,
}

impl TargetRef {
    pub const fn new(room: usize, index: usize) -> Self {
        Self { room, index }
    }
}

/// Event kinds written into the event section of the frame buffer.
/// The numeric values are part of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum EventKind {
    /// A flight began. `a, b` = destination pixel, `c` = warp theme index.
    FlightStarted = 1,
    /// Click feedback ring. `a, b` = target pixel centre.
    Flash = 2,
    /// Warp overlay shown. `a` = theme index, `b` = 1 for the intro warp.
    WarpStarted = 3,
    /// Intro hidden, stage shown.
    StageRevealed = 4,
    /// Overlay starts fading out.
    WarpExit = 5,
    /// Overlay fully hidden.
    WarpHidden = 6,
    /// Camera hold elapsed and the arrival chain ran. `a` = room, `b` = target index or -1.
    Arrived = 7,
    /// Active room replaced. `a` = new room, `b` = previous room.
    RoomChanged = 8,
    /// Page should load a texture. `a` = texture slot.
    TextureRequest = 9,
    /// Content panel requested. `a` = panel id, `b` = palette index or -1.
    OpenPanel = 10,
    /// Propulsion toggled. `a` = 1 on, 0 off.
    Engine = 11,
}

/// A scene event communicated from Rust to the page via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct SceneEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl SceneEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: EventKind, a: f32, b: f32, c: f32) -> Self {
        Self {
            kind: kind as u32 as f32,
            a,
            b,
            c,
        }
    }

    pub fn is(&self, kind: EventKind) -> bool {
        self.kind == kind as u32 as f32
    }
}

/// Tint of the warp overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarpTheme {
    #[default]
    Cyan,
    Violet,
    Magma,
    Emerald,
}

impl WarpTheme {
    pub const ALL: [WarpTheme; 4] = [
        WarpTheme::Cyan,
        WarpTheme::Violet,
        WarpTheme::Magma,
        WarpTheme::Emerald,
    ];

    pub fn index(self) -> u32 {
        match self {
            WarpTheme::Cyan => 0,
            WarpTheme::Violet => 1,
            WarpTheme::Magma => 2,
            WarpTheme::Emerald => 3,
        }
    }

    /// CSS class the page toggles on the overlay.
    pub fn css_class(self) -> &'static str {
        match self {
            WarpTheme::Cyan => "theme-cyan",
            WarpTheme::Violet => "theme-violet",
            WarpTheme::Magma => "theme-magma",
            WarpTheme::Emerald => "theme-emerald",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_event_is_4_floats() {
        assert_eq!(std::mem::size_of::<SceneEvent>(), 16);
        assert_eq!(SceneEvent::FLOATS, 4);
    }

    #[test]
    fn event_kind_round_trips_through_float() {
        let ev = SceneEvent::new(EventKind::RoomChanged, 1.0, 0.0, 0.0);
        assert!(ev.is(EventKind::RoomChanged));
        assert!(!ev.is(EventKind::OpenPanel));
        assert_eq!(ev.kind, 8.0);
    }

    #[test]
    fn theme_parses_snake_case() {
        let t: WarpTheme = serde_json::from_str("\"emerald\"").unwrap();
        assert_eq!(t, WarpTheme::Emerald);
        assert_eq!(t.css_class(), "theme-emerald");
    }
}
