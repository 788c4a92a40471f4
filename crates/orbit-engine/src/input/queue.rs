use glam::Vec2;

/// Keys the scene reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter: activates the hovered target.
    Activate,
    Escape,
    Other(u32),
}

impl Key {
    pub fn from_code(key_code: u32) -> Self {
        match key_code {
            13 => Key::Activate,
            27 => Key::Escape,
            other => Key::Other(other),
        }
    }
}

/// Input event types the scene understands.
/// Coordinates are CSS pixels relative to the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    Click { x: f32, y: f32 },
    Key(Key),
    Resize { width: f32, height: f32, dpr: f32 },
    /// The visitor pressed the intro's start control.
    Start,
    /// A planet image finished loading into a renderer slot.
    TextureLoaded { id: u32, slot: u32 },
    TextureFailed { id: u32 },
    /// The page asked for another room (e.g., a navigation link).
    SwitchRoom { room: usize },
}

/// A queue of input events.
/// JS writes events into the queue; Rust reads and drains them each frame.
/// Pointer moves are coalesced: only the latest position survives a frame.
#[derive(Debug)]
pub struct InputQueue {
    events: Vec<InputEvent>,
    latest_pointer: Option<Vec2>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(16),
            latest_pointer: None,
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::PointerMove { x, y } => self.latest_pointer = Some(Vec2::new(x, y)),
            other => self.events.push(other),
        }
    }

    /// Latest pointer position since the previous call, if the pointer moved.
    pub fn take_pointer(&mut self) -> Option<Vec2> {
        self.latest_pointer.take()
    }

    /// Drain all pending discrete events, oldest first.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Check if there are pending events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.latest_pointer.is_none()
    }

    /// Number of pending discrete events.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
