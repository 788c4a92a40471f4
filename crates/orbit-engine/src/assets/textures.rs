//! Texture cache keyed by normalized planet name.
//!
//! The page does the actual image loading. The core hands out numeric slots,
//! asks for each key once, and records whether the image arrived or a
//! procedural fallback had to be synthesised. Entries outlive room switches.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::rng::Rng;

/// Lower-case the name and drop everything that is not ASCII alphanumeric.
pub fn texture_key(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One soft light or dark blotch on a fallback texture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Blob {
    /// Offset from the texture centre in pixels.
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub alpha: f32,
    pub light: bool,
}

/// Procedural planet texture: a radial palette gradient overlaid with blobs.
/// Serialized for the page, which paints it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProceduralTexture {
    /// Square canvas edge in pixels.
    pub size: u32,
    pub radius: f32,
    pub palette: u32,
    pub blobs: Vec<Blob>,
}

impl ProceduralTexture {
    const BLOBS: usize = 120;

    pub fn generate(radius: f32, palette: u32, seed: u32) -> Self {
        let mut rng = Rng::new(seed as u64);
        let blobs = (0..Self::BLOBS)
            .map(|_| {
                let r = radius * rng.range(0.05, 0.30);
                let alpha = rng.range(0.10, 0.35);
                let angle = rng.angle();
                let dist = rng.next_f32() * radius * 0.7;
                Blob {
                    x: angle.cos() * dist,
                    y: angle.sin() * dist,
                    radius: r,
                    alpha,
                    light: rng.chance(0.5),
                }
            })
            .collect();
        Self {
            size: (radius * 2.0).ceil() as u32,
            radius,
            palette,
            blobs,
        }
    }
}

/// Resolution state of one texture slot.
#[derive(Debug, Clone, PartialEq)]
pub enum TextureState {
    /// Requested, no answer yet. Targets render without a texture.
    Pending,
    /// Image loaded by the page into its own slot table.
    Image { slot: u32 },
    Fallback(ProceduralTexture),
}

impl TextureState {
    /// Wire code: 0 pending, 1 image, 2 fallback.
    pub fn code(&self) -> f32 {
        match self {
            TextureState::Pending => 0.0,
            TextureState::Image { .. } => 1.0,
            TextureState::Fallback(_) => 2.0,
        }
    }
}

#[derive(Debug, Clone)]
struct TextureEntry {
    key: String,
    state: TextureState,
}

#[derive(Debug, Default)]
pub struct TextureCache {
    entries: Vec<TextureEntry>,
    by_key: HashMap<String, u32>,
}

impl TextureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot for `key`. The flag is true only the first time a key is seen,
    /// which is when the page should start loading it.
    pub fn request(&mut self, key: &str) -> (u32, bool) {
        if let Some(&id) = self.by_key.get(key) {
            return (id, false);
        }
        let id = self.entries.len() as u32;
        self.entries.push(TextureEntry {
            key: key.to_string(),
            state: TextureState::Pending,
        });
        self.by_key.insert(key.to_string(), id);
        (id, true)
    }

    pub fn id_of(&self, key: &str) -> Option<u32> {
        self.by_key.get(key).copied()
    }

    pub fn key(&self, id: u32) -> Option<&str> {
        self.entries.get(id as usize).map(|e| e.key.as_str())
    }

    pub fn state(&self, id: u32) -> Option<&TextureState> {
        self.entries.get(id as usize).map(|e| &e.state)
    }

    /// Record a loaded image. Ignored for unknown ids or already resolved slots.
    pub fn resolve_loaded(&mut self, id: u32, slot: u32) -> bool {
        match self.entries.get_mut(id as usize) {
            Some(entry) if entry.state == TextureState::Pending => {
                entry.state = TextureState::Image { slot };
                true
            }
            _ => false,
        }
    }

    /// Record a failed load and store the fallback in its place.
    pub fn resolve_failed(&mut self, id: u32, fallback: ProceduralTexture) -> bool {
        match self.entries.get_mut(id as usize) {
            Some(entry) if entry.state == TextureState::Pending => {
                log::warn!("texture '{}' failed to load, using procedural fallback", entry.key);
                entry.state = TextureState::Fallback(fallback);
                true
            }
            _ => false,
        }
    }

    /// JSON description of a fallback texture, for the page to paint.
    pub fn fallback_json(&self, id: u32) -> Option<String> {
        match self.state(id)? {
            TextureState::Fallback(tex) => serde_json::to_string(tex).ok(),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
