//! Ordered rooms of targets, one active at a time, plus the per-name caches
//! (textures and belts) shared by every room.

use glam::Vec2;

use crate::api::action::ActionContext;
use crate::api::types::{EventKind, SceneEvent, TargetRef};
use crate::assets::textures::{texture_key, ProceduralTexture, TextureCache};
use crate::components::target::{Room, Target};
use crate::core::viewport::Viewport;
use crate::renderer::instance::{BeltInstance, TargetInstance};
use crate::systems::decor::{self, DecorCache};

pub struct TargetRegistry {
    rooms: Vec<Room>,
    active: usize,
    textures: TextureCache,
    decor: DecorCache,
}

impl TargetRegistry {
    pub fn new(mut rooms: Vec<Room>) -> Self {
        if rooms.is_empty() {
            log::warn!("registry: no rooms supplied, starting with an empty one");
            rooms.push(Room::default());
        }
        Self {
            rooms,
            active: 0,
            textures: TextureCache::new(),
            decor: DecorCache::new(),
        }
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn active_room(&self) -> usize {
        self.active
    }

    /// Targets of the active room, in registry order.
    pub fn targets(&self) -> &[Target] {
        &self.rooms[self.active].targets
    }

    pub fn get(&self, target: TargetRef) -> Option<&Target> {
        self.rooms.get(target.room)?.targets.get(target.index)
    }

    /// Handle for a target of the active room.
    pub fn active_ref(&self, index: usize) -> Option<TargetRef> {
        (index < self.targets().len()).then_some(TargetRef::new(self.active, index))
    }

    /// Make `room` active, clamped to the valid range.
    /// Returns the previous room when the active room actually changed.
    pub fn set_room(&mut self, room: usize) -> Option<usize> {
        let next = room.min(self.rooms.len() - 1);
        if next == self.active {
            return None;
        }
        let previous = self.active;
        self.active = next;
        log::info!("registry: room {} -> {}", previous, next);
        Some(previous)
    }

    /// Run a target's activation callback.
    pub fn activate(&mut self, target: TargetRef, ctx: &mut ActionContext) -> bool {
        match self
            .rooms
            .get_mut(target.room)
            .and_then(|room| room.targets.get_mut(target.index))
        {
            Some(t) => {
                t.activate(ctx);
                true
            }
            None => {
                log::warn!("registry: activation of missing target {:?}", target);
                false
            }
        }
    }

    pub fn textures(&self) -> &TextureCache {
        &self.textures
    }

    pub fn textures_mut(&mut self) -> &mut TextureCache {
        &mut self.textures
    }

    /// Request textures for every target of the active room that has not
    /// been seen before, pushing one request event per new key.
    pub fn request_textures(&mut self, events: &mut Vec<SceneEvent>) {
        let active = self.active;
        for t in &self.rooms[active].targets {
            let (id, fresh) = self.textures.request(&texture_key(&t.name));
            if fresh {
                events.push(SceneEvent::new(EventKind::TextureRequest, id as f32, 0.0, 0.0));
            }
        }
    }

    /// Replace a failed texture with a fallback built from the first target
    /// (in any room) that uses the key.
    pub fn fail_texture(&mut self, id: u32) -> bool {
        let Some(key) = self.textures.key(id).map(str::to_string) else {
            return false;
        };
        let owner = self
            .rooms
            .iter()
            .flat_map(|room| room.targets.iter())
            .find(|t| texture_key(&t.name) == key);
        let fallback = match owner {
            Some(t) => ProceduralTexture::generate(t.radius, t.palette.id, decor::name_seed(&t.name)),
            None => ProceduralTexture::generate(40.0, 0, decor::name_seed(&key)),
        };
        self.textures.resolve_failed(id, fallback)
    }

    /// Advance decorations of the active room and write its render records.
    pub fn build_instances(
        &mut self,
        viewport: &Viewport,
        now_ms: f64,
        hovered: Option<usize>,
        targets_out: &mut Vec<TargetInstance>,
        belts_out: &mut Vec<BeltInstance>,
    ) {
        targets_out.clear();
        belts_out.clear();
        let active = self.active;
        for (i, t) in self.rooms[active].targets.iter().enumerate() {
            let key = texture_key(&t.name);
            let seed = decor::name_seed(&t.name);
            let center = t.center(viewport) + decor::jitter(seed, t.radius, now_ms);

            let (texture_id, texture_state) = match self.textures.id_of(&key) {
                Some(id) => (
                    id as f32,
                    self.textures.state(id).map_or(0.0, |s| s.code()),
                ),
                None => (-1.0, 0.0),
            };

            let belt_start = belts_out.len();
            if let Some(spec) = &t.belt {
                let belt = self.decor.belt(&key, spec, t.radius, seed);
                belt.advance();
                belt.write_instances(center, belts_out);
            }

            targets_out.push(TargetInstance {
                x: center.x,
                y: center.y,
                radius: t.radius,
                hovered: if hovered == Some(i) { 1.0 } else { 0.0 },
                pulse: decor::halo_pulse(t.radius, now_ms),
                palette: t.palette.id as f32,
                texture_id,
                texture_state,
                ring_tilt: Target::RING_TILT,
                has_ring: if t.has_ring() { 1.0 } else { 0.0 },
                belt_start: belt_start as f32,
                belt_count: (belts_out.len() - belt_start) as f32,
            });
        }
    }

    /// Pixel centre of a target of the active room (without wobble).
    pub fn center(&self, index: usize, viewport: &Viewport) -> Option<Vec2> {
        self.targets().get(index).map(|t| t.center(viewport))
    }
}
