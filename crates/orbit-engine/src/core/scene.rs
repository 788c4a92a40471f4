//! The scene: every subsystem behind one owner, advanced once per frame.
//!
//! Input handlers only queue events. [`SceneState::frame`] applies them at the
//! start of the next frame, then advances the subsystems in a fixed order:
//! warp phases, starfield, camera, ship, target layer (with hover), autopilot.
//! A touchdown seen by the ship step hands over to the camera in that same
//! frame.

use glam::Vec2;

use crate::api::action::{ActionContext, Arrival};
use crate::api::config::SceneConfig;
use crate::api::types::{EventKind, SceneEvent, TargetRef, WarpTheme};
use crate::assets::manifest::PlanetManifest;
use crate::bridge::protocol::{FrameBuffer, FrameHeader, FrameSections, ProtocolLayout};
use crate::components::ship::Ship;
use crate::components::target::Room;
use crate::core::rng::Rng;
use crate::core::time::FrameClock;
use crate::core::timer::OneShot;
use crate::core::viewport::Viewport;
use crate::input::queue::{InputEvent, InputQueue, Key};
use crate::renderer::camera::{CameraRelease, OrbitCamera};
use crate::renderer::instance::{BeltInstance, TargetInstance};
use crate::renderer::traits::{ShipLink, ShipPose, ShipRenderer};
use crate::systems::autopilot::Autopilot;
use crate::systems::flight::{FlightController, FlightPath, FlightStep, Landing};
use crate::systems::hit::{find_hit, HitMode, InteractionGate};
use crate::systems::registry::TargetRegistry;
use crate::systems::starfield::{StarMode, StarStep, Starfield};
use crate::systems::warp::{WarpCause, WarpController, WarpSignal};

pub struct SceneState {
    config: SceneConfig,
    viewport: Viewport,
    clock: FrameClock,
    rng: Rng,
    starfield: Starfield,
    camera: OrbitCamera,
    ship: Ship,
    flight: FlightController,
    registry: TargetRegistry,
    manifest: PlanetManifest,
    autopilot: Autopilot,
    warp: WarpController,
    intro_timer: OneShot,
    ship_link: ShipLink,
    pointer: Vec2,
    hovered: Option<usize>,
    stage_ready: bool,
    has_flown: bool,
    textures_dirty: bool,
    events: Vec<SceneEvent>,
    /// Events already written to the frame buffer. Anything pushed after
    /// them (between frames) carries over into the next frame.
    published_events: usize,
    warp_signals: Vec<WarpSignal>,
    target_instances: Vec<TargetInstance>,
    belt_instances: Vec<BeltInstance>,
    frame_buffer: FrameBuffer,
}

impl SceneState {
    pub fn new(
        config: SceneConfig,
        viewport: Viewport,
        rooms: Vec<Room>,
        manifest: PlanetManifest,
        now_ms: f64,
    ) -> Self {
        let mut rng = Rng::new(config.seed);
        let mut starfield = Starfield::new(&config.stars, viewport.size(), &mut rng, now_ms);
        let ship = Ship::parked(viewport.to_px(config.ship.park), config.ship.park_heading_deg);

        let stage_ready = !config.intro.enabled;
        if stage_ready {
            starfield.set_target_speed(config.stars.cruise_speed);
        }
        let mut intro_timer = OneShot::new();
        if let (true, Some(delay)) = (config.intro.enabled, config.intro.auto_start_ms) {
            intro_timer.arm(now_ms, delay);
        }

        let registry = TargetRegistry::new(rooms);
        let layout = ProtocolLayout::from_config(&config);
        log::debug!(
            "scene: {} rooms, frame buffer {} bytes",
            registry.room_count(),
            layout.buffer_total_bytes
        );

        Self {
            camera: OrbitCamera::new(&config.camera),
            flight: FlightController::new(&config.ship),
            autopilot: Autopilot::new(&config.autopilot, now_ms),
            warp: WarpController::new(&config.warp),
            events: Vec::with_capacity(config.max_events),
            published_events: 0,
            target_instances: Vec::with_capacity(config.max_targets),
            belt_instances: Vec::with_capacity(config.max_belt_points),
            frame_buffer: FrameBuffer::new(layout),
            clock: FrameClock::starting_at(now_ms),
            pointer: viewport.center(),
            config,
            viewport,
            rng,
            starfield,
            ship,
            registry,
            manifest,
            intro_timer,
            ship_link: ShipLink::new(),
            hovered: None,
            stage_ready,
            has_flown: false,
            textures_dirty: true,
            warp_signals: Vec::with_capacity(3),
        }
    }

    /// Connect the decorative ship renderer and sync it to the current pose.
    /// The flame is lit on attach until the ship first lands.
    pub fn attach_ship_renderer(&mut self, renderer: Box<dyn ShipRenderer>) {
        self.ship_link.attach(renderer);
        if !self.has_flown {
            self.ship.engine_on = true;
        }
        self.ship_link.set_engine(self.ship.engine_on);
        self.place_ship(true);
    }

    pub fn has_ship_renderer(&self) -> bool {
        self.ship_link.is_attached()
    }

    /// Run one frame at page timestamp `now_ms`.
    pub fn frame(&mut self, now_ms: f64, input: &mut InputQueue) {
        self.events.drain(..self.published_events);
        self.clock.advance_to(now_ms);
        let now = self.clock.now_ms();

        if let Some(pointer) = input.take_pointer() {
            self.pointer = pointer;
            if !self.flight.is_moving() {
                self.ship.aim_at(pointer);
                self.place_ship(false);
            }
            self.autopilot.note_input(now);
        }
        for event in input.drain() {
            self.handle_input(event, now);
        }

        if self.intro_timer.fire(now) && !self.stage_ready && !self.warp.is_active() {
            log::info!("scene: intro auto-start");
            let theme = self.random_theme();
            self.start_intro(now, theme);
        }

        self.warp_signals.clear();
        self.warp.tick(now, &mut self.warp_signals);
        for i in 0..self.warp_signals.len() {
            self.apply_warp_signal(self.warp_signals[i]);
        }

        self.starfield.advance(
            StarStep {
                size: self.viewport.size(),
                pointer: self.pointer,
                now_ms: now,
            },
            &mut self.rng,
        );

        if let Some(release) = self.camera.tick(now, self.flight.epoch()) {
            self.run_arrival(release);
        }

        match self.flight.tick(now, &mut self.ship) {
            FlightStep::Idle => {}
            FlightStep::Moving { .. } => self.place_ship(true),
            FlightStep::Landed(landing) => self.land(landing),
        }

        self.hovered = if self.gate().is_open() {
            let world = self.camera.transform(self.viewport.center()).inverse(self.pointer);
            find_hit(self.registry.targets(), &self.viewport, world, HitMode::Hover)
        } else {
            None
        };
        self.registry.build_instances(
            &self.viewport,
            now,
            self.hovered,
            &mut self.target_instances,
            &mut self.belt_instances,
        );

        let gate_open = self.gate().is_open();
        if let Some(plan) = self.autopilot.check(
            now,
            gate_open,
            self.registry.targets(),
            &self.viewport,
            &mut self.rng,
        ) {
            if let Some(target) = self.registry.active_ref(plan.index) {
                let theme = self.registry.targets()[plan.index].warp_theme();
                self.request_flight(plan.point, Arrival::Activate(target), theme);
            }
        }

        if self.textures_dirty {
            self.registry.request_textures(&mut self.events);
            self.textures_dirty = false;
        }

        self.write_frame();
    }

    fn handle_input(&mut self, event: InputEvent, now: f64) {
        match event {
            InputEvent::PointerMove { x, y } => self.pointer = Vec2::new(x, y),
            InputEvent::Click { x, y } => {
                self.autopilot.note_input(now);
                if !self.gate().is_open() {
                    return;
                }
                let world = self.camera.transform(self.viewport.center()).inverse(Vec2::new(x, y));
                if let Some(index) = find_hit(self.registry.targets(), &self.viewport, world, HitMode::Click) {
                    self.launch_to(index);
                }
            }
            InputEvent::Key(key) => {
                self.autopilot.note_input(now);
                if key == Key::Activate && self.gate().is_open() {
                    if let Some(index) = self.hovered {
                        self.launch_to(index);
                    }
                }
            }
            InputEvent::Resize { width, height, dpr } => self.resize(width, height, dpr),
            InputEvent::Start => {
                let intro_running = self.warp.is_active() && self.warp.cause() == WarpCause::Intro;
                if !self.stage_ready && !intro_running {
                    let theme = self.random_theme();
                    self.start_intro(now, theme);
                }
            }
            InputEvent::TextureLoaded { id, slot } => {
                if !self.registry.textures_mut().resolve_loaded(id, slot) {
                    log::debug!("scene: ignoring texture result for slot {}", id);
                }
            }
            InputEvent::TextureFailed { id } => {
                self.registry.fail_texture(id);
            }
            InputEvent::SwitchRoom { room } => self.switch_room(room),
        }
    }

    /// Fly to a target of the active room as a click would: flash at its
    /// centre, then a flight whose arrival activates it.
    fn launch_to(&mut self, index: usize) {
        let (Some(target), Some(center)) = (
            self.registry.active_ref(index),
            self.registry.center(index, &self.viewport),
        ) else {
            return;
        };
        let theme = self.registry.targets()[index].warp_theme();
        self.events
            .push(SceneEvent::new(EventKind::Flash, center.x, center.y, 0.0));
        self.request_flight(center, Arrival::Activate(target), theme);
    }

    /// Start a flight from the ship's current position to `to`.
    ///
    /// Replaces any flight in progress and cancels the camera, including a
    /// pending hold. Arrivals superseded this way never run.
    pub fn request_flight(&mut self, to: Vec2, arrival: Arrival, theme: WarpTheme) {
        let now = self.clock.now_ms();
        if let Some(stale) = self.camera.cancel() {
            log::warn!("scene: new flight supersedes pending arrival {:?}", stale);
        }
        let path = FlightPath::new(self.ship.pos, to, &self.config.ship, now);
        let (epoch, replaced) = self.flight.begin(path, arrival);
        if let Some(stale) = replaced {
            log::warn!("scene: flight {} replaces one in progress ({:?} dropped)", epoch, stale);
        }
        self.has_flown = true;

        self.ship.engine_on = true;
        self.ship_link.set_engine(true);
        if let Some(boost) = self.config.ship.flight_boost_speed {
            self.starfield.raise_target_speed(boost);
        }
        self.warp.start(now, theme, WarpCause::Flight);

        let theme_index = theme.index() as f32;
        self.events.extend([
            SceneEvent::new(EventKind::FlightStarted, to.x, to.y, theme_index),
            SceneEvent::new(EventKind::Engine, 1.0, 0.0, 0.0),
            SceneEvent::new(EventKind::WarpStarted, theme_index, 0.0, 0.0),
        ]);
    }

    /// Make `room` active. Emits one room-changed event when it actually changes.
    fn switch_room(&mut self, room: usize) {
        if let Some(previous) = self.registry.set_room(room) {
            let active = self.registry.active_room();
            self.events.push(SceneEvent::new(
                EventKind::RoomChanged,
                active as f32,
                previous as f32,
                0.0,
            ));
            self.hovered = None;
            self.textures_dirty = true;
        }
    }

    fn start_intro(&mut self, now: f64, theme: WarpTheme) {
        self.intro_timer.cancel();
        self.warp.start(now, theme, WarpCause::Intro);
        self.starfield.set_target_speed(self.config.stars.warp_speed);
        self.events
            .push(SceneEvent::new(EventKind::WarpStarted, theme.index() as f32, 1.0, 0.0));
    }

    fn apply_warp_signal(&mut self, signal: WarpSignal) {
        match signal {
            WarpSignal::RevealStage => {
                self.stage_ready = true;
                self.place_ship(false);
                self.events
                    .push(SceneEvent::new(EventKind::StageRevealed, 0.0, 0.0, 0.0));
                log::info!("scene: stage revealed");
            }
            WarpSignal::Cruise => {
                // A flight or camera in progress keeps its own speed; the
                // camera release restores cruise later.
                if !self.camera.is_busy() && !self.flight.is_moving() {
                    self.starfield.set_target_speed(self.config.stars.cruise_speed);
                }
                self.events.push(SceneEvent::new(EventKind::WarpExit, 0.0, 0.0, 0.0));
            }
            WarpSignal::Hidden => {
                self.events.push(SceneEvent::new(EventKind::WarpHidden, 0.0, 0.0, 0.0));
            }
        }
    }

    fn land(&mut self, landing: Landing) {
        if let Some(speed) = self.config.ship.landing_speed {
            self.starfield.set_target_speed(speed);
        }
        self.ship_link.set_engine(false);
        self.place_ship(true);
        self.events.push(SceneEvent::new(EventKind::Engine, 0.0, 0.0, 0.0));

        let pan = landing.point - self.viewport.center();
        let zoom = self.config.camera.zoom;
        if let Some(stale) = self.camera.fly_to(pan, zoom, landing.epoch, landing.arrival) {
            log::warn!("scene: landing supersedes pending arrival {:?}", stale);
        }
    }

    fn run_arrival(&mut self, release: CameraRelease) {
        let target = release.arrival.target();
        let mut ctx = match target.and_then(|t| self.registry.get(t)) {
            Some(t) => ActionContext::for_palette(t.palette.id as usize),
            None => ActionContext::new(),
        };
        match release.arrival {
            Arrival::Activate(t) => {
                self.registry.activate(t, &mut ctx);
            }
            Arrival::Callback(f) => f(&mut ctx),
            Arrival::Nothing => {}
        }
        log::debug!("scene: arrival of flight {} ran", release.epoch);

        let (requested, room) = ctx.into_parts();
        self.events.extend(requested);
        let (arrived_room, arrived_index) = match target {
            Some(t) => (t.room as f32, t.index as f32),
            None => (self.registry.active_room() as f32, -1.0),
        };
        self.events.push(SceneEvent::new(
            EventKind::Arrived,
            arrived_room,
            arrived_index,
            0.0,
        ));
        if let Some(room) = room {
            self.switch_room(room);
        }
        self.starfield.set_target_speed(self.config.stars.cruise_speed);
    }

    fn resize(&mut self, width: f32, height: f32, dpr: f32) {
        let before = self.viewport.size();
        if !self.viewport.resize(width, height, dpr) {
            return;
        }
        if !self.has_flown {
            self.ship.pos = self.viewport.to_px(self.config.ship.park);
        }
        self.place_ship(false);
        log::debug!("scene: resized {:?} -> {:?}", before, self.viewport.size());
    }

    fn gate(&self) -> InteractionGate {
        InteractionGate {
            stage_ready: self.stage_ready,
            camera_busy: self.camera.is_busy(),
            zoom: self.camera.zoom(),
            ship_moving: self.flight.is_moving(),
        }
    }

    fn random_theme(&mut self) -> WarpTheme {
        self.rng
            .pick(&WarpTheme::ALL)
            .copied()
            .unwrap_or_default()
    }

    fn place_ship(&mut self, with_scale: bool) {
        let pose = ShipPose::from_ship(
            &self.ship,
            &self.viewport,
            self.config.ship.angle_offset_deg,
            with_scale,
        );
        self.ship_link.place(pose);
    }

    fn write_frame(&mut self) {
        let warp_cause = match (self.warp.is_active(), self.warp.cause()) {
            (false, _) => 0.0,
            (true, WarpCause::Intro) => 1.0,
            (true, WarpCause::Flight) => 2.0,
        };
        let header = FrameHeader {
            frame: self.clock.frame(),
            viewport: self.viewport.size(),
            dpr: self.viewport.dpr,
            pan: self.camera.pan(),
            zoom: self.camera.zoom(),
            ship_pos: self.ship.pos,
            ship_heading_deg: self.ship.heading_deg + self.config.ship.angle_offset_deg,
            ship_scale: self.ship.scale,
            engine_on: self.ship.engine_on,
            warp_phase: self.warp.phase().code(),
            warp_theme: self.warp.theme().index(),
            warp_progress: self.warp.progress(self.clock.now_ms()),
            warp_cause,
            room: self.registry.active_room(),
            hovered: self.hovered,
            stage_ready: self.stage_ready,
            star_speed: self.starfield.speed(),
            streaking: self.starfield.mode() == StarMode::Streak,
        };
        self.frame_buffer.write(
            &header,
            &FrameSections {
                stars: self.starfield.star_instances(),
                meteors: self.starfield.meteor_instances(),
                targets: &self.target_instances,
                belts: &self.belt_instances,
                events: &self.events,
            },
        );
        self.published_events = self.events.len();
    }

    // ---- Accessors ----

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn flight(&self) -> &FlightController {
        &self.flight
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn warp(&self) -> &WarpController {
        &self.warp
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn autopilot(&self) -> &Autopilot {
        &self.autopilot
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn stage_ready(&self) -> bool {
        self.stage_ready
    }

    /// Events of the most recent frame, followed by any raised since.
    pub fn events(&self) -> &[SceneEvent] {
        &self.events
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn layout(&self) -> &ProtocolLayout {
        self.frame_buffer.layout()
    }

    /// Texture key behind a slot id from a texture request event.
    pub fn texture_key(&self, id: u32) -> Option<&str> {
        self.registry.textures().key(id)
    }

    /// Image path the page should load for a slot id.
    pub fn texture_path(&self, id: u32) -> Option<String> {
        self.texture_key(id).map(|key| self.manifest.file_for(key))
    }

    /// Fallback texture description for a slot whose image failed.
    pub fn fallback_texture_json(&self, id: u32) -> Option<String> {
        self.registry.textures().fallback_json(id)
    }

    /// Active-room target under a screen point, ignoring the interaction gate.
    pub fn target_at(&self, point: Vec2) -> Option<TargetRef> {
        let world = self.camera.transform(self.viewport.center()).inverse(point);
        find_hit(self.registry.targets(), &self.viewport, world, HitMode::Click)
            .and_then(|index| self.registry.active_ref(index))
    }
}
