use orbit_engine::{
    InputEvent, InputQueue, ProtocolLayout, SceneConfig, SceneState, Setup, ShipRenderer, Viewport,
};

/// Page-side options passed to `scene_init`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions<'a> {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
    pub now_ms: f64,
    /// Zero keeps the configured seed.
    pub seed: u64,
    pub reduced_motion: bool,
    /// Site data handed to [`Setup::load`]. Empty means none.
    pub site_json: &'a str,
}

/// Generic scene runner that wires a site setup to the frame loop.
///
/// Each concrete site (e.g., `portfolio`) creates a `thread_local!` SceneRunner
/// and exports free functions via `#[wasm_bindgen]`, because wasm-bindgen
/// cannot export generic structs directly.
pub struct SceneRunner<S: Setup> {
    setup: S,
    scene: Option<SceneState>,
    input: InputQueue,
    layout: ProtocolLayout,
}

impl<S: Setup> SceneRunner<S> {
    pub fn new(setup: S) -> Self {
        let layout = ProtocolLayout::from_config(&setup.config());
        Self {
            setup,
            scene: None,
            input: InputQueue::new(),
            layout,
        }
    }

    /// Build the scene. Call once after construction.
    pub fn init(&mut self, options: InitOptions<'_>) {
        if !options.site_json.is_empty() {
            if let Err(err) = self.setup.load(options.site_json) {
                log::warn!("site data rejected, using built-in values: {}", err);
            }
        }

        let mut config: SceneConfig = self.setup.config();
        if options.reduced_motion {
            config.apply_reduced_motion();
        }
        if options.seed != 0 {
            config.seed = options.seed;
        }

        let viewport = Viewport::with_dpr(options.width, options.height, options.dpr);
        let rooms = self.setup.rooms();
        let manifest = self.setup.manifest();
        let scene = SceneState::new(config, viewport, rooms, manifest, options.now_ms);
        self.layout = scene.layout().clone();
        self.scene = Some(scene);
    }

    pub fn is_initialized(&self) -> bool {
        self.scene.is_some()
    }

    /// Queue an input event; it is applied at the start of the next frame.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame at the page's animation timestamp.
    pub fn frame(&mut self, now_ms: f64) {
        if let Some(scene) = self.scene.as_mut() {
            scene.frame(now_ms, &mut self.input);
        }
    }

    pub fn attach_ship_renderer(&mut self, renderer: Box<dyn ShipRenderer>) {
        match self.scene.as_mut() {
            Some(scene) => scene.attach_ship_renderer(renderer),
            None => log::warn!("ship renderer attached before init, ignoring"),
        }
    }

    pub fn scene(&self) -> Option<&SceneState> {
        self.scene.as_ref()
    }

    // ---- Pointer accessors for frame buffer reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.scene
            .as_ref()
            .map_or(std::ptr::null(), |s| s.frame_buffer().as_ptr())
    }

    pub fn frame_len(&self) -> u32 {
        self.scene
            .as_ref()
            .map_or(0, |s| s.frame_buffer().as_slice().len() as u32)
    }

    // ---- Texture accessors ----

    pub fn texture_key(&self, id: u32) -> String {
        self.scene
            .as_ref()
            .and_then(|s| s.texture_key(id))
            .unwrap_or_default()
            .to_string()
    }

    pub fn texture_path(&self, id: u32) -> String {
        self.scene
            .as_ref()
            .and_then(|s| s.texture_path(id))
            .unwrap_or_default()
    }

    pub fn fallback_texture_json(&self, id: u32) -> String {
        self.scene
            .as_ref()
            .and_then(|s| s.fallback_texture_json(id))
            .unwrap_or_default()
    }

    // ---- Layout accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn star_data_offset(&self) -> u32 {
        self.layout.star_data_offset as u32
    }

    pub fn meteor_data_offset(&self) -> u32 {
        self.layout.meteor_data_offset as u32
    }

    pub fn target_data_offset(&self) -> u32 {
        self.layout.target_data_offset as u32
    }

    pub fn belt_data_offset(&self) -> u32 {
        self.layout.belt_data_offset as u32
    }

    pub fn event_data_offset(&self) -> u32 {
        self.layout.event_data_offset as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_engine::{Color, Palette, Percent, Room, Target};

    struct OnePlanet {
        loaded: Option<String>,
    }

    impl Setup for OnePlanet {
        fn load(&mut self, site_json: &str) -> Result<(), serde_json::Error> {
            let value: serde_json::Value = serde_json::from_str(site_json)?;
            self.loaded = value["name"].as_str().map(str::to_string);
            Ok(())
        }

        fn rooms(&mut self) -> Vec<Room> {
            let c = Color::WHITE;
            let palette = Palette { id: 0, base: c, shade: c, highlight: c, glow: c, ring: None };
            let name = self.loaded.clone().unwrap_or_else(|| "Volara".into());
            vec![
                Room::new(vec![Target::new(name, Percent::new(50.0, 50.0), 40.0, palette)]),
                Room::new(vec![Target::new("Nyxus", Percent::new(30.0, 30.0), 42.0, palette)]),
            ]
        }
    }

    fn options(site_json: &str) -> InitOptions<'_> {
        InitOptions { width: 800.0, height: 600.0, dpr: 1.0, site_json, ..Default::default() }
    }

    #[test]
    fn frame_before_init_is_a_no_op() {
        let mut runner = SceneRunner::new(OnePlanet { loaded: None });
        runner.frame(16.0);
        assert!(!runner.is_initialized());
        assert!(runner.frame_ptr().is_null());
        assert_eq!(runner.frame_len(), 0);
    }

    #[test]
    fn init_applies_site_data_and_sizes_buffer() {
        let mut runner = SceneRunner::new(OnePlanet { loaded: None });
        runner.init(options(r#"{ "name": "Kairon" }"#));
        runner.frame(16.0);
        assert_eq!(runner.frame_len(), runner.buffer_total_floats());
        assert_eq!(runner.texture_key(0), "kairon");
        assert_eq!(runner.texture_path(0), "assets/planets/kairon.png");
        assert_eq!(runner.texture_key(9), "");
    }

    #[test]
    fn malformed_site_data_keeps_defaults() {
        let mut runner = SceneRunner::new(OnePlanet { loaded: None });
        runner.init(options("{ not json"));
        runner.frame(16.0);
        assert_eq!(runner.texture_key(0), "volara");
    }

    #[test]
    fn page_room_switch_waits_for_the_frame() {
        let mut runner = SceneRunner::new(OnePlanet { loaded: None });
        runner.init(options("{}"));
        let active = |r: &SceneRunner<OnePlanet>| r.scene().map(|s| s.registry().active_room());

        runner.push_input(InputEvent::SwitchRoom { room: 1 });
        assert_eq!(active(&runner), Some(0));
        runner.frame(16.0);
        assert_eq!(active(&runner), Some(1));
    }
}
