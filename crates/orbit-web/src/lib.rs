pub mod runner;
pub mod ship;

pub use runner::{InitOptions, SceneRunner};
pub use ship::JsShipRenderer;

pub use js_sys;
pub use orbit_engine;

/// Generate all `#[wasm_bindgen]` exports for a site.
///
/// This macro generates:
/// - `thread_local!` storage for the SceneRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (scene_init, scene_frame, input handlers, buffer and texture accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// mod site;
/// use site::MySite;
///
/// orbit_web::export_scene!(MySite, "my-site");
/// ```
///
/// # Arguments
///
/// - `$setup_type`: The site struct type that implements `orbit_engine::Setup` and has `new()`
/// - `$site_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_scene {
    ($setup_type:ty, $site_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner<$setup_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::SceneRunner<$setup_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Scene not initialized. Call scene_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn scene_init(
            width: f32,
            height: f32,
            dpr: f32,
            now_ms: f64,
            seed: f64,
            reduced_motion: bool,
            site_json: &str,
        ) {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let setup = <$setup_type>::new();
            let runner = $crate::SceneRunner::new(setup);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| {
                r.init($crate::InitOptions {
                    width,
                    height,
                    dpr,
                    now_ms,
                    seed: seed.max(0.0) as u64,
                    reduced_motion,
                    site_json,
                })
            });
            log::info!("{}: initialized", $site_name);
        }

        #[wasm_bindgen]
        pub fn scene_frame(now_ms: f64) {
            with_runner(|r| r.frame(now_ms));
        }

        #[wasm_bindgen]
        pub fn scene_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orbit_engine::InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_click(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::orbit_engine::InputEvent::Click { x, y }));
        }

        #[wasm_bindgen]
        pub fn scene_key_down(key_code: u32) {
            let key = $crate::orbit_engine::Key::from_code(key_code);
            with_runner(|r| r.push_input($crate::orbit_engine::InputEvent::Key(key)));
        }

        #[wasm_bindgen]
        pub fn scene_resize(width: f32, height: f32, dpr: f32) {
            with_runner(|r| r.push_input($crate::orbit_engine::InputEvent::Resize { width, height, dpr }));
        }

        #[wasm_bindgen]
        pub fn scene_start() {
            with_runner(|r| r.push_input($crate::orbit_engine::InputEvent::Start));
        }

        #[wasm_bindgen]
        pub fn scene_texture_loaded(id: u32, slot: u32) {
            with_runner(|r| r.push_input($crate::orbit_engine::InputEvent::TextureLoaded { id, slot }));
        }

        #[wasm_bindgen]
        pub fn scene_texture_failed(id: u32) {
            with_runner(|r| r.push_input($crate::orbit_engine::InputEvent::TextureFailed { id }));
        }

        #[wasm_bindgen]
        pub fn scene_switch_room(room: u32) {
            with_runner(|r| {
                r.push_input($crate::orbit_engine::InputEvent::SwitchRoom { room: room as usize })
            });
        }

        #[wasm_bindgen]
        pub fn scene_attach_ship(place: $crate::js_sys::Function, set_engine: $crate::js_sys::Function) {
            let renderer = $crate::JsShipRenderer::new(place, set_engine);
            with_runner(|r| r.attach_ship_renderer(Box::new(renderer)));
        }

        // ---- Frame buffer accessors ----

        #[wasm_bindgen]
        pub fn get_frame_ptr() -> *const f32 {
            with_runner(|r| r.frame_ptr())
        }

        #[wasm_bindgen]
        pub fn get_frame_len() -> u32 {
            with_runner(|r| r.frame_len())
        }

        #[wasm_bindgen]
        pub fn get_star_data_offset() -> u32 {
            with_runner(|r| r.star_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_meteor_data_offset() -> u32 {
            with_runner(|r| r.meteor_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_target_data_offset() -> u32 {
            with_runner(|r| r.target_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_belt_data_offset() -> u32 {
            with_runner(|r| r.belt_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_event_data_offset() -> u32 {
            with_runner(|r| r.event_data_offset())
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats())
        }

        // ---- Texture accessors ----

        #[wasm_bindgen]
        pub fn get_texture_key(id: u32) -> String {
            with_runner(|r| r.texture_key(id))
        }

        #[wasm_bindgen]
        pub fn get_texture_path(id: u32) -> String {
            with_runner(|r| r.texture_path(id))
        }

        #[wasm_bindgen]
        pub fn get_fallback_texture_json(id: u32) -> String {
            with_runner(|r| r.fallback_texture_json(id))
        }
    };
}
